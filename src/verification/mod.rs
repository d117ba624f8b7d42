//! verification — numerical self-checks for the function contract.
//!
//! Purpose
//! -------
//! Catch wrong derivatives and wrong closed-form proxes before a solver
//! ever sees them. Every [`Func`](crate::funcs::Func) can be checked
//! against two numerical ground truths: finite differences of `eval` for
//! `grad`, and an L-BFGS minimisation of the prox objective for `prox`.
//!
//! Key behaviors
//! -------------
//! - [`check_grad_impl`] compares `grad` with [`numeric_grad`] at each
//!   trial point, by Euclidean norm against an absolute tolerance.
//! - [`check_prox_impl`] compares `prox` with [`numeric_prox`] seeded at
//!   the analytic value, entrywise against `atol + rtol·|b|`, and reports
//!   mean-absolute, max and Euclidean discrepancies.
//! - [`numeric_prox`] solves `argmin_z step·f(z) + 0.5‖z − x‖²` through
//!   argmin's L-BFGS ([`builders`], [`run`]), using `f.grad` when it is
//!   implemented and allowed, finite differences otherwise
//!   ([`adapter`]).
//! - [`CheckBehavior`] selects what a check does with failures: hand back
//!   the report, stop at the first failure with an error, or log a
//!   warning summary and hand back the report.
//!
//! Invariants & assumptions
//! ------------------------
//! - Trial points can have any shape; the solver works on a flattened copy
//!   and results are reshaped before they are compared or returned.
//! - Closures handed to `finitediff` cannot fail, so their errors travel
//!   through a `RefCell` side channel and resurface as [`CheckError`].
//! - Errors carried through argmin are recovered into [`CheckError`] by
//!   downcasting; a `FuncError` raised deep in a solve keeps its variant.
//!
//! Conventions
//! -----------
//! - Option structs ([`GradCheckOptions`], [`ProxCheckOptions`],
//!   [`NumericProxOptions`], [`Tolerances`]) are validated in `new` and
//!   carry conventional defaults.
//! - Reports keep one entry per trial point, in input order.
//! - With `verbose`, per-point outcomes are logged at `debug` level through
//!   the `log` facade; the `obs_slog` feature additionally attaches
//!   argmin's terminal observer to numeric prox solves.
//!
//! Testing notes
//! -------------
//! - Unit tests in each submodule cover option validation, the solver
//!   adapter, closed-form agreement on penalties and the three behaviours.
//! - `tests/verify_losses.rs` runs the checks end to end on the GLM losses.

pub mod adapter;
pub mod builders;
pub mod errors;
pub mod finite_diff;
pub mod grad_check;
pub mod numeric_prox;
pub mod options;
pub mod outcome;
pub mod prox_check;
pub mod report;
pub mod run;
pub mod types;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::errors::{CheckError, CheckKind, CheckResult};
pub use self::finite_diff::numeric_grad;
pub use self::grad_check::check_grad_impl;
pub use self::numeric_prox::numeric_prox;
pub use self::options::{
    CheckBehavior, GradCheckOptions, LineSearcher, NumericProxOptions, ProxCheckOptions,
    Tolerances,
};
pub use self::outcome::NumericProxOutcome;
pub use self::prox_check::check_prox_impl;
pub use self::report::{GradCheckReport, ProxCheckReport, ProxDiscrepancy};
pub use self::types::{DEFAULT_LBFGS_MEM, FnEvalMap};

pub mod prelude {
    pub use super::errors::{CheckError, CheckResult};
    pub use super::grad_check::check_grad_impl;
    pub use super::numeric_prox::numeric_prox;
    pub use super::options::{CheckBehavior, GradCheckOptions, NumericProxOptions, ProxCheckOptions};
    pub use super::prox_check::check_prox_impl;
    pub use super::report::{GradCheckReport, ProxCheckReport};
}
