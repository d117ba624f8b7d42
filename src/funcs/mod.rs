//! funcs — the function contract and its composition machinery.
//!
//! Purpose
//! -------
//! Define the single interface through which solvers and the verification
//! engine talk to losses and penalties: evaluate, gradient, proximal
//! operator, conjugate prox, smoothness/proximability flags and the
//! Lipschitz constant of the gradient. Provide the combinators that let
//! arbitrary functions be added together and scalar rules be lifted to
//! arrays of any shape.
//!
//! Key behaviors
//! -------------
//! - [`Func`] with default `NotImplemented` answers for `eval`, `grad` and
//!   `prox`, a provided `conj_prox` via Moreau's identity, and required
//!   capability flags.
//! - [`GradLip`]: explicit "known bound / unknown" answer; summing bounds
//!   propagates `Unknown`.
//! - [`Entrywise`] over a [`ScalarFunc`]: separable functions with exact
//!   shape preservation for every rank.
//! - [`Zero`] and [`Sum`]: additive identity and n-ary sum over borrowed
//!   components, nestable.
//! - Leaf penalties [`L1`], [`Ridge`], [`HuberPenalty`].
//!
//! Invariants & assumptions
//! ------------------------
//! - Function objects are immutable while queried: every method takes
//!   `&self` and the trial point explicitly, and returns a fresh result.
//! - Array-valued answers (`grad`, `prox`, `conj_prox`) have exactly the
//!   shape of the trial point.
//! - `GradLip::Unknown` means "no bound may be assumed"; only provably
//!   constant functions report `Known(0.0)`.
//!
//! Conventions
//! -----------
//! - Trial points are `ndarray::ArrayViewD<f64>`; callers holding an
//!   `Array1`/`Array2` pass `a.view().into_dyn()`, which does not copy.
//! - Errors are [`FuncError`] via [`FuncResult<T>`]; nothing in this module
//!   panics on user input.
//!
//! Downstream usage
//! ----------------
//! - Losses in `glm_loss` implement [`Func`] directly.
//! - Solvers consult `is_smooth` / `is_proximable` / `grad_lip` to pick an
//!   algorithm and step size, then call `grad` / `prox` per iteration.
//! - `verification` consumes the same trait to cross-check analytic
//!   gradients and proxes against numerical ground truth.
//!
//! Testing notes
//! -------------
//! - Unit tests cover shape preservation, the Moreau identity, `Sum`
//!   aggregation and Lipschitz propagation, and validation failures.

pub mod combinators;
pub mod entrywise;
pub mod errors;
pub mod penalties;
pub mod traits;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::combinators::{Sum, Zero};
pub use self::entrywise::{Entrywise, ScalarFunc};
pub use self::errors::{Capability, FuncError, FuncResult};
pub use self::penalties::{HuberPenalty, L1, Ridge};
pub use self::traits::{Func, GradLip};

pub mod prelude {
    pub use super::combinators::{Sum, Zero};
    pub use super::entrywise::{Entrywise, ScalarFunc};
    pub use super::errors::{FuncError, FuncResult};
    pub use super::traits::{Func, GradLip};
}
