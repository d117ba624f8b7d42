//! rust_glmopt — losses and penalties with a uniform eval/grad/prox contract.
//!
//! Purpose
//! -------
//! Serve as the crate root for the building blocks of generalized linear
//! model fitting: a single function contract that solvers program
//! against, the losses and penalties that implement it, and numerical
//! self-checks that confirm their derivatives and proximal operators.
//!
//! Key behaviors
//! -------------
//! - [`funcs`]: the [`Func`](funcs::Func) trait, the `Zero` / `Sum`
//!   combinators, entrywise lifting of scalar rules, and the L1, ridge and
//!   Huber penalties.
//! - [`glm_loss`]: Huber regression (single and multiple responses) and
//!   sample-loss GLMs such as logistic and least-squares regression, with
//!   optional intercepts and sample weights.
//! - [`numerical_stability`]: overflow-safe Huber and logistic kernels
//!   shared by the losses.
//! - [`verification`]: finite-difference gradient checks and L-BFGS based
//!   prox checks with `Return` / `Error` / `Warn` behaviours.
//!
//! Invariants & assumptions
//! ------------------------
//! - Functions are immutable while queried; every array answer has the
//!   shape of its trial point.
//! - Invalid inputs surface as [`FuncError`](funcs::FuncError) or
//!   [`CheckError`](verification::CheckError); library code never panics
//!   on user input.
//!
//! Conventions
//! -----------
//! - Arrays are `ndarray` types throughout; trial points are dynamic-rank
//!   views so one contract covers vectors, matrices and scalars.
//! - Diagnostics go through the `log` facade; the crate installs no logger.
//!
//! Downstream usage
//! ----------------
//! - Solver crates consume `Func` objects, typically a `Sum` of a loss and
//!   a penalty, and use `grad_lip` to choose step sizes.
//! - Loss authors implement `Func` and run `check_grad_impl` /
//!   `check_prox_impl` in their tests.
//!
//! Testing notes
//! -------------
//! - Unit tests live next to the code they test; `tests/verify_losses.rs`
//!   checks every shipped loss and penalty end to end on random data.

pub mod funcs;
pub mod glm_loss;
pub mod numerical_stability;
pub mod verification;

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use rust_glmopt::prelude::*;
//
// to import the main surface in a single line.

pub mod prelude {
    pub use crate::funcs::prelude::*;
    pub use crate::funcs::{HuberPenalty, L1, Ridge};
    pub use crate::glm_loss::prelude::*;
    pub use crate::verification::prelude::*;
}
