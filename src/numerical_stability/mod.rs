//! numerical_stability — overflow-safe scalar kernels for GLM losses.
//!
//! Purpose
//! -------
//! Collect the closed-form, numerically robust scalar formulas that the
//! loss and penalty layers are built on. Each kernel is written so that
//! extreme inputs (large residuals, linear predictors far in the tails)
//! never produce `inf` or `NaN` through an intermediate `exp`.
//!
//! Key behaviors
//! -------------
//! - Huber loss kernels ([`huber`]): scalar value, derivative and proximal
//!   map, plus entrywise array versions that accept any dimensionality.
//! - Logistic kernels ([`logistic`]): a four-region `log(sigmoid(x))`, a
//!   stable sigmoid, and the per-sample loss/gradient pair used by
//!   logistic regression.
//!
//! Invariants & assumptions
//! ------------------------
//! - Kernels assume finite `f64` inputs; finiteness and shape checks live
//!   in the function and loss layers, not here.
//! - The logistic thresholds `-33`, `-18` and `37` are fixed; every region
//!   uses the asymptotic form that is exact to `f64` precision there.
//! - Huber kernels are C¹ at the knot: value and derivative agree from
//!   both sides of `|z| = knot`.
//!
//! Conventions
//! -----------
//! - Scalar kernels carry a `_1d` suffix; array kernels reuse the scalar
//!   rule through `mapv` so there is exactly one formula per kernel.
//! - This module never logs, allocates beyond its outputs, or touches
//!   global state.
//!
//! Testing notes
//! -------------
//! - Unit tests cover agreement with naïve formulas on safe grids, C¹
//!   continuity at the Huber knot, and absence of non-finite values for
//!   the logistic kernels across `[-100, 100]` and beyond.

pub mod huber;
pub mod logistic;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::huber::{huber_eval, huber_eval_1d, huber_grad, huber_grad_1d, huber_prox_1d};
pub use self::logistic::{
    logistic_sample_grads, logistic_sample_losses, logsig, logsig_array, sigmoid,
};

pub mod prelude {
    pub use super::huber::{huber_eval, huber_grad};
    pub use super::logistic::{logistic_sample_grads, logistic_sample_losses, logsig};
}
