//! glm_loss — data-fitting losses for generalized linear models.
//!
//! Purpose
//! -------
//! Provide the smooth losses a GLM solver minimises, each as a [`Func`]
//! over a coefficient array, together with the eagerly computed Lipschitz
//! constant of its gradient.
//!
//! Key behaviors
//! -------------
//! - [`HuberRegLoss`] / [`HuberRegMultiRespLoss`]: robust regression with a
//!   configurable knot (default [`DEFAULT_HUBER_KNOT`]).
//! - [`Glm`] over a [`SampleLoss`]: generic single-response wrapper with
//!   optional sample weights; [`LogReg`] and [`LinReg`] are the logistic and
//!   least-squares instances.
//! - [`design`]: linear predictors and the operator norm
//!   `‖diag(√w)·[1 | X]‖₂` behind every Lipschitz constant.
//!
//! Invariants & assumptions
//! ------------------------
//! - Losses borrow `X`, `y` and weights; the data must outlive the loss and
//!   is never copied or mutated.
//! - Trial points must have exactly `coef_shape()`; anything else is a
//!   `ShapeMismatch`, never a broadcast.
//! - The Lipschitz constant is fixed at construction and reported as
//!   `GradLip::Known`.
//!
//! Conventions
//! -----------
//! - Intercept first: `[b, β_1, …, β_p]`, or row 0 of the coefficient
//!   matrix for multi-response losses.
//! - Values are averaged over the `n` samples, weighted or not.
//!
//! Downstream usage
//! ----------------
//! - Combine with a penalty through [`crate::funcs::Sum`] and validate
//!   gradients with [`crate::verification::check_grad_impl`].
//!
//! Testing notes
//! -------------
//! - Unit tests check closed-form values at zero coefficients, gradient
//!   layout, weighting and validation; finite-difference agreement lives in
//!   the integration tests.
//!
//! [`Func`]: crate::funcs::Func

pub mod design;
pub mod glm;
pub mod huber;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::design::{covar_mat_op_norm, data_mat_coef_dot, data_mat_coef_mat_dot, lin_reg_lip};
pub use self::glm::{Glm, LeastSquares, LinReg, LogReg, Logistic, SampleLoss};
pub use self::huber::{DEFAULT_HUBER_KNOT, HuberRegLoss, HuberRegMultiRespLoss};

pub mod prelude {
    pub use super::glm::{Glm, LinReg, LogReg, SampleLoss};
    pub use super::huber::{DEFAULT_HUBER_KNOT, HuberRegLoss, HuberRegMultiRespLoss};
}
