//! verification::finite_diff — finite-difference gradients of array functions.
//!
//! Purpose
//! -------
//! Provide the numerical ground truth for gradient checks and the
//! gradient fallback of the numeric prox solve, without exposing the
//! `finitediff` API or the flatten/reshape plumbing to callers.
//!
//! Key behaviors
//! -------------
//! - [`numeric_grad`]: central-difference gradient of `func.eval` at any
//!   trial point, returned with the point's exact shape.
//! - [`fd_gradient`]: central differences with a forward-difference retry,
//!   over a flattened point and a closure that cannot return `Result`.
//! - [`run_fd_diff`]: the forward-difference retry on its own.
//!
//! Invariants & assumptions
//! ------------------------
//! - Closures evaluated by `finitediff` must return `f64`. Any error they
//!   hit is stored in a shared `closure_err` cell (first error wins) and
//!   the closure returns `NaN`; the helpers turn a stored error back into
//!   an `Err` after differencing.
//! - Returned gradients always pass [`validate_grad`].
//!
//! Conventions
//! -----------
//! - Points are flattened in logical (row-major) order and reshaped with
//!   the same order, so entry `i` of the flat gradient is the partial
//!   derivative with respect to the `i`-th entry of `x.iter()`.
//!
//! Testing notes
//! -------------
//! - Unit tests cover shape preservation for several ranks, agreement with
//!   a known gradient, and propagation of evaluation errors.
use crate::{
    funcs::{errors::FuncError, traits::Func},
    verification::{
        errors::{CheckError, CheckResult},
        types::{Grad, Theta},
        validation::validate_grad,
    },
};
use finitediff::FiniteDiff;
use ndarray::{ArrayD, ArrayViewD, Dimension, IxDyn};
use std::cell::RefCell;

/// Finite-difference gradient of `func.eval` at `x`, shaped like `x`.
///
/// Central differences are tried first; if any evaluation fails or the
/// result is not finite, forward differences are used instead.
///
/// # Errors
/// - The error `func.eval` raised (e.g. `NotImplemented`, `ShapeMismatch`)
///   if it fails on the forward-difference retry as well.
/// - [`CheckError::InvalidGradient`] if the forward result is not finite.
pub fn numeric_grad(func: &dyn Func, x: ArrayViewD<'_, f64>) -> CheckResult<ArrayD<f64>> {
    let shape = x.raw_dim();
    let theta = flatten(&x);
    let closure_err: RefCell<Option<CheckError>> = RefCell::new(None);
    let cost = |t: &Theta| -> f64 {
        let value = as_shape(t, &shape).and_then(|p| func.eval(p).map_err(CheckError::from));
        match value {
            Ok(v) => v,
            Err(e) => {
                record_error(&closure_err, e);
                f64::NAN
            }
        }
    };
    let grad = fd_gradient(&theta, &cost, &closure_err)?;
    unflatten(grad, &shape)
}

/// Central-difference gradient with error capture and a forward retry.
///
/// # Errors
/// See [`run_fd_diff`]; errors from the central pass are discarded in
/// favour of the retry's outcome.
pub fn fd_gradient<G: Fn(&Theta) -> f64>(
    theta: &Theta, func: &G, closure_err: &RefCell<Option<CheckError>>,
) -> CheckResult<Grad> {
    closure_err.replace(None);
    let central = theta.central_diff(func);
    if closure_err.borrow().is_none() && validate_grad(&central, theta.len()).is_ok() {
        return Ok(central);
    }
    run_fd_diff(theta, func, closure_err)
}

/// Forward-difference gradient with error capture and validation.
///
/// Clears `closure_err`, runs `forward_diff`, and returns the captured
/// error if `func` stored one.
///
/// # Errors
/// - The first error captured in `closure_err`.
/// - [`CheckError::GradientDimMismatch`] / [`CheckError::InvalidGradient`]
///   from [`validate_grad`].
pub fn run_fd_diff<G: Fn(&Theta) -> f64>(
    theta: &Theta, func: &G, closure_err: &RefCell<Option<CheckError>>,
) -> CheckResult<Grad> {
    closure_err.replace(None);
    let fd_grad = theta.forward_diff(func);
    if let Some(err) = closure_err.take() {
        return Err(err);
    }
    validate_grad(&fd_grad, theta.len())?;
    Ok(fd_grad)
}

// ---- Helper methods ----

/// Store `err` unless an earlier error is already recorded.
pub(crate) fn record_error(slot: &RefCell<Option<CheckError>>, err: CheckError) {
    let mut slot = slot.borrow_mut();
    if slot.is_none() {
        *slot = Some(err);
    }
}

/// Copy `x` into a flat vector in logical order.
pub(crate) fn flatten(x: &ArrayViewD<'_, f64>) -> Theta {
    x.iter().copied().collect()
}

/// View a flat vector with the shape of the original trial point.
pub(crate) fn as_shape<'b>(theta: &'b Theta, shape: &IxDyn) -> CheckResult<ArrayViewD<'b, f64>> {
    theta.view().into_shape(shape.clone()).map_err(|_| shape_error(theta.len(), shape))
}

/// Reshape an owned flat vector to the original trial-point shape.
pub(crate) fn unflatten(theta: Theta, shape: &IxDyn) -> CheckResult<ArrayD<f64>> {
    let len = theta.len();
    theta.into_shape(shape.clone()).map_err(|_| shape_error(len, shape))
}

fn shape_error(len: usize, shape: &IxDyn) -> CheckError {
    CheckError::Func(FuncError::ShapeMismatch { expected: shape.slice().to_vec(), found: vec![len] })
}
