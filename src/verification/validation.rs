//! Validation helpers for the verification engine.
//!
//! - **Solver tolerances**: [`verify_tol_grad`], [`verify_tol_cost`] ensure
//!   numeric tolerances are finite and strictly positive when provided.
//! - **Check tolerances**: [`verify_atol`], [`verify_rtol`] and
//!   [`verify_check_step`] for gradient/prox check options.
//! - **Solver outputs**: [`validate_grad`], [`validate_value`] and
//!   [`validate_prox_value`] reject wrong dimensions and non-finite entries.
use crate::verification::{
    errors::{CheckError, CheckResult},
    types::{Grad, Theta},
};

/// Validate the optional gradient-norm tolerance.
///
/// # Errors
/// Returns [`CheckError::InvalidTolGrad`] if the value is non-finite or ≤ 0.0.
pub fn verify_tol_grad(tol: Option<f64>) -> CheckResult<()> {
    if let Some(tol) = tol {
        if !tol.is_finite() {
            return Err(CheckError::InvalidTolGrad { tol, reason: "Tolerance must be finite." });
        }
        if tol <= 0.0 {
            return Err(CheckError::InvalidTolGrad { tol, reason: "Tolerance must be positive." });
        }
    }
    Ok(())
}

/// Validate the optional cost-change tolerance.
///
/// # Errors
/// Returns [`CheckError::InvalidTolCost`] if the value is non-finite or ≤ 0.0.
pub fn verify_tol_cost(tol: Option<f64>) -> CheckResult<()> {
    if let Some(tol) = tol {
        if !tol.is_finite() {
            return Err(CheckError::InvalidTolCost { tol, reason: "Tolerance must be finite." });
        }
        if tol <= 0.0 {
            return Err(CheckError::InvalidTolCost { tol, reason: "Tolerance must be positive." });
        }
    }
    Ok(())
}

/// Absolute tolerances may be zero (exact agreement) but not negative.
pub fn verify_atol(tol: f64) -> CheckResult<()> {
    if !tol.is_finite() {
        return Err(CheckError::InvalidAtol { tol, reason: "Tolerance must be finite." });
    }
    if tol < 0.0 {
        return Err(CheckError::InvalidAtol { tol, reason: "Tolerance must be non-negative." });
    }
    Ok(())
}

pub fn verify_rtol(tol: f64) -> CheckResult<()> {
    if !tol.is_finite() {
        return Err(CheckError::InvalidRtol { tol, reason: "Tolerance must be finite." });
    }
    if tol < 0.0 {
        return Err(CheckError::InvalidRtol { tol, reason: "Tolerance must be non-negative." });
    }
    Ok(())
}

pub fn verify_check_step(step: f64) -> CheckResult<()> {
    if !step.is_finite() {
        return Err(CheckError::InvalidStep { step, reason: "Step must be finite." });
    }
    if step <= 0.0 {
        return Err(CheckError::InvalidStep { step, reason: "Step must be positive." });
    }
    Ok(())
}

/// Validate a gradient vector against dimension and finiteness.
///
/// # Errors
/// - [`CheckError::GradientDimMismatch`] if length does not match `dim`.
/// - [`CheckError::InvalidGradient`] with the index/value of the first
///   offending element.
pub fn validate_grad(grad: &Grad, dim: usize) -> CheckResult<()> {
    if grad.len() != dim {
        return Err(CheckError::GradientDimMismatch { expected: dim, found: grad.len() });
    }
    for (index, &value) in grad.iter().enumerate() {
        if !value.is_finite() {
            return Err(CheckError::InvalidGradient {
                index,
                value,
                reason: "Gradient elements must be finite.",
            });
        }
    }
    Ok(())
}

/// Validate that a scalar objective value is finite.
pub fn validate_value(value: f64) -> CheckResult<()> {
    if !value.is_finite() {
        return Err(CheckError::NonFiniteCost { value });
    }
    Ok(())
}

/// Validate and unwrap the minimiser returned by the numeric prox solve.
///
/// # Errors
/// - [`CheckError::MissingProxValue`] if the solver returned nothing.
/// - [`CheckError::InvalidProxValue`] if any element is non-finite.
pub fn validate_prox_value(z_hat: Option<Theta>) -> CheckResult<Theta> {
    match z_hat {
        Some(z) => {
            for (index, &value) in z.iter().enumerate() {
                if !value.is_finite() {
                    return Err(CheckError::InvalidProxValue {
                        index,
                        value,
                        reason: "Numeric prox entries must be finite.",
                    });
                }
            }
            Ok(z)
        }
        None => Err(CheckError::MissingProxValue),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Acceptance and rejection rules for solver and check tolerances.
    // - First-offender reporting for gradients and prox values.
    // -------------------------------------------------------------------------

    #[test]
    fn solver_tolerances_must_be_positive_when_present() {
        assert!(verify_tol_grad(None).is_ok());
        assert!(verify_tol_grad(Some(1e-8)).is_ok());
        assert!(matches!(verify_tol_grad(Some(0.0)), Err(CheckError::InvalidTolGrad { .. })));
        assert!(matches!(verify_tol_cost(Some(f64::NAN)), Err(CheckError::InvalidTolCost { .. })));
    }

    #[test]
    // Zero is a valid absolute/relative tolerance; a zero step is not.
    fn check_tolerances_allow_zero() {
        assert!(verify_atol(0.0).is_ok());
        assert!(verify_rtol(0.0).is_ok());
        assert!(matches!(verify_atol(-1e-5), Err(CheckError::InvalidAtol { .. })));
        assert!(matches!(verify_rtol(f64::INFINITY), Err(CheckError::InvalidRtol { .. })));
        assert!(matches!(verify_check_step(0.0), Err(CheckError::InvalidStep { .. })));
    }

    #[test]
    fn gradient_and_prox_values_report_first_offender() {
        let g = array![1.0, f64::NAN, f64::INFINITY];
        assert!(matches!(validate_grad(&g, 2), Err(CheckError::GradientDimMismatch { .. })));
        assert!(matches!(validate_grad(&g, 3), Err(CheckError::InvalidGradient { index: 1, .. })));

        assert_eq!(validate_prox_value(None), Err(CheckError::MissingProxValue));
        assert!(matches!(
            validate_prox_value(Some(array![0.0, 1.0, f64::NEG_INFINITY])),
            Err(CheckError::InvalidProxValue { index: 2, .. })
        ));
        assert_eq!(validate_prox_value(Some(array![1.0])), Ok(array![1.0]));
    }
}
