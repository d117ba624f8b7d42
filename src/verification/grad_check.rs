//! Gradient self-check: analytic `grad` against finite differences of
//! `eval`.
use crate::{
    funcs::traits::Func,
    verification::{
        errors::{CheckError, CheckKind, CheckResult},
        finite_diff::numeric_grad,
        options::{CheckBehavior, GradCheckOptions},
        report::GradCheckReport,
    },
};
use ndarray::{ArrayD, Zip};

/// Compare `func.grad` with a finite-difference gradient at every point in
/// `values`.
///
/// The error at a point is `‖grad − fd_grad‖₂`; the point passes iff the
/// error is at most `opts.atol`. With `opts.verbose` every point is traced
/// at `debug` level.
///
/// # Errors
/// - Any error from `func.grad` or `func.eval` (a missing capability or a
///   mis-shaped point), whatever the behaviour.
/// - [`CheckError::ToleranceFailure`] at the first failing point in
///   [`CheckBehavior::Error`] mode.
///
/// In [`CheckBehavior::Warn`] mode a summary of failures is logged at
/// `warn` level and the report is still returned.
pub fn check_grad_impl(
    func: &dyn Func, values: &[ArrayD<f64>], opts: &GradCheckOptions,
) -> CheckResult<GradCheckReport> {
    let mut report = GradCheckReport::default();
    for (index, x) in values.iter().enumerate() {
        let analytic = func.grad(x.view())?;
        let numeric = numeric_grad(func, x.view())?;
        if analytic.shape() != numeric.shape() {
            return Err(CheckError::GradientDimMismatch {
                expected: numeric.len(),
                found: analytic.len(),
            });
        }
        let mut sum_sq = 0.0;
        Zip::from(&analytic).and(&numeric).for_each(|a, b| sum_sq += (a - b) * (a - b));
        let error = sum_sq.sqrt();
        let passed = error <= opts.atol;
        if opts.verbose {
            log::debug!("gradient check, value {index}: pass = {passed}, error = {error:e}");
        }
        if !passed && opts.behavior == CheckBehavior::Error {
            return Err(CheckError::ToleranceFailure { check: CheckKind::Grad, index, error });
        }
        report.push(passed, error);
    }
    if opts.behavior == CheckBehavior::Warn && !report.all_passed() {
        log::warn!("{}", report.summary());
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::funcs::{
        errors::{FuncError, FuncResult},
        penalties::{HuberPenalty, Ridge},
    };
    use ndarray::{ArrayViewD, array};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Passing checks for correct gradients.
    // - Detection of a wrong gradient under the three behaviours.
    // - Propagation of missing capabilities.
    //
    // End-to-end checks on the GLM losses live in `tests/verify_losses.rs`.
    // -------------------------------------------------------------------------

    /// `f(x) = Σx²` with gradient deliberately off by a factor of two.
    struct WrongGrad;

    impl Func for WrongGrad {
        fn eval(&self, x: ArrayViewD<'_, f64>) -> FuncResult<f64> {
            Ok(x.iter().map(|v| v * v).sum())
        }
        fn grad(&self, x: ArrayViewD<'_, f64>) -> FuncResult<ArrayD<f64>> {
            Ok(x.to_owned())
        }
        fn is_smooth(&self) -> bool {
            true
        }
        fn is_proximable(&self) -> bool {
            false
        }
    }

    fn points() -> Vec<ArrayD<f64>> {
        vec![
            array![0.0, 0.0].into_dyn(),
            array![1.0, -2.0].into_dyn(),
            array![[0.5, 3.0], [-1.5, 0.25]].into_dyn(),
        ]
    }

    #[test]
    // Purpose
    // -------
    // Correct gradients pass at every point, including points on both
    // sides of a Huber knot.
    //
    // Given
    // -----
    // - Ridge(2) and HuberPenalty(1) at 1-D and 2-D points.
    //
    // Expect
    // ------
    // - All points pass; errors are tiny.
    fn correct_gradients_pass() {
        // Arrange
        let ridge = Ridge::new(2.0).expect("valid");
        let huber = HuberPenalty::new(1.0).expect("valid");
        let opts = GradCheckOptions::default();

        for f in [&ridge as &dyn Func, &huber] {
            // Act
            let report = check_grad_impl(f, &points(), &opts).expect("check runs");

            // Assert
            assert!(report.all_passed(), "errors: {:?}", report.errors);
            assert_eq!(report.passes.len(), 3);
            assert!(report.errors.iter().all(|e| *e < 1e-6));
        }
    }

    #[test]
    // Purpose
    // -------
    // A wrong gradient fails everywhere except at the origin, where both
    // gradients vanish.
    fn wrong_gradient_is_reported() {
        let report =
            check_grad_impl(&WrongGrad, &points(), &GradCheckOptions::default()).expect("check runs");

        assert_eq!(report.passes, vec![true, false, false]);
        assert_eq!(report.n_fails(), 2);
    }

    #[test]
    fn error_mode_stops_at_first_failure() {
        let opts = GradCheckOptions::new(1e-5, CheckBehavior::Error, true).expect("valid");

        let err = check_grad_impl(&WrongGrad, &points(), &opts).expect_err("second point fails");

        assert!(matches!(
            err,
            CheckError::ToleranceFailure { check: CheckKind::Grad, index: 1, .. }
        ));
    }

    #[test]
    fn warn_mode_returns_the_report() {
        let opts = GradCheckOptions::new(1e-5, CheckBehavior::Warn, false).expect("valid");

        let report = check_grad_impl(&WrongGrad, &points(), &opts).expect("warn still returns");

        assert_eq!(report.n_fails(), 2);
    }

    #[test]
    fn missing_gradient_propagates() {
        struct EvalOnly;
        impl Func for EvalOnly {
            fn eval(&self, _x: ArrayViewD<'_, f64>) -> FuncResult<f64> {
                Ok(0.0)
            }
            fn is_smooth(&self) -> bool {
                true
            }
            fn is_proximable(&self) -> bool {
                false
            }
        }

        let err = check_grad_impl(&EvalOnly, &points(), &GradCheckOptions::default())
            .expect_err("grad is missing");

        assert!(matches!(err, CheckError::Func(FuncError::NotImplemented { .. })));
    }
}
