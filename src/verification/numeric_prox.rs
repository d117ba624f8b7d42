//! Numeric proximal operator.
//!
//! Solves `argmin_z step·f(z) + 0.5‖z − x‖²` with L-BFGS, selecting the
//! line search from [`NumericProxOptions`] and delegating the run to
//! [`run_lbfgs`].
use crate::{
    funcs::{errors::FuncError, traits::Func},
    verification::{
        adapter::ProxProblem,
        builders::{build_optimizer_hager_zhang, build_optimizer_more_thuente},
        errors::CheckResult,
        finite_diff::{flatten, unflatten},
        options::{LineSearcher, NumericProxOptions},
        outcome::NumericProxOutcome,
        run::run_lbfgs,
        validation::verify_check_step,
    },
};
use ndarray::{ArrayD, ArrayViewD};

/// Numerically evaluate `prox_{step·f}(x)`.
///
/// The solve starts from `init` when given, otherwise from `x`. Unless
/// `opts.force_no_grad` is set, `f.grad` is used when implemented and
/// finite differences otherwise. The minimiser is returned with the shape
/// of `x`.
///
/// # Errors
/// - `InvalidStep` if `step` is not finite and positive.
/// - `Func(ShapeMismatch)` if `init` does not have the shape of `x`.
/// - Errors raised by `f`, by the solver, or by outcome validation.
pub fn numeric_prox(
    func: &dyn Func, x: ArrayViewD<'_, f64>, step: f64, init: Option<ArrayViewD<'_, f64>>,
    opts: &NumericProxOptions,
) -> CheckResult<(ArrayD<f64>, NumericProxOutcome)> {
    verify_check_step(step)?;
    let z0 = match init {
        Some(init) => {
            if init.shape() != x.shape() {
                return Err(FuncError::ShapeMismatch {
                    expected: x.shape().to_vec(),
                    found: init.shape().to_vec(),
                }
                .into());
            }
            flatten(&init)
        }
        None => flatten(&x),
    };
    let shape = x.raw_dim();
    let problem = ProxProblem::new(func, &x, step, !opts.force_no_grad);
    let (z_hat, outcome) = match opts.line_searcher {
        LineSearcher::MoreThuente => {
            let solver = build_optimizer_more_thuente(opts)?;
            run_lbfgs(z0, opts, problem, solver)?
        }
        LineSearcher::HagerZhang => {
            let solver = build_optimizer_hager_zhang(opts)?;
            run_lbfgs(z0, opts, problem, solver)?
        }
    };
    Ok((unflatten(z_hat, &shape)?, outcome))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        funcs::penalties::{HuberPenalty, Ridge},
        verification::{errors::CheckError, options::Tolerances},
    };
    use approx::assert_abs_diff_eq;
    use ndarray::{Array, IxDyn, array};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Agreement of the numeric prox with closed forms for smooth
    //   penalties, with both line searches.
    // - Shape preservation and immediate termination at an exact seed.
    // - Argument validation (`step`, `init` shape).
    //
    // They intentionally DO NOT cover:
    // - Tolerance policy of prox checks, which lives in `prox_check`.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // The ridge prox has the closed form x / (1 + step·pen); the numeric
    // solve recovers it from the default start for both line searches.
    //
    // Given
    // -----
    // - Ridge(pen = 2), step 0.5, a 2×3 target.
    // - Options with `tol_grad = 1e-10` and each line search.
    //
    // Expect
    // ------
    // - Output shape [2, 3] and entries equal to x / 2 to 1e-7.
    fn ridge_prox_matches_closed_form() {
        // Arrange
        let f = Ridge::new(2.0).expect("valid");
        let x = Array::linspace(-3.0, 2.0, 6).into_shape(IxDyn(&[2, 3])).expect("shape");

        for searcher in [LineSearcher::MoreThuente, LineSearcher::HagerZhang] {
            let opts = NumericProxOptions { line_searcher: searcher, ..Default::default() };

            // Act
            let (z, outcome) = numeric_prox(&f, x.view(), 0.5, None, &opts).expect("prox solve");

            // Assert
            assert_eq!(z.shape(), &[2, 3]);
            for (zi, xi) in z.iter().zip(x.iter()) {
                assert_abs_diff_eq!(*zi, xi / 2.0, epsilon = 1e-7);
            }
            assert!(outcome.value.is_finite());
        }
    }

    #[test]
    // Purpose
    // -------
    // Seeding the solve at the exact prox stops it before any iteration.
    fn exact_seed_terminates_immediately() {
        let f = HuberPenalty::new(1.0).expect("valid");
        let x = array![3.0, 0.2, -2.0].into_dyn();
        let exact = f.prox(x.view(), 0.5).expect("analytic prox");

        let (z, outcome) =
            numeric_prox(&f, x.view(), 0.5, Some(exact.view()), &NumericProxOptions::default())
                .expect("prox solve");

        assert_eq!(outcome.iterations, 0);
        for (a, b) in z.iter().zip(exact.iter()) {
            assert_abs_diff_eq!(*a, *b, epsilon = 1e-12);
        }
    }

    #[test]
    // Finite differences alone still land close to the closed form.
    fn forced_fd_prox_is_close() {
        let f = Ridge::new(1.0).expect("valid");
        let x = array![1.0, -4.0].into_dyn();
        let tols = Tolerances::new(Some(1e-7), None, Some(200)).expect("valid");
        let opts = NumericProxOptions::new(tols, LineSearcher::MoreThuente, None, true, false)
            .expect("valid");

        let (z, _) = numeric_prox(&f, x.view(), 1.0, None, &opts).expect("prox solve");

        assert_abs_diff_eq!(z[[0]], 0.5, epsilon = 1e-5);
        assert_abs_diff_eq!(z[[1]], -2.0, epsilon = 1e-5);
    }

    #[test]
    fn invalid_arguments_are_rejected() {
        let f = Ridge::new(1.0).expect("valid");
        let x = array![1.0, 2.0].into_dyn();
        let opts = NumericProxOptions::default();

        let bad_step = numeric_prox(&f, x.view(), 0.0, None, &opts);
        assert!(matches!(bad_step, Err(CheckError::InvalidStep { .. })));

        let init = array![1.0, 2.0, 3.0].into_dyn();
        let bad_init = numeric_prox(&f, x.view(), 1.0, Some(init.view()), &opts);
        assert!(matches!(bad_init, Err(CheckError::Func(FuncError::ShapeMismatch { .. }))));
    }
}
