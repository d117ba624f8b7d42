//! Integration tests for the shipped losses and penalties against the
//! verification engine.
//!
//! Purpose
//! -------
//! - Confirm that every analytic gradient agrees with finite differences on
//!   random designs, and that every closed-form prox agrees with a
//!   numerically solved prox.
//! - Exercise the public surface only, the way a downstream solver crate
//!   would: build a loss, combine it with a penalty, run the checks.
//!
//! Coverage
//! --------
//! - `glm_loss`: `HuberRegLoss`, `HuberRegMultiRespLoss`, `LogReg`,
//!   `LinReg`, with and without intercepts and sample weights.
//! - `funcs`: `Sum` of a loss and a penalty, `Zero`, `L1`, `Ridge`,
//!   `HuberPenalty`.
//! - `verification`: `check_grad_impl` and `check_prox_impl` in each
//!   behaviour mode, including failures from a wrong gradient.
//!
//! Exclusions
//! ----------
//! - Closed-form values of individual losses, option validation and
//!   solver wiring; those are covered by unit tests.
//! - Numeric proxes of non-smooth penalties, whose prox objective has no
//!   gradient at the minimiser.
use ndarray::{Array1, Array2, ArrayD, ArrayViewD, IxDyn};
use rand::{Rng, SeedableRng, rngs::StdRng};
use rand_distr::StandardNormal;
use rust_glmopt::{
    funcs::{Func, FuncResult, HuberPenalty, L1, Ridge, Sum, Zero},
    glm_loss::{DEFAULT_HUBER_KNOT, HuberRegLoss, HuberRegMultiRespLoss, LinReg, LogReg},
    verification::{
        CheckBehavior, CheckError, CheckKind, GradCheckOptions, ProxCheckOptions,
        check_grad_impl, check_prox_impl,
    },
};

/// Standard normal matrix of shape `(n, p)` from a seeded generator.
fn normal_matrix(rng: &mut StdRng, n: usize, p: usize) -> Array2<f64> {
    Array2::from_shape_fn((n, p), |_| rng.sample(StandardNormal))
}

/// `n_values` standard normal trial points of the given shape.
fn trial_points(rng: &mut StdRng, shape: &[usize], n_values: usize) -> Vec<ArrayD<f64>> {
    (0..n_values)
        .map(|_| ArrayD::from_shape_fn(IxDyn(shape), |_| rng.sample(StandardNormal)))
        .collect()
}

/// Linear responses with heavy-ish noise so that some residuals fall
/// beyond the Huber knot.
fn linear_response(rng: &mut StdRng, x: &Array2<f64>) -> Array1<f64> {
    let beta = Array1::from_shape_fn(x.ncols(), |_| rng.sample::<f64, _>(StandardNormal));
    let noise = Array1::from_shape_fn(x.nrows(), |_| 2.0 * rng.sample::<f64, _>(StandardNormal));
    x.dot(&beta) + noise
}

#[test]
// Purpose
// -------
// Huber regression gradients agree with finite differences, with and
// without an intercept.
//
// Given
// -----
// - n = 50, p = 5 Gaussian design, knot 1.35.
// - Five random coefficient vectors per setting.
//
// Expect
// ------
// - Every point passes with the default atol = 1e-5.
fn huber_reg_gradients_pass() {
    // Arrange
    let mut rng = StdRng::seed_from_u64(2024);
    let x = normal_matrix(&mut rng, 50, 5);
    let y = linear_response(&mut rng, &x);

    for fit_intercept in [true, false] {
        let loss = HuberRegLoss::new(x.view(), y.view(), DEFAULT_HUBER_KNOT, fit_intercept, None)
            .expect("loss should build");
        let values = trial_points(&mut rng, &loss.coef_shape(), 5);

        // Act
        let report =
            check_grad_impl(&loss, &values, &GradCheckOptions::default()).expect("check runs");

        // Assert
        assert!(
            report.all_passed(),
            "fit_intercept = {fit_intercept}: errors {:?}",
            report.errors
        );
    }
}

#[test]
// Purpose
// -------
// Multi-response Huber gradients are checked on matrix-shaped trial
// points.
fn huber_multi_response_gradients_pass() {
    let mut rng = StdRng::seed_from_u64(7);
    let x = normal_matrix(&mut rng, 40, 4);
    let y = normal_matrix(&mut rng, 40, 3) * 3.0;
    let loss = HuberRegMultiRespLoss::new(x.view(), y.view(), 1.0, true, None)
        .expect("loss should build");
    let values = trial_points(&mut rng, &loss.coef_shape(), 4);

    let report = check_grad_impl(&loss, &values, &GradCheckOptions::default()).expect("check runs");

    assert_eq!(values[0].shape(), &[5, 3]);
    assert!(report.all_passed(), "errors {:?}", report.errors);
}

#[test]
// Purpose
// -------
// Logistic and least-squares GLM gradients pass with and without sample
// weights.
//
// Given
// -----
// - n = 60, p = 4; binary responses for the logistic loss.
// - Uniform(0, 2) sample weights.
//
// Expect
// ------
// - All points pass for every combination.
fn glm_gradients_pass_with_and_without_weights() {
    // Arrange
    let mut rng = StdRng::seed_from_u64(99);
    let x = normal_matrix(&mut rng, 60, 4);
    let labels = Array1::from_shape_fn(60, |_| if rng.gen::<f64>() < 0.4 { 1.0 } else { 0.0 });
    let y = linear_response(&mut rng, &x);
    let w = Array1::from_shape_fn(60, |_| 2.0 * rng.gen::<f64>());
    let opts = GradCheckOptions::default();

    for weights in [None, Some(w.view())] {
        let log_reg =
            LogReg::new(x.view(), labels.view(), true, weights, None).expect("logistic builds");
        let lin_reg = LinReg::new(x.view(), y.view(), false, weights, None).expect("linear builds");
        let values = trial_points(&mut rng, &log_reg.coef_shape(), 3);
        let lin_values = trial_points(&mut rng, &lin_reg.coef_shape(), 3);

        // Act
        let log_report = check_grad_impl(&log_reg, &values, &opts).expect("check runs");
        let lin_report = check_grad_impl(&lin_reg, &lin_values, &opts).expect("check runs");

        // Assert
        assert!(log_report.all_passed(), "logistic errors {:?}", log_report.errors);
        assert!(lin_report.all_passed(), "linear errors {:?}", lin_report.errors);
    }
}

#[test]
// Purpose
// -------
// A penalised loss built with `Sum` passes the gradient check, and a
// non-smooth penalty passes away from its kink.
fn penalised_loss_and_l1_gradients_pass() {
    let mut rng = StdRng::seed_from_u64(11);
    let x = normal_matrix(&mut rng, 30, 3);
    let y = linear_response(&mut rng, &x);
    let loss = HuberRegLoss::new(x.view(), y.view(), 2.0, true, None).expect("loss builds");
    let ridge = Ridge::new(0.3).expect("valid");
    let penalised = Sum::new(vec![&loss as &dyn Func, &ridge, &Zero]);
    let values = trial_points(&mut rng, &loss.coef_shape(), 4);

    let report =
        check_grad_impl(&penalised, &values, &GradCheckOptions::default()).expect("check runs");
    assert!(report.all_passed(), "errors {:?}", report.errors);

    let l1 = L1::new(0.5).expect("valid");
    let away_from_zero: Vec<ArrayD<f64>> = trial_points(&mut rng, &[6], 3)
        .into_iter()
        .map(|v| v.mapv(|e| e.signum() * (e.abs() + 0.1)))
        .collect();
    let l1_report =
        check_grad_impl(&l1, &away_from_zero, &GradCheckOptions::default()).expect("check runs");
    assert!(l1_report.all_passed(), "errors {:?}", l1_report.errors);
}

#[test]
// Purpose
// -------
// Closed-form proxes of the smooth penalties agree with the numeric prox
// on vectors and matrices, for several steps.
fn smooth_penalty_proxes_pass() {
    let mut rng = StdRng::seed_from_u64(5);
    let ridge = Ridge::new(1.7).expect("valid");
    let huber = HuberPenalty::new(0.8).expect("valid");
    let mut values = trial_points(&mut rng, &[8], 3);
    values.extend(trial_points(&mut rng, &[3, 2], 2).into_iter().map(|v| v * 3.0));

    for step in [0.1, 0.5, 2.0] {
        let opts = ProxCheckOptions { step, ..Default::default() };
        for f in [&ridge as &dyn Func, &huber, &Zero] {
            let report = check_prox_impl(f, &values, &opts).expect("check runs");
            assert!(report.all_passed(), "step {step}: discrepancies {:?}", report.errors);
        }
    }
}

#[test]
// Purpose
// -------
// `Sum` does not claim a prox, so the prox check surfaces the missing
// capability instead of guessing.
fn sum_has_no_prox_to_check() {
    let ridge = Ridge::new(1.0).expect("valid");
    let huber = HuberPenalty::new(1.0).expect("valid");
    let both = Sum::new(vec![&ridge as &dyn Func, &huber]);
    let values = vec![ArrayD::zeros(IxDyn(&[3]))];

    let err = check_prox_impl(&both, &values, &ProxCheckOptions::default())
        .expect_err("sum is not proximable");

    assert!(!both.is_proximable());
    assert!(matches!(err, CheckError::Func(_)));
}

/// Least-squares loss on a fixed design whose gradient drops the
/// `1/n` normalisation.
struct UnscaledLeastSquares {
    x: Array2<f64>,
    y: Array1<f64>,
}

impl Func for UnscaledLeastSquares {
    fn eval(&self, coef: ArrayViewD<'_, f64>) -> FuncResult<f64> {
        let coef = coef.iter().copied().collect::<Array1<f64>>();
        let r = self.x.dot(&coef) - &self.y;
        Ok(0.5 * r.dot(&r) / self.y.len() as f64)
    }

    fn grad(&self, coef: ArrayViewD<'_, f64>) -> FuncResult<ArrayD<f64>> {
        let flat = coef.iter().copied().collect::<Array1<f64>>();
        let r = self.x.dot(&flat) - &self.y;
        Ok(self.x.t().dot(&r).into_dyn())
    }

    fn is_smooth(&self) -> bool {
        true
    }

    fn is_proximable(&self) -> bool {
        false
    }
}

#[test]
// Purpose
// -------
// A loss with a mis-scaled gradient is caught in each behaviour mode.
//
// Given
// -----
// - `UnscaledLeastSquares` on a 20×3 design; three random points.
//
// Expect
// ------
// - Return: every point fails.
// - Warn: the same report is returned.
// - Error: `ToleranceFailure` for the gradient check at point 0.
fn mis_scaled_gradient_fails_in_every_mode() {
    // Arrange
    let mut rng = StdRng::seed_from_u64(3);
    let x = normal_matrix(&mut rng, 20, 3);
    let y = linear_response(&mut rng, &x);
    let f = UnscaledLeastSquares { x, y };
    let values = trial_points(&mut rng, &[3], 3);

    // Act
    let returned =
        check_grad_impl(&f, &values, &GradCheckOptions::default()).expect("return mode");
    let warn = GradCheckOptions::new(1e-5, CheckBehavior::Warn, true).expect("valid");
    let warned = check_grad_impl(&f, &values, &warn).expect("warn mode");
    let error = GradCheckOptions::new(1e-5, "error".parse().expect("known behavior"), false)
        .expect("valid");
    let failed = check_grad_impl(&f, &values, &error);

    // Assert
    assert_eq!(returned.n_fails(), 3);
    assert_eq!(warned, returned);
    assert!(matches!(
        failed,
        Err(CheckError::ToleranceFailure { check: CheckKind::Grad, index: 0, .. })
    ));
}
