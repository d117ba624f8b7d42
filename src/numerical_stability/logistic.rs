//! Logistic kernels: log-sigmoid, sigmoid, per-sample loss and gradient.
//!
//! Naïve evaluation of `log(1 / (1 + exp(−x)))` overflows for very negative
//! `x` and loses all precision for large positive `x`. The routines here
//! split the real line into regions where a short asymptotic expression is
//! exact to `f64` precision. See
//! <http://fa.bianp.net/blog/2019/evaluate_logistic/> for the derivation of
//! the cutoffs.
use ndarray::{Array1, ArrayView1, Zip};

/// `log(sigmoid(x))` evaluated without overflow.
///
/// Regions:
/// - `x < −33`: `x`
/// - `−33 ≤ x < −18`: `x − exp(x)`
/// - `−18 ≤ x < 37`: `−log1p(exp(−x))`
/// - `x ≥ 37`: `−exp(−x)`
pub fn logsig(x: f64) -> f64 {
    if x < -33.0 {
        x
    } else if x < -18.0 {
        x - x.exp()
    } else if x < 37.0 {
        -(-x).exp().ln_1p()
    } else {
        -(-x).exp()
    }
}

/// Entrywise [`logsig`].
pub fn logsig_array(x: ArrayView1<'_, f64>) -> Array1<f64> {
    x.mapv(logsig)
}

/// Numerically stable logistic function `1 / (1 + exp(−x))`.
///
/// Only ever exponentiates a non-positive number.
pub fn sigmoid(x: f64) -> f64 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    }
}

/// Per-sample logistic loss `(1 − y)·z − logsig(z)`.
///
/// `z` is the linear predictor and `y ∈ {0, 1}` the response. Equal to
/// `log(1 + exp(z)) − y·z`.
pub fn logistic_sample_losses(z: ArrayView1<'_, f64>, y: ArrayView1<'_, f64>) -> Array1<f64> {
    Zip::from(z).and(y).map_collect(|&zi, &yi| (1.0 - yi) * zi - logsig(zi))
}

/// Per-sample logistic gradient `sigmoid(z) − y`, branching on the sign of
/// `z` so that `exp` is only taken of non-positive arguments.
pub fn logistic_sample_grads(z: ArrayView1<'_, f64>, y: ArrayView1<'_, f64>) -> Array1<f64> {
    Zip::from(z).and(y).map_collect(|&zi, &yi| sample_grad_1d(zi, yi))
}

fn sample_grad_1d(z: f64, y: f64) -> f64 {
    if z < 0.0 {
        let exp_z = z.exp();
        ((1.0 - y) * exp_z - y) / (1.0 + exp_z)
    } else {
        let exp_nz = (-z).exp();
        ((1.0 - y) - y * exp_nz) / (1.0 + exp_nz)
    }
}
