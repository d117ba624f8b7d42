//! Huber loss kernels.
//!
//! The Huber function with knot `k ≥ 0`
//!
//! ```text
//! huber(z; k) = 0.5 z²              if |z| ≤ k
//!             = k (|z| − 0.5 k)     otherwise
//! ```
//!
//! is quadratic near zero and linear in the tails. Both branches and their
//! derivatives agree at `|z| = k`, so the function is C¹ everywhere.
use ndarray::{Array, ArrayView, Dimension};

/// Huber value of a single residual.
pub fn huber_eval_1d(z: f64, knot: f64) -> f64 {
    let z_abs = z.abs();
    if z_abs <= knot { 0.5 * z * z } else { knot * (z_abs - 0.5 * knot) }
}

/// Derivative of [`huber_eval_1d`]: `z` inside the knot, `knot·sign(z)` outside.
pub fn huber_grad_1d(z: f64, knot: f64) -> f64 {
    if z.abs() <= knot { z } else { knot * z.signum() }
}

/// Proximal map of `step · huber(·; knot)` at `z`.
///
/// Solves `argmin_u step·huber(u) + 0.5 (u − z)²`. The minimiser lies in the
/// quadratic region exactly when `|z| ≤ knot (1 + step)`, giving
/// `z / (1 + step)`; otherwise it is shifted towards zero by `step·knot`.
pub fn huber_prox_1d(z: f64, step: f64, knot: f64) -> f64 {
    if z.abs() <= knot * (1.0 + step) { z / (1.0 + step) } else { z - step * knot * z.signum() }
}

/// Sum of entrywise Huber values over an array of any dimensionality.
pub fn huber_eval<D: Dimension>(z: ArrayView<'_, f64, D>, knot: f64) -> f64 {
    z.iter().map(|&v| huber_eval_1d(v, knot)).sum()
}

/// Entrywise Huber derivative; the output has the same shape as `z`.
pub fn huber_grad<D: Dimension>(z: ArrayView<'_, f64, D>, knot: f64) -> Array<f64, D> {
    z.mapv(|v| huber_grad_1d(v, knot))
}
