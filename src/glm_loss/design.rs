//! glm_loss::design — linear predictors and the spectral-norm utility.
//!
//! Purpose
//! -------
//! Hold the design-matrix arithmetic shared by every GLM loss: forming the
//! linear predictor from a coefficient vector/matrix with an optional
//! intercept, and bounding the curvature of a loss through the operator
//! norm of the (intercept-augmented, sample-weighted) design matrix.
//!
//! Conventions
//! -----------
//! - With `fit_intercept = true` the intercept is stored **first**:
//!   `coef = [b, β_1, …, β_p]` for single-response losses and row 0 of the
//!   `(p + 1) × k` coefficient matrix for multi-response losses.
//! - Callers validate coefficient shapes before calling these helpers; the
//!   helpers assume `coef` matches `x.ncols()` (+1 with an intercept).
//! - The operator norm is computed as `sqrt(λ_max(Aᵀ A))` with
//!   `A = diag(√w)·[1 | X]`, via a symmetric eigendecomposition in
//!   `nalgebra` on the `p × p` Gram matrix rather than an SVD of the
//!   `n × p` matrix.
use crate::funcs::errors::{FuncError, FuncResult};
use nalgebra::DMatrix;
use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis, s};

/// Linear predictor `Xβ + b` for a single response.
pub fn data_mat_coef_dot(
    x: ArrayView2<'_, f64>, coef: ArrayView1<'_, f64>, fit_intercept: bool,
) -> Array1<f64> {
    if fit_intercept { x.dot(&coef.slice(s![1..])) + coef[0] } else { x.dot(&coef) }
}

/// Linear predictor `XB + 1bᵀ` for multiple responses (`n × k`).
pub fn data_mat_coef_mat_dot(
    x: ArrayView2<'_, f64>, coef: ArrayView2<'_, f64>, fit_intercept: bool,
) -> Array2<f64> {
    if fit_intercept {
        x.dot(&coef.slice(s![1.., ..])) + &coef.row(0)
    } else {
        x.dot(&coef)
    }
}

/// Largest singular value of `diag(√w)·[1 | X]` (or of `diag(√w)·X`
/// without an intercept).
///
/// # Errors
/// - [`FuncError::SpectralNormFailed`] if the eigen solver returns a
///   non-finite value.
pub fn covar_mat_op_norm(
    x: ArrayView2<'_, f64>, fit_intercept: bool, sample_weight: Option<ArrayView1<'_, f64>>,
) -> FuncResult<f64> {
    let mut aug = augment(x, fit_intercept);
    if let Some(w) = sample_weight {
        let sqrt_w = w.mapv(f64::sqrt);
        aug *= &sqrt_w.insert_axis(Axis(1));
    }
    let gram = aug.t().dot(&aug);
    let dim = gram.nrows();
    if dim == 0 {
        return Ok(0.0);
    }
    let mut gram_nalg = DMatrix::<f64>::zeros(dim, dim);
    fill_dmatrix(&gram, &mut gram_nalg);
    let eig = gram_nalg.symmetric_eigen();
    let lambda_max = eig.eigenvalues.iter().copied().fold(0.0_f64, f64::max);
    if !lambda_max.is_finite() {
        return Err(FuncError::SpectralNormFailed { value: lambda_max });
    }
    Ok(lambda_max.sqrt())
}

/// Lipschitz constant of the least-squares gradient,
/// `‖diag(√w)·[1 | X]‖₂² / n`.
///
/// Also a valid bound for any loss whose per-sample second derivative is at
/// most one, such as Huber.
pub fn lin_reg_lip(
    x: ArrayView2<'_, f64>, fit_intercept: bool, sample_weight: Option<ArrayView1<'_, f64>>,
) -> FuncResult<f64> {
    let op_norm = covar_mat_op_norm(x, fit_intercept, sample_weight)?;
    Ok(op_norm * op_norm / x.nrows() as f64)
}

// ---- Helper methods ----

/// `[1 | X]` when fitting an intercept, else an owned copy of `X`.
fn augment(x: ArrayView2<'_, f64>, fit_intercept: bool) -> Array2<f64> {
    if !fit_intercept {
        return x.to_owned();
    }
    let (n, p) = x.dim();
    let mut aug = Array2::<f64>::ones((n, p + 1));
    aug.slice_mut(s![.., 1..]).assign(&x);
    aug
}

/// Copy a square `ndarray` matrix into a preallocated `DMatrix`.
fn fill_dmatrix(src: &Array2<f64>, dst: &mut DMatrix<f64>) {
    for ((i, j), &value) in src.indexed_iter() {
        dst[(i, j)] = value;
    }
}
