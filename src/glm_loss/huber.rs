//! Huber regression losses, single- and multi-response.
//!
//! ```text
//! f(coef) = (1 / n) · Σ_i huber(x_iᵀβ + b − y_i; knot)
//! ```
//!
//! The gradient uses the intercept-first layout of
//! [`design`](crate::glm_loss::design): `[∂b, ∂β_1, …, ∂β_p]` for one
//! response, and an intercept row stacked above the `p × k` feature block
//! for `k` responses.
use crate::{
    funcs::{
        errors::FuncResult,
        traits::{Func, GradLip},
        validation::{verify_coef, verify_finite, verify_knot, verify_lipschitz, verify_rows},
    },
    glm_loss::design::{data_mat_coef_dot, data_mat_coef_mat_dot, lin_reg_lip},
    numerical_stability::huber::{huber_eval, huber_grad},
};
use ndarray::{
    Array1, Array2, ArrayD, ArrayView1, ArrayView2, ArrayViewD, Axis, Ix1, Ix2, concatenate, s,
};

/// Knot used when callers have no better choice: 95% efficiency under
/// Gaussian noise.
pub const DEFAULT_HUBER_KNOT: f64 = 1.35;

/// Single-response Huber regression loss over borrowed data.
///
/// Fields are fixed at construction; the Lipschitz constant of the gradient
/// is computed eagerly (`‖[1 | X]‖₂² / n`) unless supplied.
#[derive(Debug, Clone)]
pub struct HuberRegLoss<'a> {
    x: ArrayView2<'a, f64>,
    y: ArrayView1<'a, f64>,
    knot: f64,
    fit_intercept: bool,
    grad_lip: f64,
}

impl<'a> HuberRegLoss<'a> {
    /// Build the loss and cache its gradient Lipschitz constant.
    ///
    /// # Errors
    /// - [`FuncError::DataShapeMismatch`](crate::funcs::FuncError::DataShapeMismatch)
    ///   / `EmptyData` when `x` and `y` disagree or are empty.
    /// - `NonFiniteData` for NaN/∞ in `x` or `y`.
    /// - `InvalidKnot` / `InvalidLipschitz` for bad hyperparameters.
    pub fn new(
        x: ArrayView2<'a, f64>, y: ArrayView1<'a, f64>, knot: f64, fit_intercept: bool,
        lip: Option<f64>,
    ) -> FuncResult<Self> {
        verify_rows(x.nrows(), y.len())?;
        verify_finite(&x, "X")?;
        verify_finite(&y, "y")?;
        verify_knot(knot)?;
        let grad_lip = match lip {
            Some(l) => {
                verify_lipschitz(l)?;
                l
            }
            None => lin_reg_lip(x, fit_intercept, None)?,
        };
        Ok(Self { x, y, knot, fit_intercept, grad_lip })
    }

    /// Expected trial-point shape: `[p + 1]` with an intercept, else `[p]`.
    pub fn coef_shape(&self) -> Vec<usize> {
        vec![self.x.ncols() + usize::from(self.fit_intercept)]
    }

    pub fn knot(&self) -> f64 {
        self.knot
    }

    pub fn fit_intercept(&self) -> bool {
        self.fit_intercept
    }

    fn coef<'b>(&self, x: &'b ArrayViewD<'_, f64>) -> FuncResult<ArrayView1<'b, f64>> {
        verify_coef::<Ix1>(&self.coef_shape(), x)
    }

    fn residuals(&self, coef: ArrayView1<'_, f64>) -> Array1<f64> {
        data_mat_coef_dot(self.x, coef, self.fit_intercept) - &self.y
    }
}

impl<'a> Func for HuberRegLoss<'a> {
    fn eval(&self, x: ArrayViewD<'_, f64>) -> FuncResult<f64> {
        let coef = self.coef(&x)?;
        let resid = self.residuals(coef);
        Ok(huber_eval(resid.view(), self.knot) / self.x.nrows() as f64)
    }

    fn grad(&self, x: ArrayViewD<'_, f64>) -> FuncResult<ArrayD<f64>> {
        let coef = self.coef(&x)?;
        let n = self.x.nrows() as f64;
        let g = huber_grad(self.residuals(coef).view(), self.knot);
        let coef_grad = self.x.t().dot(&g) / n;
        let grad = if self.fit_intercept {
            let mut full = Array1::<f64>::zeros(coef_grad.len() + 1);
            full[0] = g.sum() / n;
            full.slice_mut(s![1..]).assign(&coef_grad);
            full
        } else {
            coef_grad
        };
        Ok(grad.into_dyn())
    }

    fn grad_lip(&self) -> GradLip {
        GradLip::Known(self.grad_lip)
    }

    fn is_smooth(&self) -> bool {
        true
    }

    fn is_proximable(&self) -> bool {
        false
    }
}

/// Multi-response Huber regression loss; `y` is `n × k` and coefficients
/// are `(p [+1]) × k`.
#[derive(Debug, Clone)]
pub struct HuberRegMultiRespLoss<'a> {
    x: ArrayView2<'a, f64>,
    y: ArrayView2<'a, f64>,
    knot: f64,
    fit_intercept: bool,
    grad_lip: f64,
}

impl<'a> HuberRegMultiRespLoss<'a> {
    /// See [`HuberRegLoss::new`]; the same validation applies row-wise.
    pub fn new(
        x: ArrayView2<'a, f64>, y: ArrayView2<'a, f64>, knot: f64, fit_intercept: bool,
        lip: Option<f64>,
    ) -> FuncResult<Self> {
        verify_rows(x.nrows(), y.nrows())?;
        verify_finite(&x, "X")?;
        verify_finite(&y, "y")?;
        verify_knot(knot)?;
        let grad_lip = match lip {
            Some(l) => {
                verify_lipschitz(l)?;
                l
            }
            None => lin_reg_lip(x, fit_intercept, None)?,
        };
        Ok(Self { x, y, knot, fit_intercept, grad_lip })
    }

    /// `[p + 1, k]` with an intercept, else `[p, k]`.
    pub fn coef_shape(&self) -> Vec<usize> {
        vec![self.x.ncols() + usize::from(self.fit_intercept), self.y.ncols()]
    }

    pub fn n_responses(&self) -> usize {
        self.y.ncols()
    }

    fn coef<'b>(&self, x: &'b ArrayViewD<'_, f64>) -> FuncResult<ArrayView2<'b, f64>> {
        verify_coef::<Ix2>(&self.coef_shape(), x)
    }

    fn residuals(&self, coef: ArrayView2<'_, f64>) -> Array2<f64> {
        data_mat_coef_mat_dot(self.x, coef, self.fit_intercept) - &self.y
    }
}

impl<'a> Func for HuberRegMultiRespLoss<'a> {
    fn eval(&self, x: ArrayViewD<'_, f64>) -> FuncResult<f64> {
        let coef = self.coef(&x)?;
        let resid = self.residuals(coef);
        Ok(huber_eval(resid.view(), self.knot) / self.x.nrows() as f64)
    }

    fn grad(&self, x: ArrayViewD<'_, f64>) -> FuncResult<ArrayD<f64>> {
        let coef = self.coef(&x)?;
        let n = self.x.nrows() as f64;
        let g = huber_grad(self.residuals(coef).view(), self.knot);
        let coef_grad = self.x.t().dot(&g) / n;
        let grad = if self.fit_intercept {
            let intercept_grad = g.sum_axis(Axis(0)) / n;
            concatenate![Axis(0), intercept_grad.insert_axis(Axis(0)), coef_grad]
        } else {
            coef_grad
        };
        Ok(grad.into_dyn())
    }

    fn grad_lip(&self) -> GradLip {
        GradLip::Known(self.grad_lip)
    }

    fn is_smooth(&self) -> bool {
        true
    }

    fn is_proximable(&self) -> bool {
        false
    }
}
