//! Generic GLM wrapper over a per-sample loss.
//!
//! [`Glm`] owns nothing but its hyperparameters: it borrows the design
//! matrix, response and optional sample weights, and delegates the
//! per-sample arithmetic to a [`SampleLoss`]. The value is
//!
//! ```text
//! f(coef) = (1 / n) · Σ_i w_i · ℓ(z_i, y_i),   z = Xβ + b
//! ```
//!
//! with `w_i = 1` when no weights are given. Gradients follow the same
//! intercept-first layout as the Huber losses.
use crate::{
    funcs::{
        errors::{FuncError, FuncResult},
        traits::{Func, GradLip},
        validation::{
            verify_coef, verify_finite, verify_lipschitz, verify_rows, verify_sample_weight,
        },
    },
    glm_loss::design::{covar_mat_op_norm, data_mat_coef_dot},
    numerical_stability::logistic::{logistic_sample_grads, logistic_sample_losses},
};
use ndarray::{Array1, ArrayD, ArrayView1, ArrayView2, ArrayViewD, Ix1, Zip, s};

/// Per-sample loss `ℓ(z, y)` of a linear predictor `z` against a response.
pub trait SampleLoss {
    fn sample_losses(&self, z: ArrayView1<'_, f64>, y: ArrayView1<'_, f64>) -> Array1<f64>;

    /// `∂ℓ/∂z` for every sample.
    fn sample_grads(&self, z: ArrayView1<'_, f64>, y: ArrayView1<'_, f64>) -> Array1<f64>;

    /// Upper bound on `∂²ℓ/∂z²`; scales the design's squared operator norm
    /// into the gradient Lipschitz constant.
    fn lip_factor(&self) -> f64;

    fn is_smooth(&self) -> bool {
        true
    }

    /// Reject responses outside the loss's support. Accepts everything by
    /// default.
    fn validate_response(&self, _y: ArrayView1<'_, f64>) -> FuncResult<()> {
        Ok(())
    }
}

/// Logistic (binomial deviance) loss with responses in `[0, 1]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Logistic;

impl SampleLoss for Logistic {
    fn sample_losses(&self, z: ArrayView1<'_, f64>, y: ArrayView1<'_, f64>) -> Array1<f64> {
        logistic_sample_losses(z, y)
    }

    fn sample_grads(&self, z: ArrayView1<'_, f64>, y: ArrayView1<'_, f64>) -> Array1<f64> {
        logistic_sample_grads(z, y)
    }

    fn lip_factor(&self) -> f64 {
        0.25
    }

    fn validate_response(&self, y: ArrayView1<'_, f64>) -> FuncResult<()> {
        for (index, &value) in y.iter().enumerate() {
            if !(0.0..=1.0).contains(&value) {
                return Err(FuncError::InvalidResponse {
                    index,
                    value,
                    reason: "Logistic responses must lie in [0, 1].",
                });
            }
        }
        Ok(())
    }
}

/// Squared error `0.5 (z − y)²`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LeastSquares;

impl SampleLoss for LeastSquares {
    fn sample_losses(&self, z: ArrayView1<'_, f64>, y: ArrayView1<'_, f64>) -> Array1<f64> {
        Zip::from(z).and(y).map_collect(|&zi, &yi| 0.5 * (zi - yi) * (zi - yi))
    }

    fn sample_grads(&self, z: ArrayView1<'_, f64>, y: ArrayView1<'_, f64>) -> Array1<f64> {
        &z - &y
    }

    fn lip_factor(&self) -> f64 {
        1.0
    }
}

/// Single-response GLM loss with optional sample weights.
#[derive(Debug, Clone)]
pub struct Glm<'a, L: SampleLoss> {
    loss: L,
    x: ArrayView2<'a, f64>,
    y: ArrayView1<'a, f64>,
    sample_weight: Option<ArrayView1<'a, f64>>,
    fit_intercept: bool,
    grad_lip: f64,
}

pub type LogReg<'a> = Glm<'a, Logistic>;
pub type LinReg<'a> = Glm<'a, LeastSquares>;

impl<'a, L: SampleLoss + Default> Glm<'a, L> {
    /// Build the loss with the default-configured sample loss.
    pub fn new(
        x: ArrayView2<'a, f64>, y: ArrayView1<'a, f64>, fit_intercept: bool,
        sample_weight: Option<ArrayView1<'a, f64>>, lip: Option<f64>,
    ) -> FuncResult<Self> {
        Self::with_loss(L::default(), x, y, fit_intercept, sample_weight, lip)
    }
}

impl<'a, L: SampleLoss> Glm<'a, L> {
    /// Validate the data and cache `lip_factor / n · ‖diag(√w)·[1 | X]‖₂²`
    /// unless `lip` is supplied.
    ///
    /// # Errors
    /// - `DataShapeMismatch` / `EmptyData` / `NonFiniteData` for bad data.
    /// - `SampleWeightMismatch` / `InvalidSampleWeight` for bad weights.
    /// - `InvalidResponse` when the sample loss rejects `y`.
    /// - `InvalidLipschitz` for a bad supplied constant.
    pub fn with_loss(
        loss: L, x: ArrayView2<'a, f64>, y: ArrayView1<'a, f64>, fit_intercept: bool,
        sample_weight: Option<ArrayView1<'a, f64>>, lip: Option<f64>,
    ) -> FuncResult<Self> {
        verify_rows(x.nrows(), y.len())?;
        verify_finite(&x, "X")?;
        verify_finite(&y, "y")?;
        if let Some(w) = sample_weight {
            verify_sample_weight(w, x.nrows())?;
        }
        loss.validate_response(y)?;
        let grad_lip = match lip {
            Some(l) => {
                verify_lipschitz(l)?;
                l
            }
            None => {
                let op_norm = covar_mat_op_norm(x, fit_intercept, sample_weight)?;
                loss.lip_factor() * op_norm * op_norm / x.nrows() as f64
            }
        };
        Ok(Self { loss, x, y, sample_weight, fit_intercept, grad_lip })
    }

    pub fn coef_shape(&self) -> Vec<usize> {
        vec![self.x.ncols() + usize::from(self.fit_intercept)]
    }

    pub fn loss(&self) -> &L {
        &self.loss
    }

    pub fn fit_intercept(&self) -> bool {
        self.fit_intercept
    }

    /// Weighted mean of the response: the intercept a solver starts from
    /// when every other coefficient is zero.
    ///
    /// Falls back to the plain mean when all weights are zero.
    pub fn intercept_at_coef_eq0(&self) -> f64 {
        let n = self.y.len() as f64;
        match self.sample_weight {
            Some(w) => {
                let total = w.sum();
                if total > 0.0 { w.dot(&self.y) / total } else { self.y.sum() / n }
            }
            None => self.y.sum() / n,
        }
    }

    fn linear_predictor(&self, x: &ArrayViewD<'_, f64>) -> FuncResult<Array1<f64>> {
        let coef = verify_coef::<Ix1>(&self.coef_shape(), x)?;
        Ok(data_mat_coef_dot(self.x, coef, self.fit_intercept))
    }

    /// Multiply per-sample terms by the weights, if any.
    fn weigh(&self, mut terms: Array1<f64>) -> Array1<f64> {
        if let Some(w) = self.sample_weight {
            terms *= &w;
        }
        terms
    }
}

impl<'a, L: SampleLoss> Func for Glm<'a, L> {
    fn eval(&self, x: ArrayViewD<'_, f64>) -> FuncResult<f64> {
        let z = self.linear_predictor(&x)?;
        let losses = self.weigh(self.loss.sample_losses(z.view(), self.y));
        Ok(losses.sum() / self.x.nrows() as f64)
    }

    fn grad(&self, x: ArrayViewD<'_, f64>) -> FuncResult<ArrayD<f64>> {
        let z = self.linear_predictor(&x)?;
        let g = self.weigh(self.loss.sample_grads(z.view(), self.y)) / self.x.nrows() as f64;
        let coef_grad = self.x.t().dot(&g);
        let grad = if self.fit_intercept {
            let mut full = Array1::<f64>::zeros(coef_grad.len() + 1);
            full[0] = g.sum();
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
        self.loss.is_smooth()
    }

    fn is_proximable(&self) -> bool {
        false
    }
}
