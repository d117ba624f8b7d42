//! Entrywise functions: lift a scalar rule to arrays of any rank.
//!
//! A [`ScalarFunc`] describes `φ: ℝ → ℝ`; wrapping it in [`Entrywise`]
//! yields the separable function `f(x) = Σ_i φ(x_i)` over arrays of any
//! shape. The input is walked in logical (row-major) order, the scalar rule
//! is applied to every entry, and gradients/proxes are reshaped back to the
//! input's exact shape, so 0-D, 1-D, 2-D and higher-rank points behave
//! identically.
use crate::funcs::{
    errors::{Capability, FuncError, FuncResult},
    traits::{Func, GradLip},
    validation::verify_step,
};
use ndarray::{Array1, ArrayD, ArrayViewD};

/// Scalar building block for separable functions.
///
/// Required: `eval`, `grad` (a subgradient where `φ` has a kink), and the
/// two capability flags. `prox` defaults to `NotImplemented`.
pub trait ScalarFunc {
    fn eval(&self, z: f64) -> f64;

    fn grad(&self, z: f64) -> f64;

    /// `argmin_u step·φ(u) + 0.5 (u − z)²`.
    fn prox(&self, _z: f64, _step: f64) -> FuncResult<f64> {
        Err(FuncError::NotImplemented { capability: Capability::Prox })
    }

    /// Lipschitz constant of `φ'`; also the bound for the lifted function
    /// since the Hessian of a separable function is diagonal.
    fn grad_lip(&self) -> GradLip {
        GradLip::Unknown
    }

    fn is_smooth(&self) -> bool;

    fn is_proximable(&self) -> bool;
}

/// `f(x) = Σ_i φ(x_i)` for a scalar rule `φ`.
#[derive(Debug, Clone, PartialEq)]
pub struct Entrywise<S: ScalarFunc> {
    pub inner: S,
}

impl<S: ScalarFunc> Entrywise<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }

    /// Apply a fallible scalar rule to every entry and restore `x`'s shape.
    fn map_entries<G>(&self, x: &ArrayViewD<'_, f64>, rule: G) -> FuncResult<ArrayD<f64>>
    where
        G: Fn(f64) -> FuncResult<f64>,
    {
        let flat = x.iter().map(|&v| rule(v)).collect::<FuncResult<Vec<f64>>>()?;
        reshape_like(Array1::from(flat), x)
    }
}

impl<S: ScalarFunc> Func for Entrywise<S> {
    fn eval(&self, x: ArrayViewD<'_, f64>) -> FuncResult<f64> {
        Ok(x.iter().map(|&v| self.inner.eval(v)).sum())
    }

    fn grad(&self, x: ArrayViewD<'_, f64>) -> FuncResult<ArrayD<f64>> {
        self.map_entries(&x, |v| Ok(self.inner.grad(v)))
    }

    fn prox(&self, x: ArrayViewD<'_, f64>, step: f64) -> FuncResult<ArrayD<f64>> {
        verify_step(step)?;
        self.map_entries(&x, |v| self.inner.prox(v, step))
    }

    fn grad_lip(&self) -> GradLip {
        self.inner.grad_lip()
    }

    fn is_smooth(&self) -> bool {
        self.inner.is_smooth()
    }

    fn is_proximable(&self) -> bool {
        self.inner.is_proximable()
    }
}

/// Reshape a flat, logically ordered vector back into `like`'s shape.
pub(crate) fn reshape_like(flat: Array1<f64>, like: &ArrayViewD<'_, f64>) -> FuncResult<ArrayD<f64>> {
    let found = vec![flat.len()];
    flat.into_shape(like.raw_dim()).map_err(|_| FuncError::ShapeMismatch {
        expected: like.shape().to_vec(),
        found,
    })
}
