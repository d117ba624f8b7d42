//! Separable penalties built on [`Entrywise`].
//!
//! | penalty            | φ(z)                 | smooth | prox                          |
//! |--------------------|----------------------|--------|-------------------------------|
//! | [`L1`]             | `pen·|z|`            | no     | soft-thresholding             |
//! | [`Ridge`]          | `0.5·pen·z²`         | yes    | `z / (1 + step·pen)`          |
//! | [`HuberPenalty`]   | `huber(z; knot)`     | yes    | see [`huber_prox_1d`]         |
//!
//! Constructors validate their hyperparameter and return the lifted
//! [`Entrywise`] function directly, so callers never handle the scalar
//! rule on its own.
use crate::{
    funcs::{
        entrywise::{Entrywise, ScalarFunc},
        errors::FuncResult,
        traits::GradLip,
        validation::{verify_knot, verify_penalty},
    },
    numerical_stability::huber::{huber_eval_1d, huber_grad_1d, huber_prox_1d},
};

/// Lasso penalty `pen·|z|` applied entrywise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct L1 {
    pen: f64,
}

impl L1 {
    pub fn new(pen: f64) -> FuncResult<Entrywise<L1>> {
        verify_penalty(pen)?;
        Ok(Entrywise::new(L1 { pen }))
    }

    pub fn pen(&self) -> f64 {
        self.pen
    }
}

impl ScalarFunc for L1 {
    fn eval(&self, z: f64) -> f64 {
        self.pen * z.abs()
    }

    /// Subgradient; zero at the kink.
    fn grad(&self, z: f64) -> f64 {
        if z == 0.0 { 0.0 } else { self.pen * z.signum() }
    }

    fn prox(&self, z: f64, step: f64) -> FuncResult<f64> {
        let thresh = step * self.pen;
        Ok(z.signum() * (z.abs() - thresh).max(0.0))
    }

    fn is_smooth(&self) -> bool {
        false
    }

    fn is_proximable(&self) -> bool {
        true
    }
}

/// Ridge penalty `0.5·pen·z²` applied entrywise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ridge {
    pen: f64,
}

impl Ridge {
    pub fn new(pen: f64) -> FuncResult<Entrywise<Ridge>> {
        verify_penalty(pen)?;
        Ok(Entrywise::new(Ridge { pen }))
    }

    pub fn pen(&self) -> f64 {
        self.pen
    }
}

impl ScalarFunc for Ridge {
    fn eval(&self, z: f64) -> f64 {
        0.5 * self.pen * z * z
    }

    fn grad(&self, z: f64) -> f64 {
        self.pen * z
    }

    fn prox(&self, z: f64, step: f64) -> FuncResult<f64> {
        Ok(z / (1.0 + step * self.pen))
    }

    fn grad_lip(&self) -> GradLip {
        GradLip::Known(self.pen)
    }

    fn is_smooth(&self) -> bool {
        true
    }

    fn is_proximable(&self) -> bool {
        true
    }
}

/// Huber function applied entrywise, e.g. as a robust penalty.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HuberPenalty {
    knot: f64,
}

impl HuberPenalty {
    pub fn new(knot: f64) -> FuncResult<Entrywise<HuberPenalty>> {
        verify_knot(knot)?;
        Ok(Entrywise::new(HuberPenalty { knot }))
    }

    pub fn knot(&self) -> f64 {
        self.knot
    }
}

impl ScalarFunc for HuberPenalty {
    fn eval(&self, z: f64) -> f64 {
        huber_eval_1d(z, self.knot)
    }

    fn grad(&self, z: f64) -> f64 {
        huber_grad_1d(z, self.knot)
    }

    fn prox(&self, z: f64, step: f64) -> FuncResult<f64> {
        Ok(huber_prox_1d(z, step, self.knot))
    }

    fn grad_lip(&self) -> GradLip {
        GradLip::Known(1.0)
    }

    fn is_smooth(&self) -> bool {
        true
    }

    fn is_proximable(&self) -> bool {
        true
    }
}
