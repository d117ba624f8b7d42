//! Adapter that exposes the prox objective of a [`Func`] as an `argmin`
//! problem.
//!
//! For a target `x` and step `s` the solver minimises
//!
//! ```text
//! c(z) = s·f(z) + 0.5‖z − x‖²,   ∇c(z) = s·∇f(z) + (z − x)
//! ```
//!
//! over the flattened point `z`. The analytic gradient of `f` is used when
//! allowed and available; otherwise the whole objective is differentiated
//! numerically, so no separate handling of the quadratic term is needed in
//! that branch.
use std::cell::RefCell;

use crate::{
    funcs::{errors::FuncError, traits::Func},
    verification::{
        errors::CheckError,
        finite_diff::{as_shape, fd_gradient, flatten, record_error},
        types::{Cost, Grad, Theta},
        validation::validate_grad,
    },
};
use argmin::core::{CostFunction, Error, Gradient};
use ndarray::{ArrayViewD, IxDyn};

/// Bridges `f` and a prox target to `argmin`'s `CostFunction` and
/// `Gradient`.
pub struct ProxProblem<'a> {
    func: &'a dyn Func,
    target: Theta,
    shape: IxDyn,
    step: f64,
    use_grad: bool,
}

impl<'a> ProxProblem<'a> {
    /// `use_grad = false` forces finite differences even when `f` has a
    /// gradient (useful when that gradient is only a subgradient).
    pub fn new(func: &'a dyn Func, x: &ArrayViewD<'_, f64>, step: f64, use_grad: bool) -> Self {
        Self { func, target: flatten(x), shape: x.raw_dim(), step, use_grad }
    }

    /// Finite-difference gradient of the full prox objective.
    fn fd_objective_grad(&self, z: &Theta) -> Result<Grad, Error> {
        let closure_err: RefCell<Option<CheckError>> = RefCell::new(None);
        let cost_func = |t: &Theta| -> f64 {
            match self.cost(t) {
                Ok(val) => val,
                Err(e) => {
                    record_error(&closure_err, CheckError::from(e));
                    f64::NAN
                }
            }
        };
        Ok(fd_gradient(z, &cost_func, &closure_err)?)
    }
}

impl<'a> CostFunction for ProxProblem<'a> {
    type Param = Theta;
    type Output = Cost;

    /// Evaluate `c(z) = s·f(z) + 0.5‖z − x‖²`.
    ///
    /// # Errors
    /// - Errors from `f.eval`, carried as `FuncError`.
    /// - `CheckError::NonFiniteCost` if the value is not finite.
    fn cost(&self, z: &Self::Param) -> Result<Self::Output, Error> {
        let value = self.func.eval(as_shape(z, &self.shape)?)?;
        let dist_sq: f64 = z.iter().zip(self.target.iter()).map(|(a, b)| (a - b) * (a - b)).sum();
        let output = self.step * value + 0.5 * dist_sq;
        if !output.is_finite() {
            return Err((CheckError::NonFiniteCost { value: output }).into());
        }
        Ok(output)
    }
}

impl<'a> Gradient for ProxProblem<'a> {
    type Param = Theta;
    type Gradient = Grad;

    /// Evaluate `∇c(z)`.
    ///
    /// - Analytic: `s·∇f(z) + (z − x)`, validated for shape and finiteness.
    /// - Numeric: central differences of `c`, retried forward on failure.
    ///   Taken when `use_grad` is false or `f.grad` is not implemented.
    ///
    /// # Errors
    /// - Errors from `f.grad` other than `NotImplemented`.
    /// - Errors from `f.eval` hit while differencing.
    /// - `GradientDimMismatch` / `InvalidGradient` on validation failure.
    fn gradient(&self, z: &Self::Param) -> Result<Self::Gradient, Error> {
        if !self.use_grad {
            return self.fd_objective_grad(z);
        }
        match self.func.grad(as_shape(z, &self.shape)?) {
            Ok(g) => {
                let g = flatten(&g.view());
                validate_grad(&g, z.len())?;
                Ok(g * self.step + (z - &self.target))
            }
            Err(FuncError::NotImplemented { .. }) => self.fd_objective_grad(z),
            Err(e) => Err(e.into()),
        }
    }
}
