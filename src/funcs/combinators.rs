//! Additive combinators: the identity element [`Zero`] and the n-ary
//! [`Sum`].
//!
//! `Sum` borrows its components rather than owning copies, so a loss and
//! a penalty built once per fit can be combined without cloning their data.
//! Because a `Sum` is itself a [`Func`], sums nest arbitrarily; every query
//! recurses through the components and nothing derived is cached.
use crate::funcs::{
    errors::{FuncError, FuncResult},
    traits::{Func, GradLip},
    validation::verify_step,
};
use ndarray::{ArrayD, ArrayViewD};

/// The zero function: additive identity for [`Sum`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Zero;

impl Func for Zero {
    fn eval(&self, _x: ArrayViewD<'_, f64>) -> FuncResult<f64> {
        Ok(0.0)
    }

    fn grad(&self, x: ArrayViewD<'_, f64>) -> FuncResult<ArrayD<f64>> {
        Ok(ArrayD::zeros(x.raw_dim()))
    }

    /// Identity: minimising `0.5‖x − z‖²` alone returns `x`.
    fn prox(&self, x: ArrayViewD<'_, f64>, step: f64) -> FuncResult<ArrayD<f64>> {
        verify_step(step)?;
        Ok(x.to_owned())
    }

    fn grad_lip(&self) -> GradLip {
        GradLip::Known(0.0)
    }

    fn is_smooth(&self) -> bool {
        true
    }

    fn is_proximable(&self) -> bool {
        true
    }
}

/// `f(x) = Σ_k f_k(x)` over an ordered collection of borrowed functions.
///
/// - `eval` / `grad` add the component answers; `grad` fails as soon as one
///   component cannot provide a gradient.
/// - `grad_lip` is the sum of the component bounds when all are known,
///   otherwise [`GradLip::Unknown`].
/// - `is_smooth` holds iff every component is smooth.
/// - `is_proximable` is `false`: a sum of proximable functions has no
///   closed-form prox in general, so `prox` is left unimplemented.
pub struct Sum<'a> {
    funcs: Vec<&'a dyn Func>,
}

impl<'a> Sum<'a> {
    pub fn new(funcs: Vec<&'a dyn Func>) -> Self {
        Self { funcs }
    }

    pub fn funcs(&self) -> &[&'a dyn Func] {
        &self.funcs
    }

    pub fn len(&self) -> usize {
        self.funcs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.funcs.is_empty()
    }
}

impl<'a> Func for Sum<'a> {
    fn eval(&self, x: ArrayViewD<'_, f64>) -> FuncResult<f64> {
        let mut total = 0.0;
        for f in &self.funcs {
            total += f.eval(x.view())?;
        }
        Ok(total)
    }

    fn grad(&self, x: ArrayViewD<'_, f64>) -> FuncResult<ArrayD<f64>> {
        let mut total = ArrayD::<f64>::zeros(x.raw_dim());
        for (index, f) in self.funcs.iter().enumerate() {
            let g = f.grad(x.view())?;
            if g.shape() != total.shape() {
                return Err(FuncError::ComponentShapeMismatch {
                    index,
                    expected: total.shape().to_vec(),
                    found: g.shape().to_vec(),
                });
            }
            total += &g;
        }
        Ok(total)
    }

    fn grad_lip(&self) -> GradLip {
        self.funcs.iter().map(|f| f.grad_lip()).sum()
    }

    fn is_smooth(&self) -> bool {
        self.funcs.iter().all(|f| f.is_smooth())
    }

    fn is_proximable(&self) -> bool {
        false
    }
}
