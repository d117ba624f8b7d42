//! The function contract consumed by solvers and by the verification engine.
//!
//! - [`Func`]: evaluate, gradient, proximal operator, conjugate prox via
//!   Moreau's identity, capability flags, and the gradient Lipschitz bound.
//! - [`GradLip`]: tagged "known bound / unknown" answer for the Lipschitz
//!   constant of `∇f`.
//!
//! Convention: trial points are passed as `ArrayViewD<f64>` of the
//! function's domain shape, and every array-valued answer has exactly that
//! shape. Implementations never mutate `self` while answering a query, so a
//! single function object can be reused across solver iterations and
//! queried at many points independently.
use crate::funcs::{
    errors::{Capability, FuncError, FuncResult},
    validation::verify_step,
};
use ndarray::{ArrayD, ArrayViewD};

/// Lipschitz constant of the gradient, when one is known.
///
/// `Unknown` means "do not assume any bound". It is never a stand-in for
/// zero or infinity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GradLip {
    Known(f64),
    Unknown,
}

impl GradLip {
    /// The bound as an `Option`, `None` when unknown.
    pub fn value(&self) -> Option<f64> {
        match self {
            GradLip::Known(v) => Some(*v),
            GradLip::Unknown => None,
        }
    }

    pub fn is_known(&self) -> bool {
        matches!(self, GradLip::Known(_))
    }
}

impl std::ops::Add for GradLip {
    type Output = GradLip;

    fn add(self, rhs: GradLip) -> GradLip {
        match (self, rhs) {
            (GradLip::Known(a), GradLip::Known(b)) => GradLip::Known(a + b),
            _ => GradLip::Unknown,
        }
    }
}

/// Summing bounds propagates ignorance: one unknown term makes the total
/// unknown. The empty sum is `Known(0.0)`.
impl std::iter::Sum for GradLip {
    fn sum<I: Iterator<Item = GradLip>>(iter: I) -> GradLip {
        iter.fold(GradLip::Known(0.0), |acc, lip| acc + lip)
    }
}

/// A real-valued function over arrays with optional first-order and
/// proximal information.
///
/// Required:
/// - `is_smooth()`: whether `f` is differentiable everywhere.
/// - `is_proximable()`: whether `prox` has a closed form.
///
/// Optional (default to [`FuncError::NotImplemented`]):
/// - `eval(x)`: `f(x)`.
/// - `grad(x)`: `∇f(x)`, or a subgradient for non-smooth `f`.
/// - `prox(x, step)`: `argmin_z step·f(z) + 0.5‖x − z‖²`.
///
/// Provided:
/// - `conj_prox(x, step)`: prox of the convex conjugate `f*` via Moreau's
///   identity; needs only `prox`.
/// - `grad_lip()`: defaults to [`GradLip::Unknown`].
pub trait Func {
    fn eval(&self, _x: ArrayViewD<'_, f64>) -> FuncResult<f64> {
        Err(FuncError::NotImplemented { capability: Capability::Eval })
    }

    fn grad(&self, _x: ArrayViewD<'_, f64>) -> FuncResult<ArrayD<f64>> {
        Err(FuncError::NotImplemented { capability: Capability::Grad })
    }

    fn prox(&self, _x: ArrayViewD<'_, f64>, _step: f64) -> FuncResult<ArrayD<f64>> {
        Err(FuncError::NotImplemented { capability: Capability::Prox })
    }

    /// Proximal operator of the convex conjugate
    /// `f*(y) = sup_z ⟨y, z⟩ − f(z)`, computed as
    ///
    /// ```text
    /// conj_prox(x, s) = x − s · prox(x / s, 1 / s)
    /// ```
    ///
    /// # Errors
    /// - [`FuncError::InvalidStep`] if `step` is not finite and positive.
    /// - Whatever `prox` returns, typically `NotImplemented`.
    fn conj_prox(&self, x: ArrayViewD<'_, f64>, step: f64) -> FuncResult<ArrayD<f64>> {
        verify_step(step)?;
        let scaled = &x / step;
        let p = self.prox(scaled.view(), 1.0 / step)?;
        Ok(&x - &(p * step))
    }

    fn grad_lip(&self) -> GradLip {
        GradLip::Unknown
    }

    fn is_smooth(&self) -> bool;

    fn is_proximable(&self) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Purpose
    // -------
    // `GradLip` addition and summation propagate `Unknown`.
    //
    // Expect
    // ------
    // - Known + Known adds; anything with Unknown is Unknown; empty sum is 0.
    fn grad_lip_sum_propagates_unknown() {
        let all_known: GradLip = [GradLip::Known(1.5), GradLip::Known(2.0)].into_iter().sum();
        assert_eq!(all_known, GradLip::Known(3.5));

        let one_unknown: GradLip =
            [GradLip::Known(1.5), GradLip::Unknown, GradLip::Known(2.0)].into_iter().sum();
        assert_eq!(one_unknown, GradLip::Unknown);
        assert_eq!(one_unknown.value(), None);

        let empty: GradLip = std::iter::empty::<GradLip>().sum();
        assert_eq!(empty, GradLip::Known(0.0));
    }

    struct EvalOnly;

    impl Func for EvalOnly {
        fn eval(&self, x: ArrayViewD<'_, f64>) -> FuncResult<f64> {
            Ok(x.sum())
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
    // Missing capabilities surface as `NotImplemented` for the right
    // operation, including through `conj_prox`.
    fn default_methods_report_missing_capability() {
        let f = EvalOnly;
        let x = ndarray::arr1(&[1.0, 2.0]).into_dyn();

        assert_eq!(f.eval(x.view()), Ok(3.0));
        assert_eq!(
            f.grad(x.view()),
            Err(FuncError::NotImplemented { capability: Capability::Grad })
        );
        assert_eq!(
            f.conj_prox(x.view(), 1.0),
            Err(FuncError::NotImplemented { capability: Capability::Prox })
        );
        assert_eq!(f.grad_lip(), GradLip::Unknown);
    }

    #[test]
    // `conj_prox` rejects non-positive steps before touching `prox`.
    fn conj_prox_rejects_bad_step() {
        let f = EvalOnly;
        let x = ndarray::arr1(&[1.0]).into_dyn();
        assert!(matches!(f.conj_prox(x.view(), 0.0), Err(FuncError::InvalidStep { .. })));
        assert!(matches!(f.conj_prox(x.view(), f64::NAN), Err(FuncError::InvalidStep { .. })));
    }
}
