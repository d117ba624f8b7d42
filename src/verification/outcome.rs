//! Diagnostics of a numeric prox solve.
use crate::verification::{
    errors::CheckResult,
    types::{FnEvalMap, Grad, Theta},
    validation::{validate_prox_value, validate_value},
};
use argmin::core::{TerminationReason, TerminationStatus};
use argmin_math::ArgminL2Norm;

/// Solver report returned alongside the numeric prox value.
///
/// - `value`: best prox objective `step·f(z) + 0.5‖z − x‖²`.
/// - `converged`: `true` if the solver stopped on its own criteria; hitting
///   `max_iter` does not count.
/// - `status`: human-readable termination status.
/// - `fn_evals`: argmin's counters (`cost_count`, `gradient_count`, ...).
/// - `grad_norm`: norm of the last available gradient, if present.
#[derive(Debug, Clone, PartialEq)]
pub struct NumericProxOutcome {
    pub value: f64,
    pub converged: bool,
    pub status: String,
    pub iterations: usize,
    pub fn_evals: FnEvalMap,
    pub grad_norm: Option<f64>,
}

impl NumericProxOutcome {
    /// Validate raw solver state and split it into the minimiser and its
    /// diagnostics.
    ///
    /// # Errors
    /// - `MissingProxValue` / `InvalidProxValue` for a bad minimiser.
    /// - `NonFiniteCost` for a non-finite best value.
    pub fn new(
        z_hat_opt: Option<Theta>, value: f64, termination: TerminationStatus, iterations: u64,
        fn_evals: FnEvalMap, grad: Option<Grad>,
    ) -> CheckResult<(Theta, Self)> {
        let z_hat = validate_prox_value(z_hat_opt)?;
        validate_value(value)?;
        let (converged, status) = match termination {
            TerminationStatus::NotTerminated => (false, "Not terminated".to_string()),
            TerminationStatus::Terminated(TerminationReason::MaxItersReached) => {
                (false, "Maximum iterations reached".to_string())
            }
            other => (true, format!("{other:?}")),
        };
        let grad_norm = grad.map(|g| g.l2_norm());
        let outcome = Self {
            value,
            converged,
            status,
            iterations: iterations as usize,
            fn_evals,
            grad_norm,
        };
        Ok((z_hat, outcome))
    }
}
