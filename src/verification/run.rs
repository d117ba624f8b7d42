//! Execution helper that runs an `argmin` solver on a prox objective and
//! returns the minimiser with a [`NumericProxOutcome`].
use crate::verification::{
    adapter::ProxProblem,
    errors::CheckResult,
    options::NumericProxOptions,
    outcome::NumericProxOutcome,
    types::{Grad, Theta},
};
use argmin::core::{CostFunction, Executor, Gradient, State};
use argmin_math::ArgminL2Norm;

/// Run an `argmin` solver on a [`ProxProblem`] from `z0`.
///
/// Wires up the problem, the solver, the starting point, `max_iters` from
/// `opts.tols`, and (with the `obs_slog` feature and `opts.verbose`) a
/// terminal observer. The returned point is argmin's best parameter, not
/// the last iterate.
///
/// # Errors
/// - argmin runtime errors (line search failures, errors raised by the
///   problem), recovered into [`CheckError`](crate::verification::CheckError).
/// - Validation errors from [`NumericProxOutcome::new`].
pub fn run_lbfgs<'a, S>(
    z0: Theta, opts: &NumericProxOptions, problem: ProxProblem<'a>, solver: S,
) -> CheckResult<(Theta, NumericProxOutcome)>
where
    S: argmin::core::Solver<ProxProblem<'a>, argmin::core::IterState<Theta, Grad, (), (), (), f64>>,
{
    if opts.verbose {
        log_initial_state(&z0, &problem)?;
    }
    let mut optimizer = Executor::new(problem, solver);
    optimizer = optimizer.configure(|state| state.param(z0));
    #[cfg(feature = "obs_slog")]
    if opts.verbose {
        let observer = argmin_observer_slog::SlogLogger::term_noblock();
        optimizer = optimizer.add_observer(observer, argmin::core::observers::ObserverMode::Always);
    }
    if let Some(max_iter) = opts.tols.max_iter {
        optimizer = optimizer.configure(|state| state.max_iters(max_iter as u64));
    }

    let mut result = optimizer.run()?.state().clone();
    let iterations = result.get_iter();
    let function_counts = result.get_func_counts().clone();
    let termination = result.get_termination_status().clone();
    let grad = result.take_gradient();
    let outcome = NumericProxOutcome::new(
        result.take_best_param(),
        result.get_best_cost(),
        termination,
        iterations,
        function_counts,
        grad,
    )?;
    log::debug!(
        "numeric prox: {} after {} iterations, value = {:.6e}",
        outcome.1.status,
        outcome.1.iterations,
        outcome.1.value
    );
    Ok(outcome)
}

// ---- Helper Methods ----

fn log_initial_state(z0: &Theta, problem: &ProxProblem<'_>) -> CheckResult<()> {
    let c0 = problem.cost(z0)?;
    let g0n = problem.gradient(z0).ok().map(|g| g.l2_norm());

    log::debug!(
        "numeric prox init: c(z0) = {:.6}{}",
        c0,
        g0n.map(|n| format!(", ||grad|| = {:.6}", n)).unwrap_or_default()
    );
    Ok(())
}
