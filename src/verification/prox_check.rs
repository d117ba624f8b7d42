//! Prox self-check: analytic `prox` against a numerically solved prox.
use crate::{
    funcs::traits::Func,
    verification::{
        errors::{CheckError, CheckKind, CheckResult},
        numeric_prox::numeric_prox,
        options::{CheckBehavior, ProxCheckOptions},
        report::{ProxCheckReport, ProxDiscrepancy},
    },
};
use ndarray::{ArrayD, Zip};

/// Compare `func.prox(x, opts.step)` with [`numeric_prox`] at every point
/// in `values`.
///
/// The numeric solve is seeded at the analytic value, so a correct prox
/// terminates almost immediately while a wrong one is pulled towards the
/// true minimiser. A point passes iff `|a − b| ≤ atol + rtol·|b|` for every
/// entry, with `a` analytic and `b` numeric.
///
/// # Errors
/// - Errors from `func.prox`, from `func.eval` / `func.grad` inside the
///   solve, or from the solver itself.
/// - [`CheckError::ToleranceFailure`] at the first failing point in
///   [`CheckBehavior::Error`] mode, carrying the largest entrywise
///   difference.
pub fn check_prox_impl(
    func: &dyn Func, values: &[ArrayD<f64>], opts: &ProxCheckOptions,
) -> CheckResult<ProxCheckReport> {
    let mut report = ProxCheckReport::default();
    for (index, x) in values.iter().enumerate() {
        let analytic = func.prox(x.view(), opts.step)?;
        let (numeric, outcome) =
            numeric_prox(func, x.view(), opts.step, Some(analytic.view()), &opts.prox)?;
        let mut passed = true;
        Zip::from(&analytic).and(&numeric).for_each(|a, b| {
            if (a - b).abs() > opts.atol + opts.rtol * b.abs() {
                passed = false;
            }
        });
        let discrepancy =
            ProxDiscrepancy::from_diffs(analytic.iter().zip(numeric.iter()).map(|(a, b)| a - b));
        if opts.verbose {
            log::debug!(
                "prox check, value {index}: pass = {passed}, mad = {:e}, max = {:e}, l2 = {:e}, solver: {}",
                discrepancy.mad,
                discrepancy.max,
                discrepancy.l2,
                outcome.status
            );
        }
        if !passed && opts.behavior == CheckBehavior::Error {
            return Err(CheckError::ToleranceFailure {
                check: CheckKind::Prox,
                index,
                error: discrepancy.max,
            });
        }
        report.push(passed, discrepancy);
    }
    if opts.behavior == CheckBehavior::Warn && !report.all_passed() {
        log::warn!("{}", report.summary());
    }
    Ok(report)
}
