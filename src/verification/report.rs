//! Per-point results of gradient and prox checks.
//!
//! Both reports keep one entry per trial point, in the order the points
//! were supplied, so `passes[i]` and `errors[i]` always describe the same
//! point.
use crate::verification::errors::CheckKind;

/// Outcome of [`check_grad_impl`](crate::verification::check_grad_impl).
///
/// `errors[i]` is the Euclidean norm of the difference between the
/// analytic and finite-difference gradients at point `i`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GradCheckReport {
    pub passes: Vec<bool>,
    pub errors: Vec<f64>,
}

impl GradCheckReport {
    pub fn n_fails(&self) -> usize {
        count_fails(&self.passes)
    }

    pub fn all_passed(&self) -> bool {
        self.n_fails() == 0
    }

    pub(crate) fn push(&mut self, passed: bool, error: f64) {
        self.passes.push(passed);
        self.errors.push(error);
    }

    pub(crate) fn summary(&self) -> String {
        failure_summary(CheckKind::Grad, &self.passes)
    }
}

/// Discrepancy between an analytic and a numeric prox value.
///
/// - `mad`: mean absolute difference.
/// - `max`: largest absolute difference.
/// - `l2`: Euclidean norm of the difference.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ProxDiscrepancy {
    pub mad: f64,
    pub max: f64,
    pub l2: f64,
}

impl ProxDiscrepancy {
    /// Summarise the entrywise differences `diffs`. An empty point has zero
    /// discrepancy.
    pub fn from_diffs<I: IntoIterator<Item = f64>>(diffs: I) -> Self {
        let mut n = 0usize;
        let mut sum_abs = 0.0;
        let mut max = 0.0_f64;
        let mut sum_sq = 0.0;
        for d in diffs {
            let a = d.abs();
            n += 1;
            sum_abs += a;
            max = max.max(a);
            sum_sq += a * a;
        }
        let mad = if n == 0 { 0.0 } else { sum_abs / n as f64 };
        Self { mad, max, l2: sum_sq.sqrt() }
    }
}

/// Outcome of [`check_prox_impl`](crate::verification::check_prox_impl).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProxCheckReport {
    pub passes: Vec<bool>,
    pub errors: Vec<ProxDiscrepancy>,
}

impl ProxCheckReport {
    pub fn n_fails(&self) -> usize {
        count_fails(&self.passes)
    }

    pub fn all_passed(&self) -> bool {
        self.n_fails() == 0
    }

    pub(crate) fn push(&mut self, passed: bool, error: ProxDiscrepancy) {
        self.passes.push(passed);
        self.errors.push(error);
    }

    pub(crate) fn summary(&self) -> String {
        failure_summary(CheckKind::Prox, &self.passes)
    }
}

// ---- Helper methods ----

fn count_fails(passes: &[bool]) -> usize {
    passes.iter().filter(|p| !**p).count()
}

/// `"{k}/{n} gradients failed: [..]"` or `"{k}/{n} prox evals failed: [..]"`.
fn failure_summary(kind: CheckKind, passes: &[bool]) -> String {
    let what = match kind {
        CheckKind::Grad => "gradients",
        CheckKind::Prox => "prox evals",
    };
    format!("{}/{} {what} failed: {passes:?}", count_fails(passes), passes.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn counts_and_summaries() {
        let mut report = GradCheckReport::default();
        report.push(true, 1e-9);
        report.push(false, 0.3);
        report.push(true, 0.0);

        assert_eq!(report.n_fails(), 1);
        assert!(!report.all_passed());
        assert_eq!(report.summary(), "1/3 gradients failed: [true, false, true]");

        let mut prox = ProxCheckReport::default();
        prox.push(true, ProxDiscrepancy::default());
        assert!(prox.all_passed());
        assert_eq!(prox.summary(), "0/1 prox evals failed: [true]");
    }

    #[test]
    // Purpose
    // -------
    // The three discrepancy measures agree with hand computation.
    //
    // Given
    // -----
    // - Differences [3, -4, 0, 1].
    //
    // Expect
    // ------
    // - mad = 2, max = 4, l2 = sqrt(26).
    fn discrepancy_measures() {
        let d = ProxDiscrepancy::from_diffs([3.0, -4.0, 0.0, 1.0]);

        assert_abs_diff_eq!(d.mad, 2.0, epsilon = 1e-15);
        assert_abs_diff_eq!(d.max, 4.0, epsilon = 1e-15);
        assert_abs_diff_eq!(d.l2, 26.0_f64.sqrt(), epsilon = 1e-15);
        assert_eq!(ProxDiscrepancy::from_diffs(std::iter::empty()), ProxDiscrepancy::default());
    }
}
