//! Configuration for the verification engine.
//!
//! - [`Tolerances`] and [`LineSearcher`]: stopping rules and line search of
//!   the L-BFGS solve behind [`numeric_prox`](crate::verification::numeric_prox).
//! - [`NumericProxOptions`]: full configuration of that solve.
//! - [`CheckBehavior`]: what a check does with failing points.
//! - [`GradCheckOptions`] / [`ProxCheckOptions`]: per-check tolerances.
//!
//! Every struct with numeric fields validates them in `new` and provides a
//! `Default` matching the conventional settings.
use crate::verification::{
    errors::{CheckError, CheckResult},
    validation::{verify_atol, verify_check_step, verify_rtol, verify_tol_cost, verify_tol_grad},
};
use std::str::FromStr;

/// Choice of line search used inside the L-BFGS solver.
///
/// Parsing is case-insensitive (`"MoreThuente"`, `"hagerzhang"`, ...).
/// Unknown names return `CheckError::InvalidLineSearch`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineSearcher {
    MoreThuente,
    HagerZhang,
}

impl FromStr for LineSearcher {
    type Err = CheckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "morethuente" => Ok(LineSearcher::MoreThuente),
            "hagerzhang" => Ok(LineSearcher::HagerZhang),
            _ => Err(CheckError::InvalidLineSearch {
                name: s.to_string(),
                reason: "Valid options are case insensitive 'MoreThuente' or 'HagerZhang'.",
            }),
        }
    }
}

/// Numerical tolerances and iteration limits for the numeric prox solve.
///
/// - `tol_grad`: terminate when the gradient norm falls below this threshold.
/// - `tol_cost`: terminate when the change in cost falls below this threshold.
/// - `max_iter`: hard cap on the number of iterations.
///
/// Any field can be `None` but **at least one** must be provided.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerances {
    pub tol_grad: Option<f64>,
    pub tol_cost: Option<f64>,
    pub max_iter: Option<usize>,
}

impl Tolerances {
    /// Construct validated tolerances.
    ///
    /// # Errors
    /// - [`CheckError::NoTolerancesProvided`] if all three are `None`.
    /// - [`CheckError::InvalidTolGrad`] / [`CheckError::InvalidTolCost`] for
    ///   non-finite or non-positive tolerances.
    /// - [`CheckError::InvalidMaxIter`] if `max_iter == 0`.
    pub fn new(
        tol_grad: Option<f64>, tol_cost: Option<f64>, max_iter: Option<usize>,
    ) -> CheckResult<Self> {
        if tol_grad.is_none() && tol_cost.is_none() && max_iter.is_none() {
            return Err(CheckError::NoTolerancesProvided);
        }
        verify_tol_cost(tol_cost)?;
        verify_tol_grad(tol_grad)?;
        if let Some(max_iter) = max_iter {
            if max_iter == 0 {
                return Err(CheckError::InvalidMaxIter {
                    max_iter,
                    reason: "Maximum iterations must be greater than zero.",
                });
            }
        }
        Ok(Self { tol_grad, tol_cost, max_iter })
    }
}

/// Configuration of the numeric prox solve.
///
/// Default:
/// - `tols`: `tol_grad = 1e-10`, `tol_cost = None`, `max_iter = 500`
/// - `line_searcher`: `MoreThuente`
/// - `lbfgs_mem`: `None` (uses [`DEFAULT_LBFGS_MEM`](crate::verification::DEFAULT_LBFGS_MEM))
/// - `force_no_grad`: `false`; set it for non-smooth functions whose
///   `grad` is only a subgradient, so the solver differentiates the
///   objective numerically instead.
/// - `verbose`: `false`; with the `obs_slog` feature this attaches argmin's
///   terminal observer.
#[derive(Debug, Clone, PartialEq)]
pub struct NumericProxOptions {
    pub tols: Tolerances,
    pub line_searcher: LineSearcher,
    pub lbfgs_mem: Option<usize>,
    pub force_no_grad: bool,
    pub verbose: bool,
}

impl NumericProxOptions {
    pub fn new(
        tols: Tolerances, line_searcher: LineSearcher, lbfgs_mem: Option<usize>,
        force_no_grad: bool, verbose: bool,
    ) -> CheckResult<Self> {
        if let Some(m) = lbfgs_mem {
            if m == 0 {
                return Err(CheckError::InvalidLBFGSMem {
                    mem: m,
                    reason: "L-BFGS memory must be greater than zero.",
                });
            }
        }
        Ok(Self { tols, line_searcher, lbfgs_mem, force_no_grad, verbose })
    }
}

impl Default for NumericProxOptions {
    fn default() -> Self {
        Self {
            tols: Tolerances { tol_grad: Some(1e-10), tol_cost: None, max_iter: Some(500) },
            line_searcher: LineSearcher::MoreThuente,
            lbfgs_mem: None,
            force_no_grad: false,
            verbose: false,
        }
    }
}

/// What a check does once every point has been evaluated.
///
/// - `Return`: hand back the report; failures are data, not errors.
/// - `Error`: stop at the first failing point with
///   [`CheckError::ToleranceFailure`].
/// - `Warn`: log a failure summary at `warn` level and return the report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CheckBehavior {
    #[default]
    Return,
    Error,
    Warn,
}

impl FromStr for CheckBehavior {
    type Err = CheckError;

    /// Accepts `"ret"`, `"return"`, `"error"` and `"warn"`, in any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ret" | "return" => Ok(CheckBehavior::Return),
            "error" => Ok(CheckBehavior::Error),
            "warn" => Ok(CheckBehavior::Warn),
            _ => Err(CheckError::InvalidBehavior {
                name: s.to_string(),
                reason: "Valid options are 'ret', 'error' or 'warn'.",
            }),
        }
    }
}

/// Options for [`check_grad_impl`](crate::verification::check_grad_impl).
///
/// A point passes iff `‖grad − fd_grad‖₂ ≤ atol`. Default `atol = 1e-5`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradCheckOptions {
    pub atol: f64,
    pub behavior: CheckBehavior,
    pub verbose: bool,
}

impl GradCheckOptions {
    pub fn new(atol: f64, behavior: CheckBehavior, verbose: bool) -> CheckResult<Self> {
        verify_atol(atol)?;
        Ok(Self { atol, behavior, verbose })
    }
}

impl Default for GradCheckOptions {
    fn default() -> Self {
        Self { atol: 1e-5, behavior: CheckBehavior::Return, verbose: false }
    }
}

/// Options for [`check_prox_impl`](crate::verification::check_prox_impl).
///
/// A point passes iff `|a − b| ≤ atol + rtol·|b|` entrywise, where `a` is the
/// analytic prox and `b` the numeric one. Defaults: `step = 0.5`,
/// `rtol = atol = 1e-5`.
#[derive(Debug, Clone, PartialEq)]
pub struct ProxCheckOptions {
    pub step: f64,
    pub rtol: f64,
    pub atol: f64,
    pub behavior: CheckBehavior,
    pub verbose: bool,
    pub prox: NumericProxOptions,
}

impl ProxCheckOptions {
    pub fn new(
        step: f64, rtol: f64, atol: f64, behavior: CheckBehavior, verbose: bool,
        prox: NumericProxOptions,
    ) -> CheckResult<Self> {
        verify_check_step(step)?;
        verify_rtol(rtol)?;
        verify_atol(atol)?;
        Ok(Self { step, rtol, atol, behavior, verbose, prox })
    }
}

impl Default for ProxCheckOptions {
    fn default() -> Self {
        Self {
            step: 0.5,
            rtol: 1e-5,
            atol: 1e-5,
            behavior: CheckBehavior::Return,
            verbose: false,
            prox: NumericProxOptions::default(),
        }
    }
}
