//! verification::builders — L-BFGS solver construction for the numeric prox.
//!
//! Purpose
//! -------
//! Build L-BFGS solvers for the prox objective from a
//! [`NumericProxOptions`], hiding argmin's generic wiring from the
//! numeric prox entry point.
//!
//! Key behaviors
//! -------------
//! - One builder per supported line search (Hager–Zhang, More–Thuente).
//! - Optional gradient and cost-change tolerances are applied through
//!   [`configure_lbfgs`]; an absent tolerance keeps argmin's default.
//!
//! Invariants & assumptions
//! ------------------------
//! - The history size is `opts.lbfgs_mem`, or [`DEFAULT_LBFGS_MEM`] when
//!   unset.
//! - The builders never set the starting point or `max_iters`; both are
//!   applied by [`run_lbfgs`](crate::verification::run::run_lbfgs).
//! - argmin errors raised while applying tolerances surface as
//!   [`CheckError`](crate::verification::CheckError) through its
//!   `From<argmin::core::Error>` conversion.
use argmin::solver::quasinewton::LBFGS;

use crate::verification::{
    errors::CheckResult,
    options::NumericProxOptions,
    types::{
        Cost, DEFAULT_LBFGS_MEM, Grad, HagerZhangLS, LbfgsHagerZhang, LbfgsMoreThuente,
        MoreThuenteLS, Theta,
    },
};

/// Construct L-BFGS with a Hager–Zhang line search.
///
/// # Errors
/// Any tolerance rejected by argmin's `with_tolerance_grad` /
/// `with_tolerance_cost`.
pub fn build_optimizer_hager_zhang(opts: &NumericProxOptions) -> CheckResult<LbfgsHagerZhang> {
    let hager_zhang = HagerZhangLS::new();
    let mem = opts.lbfgs_mem.unwrap_or(DEFAULT_LBFGS_MEM);
    let lbfgs = LbfgsHagerZhang::new(hager_zhang, mem);
    configure_lbfgs(lbfgs, opts)
}

/// Construct L-BFGS with a More–Thuente line search.
///
/// # Errors
/// As for [`build_optimizer_hager_zhang`].
pub fn build_optimizer_more_thuente(opts: &NumericProxOptions) -> CheckResult<LbfgsMoreThuente> {
    let more_thuente = MoreThuenteLS::new();
    let mem = opts.lbfgs_mem.unwrap_or(DEFAULT_LBFGS_MEM);
    let lbfgs = LbfgsMoreThuente::new(more_thuente, mem);
    configure_lbfgs(lbfgs, opts)
}

/// Apply the optional tolerances in `opts.tols` to any L-BFGS solver.
pub fn configure_lbfgs<L>(
    mut solver: LBFGS<L, Theta, Grad, Cost>, opts: &NumericProxOptions,
) -> CheckResult<LBFGS<L, Theta, Grad, Cost>> {
    if let Some(g) = opts.tols.tol_grad {
        solver = solver.with_tolerance_grad(g)?;
    }
    if let Some(c) = opts.tols.tol_cost {
        solver = solver.with_tolerance_cost(c)?;
    }
    Ok(solver)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::verification::options::{LineSearcher, Tolerances};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Construction of both L-BFGS variants with default and explicit
    //   history sizes.
    // - Application of present and absent tolerances via `configure_lbfgs`.
    //
    // They intentionally DO NOT cover:
    // - Running the solver, which is exercised through `numeric_prox`.
    // -------------------------------------------------------------------------

    fn opts(
        tol_grad: Option<f64>, tol_cost: Option<f64>, searcher: LineSearcher, mem: Option<usize>,
    ) -> NumericProxOptions {
        let tols = Tolerances::new(tol_grad, tol_cost, Some(50)).expect("Tolerances should be valid");
        NumericProxOptions::new(tols, searcher, mem, false, false)
            .expect("NumericProxOptions should be valid")
    }

    #[test]
    // Purpose
    // -------
    // Both builders succeed with the default memory and with an explicit
    // one.
    //
    // Given
    // -----
    // - Valid gradient and cost tolerances.
    // - `lbfgs_mem` of `None` and `Some(11)`.
    //
    // Expect
    // ------
    // - Every build returns `Ok(_)`.
    fn builders_accept_default_and_explicit_memory() {
        for mem in [None, Some(11)] {
            let hz = build_optimizer_hager_zhang(&opts(
                Some(1e-6),
                Some(1e-8),
                LineSearcher::HagerZhang,
                mem,
            ));
            let mt = build_optimizer_more_thuente(&opts(
                Some(1e-6),
                None,
                LineSearcher::MoreThuente,
                mem,
            ));

            assert!(hz.is_ok(), "Hager–Zhang build should succeed for mem {mem:?}");
            assert!(mt.is_ok(), "More–Thuente build should succeed for mem {mem:?}");
        }
    }

    #[test]
    // Purpose
    // -------
    // `configure_lbfgs` leaves argmin's defaults alone when both
    // tolerances are absent.
    fn configure_lbfgs_respects_absent_tolerances() {
        // Arrange
        let raw = LBFGS::new(MoreThuenteLS::new(), DEFAULT_LBFGS_MEM);
        let opts = opts(None, None, LineSearcher::MoreThuente, None);

        // Act
        let configured = configure_lbfgs(raw, &opts);

        // Assert
        assert!(configured.is_ok(), "configure_lbfgs should succeed when both tolerances are None");
    }
}
