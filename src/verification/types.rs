//! verification::types — shared numeric aliases and solver wiring.
//!
//! Purpose
//! -------
//! Centralize the numeric types and L-BFGS aliases used by the numeric
//! prox solve, so the rest of the verification code stays agnostic to
//! argmin generics.
//!
//! Conventions
//! -----------
//! - The numeric solver works on the **flattened** trial point (`Theta`,
//!   `Array1<f64>`); callers reshape results back to the original
//!   `ArrayD` shape.
//! - `Cost` is the scalar prox objective `step·f(z) + 0.5‖z − x‖²`.
//! - `DEFAULT_LBFGS_MEM` is the history size used unless overridden in
//!   [`NumericProxOptions`](crate::verification::NumericProxOptions).
use argmin::solver::{
    linesearch::{HagerZhangLineSearch, MoreThuenteLineSearch},
    quasinewton::LBFGS,
};
use ndarray::Array1;
use std::collections::HashMap;

/// Flattened point handed to the numeric solver.
pub type Theta = Array1<f64>;

/// Gradient of the prox objective, same length as [`Theta`].
pub type Grad = Array1<f64>;

/// Scalar objective value used by the solver.
pub type Cost = f64;

/// Function-evaluation counters as reported by the solver.
pub type FnEvalMap = HashMap<String, u64>;

/// Default history size (`m`) for L-BFGS runs.
pub const DEFAULT_LBFGS_MEM: usize = 7;

pub type HagerZhangLS = HagerZhangLineSearch<Theta, Grad, Cost>;

pub type MoreThuenteLS = MoreThuenteLineSearch<Theta, Grad, Cost>;

pub type LbfgsHagerZhang = LBFGS<HagerZhangLS, Theta, Grad, Cost>;

pub type LbfgsMoreThuente = LBFGS<MoreThuenteLS, Theta, Grad, Cost>;
