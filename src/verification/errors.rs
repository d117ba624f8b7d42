use argmin::core::{ArgminError, Error};

use crate::funcs::errors::FuncError;

/// Result alias for verification operations.
pub type CheckResult<T> = Result<T, CheckError>;

/// Which self-check produced a tolerance failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckKind {
    Grad,
    Prox,
}

impl std::fmt::Display for CheckKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CheckKind::Grad => write!(f, "gradient"),
            CheckKind::Prox => write!(f, "prox"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CheckError {
    // ---- Verification policy ----
    /// A trial point failed its tolerance while running in `Error` mode.
    ToleranceFailure {
        check: CheckKind,
        index: usize,
        error: f64,
    },

    // ---- Check options ----
    /// Absolute tolerance needs to be finite and non-negative.
    InvalidAtol {
        tol: f64,
        reason: &'static str,
    },
    /// Relative tolerance needs to be finite and non-negative.
    InvalidRtol {
        tol: f64,
        reason: &'static str,
    },
    /// Prox step of a check needs to be finite and positive.
    InvalidStep {
        step: f64,
        reason: &'static str,
    },
    /// Unknown behaviour name.
    InvalidBehavior {
        name: String,
        reason: &'static str,
    },

    // ---- Solver options ----
    /// Gradient tolerance needs to be positive and finite.
    InvalidTolGrad {
        tol: f64,
        reason: &'static str,
    },
    /// Cost change tolerance needs to be positive and finite.
    InvalidTolCost {
        tol: f64,
        reason: &'static str,
    },
    /// Maximum iterations needs to be positive.
    InvalidMaxIter {
        max_iter: usize,
        reason: &'static str,
    },
    /// At least one tolerance must be provided.
    NoTolerancesProvided,
    /// Invalid line searcher name.
    InvalidLineSearch {
        name: String,
        reason: &'static str,
    },
    /// lbfgs_mem needs to be at least 1.
    InvalidLBFGSMem {
        mem: usize,
        reason: &'static str,
    },

    // ---- Numerics ----
    /// Objective returned a non-finite value.
    NonFiniteCost {
        value: f64,
    },
    /// Gradient dimensions do not match parameter dimensions.
    GradientDimMismatch {
        expected: usize,
        found: usize,
    },
    /// Gradient elements need to be finite.
    InvalidGradient {
        index: usize,
        value: f64,
        reason: &'static str,
    },
    /// The numeric prox solve returned no minimiser.
    MissingProxValue,
    /// Numeric prox entries need to be finite.
    InvalidProxValue {
        index: usize,
        value: f64,
        reason: &'static str,
    },

    // ---- Function contract ----
    /// Error raised by the function under test.
    Func(FuncError),

    // ---- Argmin ---
    /// Wrapper for argmin::InvalidParameter
    InvalidParameter {
        text: String,
    },
    /// Wrapper for argmin::NotImplemented
    NotImplemented {
        text: String,
    },
    /// Wrapper for argmin::NotInitialized
    NotInitialized {
        text: String,
    },
    /// Wrapper for argmin::ConditionViolated
    ConditionViolated {
        text: String,
    },
    /// Wrapper for argmin::CheckPointNotFound
    CheckPointNotFound {
        text: String,
    },
    /// Wrapper for argmin::PotentialBug
    PotentialBug {
        text: String,
    },
    /// Wrapper for argmin::ImpossibleError
    ImpossibleError {
        text: String,
    },
    /// Wrapper for other argmin::Error types
    BackendError {
        text: String,
    },
}

impl std::error::Error for CheckError {}

impl std::fmt::Display for CheckError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Verification policy ----
            CheckError::ToleranceFailure { check, index, error } => {
                write!(f, "{check} check failed at value {index}: error {error:e}")
            }

            // ---- Check options ----
            CheckError::InvalidAtol { tol, reason } => {
                write!(f, "Invalid absolute tolerance {tol}: {reason}")
            }
            CheckError::InvalidRtol { tol, reason } => {
                write!(f, "Invalid relative tolerance {tol}: {reason}")
            }
            CheckError::InvalidStep { step, reason } => {
                write!(f, "Invalid check step {step}: {reason}")
            }
            CheckError::InvalidBehavior { name, reason } => {
                write!(f, "Invalid check behavior '{name}': {reason}")
            }

            // ---- Solver options ----
            CheckError::InvalidTolGrad { tol, reason } => {
                write!(f, "Invalid gradient tolerance {tol}: {reason}")
            }
            CheckError::InvalidTolCost { tol, reason } => {
                write!(f, "Invalid cost function change tolerance {tol}: {reason}")
            }
            CheckError::InvalidMaxIter { max_iter, reason } => {
                write!(f, "Invalid maximum iterations {max_iter}: {reason}")
            }
            CheckError::NoTolerancesProvided => {
                write!(f, "No tolerances provided")
            }
            CheckError::InvalidLineSearch { name, reason } => {
                write!(f, "Invalid line searcher '{name}': {reason}")
            }
            CheckError::InvalidLBFGSMem { mem, reason } => {
                write!(f, "Invalid L-BFGS memory {mem}: {reason}")
            }

            // ---- Numerics ----
            CheckError::NonFiniteCost { value } => {
                write!(f, "Non-finite cost value: {value}")
            }
            CheckError::GradientDimMismatch { expected, found } => {
                write!(f, "Gradient dimension mismatch: expected {expected}, found {found}")
            }
            CheckError::InvalidGradient { index, value, reason } => {
                write!(f, "Invalid gradient at index {index}: {value}: {reason}")
            }
            CheckError::MissingProxValue => {
                write!(f, "Numeric prox solve returned no minimiser")
            }
            CheckError::InvalidProxValue { index, value, reason } => {
                write!(f, "Invalid numeric prox at index {index}: {value}: {reason}")
            }

            // ---- Function contract ----
            CheckError::Func(err) => write!(f, "Function error: {err}"),

            // ---- Argmin ----
            CheckError::InvalidParameter { text } => {
                write!(f, "Invalid parameter: {text}")
            }
            CheckError::NotImplemented { text } => {
                write!(f, "Not implemented: {text}")
            }
            CheckError::NotInitialized { text } => {
                write!(f, "Not initialized: {text}")
            }
            CheckError::ConditionViolated { text } => {
                write!(f, "Condition violated: {text}")
            }
            CheckError::CheckPointNotFound { text } => {
                write!(f, "Checkpoint not found: {text}")
            }
            CheckError::PotentialBug { text } => {
                write!(f, "Potential bug: {text}")
            }
            CheckError::ImpossibleError { text } => {
                write!(f, "Impossible error: {text}")
            }
            CheckError::BackendError { text } => {
                write!(f, "Backend error: {text}")
            }
        }
    }
}

impl From<FuncError> for CheckError {
    fn from(err: FuncError) -> Self {
        CheckError::Func(err)
    }
}

/// Errors raised inside argmin callbacks travel as `argmin::core::Error`;
/// recover our own types first, then argmin's, then fall back to text.
impl From<Error> for CheckError {
    fn from(original_err: Error) -> Self {
        let original_err = match original_err.downcast::<CheckError>() {
            Ok(check_err) => return check_err,
            Err(err) => err,
        };
        let original_err = match original_err.downcast::<FuncError>() {
            Ok(func_err) => return CheckError::Func(func_err),
            Err(err) => err,
        };
        match original_err.downcast::<ArgminError>() {
            Ok(argmin_err) => match argmin_err {
                ArgminError::InvalidParameter { text } => CheckError::InvalidParameter { text },
                ArgminError::NotImplemented { text } => CheckError::NotImplemented { text },
                ArgminError::NotInitialized { text } => CheckError::NotInitialized { text },
                ArgminError::ConditionViolated { text } => CheckError::ConditionViolated { text },
                ArgminError::CheckpointNotFound { text } => {
                    CheckError::CheckPointNotFound { text }
                }
                ArgminError::PotentialBug { text } => CheckError::PotentialBug { text },
                ArgminError::ImpossibleError { text } => CheckError::ImpossibleError { text },
                other => CheckError::BackendError { text: other.to_string() },
            },
            Err(err) => CheckError::BackendError { text: err.to_string() },
        }
    }
}
