//! funcs::errors — error surface for the function contract.
//!
//! Every fallible operation of [`Func`](crate::funcs::Func) and of the loss
//! constructors returns [`FuncResult<T>`]. Failures are either programming
//! errors (a missing capability, a mis-shaped trial point, incompatible
//! data) or invalid hyperparameters; none of them are transient.

/// Result alias for function and loss operations.
pub type FuncResult<T> = Result<T, FuncError>;

/// Operation a function may or may not support.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    Eval,
    Grad,
    Prox,
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Capability::Eval => write!(f, "eval"),
            Capability::Grad => write!(f, "grad"),
            Capability::Prox => write!(f, "prox"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FuncError {
    // ---- Capabilities ----
    /// The function provides no rule for this operation.
    NotImplemented {
        capability: Capability,
    },

    // ---- Shapes ----
    /// Trial point shape differs from the declared coefficient shape.
    ShapeMismatch {
        expected: Vec<usize>,
        found: Vec<usize>,
    },

    /// Design matrix and response disagree on the number of samples.
    DataShapeMismatch {
        x_rows: usize,
        y_rows: usize,
    },

    /// Sample weights must have one entry per sample.
    SampleWeightMismatch {
        expected: usize,
        found: usize,
    },

    /// Components of a sum returned gradients of different shapes.
    ComponentShapeMismatch {
        index: usize,
        expected: Vec<usize>,
        found: Vec<usize>,
    },

    /// No samples were supplied.
    EmptyData,

    // ---- Hyperparameters ----
    /// Huber knot must be finite and non-negative.
    InvalidKnot {
        knot: f64,
        reason: &'static str,
    },

    /// Penalty strength must be finite and non-negative.
    InvalidPenalty {
        pen: f64,
        reason: &'static str,
    },

    /// Prox step must be finite and strictly positive.
    InvalidStep {
        step: f64,
        reason: &'static str,
    },

    /// A supplied Lipschitz constant must be finite and non-negative.
    InvalidLipschitz {
        lip: f64,
        reason: &'static str,
    },

    // ---- Data ----
    /// Design matrix or response contains NaN or ±∞.
    NonFiniteData {
        what: &'static str,
        index: usize,
        value: f64,
    },

    /// Sample weights must be finite and non-negative.
    InvalidSampleWeight {
        index: usize,
        value: f64,
    },

    /// Response value outside the loss's support.
    InvalidResponse {
        index: usize,
        value: f64,
        reason: &'static str,
    },

    /// Spectral computation for the Lipschitz constant did not produce a
    /// usable value.
    SpectralNormFailed {
        value: f64,
    },
}

impl std::error::Error for FuncError {}

impl std::fmt::Display for FuncError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Capabilities ----
            FuncError::NotImplemented { capability } => {
                write!(f, "Function does not implement {capability}")
            }

            // ---- Shapes ----
            FuncError::ShapeMismatch { expected, found } => {
                write!(f, "Shape mismatch: expected {expected:?}, found {found:?}")
            }
            FuncError::DataShapeMismatch { x_rows, y_rows } => {
                write!(f, "X has {x_rows} rows but y has {y_rows} rows")
            }
            FuncError::SampleWeightMismatch { expected, found } => {
                write!(f, "Sample weight length mismatch: expected {expected}, found {found}")
            }
            FuncError::ComponentShapeMismatch { index, expected, found } => {
                write!(
                    f,
                    "Sum component {index} returned gradient of shape {found:?}, expected {expected:?}"
                )
            }
            FuncError::EmptyData => write!(f, "No samples supplied"),

            // ---- Hyperparameters ----
            FuncError::InvalidKnot { knot, reason } => {
                write!(f, "Invalid Huber knot {knot}: {reason}")
            }
            FuncError::InvalidPenalty { pen, reason } => {
                write!(f, "Invalid penalty strength {pen}: {reason}")
            }
            FuncError::InvalidStep { step, reason } => {
                write!(f, "Invalid prox step {step}: {reason}")
            }
            FuncError::InvalidLipschitz { lip, reason } => {
                write!(f, "Invalid Lipschitz constant {lip}: {reason}")
            }

            // ---- Data ----
            FuncError::NonFiniteData { what, index, value } => {
                write!(f, "Non-finite value in {what} at flat index {index}: {value}")
            }
            FuncError::InvalidSampleWeight { index, value } => {
                write!(f, "Invalid sample weight at index {index}: {value}, must be finite and >= 0")
            }
            FuncError::InvalidResponse { index, value, reason } => {
                write!(f, "Invalid response at index {index}: {value}: {reason}")
            }
            FuncError::SpectralNormFailed { value } => {
                write!(f, "Operator norm computation returned unusable value {value}")
            }
        }
    }
}
