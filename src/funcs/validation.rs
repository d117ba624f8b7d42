//! Validation helpers shared by functions, penalties and losses.
//!
//! - **Hyperparameters**: [`verify_step`], [`verify_knot`],
//!   [`verify_penalty`], [`verify_lipschitz`].
//! - **Shapes**: [`verify_shape`] checks a trial point against a declared
//!   coefficient shape; [`verify_rows`] checks X/y agreement.
//! - **Data**: [`verify_finite`] and [`verify_sample_weight`].
//!
//! All helpers return the first offending value as a [`FuncError`] so that
//! callers can report it verbatim.
use crate::funcs::errors::{FuncError, FuncResult};
use ndarray::{ArrayBase, ArrayView, ArrayView1, ArrayViewD, Data, Dimension};

/// A prox step must be finite and strictly positive.
pub fn verify_step(step: f64) -> FuncResult<()> {
    if !step.is_finite() {
        return Err(FuncError::InvalidStep { step, reason: "Step must be finite." });
    }
    if step <= 0.0 {
        return Err(FuncError::InvalidStep { step, reason: "Step must be positive." });
    }
    Ok(())
}

/// The Huber knot must be finite and non-negative.
pub fn verify_knot(knot: f64) -> FuncResult<()> {
    if !knot.is_finite() {
        return Err(FuncError::InvalidKnot { knot, reason: "Knot must be finite." });
    }
    if knot < 0.0 {
        return Err(FuncError::InvalidKnot { knot, reason: "Knot must be non-negative." });
    }
    Ok(())
}

/// Penalty strengths must be finite and non-negative.
pub fn verify_penalty(pen: f64) -> FuncResult<()> {
    if !pen.is_finite() {
        return Err(FuncError::InvalidPenalty { pen, reason: "Penalty must be finite." });
    }
    if pen < 0.0 {
        return Err(FuncError::InvalidPenalty { pen, reason: "Penalty must be non-negative." });
    }
    Ok(())
}

/// A caller-supplied Lipschitz constant must be finite and non-negative.
pub fn verify_lipschitz(lip: f64) -> FuncResult<()> {
    if !lip.is_finite() || lip < 0.0 {
        return Err(FuncError::InvalidLipschitz {
            lip,
            reason: "Lipschitz constant must be finite and non-negative.",
        });
    }
    Ok(())
}

/// Check that `found` equals the declared shape `expected`.
pub fn verify_shape(expected: &[usize], found: &[usize]) -> FuncResult<()> {
    if expected != found {
        return Err(FuncError::ShapeMismatch { expected: expected.to_vec(), found: found.to_vec() });
    }
    Ok(())
}

/// Check `x` against the declared coefficient shape and view it with the
/// static dimensionality `D` the loss works in.
pub fn verify_coef<'b, D: Dimension>(
    expected: &[usize], x: &'b ArrayViewD<'_, f64>,
) -> FuncResult<ArrayView<'b, f64, D>> {
    verify_shape(expected, x.shape())?;
    x.view().into_dimensionality::<D>().map_err(|_| FuncError::ShapeMismatch {
        expected: expected.to_vec(),
        found: x.shape().to_vec(),
    })
}

/// Design matrix and response must describe the same, non-empty, set of
/// samples.
pub fn verify_rows(x_rows: usize, y_rows: usize) -> FuncResult<()> {
    if x_rows != y_rows {
        return Err(FuncError::DataShapeMismatch { x_rows, y_rows });
    }
    if x_rows == 0 {
        return Err(FuncError::EmptyData);
    }
    Ok(())
}

/// Reject NaN or ±∞ anywhere in `arr`; `what` names the array in the error.
pub fn verify_finite<S, D>(arr: &ArrayBase<S, D>, what: &'static str) -> FuncResult<()>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    for (index, &value) in arr.iter().enumerate() {
        if !value.is_finite() {
            return Err(FuncError::NonFiniteData { what, index, value });
        }
    }
    Ok(())
}

/// Sample weights: one finite, non-negative entry per sample.
pub fn verify_sample_weight(weights: ArrayView1<'_, f64>, n_samples: usize) -> FuncResult<()> {
    if weights.len() != n_samples {
        return Err(FuncError::SampleWeightMismatch { expected: n_samples, found: weights.len() });
    }
    for (index, &value) in weights.iter().enumerate() {
        if !value.is_finite() || value < 0.0 {
            return Err(FuncError::InvalidSampleWeight { index, value });
        }
    }
    Ok(())
}
