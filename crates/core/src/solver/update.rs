//! Explicit Euler advance and threshold bifurcation
//!
//! Operators never write samples directly. They accumulate rates of change
//! into a caller-owned delta buffer of the same length as the field, and
//! [`update`] folds that buffer into the samples once per step.

use crate::core_types::{FieldError, FieldValue};
use crate::grid::partition::for_each_partition;
use crate::grid::PARALLEL_CHUNK_LEN;
use rayon::prelude::*;

/// Advance `values` by `deltas * time_step`, then zero `deltas`
///
/// Works for any [`FieldValue`], so scalar and vector fields share one path.
///
/// # Errors
/// Returns [`FieldError::ResolutionMismatch`] if the buffers differ in length
pub fn update<T: FieldValue>(
    values: &mut [T],
    deltas: &mut [T],
    time_step: f64,
    parallel: bool,
) -> Result<(), FieldError> {
    FieldError::check_len(values.len(), deltas.len())?;

    let kernel = |values: &mut [T], deltas: &mut [T]| {
        for (value, delta) in values.iter_mut().zip(deltas.iter_mut()) {
            *value += *delta * time_step;
            *delta = T::zero();
        }
    };

    if parallel {
        values
            .par_chunks_mut(PARALLEL_CHUNK_LEN)
            .zip(deltas.par_chunks_mut(PARALLEL_CHUNK_LEN))
            .for_each(|(v, d)| kernel(v, d));
    } else {
        kernel(values, deltas);
    }

    Ok(())
}

/// Push samples away from `threshold` at a constant `rate`
///
/// Accumulates `+rate` for samples above the threshold and `-rate` for
/// samples below it. Samples exactly at the threshold are left alone.
///
/// # Errors
/// Returns [`FieldError::ResolutionMismatch`] if the buffers differ in length
pub fn bifurcate(
    values: &[f64],
    deltas: &mut [f64],
    threshold: f64,
    rate: f64,
    parallel: bool,
) -> Result<(), FieldError> {
    FieldError::check_len(values.len(), deltas.len())?;

    for_each_partition(deltas, parallel, |start, chunk| {
        let samples = &values[start..start + chunk.len()];
        for (delta, &v) in chunk.iter_mut().zip(samples) {
            if v > threshold {
                *delta += rate;
            } else if v < threshold {
                *delta -= rate;
            }
        }
    });

    Ok(())
}
