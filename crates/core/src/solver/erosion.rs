//! Slope-limited thermal erosion
//!
//! Material moves only where the gradient to a neighbour exceeds the talus
//! slope. Per neighbour `n` the gradient is `m = (n − v) / h`; the excess
//! `sign(m) · (|m| − slope)` is summed and scaled by `rate`.

use super::stencil::{Stencil2, Stencil3};
use crate::core_types::FieldError;
use crate::grid::partition::{for_each_partition, Cursor2, Cursor3};
use crate::grid::{Field2, Field3};
use tracing::trace;

#[inline]
fn excess(neighbor: f64, value: f64, spacing_inv: f64, slope: f64) -> f64 {
    let m = (neighbor - value) * spacing_inv;
    let over = m.abs() - slope;
    if over > 0.0 {
        if m < 0.0 {
            -over
        } else if m > 0.0 {
            over
        } else {
            0.0
        }
    } else {
        0.0
    }
}

/// Accumulate thermal erosion of a 2D height field into `deltas`
///
/// # Errors
/// Returns [`FieldError::ResolutionMismatch`] if `deltas` is not one entry
/// per sample
pub fn erode_thermal_2d(
    field: &Field2<f64>,
    deltas: &mut [f64],
    slope: f64,
    rate: f64,
    parallel: bool,
) -> Result<(), FieldError> {
    let grid = field.grid();
    let values = field.values();
    FieldError::check_len(values.len(), deltas.len())?;

    let stencil = Stencil2::new(grid);
    let inv = grid.spacing_inv();

    for_each_partition(deltas, parallel, |start, chunk| {
        trace!("erode_thermal_2d partition start={} len={}", start, chunk.len());
        let mut cursor = Cursor2::new(grid, start);

        for (offset, delta) in chunk.iter_mut().enumerate() {
            let index = start + offset;
            let v = values[index];
            let [x0, x1, y0, y1] = stencil.neighbors(values, index, &cursor);

            let sum = excess(x0, v, inv.x, slope)
                + excess(x1, v, inv.x, slope)
                + excess(y0, v, inv.y, slope)
                + excess(y1, v, inv.y, slope);

            *delta += sum * rate;
            cursor.advance();
        }
    });

    Ok(())
}

/// Accumulate thermal erosion of a 3D density field into `deltas`
///
/// # Errors
/// Returns [`FieldError::ResolutionMismatch`] if `deltas` is not one entry
/// per sample
pub fn erode_thermal_3d(
    field: &Field3<f64>,
    deltas: &mut [f64],
    slope: f64,
    rate: f64,
    parallel: bool,
) -> Result<(), FieldError> {
    let grid = field.grid();
    let values = field.values();
    FieldError::check_len(values.len(), deltas.len())?;

    let stencil = Stencil3::new(grid);
    let inv = grid.spacing_inv();

    for_each_partition(deltas, parallel, |start, chunk| {
        trace!("erode_thermal_3d partition start={} len={}", start, chunk.len());
        let mut cursor = Cursor3::new(grid, start);

        for (offset, delta) in chunk.iter_mut().enumerate() {
            let index = start + offset;
            let v = values[index];
            let [x0, x1, y0, y1, z0, z1] = stencil.neighbors(values, index, &cursor);

            let sum = excess(x0, v, inv.x, slope)
                + excess(x1, v, inv.x, slope)
                + excess(y0, v, inv.y, slope)
                + excess(y1, v, inv.y, slope)
                + excess(z0, v, inv.z, slope)
                + excess(z1, v, inv.z, slope);

            *delta += sum * rate;
            cursor.advance();
        }
    });

    Ok(())
}
