//! Discrete Laplacian diffusion on regular grids
//!
//! Second difference per axis scaled by the inverse squared spacing:
//!
//! ```text
//! Δv = rate · Σ_axis (v_lo + v_hi − 2v) / h²
//! ```
//!
//! Neighbours past the edge come from the grid's boundary policy: Constant
//! re-reads the cell itself, Equal reflects to the inner neighbour and
//! Periodic reads the far edge.

use super::stencil::{Stencil2, Stencil3};
use crate::core_types::FieldError;
use crate::grid::partition::{for_each_partition, Cursor2, Cursor3};
use crate::grid::{Field2, Field3};
use tracing::trace;

/// Accumulate the diffusion rate of a 2D scalar field into `deltas`
///
/// # Errors
/// Returns [`FieldError::ResolutionMismatch`] if `deltas` is not one entry
/// per sample
pub fn diffuse_2d(
    field: &Field2<f64>,
    deltas: &mut [f64],
    rate: f64,
    parallel: bool,
) -> Result<(), FieldError> {
    let grid = field.grid();
    let values = field.values();
    FieldError::check_len(values.len(), deltas.len())?;

    let stencil = Stencil2::new(grid);
    let inv = grid.spacing_inv();
    let (tx, ty) = (inv.x * inv.x, inv.y * inv.y);

    for_each_partition(deltas, parallel, |start, chunk| {
        trace!("diffuse_2d partition start={} len={}", start, chunk.len());
        let mut cursor = Cursor2::new(grid, start);

        for (offset, delta) in chunk.iter_mut().enumerate() {
            let index = start + offset;
            let v = values[index];
            let [x0, x1, y0, y1] = stencil.neighbors(values, index, &cursor);

            *delta += ((x0 + x1 - 2.0 * v) * tx + (y0 + y1 - 2.0 * v) * ty) * rate;
            cursor.advance();
        }
    });

    Ok(())
}

/// Accumulate the diffusion rate of a 3D scalar field into `deltas`
///
/// # Errors
/// Returns [`FieldError::ResolutionMismatch`] if `deltas` is not one entry
/// per sample
pub fn diffuse_3d(
    field: &Field3<f64>,
    deltas: &mut [f64],
    rate: f64,
    parallel: bool,
) -> Result<(), FieldError> {
    let grid = field.grid();
    let values = field.values();
    FieldError::check_len(values.len(), deltas.len())?;

    let stencil = Stencil3::new(grid);
    let inv = grid.spacing_inv();
    let (tx, ty, tz) = (inv.x * inv.x, inv.y * inv.y, inv.z * inv.z);

    for_each_partition(deltas, parallel, |start, chunk| {
        trace!("diffuse_3d partition start={} len={}", start, chunk.len());
        let mut cursor = Cursor3::new(grid, start);

        for (offset, delta) in chunk.iter_mut().enumerate() {
            let index = start + offset;
            let v = values[index];
            let [x0, x1, y0, y1, z0, z1] = stencil.neighbors(values, index, &cursor);

            *delta += ((x0 + x1 - 2.0 * v) * tx
                + (y0 + y1 - 2.0 * v) * ty
                + (z0 + z1 - 2.0 * v) * tz)
                * rate;
            cursor.advance();
        }
    });

    Ok(())
}
