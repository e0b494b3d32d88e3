//! Axis-neighbour lookup shared by the grid operators
//!
//! At an edge cell the missing neighbour is read at `index ± offset`, with
//! the offset taken from the grid's boundary policy (see
//! [`BoundaryType::boundary_offset`](crate::grid::BoundaryType::boundary_offset)).

use crate::grid::partition::{Cursor2, Cursor3};
use crate::grid::{Grid2, Grid3};

/// Precomputed per-axis strides and edge offsets for a 2D grid
#[derive(Debug, Clone, Copy)]
pub(crate) struct Stencil2 {
    nx: usize,
    ny: usize,
    di: usize,
    dj: usize,
}

impl Stencil2 {
    pub fn new(grid: &Grid2) -> Self {
        let (di, dj) = grid.boundary_offsets();
        Self {
            nx: grid.count_x(),
            ny: grid.count_y(),
            di,
            dj,
        }
    }

    /// Neighbour samples `[x-, x+, y-, y+]` of the cell at `index`
    #[inline]
    pub fn neighbors(&self, values: &[f64], index: usize, cursor: &Cursor2) -> [f64; 4] {
        let x0 = if cursor.i == 0 {
            values[index + self.di]
        } else {
            values[index - 1]
        };
        let x1 = if cursor.i == self.nx - 1 {
            values[index - self.di]
        } else {
            values[index + 1]
        };
        let y0 = if cursor.j == 0 {
            values[index + self.dj]
        } else {
            values[index - self.nx]
        };
        let y1 = if cursor.j == self.ny - 1 {
            values[index - self.dj]
        } else {
            values[index + self.nx]
        };
        [x0, x1, y0, y1]
    }
}

/// Precomputed per-axis strides and edge offsets for a 3D grid
#[derive(Debug, Clone, Copy)]
pub(crate) struct Stencil3 {
    xy: Stencil2,
    nxy: usize,
    nz: usize,
    dk: usize,
}

impl Stencil3 {
    pub fn new(grid: &Grid3) -> Self {
        let (di, dj, dk) = grid.boundary_offsets();
        Self {
            xy: Stencil2 {
                nx: grid.count_x(),
                ny: grid.count_y(),
                di,
                dj,
            },
            nxy: grid.count_xy(),
            nz: grid.count_z(),
            dk,
        }
    }

    /// Neighbour samples `[x-, x+, y-, y+, z-, z+]` of the cell at `index`
    #[inline]
    pub fn neighbors(&self, values: &[f64], index: usize, cursor: &Cursor3) -> [f64; 6] {
        let planar = Cursor2::at(cursor.i, cursor.j, self.xy.nx);
        let [x0, x1, y0, y1] = self.xy.neighbors(values, index, &planar);
        let z0 = if cursor.k == 0 {
            values[index + self.dk]
        } else {
            values[index - self.nxy]
        };
        let z1 = if cursor.k == self.nz - 1 {
            values[index - self.dk]
        } else {
            values[index + self.nxy]
        };
        [x0, x1, y0, y1, z0, z1]
    }
}
