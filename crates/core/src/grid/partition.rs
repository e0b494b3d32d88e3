//! Range partitioning for data-parallel field kernels
//!
//! Kernels run over contiguous chunks of the flat index range. Each chunk
//! recovers its starting grid coordinate once and then advances a cursor
//! cell by cell, carrying into the next axis on overflow. Every cell is
//! computed by exactly one chunk from the same inputs, so sequential and
//! parallel runs produce bit-identical output.

use super::grid2::Grid2;
use super::grid3::Grid3;
use rayon::prelude::*;

/// Number of cells processed per parallel chunk
pub const PARALLEL_CHUNK_LEN: usize = 1024;

/// Run `kernel(start, chunk)` over `buffer`, split into chunks when `parallel`
///
/// In sequential mode the kernel sees the whole buffer as one chunk starting
/// at index 0.
pub(crate) fn for_each_partition<T, F>(buffer: &mut [T], parallel: bool, kernel: F)
where
    T: Send,
    F: Fn(usize, &mut [T]) + Sync,
{
    if parallel {
        buffer
            .par_chunks_mut(PARALLEL_CHUNK_LEN)
            .enumerate()
            .for_each(|(chunk, slice)| kernel(chunk * PARALLEL_CHUNK_LEN, slice));
    } else {
        kernel(0, buffer);
    }
}

/// Incremental 2D grid coordinate tracking a flat index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Cursor2 {
    pub i: usize,
    pub j: usize,
    nx: usize,
}

impl Cursor2 {
    /// Cursor positioned at flat index `start`
    pub fn new(grid: &Grid2, start: usize) -> Self {
        let (i, j) = grid.expand_index(start);
        Self {
            i,
            j,
            nx: grid.count_x(),
        }
    }

    /// Cursor at a known `(i, j)` on a grid with `nx` samples per row
    #[inline]
    pub fn at(i: usize, j: usize, nx: usize) -> Self {
        Self { i, j, nx }
    }

    /// Step to the next flat index
    #[inline]
    pub fn advance(&mut self) {
        self.i += 1;
        if self.i == self.nx {
            self.i = 0;
            self.j += 1;
        }
    }
}

/// Incremental 3D grid coordinate tracking a flat index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Cursor3 {
    pub i: usize,
    pub j: usize,
    pub k: usize,
    nx: usize,
    ny: usize,
}

impl Cursor3 {
    /// Cursor positioned at flat index `start`
    pub fn new(grid: &Grid3, start: usize) -> Self {
        let (i, j, k) = grid.expand_index(start);
        Self {
            i,
            j,
            k,
            nx: grid.count_x(),
            ny: grid.count_y(),
        }
    }

    /// Step to the next flat index
    #[inline]
    pub fn advance(&mut self) {
        self.i += 1;
        if self.i == self.nx {
            self.i = 0;
            self.j += 1;
            if self.j == self.ny {
                self.j = 0;
                self.k += 1;
            }
        }
    }
}
