//! Boundary policies for resolving out-of-range grid coordinates
//!
//! A field's boundary type decides what happens when a lookup, an
//! interpolation or a stencil reaches past the edge of the grid:
//!
//! - [`BoundaryType::Constant`]: values outside the grid are a single constant.
//!   Lookups resolve to a sentinel index one past the last sample.
//! - [`BoundaryType::Equal`]: values outside the grid equal the nearest edge
//!   value (clamp).
//! - [`BoundaryType::Periodic`]: the grid tiles space (wrap).
//!
//! All functions here are pure and operate on one axis at a time. The grid
//! types combine them per axis.

use serde::{Deserialize, Serialize};

/// Rule for resolving grid coordinates that fall outside `[0, count)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BoundaryType {
    /// Out-of-range samples read a constant boundary value
    Constant,
    /// Out-of-range samples read the nearest edge sample
    #[default]
    Equal,
    /// Out-of-range samples wrap around to the opposite edge
    Periodic,
}

/// Per-axis result of field-point corner resolution
///
/// `i0` is the resolved lower corner coordinate and `step` the offset (in
/// axis units) to the upper corner. Under [`BoundaryType::Constant`] the
/// coordinate is left unresolved and `lo_out`/`hi_out` flag which of the two
/// corners fall outside the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct AxisCorners {
    pub i0: isize,
    pub step: isize,
    pub lo_out: bool,
    pub hi_out: bool,
}

impl AxisCorners {
    /// Coordinate of the lower (`upper == false`) or upper corner
    #[inline]
    pub fn coordinate(&self, upper: bool) -> isize {
        if upper {
            self.i0 + self.step
        } else {
            self.i0
        }
    }

    /// True if the selected corner lies outside the grid
    #[inline]
    pub fn is_out(&self, upper: bool) -> bool {
        if upper {
            self.hi_out
        } else {
            self.lo_out
        }
    }
}

/// True if `i` lies in `[0, count)`
#[inline]
#[must_use]
pub fn contains(i: isize, count: usize) -> bool {
    i >= 0 && (i as usize) < count
}

/// Clamp `i` to `[0, count - 1]`
#[inline]
#[must_use]
pub fn clamp_index(i: isize, count: usize) -> usize {
    if i < 0 {
        0
    } else {
        (i as usize).min(count - 1)
    }
}

/// Wrap `i` into `[0, count)`, handling negative values
#[inline]
#[must_use]
pub fn wrap_index(i: isize, count: usize) -> usize {
    i.rem_euclid(count as isize) as usize
}

impl BoundaryType {
    /// Resolve a rounded grid coordinate on one axis
    ///
    /// Returns `None` under [`BoundaryType::Constant`] when `i` lies outside
    /// the grid, meaning "use the boundary value".
    #[must_use]
    pub fn resolve_index(self, i: isize, count: usize) -> Option<usize> {
        match self {
            BoundaryType::Constant => contains(i, count).then_some(i as usize),
            BoundaryType::Equal => Some(clamp_index(i, count)),
            BoundaryType::Periodic => Some(wrap_index(i, count)),
        }
    }

    /// Resolve the two interpolation corners `i` and `i + 1` on one axis
    pub(crate) fn resolve_corners(self, i: isize, count: usize) -> AxisCorners {
        let last = count as isize - 1;

        match self {
            BoundaryType::Constant => AxisCorners {
                i0: i,
                step: 1,
                lo_out: !contains(i, count),
                hi_out: !i.checked_add(1).is_some_and(|n| contains(n, count)),
            },
            BoundaryType::Equal => {
                // a clamped axis duplicates the edge sample instead of reading past it
                let (i0, step) = if i < 0 {
                    (0, 0)
                } else if i >= last {
                    (last, 0)
                } else {
                    (i, 1)
                };

                AxisCorners {
                    i0,
                    step,
                    lo_out: false,
                    hi_out: false,
                }
            }
            BoundaryType::Periodic => {
                let i0 = wrap_index(i, count) as isize;
                let step = if i0 == last { 1 - count as isize } else { 1 };

                AxisCorners {
                    i0,
                    step,
                    lo_out: false,
                    hi_out: false,
                }
            }
        }
    }

    /// Flat-index offset used by stencils on an edge cell of one axis
    ///
    /// On the low edge a stencil reads `index + offset` in place of the
    /// missing lower neighbour; on the high edge it reads `index - offset`.
    ///
    /// - Constant: `0`, the cell reads itself so the edge adds no flux.
    /// - Equal: one `stride`, reflecting to the opposite neighbour.
    /// - Periodic: `stride * (count - 1)`, wrapping to the far edge.
    #[must_use]
    pub fn boundary_offset(self, stride: usize, count: usize) -> usize {
        match self {
            BoundaryType::Constant => 0,
            BoundaryType::Equal => stride,
            BoundaryType::Periodic => stride * (count - 1),
        }
    }
}
