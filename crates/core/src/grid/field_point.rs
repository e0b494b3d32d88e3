//! Interpolation query results
//!
//! A field point holds the flat indices of the samples surrounding a query
//! position ("corners") and the fractional position of the query inside that
//! cell along each axis. Corner order is x-fastest: in 2D `(0,0), (1,0),
//! (0,1), (1,1)`; in 3D the same four followed by the four on the upper z
//! layer.
//!
//! Under [`BoundaryType::Constant`](super::BoundaryType::Constant) a corner
//! outside the grid holds the sentinel index `count` (one past the last
//! sample) and its bit in `mask` is set. Consumers must treat that corner as
//! the field's constant boundary value.

use serde::{Deserialize, Serialize};

/// Interpolation corners and weights for a 2D query
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FieldPoint2 {
    /// Flat indices of the 4 surrounding samples
    pub corners: [usize; 4],
    /// Fractional position along x and y, each in `[0, 1)`
    pub weights: [f64; 2],
    /// Bit `c` set if corner `c` is out of range (Constant policy only)
    pub mask: u8,
}

impl FieldPoint2 {
    /// Bilinear weight of each corner
    #[must_use]
    pub fn corner_weights(&self) -> [f64; 4] {
        let [u, v] = self.weights;
        let (u0, v0) = (1.0 - u, 1.0 - v);
        [u0 * v0, u * v0, u0 * v, u * v]
    }

    /// True if corner `corner` holds the out-of-range sentinel
    #[inline]
    #[must_use]
    pub fn is_out(&self, corner: usize) -> bool {
        self.mask & (1 << corner) != 0
    }
}

/// Interpolation corners and weights for a 3D query
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FieldPoint3 {
    /// Flat indices of the 8 surrounding samples
    pub corners: [usize; 8],
    /// Fractional position along x, y and z, each in `[0, 1)`
    pub weights: [f64; 3],
    /// Bit `c` set if corner `c` is out of range (Constant policy only)
    pub mask: u8,
}

impl FieldPoint3 {
    /// Trilinear weight of each corner
    #[must_use]
    pub fn corner_weights(&self) -> [f64; 8] {
        let [u, v, w] = self.weights;
        let (u0, v0, w0) = (1.0 - u, 1.0 - v, 1.0 - w);
        [
            u0 * v0 * w0,
            u * v0 * w0,
            u0 * v * w0,
            u * v * w0,
            u0 * v0 * w,
            u * v0 * w,
            u0 * v * w,
            u * v * w,
        ]
    }

    /// True if corner `corner` holds the out-of-range sentinel
    #[inline]
    #[must_use]
    pub fn is_out(&self, corner: usize) -> bool {
        self.mask & (1 << corner) != 0
    }
}

/// Split `t` into its fractional part and floor
///
/// The floor saturates at the `isize` range. A non-finite `t` has no
/// fractional part, so its weight is zero.
#[inline]
pub(crate) fn fract(t: f64) -> (f64, isize) {
    let whole = t.floor();
    let frac = t - whole;
    (if frac.is_finite() { frac } else { 0.0 }, whole as isize)
}
