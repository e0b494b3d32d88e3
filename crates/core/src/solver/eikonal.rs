//! Two-axis Eikonal update for fast marching
//!
//! Solves `|∇t| = w` on a cell whose upwind neighbours have arrival times
//! `x` (along x) and `y` (along y):
//!
//! ```text
//! (t − x)² / dx² + (t − y)² / dy² = w²
//! ```
//!
//! taking the larger root. With no real root the one-sided update along the
//! cheaper axis is used instead.

/// Precomputed coefficients for a fixed grid spacing
#[derive(Debug, Clone, Copy)]
pub(crate) struct Eikonal2 {
    dx: f64,
    dy: f64,
    tx: f64,
    ty: f64,
    a: f64,
}

impl Eikonal2 {
    pub fn new(dx: f64, dy: f64) -> Self {
        let tx = 1.0 / (dx * dx);
        let ty = 1.0 / (dy * dy);
        Self {
            dx,
            dy,
            tx,
            ty,
            a: tx + ty,
        }
    }

    /// Arrival time from neighbour times `x`, `y` and local cost `w`
    #[inline]
    pub fn solve(&self, x: f64, y: f64, w: f64) -> f64 {
        let b = -2.0 * (x * self.tx + y * self.ty);
        let c = x * x * self.tx + y * y * self.ty - w * w;
        let d = b * b - 4.0 * self.a * c;

        if d < 0.0 {
            (x + self.dx * w).min(y + self.dy * w)
        } else {
            (d.sqrt() - b) / (2.0 * self.a)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_equal_neighbours_diagonal_step() {
        let eikonal = Eikonal2::new(1.0, 1.0);
        assert_relative_eq!(eikonal.solve(1.0, 1.0, 1.0), 1.0 + 0.5_f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_plane_wave_along_x() {
        // y neighbour far behind: solution must not undercut x + dx w
        let eikonal = Eikonal2::new(0.5, 0.5);
        let t = eikonal.solve(2.0, 10.0, 1.0);
        assert_relative_eq!(t, 2.5);
    }

    #[test]
    fn test_anisotropic_spacing() {
        let eikonal = Eikonal2::new(2.0, 1.0);
        let t = eikonal.solve(0.0, 0.0, 1.0);
        // t²/4 + t² = 1
        assert_relative_eq!(t, (0.8_f64).sqrt(), epsilon = 1e-12);
    }
}
