//! Regular 2D sample grid over a rectangular domain
//!
//! [`Grid2`] owns the mapping between world coordinates, 2D grid indices and
//! flat sample indices. Samples are ordered row-major with x varying fastest:
//! `index = i + j * count_x`. The first sample sits on the domain minimum and
//! the last on the domain maximum, so the spacing along an axis is
//! `span / (count - 1)`.
//!
//! The resolution is fixed at construction. The domain and boundary type can
//! be replaced at any time; replacing the domain recomputes origin, spacing
//! and inverse spacing in one step and never touches samples.

use super::boundary::{contains, BoundaryType};
use super::config::GridConfig2;
use super::field_point::{fract, FieldPoint2};
use super::partition::{for_each_partition, Cursor2};
use crate::core_types::{Domain2, FieldError, Vec2};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Validate a per-axis sample count
pub(crate) fn check_count(axis: &'static str, count: usize) -> Result<(), FieldError> {
    if count < 2 {
        return Err(FieldError::InvalidResolution { axis, count });
    }
    Ok(())
}

/// Regular 2D grid geometry with boundary-aware lookups
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GridConfig2", into = "GridConfig2")]
pub struct Grid2 {
    domain: Domain2,
    boundary_type: BoundaryType,
    nx: usize,
    ny: usize,
    n: usize,
    origin: Vec2,
    spacing: Vec2,
    spacing_inv: Vec2,
}

impl Grid2 {
    /// Create a grid with the default [`BoundaryType::Equal`] policy
    ///
    /// # Errors
    /// Returns an error if the domain is degenerate or either count is below 2
    pub fn new(domain: Domain2, count_x: usize, count_y: usize) -> Result<Self, FieldError> {
        Self::with_boundary(domain, count_x, count_y, BoundaryType::default())
    }

    /// Create a grid with an explicit boundary policy
    ///
    /// # Errors
    /// Returns an error if the domain is degenerate or either count is below 2
    pub fn with_boundary(
        domain: Domain2,
        count_x: usize,
        count_y: usize,
        boundary_type: BoundaryType,
    ) -> Result<Self, FieldError> {
        check_count("x", count_x)?;
        check_count("y", count_y)?;
        domain.validate()?;

        let mut grid = Self {
            domain,
            boundary_type,
            nx: count_x,
            ny: count_y,
            n: count_x * count_y,
            origin: Vec2::zeros(),
            spacing: Vec2::zeros(),
            spacing_inv: Vec2::zeros(),
        };
        grid.on_domain_change();

        debug!(
            "Created {}x{} grid, spacing=({:.4}, {:.4}), boundary={:?}",
            count_x, count_y, grid.spacing.x, grid.spacing.y, boundary_type
        );

        Ok(grid)
    }

    fn on_domain_change(&mut self) {
        self.origin = self.domain.min();
        self.spacing = Vec2::new(
            self.domain.x.span() / (self.nx - 1) as f64,
            self.domain.y.span() / (self.ny - 1) as f64,
        );
        self.spacing_inv = Vec2::new(1.0 / self.spacing.x, 1.0 / self.spacing.y);
    }

    /// World-space domain of the grid
    #[must_use]
    pub fn domain(&self) -> &Domain2 {
        &self.domain
    }

    /// Replace the domain, recomputing spacing and origin
    ///
    /// Samples are not resized or moved; only the world-to-index mapping
    /// changes.
    ///
    /// # Errors
    /// Returns [`FieldError::InvalidDomain`] and leaves the grid unchanged if
    /// the new domain is degenerate
    pub fn set_domain(&mut self, domain: Domain2) -> Result<(), FieldError> {
        domain.validate()?;
        self.domain = domain;
        self.on_domain_change();
        debug!(
            "Grid domain changed, spacing=({:.4}, {:.4})",
            self.spacing.x, self.spacing.y
        );
        Ok(())
    }

    /// Active boundary policy
    #[must_use]
    pub fn boundary_type(&self) -> BoundaryType {
        self.boundary_type
    }

    /// Replace the boundary policy
    pub fn set_boundary_type(&mut self, boundary_type: BoundaryType) {
        self.boundary_type = boundary_type;
    }

    /// Total number of samples
    #[inline]
    #[must_use]
    pub fn count(&self) -> usize {
        self.n
    }

    /// Number of samples along x
    #[inline]
    #[must_use]
    pub fn count_x(&self) -> usize {
        self.nx
    }

    /// Number of samples along y
    #[inline]
    #[must_use]
    pub fn count_y(&self) -> usize {
        self.ny
    }

    /// World position of sample `(0, 0)`
    #[must_use]
    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    /// Distance between adjacent samples along each axis
    #[must_use]
    pub fn spacing(&self) -> Vec2 {
        self.spacing
    }

    /// Reciprocal of [`Grid2::spacing`]
    #[must_use]
    pub fn spacing_inv(&self) -> Vec2 {
        self.spacing_inv
    }

    /// True if both grids have the same number of samples along each axis
    #[must_use]
    pub fn resolution_equals(&self, other: &Grid2) -> bool {
        self.nx == other.nx && self.ny == other.ny
    }

    /// True if `(i, j)` addresses a sample of this grid
    #[inline]
    #[must_use]
    pub fn contains_index(&self, i: isize, j: isize) -> bool {
        contains(i, self.nx) && contains(j, self.ny)
    }

    /// Convert a 2D index to a flat index
    #[inline]
    #[must_use]
    pub fn flatten_index(&self, i: usize, j: usize) -> usize {
        i + j * self.nx
    }

    /// Convert a flat index to a 2D index
    #[inline]
    #[must_use]
    pub fn expand_index(&self, index: usize) -> (usize, usize) {
        (index % self.nx, index / self.nx)
    }

    /// World coordinate of sample `(i, j)`
    #[inline]
    #[must_use]
    pub fn coordinate_at(&self, i: usize, j: usize) -> Vec2 {
        Vec2::new(
            i as f64 * self.spacing.x + self.origin.x,
            j as f64 * self.spacing.y + self.origin.y,
        )
    }

    #[inline]
    fn to_grid_space(&self, point: Vec2) -> (f64, f64) {
        (
            (point.x - self.origin.x) * self.spacing_inv.x,
            (point.y - self.origin.y) * self.spacing_inv.y,
        )
    }

    #[inline]
    fn rounded(&self, point: Vec2) -> (isize, isize) {
        let (u, v) = self.to_grid_space(point);
        (u.round() as isize, v.round() as isize)
    }

    /// 2D index of the sample nearest to `point`, resolved by the boundary policy
    ///
    /// Under [`BoundaryType::Constant`] a point outside the grid resolves to
    /// the sentinel `(count_x, count_y)`.
    #[must_use]
    pub fn index2_at(&self, point: Vec2) -> (usize, usize) {
        let (i, j) = self.rounded(point);
        match (
            self.boundary_type.resolve_index(i, self.nx),
            self.boundary_type.resolve_index(j, self.ny),
        ) {
            (Some(i), Some(j)) => (i, j),
            _ => (self.nx, self.ny),
        }
    }

    /// 2D index of the sample nearest to `point` without boundary handling
    ///
    /// Only meaningful for points inside the domain.
    #[must_use]
    pub fn index2_at_unchecked(&self, point: Vec2) -> (usize, usize) {
        let (i, j) = self.rounded(point);
        (i as usize, j as usize)
    }

    /// Flat index of the sample nearest to `point`, resolved by the boundary policy
    ///
    /// Under [`BoundaryType::Constant`] a point outside the grid resolves to
    /// the sentinel [`Grid2::count`].
    #[must_use]
    pub fn index_at(&self, point: Vec2) -> usize {
        let (i, j) = self.index2_at(point);
        if i == self.nx {
            self.n
        } else {
            self.flatten_index(i, j)
        }
    }

    /// Flat index of the sample nearest to `point` without boundary handling
    #[must_use]
    pub fn index_at_unchecked(&self, point: Vec2) -> usize {
        let (i, j) = self.rounded(point);
        (i + j * self.nx as isize) as usize
    }

    /// Interpolation corners and weights at `point`, resolved by the boundary policy
    #[must_use]
    pub fn field_point_at(&self, point: Vec2) -> FieldPoint2 {
        let (u, v) = self.to_grid_space(point);
        let (wu, i) = fract(u);
        let (wv, j) = fract(v);

        let ax = self.boundary_type.resolve_corners(i, self.nx);
        let ay = self.boundary_type.resolve_corners(j, self.ny);

        let mut result = FieldPoint2 {
            weights: [wu, wv],
            ..FieldPoint2::default()
        };

        for (c, corner) in result.corners.iter_mut().enumerate() {
            let (hi_x, hi_y) = (c & 1 != 0, c & 2 != 0);

            if ax.is_out(hi_x) || ay.is_out(hi_y) {
                *corner = self.n;
                result.mask |= 1 << c;
            } else {
                *corner =
                    (ax.coordinate(hi_x) + ay.coordinate(hi_y) * self.nx as isize) as usize;
            }
        }

        result
    }

    /// Interpolation corners and weights at `point` without boundary handling
    ///
    /// Only meaningful for points strictly inside the domain.
    #[must_use]
    pub fn field_point_at_unchecked(&self, point: Vec2) -> FieldPoint2 {
        let (u, v) = self.to_grid_space(point);
        let (wu, i) = fract(u);
        let (wv, j) = fract(v);

        let index = (i + j * self.nx as isize) as usize;
        FieldPoint2 {
            corners: [index, index + 1, index + self.nx, index + 1 + self.nx],
            weights: [wu, wv],
            mask: 0,
        }
    }

    /// Lazily iterate the world coordinate of every sample in flat order
    ///
    /// Each call starts a fresh pass over the grid.
    #[must_use]
    pub fn coordinates(&self) -> Coordinates2<'_> {
        Coordinates2 {
            grid: self,
            index: 0,
            cursor: Cursor2::new(self, 0),
        }
    }

    /// Write the world coordinate of every sample into `out`
    ///
    /// # Errors
    /// Returns [`FieldError::ResolutionMismatch`] if `out` is not
    /// [`Grid2::count`] long
    pub fn coordinates_into(&self, out: &mut [Vec2], parallel: bool) -> Result<(), FieldError> {
        FieldError::check_len(self.n, out.len())?;

        for_each_partition(out, parallel, |start, chunk| {
            let mut cursor = Cursor2::new(self, start);
            for coord in chunk.iter_mut() {
                *coord = self.coordinate_at(cursor.i, cursor.j);
                cursor.advance();
            }
        });

        Ok(())
    }

    /// Per-axis stencil offsets for edge cells under the active policy
    pub(crate) fn boundary_offsets(&self) -> (usize, usize) {
        (
            self.boundary_type.boundary_offset(1, self.nx),
            self.boundary_type.boundary_offset(self.nx, self.ny),
        )
    }
}

/// Iterator over the world coordinates of a [`Grid2`], see [`Grid2::coordinates`]
#[derive(Debug, Clone)]
pub struct Coordinates2<'a> {
    grid: &'a Grid2,
    index: usize,
    cursor: Cursor2,
}

impl Iterator for Coordinates2<'_> {
    type Item = Vec2;

    fn next(&mut self) -> Option<Vec2> {
        if self.index >= self.grid.n {
            return None;
        }

        let coord = self.grid.coordinate_at(self.cursor.i, self.cursor.j);
        self.cursor.advance();
        self.index += 1;
        Some(coord)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.grid.n - self.index;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Coordinates2<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit_grid(nx: usize, ny: usize, boundary: BoundaryType) -> Grid2 {
        // spacing of exactly 1 along both axes
        let domain = Domain2::from_bounds(
            Vec2::zeros(),
            Vec2::new((nx - 1) as f64, (ny - 1) as f64),
        );
        Grid2::with_boundary(domain, nx, ny, boundary).unwrap()
    }

    #[test]
    fn test_grid_creation() {
        let grid = unit_grid(5, 4, BoundaryType::Equal);
        assert_eq!(grid.count(), 20);
        assert_eq!(grid.spacing(), Vec2::new(1.0, 1.0));
        assert_eq!(grid.boundary_type(), BoundaryType::Equal);
    }

    #[test]
    fn test_invalid_resolution() {
        let domain = Domain2::default();
        assert_eq!(
            Grid2::new(domain, 1, 4),
            Err(FieldError::InvalidResolution {
                axis: "x",
                count: 1
            })
        );
        assert!(Grid2::new(domain, 4, 0).is_err());
    }

    #[test]
    fn test_degenerate_domain() {
        let domain = Domain2::from_bounds(Vec2::new(1.0, 0.0), Vec2::new(1.0, 1.0));
        assert!(matches!(
            Grid2::new(domain, 4, 4),
            Err(FieldError::InvalidDomain(_))
        ));
    }

    #[test]
    fn test_set_domain_recomputes_spacing() {
        let mut grid = unit_grid(5, 3, BoundaryType::Equal);
        grid.set_domain(Domain2::from_bounds(Vec2::new(-4.0, 10.0), Vec2::new(4.0, 12.0)))
            .unwrap();
        assert_eq!(grid.origin(), Vec2::new(-4.0, 10.0));
        assert_eq!(grid.spacing(), Vec2::new(2.0, 1.0));
        assert_eq!(grid.spacing_inv(), Vec2::new(0.5, 1.0));
        assert_eq!(grid.coordinate_at(4, 2), Vec2::new(4.0, 12.0));
    }

    #[test]
    fn test_set_invalid_domain_leaves_grid_unchanged() {
        let mut grid = unit_grid(5, 3, BoundaryType::Equal);
        let before = grid.clone();
        let bad = Domain2::from_bounds(Vec2::new(0.0, 0.0), Vec2::new(-1.0, 1.0));
        assert!(grid.set_domain(bad).is_err());
        assert_eq!(grid, before);
    }

    #[test]
    fn test_flatten_expand_inverse() {
        let grid = unit_grid(7, 5, BoundaryType::Equal);
        for j in 0..5 {
            for i in 0..7 {
                let index = grid.flatten_index(i, j);
                assert_eq!(grid.expand_index(index), (i, j));
            }
        }
        for index in 0..grid.count() {
            let (i, j) = grid.expand_index(index);
            assert_eq!(grid.flatten_index(i, j), index);
        }
    }

    #[test]
    fn test_index_at_policies() {
        let mut grid = unit_grid(4, 4, BoundaryType::Equal);
        let outside = Vec2::new(-2.2, 5.9);

        assert_eq!(grid.index2_at(outside), (0, 3));

        grid.set_boundary_type(BoundaryType::Periodic);
        assert_eq!(grid.index2_at(outside), (2, 2));

        grid.set_boundary_type(BoundaryType::Constant);
        assert_eq!(grid.index2_at(outside), (4, 4));
        assert_eq!(grid.index_at(outside), grid.count());

        let inside = Vec2::new(1.4, 2.6);
        assert_eq!(grid.index_at(inside), grid.flatten_index(1, 3));
        assert_eq!(grid.index_at_unchecked(inside), grid.flatten_index(1, 3));
        assert_eq!(grid.index2_at_unchecked(inside), (1, 3));
    }

    #[test]
    fn test_field_point_unchecked_interior() {
        let grid = unit_grid(4, 4, BoundaryType::Equal);
        let point = grid.field_point_at_unchecked(Vec2::new(1.25, 2.5));
        assert_eq!(point.corners, [9, 10, 13, 14]);
        assert_relative_eq!(point.weights[0], 0.25);
        assert_relative_eq!(point.weights[1], 0.5);
        assert_eq!(grid.field_point_at(Vec2::new(1.25, 2.5)), point);
    }

    #[test]
    fn test_field_point_equal_clamps() {
        let grid = unit_grid(4, 3, BoundaryType::Equal);
        let point = grid.field_point_at(Vec2::new(-3.5, 7.2));
        // x clamps to column 0, y clamps to row 2
        assert_eq!(point.corners, [8, 8, 8, 8]);
        assert_eq!(point.mask, 0);
    }

    #[test]
    fn test_field_point_periodic_wraps() {
        let grid = unit_grid(4, 3, BoundaryType::Periodic);
        let point = grid.field_point_at(Vec2::new(3.5, 0.5));
        assert_eq!(point.corners, [3, 0, 7, 4]);

        let point = grid.field_point_at(Vec2::new(0.5, 2.5));
        assert_eq!(point.corners, [8, 9, 0, 1]);
    }

    #[test]
    fn test_field_point_constant_sentinel() {
        let grid = unit_grid(4, 3, BoundaryType::Constant);
        let point = grid.field_point_at(Vec2::new(3.5, 0.5));
        assert_eq!(point.corners, [3, 12, 7, 12]);
        assert_eq!(point.mask, 0b1010);

        let point = grid.field_point_at(Vec2::new(-0.5, -0.5));
        assert_eq!(point.corners, [12, 12, 12, 0]);
        assert_eq!(point.mask, 0b0111);
    }

    #[test]
    fn test_field_point_huge_coordinates() {
        let grid = unit_grid(4, 3, BoundaryType::Constant);
        for p in [
            Vec2::new(1e300, 1.0),
            Vec2::new(f64::MAX, 0.0),
            Vec2::new(-f64::MAX, 1.0),
        ] {
            let point = grid.field_point_at(p);
            assert_eq!(point.corners, [12; 4]);
            assert_eq!(point.mask, 0b1111);
        }

        for boundary in [BoundaryType::Equal, BoundaryType::Periodic] {
            let grid = unit_grid(4, 3, boundary);
            let point = grid.field_point_at(Vec2::new(f64::MAX, 1e300));
            assert!(point.corners.iter().all(|&c| c < grid.count()));
            assert!(point.weights.iter().all(|w| w.is_finite()));
        }
    }

    #[test]
    fn test_coordinates_restartable() {
        let grid = unit_grid(3, 2, BoundaryType::Equal);
        let first: Vec<Vec2> = grid.coordinates().collect();
        let second: Vec<Vec2> = grid.coordinates().collect();
        assert_eq!(first.len(), 6);
        assert_eq!(first, second);
        assert_eq!(first[4], Vec2::new(1.0, 1.0));
        assert_eq!(grid.coordinates().len(), 6);
    }

    #[test]
    fn test_coordinates_into_matches_iterator() {
        let grid = unit_grid(45, 31, BoundaryType::Equal);
        let mut out = vec![Vec2::zeros(); grid.count()];
        grid.coordinates_into(&mut out, true).unwrap();
        let expected: Vec<Vec2> = grid.coordinates().collect();
        assert_eq!(out, expected);

        let mut short = vec![Vec2::zeros(); 3];
        assert!(grid.coordinates_into(&mut short, false).is_err());
    }

    #[test]
    fn test_resolution_equals() {
        let a = unit_grid(4, 3, BoundaryType::Equal);
        let mut b = unit_grid(4, 3, BoundaryType::Periodic);
        b.set_domain(Domain2::from_bounds(Vec2::zeros(), Vec2::new(10.0, 10.0)))
            .unwrap();
        assert!(a.resolution_equals(&b));
        assert!(!a.resolution_equals(&unit_grid(3, 4, BoundaryType::Equal)));
    }
}
