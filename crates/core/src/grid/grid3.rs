//! Regular 3D sample grid over a box domain
//!
//! Same conventions as [`Grid2`](super::Grid2) with a third axis: flat
//! indices are `i + j * count_x + k * count_x * count_y`.

use super::boundary::{contains, BoundaryType};
use super::config::GridConfig3;
use super::field_point::{fract, FieldPoint3};
use super::grid2::check_count;
use super::partition::{for_each_partition, Cursor3};
use crate::core_types::{Domain3, FieldError, Vec3};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Regular 3D grid geometry with boundary-aware lookups
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GridConfig3", into = "GridConfig3")]
pub struct Grid3 {
    domain: Domain3,
    boundary_type: BoundaryType,
    nx: usize,
    ny: usize,
    nz: usize,
    nxy: usize,
    n: usize,
    origin: Vec3,
    spacing: Vec3,
    spacing_inv: Vec3,
}

impl Grid3 {
    /// Create a grid with the default [`BoundaryType::Equal`] policy
    ///
    /// # Errors
    /// Returns an error if the domain is degenerate or any count is below 2
    pub fn new(
        domain: Domain3,
        count_x: usize,
        count_y: usize,
        count_z: usize,
    ) -> Result<Self, FieldError> {
        Self::with_boundary(domain, count_x, count_y, count_z, BoundaryType::default())
    }

    /// Create a grid with an explicit boundary policy
    ///
    /// # Errors
    /// Returns an error if the domain is degenerate or any count is below 2
    pub fn with_boundary(
        domain: Domain3,
        count_x: usize,
        count_y: usize,
        count_z: usize,
        boundary_type: BoundaryType,
    ) -> Result<Self, FieldError> {
        check_count("x", count_x)?;
        check_count("y", count_y)?;
        check_count("z", count_z)?;
        domain.validate()?;

        let nxy = count_x * count_y;
        let mut grid = Self {
            domain,
            boundary_type,
            nx: count_x,
            ny: count_y,
            nz: count_z,
            nxy,
            n: nxy * count_z,
            origin: Vec3::zeros(),
            spacing: Vec3::zeros(),
            spacing_inv: Vec3::zeros(),
        };
        grid.on_domain_change();

        debug!(
            "Created {}x{}x{} grid, spacing=({:.4}, {:.4}, {:.4}), boundary={:?}",
            count_x,
            count_y,
            count_z,
            grid.spacing.x,
            grid.spacing.y,
            grid.spacing.z,
            boundary_type
        );

        Ok(grid)
    }

    fn on_domain_change(&mut self) {
        self.origin = self.domain.min();
        self.spacing = Vec3::new(
            self.domain.x.span() / (self.nx - 1) as f64,
            self.domain.y.span() / (self.ny - 1) as f64,
            self.domain.z.span() / (self.nz - 1) as f64,
        );
        self.spacing_inv = self.spacing.map(|s| 1.0 / s);
    }

    /// World-space domain of the grid
    #[must_use]
    pub fn domain(&self) -> &Domain3 {
        &self.domain
    }

    /// Replace the domain, recomputing spacing and origin
    ///
    /// # Errors
    /// Returns [`FieldError::InvalidDomain`] and leaves the grid unchanged if
    /// the new domain is degenerate
    pub fn set_domain(&mut self, domain: Domain3) -> Result<(), FieldError> {
        domain.validate()?;
        self.domain = domain;
        self.on_domain_change();
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

    /// Number of samples along z
    #[inline]
    #[must_use]
    pub fn count_z(&self) -> usize {
        self.nz
    }

    /// Number of samples in one xy layer
    #[inline]
    #[must_use]
    pub fn count_xy(&self) -> usize {
        self.nxy
    }

    #[must_use]
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    #[must_use]
    pub fn spacing(&self) -> Vec3 {
        self.spacing
    }

    #[must_use]
    pub fn spacing_inv(&self) -> Vec3 {
        self.spacing_inv
    }

    /// True if both grids have the same number of samples along each axis
    #[must_use]
    pub fn resolution_equals(&self, other: &Grid3) -> bool {
        self.nx == other.nx && self.ny == other.ny && self.nz == other.nz
    }

    /// True if `(i, j, k)` addresses a sample of this grid
    #[inline]
    #[must_use]
    pub fn contains_index(&self, i: isize, j: isize, k: isize) -> bool {
        contains(i, self.nx) && contains(j, self.ny) && contains(k, self.nz)
    }

    /// Convert a 3D index to a flat index
    #[inline]
    #[must_use]
    pub fn flatten_index(&self, i: usize, j: usize, k: usize) -> usize {
        i + j * self.nx + k * self.nxy
    }

    /// Convert a flat index to a 3D index
    #[inline]
    #[must_use]
    pub fn expand_index(&self, index: usize) -> (usize, usize, usize) {
        let k = index / self.nxy;
        let rem = index - k * self.nxy;
        (rem % self.nx, rem / self.nx, k)
    }

    /// World coordinate of sample `(i, j, k)`
    #[inline]
    #[must_use]
    pub fn coordinate_at(&self, i: usize, j: usize, k: usize) -> Vec3 {
        Vec3::new(
            i as f64 * self.spacing.x + self.origin.x,
            j as f64 * self.spacing.y + self.origin.y,
            k as f64 * self.spacing.z + self.origin.z,
        )
    }

    #[inline]
    fn to_grid_space(&self, point: Vec3) -> Vec3 {
        (point - self.origin).component_mul(&self.spacing_inv)
    }

    #[inline]
    fn rounded(&self, point: Vec3) -> (isize, isize, isize) {
        let g = self.to_grid_space(point);
        (
            g.x.round() as isize,
            g.y.round() as isize,
            g.z.round() as isize,
        )
    }

    /// 3D index of the sample nearest to `point`, resolved by the boundary policy
    ///
    /// Under [`BoundaryType::Constant`] a point outside the grid resolves to
    /// the sentinel `(count_x, count_y, count_z)`.
    #[must_use]
    pub fn index3_at(&self, point: Vec3) -> (usize, usize, usize) {
        let (i, j, k) = self.rounded(point);
        let b = self.boundary_type;
        match (
            b.resolve_index(i, self.nx),
            b.resolve_index(j, self.ny),
            b.resolve_index(k, self.nz),
        ) {
            (Some(i), Some(j), Some(k)) => (i, j, k),
            _ => (self.nx, self.ny, self.nz),
        }
    }

    /// 3D index of the sample nearest to `point` without boundary handling
    #[must_use]
    pub fn index3_at_unchecked(&self, point: Vec3) -> (usize, usize, usize) {
        let (i, j, k) = self.rounded(point);
        (i as usize, j as usize, k as usize)
    }

    /// Flat index of the sample nearest to `point`, resolved by the boundary policy
    ///
    /// Under [`BoundaryType::Constant`] a point outside the grid resolves to
    /// the sentinel [`Grid3::count`].
    #[must_use]
    pub fn index_at(&self, point: Vec3) -> usize {
        let (i, j, k) = self.index3_at(point);
        if i == self.nx {
            self.n
        } else {
            self.flatten_index(i, j, k)
        }
    }

    /// Flat index of the sample nearest to `point` without boundary handling
    #[must_use]
    pub fn index_at_unchecked(&self, point: Vec3) -> usize {
        let (i, j, k) = self.rounded(point);
        (i + j * self.nx as isize + k * self.nxy as isize) as usize
    }

    /// Interpolation corners and weights at `point`, resolved by the boundary policy
    #[must_use]
    pub fn field_point_at(&self, point: Vec3) -> FieldPoint3 {
        let g = self.to_grid_space(point);
        let (wu, i) = fract(g.x);
        let (wv, j) = fract(g.y);
        let (ww, k) = fract(g.z);

        let b = self.boundary_type;
        let ax = b.resolve_corners(i, self.nx);
        let ay = b.resolve_corners(j, self.ny);
        let az = b.resolve_corners(k, self.nz);

        let mut result = FieldPoint3 {
            weights: [wu, wv, ww],
            ..FieldPoint3::default()
        };

        for (c, corner) in result.corners.iter_mut().enumerate() {
            let (hi_x, hi_y, hi_z) = (c & 1 != 0, c & 2 != 0, c & 4 != 0);

            if ax.is_out(hi_x) || ay.is_out(hi_y) || az.is_out(hi_z) {
                *corner = self.n;
                result.mask |= 1 << c;
            } else {
                *corner = (ax.coordinate(hi_x)
                    + ay.coordinate(hi_y) * self.nx as isize
                    + az.coordinate(hi_z) * self.nxy as isize) as usize;
            }
        }

        result
    }

    /// Interpolation corners and weights at `point` without boundary handling
    #[must_use]
    pub fn field_point_at_unchecked(&self, point: Vec3) -> FieldPoint3 {
        let g = self.to_grid_space(point);
        let (wu, i) = fract(g.x);
        let (wv, j) = fract(g.y);
        let (ww, k) = fract(g.z);

        let index = (i + j * self.nx as isize + k * self.nxy as isize) as usize;
        let (dx, dy, dz) = (1, self.nx, self.nxy);
        FieldPoint3 {
            corners: [
                index,
                index + dx,
                index + dy,
                index + dx + dy,
                index + dz,
                index + dx + dz,
                index + dy + dz,
                index + dx + dy + dz,
            ],
            weights: [wu, wv, ww],
            mask: 0,
        }
    }

    /// Lazily iterate the world coordinate of every sample in flat order
    #[must_use]
    pub fn coordinates(&self) -> Coordinates3<'_> {
        Coordinates3 {
            grid: self,
            index: 0,
            cursor: Cursor3::new(self, 0),
        }
    }

    /// Write the world coordinate of every sample into `out`
    ///
    /// # Errors
    /// Returns [`FieldError::ResolutionMismatch`] if `out` is not
    /// [`Grid3::count`] long
    pub fn coordinates_into(&self, out: &mut [Vec3], parallel: bool) -> Result<(), FieldError> {
        FieldError::check_len(self.n, out.len())?;

        for_each_partition(out, parallel, |start, chunk| {
            let mut cursor = Cursor3::new(self, start);
            for coord in chunk.iter_mut() {
                *coord = self.coordinate_at(cursor.i, cursor.j, cursor.k);
                cursor.advance();
            }
        });

        Ok(())
    }

    pub(crate) fn boundary_offsets(&self) -> (usize, usize, usize) {
        let b = self.boundary_type;
        (
            b.boundary_offset(1, self.nx),
            b.boundary_offset(self.nx, self.ny),
            b.boundary_offset(self.nxy, self.nz),
        )
    }
}

/// Iterator over the world coordinates of a [`Grid3`], see [`Grid3::coordinates`]
#[derive(Debug, Clone)]
pub struct Coordinates3<'a> {
    grid: &'a Grid3,
    index: usize,
    cursor: Cursor3,
}

impl Iterator for Coordinates3<'_> {
    type Item = Vec3;

    fn next(&mut self) -> Option<Vec3> {
        if self.index >= self.grid.n {
            return None;
        }

        let c = self.cursor;
        self.cursor.advance();
        self.index += 1;
        Some(self.grid.coordinate_at(c.i, c.j, c.k))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.grid.n - self.index;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Coordinates3<'_> {}
