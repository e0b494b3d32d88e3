//! Sampled fields over regular grids
//!
//! A field pairs grid geometry with one sample per grid point. Samples are
//! stored flat in the grid's index order. The sample vector is sized once at
//! construction and never reallocated; reassigning the domain or boundary
//! policy through [`Field2::grid_mut`] leaves the samples untouched.
//!
//! Fields deserialize through a plain data struct so a payload whose sample
//! count disagrees with its grid is rejected on load.

use super::config::{GridConfig2, GridConfig3};
use super::grid2::Grid2;
use super::grid3::Grid3;
use crate::core_types::{FieldError, FieldValue, Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Serialized form of a [`Field2`], validated on conversion
#[derive(Deserialize)]
struct FieldData2<T> {
    grid: Grid2,
    values: Vec<T>,
    boundary_value: T,
}

impl<T: FieldValue> TryFrom<FieldData2<T>> for Field2<T> {
    type Error = FieldError;

    fn try_from(data: FieldData2<T>) -> Result<Self, Self::Error> {
        let mut field = Self::with_values(data.grid, data.values)?;
        field.boundary_value = data.boundary_value;
        Ok(field)
    }
}

/// Samples of type `T` on a [`Grid2`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "FieldData2<T>",
    bound(deserialize = "T: FieldValue + Deserialize<'de>")
)]
pub struct Field2<T> {
    grid: Grid2,
    values: Vec<T>,
    /// Value read outside the grid under the Constant policy
    boundary_value: T,
}

impl<T: FieldValue> Field2<T> {
    /// Field with every sample set to zero
    #[must_use]
    pub fn new(grid: Grid2) -> Self {
        Self::filled(grid, T::zero())
    }

    /// Field with every sample set to `value`
    #[must_use]
    pub fn filled(grid: Grid2, value: T) -> Self {
        Self {
            values: vec![value; grid.count()],
            grid,
            boundary_value: T::zero(),
        }
    }

    /// Field adopting existing samples
    ///
    /// # Errors
    /// Returns [`FieldError::ResolutionMismatch`] if `values` does not hold
    /// exactly one sample per grid point
    pub fn with_values(grid: Grid2, values: Vec<T>) -> Result<Self, FieldError> {
        FieldError::check_len(grid.count(), values.len())?;
        Ok(Self {
            grid,
            values,
            boundary_value: T::zero(),
        })
    }

    /// Zero-initialized field built from a validated configuration
    ///
    /// # Errors
    /// Returns an error if the configured grid is invalid
    pub fn from_config(config: GridConfig2) -> Result<Self, FieldError> {
        Ok(Self::new(Grid2::try_from(config)?))
    }

    #[must_use]
    pub fn grid(&self) -> &Grid2 {
        &self.grid
    }

    /// Mutable grid access for changing domain or boundary policy
    pub fn grid_mut(&mut self) -> &mut Grid2 {
        &mut self.grid
    }

    #[must_use]
    pub fn values(&self) -> &[T] {
        &self.values
    }

    pub fn values_mut(&mut self) -> &mut [T] {
        &mut self.values
    }

    /// Sample at `(i, j)`
    ///
    /// # Panics
    /// Panics if the index is outside the grid
    #[must_use]
    pub fn get(&self, i: usize, j: usize) -> T {
        self.values[self.grid.flatten_index(i, j)]
    }

    /// Overwrite the sample at `(i, j)`
    ///
    /// # Panics
    /// Panics if the index is outside the grid
    pub fn set(&mut self, i: usize, j: usize, value: T) {
        let index = self.grid.flatten_index(i, j);
        self.values[index] = value;
    }

    /// Value read outside the grid under the Constant policy
    #[must_use]
    pub fn boundary_value(&self) -> T {
        self.boundary_value
    }

    /// Set the value read outside the grid under the Constant policy
    pub fn set_boundary_value(&mut self, value: T) {
        self.boundary_value = value;
    }

    /// Bilinearly interpolated value at a world-space point
    #[must_use]
    pub fn value_at(&self, point: Vec2) -> T {
        let fp = self.grid.field_point_at(point);
        let weights = fp.corner_weights();

        let mut sum = T::zero();
        for (c, (&index, &w)) in fp.corners.iter().zip(weights.iter()).enumerate() {
            let sample = if fp.is_out(c) {
                self.boundary_value
            } else {
                self.values[index]
            };
            sum += sample * w;
        }
        sum
    }
}

#[derive(Deserialize)]
struct FieldData3<T> {
    grid: Grid3,
    values: Vec<T>,
    boundary_value: T,
}

impl<T: FieldValue> TryFrom<FieldData3<T>> for Field3<T> {
    type Error = FieldError;

    fn try_from(data: FieldData3<T>) -> Result<Self, Self::Error> {
        let mut field = Self::with_values(data.grid, data.values)?;
        field.boundary_value = data.boundary_value;
        Ok(field)
    }
}

/// Samples of type `T` on a [`Grid3`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "FieldData3<T>",
    bound(deserialize = "T: FieldValue + Deserialize<'de>")
)]
pub struct Field3<T> {
    grid: Grid3,
    values: Vec<T>,
    /// Value read outside the grid under the Constant policy
    boundary_value: T,
}

impl<T: FieldValue> Field3<T> {
    /// Field with every sample set to zero
    #[must_use]
    pub fn new(grid: Grid3) -> Self {
        Self::filled(grid, T::zero())
    }

    /// Field with every sample set to `value`
    #[must_use]
    pub fn filled(grid: Grid3, value: T) -> Self {
        Self {
            values: vec![value; grid.count()],
            grid,
            boundary_value: T::zero(),
        }
    }

    /// Field adopting existing samples
    ///
    /// # Errors
    /// Returns [`FieldError::ResolutionMismatch`] if `values` does not hold
    /// exactly one sample per grid point
    pub fn with_values(grid: Grid3, values: Vec<T>) -> Result<Self, FieldError> {
        FieldError::check_len(grid.count(), values.len())?;
        Ok(Self {
            grid,
            values,
            boundary_value: T::zero(),
        })
    }

    /// Zero-initialized field built from a validated configuration
    ///
    /// # Errors
    /// Returns an error if the configured grid is invalid
    pub fn from_config(config: GridConfig3) -> Result<Self, FieldError> {
        Ok(Self::new(Grid3::try_from(config)?))
    }

    /// Grid geometry
    #[must_use]
    pub fn grid(&self) -> &Grid3 {
        &self.grid
    }

    /// Mutable grid access for changing domain or boundary policy
    pub fn grid_mut(&mut self) -> &mut Grid3 {
        &mut self.grid
    }

    /// Samples in flat index order
    #[must_use]
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Mutable samples in flat index order
    pub fn values_mut(&mut self) -> &mut [T] {
        &mut self.values
    }

    /// Sample at `(i, j, k)`
    ///
    /// # Panics
    /// Panics if the index is outside the grid
    #[must_use]
    pub fn get(&self, i: usize, j: usize, k: usize) -> T {
        self.values[self.grid.flatten_index(i, j, k)]
    }

    /// Overwrite the sample at `(i, j, k)`
    ///
    /// # Panics
    /// Panics if the index is outside the grid
    pub fn set(&mut self, i: usize, j: usize, k: usize, value: T) {
        let index = self.grid.flatten_index(i, j, k);
        self.values[index] = value;
    }

    /// Value read outside the grid under the Constant policy
    #[must_use]
    pub fn boundary_value(&self) -> T {
        self.boundary_value
    }

    /// Set the value read outside the grid under the Constant policy
    pub fn set_boundary_value(&mut self, value: T) {
        self.boundary_value = value;
    }

    /// Trilinearly interpolated value at a world-space point
    #[must_use]
    pub fn value_at(&self, point: Vec3) -> T {
        let fp = self.grid.field_point_at(point);
        let weights = fp.corner_weights();

        let mut sum = T::zero();
        for (c, (&index, &w)) in fp.corners.iter().zip(weights.iter()).enumerate() {
            let sample = if fp.is_out(c) {
                self.boundary_value
            } else {
                self.values[index]
            };
            sum += sample * w;
        }
        sum
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::{Domain2, Domain3};
    use crate::grid::BoundaryType;
    use approx::assert_relative_eq;

    fn ramp2(boundary: BoundaryType) -> Field2<f64> {
        let domain = Domain2::from_bounds(Vec2::zeros(), Vec2::new(2.0, 2.0));
        let grid = Grid2::with_boundary(domain, 3, 3, boundary).unwrap();
        let values = (0..9).map(|n| f64::from(n % 3 + 10 * (n / 3))).collect();
        Field2::with_values(grid, values).unwrap()
    }

    #[test]
    fn test_with_values_length_checked() {
        let grid = Grid2::new(Domain2::default(), 4, 4).unwrap();
        assert_eq!(
            Field2::with_values(grid, vec![0.0; 15]).unwrap_err(),
            FieldError::ResolutionMismatch {
                expected: 16,
                actual: 15
            }
        );
    }

    #[test]
    fn test_value_at_interior() {
        let field = ramp2(BoundaryType::Equal);
        assert_relative_eq!(field.value_at(Vec2::new(0.5, 0.5)), 5.5);
        assert_relative_eq!(field.value_at(Vec2::new(2.0, 1.0)), 12.0);
        assert_relative_eq!(field.get(1, 2), 21.0);
    }

    #[test]
    fn test_value_at_equal_clamps_outside() {
        let field = ramp2(BoundaryType::Equal);
        assert_relative_eq!(field.value_at(Vec2::new(-3.0, -3.0)), 0.0);
        assert_relative_eq!(field.value_at(Vec2::new(5.0, 5.0)), 22.0);
    }

    #[test]
    fn test_value_at_constant_reads_boundary_value() {
        let mut field = ramp2(BoundaryType::Constant);
        field.set_boundary_value(100.0);
        assert_relative_eq!(field.value_at(Vec2::new(2.5, 0.0)), 51.0);
        assert_relative_eq!(field.value_at(Vec2::new(-7.0, 9.0)), 100.0);
    }

    #[test]
    fn test_domain_change_keeps_samples() {
        let mut field = ramp2(BoundaryType::Equal);
        let before = field.values().to_vec();
        field
            .grid_mut()
            .set_domain(Domain2::from_bounds(Vec2::zeros(), Vec2::new(20.0, 20.0)))
            .unwrap();
        assert_eq!(field.values(), &before[..]);
        assert_relative_eq!(field.value_at(Vec2::new(5.0, 5.0)), 5.5);
    }

    #[test]
    fn test_vector_field_value_at() {
        let grid = Grid3::new(Domain3::default(), 2, 2, 2).unwrap();
        let mut field = Field3::filled(grid, Vec3::new(1.0, 0.0, 0.0));
        field.set(1, 1, 1, Vec3::new(1.0, 8.0, 0.0));
        let v = field.value_at(Vec3::new(0.5, 0.5, 0.5));
        assert_relative_eq!(v, Vec3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_field3_value_at_constant_reads_boundary_value() {
        let domain = Domain3::from_bounds(Vec3::zeros(), Vec3::new(1.0, 1.0, 1.0));
        let grid = Grid3::with_boundary(domain, 2, 2, 2, BoundaryType::Constant).unwrap();
        let mut field = Field3::filled(grid, 2.0);
        field.set_boundary_value(10.0);

        // half of the 8 corners lie past the upper z face
        assert_relative_eq!(field.value_at(Vec3::new(0.5, 0.5, 1.5)), 6.0);
        assert_relative_eq!(field.value_at(Vec3::new(0.25, 0.75, 0.5)), 2.0);
        assert_relative_eq!(field.value_at(Vec3::new(-4.0, 0.5, 0.5)), 10.0);
        assert_relative_eq!(field.value_at(Vec3::new(f64::MAX, 0.0, 0.0)), 10.0);
    }

    #[test]
    fn test_value_at_huge_coordinates_constant() {
        let mut field = ramp2(BoundaryType::Constant);
        field.set_boundary_value(-1.0);
        assert_relative_eq!(field.value_at(Vec2::new(1e300, 1.0)), -1.0);
        assert_relative_eq!(field.value_at(Vec2::new(f64::MAX, 0.0)), -1.0);
        assert_relative_eq!(field.value_at(Vec2::new(0.0, -f64::MAX)), -1.0);
    }

    #[test]
    fn test_serde_roundtrip_keeps_boundary_value() {
        let mut field = ramp2(BoundaryType::Constant);
        field.set_boundary_value(7.5);
        let json = serde_json::to_string(&field).unwrap();
        let loaded: Field2<f64> = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded, field);
    }

    #[test]
    fn test_deserialize_rejects_sample_count_mismatch() {
        let field = Field2::<f64>::new(Grid2::new(Domain2::default(), 4, 4).unwrap());
        let mut json = serde_json::to_value(&field).unwrap();
        json["values"] = serde_json::json!([0.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
        let err = serde_json::from_value::<Field2<f64>>(json).unwrap_err();
        assert!(err.to_string().contains("expected 16"), "{err}");

        let field = Field3::<f64>::new(Grid3::new(Domain3::default(), 2, 2, 2).unwrap());
        let mut json = serde_json::to_value(&field).unwrap();
        json["values"] = serde_json::json!([1.0]);
        assert!(serde_json::from_value::<Field3<f64>>(json).is_err());
    }

    #[test]
    fn test_from_config() {
        let field = Field3::<f64>::from_config(GridConfig3 {
            count_x: 3,
            count_y: 4,
            count_z: 5,
            ..Default::default()
        })
        .unwrap();
        assert_eq!(field.values().len(), 60);
    }
}
