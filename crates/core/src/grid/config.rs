//! Serializable grid configuration
//!
//! Grids are (de)serialized through these plain configuration structs so
//! that derived spacing state is always recomputed and validated on load.

use super::boundary::BoundaryType;
use super::grid2::Grid2;
use super::grid3::Grid3;
use crate::core_types::{Domain2, Domain3, FieldError};
use serde::{Deserialize, Serialize};

/// Configuration for a 2D grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridConfig2 {
    /// World-space region covered by the grid
    pub domain: Domain2,
    /// Number of samples along x (at least 2)
    pub count_x: usize,
    /// Number of samples along y (at least 2)
    pub count_y: usize,
    /// Boundary policy, defaults to [`BoundaryType::Equal`]
    #[serde(default)]
    pub boundary_type: BoundaryType,
}

impl Default for GridConfig2 {
    fn default() -> Self {
        Self {
            domain: Domain2::default(),
            count_x: 64,
            count_y: 64,
            boundary_type: BoundaryType::default(),
        }
    }
}

impl From<Grid2> for GridConfig2 {
    fn from(grid: Grid2) -> Self {
        Self {
            domain: *grid.domain(),
            count_x: grid.count_x(),
            count_y: grid.count_y(),
            boundary_type: grid.boundary_type(),
        }
    }
}

impl TryFrom<GridConfig2> for Grid2 {
    type Error = FieldError;

    fn try_from(config: GridConfig2) -> Result<Self, Self::Error> {
        Grid2::with_boundary(
            config.domain,
            config.count_x,
            config.count_y,
            config.boundary_type,
        )
    }
}

/// Configuration for a 3D grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridConfig3 {
    /// World-space region covered by the grid
    pub domain: Domain3,
    /// Number of samples along x (at least 2)
    pub count_x: usize,
    /// Number of samples along y (at least 2)
    pub count_y: usize,
    /// Number of samples along z (at least 2)
    pub count_z: usize,
    /// Boundary policy, defaults to [`BoundaryType::Equal`]
    #[serde(default)]
    pub boundary_type: BoundaryType,
}

impl Default for GridConfig3 {
    fn default() -> Self {
        Self {
            domain: Domain3::default(),
            count_x: 32,
            count_y: 32,
            count_z: 32,
            boundary_type: BoundaryType::default(),
        }
    }
}

impl From<Grid3> for GridConfig3 {
    fn from(grid: Grid3) -> Self {
        Self {
            domain: *grid.domain(),
            count_x: grid.count_x(),
            count_y: grid.count_y(),
            count_z: grid.count_z(),
            boundary_type: grid.boundary_type(),
        }
    }
}

impl TryFrom<GridConfig3> for Grid3 {
    type Error = FieldError;

    fn try_from(config: GridConfig3) -> Result<Self, Self::Error> {
        Grid3::with_boundary(
            config.domain,
            config.count_x,
            config.count_y,
            config.count_z,
            config.boundary_type,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_round_trip_preserves_grid() {
        let config = GridConfig2 {
            count_x: 5,
            count_y: 3,
            boundary_type: BoundaryType::Periodic,
            ..Default::default()
        };
        let grid = Grid2::try_from(config.clone()).unwrap();
        assert_eq!(GridConfig2::from(grid), config);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = GridConfig3 {
            count_z: 1,
            ..Default::default()
        };
        assert_eq!(
            Grid3::try_from(config),
            Err(FieldError::InvalidResolution {
                axis: "z",
                count: 1
            })
        );
    }
}
