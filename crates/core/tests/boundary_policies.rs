//! Boundary policy behaviour through the public grid and field API

use approx::assert_relative_eq;
use field_sim_core::{BoundaryType, Domain2, Domain3, Field2, Grid2, Grid3, Vec2, Vec3};

fn unit_grid2(nx: usize, ny: usize, boundary: BoundaryType) -> Grid2 {
    let max = Vec2::new((nx - 1) as f64, (ny - 1) as f64);
    Grid2::with_boundary(Domain2::from_bounds(Vec2::zeros(), max), nx, ny, boundary).unwrap()
}

#[test]
fn test_flatten_expand_are_inverse() {
    let grid = unit_grid2(7, 5, BoundaryType::Equal);
    for index in 0..grid.count() {
        let (i, j) = grid.expand_index(index);
        assert_eq!(grid.flatten_index(i, j), index);
    }

    let max = Vec3::new(1.0, 2.0, 3.0);
    let grid = Grid3::new(Domain3::from_bounds(Vec3::zeros(), max), 4, 3, 5).unwrap();
    for k in 0..5 {
        for j in 0..3 {
            for i in 0..4 {
                assert_eq!(grid.expand_index(grid.flatten_index(i, j, k)), (i, j, k));
            }
        }
    }
}

#[test]
fn test_equal_clamps_far_points() {
    let grid = unit_grid2(5, 4, BoundaryType::Equal);
    assert_eq!(grid.index2_at(Vec2::new(-100.0, 1.2)), (0, 1));
    assert_eq!(grid.index2_at(Vec2::new(100.0, 100.0)), (4, 3));
    assert_eq!(grid.index_at(Vec2::new(2.0, -50.0)), 2);

    let point = grid.field_point_at(Vec2::new(100.0, 100.0));
    assert!(point.corners.iter().all(|&c| c == grid.count() - 1));
    assert_eq!(point.mask, 0);
}

#[test]
fn test_periodic_seam_interpolation() {
    let grid = unit_grid2(4, 2, BoundaryType::Periodic);
    let values = vec![0.0, 1.0, 2.0, 3.0, 0.0, 1.0, 2.0, 3.0];
    let field = Field2::with_values(grid, values).unwrap();

    let point = field.grid().field_point_at(Vec2::new(3.5, 0.0));
    assert_eq!(point.corners[0], 3);
    assert_eq!(point.corners[1], 0);
    assert_relative_eq!(field.value_at(Vec2::new(3.5, 0.0)), 1.5);

    // negative coordinates wrap to the far edge
    assert_eq!(field.grid().index2_at(Vec2::new(-1.0, 0.0)), (3, 0));
}

#[test]
fn test_constant_sentinel_and_mask() {
    let grid = unit_grid2(4, 4, BoundaryType::Constant);
    let n = grid.count();

    assert_eq!(grid.index_at(Vec2::new(-0.6, 2.0)), n);
    assert_eq!(grid.index2_at(Vec2::new(1.0, 9.0)), (4, 4));

    let point = grid.field_point_at(Vec2::new(-0.5, 3.5));
    // only the corner at grid (0, 3) lies inside
    assert_eq!(point.mask, 0b1101);
    assert_eq!(point.corners, [n, 12, n, n]);
}

#[test]
fn test_policy_switch_keeps_samples() {
    let grid = unit_grid2(3, 3, BoundaryType::Equal);
    let mut field = Field2::with_values(grid, (0..9).map(f64::from).collect()).unwrap();
    let before = field.values().to_vec();

    for boundary in [
        BoundaryType::Periodic,
        BoundaryType::Constant,
        BoundaryType::Equal,
    ] {
        field.grid_mut().set_boundary_type(boundary);
        assert_eq!(field.values(), &before[..]);
        assert_eq!(field.grid().boundary_type(), boundary);
    }
}

#[test]
fn test_coordinates_restartable() {
    let grid = unit_grid2(3, 2, BoundaryType::Equal);
    let first: Vec<Vec2> = grid.coordinates().collect();
    let second: Vec<Vec2> = grid.coordinates().collect();
    assert_eq!(first, second);
    assert_eq!(first.len(), 6);
    assert_eq!(first[4], Vec2::new(1.0, 1.0));
}
