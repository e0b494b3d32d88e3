//! Multi-source geodesic distance over a 2D cost grid
//!
//! Both solvers treat the grid as a 4-connected graph with a non-negative
//! traversal cost per cell. Neighbours past the edge are never visited,
//! whatever the grid's boundary policy. Cells no source can reach, including
//! cells of infinite cost, keep a distance of `f64::INFINITY`.
//!
//! - [`l1_geodesic_distance`]: Dijkstra over the grid graph, producing
//!   cost-weighted Manhattan distance.
//! - [`l2_geodesic_distance`]: fast marching with a two-axis Eikonal update,
//!   approximating cost-weighted Euclidean distance.

use super::eikonal::Eikonal2;
use super::queue::PriorityQueue;
use crate::core_types::FieldError;
use crate::grid::{Field2, Grid2};
use tracing::debug;

type Entry = (f64, usize);

fn by_distance(a: &Entry, b: &Entry) -> std::cmp::Ordering {
    a.0.total_cmp(&b.0)
}

fn check_sources(sources: &[usize], count: usize) -> Result<(), FieldError> {
    match sources.iter().find(|&&s| s >= count) {
        Some(&index) => Err(FieldError::InvalidSource { index, count }),
        None => Ok(()),
    }
}

/// In-grid 4-neighbours of `index` as `(neighbour, along_x)`
#[inline]
fn neighbors(grid: &Grid2, index: usize) -> [Option<(usize, bool)>; 4] {
    let nx = grid.count_x();
    let (i, j) = grid.expand_index(index);
    [
        (i > 0).then(|| (index - 1, true)),
        (i + 1 < nx).then(|| (index + 1, true)),
        (j > 0).then(|| (index - nx, false)),
        (j + 1 < grid.count_y()).then(|| (index + nx, false)),
    ]
}

/// Cost-weighted Manhattan distance from the nearest source
///
/// # Errors
/// Returns [`FieldError::InvalidSource`] if a source lies outside the grid
pub fn l1_geodesic_distance(cost: &Field2<f64>, sources: &[usize]) -> Result<Vec<f64>, FieldError> {
    let mut result = vec![f64::INFINITY; cost.grid().count()];
    l1_geodesic_distance_into(cost, sources, &mut result)?;
    Ok(result)
}

/// [`l1_geodesic_distance`] writing into a caller-owned buffer
///
/// # Errors
/// Returns [`FieldError::InvalidSource`] if a source lies outside the grid
/// and [`FieldError::ResolutionMismatch`] if `result` has the wrong length
pub fn l1_geodesic_distance_into(
    cost: &Field2<f64>,
    sources: &[usize],
    result: &mut [f64],
) -> Result<(), FieldError> {
    let grid = cost.grid();
    let cost = cost.values();
    FieldError::check_len(grid.count(), result.len())?;
    check_sources(sources, grid.count())?;

    let spacing = grid.spacing();
    result.fill(f64::INFINITY);

    let mut queue = PriorityQueue::with_capacity(grid.count(), by_distance);
    for &source in sources {
        result[source] = 0.0;
        queue.insert((0.0, source));
    }

    let mut visited = 0_usize;
    while !queue.is_empty() {
        let (t0, index) = queue.remove_min()?;

        // stale duplicate
        if t0 > result[index] {
            continue;
        }
        visited += 1;

        for (next, along_x) in neighbors(grid, index).into_iter().flatten() {
            let step = if along_x { spacing.x } else { spacing.y };
            let t1 = t0 + cost[next] * step;

            if t1 < result[next] {
                result[next] = t1;
                queue.insert((t1, next));
            }
        }
    }

    debug!(
        "L1 geodesic distance: {} sources, {}/{} cells expanded",
        sources.len(),
        visited,
        grid.count()
    );

    Ok(())
}

/// Cost-weighted Euclidean distance from the nearest source (fast marching)
///
/// # Errors
/// Returns [`FieldError::InvalidSource`] if a source lies outside the grid
pub fn l2_geodesic_distance(cost: &Field2<f64>, sources: &[usize]) -> Result<Vec<f64>, FieldError> {
    let n = cost.grid().count();
    let mut result = vec![f64::INFINITY; n];
    let mut settled = vec![false; n];
    l2_geodesic_distance_into(cost, sources, &mut result, &mut settled)?;
    Ok(result)
}

/// [`l2_geodesic_distance`] writing into caller-owned buffers
///
/// `settled` is scratch space and is cleared before use.
///
/// # Errors
/// Returns [`FieldError::InvalidSource`] if a source lies outside the grid
/// and [`FieldError::ResolutionMismatch`] if a buffer has the wrong length
pub fn l2_geodesic_distance_into(
    cost: &Field2<f64>,
    sources: &[usize],
    result: &mut [f64],
    settled: &mut [bool],
) -> Result<(), FieldError> {
    let grid = cost.grid();
    let cost = cost.values();
    let (nx, ny) = (grid.count_x(), grid.count_y());
    FieldError::check_len(grid.count(), result.len())?;
    FieldError::check_len(grid.count(), settled.len())?;
    check_sources(sources, grid.count())?;

    let spacing = grid.spacing();
    let eikonal = Eikonal2::new(spacing.x, spacing.y);
    result.fill(f64::INFINITY);
    settled.fill(false);

    let mut queue = PriorityQueue::with_capacity(grid.count(), by_distance);
    for &source in sources {
        result[source] = 0.0;
        queue.insert((0.0, source));
    }

    let mut settled_count = 0_usize;
    while !queue.is_empty() {
        let (_, index) = queue.remove_min()?;
        if settled[index] {
            continue;
        }
        settled[index] = true;
        settled_count += 1;

        let t0 = result[index];
        let (i, j) = grid.expand_index(index);

        for (next, along_x) in neighbors(grid, index).into_iter().flatten() {
            if settled[next] {
                continue;
            }
            let w = cost[next];

            let t1 = if along_x {
                // cross-axis estimate from the neighbour's own row
                let y = if j == 0 {
                    result[next + nx]
                } else if j == ny - 1 {
                    result[next - nx]
                } else {
                    result[next - nx].min(result[next + nx])
                };

                if y.is_infinite() {
                    t0 + spacing.x * w
                } else {
                    eikonal.solve(t0, y, w)
                }
            } else {
                let x = if i == 0 {
                    result[next + 1]
                } else if i == nx - 1 {
                    result[next - 1]
                } else {
                    result[next - 1].min(result[next + 1])
                };

                if x.is_infinite() {
                    t0 + spacing.y * w
                } else {
                    eikonal.solve(x, t0, w)
                }
            };

            if t1 < result[next] {
                result[next] = t1;
                queue.insert((t1, next));
            }
        }
    }

    debug!(
        "L2 geodesic distance: {} sources, {}/{} cells settled",
        sources.len(),
        settled_count,
        grid.count()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::{Domain2, Vec2};
    use approx::assert_relative_eq;

    fn unit_cost(nx: usize, ny: usize) -> Field2<f64> {
        let domain = Domain2::from_bounds(
            Vec2::zeros(),
            Vec2::new((nx - 1) as f64, (ny - 1) as f64),
        );
        Field2::filled(Grid2::new(domain, nx, ny).unwrap(), 1.0)
    }

    #[test]
    fn test_l1_corner_source() {
        let cost = unit_cost(6, 4);
        let result = l1_geodesic_distance(&cost, &[0]).unwrap();
        for (index, &d) in result.iter().enumerate() {
            let (i, j) = cost.grid().expand_index(index);
            assert_eq!(d, (i + j) as f64);
        }
    }

    #[test]
    fn test_l1_scales_with_spacing() {
        let grid = Grid2::new(
            Domain2::from_bounds(Vec2::zeros(), Vec2::new(6.0, 1.5)),
            4,
            4,
        )
        .unwrap();
        let cost = Field2::filled(grid, 1.0);
        let result = l1_geodesic_distance(&cost, &[0]).unwrap();
        assert_relative_eq!(result[cost.grid().flatten_index(3, 3)], 3.0 * 2.0 + 3.0 * 0.5);
    }

    #[test]
    fn test_l2_diagonal_neighbour() {
        let cost = unit_cost(8, 8);
        let result = l2_geodesic_distance(&cost, &[0]).unwrap();
        assert_relative_eq!(result[1], 1.0);
        assert_relative_eq!(result[8], 1.0);
        assert_relative_eq!(result[9], 1.0 + 0.5_f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_invalid_source() {
        let cost = unit_cost(3, 3);
        assert_eq!(
            l1_geodesic_distance(&cost, &[9]),
            Err(FieldError::InvalidSource { index: 9, count: 9 })
        );
        assert!(l2_geodesic_distance(&cost, &[0, 12]).is_err());
    }

    #[test]
    fn test_no_sources_leaves_infinity() {
        let cost = unit_cost(3, 3);
        let result = l2_geodesic_distance(&cost, &[]).unwrap();
        assert!(result.iter().all(|d| d.is_infinite()));
    }
}
