//! Field operators and geodesic distance solvers
//!
//! Operators are stateless functions over a field's samples. They never
//! write the samples themselves: each one accumulates into a caller-owned
//! delta buffer, and [`update`] applies that buffer once per step.
//!
//! Every grid operator takes a `parallel` flag. Parallel runs split the flat
//! index range into contiguous chunks and produce output bit-identical to
//! the sequential run.
//!
//! # Example
//!
//! ```rust
//! use field_sim_core::grid::{Field2, Grid2};
//! use field_sim_core::solver::{diffuse_2d, update};
//! use field_sim_core::Domain2;
//!
//! let grid = Grid2::new(Domain2::default(), 32, 32).unwrap();
//! let mut field = Field2::<f64>::new(grid);
//! field.set(16, 16, 1.0);
//!
//! let mut deltas = vec![0.0; field.values().len()];
//! diffuse_2d(&field, &mut deltas, 1e-4, true).unwrap();
//! update(field.values_mut(), &mut deltas, 0.1, true).unwrap();
//! ```

mod diffusion;
mod eikonal;
mod erosion;
mod geodesic;
pub mod graph;
mod queue;
mod stencil;
#[allow(clippy::module_name_repetitions)]
mod r#trait;
mod update;

// Re-exports
pub use diffusion::{diffuse_2d, diffuse_3d};
pub use erosion::{erode_thermal_2d, erode_thermal_3d};
pub use geodesic::{
    l1_geodesic_distance, l1_geodesic_distance_into, l2_geodesic_distance,
    l2_geodesic_distance_into,
};
pub use graph::{diffuse_graph, diffuse_graph_weighted, AdjacencyList, GraphEdge, NodeGraph};
pub use queue::PriorityQueue;
pub use r#trait::{FastMarchingSolver, GeodesicMetric, GeodesicSolver, ManhattanSolver};
pub use update::{bifurcate, update};

use crate::core_types::FieldError;
use crate::grid::Field2;
use rayon::prelude::*;
use tracing::info;

/// Create a geodesic solver for the requested metric
pub fn create_geodesic_solver(metric: GeodesicMetric) -> Box<dyn GeodesicSolver> {
    info!("Using {:?} geodesic solver", metric);
    new_solver(metric)
}

/// Solve one distance field per source set, in parallel
///
/// Each solve is sequential; parallelism is across source sets only.
///
/// # Errors
/// Returns the first error encountered by any solve
pub fn solve_batch(
    metric: GeodesicMetric,
    cost: &Field2<f64>,
    source_sets: &[Vec<usize>],
) -> Result<Vec<Vec<f64>>, FieldError> {
    source_sets
        .par_iter()
        .map_init(
            || new_solver(metric),
            |solver, sources| solver.solve(cost, sources),
        )
        .collect()
}

fn new_solver(metric: GeodesicMetric) -> Box<dyn GeodesicSolver> {
    match metric {
        GeodesicMetric::Manhattan => Box::new(ManhattanSolver),
        GeodesicMetric::Euclidean => Box::new(FastMarchingSolver::default()),
    }
}
