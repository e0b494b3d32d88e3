//! Geodesic solver trait definition
//!
//! This module defines the `GeodesicSolver` trait, a metric-agnostic
//! interface over the distance solvers. Solvers own their scratch buffers so
//! repeated solves on same-sized grids do not reallocate.

use super::geodesic::{l1_geodesic_distance_into, l2_geodesic_distance_into};
use crate::core_types::FieldError;
use crate::grid::Field2;
use serde::{Deserialize, Serialize};

/// Distance metric approximated by a geodesic solver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GeodesicMetric {
    /// Cost-weighted Manhattan distance (grid Dijkstra)
    Manhattan,
    /// Cost-weighted Euclidean distance (fast marching)
    Euclidean,
}

/// Interface for multi-source distance solvers over a cost grid
///
/// A solver runs one whole-field solve at a time. Independent solves may run
/// concurrently on separate solver instances.
pub trait GeodesicSolver: Send {
    /// Metric this solver approximates
    fn metric(&self) -> GeodesicMetric;

    /// Solve into a caller-owned buffer of one entry per cell
    ///
    /// # Errors
    /// Returns an error for out-of-range sources or a mis-sized buffer
    fn solve_into(
        &mut self,
        cost: &Field2<f64>,
        sources: &[usize],
        result: &mut [f64],
    ) -> Result<(), FieldError>;

    /// Solve into a freshly allocated buffer
    ///
    /// # Errors
    /// Returns an error for out-of-range sources
    fn solve(&mut self, cost: &Field2<f64>, sources: &[usize]) -> Result<Vec<f64>, FieldError> {
        let mut result = vec![f64::INFINITY; cost.grid().count()];
        self.solve_into(cost, sources, &mut result)?;
        Ok(result)
    }
}

/// Grid Dijkstra producing Manhattan distance
#[derive(Debug, Clone, Copy, Default)]
pub struct ManhattanSolver;

impl GeodesicSolver for ManhattanSolver {
    fn metric(&self) -> GeodesicMetric {
        GeodesicMetric::Manhattan
    }

    fn solve_into(
        &mut self,
        cost: &Field2<f64>,
        sources: &[usize],
        result: &mut [f64],
    ) -> Result<(), FieldError> {
        l1_geodesic_distance_into(cost, sources, result)
    }
}

/// Fast marching producing Euclidean distance
///
/// Keeps its settled-flag buffer between solves.
#[derive(Debug, Clone, Default)]
pub struct FastMarchingSolver {
    settled: Vec<bool>,
}

impl GeodesicSolver for FastMarchingSolver {
    fn metric(&self) -> GeodesicMetric {
        GeodesicMetric::Euclidean
    }

    fn solve_into(
        &mut self,
        cost: &Field2<f64>,
        sources: &[usize],
        result: &mut [f64],
    ) -> Result<(), FieldError> {
        self.settled.resize(cost.grid().count(), false);
        l2_geodesic_distance_into(cost, sources, result, &mut self.settled)
    }
}
