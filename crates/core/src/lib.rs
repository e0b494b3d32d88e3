//! Field Simulation Core Library
//!
//! Discretized fields over regular 2D and 3D grids, with boundary-aware
//! sampling, numerical operators and geodesic distance solvers.
//!
//! ## Overview
//!
//! - [`grid`]: grid geometry ([`Grid2`], [`Grid3`]), boundary policies and
//!   sampled fields ([`Field2`], [`Field3`]) of scalars or vectors
//! - [`solver`]: delta-accumulating operators (diffusion, thermal erosion,
//!   bifurcation, graph diffusion), the explicit [`update`](solver::update)
//!   step, and Manhattan / fast-marching distance solvers
//! - [`simulation`]: a driver that runs configured operators once per tick

// Core types and utilities
pub mod core_types;

// Grids, boundary handling and fields
pub mod grid;

// Operators and solvers
pub mod solver;

// Time-stepping driver
pub mod simulation;

// Re-export core types
pub use core_types::{Domain2, Domain3, FieldError, FieldValue, Interval, Vec2, Vec3};

// Re-export grid types
pub use grid::{BoundaryType, Field2, Field3, FieldPoint2, FieldPoint3, Grid2, Grid3};

// Re-export solver and simulation entry points
pub use simulation::{ScalarFieldSimulation, SimulationParams};
pub use solver::{create_geodesic_solver, GeodesicMetric, GeodesicSolver};
