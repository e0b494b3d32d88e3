//! Time-stepping driver combining the field operators

mod field_simulation;
mod params;

pub use field_simulation::{ScalarField, ScalarFieldSimulation};
pub use params::{BifurcationParams, ErosionParams, SimulationParams};
