//! Scalar field simulation driver
//!
//! `ScalarFieldSimulation` owns one scalar field and its delta buffer. Each
//! tick accumulates every configured operator into the buffer from the same
//! sample state, then advances the samples with a single explicit Euler
//! update.

use super::params::SimulationParams;
use crate::core_types::FieldError;
use crate::grid::{Field2, Field3};
use crate::solver::{bifurcate, diffuse_2d, diffuse_3d, erode_thermal_2d, erode_thermal_3d, update};
use tracing::{debug, info};

/// Scalar field the driver can run grid operators on
pub trait ScalarField: Send + Sync {
    /// Flat sample storage
    fn samples(&self) -> &[f64];

    /// Mutable flat sample storage
    fn samples_mut(&mut self) -> &mut [f64];

    /// Accumulate diffusion into `deltas`
    ///
    /// # Errors
    /// Returns an error if `deltas` has the wrong length
    fn diffuse(&self, deltas: &mut [f64], rate: f64, parallel: bool) -> Result<(), FieldError>;

    /// Accumulate thermal erosion into `deltas`
    ///
    /// # Errors
    /// Returns an error if `deltas` has the wrong length
    fn erode_thermal(
        &self,
        deltas: &mut [f64],
        slope: f64,
        rate: f64,
        parallel: bool,
    ) -> Result<(), FieldError>;
}

impl ScalarField for Field2<f64> {
    fn samples(&self) -> &[f64] {
        self.values()
    }

    fn samples_mut(&mut self) -> &mut [f64] {
        self.values_mut()
    }

    fn diffuse(&self, deltas: &mut [f64], rate: f64, parallel: bool) -> Result<(), FieldError> {
        diffuse_2d(self, deltas, rate, parallel)
    }

    fn erode_thermal(
        &self,
        deltas: &mut [f64],
        slope: f64,
        rate: f64,
        parallel: bool,
    ) -> Result<(), FieldError> {
        erode_thermal_2d(self, deltas, slope, rate, parallel)
    }
}

impl ScalarField for Field3<f64> {
    fn samples(&self) -> &[f64] {
        self.values()
    }

    fn samples_mut(&mut self) -> &mut [f64] {
        self.values_mut()
    }

    fn diffuse(&self, deltas: &mut [f64], rate: f64, parallel: bool) -> Result<(), FieldError> {
        diffuse_3d(self, deltas, rate, parallel)
    }

    fn erode_thermal(
        &self,
        deltas: &mut [f64],
        slope: f64,
        rate: f64,
        parallel: bool,
    ) -> Result<(), FieldError> {
        erode_thermal_3d(self, deltas, slope, rate, parallel)
    }
}

/// Time-stepping driver for a scalar field
pub struct ScalarFieldSimulation<F: ScalarField> {
    field: F,
    deltas: Vec<f64>,
    params: SimulationParams,

    /// Statistics
    tick_count: u64,
    simulation_time: f64,
}

impl<F: ScalarField> ScalarFieldSimulation<F> {
    /// Create a driver around `field`
    ///
    /// # Errors
    /// Returns [`FieldError::InvalidConfig`] if `params` fails validation
    pub fn new(field: F, params: SimulationParams) -> Result<Self, FieldError> {
        params.validate()?;

        let n = field.samples().len();
        info!(
            "Scalar field simulation initialized: {} samples, dt={}, diffusion={:?}, erosion={:?}, bifurcation={:?}, parallel={}",
            n,
            params.time_step,
            params.diffusion_rate,
            params.erosion,
            params.bifurcation,
            params.parallel
        );

        Ok(Self {
            field,
            deltas: vec![0.0; n],
            params,
            tick_count: 0,
            simulation_time: 0.0,
        })
    }

    /// Advance one time step
    ///
    /// # Errors
    /// Propagates operator errors
    pub fn step(&mut self) -> Result<(), FieldError> {
        let SimulationParams {
            time_step,
            diffusion_rate,
            erosion,
            bifurcation,
            parallel,
        } = self.params;

        if let Some(rate) = diffusion_rate {
            self.field.diffuse(&mut self.deltas, rate, parallel)?;
        }
        if let Some(erosion) = erosion {
            self.field
                .erode_thermal(&mut self.deltas, erosion.slope, erosion.rate, parallel)?;
        }
        if let Some(b) = bifurcation {
            bifurcate(
                self.field.samples(),
                &mut self.deltas,
                b.threshold,
                b.rate,
                parallel,
            )?;
        }

        update(self.field.samples_mut(), &mut self.deltas, time_step, parallel)?;

        self.tick_count += 1;
        self.simulation_time += time_step;

        debug!(
            "Simulation tick {}: t={:.4}, total={:.6}",
            self.tick_count,
            self.simulation_time,
            self.total()
        );

        Ok(())
    }

    /// Advance `steps` time steps
    ///
    /// # Errors
    /// Stops at and returns the first failing step
    pub fn run(&mut self, steps: usize) -> Result<(), FieldError> {
        for _ in 0..steps {
            self.step()?;
        }
        Ok(())
    }

    pub fn field(&self) -> &F {
        &self.field
    }

    /// Mutable field access between steps
    pub fn field_mut(&mut self) -> &mut F {
        &mut self.field
    }

    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    /// Replace the parameters for subsequent steps
    ///
    /// # Errors
    /// Returns [`FieldError::InvalidConfig`] and keeps the old parameters if
    /// `params` fails validation
    pub fn set_params(&mut self, params: SimulationParams) -> Result<(), FieldError> {
        params.validate()?;
        self.params = params;
        Ok(())
    }

    /// Number of completed steps
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Elapsed simulated time
    pub fn simulation_time(&self) -> f64 {
        self.simulation_time
    }

    /// Sum of all samples
    pub fn total(&self) -> f64 {
        self.field.samples().iter().sum()
    }

    /// Release the field
    pub fn into_field(self) -> F {
        self.field
    }
}
