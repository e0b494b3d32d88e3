//! Simulation parameters
//!
//! Every operator is optional; a `None` entry skips it for the whole run.

use crate::core_types::FieldError;
use serde::{Deserialize, Serialize};

/// Thermal erosion settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ErosionParams {
    /// Talus slope below which no material moves
    pub slope: f64,
    /// Fraction of the excess gradient moved per unit time
    pub rate: f64,
}

/// Threshold bifurcation settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BifurcationParams {
    /// Value that samples are pushed away from
    pub threshold: f64,
    /// Constant rate of the push
    pub rate: f64,
}

/// Configuration for a [`ScalarFieldSimulation`](super::ScalarFieldSimulation)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationParams {
    /// Explicit Euler time step
    pub time_step: f64,

    /// Diffusion rate, `None` disables diffusion
    pub diffusion_rate: Option<f64>,

    /// Thermal erosion, `None` disables erosion
    pub erosion: Option<ErosionParams>,

    /// Threshold bifurcation, `None` disables bifurcation
    pub bifurcation: Option<BifurcationParams>,

    /// Run operators over parallel partitions
    pub parallel: bool,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            time_step: 0.1,
            diffusion_rate: Some(1.0),
            erosion: None,
            bifurcation: None,
            parallel: true,
        }
    }
}

fn check_finite(name: &str, value: f64) -> Result<(), FieldError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(FieldError::InvalidConfig(format!(
            "{name} must be finite, got {value}"
        )))
    }
}

impl SimulationParams {
    /// Check that every enabled parameter is usable
    ///
    /// # Errors
    /// Returns [`FieldError::InvalidConfig`] naming the first bad parameter
    pub fn validate(&self) -> Result<(), FieldError> {
        if !(self.time_step.is_finite() && self.time_step > 0.0) {
            return Err(FieldError::InvalidConfig(format!(
                "time_step must be positive and finite, got {}",
                self.time_step
            )));
        }
        if let Some(rate) = self.diffusion_rate {
            check_finite("diffusion_rate", rate)?;
        }
        if let Some(erosion) = self.erosion {
            check_finite("erosion.rate", erosion.rate)?;
            if !(erosion.slope.is_finite() && erosion.slope >= 0.0) {
                return Err(FieldError::InvalidConfig(format!(
                    "erosion.slope must be non-negative, got {}",
                    erosion.slope
                )));
            }
        }
        if let Some(bifurcation) = self.bifurcation {
            check_finite("bifurcation.threshold", bifurcation.threshold)?;
            check_finite("bifurcation.rate", bifurcation.rate)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(SimulationParams::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_values() {
        let params = SimulationParams {
            time_step: 0.0,
            ..Default::default()
        };
        assert!(params.validate().is_err());

        let params = SimulationParams {
            erosion: Some(ErosionParams {
                slope: -1.0,
                rate: 0.1,
            }),
            ..Default::default()
        };
        assert!(params.validate().is_err());

        let params = SimulationParams {
            diffusion_rate: Some(f64::NAN),
            ..Default::default()
        };
        assert!(params.validate().is_err());
    }
}
