//! Rectangular and box-shaped world-space domains
//!
//! A domain is the region a grid field covers. Each axis is an [`Interval`]
//! from `t0` to `t1`; the first sample of a field sits on `t0` and the last
//! on `t1`. A domain is valid only when every axis has a finite, strictly
//! positive span.

use super::error::FieldError;
use super::vector::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Closed interval `[t0, t1]` along one axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    /// Start of the interval
    pub t0: f64,
    /// End of the interval
    pub t1: f64,
}

impl Interval {
    /// Create an interval from its endpoints
    #[must_use]
    pub const fn new(t0: f64, t1: f64) -> Self {
        Self { t0, t1 }
    }

    /// Signed length `t1 - t0`
    #[inline]
    #[must_use]
    pub fn span(&self) -> f64 {
        self.t1 - self.t0
    }

    /// True if the span is finite and strictly positive
    #[inline]
    #[must_use]
    pub fn is_valid(&self) -> bool {
        let span = self.span();
        span.is_finite() && span > 0.0
    }
}

impl Default for Interval {
    fn default() -> Self {
        Self::new(0.0, 1.0)
    }
}

/// Rectangular 2D domain
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Domain2 {
    /// X interval
    pub x: Interval,
    /// Y interval
    pub y: Interval,
}

impl Domain2 {
    /// Create a domain from per-axis intervals
    #[must_use]
    pub const fn new(x: Interval, y: Interval) -> Self {
        Self { x, y }
    }

    /// Create a domain spanning from `min` to `max`
    #[must_use]
    pub fn from_bounds(min: Vec2, max: Vec2) -> Self {
        Self::new(Interval::new(min.x, max.x), Interval::new(min.y, max.y))
    }

    /// Lower corner of the domain
    #[must_use]
    pub fn min(&self) -> Vec2 {
        Vec2::new(self.x.t0, self.y.t0)
    }

    /// Upper corner of the domain
    #[must_use]
    pub fn max(&self) -> Vec2 {
        Vec2::new(self.x.t1, self.y.t1)
    }

    /// Per-axis spans
    #[must_use]
    pub fn span(&self) -> Vec2 {
        Vec2::new(self.x.span(), self.y.span())
    }

    /// True if both axes have a finite, positive span
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.x.is_valid() && self.y.is_valid()
    }

    /// Validate the domain
    ///
    /// # Errors
    /// Returns [`FieldError::InvalidDomain`] if any axis is degenerate
    pub fn validate(&self) -> Result<(), FieldError> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(FieldError::InvalidDomain(format!(
                "x span {} and y span {} must both be positive",
                self.x.span(),
                self.y.span()
            )))
        }
    }
}

/// Box-shaped 3D domain
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Domain3 {
    /// X interval
    pub x: Interval,
    /// Y interval
    pub y: Interval,
    /// Z interval
    pub z: Interval,
}

impl Domain3 {
    /// Create a domain from per-axis intervals
    #[must_use]
    pub const fn new(x: Interval, y: Interval, z: Interval) -> Self {
        Self { x, y, z }
    }

    /// Create a domain spanning from `min` to `max`
    #[must_use]
    pub fn from_bounds(min: Vec3, max: Vec3) -> Self {
        Self::new(
            Interval::new(min.x, max.x),
            Interval::new(min.y, max.y),
            Interval::new(min.z, max.z),
        )
    }

    /// Lower corner of the domain
    #[must_use]
    pub fn min(&self) -> Vec3 {
        Vec3::new(self.x.t0, self.y.t0, self.z.t0)
    }

    /// Upper corner of the domain
    #[must_use]
    pub fn max(&self) -> Vec3 {
        Vec3::new(self.x.t1, self.y.t1, self.z.t1)
    }

    /// Per-axis spans
    #[must_use]
    pub fn span(&self) -> Vec3 {
        Vec3::new(self.x.span(), self.y.span(), self.z.span())
    }

    /// True if all three axes have a finite, positive span
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.x.is_valid() && self.y.is_valid() && self.z.is_valid()
    }

    /// Validate the domain
    ///
    /// # Errors
    /// Returns [`FieldError::InvalidDomain`] if any axis is degenerate
    pub fn validate(&self) -> Result<(), FieldError> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(FieldError::InvalidDomain(format!(
                "x span {}, y span {} and z span {} must all be positive",
                self.x.span(),
                self.y.span(),
                self.z.span()
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_validity() {
        assert!(Interval::new(-1.0, 1.0).is_valid());
        assert!(!Interval::new(1.0, 1.0).is_valid());
        assert!(!Interval::new(2.0, 1.0).is_valid());
        assert!(!Interval::new(0.0, f64::INFINITY).is_valid());
        assert!(!Interval::new(f64::NAN, 1.0).is_valid());
    }

    #[test]
    fn test_domain_bounds() {
        let domain = Domain2::from_bounds(Vec2::new(-2.0, 1.0), Vec2::new(2.0, 5.0));
        assert_eq!(domain.min(), Vec2::new(-2.0, 1.0));
        assert_eq!(domain.max(), Vec2::new(2.0, 5.0));
        assert_eq!(domain.span(), Vec2::new(4.0, 4.0));
        assert!(domain.validate().is_ok());
    }

    #[test]
    fn test_degenerate_domain_rejected() {
        let flat = Domain3::from_bounds(Vec3::zeros(), Vec3::new(1.0, 1.0, 0.0));
        assert!(matches!(flat.validate(), Err(FieldError::InvalidDomain(_))));
    }
}
