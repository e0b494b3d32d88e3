//! Sample value abstraction
//!
//! Fields store either scalars or vectors. Anything that can be accumulated
//! and scaled by a time step or an interpolation weight implements
//! [`FieldValue`].

use super::vector::{Vec2, Vec3};
use std::ops::{Add, AddAssign, Mul};

/// A value that can be stored in a field and advanced by `update`
pub trait FieldValue:
    Copy + Send + Sync + Add<Output = Self> + AddAssign + Mul<f64, Output = Self>
{
    /// Additive identity
    fn zero() -> Self;
}

impl FieldValue for f64 {
    #[inline]
    fn zero() -> Self {
        0.0
    }
}

impl FieldValue for Vec2 {
    #[inline]
    fn zero() -> Self {
        Vec2::zeros()
    }
}

impl FieldValue for Vec3 {
    #[inline]
    fn zero() -> Self {
        Vec3::zeros()
    }
}
