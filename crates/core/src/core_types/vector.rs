//! Vector type aliases for world-space points and vector-valued samples.

use nalgebra::{Vector2, Vector3};

/// 2D vector type for world positions, spacings and 2D vector samples.
///
/// This is a simple alias for `nalgebra::Vector2<f64>`, used throughout
/// the crate for query points and per-axis grid quantities.
pub type Vec2 = Vector2<f64>;

/// 3D vector type for world positions, spacings and 3D vector samples.
pub type Vec3 = Vector3<f64>;
