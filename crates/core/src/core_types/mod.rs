//! Core types and utilities

pub mod domain;
pub mod error;
pub mod value;
pub mod vector;

pub use domain::{Domain2, Domain3, Interval};
pub use error::FieldError;
pub use value::FieldValue;
pub use vector::{Vec2, Vec3};
