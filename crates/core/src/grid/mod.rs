//! Grid geometry, boundary policies and sampled fields

pub mod boundary;
pub mod config;
pub mod field;
pub mod field_point;
pub mod grid2;
pub mod grid3;
pub(crate) mod partition;

// Re-export main types
pub use boundary::BoundaryType;
pub use config::{GridConfig2, GridConfig3};
pub use field::{Field2, Field3};
pub use field_point::{FieldPoint2, FieldPoint3};
pub use grid2::{Coordinates2, Grid2};
pub use grid3::{Coordinates3, Grid3};
pub use partition::PARALLEL_CHUNK_LEN;
