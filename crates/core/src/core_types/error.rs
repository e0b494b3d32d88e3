//! Error type shared by grid construction, field operators and solvers
//!
//! Every fallible operation in this crate reports a [`FieldError`]. Errors are
//! raised at the call that would introduce the invalid state and are never
//! silently clamped; checked coordinate lookups do not fail, they resolve
//! through the active boundary policy instead.

/// Errors produced by field construction, operators, queues and solvers
#[derive(Debug, Clone, PartialEq)]
pub enum FieldError {
    /// Domain has a zero, negative or non-finite span on some axis
    InvalidDomain(String),
    /// Sample count on some axis is below the minimum of 2
    InvalidResolution {
        /// Axis name (`"x"`, `"y"` or `"z"`)
        axis: &'static str,
        /// Offending count
        count: usize,
    },
    /// Buffer or field length differs from the expected sample count
    ResolutionMismatch {
        /// Expected number of samples
        expected: usize,
        /// Number of samples actually supplied
        actual: usize,
    },
    /// `remove_min` was called on an empty priority queue
    EmptyQueue,
    /// Source index lies outside the cost field
    InvalidSource {
        /// Offending flat index
        index: usize,
        /// Number of cells in the cost field
        count: usize,
    },
    /// Simulation or graph configuration parameter is invalid
    InvalidConfig(String),
}

impl FieldError {
    /// Construct a [`FieldError::ResolutionMismatch`] if the lengths differ
    ///
    /// # Errors
    /// Returns `ResolutionMismatch` when `actual != expected`
    #[inline]
    pub fn check_len(expected: usize, actual: usize) -> Result<(), FieldError> {
        if expected == actual {
            Ok(())
        } else {
            Err(FieldError::ResolutionMismatch { expected, actual })
        }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldError::InvalidDomain(msg) => write!(f, "Invalid domain: {msg}"),
            FieldError::InvalidResolution { axis, count } => write!(
                f,
                "Invalid resolution: the field must have 2 or more values along {axis} (got {count})"
            ),
            FieldError::ResolutionMismatch { expected, actual } => write!(
                f,
                "Resolution mismatch: expected {expected} samples, got {actual}"
            ),
            FieldError::EmptyQueue => write!(f, "Cannot remove from an empty priority queue"),
            FieldError::InvalidSource { index, count } => write!(
                f,
                "Invalid source index {index} for a field of {count} cells"
            ),
            FieldError::InvalidConfig(msg) => write!(f, "Invalid configuration: {msg}"),
        }
    }
}

impl std::error::Error for FieldError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_len() {
        assert!(FieldError::check_len(4, 4).is_ok());
        assert_eq!(
            FieldError::check_len(4, 5),
            Err(FieldError::ResolutionMismatch {
                expected: 4,
                actual: 5
            })
        );
    }

    #[test]
    fn test_display_messages() {
        let err = FieldError::InvalidResolution {
            axis: "y",
            count: 1,
        };
        assert!(err.to_string().contains("along y"));
        assert_eq!(
            FieldError::EmptyQueue.to_string(),
            "Cannot remove from an empty priority queue"
        );
    }
}
