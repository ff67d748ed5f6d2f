//! Error types for the spike-encoding kernels

use thiserror::Error;

/// Result type for kernel operations
pub type Result<T> = std::result::Result<T, FireError>;

/// Contract violations detected at the kernel boundary
///
/// The kernels themselves are total; every variant here describes an
/// ill-formed call that was rejected before any element was touched.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FireError {
    /// Input and output shapes differ where they must agree
    #[error("Shape mismatch in {operation}: expected {expected:?}, got {got:?}")]
    ShapeMismatch {
        /// Operation that rejected the call
        operation: &'static str,
        /// Expected dimensions
        expected: Vec<usize>,
        /// Actual dimensions
        got: Vec<usize>,
    },

    /// Tensor has the wrong number of axes for the operation
    #[error("Invalid rank in {operation}: expected {expected} axes, got {got}")]
    InvalidRank {
        /// Operation that rejected the call
        operation: &'static str,
        /// Required rank
        expected: usize,
        /// Actual rank
        got: usize,
    },

    /// Buffer length does not match the declared shape
    #[error("Buffer length mismatch: shape requires {expected} elements, got {got}")]
    LengthMismatch {
        /// Element count implied by the shape
        expected: usize,
        /// Element count of the buffer
        got: usize,
    },

    /// Runtime scalar-type tag is not one of the supported types
    #[error("Unsupported scalar type: {tag}")]
    UnsupportedType {
        /// The unrecognized tag
        tag: String,
    },

    /// Typed access requested for a tensor holding another scalar type
    #[error("Scalar type mismatch: expected {expected}, got {got}")]
    TypeMismatch {
        /// Requested scalar type
        expected: String,
        /// Stored scalar type
        got: String,
    },

    /// Invalid device configuration
    #[error("Invalid configuration: {reason}")]
    InvalidConfiguration {
        /// Reason for invalid configuration
        reason: String,
    },

    /// Invalid parameter value
    #[error("Invalid parameter {parameter}: {value} (expected {constraint})")]
    InvalidParameter {
        /// Parameter name
        parameter: String,
        /// Invalid value
        value: String,
        /// Constraint description
        constraint: String,
    },

    /// Worker pool could not be created
    #[error("Thread pool error: {reason}")]
    ThreadPool {
        /// Reason reported by the pool builder
        reason: String,
    },
}

impl FireError {
    /// Create a shape mismatch error
    pub fn shape_mismatch(operation: &'static str, expected: &[usize], got: &[usize]) -> Self {
        Self::ShapeMismatch {
            operation,
            expected: expected.to_vec(),
            got: got.to_vec(),
        }
    }

    /// Create an invalid rank error
    pub fn invalid_rank(operation: &'static str, expected: usize, got: usize) -> Self {
        Self::InvalidRank {
            operation,
            expected,
            got,
        }
    }

    /// Create an unsupported type error
    pub fn unsupported_type(tag: impl Into<String>) -> Self {
        Self::UnsupportedType { tag: tag.into() }
    }

    /// Create a type mismatch error
    pub fn type_mismatch(expected: impl ToString, got: impl ToString) -> Self {
        Self::TypeMismatch {
            expected: expected.to_string(),
            got: got.to_string(),
        }
    }

    /// Create an invalid configuration error
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            reason: reason.into(),
        }
    }

    /// Create an invalid parameter error
    pub fn invalid_parameter(
        parameter: impl Into<String>,
        value: impl Into<String>,
        constraint: impl Into<String>,
    ) -> Self {
        Self::InvalidParameter {
            parameter: parameter.into(),
            value: value.into(),
            constraint: constraint.into(),
        }
    }
}

impl From<rayon::ThreadPoolBuildError> for FireError {
    fn from(err: rayon::ThreadPoolBuildError) -> Self {
        Self::ThreadPool {
            reason: err.to_string(),
        }
    }
}
