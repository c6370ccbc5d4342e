//! Error types for reassignment runs and the file handling around them

use std::fmt;
use std::path::PathBuf;

/// Boxed cause reported by an exact solver
pub type SolverCause = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Main error type for all engine and file operations
///
/// Every error is terminal for the run that raised it: no partial output is
/// produced and nothing is retried.
#[derive(Debug)]
pub enum ReassignError {
    /// Source and target pixel collections differ in length
    SizeMismatch {
        /// Number of source pixels
        source_len: usize,
        /// Number of target pixels
        target_len: usize,
    },

    /// Exact mode requested but no solver capability was supplied
    ExactModeUnavailable,

    /// Exact mode requested for more pixels than the configured ceiling
    ExactModeTooLarge {
        /// Pixel count of the rejected run
        pixels: usize,
        /// Largest pixel count accepted in exact mode
        ceiling: usize,
    },

    /// The exact solver raised an error or returned a malformed result
    SolverFailure {
        /// What went wrong
        reason: String,
        /// Error raised by the solver itself, if any
        cause: Option<SolverCause>,
    },

    /// A run was requested while another one is still active
    AlreadyRunning,

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Failed to load an image from the filesystem
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// Failed to save the rearranged image
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl fmt::Display for ReassignError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SizeMismatch {
                source_len,
                target_len,
            } => {
                write!(
                    f,
                    "Source has {source_len} pixels but target has {target_len}"
                )
            }
            Self::ExactModeUnavailable => {
                write!(f, "Exact mode requested but no exact solver is available")
            }
            Self::ExactModeTooLarge { pixels, ceiling } => {
                write!(
                    f,
                    "Exact mode supports at most {ceiling} pixels, got {pixels}"
                )
            }
            Self::SolverFailure { reason, cause } => match cause {
                Some(cause) => write!(f, "Exact solver failed: {reason}: {cause}"),
                None => write!(f, "Exact solver failed: {reason}"),
            },
            Self::AlreadyRunning => {
                write!(f, "A reassignment run is already in progress")
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for ReassignError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            Self::SolverFailure {
                cause: Some(cause), ..
            } => Some(cause.as_ref()),
            _ => None,
        }
    }
}

/// Convenience type alias for engine results
pub type Result<T> = std::result::Result<T, ReassignError>;

impl From<image::ImageError> for ReassignError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageLoad {
            path: PathBuf::from("<unknown>"),
            source: err,
        }
    }
}

impl From<std::io::Error> for ReassignError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> ReassignError {
    ReassignError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a solver failure without an underlying cause
pub fn solver_failure(reason: &impl ToString) -> ReassignError {
    ReassignError::SolverFailure {
        reason: reason.to_string(),
        cause: None,
    }
}

/// Create an error for an invalid path argument
pub fn path_error(msg: &str) -> ReassignError {
    ReassignError::InvalidParameter {
        parameter: "path",
        value: String::new(),
        reason: msg.to_string(),
    }
}
