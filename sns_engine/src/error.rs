//! Error types for the Sun'n'Slaughter engine
//!
//! This module defines the error types used throughout the engine core:
//! geometry construction, camera configuration and scene building.

use std::fmt;

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Engine errors
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Degenerate geometry (collinear plane points, zero-length basis vectors)
    InvalidGeometry(String),

    /// Out-of-range camera or game settings (near >= far, fov outside (0, 180), ...)
    InvalidConfiguration(String),

    /// Invalid imported resource (empty mesh, missing data)
    InvalidResource(String),

    /// Failure reported by the rendering backend
    BackendError(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidGeometry(msg) => write!(f, "Invalid geometry: {}", msg),
            Error::InvalidConfiguration(msg) => write!(f, "Invalid configuration: {}", msg),
            Error::InvalidResource(msg) => write!(f, "Invalid resource: {}", msg),
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

// ===== ERROR MACROS =====

/// Build an `Error` of the given kind and log it at ERROR severity
///
/// # Example
///
/// ```ignore
/// let err = engine_err!("sns::Frustum", InvalidConfiguration, "near {} >= far {}", near, far);
/// ```
#[macro_export]
macro_rules! engine_err {
    ($source:expr, $kind:ident, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::engine_error!($source, "{}", message);
        $crate::sns::Error::$kind(message)
    }};
}

/// Log and return an `Error` of the given kind from the current function
#[macro_export]
macro_rules! engine_bail {
    ($source:expr, $kind:ident, $($arg:tt)*) => {
        return Err($crate::engine_err!($source, $kind, $($arg)*))
    };
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
