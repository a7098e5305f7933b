//! Error types for the frustum probe
//!
//! Parameter edits, scene-node lookups, geometry processing and the renderer
//! collaborator all report through this single error type.

use std::fmt;

/// Result type for frustum probe operations
pub type Result<T> = std::result::Result<T, Error>;

/// Frustum probe errors
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// A frustum parameter edit was rejected (non-numeric, out of range, near >= far)
    InvalidParameter(String),

    /// A projection name that is neither perspective nor orthographic
    UnknownProjection(String),

    /// A scene node key that does not (or no longer) exist
    InvalidNode(String),

    /// Geometry that cannot be processed (empty, non-finite, bad index buffer)
    DegenerateGeometry(String),

    /// The renderer collaborator failed to draw a pass
    RenderFailed(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidParameter(msg) => write!(f, "Invalid parameter: {}", msg),
            Error::UnknownProjection(name) => write!(f, "Unknown projection: '{}'", name),
            Error::InvalidNode(msg) => write!(f, "Invalid node: {}", msg),
            Error::DegenerateGeometry(msg) => write!(f, "Degenerate geometry: {}", msg),
            Error::RenderFailed(msg) => write!(f, "Render failed: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

// ===== ERROR MACROS =====

/// Build an error of the given variant and log it at ERROR level (with file:line).
///
/// # Example
///
/// ```ignore
/// let err = engine_err!("probe::Scene", InvalidNode, "Node {:?} not found", key);
/// ```
#[macro_export]
macro_rules! engine_err {
    ($source:expr, $kind:ident, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::engine_error!($source, "{}", message);
        $crate::error::Error::$kind(message)
    }};
}

/// Return early with an error built by `engine_err!`.
#[macro_export]
macro_rules! engine_bail {
    ($source:expr, $kind:ident, $($arg:tt)*) => {
        return Err($crate::engine_err!($source, $kind, $($arg)*))
    };
}

/// Return early with `Error::InvalidParameter`, logged at WARN level.
///
/// Rejected edits are expected during live UI input, so they are not errors
/// from the logger's point of view.
#[macro_export]
macro_rules! engine_reject {
    ($source:expr, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::engine_warn!($source, "Rejected: {}", message);
        return Err($crate::error::Error::InvalidParameter(message));
    }};
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
