//! Optimization error kinds.

use std::path::PathBuf;
use thiserror::Error;

/// Failure of a single optimize attempt.
///
/// Each kind is isolated to the request or batch item that produced it.
#[derive(Debug, Error)]
pub enum OptimizeError {
    /// Missing or non-SVG-shaped markup. User-correctable, never retried.
    #[error("{0}")]
    InvalidInputShape(String),

    /// Optimization server not reachable or not started.
    #[error(
        "SVG Optimization Server is not reachable at {url}: {reason}\n  start it first with `svg2tsx serve`"
    )]
    OptimizerUnavailable { url: String, reason: String },

    /// Optimizer ran but produced no usable output.
    #[error("{message}")]
    OptimizerFailure {
        message: String,
        /// Optimizer diagnostics, serialized as JSON when available.
        diagnostic: Option<String>,
    },

    /// Writing the result back failed.
    #[error("failed to write `{}`", path.display())]
    PersistenceFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl OptimizeError {
    pub fn missing_markup() -> Self {
        Self::InvalidInputShape("SVG string is required".to_string())
    }

    pub fn not_svg() -> Self {
        Self::InvalidInputShape("Invalid SVG format".to_string())
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self::OptimizerFailure {
            message: message.into(),
            diagnostic: None,
        }
    }

    pub fn persistence(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::PersistenceFailure {
            path: path.into(),
            source,
        }
    }

    /// HTTP status the optimization server answers with for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidInputShape(_) => 400,
            Self::OptimizerUnavailable { .. } => 503,
            Self::OptimizerFailure { .. } | Self::PersistenceFailure { .. } => 500,
        }
    }

    pub fn diagnostic(&self) -> Option<&str> {
        match self {
            Self::OptimizerFailure { diagnostic, .. } => diagnostic.as_deref(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(OptimizeError::missing_markup().status_code(), 400);
        assert_eq!(OptimizeError::not_svg().status_code(), 400);
        assert_eq!(OptimizeError::failure("x").status_code(), 500);
    }

    #[test]
    fn test_unavailable_message_has_remediation() {
        let err = OptimizeError::OptimizerUnavailable {
            url: "http://localhost:3600/api/optimize".into(),
            reason: "connection refused".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("localhost:3600"));
        assert!(msg.contains("svg2tsx serve"));
    }

    #[test]
    fn test_persistence_display() {
        let err = OptimizeError::persistence(
            "icons/Home.tsx",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(err.to_string().contains("icons/Home.tsx"));
    }
}
