//! Error types for model generation and transmission

use thiserror::Error;

/// Errors raised while building or validating a structural model
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Point '{0}' not found in model")]
    PointNotFound(String),

    #[error("Frame '{0}' not found in model")]
    FrameNotFound(String),

    #[error("Material '{0}' not found in model")]
    MaterialNotFound(String),

    #[error("Section '{0}' not found in model")]
    SectionNotFound(String),

    #[error("Load pattern '{0}' not found in model")]
    LoadPatternNotFound(String),

    #[error("Load combination '{0}' not found in model")]
    LoadCombinationNotFound(String),

    #[error("Duplicate name '{0}' already exists")]
    DuplicateName(String),

    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Result type for model operations
pub type ModelResult<T> = Result<T, ModelError>;

/// Failure reported by the automation interface of the host application.
///
/// The generator never interprets these beyond passing them up.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{call} returned status {status}")]
    Status { call: &'static str, status: i32 },

    #[error("{call} raised a fault: {message}")]
    Fault { call: &'static str, message: String },

    #[error("IO error in {call}: {source}")]
    Io {
        call: &'static str,
        #[source]
        source: std::io::Error,
    },
}

impl ApiError {
    /// Name of the automation call that failed
    pub fn call(&self) -> &'static str {
        match self {
            Self::Status { call, .. } | Self::Fault { call, .. } | Self::Io { call, .. } => call,
        }
    }
}

/// Result type for automation calls
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors raised while replaying a model through an automation interface
#[derive(Error, Debug)]
pub enum ApplyError {
    #[error("Model rejected before transmission: {0}")]
    Model(#[from] ModelError),

    /// A host call failed; `index` is the zero-based position of the call in the sequence
    #[error("Call #{index} ({call}) failed: {source}")]
    Host {
        index: usize,
        call: &'static str,
        #[source]
        source: ApiError,
    },

    #[error("No host name recorded for '{0}'")]
    UnknownName(String),
}

/// Result type for apply operations
pub type ApplyResult<T> = Result<T, ApplyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_reports_call() {
        let err = ApiError::Status {
            call: "add_point",
            status: 1,
        };
        assert_eq!(err.call(), "add_point");
        assert_eq!(err.to_string(), "add_point returned status 1");
    }

    #[test]
    fn test_apply_error_wraps_host_failure() {
        let err = ApplyError::Host {
            index: 7,
            call: "add_frame",
            source: ApiError::Fault {
                call: "add_frame",
                message: "connection lost".to_string(),
            },
        };
        assert!(err.to_string().starts_with("Call #7 (add_frame) failed"));
    }
}
