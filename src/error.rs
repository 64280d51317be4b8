//! Error types for the label copy.

use thiserror::Error;

/// Error is every way a copy run can fail. None of them are recovered from.
#[derive(Debug, Error)]
pub enum Error {
    /// A required option is missing or malformed.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The orchestration API cannot be reached or rejected our credentials.
    #[error("connectivity error: {0}")]
    Connectivity(String),

    /// The node or pod does not exist.
    #[error("{kind} '{name}' not found")]
    NotFound { kind: &'static str, name: String },

    /// The patch was rejected.
    #[error("failed to apply patch: {0}")]
    Apply(String),

    /// The patch document could not be encoded.
    #[error("failed to serialize patch: {0}")]
    Serialization(String),

    /// Output could not be written.
    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

impl Error {
    pub fn not_found(kind: &'static str, name: impl Into<String>) -> Self {
        Error::NotFound {
            kind,
            name: name.into(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let err = Error::not_found("node", "worker-1");
        assert_eq!(err.to_string(), "node 'worker-1' not found");
    }

    #[test]
    fn test_json_error_is_serialization() {
        let err: Error = serde_json::from_str::<u8>("nope").unwrap_err().into();
        assert!(matches!(err, Error::Serialization(_)));
    }

    #[test]
    fn test_io_error_is_output() {
        let err: Error = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed").into();
        assert!(matches!(err, Error::Output(_)));
        assert_eq!(err.to_string(), "failed to write output: closed");
    }
}
