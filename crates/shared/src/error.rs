//! Error types for Roadwatch

use thiserror::Error;

/// General Roadwatch error type
#[derive(Debug, Error)]
pub enum RoadwatchError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Protocol error: {0}")]
    Protocol(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, RoadwatchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = RoadwatchError::Config("storage.uri must not be empty".to_string());
        assert_eq!(
            err.to_string(),
            "Configuration error: storage.uri must not be empty"
        );
    }

    #[test]
    fn test_json_error_conversion() {
        let parse: std::result::Result<serde_json::Value, _> = serde_json::from_str("{oops");
        let err: RoadwatchError = parse.unwrap_err().into();
        assert!(matches!(err, RoadwatchError::Json(_)));
        assert!(err.to_string().starts_with("JSON error:"));
    }
}
