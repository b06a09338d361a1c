use std::path::PathBuf;
use thiserror::Error;

/// Codemap error types
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Config validation error: {0}")]
    ConfigValidation(String),

    #[error("Not a directory: {0}")]
    InvalidRoot(PathBuf),

    #[error("Parse error in {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Directory walk error: {0}")]
    WalkDir(#[from] walkdir::Error),

    #[error("Failed to write {path}: {message}")]
    ArtifactWrite { path: PathBuf, message: String },

    #[error("Parser error: {0}")]
    Parser(String),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for codemap operations
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a config validation error
    pub fn config_validation(msg: impl Into<String>) -> Self {
        Error::ConfigValidation(msg.into())
    }

    /// Create a parse error
    pub fn parse(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Error::Parse {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create an artifact write error
    pub fn artifact_write(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Error::ArtifactWrite {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a parser error
    pub fn parser(msg: impl Into<String>) -> Self {
        Error::Parser(msg.into())
    }

    /// Create a generic error
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_display() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(err.to_string().contains("IO error"));
    }

    #[test]
    fn test_invalid_root_display() {
        let err = Error::InvalidRoot(PathBuf::from("/some/path"));
        assert_eq!(err.to_string(), "Not a directory: /some/path");
    }

    #[test]
    fn test_parse_error_display() {
        let err = Error::parse("pkg/broken.py", "syntax error at line 3, column 7");
        assert!(err.to_string().contains("pkg/broken.py"));
        assert!(err.to_string().contains("line 3"));
    }

    #[test]
    fn test_artifact_write_display() {
        let err = Error::artifact_write("/out/map.json", "permission denied");
        assert!(err.to_string().contains("/out/map.json"));
        assert!(err.to_string().contains("permission denied"));
    }

    #[test]
    fn test_config_validation_display() {
        let err = Error::config_validation("extension must not be empty");
        assert_eq!(
            err.to_string(),
            "Config validation error: extension must not be empty"
        );
    }

    #[test]
    fn test_other_error() {
        let err = Error::other("something went wrong");
        assert_eq!(err.to_string(), "something went wrong");
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Error>();
    }
}
