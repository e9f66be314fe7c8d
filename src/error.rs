use thiserror::Error;

/// Unified error type for expo-bump operations
#[derive(Error, Debug)]
pub enum ExpoBumpError {
    /// Precondition failure the user can fix; printed without decoration
    #[error("{0}")]
    Usage(String),

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Command `{command}` failed: {stderr}")]
    Command { command: String, stderr: String },

    #[error("Manifest error: {0}")]
    Manifest(String),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Version error: {0}")]
    Version(String),

    #[error("Publish failed: {0}")]
    Publish(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in expo-bump
pub type Result<T> = std::result::Result<T, ExpoBumpError>;

impl ExpoBumpError {
    /// Create a user-facing precondition error
    pub fn usage(msg: impl Into<String>) -> Self {
        ExpoBumpError::Usage(msg.into())
    }

    /// Create a manifest (configuration document) error
    pub fn manifest(msg: impl Into<String>) -> Self {
        ExpoBumpError::Manifest(msg.into())
    }

    /// Create a version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        ExpoBumpError::Version(msg.into())
    }

    /// Create a publish error with context
    pub fn publish(msg: impl Into<String>) -> Self {
        ExpoBumpError::Publish(msg.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ExpoBumpError::Config(msg.into())
    }

    /// Whether this error is a user-actionable precondition failure
    pub fn is_usage(&self) -> bool {
        matches!(self, ExpoBumpError::Usage(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usage_error_is_plain_message() {
        let err = ExpoBumpError::usage("You need to push your changes first");
        assert_eq!(err.to_string(), "You need to push your changes first");
        assert!(err.is_usage());
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: ExpoBumpError = io_err.into();
        assert!(err.to_string().contains("I/O error"));
        assert!(!err.is_usage());
    }

    #[test]
    fn test_error_from_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{ nope").unwrap_err();
        let err: ExpoBumpError = json_err.into();
        assert!(err.to_string().starts_with("Invalid JSON"));
    }

    #[test]
    fn test_command_error_display() {
        let err = ExpoBumpError::Command {
            command: "git push origin 1.0.0".to_string(),
            stderr: "rejected".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Command `git push origin 1.0.0` failed: rejected"
        );
    }

    #[test]
    fn test_error_messages_are_descriptive() {
        let error_pairs = vec![
            (ExpoBumpError::manifest("x"), "Manifest error"),
            (ExpoBumpError::version("x"), "Version error"),
            (ExpoBumpError::publish("x"), "Publish failed"),
            (ExpoBumpError::config("x"), "Configuration error"),
        ];

        for (err, expected_prefix) in error_pairs {
            let msg = err.to_string();
            assert!(
                msg.starts_with(expected_prefix),
                "Error message should start with '{}', but got '{}'",
                expected_prefix,
                msg
            );
        }
    }
}
