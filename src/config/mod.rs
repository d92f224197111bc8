//! Discovery configuration.
//!
//! Two inputs drive extension discovery:
//! - [`ProcessEnv`]: an explicit snapshot of the process (environment variables,
//!   working directory, invoked script, platform) so path resolution is a pure
//!   function of its arguments.
//! - [`DiscoverySettings`]: the naming convention and lookup layout used to find
//!   extension packages and their index modules.
//!
//! ```rust,no_run
//! use pluggable_generator::config::{DiscoverySettings, ProcessEnv};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let process = ProcessEnv::capture()?;
//! let settings = DiscoverySettings::from_file(".generator/discovery.json")?;
//! # Ok(())
//! # }
//! ```

pub mod env;
pub mod settings;

pub use env::{APPDATA_VAR, NODE_PATH_VAR, NVM_PATH_VAR, Platform, ProcessEnv};
pub use settings::DiscoverySettings;

use thiserror::Error;

/// Errors that can occur while loading or validating configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Invalid configuration value
    #[error("Invalid value for {key}: {message}")]
    InvalidValue {
        /// The key with invalid value
        key: String,
        /// Error message
        message: String,
    },

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error (file operations)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Multiple validation errors
    #[error("{0}")]
    ValidationErrors(ValidationErrors),
}

impl ConfigError {
    pub(crate) fn invalid(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            key: key.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug)]
pub struct ValidationErrors(pub Vec<ConfigError>);

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Validation failed: ")?;
        let msgs: Vec<String> = self.0.iter().map(|e| e.to_string()).collect();
        write!(f, "{}", msgs.join("; "))
    }
}

/// Result type for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_errors_display() {
        let errors = ValidationErrors(vec![
            ConfigError::invalid("lookups", "must not be empty"),
            ConfigError::invalid("package_prefix", "must not be empty"),
        ]);
        let msg = errors.to_string();
        assert!(msg.starts_with("Validation failed: "));
        assert!(msg.contains("lookups"));
        assert!(msg.contains("; "));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: ConfigError = io_err.into();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
