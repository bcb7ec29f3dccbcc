//! Error types and handling for the daily digest

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the digest run
///
/// Provider failures are not represented here: they degrade a single section
/// (see [`crate::providers::ProviderError`]) and never abort the run.
#[derive(Error, Debug)]
pub enum DigestError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Template rendering errors
    #[error("Render error: {message}")]
    Render { message: String },

    /// The digest could not be written to its output path
    #[error("Could not write digest to {}: {source}", path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Logging could not be initialised
    #[error("Logging error: {message}")]
    Logging { message: String },
}

impl DigestError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new render error
    pub fn render<S: Into<String>>(message: S) -> Self {
        Self::Render {
            message: message.into(),
        }
    }

    /// Create a new logging error
    pub fn logging<S: Into<String>>(message: S) -> Self {
        Self::Logging {
            message: message.into(),
        }
    }

    /// Create a new output error for `path`
    pub fn output(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Output {
            path: path.into(),
            source,
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            DigestError::Config { message } => {
                format!("Configuration error: {message}. Please check digest.toml and your environment.")
            }
            DigestError::Render { .. } => {
                "The digest page could not be rendered. Please check the template.".to_string()
            }
            DigestError::Output { path, .. } => {
                format!(
                    "Could not write {}. Please check file permissions.",
                    path.display()
                )
            }
            DigestError::Logging { .. } => {
                "Logging could not be set up. Please check RUST_LOG and logging.format.".to_string()
            }
        }
    }
}

impl From<askama::Error> for DigestError {
    fn from(err: askama::Error) -> Self {
        DigestError::render(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let config_err = DigestError::config("missing location");
        assert!(matches!(config_err, DigestError::Config { .. }));

        let render_err = DigestError::render("bad template");
        assert!(matches!(render_err, DigestError::Render { .. }));
    }

    #[test]
    fn test_user_messages() {
        let config_err = DigestError::config("timeout too large");
        assert!(config_err.user_message().contains("timeout too large"));

        let output_err = DigestError::output(
            "site/index.html",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(output_err.user_message().contains("site/index.html"));
        assert!(output_err.to_string().contains("denied"));
    }

    #[test]
    fn test_logging_error_message() {
        let err = DigestError::logging("subscriber already set");
        assert!(err.to_string().contains("subscriber already set"));
        assert!(err.user_message().contains("Logging"));
    }
}
