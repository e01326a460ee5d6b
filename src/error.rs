use std::io;
use std::path::PathBuf;
use thiserror::Error;

// =============================================================================
// Crate-wide error type
// =============================================================================

#[derive(Error, Debug)]
pub enum DemoError {
    #[error("Invalid argument: '{field}' must not be empty")]
    InvalidArgument { field: &'static str },

    #[error("Assertion failed: {0}")]
    Assertion(String),

    #[error("Harness cannot run from state {state}")]
    InvalidState { state: String },

    #[error("Failed to write log to {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse settings: {0}")]
    Settings(#[from] toml::de::Error),
}

impl DemoError {
    pub fn invalid_argument(field: &'static str) -> Self {
        Self::InvalidArgument { field }
    }

    pub fn assertion(message: impl Into<String>) -> Self {
        Self::Assertion(message.into())
    }

    pub fn invalid_state(state: impl Into<String>) -> Self {
        Self::InvalidState {
            state: state.into(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Rejects empty or whitespace-only text for a named field.
pub(crate) fn require_text(field: &'static str, value: &str) -> Result<(), DemoError> {
    if value.trim().is_empty() {
        return Err(DemoError::invalid_argument(field));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_argument_display() {
        let display = format!("{}", DemoError::invalid_argument("title"));
        assert!(display.contains("'title'"));
        assert!(display.contains("must not be empty"));
    }

    #[test]
    fn test_io_error_display_names_path() {
        let err = DemoError::io(
            "/nowhere/log.txt",
            io::Error::new(io::ErrorKind::NotFound, "missing"),
        );
        let display = format!("{}", err);
        assert!(display.contains("/nowhere/log.txt"));
        assert!(display.contains("missing"));
    }

    #[test]
    fn test_require_text() {
        assert!(require_text("topic", "programming").is_ok());
        assert!(matches!(
            require_text("topic", "   "),
            Err(DemoError::InvalidArgument { field: "topic" })
        ));
    }

    #[test]
    fn test_error_is_send_and_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}
        assert_send::<DemoError>();
        assert_sync::<DemoError>();
    }
}
