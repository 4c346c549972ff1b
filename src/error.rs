//! Error types for the prediction client.

use thiserror::Error;

/// Which way a caller-supplied value failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputError {
    /// The value was not supplied at all (JSON `null`, unset env var).
    Null,
    /// The value was supplied but empty after trimming.
    Empty,
    /// The value contains whitespace where none is allowed.
    Whitespace,
}

impl std::fmt::Display for InputError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputError::Null => write!(f, "missing"),
            InputError::Empty => write!(f, "empty"),
            InputError::Whitespace => write!(f, "contains whitespace"),
        }
    }
}

/// Errors that can occur when talking to the prediction service.
#[derive(Debug, Error)]
pub enum LuisError {
    /// Caller passed a missing or empty value where one was required
    #[error("Invalid {field}: {kind}")]
    InvalidInput { field: &'static str, kind: InputError },

    /// Response body is not JSON or lacks a required field
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    /// Service reported a key error through a `statusCode` body
    #[error("Authentication failed: {0}")]
    AuthenticationError(String),

    /// A reply was attempted on a result that carries no dialog
    #[error("No dialog context to reply to")]
    MissingDialogContext,

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Service answered with a non-success status and no recognizable body
    #[error("API error ({status}): {body}")]
    Api { status: u16, body: String },

    /// Invalid client configuration
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// A [`crate::dialog::Prompter`] failed to read the user's answer
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl LuisError {
    pub(crate) fn invalid(field: &'static str, kind: InputError) -> Self {
        LuisError::InvalidInput { field, kind }
    }

    /// True when a required value was not supplied at all, as opposed to
    /// supplied but invalid.
    pub fn is_missing_input(&self) -> bool {
        matches!(self, LuisError::InvalidInput { kind: InputError::Null, .. })
    }
}

impl From<serde_json::Error> for LuisError {
    fn from(err: serde_json::Error) -> Self {
        LuisError::MalformedPayload(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, LuisError>;
