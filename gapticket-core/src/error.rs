//! Error types for gap report input handling

use thiserror::Error;

/// Problems with the JSON document read from standard input.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("Invalid JSON input: {0}")]
    InvalidJson(#[source] serde_json::Error),

    #[error("Invalid input data: {}", .0.join("; "))]
    Invalid(Vec<String>),

    #[error("Invalid input data: {0}")]
    Decode(#[source] serde_json::Error),
}

impl InputError {
    /// Itemized messages for display, one per problem.
    pub fn messages(&self) -> Vec<String> {
        match self {
            InputError::Invalid(errors) => errors.clone(),
            InputError::InvalidJson(err) | InputError::Decode(err) => vec![err.to_string()],
        }
    }
}

/// Result type alias for input handling.
pub type InputResult<T> = Result<T, InputError>;

// =============================================================================
// TESTS
// =============================================================================
