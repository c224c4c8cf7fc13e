//! Error types for tracker operations

use thiserror::Error;

/// Failures talking to the issue tracker.
#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("Failed to start `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` timed out after {timeout_secs}s")]
    Timeout { command: String, timeout_secs: u64 },

    #[error("`{command}` exited with {status}: {stderr}")]
    CommandFailed {
        command: String,
        status: String,
        stderr: String,
    },

    #[error("Ticket created but no issue key found in output: {stdout}")]
    MissingIssueKey { stdout: String },

    #[error("No fields to update")]
    NoFieldsToUpdate,

    #[error("Update of {key} failed with status {status}: {body}")]
    UpdateRejected { key: String, status: u16, body: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for tracker operations.
pub type TrackerResult<T> = Result<T, TrackerError>;
