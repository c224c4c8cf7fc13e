//! Error types for the CLI.

use gapticket_core::InputError;
use gapticket_tracker::{ConfigError, TrackerError, TOKEN_ENV_VAR};
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("JIRA_API_TOKEN environment variable not set")]
    MissingToken,
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Input(#[from] InputError),
    #[error("Failed to create JIRA ticket: {0}")]
    Create(#[source] TrackerError),
    #[error("JIRA connection test failed: {0}")]
    Check(#[source] TrackerError),
    #[error(transparent)]
    Tracker(#[from] TrackerError),
    #[error("Failed to read standard input: {0}")]
    Stdin(#[source] std::io::Error),
    #[error("Failed to write draft {}: {source}", .path.display())]
    Draft {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CliError {
    /// Lines to print on stderr for this failure.
    pub fn diagnostic_lines(&self) -> Vec<String> {
        match self {
            CliError::MissingToken => missing_token_guidance(),
            CliError::Input(InputError::InvalidJson(err)) => {
                vec![format!("ERROR: Invalid JSON input: {err}")]
            }
            CliError::Input(err) => std::iter::once("ERROR: Invalid input data:".to_string())
                .chain(err.messages().into_iter().map(|m| format!("  - {m}")))
                .collect(),
            other => vec![format!("ERROR: {other}")],
        }
    }
}

/// Setup instructions shown when the token is missing.
pub fn missing_token_guidance() -> Vec<String> {
    vec![
        format!("ERROR: {TOKEN_ENV_VAR} environment variable not set"),
        String::new(),
        "To create a JIRA API token:".to_string(),
        "1. Open your JIRA profile page (<server>/secure/ViewProfile.jspa)".to_string(),
        "2. Click 'Personal Access Tokens' in the left sidebar".to_string(),
        "3. Click 'Create token'".to_string(),
        "4. Give it a name (e.g., 'gapticket') and an expiration (90 days recommended)".to_string(),
        "5. Copy the token and set it in your shell:".to_string(),
        String::new(),
        format!("   export {TOKEN_ENV_VAR}='your-token-here'"),
        String::new(),
        "For a persistent setup, add the export line to your shell profile.".to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_errors_are_itemized() {
        let err = CliError::Input(InputError::Invalid(vec![
            "Missing required field: summary".to_string(),
            "tasks must be a non-empty list".to_string(),
        ]));
        assert_eq!(
            err.diagnostic_lines(),
            vec![
                "ERROR: Invalid input data:",
                "  - Missing required field: summary",
                "  - tasks must be a non-empty list",
            ]
        );
    }

    #[test]
    fn test_invalid_json_single_line() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let lines = CliError::Input(InputError::InvalidJson(source)).diagnostic_lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("ERROR: Invalid JSON input:"));
    }

    #[test]
    fn test_missing_token_guidance_mentions_export() {
        let lines = CliError::MissingToken.diagnostic_lines();
        assert_eq!(lines[0], "ERROR: JIRA_API_TOKEN environment variable not set");
        assert!(lines.iter().any(|l| l.contains("export JIRA_API_TOKEN=")));
    }

    #[test]
    fn test_create_failure_prefix() {
        let err = CliError::Create(TrackerError::NoFieldsToUpdate);
        assert_eq!(
            err.diagnostic_lines(),
            vec!["ERROR: Failed to create JIRA ticket: No fields to update"]
        );
    }
}
