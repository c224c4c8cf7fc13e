//! gapticket CLI library exports.
//!
//! The binary is a thin shell over these functions; they take the tracker as
//! a trait object so the whole flow runs against a mock in tests.

pub mod args;
pub mod draft;
pub mod error;
pub mod telemetry;

use error::CliError;
use gapticket_core::{parse_report, render_description, GapReport};
use gapticket_tracker::{EpicLink, IssueTracker, IssueUpdate, JiraConfig, NewIssue};

/// A ticket that was created, plus anything that went wrong afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateOutcome {
    pub key: String,
    /// Non-fatal problems, printed as `WARNING:` lines.
    pub warnings: Vec<String>,
}

/// Parse and render a report without contacting the tracker.
pub fn render_report(input: &str) -> Result<(GapReport, String), CliError> {
    let report = parse_report(input)?;
    let description = render_description(&report);
    Ok((report, description))
}

/// Validate, render, create, then rewrite the description.
///
/// Creation failures are fatal. Once the ticket exists, a failed epic link or
/// description update is only a warning.
pub async fn create_ticket(
    tracker: &dyn IssueTracker,
    input: &str,
    issue_type: &str,
) -> Result<CreateOutcome, CliError> {
    let (report, description) = render_report(input)?;
    let issue = NewIssue::from_report(&report, description.clone(), issue_type);

    let created = tracker
        .create_issue(&issue)
        .await
        .map_err(CliError::Create)?;
    let key = created.key;
    let mut warnings = Vec::new();

    if let EpicLink::Failed { epic, reason } = created.epic_link {
        warnings.push(format!(
            "Ticket {key} created but epic link to {epic} failed: {reason}"
        ));
    }

    // jira-cli converts the body on create; put the original markup back.
    if let Err(err) = tracker
        .update_issue(&key, &IssueUpdate::description(description))
        .await
    {
        tracing::warn!(%key, error = %err, "description update failed");
        warnings.push(format!("Created {key} but failed to update description"));
    }

    Ok(CreateOutcome { key, warnings })
}

/// Confirm the tracker accepts our credentials and describe the setup.
pub async fn check_setup(
    tracker: &dyn IssueTracker,
    config: &JiraConfig,
) -> Result<Vec<String>, CliError> {
    let user = tracker.current_user().await.map_err(CliError::Check)?;
    let mut lines = vec![format!(
        "JIRA configured: {} (project: {})",
        config.base_url(),
        config.project.key
    )];
    if !user.is_empty() {
        lines.push(format!("Authenticated as: {user}"));
    }
    if let Some(field) = config.epic_link_field() {
        lines.push(format!("Epic link field: {field}"));
    }
    Ok(lines)
}
