//! gapticket Tracker - Issue Tracker Abstraction
//!
//! Defines the interface the CLI uses to file tickets and the Jira
//! implementation behind it. Callers depend on [`IssueTracker`] only, so tests
//! can substitute a fake without spawning processes or opening sockets.

pub mod config;
pub mod error;
pub mod jira;
pub mod token;

pub use config::{ConfigError, EpicConfig, JiraConfig, ProjectConfig};
pub use error::{TrackerError, TrackerResult};
pub use jira::JiraCliTracker;
pub use token::{ApiToken, TOKEN_ENV_VAR};

use async_trait::async_trait;
use gapticket_core::{GapReport, Priority};

// ============================================================================
// REQUEST TYPES
// ============================================================================

/// Everything needed to file a new ticket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewIssue {
    pub issue_type: String,
    pub summary: String,
    /// Wiki-markup body.
    pub description: String,
    pub priority: Priority,
    pub component: Option<String>,
    /// Parent epic key to link the new ticket to.
    pub epic: Option<String>,
}

impl NewIssue {
    /// Build a ticket request from a report and its rendered description.
    pub fn from_report(
        report: &GapReport,
        description: impl Into<String>,
        issue_type: impl Into<String>,
    ) -> Self {
        Self {
            issue_type: issue_type.into(),
            summary: report.summary.clone(),
            description: description.into(),
            priority: report.effective_priority(),
            component: report.component_name().map(str::to_string),
            epic: report.epic_key().map(str::to_string),
        }
    }
}

/// Fields to change on an existing ticket. Unset fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueUpdate {
    pub description: Option<String>,
    pub summary: Option<String>,
    pub priority: Option<Priority>,
}

impl IssueUpdate {
    pub fn description(text: impl Into<String>) -> Self {
        Self {
            description: Some(text.into()),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.description.as_deref().map_or(true, str::is_empty)
            && self.summary.as_deref().map_or(true, str::is_empty)
            && self.priority.is_none()
    }
}

// ============================================================================
// RESPONSE TYPES
// ============================================================================

/// Outcome of linking a new ticket to its epic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EpicLink {
    NotRequested,
    Linked { epic: String },
    Failed { epic: String, reason: String },
}

/// A ticket that now exists in the tracker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedIssue {
    /// Project-prefixed key, e.g. `PROJ-1234`.
    pub key: String,
    pub epic_link: EpicLink,
}

// ============================================================================
// TRACKER TRAIT
// ============================================================================

/// An issue tracker that gap reports can be filed into.
/// Implementations must be thread-safe (Send + Sync).
#[async_trait]
pub trait IssueTracker: Send + Sync {
    /// Identify the authenticated user. Used to verify the setup.
    async fn current_user(&self) -> TrackerResult<String>;

    /// Create a ticket and, when requested, link it to its epic.
    ///
    /// A failed epic link does not fail the call; it is reported through
    /// [`CreatedIssue::epic_link`].
    async fn create_issue(&self, issue: &NewIssue) -> TrackerResult<CreatedIssue>;

    /// Overwrite the given fields of an existing ticket.
    async fn update_issue(&self, key: &str, update: &IssueUpdate) -> TrackerResult<()>;
}
