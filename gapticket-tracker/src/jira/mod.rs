//! Jira implementation of [`IssueTracker`].
//!
//! Tickets are created with jira-cli (which owns authentication and the
//! project defaults) and their fields are then rewritten over REST.

pub mod cli;
pub mod rest;

pub use cli::{create_args, epic_add_args, parse_issue_key, JiraCli};
pub use rest::{RestClient, UpdateRequest};

use crate::config::JiraConfig;
use crate::error::{TrackerError, TrackerResult};
use crate::token::ApiToken;
use crate::{CreatedIssue, EpicLink, IssueTracker, IssueUpdate, NewIssue};
use async_trait::async_trait;
use std::io::Write;
use std::time::Duration;

/// Per-step timeouts. A step that overruns fails; nothing is retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JiraTimeouts {
    pub whoami: Duration,
    pub create: Duration,
    pub epic_link: Duration,
    pub update: Duration,
}

impl Default for JiraTimeouts {
    fn default() -> Self {
        Self {
            whoami: Duration::from_secs(10),
            create: Duration::from_secs(30),
            epic_link: Duration::from_secs(10),
            update: Duration::from_secs(30),
        }
    }
}

#[derive(Debug)]
pub struct JiraCliTracker {
    config: JiraConfig,
    cli: JiraCli,
    rest: RestClient,
    open_in_browser: bool,
    timeouts: JiraTimeouts,
}

impl JiraCliTracker {
    pub fn new(config: JiraConfig, token: ApiToken) -> TrackerResult<Self> {
        let rest = RestClient::new(config.base_url(), token.clone())?;
        Ok(Self {
            config,
            cli: JiraCli::new("jira", token),
            rest,
            open_in_browser: true,
            timeouts: JiraTimeouts::default(),
        })
    }

    /// Use a different jira-cli executable.
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.cli = self.cli.with_program(program);
        self
    }

    /// Whether jira-cli should open the new ticket in a browser.
    pub fn with_browser(mut self, open: bool) -> Self {
        self.open_in_browser = open;
        self
    }

    pub fn with_timeouts(mut self, timeouts: JiraTimeouts) -> Self {
        self.timeouts = timeouts;
        self
    }

    pub fn config(&self) -> &JiraConfig {
        &self.config
    }

    async fn link_epic(&self, epic: &str, key: &str) -> EpicLink {
        let result = self
            .cli
            .run("epic add", &epic_add_args(epic, key), self.timeouts.epic_link)
            .await;
        match result {
            Ok(_) => {
                tracing::info!(%key, %epic, "linked ticket to epic");
                EpicLink::Linked {
                    epic: epic.to_string(),
                }
            }
            Err(err) => {
                tracing::debug!(%key, %epic, error = %err, "epic link failed");
                EpicLink::Failed {
                    epic: epic.to_string(),
                    reason: err.to_string(),
                }
            }
        }
    }
}

#[async_trait]
impl IssueTracker for JiraCliTracker {
    async fn current_user(&self) -> TrackerResult<String> {
        let stdout = self
            .cli
            .run("me", &["me".to_string()], self.timeouts.whoami)
            .await?;
        Ok(stdout.trim().to_string())
    }

    async fn create_issue(&self, issue: &NewIssue) -> TrackerResult<CreatedIssue> {
        // jira-cli reads the body from a file; it lives until this call returns.
        let mut description_file = tempfile::Builder::new()
            .prefix("gapticket-description-")
            .suffix(".txt")
            .tempfile()?;
        description_file.write_all(issue.description.as_bytes())?;
        description_file.flush()?;
        let description_path = description_file.path().to_string_lossy().into_owned();

        let args = create_args(issue, &description_path, self.open_in_browser);
        let stdout = self
            .cli
            .run("issue create", &args, self.timeouts.create)
            .await?;

        let key = parse_issue_key(&stdout).ok_or_else(|| TrackerError::MissingIssueKey {
            stdout: stdout.trim().to_string(),
        })?;
        tracing::info!(%key, url = %self.config.browse_url(&key), "created ticket");

        let epic_link = match issue.epic.as_deref() {
            Some(epic) => self.link_epic(epic, &key).await,
            None => EpicLink::NotRequested,
        };

        Ok(CreatedIssue { key, epic_link })
    }

    async fn update_issue(&self, key: &str, update: &IssueUpdate) -> TrackerResult<()> {
        self.rest.update_issue(key, update, self.timeouts.update).await?;
        tracing::info!(%key, "updated ticket");
        Ok(())
    }
}
