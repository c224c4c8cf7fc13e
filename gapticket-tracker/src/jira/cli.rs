//! Subprocess plumbing for the `jira` command-line client.

use crate::error::{TrackerError, TrackerResult};
use crate::token::{ApiToken, TOKEN_ENV_VAR};
use crate::NewIssue;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

/// Runs jira-cli with the token injected into its environment.
#[derive(Clone)]
pub struct JiraCli {
    program: String,
    token: ApiToken,
}

impl JiraCli {
    pub fn new(program: impl Into<String>, token: ApiToken) -> Self {
        Self {
            program: program.into(),
            token,
        }
    }

    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Run one jira-cli invocation and return its stdout.
    ///
    /// `label` names the invocation in logs and errors; arguments are not
    /// logged since they carry ticket text.
    pub async fn run(&self, label: &str, args: &[String], timeout: Duration) -> TrackerResult<String> {
        let command_name = format!("{} {}", self.program, label);
        tracing::debug!(command = %command_name, timeout_secs = timeout.as_secs(), "running jira-cli");

        let mut command = Command::new(&self.program);
        command
            .args(args)
            .env(TOKEN_ENV_VAR, self.token.expose())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let child = command.spawn().map_err(|source| TrackerError::Spawn {
            program: self.program.clone(),
            source,
        })?;

        let output = tokio::time::timeout(timeout, child.wait_with_output())
            .await
            .map_err(|_| TrackerError::Timeout {
                command: command_name.clone(),
                timeout_secs: timeout.as_secs(),
            })??;

        if !output.status.success() {
            return Err(TrackerError::CommandFailed {
                command: command_name,
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl std::fmt::Debug for JiraCli {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JiraCli")
            .field("program", &self.program)
            .field("token", &self.token)
            .finish()
    }
}

/// Arguments for `jira issue create`.
pub fn create_args(issue: &NewIssue, description_path: &str, open_in_browser: bool) -> Vec<String> {
    let mut args = vec![
        "issue".to_string(),
        "create".to_string(),
        "-t".to_string(),
        issue.issue_type.clone(),
        "-s".to_string(),
        issue.summary.clone(),
        "-T".to_string(),
        description_path.to_string(),
        "-y".to_string(),
        issue.priority.to_string(),
        "--no-input".to_string(),
    ];
    if open_in_browser {
        args.push("--web".to_string());
    }
    if let Some(component) = &issue.component {
        args.push("-C".to_string());
        args.push(component.clone());
    }
    args
}

/// Arguments for `jira epic add`.
pub fn epic_add_args(epic: &str, key: &str) -> Vec<String> {
    vec![
        "epic".to_string(),
        "add".to_string(),
        epic.to_string(),
        key.to_string(),
    ]
}

/// Pull the issue key out of jira-cli's creation output.
///
/// jira-cli prints the browse URL of the new ticket; the key is its last
/// path segment. Only the first line mentioning `browse/` is considered.
pub fn parse_issue_key(stdout: &str) -> Option<String> {
    let line = stdout.lines().find(|line| line.contains("browse/"))?;
    let (_, key) = line.rsplit_once("browse/")?;
    let key = key.trim();
    (!key.is_empty()).then(|| key.to_string())
}
