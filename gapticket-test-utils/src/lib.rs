//! gapticket Test Utilities
//!
//! Shared test infrastructure for the workspace:
//! - Fixtures for common gap reports
//! - Proptest generators for report documents
//! - A scriptable mock issue tracker

pub use gapticket_core::{GapReport, Priority};
pub use gapticket_tracker::{
    CreatedIssue, EpicLink, IssueTracker, IssueUpdate, NewIssue, TrackerError, TrackerResult,
};

use async_trait::async_trait;
use proptest::prelude::*;
use serde_json::{json, Value};
use std::sync::Mutex;

// ============================================================================
// FIXTURES
// ============================================================================

/// A complete report exercising every optional section.
pub fn sample_report_value() -> Value {
    json!({
        "summary": "Implement Data Retention Policies",
        "reference_url": "https://assessment.example.com/countermeasures/42",
        "background": "Conversation history is stored indefinitely.",
        "current_state": {
            "implemented": ["Per-tenant storage isolation"],
            "missing": ["Configurable retention window", "Scheduled purge job"]
        },
        "tasks": [
            {"title": "Retention config", "items": ["Add retention_days setting", "Document defaults"]},
            {"title": "Purge", "items": ["Implement purge job"]}
        ],
        "out_of_scope": ["Backups"],
        "effort_days": 5,
        "epic": "SEC-1247",
        "component": "Storage",
        "priority": "Major"
    })
}

pub fn sample_report_json() -> String {
    sample_report_value().to_string()
}

/// The smallest report that passes validation.
pub fn minimal_report_json() -> String {
    json!({
        "summary": "X",
        "background": "Y",
        "current_state": {"implemented": ["A"], "missing": ["B"]},
        "tasks": [{"title": "T", "items": ["I1"]}],
        "effort_days": 3
    })
    .to_string()
}

// ============================================================================
// GENERATORS
// ============================================================================

/// Single-line text without markup characters.
pub fn arb_text() -> impl Strategy<Value = String> {
    "[A-Za-z0-9][A-Za-z0-9 ._-]{0,30}"
}

pub fn arb_priority() -> impl Strategy<Value = Option<Priority>> {
    prop::option::of(prop::sample::select(Priority::ALL.to_vec()))
}

/// A valid report document with arbitrary optional sections.
pub fn arb_report_value() -> impl Strategy<Value = Value> {
    (
        arb_text(),
        arb_text(),
        prop::collection::vec(arb_text(), 0..4),
        prop::collection::vec(arb_text(), 0..4),
        prop::collection::vec((arb_text(), prop::collection::vec(arb_text(), 0..4)), 1..5),
        prop::option::of(prop::collection::vec(arb_text(), 0..3)),
        prop::option::of(arb_text()),
        arb_priority(),
        0u32..365,
    )
        .prop_map(
            |(summary, background, implemented, missing, tasks, out_of_scope, epic, priority, effort)| {
                let tasks: Vec<Value> = tasks
                    .into_iter()
                    .map(|(title, items)| json!({"title": title, "items": items}))
                    .collect();
                let mut value = json!({
                    "summary": summary,
                    "background": background,
                    "current_state": {"implemented": implemented, "missing": missing},
                    "tasks": tasks,
                    "effort_days": effort,
                });
                if let Some(out) = out_of_scope {
                    value["out_of_scope"] = json!(out);
                }
                if let Some(epic) = epic {
                    value["epic"] = json!(epic);
                }
                if let Some(priority) = priority {
                    value["priority"] = json!(priority.as_str());
                }
                value
            },
        )
}

// ============================================================================
// MOCK TRACKER
// ============================================================================

/// A call recorded by [`MockTracker`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackerCall {
    CurrentUser,
    Create(NewIssue),
    Update { key: String, update: IssueUpdate },
}

/// In-memory tracker that records calls and can be told to fail.
#[derive(Debug)]
pub struct MockTracker {
    key: String,
    user: String,
    epic_link_failure: Option<String>,
    fail_create: bool,
    fail_update: bool,
    calls: Mutex<Vec<TrackerCall>>,
}

impl MockTracker {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            user: "someone@example.com".to_string(),
            epic_link_failure: None,
            fail_create: false,
            fail_update: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing_create(mut self) -> Self {
        self.fail_create = true;
        self
    }

    pub fn failing_update(mut self) -> Self {
        self.fail_update = true;
        self
    }

    pub fn failing_epic_link(mut self, reason: impl Into<String>) -> Self {
        self.epic_link_failure = Some(reason.into());
        self
    }

    pub fn calls(&self) -> Vec<TrackerCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    fn record(&self, call: TrackerCall) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
    }
}

fn command_failed(command: &str, stderr: &str) -> TrackerError {
    TrackerError::CommandFailed {
        command: command.to_string(),
        status: "exit status: 1".to_string(),
        stderr: stderr.to_string(),
    }
}

#[async_trait]
impl IssueTracker for MockTracker {
    async fn current_user(&self) -> TrackerResult<String> {
        self.record(TrackerCall::CurrentUser);
        Ok(self.user.clone())
    }

    async fn create_issue(&self, issue: &NewIssue) -> TrackerResult<CreatedIssue> {
        self.record(TrackerCall::Create(issue.clone()));
        if self.fail_create {
            return Err(command_failed("jira issue create", "401 Unauthorized"));
        }
        let epic_link = match (&issue.epic, &self.epic_link_failure) {
            (None, _) => EpicLink::NotRequested,
            (Some(epic), None) => EpicLink::Linked { epic: epic.clone() },
            (Some(epic), Some(reason)) => EpicLink::Failed {
                epic: epic.clone(),
                reason: reason.clone(),
            },
        };
        Ok(CreatedIssue {
            key: self.key.clone(),
            epic_link,
        })
    }

    async fn update_issue(&self, key: &str, update: &IssueUpdate) -> TrackerResult<()> {
        self.record(TrackerCall::Update {
            key: key.to_string(),
            update: update.clone(),
        });
        if self.fail_update {
            return Err(TrackerError::UpdateRejected {
                key: key.to_string(),
                status: 500,
                body: "Internal Server Error".to_string(),
            });
        }
        Ok(())
    }
}
