//! Gap report entity types
//!
//! A gap report is read once from standard input, rendered, and dropped. It
//! has no identity or lifecycle of its own.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// PRIORITY
// ============================================================================

/// Ticket priority accepted by the tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Priority {
    Blocker,
    #[default]
    Critical,
    Major,
    Normal,
    Minor,
}

impl Priority {
    pub const ALL: [Priority; 5] = [
        Priority::Blocker,
        Priority::Critical,
        Priority::Major,
        Priority::Normal,
        Priority::Minor,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Blocker => "Blocker",
            Priority::Critical => "Critical",
            Priority::Major => "Major",
            Priority::Normal => "Normal",
            Priority::Minor => "Minor",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Priority::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| format!("unknown priority: {s}"))
    }
}

// ============================================================================
// REPORT
// ============================================================================

/// What already exists and what is still missing for the countermeasure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentState {
    #[serde(default)]
    pub implemented: Vec<String>,
    #[serde(default)]
    pub missing: Vec<String>,
}

/// A titled group of work items. `items` may be empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskGroup {
    pub title: String,
    pub items: Vec<String>,
}

/// The structured description of a missing security countermeasure.
///
/// Unknown fields in the input are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GapReport {
    pub summary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_url: Option<String>,
    pub background: String,
    pub current_state: CurrentState,
    pub tasks: Vec<TaskGroup>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub out_of_scope: Option<Vec<String>>,
    /// Kept as a JSON number so it renders exactly as written.
    pub effort_days: serde_json::Number,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub epic: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
}

impl GapReport {
    /// Priority to file the ticket with, `Critical` when unspecified.
    pub fn effective_priority(&self) -> Priority {
        self.priority.unwrap_or_default()
    }

    /// Epic key, treating an empty string as absent.
    pub fn epic_key(&self) -> Option<&str> {
        self.epic.as_deref().filter(|e| !e.is_empty())
    }

    /// Component name, treating an empty string as absent.
    pub fn component_name(&self) -> Option<&str> {
        self.component.as_deref().filter(|c| !c.is_empty())
    }
}
