//! Jira wiki-markup rendering for gap reports.
//!
//! Output tokens must match the tracker's renderer exactly: `h2.` section
//! headings, `h3.` task-group headings, `*` bullets, `(/)` done and `(x)`
//! missing markers. User text is passed through untouched.

use crate::report::GapReport;

const DONE: &str = "(/)";
const NOT_DONE: &str = "(x)";

/// Render a validated report as a ticket description.
///
/// Sections are emitted in a fixed order; Reference and Out of Scope only
/// when they have content. The result has no trailing newline.
pub fn render_description(report: &GapReport) -> String {
    let mut lines: Vec<String> = Vec::new();

    if let Some(url) = report.reference_url.as_deref().filter(|u| !u.is_empty()) {
        lines.push(heading("Reference"));
        lines.push(format!("Source: {url}"));
        lines.push(String::new());
    }

    lines.push(heading("Background"));
    lines.push(report.background.clone());
    lines.push(String::new());

    lines.push(heading("Current State"));
    for item in &report.current_state.implemented {
        lines.push(bullet(&format!("{DONE} {item}")));
    }
    for item in &report.current_state.missing {
        lines.push(bullet(&format!("{NOT_DONE} {item}")));
    }
    lines.push(String::new());

    lines.push(heading("Tasks"));
    lines.push(String::new());
    for (index, group) in report.tasks.iter().enumerate() {
        lines.push(format!("h3. {}. {}", index + 1, group.title));
        lines.extend(group.items.iter().map(|item| bullet(item)));
        lines.push(String::new());
    }

    if let Some(out_of_scope) = report.out_of_scope.as_ref().filter(|o| !o.is_empty()) {
        lines.push(heading("Out of Scope"));
        lines.extend(out_of_scope.iter().map(|item| bullet(item)));
        lines.push(String::new());
    }

    lines.push(heading("Estimated Effort"));
    lines.push(format!("{} days", report.effort_days));

    lines.join("\n")
}

fn heading(title: &str) -> String {
    format!("h2. {title}")
}

fn bullet(text: &str) -> String {
    format!("* {text}")
}
