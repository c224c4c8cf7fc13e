//! Offline ticket drafts, for when Jira cannot be reached.

use crate::error::CliError;
use std::path::{Path, PathBuf};

pub fn draft_contents(summary: &str, description: &str) -> String {
    format!(
        "JIRA Ticket Draft\n\
         =================\n\
         \n\
         Summary: {summary}\n\
         \n\
         Description:\n\
         {description}\n"
    )
}

/// Write a draft and return its absolute path.
pub fn write_draft(path: &Path, summary: &str, description: &str) -> Result<PathBuf, CliError> {
    let draft_error = |source| CliError::Draft {
        path: path.to_path_buf(),
        source,
    };
    std::fs::write(path, draft_contents(summary, description)).map_err(draft_error)?;
    std::path::absolute(path).map_err(draft_error)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_layout() {
        let contents = draft_contents("Enforce MFA", "h2. Background\nY");
        assert_eq!(
            contents,
            "JIRA Ticket Draft\n=================\n\nSummary: Enforce MFA\n\nDescription:\nh2. Background\nY\n"
        );
    }

    #[test]
    fn test_write_draft() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("draft.txt");
        let written = write_draft(&path, "S", "D").unwrap();
        assert!(written.is_absolute());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), draft_contents("S", "D"));
    }

    #[test]
    fn test_write_draft_into_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope").join("draft.txt");
        assert!(matches!(
            write_draft(&path, "S", "D"),
            Err(CliError::Draft { .. })
        ));
    }
}
