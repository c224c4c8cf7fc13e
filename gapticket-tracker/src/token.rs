//! The Jira API token, read once and passed explicitly to the tracker.

use std::fmt;

/// Environment variable holding the personal access token.
pub const TOKEN_ENV_VAR: &str = "JIRA_API_TOKEN";

/// A bearer token for the tracker. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiToken(String);

impl ApiToken {
    /// Wrap a token, rejecting blank values.
    pub fn new(token: impl Into<String>) -> Option<Self> {
        let token = token.into();
        if token.trim().is_empty() {
            None
        } else {
            Some(Self(token))
        }
    }

    /// Read the token from [`TOKEN_ENV_VAR`]. Unset and empty are both absent.
    pub fn from_env() -> Option<Self> {
        std::env::var(TOKEN_ENV_VAR).ok().and_then(Self::new)
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiToken([REDACTED])")
    }
}
