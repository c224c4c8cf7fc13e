//! Jira REST client for field updates.
//!
//! jira-cli reformats descriptions on create, so the rendered markup is
//! written back through `PUT /rest/api/2/issue/{key}`.

use crate::error::{TrackerError, TrackerResult};
use crate::token::ApiToken;
use crate::IssueUpdate;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

#[derive(Debug, Serialize)]
pub struct UpdateRequest<'a> {
    pub fields: UpdateFields<'a>,
}

/// Only the fields being changed are serialized.
#[derive(Debug, Default, Serialize)]
pub struct UpdateFields<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<NamedField<'a>>,
}

#[derive(Debug, Serialize)]
pub struct NamedField<'a> {
    pub name: &'a str,
}

impl<'a> UpdateRequest<'a> {
    pub fn from_update(update: &'a IssueUpdate) -> Self {
        let non_empty = |s: &'a Option<String>| s.as_deref().filter(|s| !s.is_empty());
        Self {
            fields: UpdateFields {
                description: non_empty(&update.description),
                summary: non_empty(&update.summary),
                priority: update.priority.map(|p| NamedField { name: p.as_str() }),
            },
        }
    }
}

#[derive(Clone)]
pub struct RestClient {
    client: Client,
    base_url: String,
    token: ApiToken,
}

impl RestClient {
    pub fn new(base_url: &str, token: ApiToken) -> TrackerResult<Self> {
        let client = Client::builder().build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    pub fn issue_url(&self, key: &str) -> String {
        format!("{}/rest/api/2/issue/{}", self.base_url, key)
    }

    pub async fn update_issue(
        &self,
        key: &str,
        update: &IssueUpdate,
        timeout: Duration,
    ) -> TrackerResult<()> {
        if update.is_empty() {
            return Err(TrackerError::NoFieldsToUpdate);
        }

        let url = self.issue_url(key);
        tracing::debug!(%url, "updating issue fields");

        let response = self
            .client
            .put(&url)
            .bearer_auth(self.token.expose())
            .json(&UpdateRequest::from_update(update))
            .timeout(timeout)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        Err(TrackerError::UpdateRejected {
            key: key.to_string(),
            status: status.as_u16(),
            body,
        })
    }
}

impl std::fmt::Debug for RestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestClient")
            .field("base_url", &self.base_url)
            .field("token", &"[REDACTED]")
            .finish()
    }
}
