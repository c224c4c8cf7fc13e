//! Integration tests for the Jira tracker
//!
//! Tests verify:
//! - jira-cli invocation (token in env, description file, key parsing)
//! - Epic link failures are reported, not raised
//! - REST updates send only the changed fields with a bearer token
//! - Non-2xx update responses surface as errors

use gapticket_core::Priority;
use gapticket_tracker::jira::JiraTimeouts;
use gapticket_tracker::{
    ApiToken, EpicLink, IssueTracker, IssueUpdate, JiraCliTracker, JiraConfig, NewIssue,
    TrackerError,
};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

const TOKEN: &str = "test-token";

fn config(server: &str) -> JiraConfig {
    JiraConfig::from_yaml(&format!(
        "server: {server}\nlogin: someone@example.com\nproject:\n  key: SEC\n"
    ))
    .unwrap()
}

fn token() -> ApiToken {
    ApiToken::new(TOKEN).unwrap()
}

fn new_issue(epic: Option<&str>) -> NewIssue {
    NewIssue {
        issue_type: "Story".to_string(),
        summary: "Enforce MFA".to_string(),
        description: "h2. Background\nAdmins log in with passwords only".to_string(),
        priority: Priority::Critical,
        component: Some("Identity".to_string()),
        epic: epic.map(str::to_string),
    }
}

// ============================================================================
// FAKE JIRA-CLI
// ============================================================================

#[cfg(unix)]
fn write_script(dir: &std::path::Path, name: &str, body: &str) -> String {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    std::fs::write(&path, format!("#!/bin/sh\n{body}")).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path.to_string_lossy().into_owned()
}

// All subprocess scenarios share one test so no script is still open for
// writing while another test forks.
#[cfg(unix)]
#[tokio::test]
async fn jira_cli_scenarios_against_fake_client() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().display().to_string();

    let working = write_script(
        dir.path(),
        "jira-ok",
        &format!(
            r#"echo "$*" >> "{out}/calls.log"
[ "$JIRA_API_TOKEN" = "{TOKEN}" ] || {{ echo "bad token" >&2; exit 1; }}
case "$1" in
  me) echo "someone@example.com" ;;
  issue)
    while [ $# -gt 0 ]; do
      if [ "$1" = "-T" ]; then cp "$2" "{out}/description.txt"; fi
      shift
    done
    echo "Issue created"
    echo "https://issues.example.com/browse/SEC-77"
    ;;
  epic) echo "epic not found" >&2; exit 1 ;;
esac
"#
        ),
    );
    let keyless = write_script(dir.path(), "jira-keyless", "echo \"Issue created\"\n");
    let failing = write_script(dir.path(), "jira-fail", "echo \"401 Unauthorized\" >&2\nexit 1\n");
    let slow = write_script(dir.path(), "jira-slow", "sleep 5\n");

    let tracker = JiraCliTracker::new(config("https://issues.example.com"), token())
        .unwrap()
        .with_program(working)
        .with_browser(false);

    // current user
    assert_eq!(tracker.current_user().await.unwrap(), "someone@example.com");

    // create with a failing epic link
    let created = tracker.create_issue(&new_issue(Some("SEC-1"))).await.unwrap();
    assert_eq!(created.key, "SEC-77");
    assert!(matches!(
        created.epic_link,
        EpicLink::Failed { ref epic, ref reason } if epic == "SEC-1" && reason.contains("epic not found")
    ));

    let description = std::fs::read_to_string(dir.path().join("description.txt")).unwrap();
    assert_eq!(description, "h2. Background\nAdmins log in with passwords only");

    let calls = std::fs::read_to_string(dir.path().join("calls.log")).unwrap();
    let calls: Vec<&str> = calls.lines().collect();
    assert_eq!(calls[0], "me");
    assert!(calls[1].starts_with("issue create -t Story -s Enforce MFA -T "));
    assert!(calls[1].ends_with("-y Critical --no-input -C Identity"));
    assert_eq!(calls[2], "epic add SEC-1 SEC-77");

    // create without an epic
    let created = tracker.create_issue(&new_issue(None)).await.unwrap();
    assert_eq!(created.epic_link, EpicLink::NotRequested);

    // no key in output
    let tracker = JiraCliTracker::new(config("https://issues.example.com"), token())
        .unwrap()
        .with_program(keyless);
    let err = tracker.create_issue(&new_issue(None)).await.unwrap_err();
    assert!(matches!(err, TrackerError::MissingIssueKey { .. }));

    // non-zero exit
    let tracker = JiraCliTracker::new(config("https://issues.example.com"), token())
        .unwrap()
        .with_program(failing);
    match tracker.create_issue(&new_issue(None)).await.unwrap_err() {
        TrackerError::CommandFailed { stderr, .. } => assert_eq!(stderr, "401 Unauthorized"),
        other => panic!("unexpected error: {other:?}"),
    }

    // timeout
    let tracker = JiraCliTracker::new(config("https://issues.example.com"), token())
        .unwrap()
        .with_program(slow)
        .with_timeouts(JiraTimeouts {
            whoami: Duration::from_millis(200),
            ..JiraTimeouts::default()
        });
    let err = tracker.current_user().await.unwrap_err();
    assert!(matches!(err, TrackerError::Timeout { .. }));

    // missing executable
    let tracker = JiraCliTracker::new(config("https://issues.example.com"), token())
        .unwrap()
        .with_program(dir.path().join("absent").display().to_string());
    let err = tracker.current_user().await.unwrap_err();
    assert!(matches!(err, TrackerError::Spawn { .. }));
}

// ============================================================================
// FAKE REST ENDPOINT
// ============================================================================

/// Accept one request, answer it, and hand back the raw request text.
async fn serve_once(
    status_line: &'static str,
    body: &'static str,
) -> (String, tokio::task::JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = Vec::new();
        let mut chunk = [0u8; 4096];
        while !request_complete(&request) {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&chunk[..n]);
        }
        let response = format!(
            "HTTP/1.1 {status_line}\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        String::from_utf8_lossy(&request).into_owned()
    });
    (format!("http://{addr}"), handle)
}

fn request_complete(request: &[u8]) -> bool {
    let text = String::from_utf8_lossy(request);
    let Some(header_end) = text.find("\r\n\r\n") else {
        return false;
    };
    let content_length = text[..header_end]
        .lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse::<usize>().ok())
        .unwrap_or(0);
    request.len() >= header_end + 4 + content_length
}

fn request_body(request: &str) -> serde_json::Value {
    let (_, body) = request.split_once("\r\n\r\n").unwrap();
    serde_json::from_str(body).unwrap()
}

#[tokio::test]
async fn update_sends_description_with_bearer_token() {
    let (server, handle) = serve_once("204 No Content", "").await;
    let tracker = JiraCliTracker::new(config(&server), token()).unwrap();

    tracker
        .update_issue("SEC-77", &IssueUpdate::description("h2. Background\nY"))
        .await
        .unwrap();

    let request = handle.await.unwrap();
    assert!(request.starts_with("PUT /rest/api/2/issue/SEC-77 HTTP/1.1\r\n"));
    assert!(request
        .to_ascii_lowercase()
        .contains("authorization: bearer test-token"));
    assert_eq!(
        request_body(&request),
        serde_json::json!({"fields": {"description": "h2. Background\nY"}})
    );
}

#[tokio::test]
async fn update_rejection_reports_status_and_body() {
    let (server, handle) = serve_once("400 Bad Request", "Field 'priority' cannot be set").await;
    let tracker = JiraCliTracker::new(config(&server), token()).unwrap();

    let update = IssueUpdate {
        priority: Some(Priority::Minor),
        ..IssueUpdate::default()
    };
    let err = tracker.update_issue("SEC-5", &update).await.unwrap_err();
    match err {
        TrackerError::UpdateRejected { key, status, body } => {
            assert_eq!(key, "SEC-5");
            assert_eq!(status, 400);
            assert_eq!(body, "Field 'priority' cannot be set");
        }
        other => panic!("unexpected error: {other:?}"),
    }

    let request = handle.await.unwrap();
    assert_eq!(
        request_body(&request),
        serde_json::json!({"fields": {"priority": {"name": "Minor"}}})
    );
}
