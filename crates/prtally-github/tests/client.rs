use std::sync::{Arc, Mutex};

use prtally_core::PrTallyError;
use prtally_github::api::{PullRequestApi, PullRequestTarget};
use prtally_github::github::GitHubClient;
use prtally_github::pipeline::run;
use prtally_github::publish::PublishOptions;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

#[derive(Debug, Clone)]
struct Recorded {
    request_line: String,
    body: String,
}

impl Recorded {
    fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).unwrap()
    }
}

type Log = Arc<Mutex<Vec<Recorded>>>;

/// Answer one connection per canned `(status, body)` pair, in order.
async fn serve(responses: Vec<(u16, &'static str)>) -> (String, Log) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());
    let log: Log = Arc::default();
    let sink = Arc::clone(&log);

    tokio::spawn(async move {
        for (status, body) in responses {
            let Ok((mut stream, _)) = listener.accept().await else {
                return;
            };
            let request = read_request(&mut stream).await;
            sink.lock().unwrap().push(request);

            let reason = match status {
                200 => "OK",
                201 => "Created",
                401 => "Unauthorized",
                403 => "Forbidden",
                404 => "Not Found",
                _ => "Unknown",
            };
            let response = format!(
                "HTTP/1.1 {status} {reason}\r\n\
                 Content-Type: application/json; charset=utf-8\r\n\
                 Content-Length: {}\r\n\
                 Connection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).await.unwrap();
            let _ = stream.shutdown().await;
        }
    });

    (base_url, log)
}

async fn read_request(stream: &mut TcpStream) -> Recorded {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    let header_end = loop {
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
        let n = stream.read(&mut chunk).await.unwrap();
        if n == 0 {
            break buf.len();
        }
        buf.extend_from_slice(&chunk[..n]);
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).into_owned();
    let content_length = head
        .lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse::<usize>().ok())
        .unwrap_or(0);

    while buf.len() < header_end + content_length {
        let n = stream.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }
    let body_end = buf.len().min(header_end + content_length);

    Recorded {
        request_line: head.lines().next().unwrap_or_default().to_string(),
        body: String::from_utf8_lossy(&buf[header_end..body_end]).into_owned(),
    }
}

fn target() -> PullRequestTarget {
    PullRequestTarget::new("octocat", "hello-world", 42)
}

const FILES: &str = r#"[
    {"sha": "a1", "filename": "a.js", "status": "modified", "additions": 3, "deletions": 1, "changes": 4},
    {"sha": "b2", "filename": "b.md", "status": "modified", "additions": 0, "deletions": 5, "changes": 5}
]"#;

#[tokio::test]
async fn run_sends_expected_routes_and_bodies() {
    let (base_url, log) = serve(vec![
        (200, FILES),
        (200, r#"[{"id": 1, "name": "JavaScript"}, {"id": 2, "name": "Markdown"}]"#),
        (201, r#"{"id": 7, "body": "ok"}"#),
    ])
    .await;
    let client = GitHubClient::new("ghp_test", &base_url).unwrap();

    let report = run(&client, &target(), PublishOptions::default())
        .await
        .unwrap();
    assert_eq!(report.tally.summary.additions, 3);
    assert_eq!(report.tally.summary.deletions, 6);

    let requests = log.lock().unwrap().clone();
    assert_eq!(requests.len(), 3);

    assert!(
        requests[0]
            .request_line
            .starts_with("GET /repos/octocat/hello-world/pulls/42/files?per_page=100 "),
        "{}",
        requests[0].request_line
    );

    assert!(requests[1]
        .request_line
        .starts_with("POST /repos/octocat/hello-world/issues/42/labels "));
    assert_eq!(
        requests[1].json(),
        serde_json::json!({ "labels": ["JavaScript", "Markdown"] })
    );

    assert!(requests[2]
        .request_line
        .starts_with("POST /repos/octocat/hello-world/issues/42/comments "));
    let comment = requests[2].json();
    let body = comment["body"].as_str().unwrap();
    assert!(body.contains("#42"));
    assert!(body.contains("3 additions"));
    assert!(body.contains("6 deletions"));
    assert!(body.contains("2 changed files"));
}

#[tokio::test]
async fn fetch_error_message_is_passed_through() {
    let (base_url, log) = serve(vec![(
        404,
        r#"{"message": "Not Found", "documentation_url": "https://docs.github.com/rest/pulls/pulls#list-pull-requests-files"}"#,
    )])
    .await;
    let client = GitHubClient::new("ghp_test", &base_url).unwrap();

    let err = run(&client, &target(), PublishOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(err, PrTallyError::GitHub(_)));
    assert_eq!(err.to_string(), "Not Found");
    assert_eq!(log.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn label_error_message_is_passed_through() {
    let (base_url, _log) = serve(vec![(
        403,
        r#"{"message": "Resource not accessible by integration"}"#,
    )])
    .await;
    let client = GitHubClient::new("ghp_test", &base_url).unwrap();

    let err = client
        .add_labels("octocat", "hello-world", 42, &["Python".to_string()])
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Resource not accessible by integration");
}

#[tokio::test]
async fn empty_label_list_sends_no_request() {
    let (base_url, log) = serve(Vec::new()).await;
    let client = GitHubClient::new("ghp_test", &base_url).unwrap();

    client
        .add_labels("octocat", "hello-world", 42, &[])
        .await
        .unwrap();

    assert!(log.lock().unwrap().is_empty());
}

#[tokio::test]
async fn malformed_file_entry_stops_before_labeling() {
    let (base_url, log) = serve(vec![(
        200,
        r#"[{"filename": "", "additions": 1, "deletions": 0}]"#,
    )])
    .await;
    let client = GitHubClient::new("ghp_test", &base_url).unwrap();

    let err = run(&client, &target(), PublishOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(err, PrTallyError::MalformedResponse(_)));
    assert_eq!(log.lock().unwrap().len(), 1);
}
