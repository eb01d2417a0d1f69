//! End-to-end tests for the `vouch` entry points
//!
//! A small HTTP/1.1 server runs on a local port for each test. Requests go
//! through the real reqwest transport and failures through real reporters.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::collections::BTreeMap;
use std::sync::Arc;

use pretty_assertions::assert_eq;
use serde::Serialize;
use serde_json::json;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use vouch::{Cookie, FailureKind, RecordingReporter, TestReporter, TransportError};

struct Incoming {
    method: String,
    target: String,
    headers: Vec<(String, String)>,
    body: String,
}

impl Incoming {
    fn header(&self, name: &str) -> &str {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map_or("", |(_, v)| v.as_str())
    }
}

async fn read_incoming(stream: &mut TcpStream) -> Incoming {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    let (head_end, length) = loop {
        let n = stream.read(&mut chunk).await.unwrap();
        assert!(n > 0, "connection closed before request head");
        buf.extend_from_slice(&chunk[..n]);
        if let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            let head = String::from_utf8_lossy(&buf[..end]).to_lowercase();
            let length = head
                .lines()
                .find_map(|l| l.strip_prefix("content-length:"))
                .map_or(0, |v| v.trim().parse::<usize>().unwrap());
            break (end, length);
        }
    };
    while buf.len() < head_end + 4 + length {
        let n = stream.read(&mut chunk).await.unwrap();
        assert!(n > 0, "connection closed before request body");
        buf.extend_from_slice(&chunk[..n]);
    }

    let head = String::from_utf8_lossy(&buf[..head_end]).into_owned();
    let mut lines = head.split("\r\n");
    let mut request_line = lines.next().unwrap().split(' ');
    let method = request_line.next().unwrap().to_string();
    let target = request_line.next().unwrap().to_string();
    let headers = lines
        .filter_map(|l| l.split_once(':'))
        .map(|(n, v)| (n.trim().to_string(), v.trim().to_string()))
        .collect();
    let body = String::from_utf8_lossy(&buf[head_end + 4..]).into_owned();

    Incoming {
        method,
        target,
        headers,
        body,
    }
}

fn route(req: &Incoming) -> (u16, String, String) {
    let path = req.target.split('?').next().unwrap_or("");
    let query = req.target.split_once('?').map_or("", |(_, q)| q);
    let json = "application/json".to_string();
    let text = "text/plain; charset=utf-8".to_string();

    match path {
        "/get" => (200, json, format!(r#"{{"query":"{query}"}}"#)),
        "/pretty" => (200, json, "{\n  \"a\": \"1\"\n}".to_string()),
        "/text" => (200, text, "hello".to_string()),
        "/image" => (200, "image/png".to_string(), "\u{1}PNG".to_string()),
        "/echo" => (
            200,
            req.header("Content-Type").to_string(),
            req.body.clone(),
        ),
        "/inspect" => (
            200,
            json,
            json!({
                "method": req.method,
                "authorization": req.header("Authorization"),
                "cookie": req.header("Cookie"),
                "trace": req.header("X-Trace"),
            })
            .to_string(),
        ),
        _ => (404, text, "not found".to_string()),
    }
}

/// Starts the test server and returns its base URL.
async fn start_server() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        loop {
            let Ok((mut stream, _)) = listener.accept().await else {
                return;
            };
            tokio::spawn(async move {
                let req = read_incoming(&mut stream).await;
                let (status, content_type, body) = route(&req);
                let response = format!(
                    "HTTP/1.1 {status} X\r\nContent-Type: {content_type}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                stream.write_all(response.as_bytes()).await.unwrap();
                stream.shutdown().await.ok();
            });
        }
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn test_status_and_header_expectations_pass() {
    let base = start_server().await;
    let reporter = Arc::new(RecordingReporter::new());

    let report = vouch::request_with_reporter(&base, reporter.clone())
        .get("/get")
        .query("name=test")
        .expect(200)
        .expect(("Content-Type", "application/json"))
        .expect(r#"{"query":"name=test"}"#)
        .end()
        .await;

    assert!(report.all_passed(), "{:?}", reporter.messages());
    assert_eq!(report.total, 3);
}

#[tokio::test]
async fn test_json_map_matches_pretty_printed_body() {
    let base = start_server().await;

    let mut expected = BTreeMap::new();
    expected.insert("a", "1");

    let report = vouch::request(&base)
        .get("/pretty")
        .expect_json(&expected)
        .end()
        .await;

    assert!(report.all_passed());
}

#[tokio::test]
async fn test_text_body_is_compared_exactly() {
    let base = start_server().await;
    let reporter = Arc::new(RecordingReporter::new());

    let report = vouch::request_with_reporter(&base, reporter.clone())
        .get("/text")
        .expect("hello\n")
        .expect((200, "hello"))
        .end()
        .await;

    assert_eq!(report.failed, 1);
    assert_eq!(
        reporter.messages(),
        vec!["Expected body:\nhello\n\nbut got:\nhello"]
    );
}

#[tokio::test]
#[should_panic(expected = "Expected status: [204], but got: [200]")]
async fn test_default_channel_aborts_on_failure() {
    let base = start_server().await;

    vouch::request(&base).get("/get").expect(204).end().await;
}

#[tokio::test]
async fn test_struct_body_round_trip() {
    #[derive(Serialize)]
    struct User {
        name: &'static str,
        admin: bool,
        tags: Vec<&'static str>,
    }

    let base = start_server().await;
    let user = User {
        name: "ana",
        admin: false,
        tags: vec!["a", "b"],
    };

    let report = vouch::request(&base)
        .post("/echo")
        .send_json(&user)
        .expect(200)
        .expect(("Content-Type", "application/json"))
        .expect_json(&user)
        .end()
        .await;

    assert!(report.all_passed());
}

#[tokio::test]
async fn test_form_body_is_urlencoded() {
    let base = start_server().await;

    let mut body = None;
    vouch::request(&base)
        .put("/echo")
        .content_type("form")
        .send(json!({"name": "a b", "page": 2}))
        .end_with(|_, text, _| body = Some(text.to_string()))
        .await;

    assert_eq!(body.as_deref(), Some("name=a+b&page=2"));
}

#[tokio::test]
async fn test_auth_cookies_and_headers_reach_server() {
    let base = start_server().await;

    let report = vouch::request(&base)
        .get("/inspect")
        .set("X-Trace", "t-1")
        .set_basic_auth("user", "pass")
        .add_cookie(Cookie::new("session", "abc"))
        .add_cookies(vec![Cookie::new("theme", "dark")])
        .expect(json!({
            "method": "GET",
            "authorization": "Basic dXNlcjpwYXNz",
            "cookie": "session=abc; theme=dark",
            "trace": "t-1",
        }))
        .end()
        .await;

    assert!(report.all_passed());
}

#[tokio::test]
async fn test_every_failure_is_collected() {
    let base = start_server().await;
    let reporter = Arc::new(RecordingReporter::new());

    let report = vouch::request_with_reporter(&base, reporter.clone())
        .get("/missing")
        .expect(200)
        .expect(("X-Request-Id", "42"))
        .expect("found")
        .end()
        .await;

    assert_eq!(report.failed, 3);
    assert_eq!(
        reporter.messages(),
        vec![
            "Expected status: [200], but got: [404]",
            "Expected header [X-Request-Id] to equal: [42], but got: []",
            "Expected body:\nfound\nbut got:\nnot found",
        ]
    );
}

#[tokio::test]
async fn test_unsupported_content_type() {
    let base = start_server().await;
    let reporter = Arc::new(RecordingReporter::new());

    vouch::request_with_reporter(&base, reporter.clone())
        .get("/image")
        .expect(200)
        .expect("PNG")
        .end()
        .await;

    let failures = reporter.failures();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].kind(), FailureKind::UnsupportedFormat);
    assert_eq!(failures[0].to_string(), "content-type: image/png not supported");
}

#[tokio::test]
async fn test_unreachable_host_reports_transport_failure() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let reporter = Arc::new(RecordingReporter::new());
    let mut seen: Option<(bool, Vec<TransportError>)> = None;

    let report = vouch::request_with_reporter(&format!("http://{addr}"), reporter.clone())
        .get("/")
        .expect(200)
        .end_with(|response, _, errors| seen = Some((response.is_none(), errors.to_vec())))
        .await;

    assert_eq!(report.total, 0);
    assert!(!report.all_passed());
    assert_eq!(reporter.failures()[0].kind(), FailureKind::Transport);

    let (no_response, errors) = seen.unwrap();
    assert!(no_response);
    assert_eq!(errors.len(), 1);
}

#[tokio::test]
#[should_panic(expected = "2 expectation(s) failed")]
async fn test_test_reporter_fails_on_drop() {
    let base = start_server().await;
    let reporter = Arc::new(TestReporter::new());

    vouch::request_with_reporter(&base, reporter.clone())
        .get("/text")
        .expect(201)
        .expect("bye")
        .end()
        .await;
}

#[tokio::test]
async fn test_agents_run_concurrently() {
    let base = start_server().await;
    let reporter = Arc::new(RecordingReporter::new());

    let mut handles = Vec::new();
    for i in 0..8 {
        let agent = vouch::request_with_reporter(&base, reporter.clone())
            .get("/get")
            .query(&format!("n={i}"));
        let expected = format!(r#"{{"query":"n={i}"}}"#);
        handles.push(tokio::spawn(agent.expect((200, expected)).end()));
    }
    for handle in handles {
        assert!(handle.await.unwrap().all_passed());
    }
    assert!(reporter.is_empty());
}
