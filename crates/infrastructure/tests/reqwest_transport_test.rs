//! Integration tests for the reqwest transport
//!
//! Each test starts a one-shot HTTP/1.1 server on a local port, sends a request
//! through `ReqwestTransport` and checks both sides of the exchange.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::time::Duration;

use pretty_assertions::assert_eq;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

use vouch_application::{Transport, TransportError};
use vouch_domain::request::{Header, QueryParam};
use vouch_domain::{HttpMethod, RequestBody, RequestSpec};
use vouch_infrastructure::{ReqwestTransport, TransportConfig};

fn http_response(status: &str, headers: &[(&str, &str)], body: &str) -> String {
    let mut response = format!("HTTP/1.1 {status}\r\n");
    for (name, value) in headers {
        response.push_str(&format!("{name}: {value}\r\n"));
    }
    response.push_str(&format!(
        "Content-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    ));
    response
}

async fn read_request(stream: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        let n = stream.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            let head = String::from_utf8_lossy(&buf[..end]).to_lowercase();
            let length = head
                .lines()
                .find_map(|l| l.strip_prefix("content-length:"))
                .map_or(0, |v| v.trim().parse::<usize>().unwrap());
            if buf.len() >= end + 4 + length {
                break;
            }
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}

/// Serves `response` to the first connection and returns the raw request.
async fn serve_once(response: String) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        let raw = read_request(&mut stream).await;
        stream.write_all(response.as_bytes()).await.unwrap();
        stream.shutdown().await.ok();
        raw
    });
    (format!("http://{addr}"), handle)
}

fn transport() -> ReqwestTransport {
    ReqwestTransport::new(&TransportConfig::default()).unwrap()
}

#[tokio::test]
async fn test_get_captures_status_headers_and_body() {
    let (base, server) = serve_once(http_response(
        "200 OK",
        &[
            ("Content-Type", "application/json"),
            ("Set-Cookie", "a=1"),
            ("Set-Cookie", "b=2"),
        ],
        r#"{"ok":true}"#,
    ))
    .await;

    let mut request = RequestSpec::new(HttpMethod::Get, format!("{base}/get"));
    request.query.add(QueryParam::new("name", "test"));
    request.headers.add(Header::new("X-Trace", "abc"));

    let response = transport().send(&request).await.unwrap();

    assert_eq!(response.status(), 200);
    assert_eq!(response.content_type(), "application/json");
    assert_eq!(response.body(), r#"{"ok":true}"#);
    assert_eq!(
        response.header_values("set-cookie").collect::<Vec<_>>(),
        vec!["a=1", "b=2"]
    );

    let raw = server.await.unwrap();
    assert!(raw.starts_with("GET /get?name=test HTTP/1.1\r\n"), "{raw}");
    assert!(raw.to_lowercase().contains("x-trace: abc"), "{raw}");
    assert!(raw.to_lowercase().contains("user-agent: vouch/"), "{raw}");
}

#[tokio::test]
async fn test_post_sends_body() {
    let (base, server) = serve_once(http_response(
        "201 Created",
        &[("Content-Type", "text/plain")],
        "created",
    ))
    .await;

    let mut request = RequestSpec::new(HttpMethod::Post, format!("{base}/items"));
    request.headers.add(Header::new("Content-Type", "application/json"));
    request.body = RequestBody {
        content_type: Some("application/json".to_string()),
        content: r#"{"name":"test"}"#.to_string(),
    };

    let response = transport().send(&request).await.unwrap();
    assert_eq!(response.status(), 201);
    assert_eq!(response.body(), "created");

    let raw = server.await.unwrap();
    assert!(raw.starts_with("POST /items HTTP/1.1\r\n"), "{raw}");
    assert!(raw.ends_with(r#"{"name":"test"}"#), "{raw}");
}

#[tokio::test]
async fn test_non_utf8_body_keeps_bytes() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        read_request(&mut stream).await;
        stream
            .write_all(b"HTTP/1.1 200 OK\r\nContent-Length: 2\r\nConnection: close\r\n\r\n\xff\xfe")
            .await
            .unwrap();
    });

    let request = RequestSpec::new(HttpMethod::Get, format!("http://{addr}/"));
    let response = transport().send(&request).await.unwrap();

    assert_eq!(response.body_bytes(), &[0xff, 0xfe]);
    assert_eq!(response.body(), "\u{fffd}\u{fffd}");
}

#[tokio::test]
async fn test_refused_connection() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let request = RequestSpec::new(HttpMethod::Get, format!("http://{addr}/"));
    let error = transport().send(&request).await.unwrap_err();

    assert!(
        matches!(
            error,
            TransportError::ConnectionRefused { .. } | TransportError::ConnectionFailed(_)
        ),
        "{error:?}"
    );
}

#[tokio::test]
async fn test_timeout() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        tokio::time::sleep(Duration::from_secs(5)).await;
        drop(stream);
    });

    let config = TransportConfig {
        timeout: Duration::from_millis(100),
        ..TransportConfig::default()
    };
    let request = RequestSpec::new(HttpMethod::Get, format!("http://{addr}/slow"));
    let error = ReqwestTransport::new(&config)
        .unwrap()
        .send(&request)
        .await
        .unwrap_err();

    assert_eq!(error, TransportError::Timeout { timeout_ms: 100 });
}

#[tokio::test]
async fn test_redirect_limit() {
    let (base, _server) = serve_once(http_response(
        "302 Found",
        &[("Location", "/elsewhere")],
        "",
    ))
    .await;

    let config = TransportConfig {
        max_redirects: 0,
        ..TransportConfig::default()
    };
    let request = RequestSpec::new(HttpMethod::Get, format!("{base}/start"));
    let error = ReqwestTransport::new(&config)
        .unwrap()
        .send(&request)
        .await
        .unwrap_err();

    assert_eq!(error, TransportError::TooManyRedirects { max: 0 });
}
