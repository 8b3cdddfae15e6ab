//! Common test utilities for postrpc-client integration tests
//!
//! A minimal HTTP/1.1 server on a loopback port. Each connection carries one
//! request; the handler decides the status line and body of the reply.

#![allow(dead_code)]

use postrpc_client::HttpConfig;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;

/// Credentials used by every mock config
pub const USER: &str = "alice";
pub const PASSWORD: &str = "secret";
/// base64("alice:secret")
pub const BASIC_AUTH: &str = "Basic YWxpY2U6c2VjcmV0";

/// A request as seen by the mock server
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl RecordedRequest {
    /// Header value by case-insensitive name
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Body parsed as JSON
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).unwrap()
    }

    /// The `id` of the request envelope
    pub fn id(&self) -> u64 {
        self.json()["id"].as_u64().unwrap()
    }
}

/// Reply sent by the mock server
pub struct MockReply {
    pub status: String,
    pub body: String,
}

impl MockReply {
    pub fn ok(body: serde_json::Value) -> Self {
        Self::with_status("200 OK", body.to_string())
    }

    pub fn with_status(status: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            body: body.into(),
        }
    }
}

/// Mock HTTP server for client testing
pub struct MockHttpServer {
    addr: SocketAddr,
    requests: mpsc::UnboundedReceiver<RecordedRequest>,
}

impl MockHttpServer {
    /// Start a server answering every request with the handler's reply
    pub async fn start<F>(handler: F) -> Self
    where
        F: Fn(&RecordedRequest) -> MockReply + Send + Sync + 'static,
    {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handler = Arc::new(handler);
        let (tx, rx) = mpsc::unbounded_channel();

        tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                let handler = handler.clone();
                let tx = tx.clone();
                tokio::spawn(async move {
                    if let Some(request) = read_request(stream, handler.as_ref()).await {
                        let _ = tx.send(request);
                    }
                });
            }
        });

        Self { addr, requests: rx }
    }

    /// Start a server that echoes the request id with the given result
    pub async fn echoing(result: serde_json::Value) -> Self {
        Self::start(move |req| {
            MockReply::ok(serde_json::json!({
                "result": result.clone(),
                "error": null,
                "id": req.id(),
            }))
        })
        .await
    }

    /// Client configuration pointing at this server
    pub fn config(&self) -> HttpConfig {
        HttpConfig::new(self.addr.ip().to_string(), self.addr.port().to_string())
            .with_credentials(USER, PASSWORD)
    }

    /// Next request received by the server
    pub async fn next_request(&mut self) -> RecordedRequest {
        tokio::time::timeout(std::time::Duration::from_secs(5), self.requests.recv())
            .await
            .expect("no request received")
            .expect("server stopped")
    }
}

async fn read_request<F>(mut stream: TcpStream, handler: &F) -> Option<RecordedRequest>
where
    F: Fn(&RecordedRequest) -> MockReply,
{
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let header_end = loop {
        let n = stream.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = find(&buf, b"\r\n\r\n") {
            break pos;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let mut lines = head.split("\r\n");
    let mut request_line = lines.next()?.split_whitespace();
    let method = request_line.next()?.to_string();
    let path = request_line.next()?.to_string();

    let headers: Vec<(String, String)> = lines
        .filter_map(|line| line.split_once(':'))
        .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
        .collect();

    let content_length = headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case("content-length"))
        .and_then(|(_, v)| v.parse::<usize>().ok())
        .unwrap_or(0);

    let mut body = buf[header_end + 4..].to_vec();
    while body.len() < content_length {
        let n = stream.read(&mut chunk).await.ok()?;
        if n == 0 {
            break;
        }
        body.extend_from_slice(&chunk[..n]);
    }

    let request = RecordedRequest {
        method,
        path,
        headers,
        body: String::from_utf8_lossy(&body).to_string(),
    };

    let reply = handler(&request);
    let response = format!(
        "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        reply.status,
        reply.body.len(),
        reply.body
    );
    let _ = stream.write_all(response.as_bytes()).await;
    let _ = stream.shutdown().await;

    Some(request)
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}
