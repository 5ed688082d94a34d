//! Common test utilities and helpers
#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::io::Write;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tempfile::NamedTempFile;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use somnia_daily_claim::config::Env;

/// Hardhat development keys, never funded.
pub const KEY_A: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
pub const KEY_B: &str = "0x59c6995e998f97a5a0044966f0945389dc9e86dae88c7a8412f4603b6b78690d";
pub const ADDRESS_A: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";
pub const ADDRESS_B: &str = "0x70997970C51812dc3A010C7d01b50e0d17dc79C8";

pub fn write_temp_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(contents.as_bytes()).expect("Failed to write temp file");
    file
}

/// Configuration pointing at a mock server with no pauses between steps.
pub fn test_env(api_url: &str) -> Env {
    Env {
        api_url: api_url.to_string(),
        request_timeout_ms: 5_000,
        account_delay_secs: 0,
        step_delay_secs: 0,
        ..Env::default()
    }
}

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    /// Request target as sent; absolute-form when it went through a proxy.
    pub target: String,
    pub path: String,
    pub headers: HashMap<String, String>,
    pub body: String,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_lowercase()).map(|v| v.as_str())
    }
}

#[derive(Debug, Clone)]
struct MockResponse {
    status: u16,
    body: String,
}

type Routes = Arc<Mutex<HashMap<(String, String), VecDeque<MockResponse>>>>;

/// Scripted HTTP/1.1 server. Each route answers with its queued responses
/// in order; anything unscripted gets a 404.
pub struct MockServer {
    addr: SocketAddr,
    routes: Routes,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockServer {
    pub async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind mock server");
        let addr = listener.local_addr().expect("mock server address");
        let routes: Routes = Arc::new(Mutex::new(HashMap::new()));
        let requests = Arc::new(Mutex::new(Vec::new()));

        let (routes_task, requests_task) = (routes.clone(), requests.clone());
        tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                let routes = routes_task.clone();
                let requests = requests_task.clone();
                tokio::spawn(async move {
                    let _ = handle_connection(stream, routes, requests).await;
                });
            }
        });

        Self { addr, routes, requests }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn api_url(&self) -> String {
        format!("{}/api", self.base_url())
    }

    /// Queue a response for `method` on `/api{path}`.
    pub fn enqueue(&self, method: &str, path: &str, status: u16, body: &str) {
        self.routes
            .lock()
            .unwrap()
            .entry((method.to_string(), format!("/api{}", path)))
            .or_default()
            .push_back(MockResponse {
                status,
                body: body.to_string(),
            });
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn requests_to(&self, path: &str) -> Vec<RecordedRequest> {
        let full = format!("/api{}", path);
        self.requests().into_iter().filter(|r| r.path == full).collect()
    }
}

fn find_header_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|w| w == b"\r\n\r\n")
}

fn path_of(target: &str) -> String {
    match target.split_once("://") {
        Some((_, rest)) => rest.find('/').map(|i| rest[i..].to_string()).unwrap_or_else(|| "/".into()),
        None => target.to_string(),
    }
}

async fn handle_connection(
    mut stream: TcpStream,
    routes: Routes,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
) -> std::io::Result<()> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    let header_end = loop {
        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            return Ok(());
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = find_header_end(&buf) {
            break pos;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let mut lines = head.split("\r\n");
    let request_line = lines.next().unwrap_or_default();
    let mut parts = request_line.split_whitespace();
    let method = parts.next().unwrap_or_default().to_string();
    let target = parts.next().unwrap_or_default().to_string();

    let headers: HashMap<String, String> = lines
        .filter_map(|line| line.split_once(':'))
        .map(|(k, v)| (k.trim().to_lowercase(), v.trim().to_string()))
        .collect();

    let content_length: usize = headers
        .get("content-length")
        .and_then(|v| v.parse().ok())
        .unwrap_or(0);
    let mut body = buf[header_end + 4..].to_vec();
    while body.len() < content_length {
        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            break;
        }
        body.extend_from_slice(&chunk[..n]);
    }

    let path = path_of(&target);
    let response = routes
        .lock()
        .unwrap()
        .get_mut(&(method.clone(), path.clone()))
        .and_then(|queue| queue.pop_front())
        .unwrap_or(MockResponse {
            status: 404,
            body: r#"{"message":"not found"}"#.to_string(),
        });

    requests.lock().unwrap().push(RecordedRequest {
        method,
        target,
        path,
        headers,
        body: String::from_utf8_lossy(&body).to_string(),
    });

    let reply = format!(
        "HTTP/1.1 {} MOCK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        response.status,
        response.body.len(),
        response.body
    );
    stream.write_all(reply.as_bytes()).await?;
    stream.shutdown().await
}
