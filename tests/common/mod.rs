//! Shared test utilities: fixtures and a loopback HTTP stub of the backend.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

pub const PRICES_JSON: &str = include_str!("../fixtures/prices.json");
pub const CHART_JSON: &str = include_str!("../fixtures/chart.json");
pub const NEWS_JSON: &str = include_str!("../fixtures/news.json");
pub const PREDICTIONS_JSON: &str = include_str!("../fixtures/predictions.json");
pub const ANALYSIS_JSON: &str = include_str!("../fixtures/analysis.json");

/// A running stub backend.
pub struct Stub {
    pub base_url: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl Stub {
    /// Request targets (path and query) seen so far, in arrival order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

/// Canned responses keyed by request target.
#[derive(Default, Clone)]
pub struct Routes {
    responses: HashMap<String, (u16, String)>,
}

impl Routes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ok(mut self, target: &str, body: &str) -> Self {
        self.responses
            .insert(target.to_string(), (200, body.to_string()));
        self
    }

    pub fn status(mut self, target: &str, status: u16) -> Self {
        self.responses
            .insert(target.to_string(), (status, r#"{"error":"stub"}"#.to_string()));
        self
    }

    /// Every backend endpoint answered from the fixtures.
    pub fn fixtures() -> Self {
        Self::new()
            .ok("/api/prices", PRICES_JSON)
            .ok("/api/charts/WTI?days=90", CHART_JSON)
            .ok("/api/news", NEWS_JSON)
            .ok("/api/predictions", PREDICTIONS_JSON)
            .ok("/api/analysis", ANALYSIS_JSON)
    }
}

/// Starts a stub on an ephemeral loopback port.
///
/// Unknown targets answer 404. Every connection is closed after one
/// response.
pub async fn serve(routes: Routes) -> Stub {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());
    let requests = Arc::new(Mutex::new(Vec::new()));

    let seen = Arc::clone(&requests);
    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                break;
            };
            let routes = routes.clone();
            let seen = Arc::clone(&seen);
            tokio::spawn(async move {
                let mut buf = Vec::new();
                let mut chunk = [0u8; 1024];
                while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
                    match socket.read(&mut chunk).await {
                        Ok(0) | Err(_) => return,
                        Ok(n) => buf.extend_from_slice(&chunk[..n]),
                    }
                }

                let head = String::from_utf8_lossy(&buf);
                let target = head
                    .lines()
                    .next()
                    .and_then(|line| line.split_whitespace().nth(1))
                    .unwrap_or("/")
                    .to_string();
                seen.lock().unwrap().push(target.clone());

                let (status, body) = routes
                    .responses
                    .get(&target)
                    .cloned()
                    .unwrap_or((404, r#"{"error":"not found"}"#.to_string()));
                let response = format!(
                    "HTTP/1.1 {status} Stub\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    Stub { base_url, requests }
}
