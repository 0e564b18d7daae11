//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// One request as observed by the mock upstream.
#[derive(Debug, Clone)]
pub struct SeenRequest {
    pub path_and_query: String,
    pub authorization: Option<String>,
}

pub type RequestLog = Arc<Mutex<Vec<SeenRequest>>>;

/// Start a mock CWA upstream on an ephemeral port.
///
/// Records the request line and Authorization header of every request, then
/// answers with whatever the responder returns for the requested path.
pub async fn start_mock_upstream<F>(respond: F) -> (SocketAddr, RequestLog)
where
    F: Fn(&str) -> (u16, String) + Send + Sync + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let log: RequestLog = Arc::new(Mutex::new(Vec::new()));
    let seen = log.clone();
    let respond = Arc::new(respond);

    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                break;
            };
            let seen = seen.clone();
            let respond = respond.clone();
            tokio::spawn(async move {
                // GET only: the head is the whole request.
                let mut buf = Vec::new();
                let mut chunk = [0u8; 1024];
                while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
                    match socket.read(&mut chunk).await {
                        Ok(0) | Err(_) => break,
                        Ok(n) => buf.extend_from_slice(&chunk[..n]),
                    }
                }

                let head = String::from_utf8_lossy(&buf);
                let path_and_query = head
                    .lines()
                    .next()
                    .and_then(|line| line.split_whitespace().nth(1))
                    .unwrap_or_default()
                    .to_string();
                let authorization = head.lines().find_map(|line| {
                    let (name, value) = line.split_once(':')?;
                    name.eq_ignore_ascii_case("authorization")
                        .then(|| value.trim().to_string())
                });

                seen.lock().unwrap().push(SeenRequest {
                    path_and_query: path_and_query.clone(),
                    authorization,
                });

                let (status, body) = respond(&path_and_query);
                let status_text = match status {
                    200 => "200 OK",
                    400 => "400 Bad Request",
                    404 => "404 Not Found",
                    429 => "429 Too Many Requests",
                    500 => "500 Internal Server Error",
                    502 => "502 Bad Gateway",
                    503 => "503 Service Unavailable",
                    _ => "200 OK",
                };

                let response_str = format!(
                    "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status_text,
                    body.len(),
                    body
                );
                let _ = socket.write_all(response_str.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    (addr, log)
}
