//! Minimal HTTP server for exercising the client against canned responses.
//!
//! Answers every request with `Connection: close` so each request arrives on
//! its own connection and can be captured independently.

use std::sync::{Arc, Mutex};

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

/// One captured request: request line pieces plus the body rendered lossily.
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub method: String,
    pub path: String,
    pub body: String,
}

pub struct MockServer {
    pub url: String,
    requests: Arc<Mutex<Vec<CapturedRequest>>>,
    handle: JoinHandle<()>,
}

impl MockServer {
    /// Starts a server that answers each request with the next canned
    /// `(status, body)` response, repeating the last one when the queue runs
    /// out. Connections are handled concurrently.
    pub async fn start(responses: Vec<(u16, String)>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let url = format!("http://127.0.0.1:{port}");

        let requests: Arc<Mutex<Vec<CapturedRequest>>> = Arc::default();
        let queue = Arc::new(Mutex::new(responses));

        let reqs = Arc::clone(&requests);
        let handle = tokio::spawn(async move {
            loop {
                let Ok((stream, _)) = listener.accept().await else {
                    break;
                };
                let reqs = Arc::clone(&reqs);
                let queue = Arc::clone(&queue);
                tokio::spawn(async move {
                    handle_connection(stream, reqs, queue).await;
                });
            }
        });

        Self {
            url,
            requests,
            handle,
        }
    }

    /// Requests captured so far, in arrival order.
    pub fn requests(&self) -> Vec<CapturedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Drop for MockServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn handle_connection(
    mut stream: TcpStream,
    requests: Arc<Mutex<Vec<CapturedRequest>>>,
    queue: Arc<Mutex<Vec<(u16, String)>>>,
) {
    let mut buf = Vec::new();
    let mut tmp = [0u8; 8192];

    // Read until the end of the header block.
    let header_end = loop {
        match stream.read(&mut tmp).await {
            Ok(0) | Err(_) => return,
            Ok(n) => buf.extend_from_slice(&tmp[..n]),
        }
        if let Some(pos) = find_subslice(&buf, b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let content_length = head
        .lines()
        .find_map(|line| {
            let (key, value) = line.split_once(':')?;
            if key.eq_ignore_ascii_case("content-length") {
                value.trim().parse::<usize>().ok()
            } else {
                None
            }
        })
        .unwrap_or(0);

    // Then exactly Content-Length body bytes.
    while buf.len() < header_end + content_length {
        match stream.read(&mut tmp).await {
            Ok(0) | Err(_) => break,
            Ok(n) => buf.extend_from_slice(&tmp[..n]),
        }
    }

    let request_line = head.lines().next().unwrap_or_default();
    let mut pieces = request_line.split_whitespace();
    let method = pieces.next().unwrap_or_default().to_string();
    let path = pieces.next().unwrap_or_default().to_string();
    let body = String::from_utf8_lossy(&buf[header_end..]).to_string();

    requests
        .lock()
        .unwrap()
        .push(CapturedRequest { method, path, body });

    let (status, resp_body) = {
        let mut queue = queue.lock().unwrap();
        if queue.len() > 1 {
            queue.remove(0)
        } else {
            queue.first().cloned().unwrap_or((200, "{}".to_string()))
        }
    };

    let resp = format!(
        "HTTP/1.1 {status} Mock\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        resp_body.len(),
        resp_body
    );
    let _ = stream.write_all(resp.as_bytes()).await;
    let _ = stream.shutdown().await;
}

fn find_subslice(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

/// Extracts the value of a multipart text field from a captured body.
pub fn multipart_field(body: &str, name: &str) -> Option<String> {
    let marker = format!("name=\"{name}\"");
    let after = &body[body.find(&marker)? + marker.len()..];
    let start = after.find("\r\n\r\n")? + 4;
    let end = after[start..].find("\r\n")? + start;
    Some(after[start..end].to_string())
}

/// Extracts the file part's payload (between its headers and the next
/// boundary line) from a captured body.
pub fn multipart_file_payload(body: &str) -> Option<String> {
    let marker = "name=\"file\"";
    let after = &body[body.find(marker)? + marker.len()..];
    let start = after.find("\r\n\r\n")? + 4;
    let end = after[start..].find("\r\n--")? + start;
    Some(after[start..end].to_string())
}
