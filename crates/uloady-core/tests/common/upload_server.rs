//! Minimal HTTP/1.1 server that accepts POST uploads for integration tests.
//!
//! Answers each request with the next scripted `(status, body)` pair (the last
//! one repeats) and records every request so tests can inspect headers and
//! the multipart body. `start_trickling` sends its body a few bytes at a time
//! to stand in for a slow link.

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Captured {
    pub method: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl Captured {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

pub struct UploadServer {
    pub url: String,
    requests: Arc<Mutex<Vec<Captured>>>,
}

impl UploadServer {
    pub fn requests(&self) -> Vec<Captured> {
        self.requests.lock().unwrap().clone()
    }
}

/// Starts a server in a background thread. Returns once it is listening.
pub fn start(responses: Vec<(u16, String)>) -> UploadServer {
    serve(responses, None)
}

/// Like [`start`] with a single 200 response whose body is written `chunk`
/// bytes at a time with `delay` between writes.
pub fn start_trickling(body: &str, chunk: usize, delay: Duration) -> UploadServer {
    serve(vec![(200, body.to_string())], Some((chunk.max(1), delay)))
}

fn serve(responses: Vec<(u16, String)>, trickle: Option<(usize, Duration)>) -> UploadServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let requests = Arc::new(Mutex::new(Vec::new()));
    let recorded = Arc::clone(&requests);
    let responses = Arc::new(responses);
    thread::spawn(move || {
        // Sequential on purpose: request N gets scripted response N.
        for stream in listener.incoming().flatten() {
            handle(stream, &recorded, &responses, trickle);
        }
    });
    UploadServer {
        url: format!("http://127.0.0.1:{}/upload", port),
        requests,
    }
}

/// Starts a server that accepts connections and never answers.
pub fn start_silent() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            thread::spawn(move || {
                thread::sleep(Duration::from_secs(30));
                drop(stream);
            });
        }
    });
    format!("http://127.0.0.1:{}/upload", port)
}

fn handle(
    mut stream: TcpStream,
    recorded: &Mutex<Vec<Captured>>,
    responses: &[(u16, String)],
    trickle: Option<(usize, Duration)>,
) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(5)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(5)));

    let mut buf = Vec::new();
    let mut chunk = [0u8; 8192];
    let header_end = loop {
        if let Some(pos) = find(&buf, b"\r\n\r\n") {
            break pos + 4;
        }
        match stream.read(&mut chunk) {
            Ok(0) | Err(_) => return,
            Ok(n) => buf.extend_from_slice(&chunk[..n]),
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).into_owned();
    let mut lines = head.lines();
    let method = lines
        .next()
        .and_then(|l| l.split_whitespace().next())
        .unwrap_or("")
        .to_string();
    let headers: Vec<(String, String)> = lines
        .filter_map(|l| l.split_once(':'))
        .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
        .collect();
    let header = |name: &str| {
        headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.clone())
    };

    if header("expect").is_some_and(|v| v.eq_ignore_ascii_case("100-continue")) {
        let _ = stream.write_all(b"HTTP/1.1 100 Continue\r\n\r\n");
    }

    let content_length: usize = header("content-length")
        .and_then(|v| v.parse().ok())
        .unwrap_or(0);
    let mut body = buf[header_end..].to_vec();
    while body.len() < content_length {
        match stream.read(&mut chunk) {
            Ok(0) | Err(_) => break,
            Ok(n) => body.extend_from_slice(&chunk[..n]),
        }
    }

    let index = {
        let mut recorded = recorded.lock().unwrap();
        recorded.push(Captured {
            method,
            headers,
            body,
        });
        recorded.len() - 1
    };

    let (status, text) = responses
        .get(index)
        .or_else(|| responses.last())
        .cloned()
        .unwrap_or((200, String::new()));
    let head = format!(
        "HTTP/1.1 {} Scripted\r\nContent-Type: text/plain\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        status,
        text.len(),
    );
    let _ = stream.write_all(head.as_bytes());
    match trickle {
        None => {
            let _ = stream.write_all(text.as_bytes());
        }
        Some((chunk, delay)) => {
            for piece in text.as_bytes().chunks(chunk) {
                let _ = stream.flush();
                thread::sleep(delay);
                if stream.write_all(piece).is_err() {
                    return;
                }
            }
        }
    }
    let _ = stream.flush();
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}
