//! Minimal HTTP/1.1 stand-in for the storage service, for integration tests.
//!
//! Serves `GET /download/{id}` from a fixed file table and accepts
//! `POST /upload`, both behind the `access_token` header.

#![allow(dead_code)]

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct StoredFile {
    /// Value placed in `Content-Disposition`; `None` omits the header.
    pub disposition: Option<String>,
    pub body: Vec<u8>,
}

impl StoredFile {
    pub fn named(name: &str, body: &[u8]) -> Self {
        Self {
            disposition: Some(format!("attachment; filename=\"{}\"", name)),
            body: body.to_vec(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ReceivedUpload {
    pub folder_id: Option<String>,
    pub body: Vec<u8>,
}

pub struct FileServer {
    pub url: String,
    pub uploads: Arc<Mutex<Vec<ReceivedUpload>>>,
}

/// Starts the server on an ephemeral port; it runs until the process exits.
pub fn start(api_key: &str, files: HashMap<String, StoredFile>) -> FileServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let files = Arc::new(files);
    let uploads = Arc::new(Mutex::new(Vec::new()));
    let key = api_key.to_string();
    let recorded = Arc::clone(&uploads);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let files = Arc::clone(&files);
            let recorded = Arc::clone(&recorded);
            let key = key.clone();
            thread::spawn(move || handle(stream, &key, &files, &recorded));
        }
    });
    FileServer {
        url: format!("http://127.0.0.1:{}", port),
        uploads,
    }
}

struct Request {
    method: String,
    path: String,
    headers: HashMap<String, String>,
    body: Vec<u8>,
}

fn read_request(stream: &mut TcpStream) -> Option<Request> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    let head_end = loop {
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
        let n = stream.read(&mut chunk).ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
    };

    let head = std::str::from_utf8(&buf[..head_end]).ok()?;
    let mut lines = head.lines();
    let mut request_line = lines.next()?.split_whitespace();
    let method = request_line.next()?.to_string();
    let path = request_line.next()?.to_string();
    let headers: HashMap<String, String> = lines
        .filter_map(|l| l.split_once(':'))
        .map(|(k, v)| (k.trim().to_ascii_lowercase(), v.trim().to_string()))
        .collect();

    let len = headers
        .get("content-length")
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(0);
    if len > 0 && headers.contains_key("expect") {
        stream.write_all(b"HTTP/1.1 100 Continue\r\n\r\n").ok()?;
    }
    let mut body = buf[head_end..].to_vec();
    while body.len() < len {
        let n = stream.read(&mut chunk).ok()?;
        if n == 0 {
            break;
        }
        body.extend_from_slice(&chunk[..n]);
    }
    Some(Request {
        method,
        path,
        headers,
        body,
    })
}

fn respond(stream: &mut TcpStream, status: &str, headers: &[String], body: &[u8]) {
    let mut head = format!(
        "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n",
        status,
        body.len()
    );
    for h in headers {
        head.push_str(h);
        head.push_str("\r\n");
    }
    head.push_str("\r\n");
    let _ = stream.write_all(head.as_bytes());
    let _ = stream.write_all(body);
}

fn handle(
    mut stream: TcpStream,
    key: &str,
    files: &HashMap<String, StoredFile>,
    uploads: &Mutex<Vec<ReceivedUpload>>,
) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(2)));
    let req = match read_request(&mut stream) {
        Some(r) => r,
        None => return,
    };

    if req.headers.get("access_token").map(String::as_str) != Some(key) {
        respond(&mut stream, "401 Unauthorized", &[], b"Unauthorized\n");
        return;
    }

    match (req.method.as_str(), req.path.strip_prefix("/download/")) {
        ("GET", Some(id)) => match files.get(id) {
            Some(file) => {
                let mut headers = vec!["Content-Type: application/octet-stream".to_string()];
                if let Some(d) = &file.disposition {
                    headers.push(format!("Content-Disposition: {}", d));
                }
                respond(&mut stream, "200 OK", &headers, &file.body);
            }
            None => respond(
                &mut stream,
                "500 Internal Server Error",
                &[],
                b"Error retrieving file\n",
            ),
        },
        ("POST", None) if req.path == "/upload" => {
            uploads.lock().unwrap().push(ReceivedUpload {
                folder_id: req.headers.get("x-folder-id").cloned(),
                body: req.body,
            });
            respond(
                &mut stream,
                "200 OK",
                &[r#"HX-Trigger: {"upload" : "success"}"#.to_string()],
                b"",
            );
        }
        _ => respond(&mut stream, "404 Not Found", &[], b""),
    }
}
