//! Minimal HTTP/1.1 server that serves one HTML page for integration tests.
//!
//! Responds to every GET with the configured status and body. Optionally
//! delays the response (timeouts), redirects one path to `/`, and records
//! the `User-Agent` of each request.

use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct PageServerOptions {
    /// Status line after `HTTP/1.1 `, e.g. `"200 OK"`.
    pub status: &'static str,
    /// Sleep before writing the response.
    pub delay: Option<Duration>,
    /// Path answered with `301` to `/`.
    pub redirect_from: Option<&'static str>,
}

impl Default for PageServerOptions {
    fn default() -> Self {
        Self {
            status: "200 OK",
            delay: None,
            redirect_from: None,
        }
    }
}

/// A running server: base URL plus the user agents it has seen.
pub struct PageServer {
    pub url: String,
    user_agents: Arc<Mutex<Vec<String>>>,
}

impl PageServer {
    pub fn user_agents(&self) -> Vec<String> {
        self.user_agents.lock().unwrap().clone()
    }
}

/// Starts a server in a background thread serving `body` with 200 OK.
/// The server runs until the process exits.
pub fn start(body: Vec<u8>) -> PageServer {
    start_with_options(body, PageServerOptions::default())
}

/// Like `start` but allows a custom status, delay, or redirect.
pub fn start_with_options(body: Vec<u8>, opts: PageServerOptions) -> PageServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let body = Arc::new(body);
    let user_agents = Arc::new(Mutex::new(Vec::new()));
    let seen = Arc::clone(&user_agents);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let body = Arc::clone(&body);
            let seen = Arc::clone(&seen);
            let opts = opts.clone();
            thread::spawn(move || handle(stream, &body, &opts, &seen));
        }
    });
    PageServer {
        url: format!("http://127.0.0.1:{}/", port),
        user_agents,
    }
}

/// Returns a URL on a port nothing listens on.
pub fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}/", port)
}

fn handle(
    mut stream: std::net::TcpStream,
    body: &[u8],
    opts: &PageServerOptions,
    seen: &Mutex<Vec<String>>,
) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(5)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) => return,
        Ok(n) => n,
        Err(_) => return,
    };
    let request = match std::str::from_utf8(&buf[..n]) {
        Ok(s) => s,
        Err(_) => return,
    };
    let (path, user_agent) = parse_request(request);
    if let Some(ua) = user_agent {
        seen.lock().unwrap().push(ua.to_string());
    }

    if let Some(delay) = opts.delay {
        thread::sleep(delay);
    }

    if opts.redirect_from == Some(path) {
        let _ = stream.write_all(
            b"HTTP/1.1 301 Moved Permanently\r\nLocation: /\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
        );
        return;
    }

    let head = format!(
        "HTTP/1.1 {}\r\nContent-Type: text/html; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        opts.status,
        body.len()
    );
    let _ = stream.write_all(head.as_bytes());
    // The client may hang up early once it has enough bytes.
    let _ = stream.write_all(body);
}

/// Returns (path, optional User-Agent value).
fn parse_request(request: &str) -> (&str, Option<&str>) {
    let mut path = "";
    let mut user_agent = None;
    for (i, line) in request.lines().enumerate() {
        let line = line.trim();
        if i == 0 {
            path = line.split_whitespace().nth(1).unwrap_or("");
            continue;
        }
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            if name.trim().eq_ignore_ascii_case("user-agent") {
                user_agent = Some(value.trim());
            }
        }
    }
    (path, user_agent)
}
