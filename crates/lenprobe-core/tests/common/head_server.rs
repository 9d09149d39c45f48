//! Minimal HTTP/1.1 server answering HEAD requests for integration tests.
//!
//! Each path maps to a canned response (status, headers, optional stall).
//! Unknown paths get 404. Every response closes the connection.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Route {
    pub status: &'static str,
    pub headers: Vec<(String, String)>,
    /// Sleep this long before answering (to trip client timeouts).
    pub stall: Option<Duration>,
}

impl Route {
    /// 200 OK with `Content-Length: len`.
    pub fn length(len: u64) -> Self {
        Self {
            status: "200 OK",
            headers: vec![("Content-Length".to_string(), len.to_string())],
            stall: None,
        }
    }

    /// 200 OK with only the given headers (no Content-Length unless listed).
    pub fn headers(headers: &[(&str, &str)]) -> Self {
        Self {
            status: "200 OK",
            headers: headers
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            stall: None,
        }
    }

    /// 301 to `location` (relative or absolute).
    pub fn redirect(location: &str) -> Self {
        Self {
            status: "301 Moved Permanently",
            headers: vec![
                ("Location".to_string(), location.to_string()),
                ("Content-Length".to_string(), "0".to_string()),
            ],
            stall: None,
        }
    }

    pub fn status(status: &'static str) -> Self {
        Self {
            status,
            headers: Vec::new(),
            stall: None,
        }
    }

    pub fn stalled(mut self, d: Duration) -> Self {
        self.stall = Some(d);
        self
    }
}

/// Starts a server in a background thread. Returns the base URL without a
/// trailing slash (e.g. "http://127.0.0.1:12345"). Runs until the process exits.
pub fn start(routes: Vec<(&str, Route)>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let routes: Arc<HashMap<String, Route>> = Arc::new(
        routes
            .into_iter()
            .map(|(p, r)| (p.to_string(), r))
            .collect(),
    );
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let routes = Arc::clone(&routes);
            thread::spawn(move || handle(stream, &routes));
        }
    });
    format!("http://127.0.0.1:{}", port)
}

fn handle(mut stream: TcpStream, routes: &HashMap<String, Route>) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) | Err(_) => return,
        Ok(n) => n,
    };
    let Ok(request) = std::str::from_utf8(&buf[..n]) else {
        return;
    };
    let mut parts = request.lines().next().unwrap_or("").split_whitespace();
    let method = parts.next().unwrap_or("");
    let path = parts.next().unwrap_or("/");

    if !method.eq_ignore_ascii_case("HEAD") {
        let _ = stream.write_all(b"HTTP/1.1 405 Method Not Allowed\r\nConnection: close\r\n\r\n");
        return;
    }

    let route = routes
        .get(path)
        .cloned()
        .unwrap_or_else(|| Route::status("404 Not Found"));
    if let Some(d) = route.stall {
        thread::sleep(d);
    }
    let mut response = format!("HTTP/1.1 {}\r\nConnection: close\r\n", route.status);
    for (k, v) in &route.headers {
        response.push_str(&format!("{}: {}\r\n", k, v));
    }
    response.push_str("\r\n");
    let _ = stream.write_all(response.as_bytes());
}
