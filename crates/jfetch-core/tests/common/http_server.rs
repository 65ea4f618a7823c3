//! Minimal HTTP/1.1 server for integration tests.
//!
//! Each request path is mapped to a [`Reply`] by a routing closure. Supports
//! plain bodies, arbitrary status codes, redirects and truncated bodies.

use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

#[derive(Debug, Clone)]
pub enum Reply {
    /// 200 OK with this body.
    Body(Vec<u8>),
    /// Given status with a short text body.
    Status(u16),
    /// 302 Found pointing at this Location value.
    Redirect(String),
    /// `status` declaring `declared` bytes but sending only `body` before closing.
    Truncated {
        status: u16,
        declared: u64,
        body: Vec<u8>,
    },
}

pub struct TestServer {
    base: String,
    hits: Arc<AtomicUsize>,
}

impl TestServer {
    /// Base URL without trailing slash, e.g. `http://127.0.0.1:12345`.
    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    /// Number of requests served so far.
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

/// Starts a server in a background thread. Runs until the process exits.
pub fn start<F>(route: F) -> TestServer
where
    F: Fn(&str) -> Reply + Send + Sync + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let route = Arc::new(route);
    let hits = Arc::new(AtomicUsize::new(0));
    let hits_srv = Arc::clone(&hits);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let route = Arc::clone(&route);
            let hits = Arc::clone(&hits_srv);
            thread::spawn(move || {
                hits.fetch_add(1, Ordering::SeqCst);
                handle(stream, route.as_ref());
            });
        }
    });
    TestServer {
        base: format!("http://127.0.0.1:{}", port),
        hits,
    }
}

fn handle<F: Fn(&str) -> Reply>(mut stream: std::net::TcpStream, route: &F) {
    let _ = stream.set_read_timeout(Some(std::time::Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(std::time::Duration::from_secs(2)));
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
    let path = request
        .lines()
        .next()
        .and_then(|l| l.split_whitespace().nth(1))
        .unwrap_or("/");

    let (status, extra, body, declared) = match route(path) {
        Reply::Body(body) => {
            let len = body.len() as u64;
            ("200 OK".to_string(), String::new(), body, len)
        }
        Reply::Status(code) => {
            let body = format!("status {}", code).into_bytes();
            let len = body.len() as u64;
            (format!("{} Test", code), String::new(), body, len)
        }
        Reply::Redirect(location) => (
            "302 Found".to_string(),
            format!("Location: {}\r\n", location),
            Vec::new(),
            0,
        ),
        Reply::Truncated {
            status,
            declared,
            body,
        } => (format!("{} Test", status), String::new(), body, declared),
    };
    let response = format!(
        "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n{}\r\n",
        status, declared, extra
    );
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.write_all(&body);
    let _ = stream.flush();
}

/// Path under `/hop/<n>/<name>`: redirects to `/hop/<n-1>/<name>` until 0,
/// which serves `body`.
pub fn hop_route(path: &str, body: &[u8]) -> Option<Reply> {
    let rest = path.strip_prefix("/hop/")?;
    let (n, name) = rest.split_once('/')?;
    let n: u32 = n.parse().ok()?;
    if n == 0 {
        Some(Reply::Body(body.to_vec()))
    } else {
        Some(Reply::Redirect(format!("/hop/{}/{}", n - 1, name)))
    }
}
