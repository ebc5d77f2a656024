//! Minimal HTTP/1.1 server answering SearXNG-style `GET /search?q=..&format=json`.
//!
//! Each query maps to a script of `(status, body)` responses served in order;
//! the last one repeats. Unknown queries get an empty result list.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::thread;

pub type Script = Vec<(u16, String)>;

/// SearXNG result document for `(title, url)` pairs.
pub fn results_json(hits: &[(&str, &str)]) -> String {
    let results: Vec<serde_json::Value> = hits
        .iter()
        .map(|(title, url)| serde_json::json!({ "title": title, "url": url }))
        .collect();
    serde_json::json!({ "results": results }).to_string()
}

/// Starts the server in a background thread. Returns the endpoint URL
/// (e.g. "http://127.0.0.1:12345/search"). Runs until the process exits.
pub fn start(routes: HashMap<String, Script>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let routes = Arc::new(Mutex::new(routes));
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let routes = Arc::clone(&routes);
            thread::spawn(move || handle(stream, &routes));
        }
    });
    format!("http://127.0.0.1:{}/search", port)
}

fn handle(mut stream: std::net::TcpStream, routes: &Mutex<HashMap<String, Script>>) {
    let _ = stream.set_read_timeout(Some(std::time::Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(std::time::Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) | Err(_) => return,
        Ok(n) => n,
    };
    let Ok(request) = std::str::from_utf8(&buf[..n]) else {
        return;
    };
    let Some(query) = query_param(request) else {
        let _ = stream.write_all(b"HTTP/1.1 400 Bad Request\r\nContent-Length: 0\r\n\r\n");
        return;
    };

    let (status, body) = {
        let mut routes = routes.lock().unwrap();
        match routes.get_mut(&query) {
            Some(script) if script.len() > 1 => script.remove(0),
            Some(script) if !script.is_empty() => script[0].clone(),
            _ => (200, results_json(&[])),
        }
    };
    let reason = if status < 400 { "OK" } else { "Error" };
    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        status,
        reason,
        body.len()
    );
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.write_all(body.as_bytes());
}

/// Decoded `q` parameter of the request line.
fn query_param(request: &str) -> Option<String> {
    let target = request.lines().next()?.split_whitespace().nth(1)?;
    let url = url::Url::parse(&format!("http://localhost{target}")).ok()?;
    url.query_pairs()
        .find(|(k, _)| k == "q")
        .map(|(_, v)| v.into_owned())
}
