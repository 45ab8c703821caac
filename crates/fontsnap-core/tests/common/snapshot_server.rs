//! Minimal HTTP/1.1 server for integration tests.
//!
//! Serves fixed bodies by request path; unknown paths get 404. Individual
//! paths can be configured to answer with an arbitrary status (e.g. 429).

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::thread;

#[derive(Clone)]
pub enum Route {
    Body(Vec<u8>),
    Status(u16),
}

pub struct SnapshotServer {
    /// Base URL without trailing slash, e.g. "http://127.0.0.1:12345".
    pub base_url: String,
    /// Request paths in arrival order.
    pub hits: Arc<Mutex<Vec<String>>>,
}

/// Starts a server in a background thread. The server runs until the process exits.
pub fn start(routes: HashMap<String, Route>) -> SnapshotServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let routes = Arc::new(routes);
    let hits = Arc::new(Mutex::new(Vec::new()));
    let hits_srv = Arc::clone(&hits);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let routes = Arc::clone(&routes);
            let hits = Arc::clone(&hits_srv);
            thread::spawn(move || handle(stream, &routes, &hits));
        }
    });
    SnapshotServer {
        base_url: format!("http://127.0.0.1:{}", port),
        hits,
    }
}

fn handle(
    mut stream: std::net::TcpStream,
    routes: &HashMap<String, Route>,
    hits: &Mutex<Vec<String>>,
) {
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
        .and_then(|line| line.split_whitespace().nth(1))
        .unwrap_or("/")
        .to_string();
    hits.lock().unwrap().push(path.clone());

    let (status, reason, body): (u16, &str, &[u8]) = match routes.get(&path) {
        Some(Route::Body(b)) => (200, "OK", b.as_slice()),
        Some(Route::Status(code)) => (*code, "Error", &b"error"[..]),
        None => (404, "Not Found", &b"not found"[..]),
    };
    let header = format!(
        "HTTP/1.1 {} {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        status,
        reason,
        body.len()
    );
    let _ = stream.write_all(header.as_bytes());
    let _ = stream.write_all(body);
    let _ = stream.flush();
}

/// tar.gz with a single `<base>/PKGBUILD`, shaped like an AUR snapshot.
pub fn snapshot_tarball(base: &str) -> Vec<u8> {
    use flate2::write::GzEncoder;
    use flate2::Compression;

    let mut builder = tar::Builder::new(GzEncoder::new(Vec::new(), Compression::default()));
    let body = format!("pkgbase={}\n", base);
    let mut header = tar::Header::new_gnu();
    header.set_size(body.len() as u64);
    header.set_mode(0o644);
    header.set_cksum();
    builder
        .append_data(&mut header, format!("{}/PKGBUILD", base), body.as_bytes())
        .unwrap();
    builder.into_inner().unwrap().finish().unwrap()
}

/// gzip-compressed listing body.
pub fn gzip_listing(names: &[&str]) -> Vec<u8> {
    use flate2::write::GzEncoder;
    use flate2::Compression;

    let mut enc = GzEncoder::new(Vec::new(), Compression::default());
    for name in names {
        enc.write_all(name.as_bytes()).unwrap();
        enc.write_all(b"\n").unwrap();
    }
    enc.finish().unwrap()
}
