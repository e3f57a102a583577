use crate::config::Config;
use chrono::Local;
use hyper::{Method, Version};
use std::net::SocketAddr;
use std::path::Path;

pub fn log_server_start(root: &Path, addr: &SocketAddr, config: &Config) {
    println!("Serving {} on http://{}", root.display(), addr);
    if let Some(workers) = config.server.workers {
        println!("Worker threads: {workers}");
    }
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    eprintln!("[ERROR] Failed to serve connection: {err:?}");
}

pub fn log_error(message: &str) {
    eprintln!("[ERROR] {message}");
}

pub fn log_warning(message: &str) {
    eprintln!("[WARN] {message}");
}

/// Common Log Format access line:
/// `$remote_addr - - [$time_local] "$request" $status $body_bytes_sent`
pub fn log_access(
    remote_addr: &SocketAddr,
    method: &Method,
    path: &str,
    version: Version,
    status: u16,
    bytes: usize,
) {
    println!(
        "{}",
        format_access_line(remote_addr, method, path, version, status, bytes)
    );
}

fn format_access_line(
    remote_addr: &SocketAddr,
    method: &Method,
    path: &str,
    version: Version,
    status: u16,
    bytes: usize,
) -> String {
    format!(
        "{} - - [{}] \"{} {} {:?}\" {} {}",
        remote_addr.ip(),
        Local::now().format("%d/%b/%Y:%H:%M:%S %z"),
        method,
        path,
        version,
        status,
        bytes
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_line_carries_request_version() {
        let addr: SocketAddr = "127.0.0.1:40000".parse().unwrap();
        let line = format_access_line(&addr, &Method::GET, "/a.txt", Version::HTTP_10, 200, 5);
        assert!(line.starts_with("127.0.0.1 - - ["));
        assert!(line.ends_with("\"GET /a.txt HTTP/1.0\" 200 5"));

        let line = format_access_line(&addr, &Method::HEAD, "/a.txt", Version::HTTP_11, 200, 0);
        assert!(line.ends_with("\"HEAD /a.txt HTTP/1.1\" 200 0"));
    }
}
