//! Minimal HTTP/1.1 server for probing against, one connection per request.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

/// How the server answers a request.
#[derive(Debug, Clone, Copy)]
pub enum Reply {
    Status(u16, &'static str),
    Redirect(&'static str),
    /// Close the connection without answering
    Drop,
    /// Keep the connection open and never answer
    Hang,
}

/// Requests seen by the server as `(method, path)`.
pub type RequestLog = Arc<Mutex<Vec<(String, String)>>>;

pub struct TestServer {
    pub addr: SocketAddr,
    pub requests: RequestLog,
}

impl TestServer {
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn methods(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|(method, _)| method.clone())
            .collect()
    }
}

pub async fn spawn_server<F>(respond: F) -> TestServer
where
    F: Fn(&str, &str) -> Reply + Send + Sync + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let requests: RequestLog = Arc::default();
    let respond = Arc::new(respond);

    let log = requests.clone();
    tokio::spawn(async move {
        while let Ok((socket, _)) = listener.accept().await {
            let respond = respond.clone();
            let log = log.clone();
            tokio::spawn(async move {
                handle(socket, respond.as_ref(), &log).await;
            });
        }
    });

    TestServer { addr, requests }
}

async fn handle<F>(mut socket: TcpStream, respond: &F, log: &RequestLog)
where
    F: Fn(&str, &str) -> Reply,
{
    let mut buf = vec![0u8; 8192];
    let mut read = 0;
    loop {
        let n = match socket.read(&mut buf[read..]).await {
            Ok(0) | Err(_) => return,
            Ok(n) => n,
        };
        read += n;
        if buf[..read].windows(4).any(|w| w == b"\r\n\r\n") || read == buf.len() {
            break;
        }
    }

    let request = String::from_utf8_lossy(&buf[..read]).to_string();
    let mut request_line = request.lines().next().unwrap_or_default().split_whitespace();
    let method = request_line.next().unwrap_or_default().to_string();
    let path = request_line.next().unwrap_or("/").to_string();
    log.lock().unwrap().push((method.clone(), path.clone()));

    let response = match respond(&method, &path) {
        Reply::Status(code, reason) => format!(
            "HTTP/1.1 {code} {reason}\r\nContent-Length: 0\r\nConnection: close\r\n\r\n"
        ),
        Reply::Redirect(location) => format!(
            "HTTP/1.1 302 Found\r\nLocation: {location}\r\nContent-Length: 0\r\nConnection: close\r\n\r\n"
        ),
        Reply::Drop => return,
        Reply::Hang => {
            tokio::time::sleep(Duration::from_secs(60)).await;
            return;
        }
    };

    let _ = socket.write_all(response.as_bytes()).await;
    let _ = socket.shutdown().await;
}

/// An address nothing listens on.
pub async fn closed_port() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}
