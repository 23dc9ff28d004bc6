//! Shared utilities for integration testing.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;

/// Start a simple mock upstream that returns a fixed 200 response.
/// Returns the bound address.
pub async fn start_mock_upstream(response: &'static str) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    tokio::spawn(async move {
                        let _ = read_request(&mut socket).await;
                        let response_str = format!(
                            "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            response.len(),
                            response
                        );
                        let _ = socket.write_all(response_str.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

/// Start a programmable mock evaluator speaking the JSON protocol.
///
/// `f` receives the raw request body (the serialized argument array) and
/// returns the JSON body to answer with. Returns the bound address.
pub async fn start_mock_evaluator<F, Fut>(f: F) -> SocketAddr
where
    F: Fn(String) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = String> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let f = Arc::new(f);

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let f = f.clone();
                    tokio::spawn(async move {
                        let body = read_request(&mut socket).await.unwrap_or_default();
                        let response_body = f(body).await;
                        let response_str = format!(
                            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            response_body.len(),
                            response_body
                        );
                        let _ = socket.write_all(response_str.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

/// Start a mock evaluator that answers a fixed JSON body and reports
/// each received request body on the channel.
#[allow(dead_code)]
pub async fn start_capturing_evaluator(
    response_body: &'static str,
    seen: mpsc::UnboundedSender<String>,
) -> SocketAddr {
    start_mock_evaluator(move |body| {
        let seen = seen.clone();
        async move {
            let _ = seen.send(body);
            response_body.to_string()
        }
    })
    .await
}

/// Read one HTTP request: headers plus content-length body bytes.
/// Returns the body as a string.
async fn read_request(socket: &mut TcpStream) -> std::io::Result<String> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];

    loop {
        let n = socket.read(&mut chunk).await?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);

        if let Some(headers_end) = find_headers_end(&buf) {
            let headers = String::from_utf8_lossy(&buf[..headers_end]);
            let content_length = headers
                .lines()
                .find_map(|line| {
                    let (name, value) = line.split_once(':')?;
                    if name.eq_ignore_ascii_case("content-length") {
                        value.trim().parse::<usize>().ok()
                    } else {
                        None
                    }
                })
                .unwrap_or(0);

            let body_start = headers_end + 4;
            if buf.len() >= body_start + content_length {
                let body = String::from_utf8_lossy(&buf[body_start..body_start + content_length]);
                return Ok(body.into_owned());
            }
        }
    }

    Ok(String::new())
}

fn find_headers_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|w| w == b"\r\n\r\n")
}
