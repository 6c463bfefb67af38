use anyhow::{Context, Result};
use prometheus::{Encoder, TextEncoder};
use std::net::SocketAddr;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tracing::{debug, error, info};

/// Bind the metrics endpoint and serve it in the background
pub async fn start_metrics_server(port: u16) -> Result<SocketAddr> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind metrics server on {addr}"))?;
    let local_addr = listener.local_addr()?;

    info!(
        "Serving Prometheus metrics on http://{}/metrics",
        local_addr
    );

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((stream, peer)) => {
                    debug!("Metrics request from {}", peer);
                    tokio::spawn(handle_connection(stream));
                }
                Err(e) => error!("Metrics server accept failed: {}", e),
            }
        }
    });

    Ok(local_addr)
}

/// Current registry in the Prometheus text format
pub fn render_metrics() -> Result<String> {
    let mut buffer = Vec::new();
    TextEncoder::new()
        .encode(&prometheus::gather(), &mut buffer)
        .context("Failed to encode metrics")?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

async fn handle_connection(mut stream: TcpStream) {
    let mut buffer = [0; 1024];

    let request = match stream.read(&mut buffer).await {
        Ok(n) => String::from_utf8_lossy(&buffer[..n]).into_owned(),
        Err(e) => {
            error!("Failed to read from stream: {}", e);
            return;
        }
    };

    let response = if request.starts_with("GET /metrics") {
        match render_metrics() {
            Ok(body) => format!(
                "HTTP/1.1 200 OK\r\nContent-Type: text/plain; version=0.0.4\r\nContent-Length: {}\r\n\r\n{}",
                body.len(),
                body
            ),
            Err(e) => {
                error!("{}", e);
                "HTTP/1.1 500 Internal Server Error\r\nContent-Length: 0\r\n\r\n".to_string()
            }
        }
    } else {
        "HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\n\r\n".to_string()
    };

    if let Err(e) = stream.write_all(response.as_bytes()).await {
        error!("Failed to write metrics response: {}", e);
    }
}
