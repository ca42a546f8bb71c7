#![allow(dead_code)]

use futures_util::{SinkExt, StreamExt};
use seqfeed::config::{Config, ENV_API_URL, ENV_BEARER_TOKEN, ENV_FEED_URL};
use std::net::SocketAddr;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio_tungstenite::tungstenite::Message;

/// What the fake sequencer saw
#[derive(Debug)]
pub struct CapturedRequest {
    pub head: String,
    pub body: String,
}

impl CapturedRequest {
    pub fn header(&self, name: &str) -> Option<String> {
        let prefix = format!("{}:", name.to_ascii_lowercase());
        self.head
            .lines()
            .find(|line| line.to_ascii_lowercase().starts_with(&prefix))
            .map(|line| line[prefix.len()..].trim().to_string())
    }
}

pub fn config_for(api: Option<SocketAddr>, feed: Option<SocketAddr>, token: Option<&str>) -> Config {
    let token = token.map(str::to_string);
    Config::from_lookup(move |key| match key {
        ENV_API_URL => api.map(|a| format!("http://{}", a)),
        ENV_FEED_URL => feed.map(|a| format!("ws://{}/transaction_feed", a)),
        ENV_BEARER_TOKEN => token.clone(),
        _ => None,
    })
}

/// Serve exactly one HTTP request with a canned response.
pub async fn one_shot_http(status_line: &'static str, body: &'static str) -> (SocketAddr, oneshot::Receiver<CapturedRequest>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = oneshot::channel();

    tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];
        let (head, request_body) = loop {
            let n = stream.read(&mut chunk).await.unwrap();
            assert!(n > 0, "client closed before sending a full request");
            buf.extend_from_slice(&chunk[..n]);
            let text = String::from_utf8_lossy(&buf).to_string();
            if let Some(split) = text.find("\r\n\r\n") {
                let head = text[..split].to_string();
                let length = head
                    .lines()
                    .find_map(|l| l.to_ascii_lowercase().strip_prefix("content-length:").map(|v| v.trim().parse::<usize>().unwrap()))
                    .unwrap_or(0);
                let request_body = text[split + 4..].to_string();
                if request_body.len() >= length {
                    break (head, request_body);
                }
            }
        };

        let response = format!(
            "HTTP/1.1 {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
            status_line,
            body.len(),
            body
        );
        stream.write_all(response.as_bytes()).await.unwrap();
        stream.shutdown().await.ok();
        let _ = tx.send(CapturedRequest { head, body: request_body });
    });

    (addr, rx)
}

/// Accept one WebSocket client and push `frames` to it, then either close or hold the socket open.
pub async fn feed_server(frames: Vec<String>, close_after: bool) -> (SocketAddr, oneshot::Receiver<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (client_gone_tx, client_gone_rx) = oneshot::channel();

    tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let mut ws = tokio_tungstenite::accept_async(stream).await.unwrap();
        for frame in frames {
            ws.send(Message::Text(frame)).await.unwrap();
        }
        if close_after {
            let _ = ws.close(None).await;
            // drain until the client acknowledges
            while let Some(Ok(_)) = ws.next().await {}
        } else {
            // hold open until the client goes away
            while let Some(Ok(msg)) = ws.next().await {
                if msg.is_close() {
                    break;
                }
            }
        }
        let _ = client_gone_tx.send(());
    });

    (addr, client_gone_rx)
}

/// Accept one WebSocket client, push `frames`, then abort the TCP connection with a reset.
pub async fn resetting_feed_server(frames: Vec<String>) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let mut ws = tokio_tungstenite::accept_async(stream).await.unwrap();
        for frame in frames {
            ws.send(Message::Text(frame)).await.unwrap();
        }
        // linger 0 turns the drop into an RST instead of a FIN
        #[allow(deprecated)]
        ws.get_ref().set_linger(Some(std::time::Duration::ZERO)).unwrap();
        drop(ws);
    });

    addr
}
