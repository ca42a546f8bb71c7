//! Live transaction feed.
//!
//! The sequencer pushes every accepted transaction over a WebSocket as a JSON
//! object. [`FeedConnection`] owns that socket on a background thread and
//! forwards lifecycle events; [`FeedSubscriber`] folds the events into a
//! bounded, newest-first list for display.
//!
//! ```text
//! Connecting -> Open -> Receiving* -> Closed
//!                 \         |
//!                  +-> Errored (stream stays up until the transport closes it)
//! ```

use crate::error::FeedError;
use futures_util::StreamExt;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::VecDeque;
use std::thread;
use tokio::runtime::Builder;
use tokio::sync::{mpsc, oneshot};
use tokio_tungstenite::tungstenite::{self, Message};
use url::Url;

/// A transaction as broadcast by the sequencer.
///
/// The producer is external, so every field is optional and loosely typed.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FeedRecord {
    #[serde(default)]
    pub from: Option<Value>,
    #[serde(default)]
    pub to: Option<Value>,
    #[serde(default)]
    pub value: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl FeedRecord {
    /// Parse one inbound text frame
    pub fn parse(text: &str) -> Result<Self, FeedError> {
        // Only objects are records; reject arrays/scalars before the struct sees them
        let value: Value = serde_json::from_str(text)?;
        match value {
            Value::Object(_) => Ok(serde_json::from_value(value)?),
            other => Err(FeedError::Malformed(serde::de::Error::custom(format!(
                "expected a JSON object, got {}",
                other
            )))),
        }
    }

    pub fn from_display(&self) -> String {
        display_field(self.from.as_ref())
    }

    pub fn to_display(&self) -> String {
        display_field(self.to.as_ref())
    }

    pub fn value_display(&self) -> String {
        display_field(self.value.as_ref())
    }
}

fn display_field(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => "-".to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Bounded list of records, newest first.
#[derive(Debug, Clone)]
pub struct FeedList {
    entries: VecDeque<FeedRecord>,
    capacity: usize,
}

impl FeedList {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Prepend a record, dropping the oldest past capacity
    pub fn push(&mut self, record: FeedRecord) {
        self.entries.push_front(record);
        self.entries.truncate(self.capacity);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn iter(&self) -> impl Iterator<Item = &FeedRecord> {
        self.entries.iter()
    }

    pub fn newest(&self) -> Option<&FeedRecord> {
        self.entries.front()
    }
}

/// Connection lifecycle as seen by the subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedState {
    Connecting,
    Open,
    Receiving,
    Errored,
    Closed,
}

impl FeedState {
    pub fn label(&self) -> &'static str {
        match self {
            FeedState::Connecting => "CONNECTING",
            FeedState::Open => "OPEN",
            FeedState::Receiving => "RECEIVING",
            FeedState::Errored => "ERRORED",
            FeedState::Closed => "CLOSED",
        }
    }

    pub fn is_live(&self) -> bool {
        matches!(self, FeedState::Open | FeedState::Receiving | FeedState::Errored)
    }
}

/// Events produced by a [`FeedConnection`]
#[derive(Debug, Clone, PartialEq)]
pub enum FeedEvent {
    Opened,
    Record(FeedRecord),
    Errored(String),
    Closed,
}

/// Folds feed events into display state.
#[derive(Debug, Clone)]
pub struct FeedSubscriber {
    state: FeedState,
    list: FeedList,
    received: u64,
    last_error: Option<String>,
}

impl FeedSubscriber {
    pub fn new(capacity: usize) -> Self {
        Self {
            state: FeedState::Connecting,
            list: FeedList::new(capacity),
            received: 0,
            last_error: None,
        }
    }

    pub fn state(&self) -> FeedState {
        self.state
    }

    pub fn list(&self) -> &FeedList {
        &self.list
    }

    /// Records received since the connection last opened
    pub fn received(&self) -> u64 {
        self.received
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Apply one event. Events after `Closed` are ignored.
    pub fn apply(&mut self, event: FeedEvent) {
        if self.state == FeedState::Closed {
            tracing::debug!("Ignoring feed event after close: {:?}", event);
            return;
        }
        match event {
            FeedEvent::Opened => {
                self.state = FeedState::Open;
                self.received = 0;
                self.last_error = None;
            }
            FeedEvent::Record(record) => {
                self.list.push(record);
                self.received += 1;
                self.state = FeedState::Receiving;
            }
            FeedEvent::Errored(message) => {
                if self.state.is_live() {
                    self.state = FeedState::Errored;
                }
                self.last_error = Some(message);
            }
            FeedEvent::Closed => {
                self.state = FeedState::Closed;
            }
        }
    }

    /// Parse a raw text frame and apply it; malformed frames are logged and dropped.
    pub fn apply_text(&mut self, text: &str) {
        match FeedRecord::parse(text) {
            Ok(record) => self.apply(FeedEvent::Record(record)),
            Err(e) => tracing::warn!("Discarding feed message: {}", e),
        }
    }
}

/// Owns the WebSocket for one mounted widget.
///
/// Dropping the connection closes the socket; no events arrive afterwards.
pub struct FeedConnection {
    events: mpsc::UnboundedReceiver<FeedEvent>,
    cancel: Option<oneshot::Sender<()>>,
}

impl std::fmt::Debug for FeedConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeedConnection")
            .field("closed", &self.is_closed())
            .finish()
    }
}

impl FeedConnection {
    /// Connect on a background thread with its own runtime
    pub fn spawn(url: Url) -> Self {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let (cancel_tx, cancel_rx) = oneshot::channel();

        thread::spawn(move || {
            let runtime = match Builder::new_current_thread().enable_all().build() {
                Ok(runtime) => runtime,
                Err(e) => {
                    tracing::error!("Failed to create async runtime for feed: {}", e);
                    let _ = event_tx.send(FeedEvent::Closed);
                    return;
                }
            };
            runtime.block_on(run_feed(url, event_tx, cancel_rx));
        });

        Self {
            events: event_rx,
            cancel: Some(cancel_tx),
        }
    }

    /// Next event if one is ready (for per-frame polling)
    pub fn try_next(&mut self) -> Option<FeedEvent> {
        if self.is_closed() {
            return None;
        }
        self.events.try_recv().ok()
    }

    /// Wait for the next event; `None` once closed or the worker has exited
    pub async fn next(&mut self) -> Option<FeedEvent> {
        if self.is_closed() {
            return None;
        }
        self.events.recv().await
    }

    pub fn is_closed(&self) -> bool {
        self.cancel.is_none()
    }

    /// Close the socket and stop delivering events, including buffered ones
    pub fn close(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            let _ = cancel.send(());
            self.events.close();
            tracing::debug!("Feed connection closed by owner");
        }
    }
}

impl Drop for FeedConnection {
    fn drop(&mut self) {
        self.close();
    }
}

/// Drive one WebSocket session until the server closes it or we are cancelled.
pub async fn run_feed(
    url: Url,
    events: mpsc::UnboundedSender<FeedEvent>,
    mut cancel: oneshot::Receiver<()>,
) {
    let connect = tokio_tungstenite::connect_async(url.as_str());
    let (mut socket, _) = tokio::select! {
        _ = &mut cancel => {
            tracing::debug!("Feed cancelled before connecting");
            return;
        }
        result = connect => match result {
            Ok(pair) => pair,
            Err(source) => {
                let err = FeedError::Connect { url: url.to_string(), source };
                tracing::error!("{}", err);
                let _ = events.send(FeedEvent::Closed);
                return;
            }
        }
    };

    tracing::info!("Connected to transaction feed at {}", url);
    let _ = events.send(FeedEvent::Opened);

    loop {
        tokio::select! {
            _ = &mut cancel => {
                if let Err(e) = socket.close(None).await {
                    tracing::debug!("Error while closing feed socket: {}", e);
                }
                break;
            }
            frame = socket.next() => match frame {
                Some(Ok(Message::Text(text))) => match FeedRecord::parse(&text) {
                    Ok(record) => {
                        if events.send(FeedEvent::Record(record)).is_err() {
                            // subscriber is gone
                            let _ = socket.close(None).await;
                            break;
                        }
                    }
                    Err(e) => tracing::warn!("Discarding feed message: {}", e),
                },
                Some(Ok(Message::Close(frame))) => {
                    tracing::debug!("Feed close frame: {:?}", frame);
                    break;
                }
                Some(Ok(other)) => {
                    tracing::trace!("Ignoring non-text feed frame: {:?}", other);
                }
                Some(Err(tungstenite::Error::ConnectionClosed | tungstenite::Error::AlreadyClosed)) | None => {
                    break;
                }
                Some(Err(e)) => {
                    let err = FeedError::Stream(e);
                    tracing::error!("{}", err);
                    let _ = events.send(FeedEvent::Errored(err.to_string()));
                }
            }
        }
    }

    tracing::info!("Disconnected from transaction feed");
    let _ = events.send(FeedEvent::Closed);
}
