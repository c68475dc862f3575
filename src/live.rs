//! Live product feed over the push channel.
//!
//! Transport and state-merge are deliberately decoupled: a read task owns
//! the socket and forwards typed [`FeedEvent`]s into a channel, and the list
//! controller consumes events one at a time in arrival order. Tests drive
//! the controller with synthetic events and never need a socket.

use crate::api::RequestSigner;
use crate::error::ApiError;
use crate::models::Product;
use futures::StreamExt;
use serde::Deserialize;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tokio_tungstenite::{connect_async, tungstenite::Message};

/// Typed event delivered by the push channel.
#[derive(Debug, Clone, PartialEq)]
pub enum FeedEvent {
    /// Wholesale replacement record for an existing product.
    Update(Product),
}

/// Wire frame emitted by the server.
#[derive(Debug, Deserialize)]
struct PushFrame {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    product: Option<Product>,
}

/// Handle to an open feed: an event receiver plus the read task.
///
/// `close` is unconditional and idempotent; closing a feed that is already
/// closed (or whose read task already finished) is a no-op. Dropping the
/// handle closes it too.
pub struct FeedHandle {
    events: UnboundedReceiver<FeedEvent>,
    task: Option<tokio::task::JoinHandle<()>>,
}

impl FeedHandle {
    /// Next event, or `None` once the feed has disconnected.
    pub async fn recv(&mut self) -> Option<FeedEvent> {
        self.events.recv().await
    }

    /// Drain without waiting; used by render loops on their own cadence.
    pub fn try_recv(&mut self) -> Option<FeedEvent> {
        self.events.try_recv().ok()
    }

    pub fn close(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
        self.events.close();
    }
}

impl Drop for FeedHandle {
    fn drop(&mut self) {
        self.close();
    }
}

/// Open the feed if a session token is available.
///
/// Without a token no connection is attempted at all and `Ok(None)` is
/// returned; the live channel only exists for authenticated sessions.
pub async fn open(
    ws_url: &str,
    signer: &dyn RequestSigner,
) -> Result<Option<FeedHandle>, ApiError> {
    let Some(token) = signer.bearer_token() else {
        return Ok(None);
    };

    let url = format!("{ws_url}?token={token}");
    let (stream, _response) = connect_async(url.as_str())
        .await
        .map_err(|e| ApiError::Push(e.to_string()))?;
    tracing::debug!(ws_url, "push channel connected");

    let (tx, events) = unbounded_channel();
    let task = tokio::spawn(read_loop(stream, tx));

    Ok(Some(FeedHandle {
        events,
        task: Some(task),
    }))
}

async fn read_loop<S>(mut stream: S, tx: UnboundedSender<FeedEvent>)
where
    S: futures::Stream<Item = Result<Message, tokio_tungstenite::tungstenite::Error>> + Unpin,
{
    while let Some(frame) = stream.next().await {
        match frame {
            Ok(Message::Text(text)) => {
                if let Some(event) = parse_frame(text.as_str()) {
                    if tx.send(event).is_err() {
                        // Receiver gone: the view tore down.
                        break;
                    }
                }
            }
            Ok(Message::Close(_)) => {
                tracing::debug!("push channel closed by server");
                break;
            }
            Ok(_) => {}
            Err(e) => {
                tracing::warn!("push channel error: {e}");
                break;
            }
        }
    }
}

/// Decode one frame. Unknown types and malformed payloads are dropped; the
/// channel only keeps visible rows fresh, it is not a command stream.
fn parse_frame(text: &str) -> Option<FeedEvent> {
    let frame: PushFrame = match serde_json::from_str(text) {
        Ok(frame) => frame,
        Err(e) => {
            tracing::warn!("malformed push frame: {e}");
            return None;
        }
    };

    if frame.kind != "product_update" {
        tracing::debug!(kind = %frame.kind, "ignoring push frame");
        return None;
    }

    frame.product.map(FeedEvent::Update)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::NoAuth;

    fn product_frame() -> &'static str {
        r#"{
            "type": "product_update",
            "product": {
                "id": 7, "name": "Widget", "sku": "WID-001", "quantity": 3,
                "sale_price": "19.99", "cost_price": "7.50",
                "category": {"id": 1, "name": "Gadgets"},
                "supplier": {"id": 2, "name": "Acme"}
            }
        }"#
    }

    #[test]
    fn parses_product_update_frames() {
        let event = parse_frame(product_frame()).unwrap();
        let FeedEvent::Update(product) = event;
        assert_eq!(product.id, 7);
        assert_eq!(product.quantity, 3);
    }

    #[test]
    fn ignores_unknown_frame_types() {
        assert!(parse_frame(r#"{"type": "heartbeat"}"#).is_none());
    }

    #[test]
    fn ignores_malformed_frames() {
        assert!(parse_frame("not json").is_none());
        assert!(parse_frame(r#"{"type": "product_update"}"#).is_none());
    }

    struct FixedToken;

    impl RequestSigner for FixedToken {
        fn bearer_token(&self) -> Option<String> {
            Some("tok".to_string())
        }
    }

    #[tokio::test]
    async fn unreachable_channel_surfaces_as_push_error() {
        match open("ws://127.0.0.1:1/ws/products/", &FixedToken).await {
            Err(ApiError::Push(_)) => {}
            Err(other) => panic!("expected push error, got {other:?}"),
            Ok(_) => panic!("expected push error, got a feed"),
        }
    }

    #[tokio::test]
    async fn open_without_token_attempts_no_connection() {
        // The URL is unroutable; if open() tried to connect this would fail
        // instead of returning Ok(None) immediately.
        let feed = open("ws://127.0.0.1:1/ws/products/", &NoAuth).await.unwrap();
        assert!(feed.is_none());
    }

    #[tokio::test]
    async fn close_is_idempotent_and_safe_after_task_end() {
        let frame: PushFrame = serde_json::from_str(product_frame()).unwrap();
        let product = frame.product.unwrap();

        let (tx, events) = unbounded_channel();
        let task = tokio::spawn(async move {
            let _ = tx.send(FeedEvent::Update(product));
        });

        let mut handle = FeedHandle {
            events,
            task: Some(task),
        };

        // The event may or may not have landed before close; either way
        // closing twice (and dropping afterwards) must not panic.
        handle.close();
        handle.close();
        drop(handle);
    }
}
