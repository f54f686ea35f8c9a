//! WebSocket transport to the engine.
//!
//! One connection per game, opened when the player picks a side and
//! closed exactly once when the game ends. Frames are JSON text; sends
//! drain from the session's outbox, arrivals are pushed at the driver.

use crate::protocol::ClientMessage;
use anyhow::{Context, Result};
use futures_util::stream::SplitSink;
use futures_util::SinkExt;
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::protocol::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use tracing::{debug, info};

/// The connected socket type.
pub type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// The write half after splitting.
pub type WsSink = SplitSink<WsStream, Message>;

/// Connects to the engine.
///
/// # Errors
///
/// Connection failure is terminal for the session: the caller surfaces
/// it to the user and does not retry.
pub async fn connect(url: &str) -> Result<WsStream> {
    info!(%url, "connecting");
    let (stream, response) = connect_async(url)
        .await
        .with_context(|| format!("connecting to {url}"))?;
    debug!(status = %response.status(), "websocket handshake complete");
    Ok(stream)
}

/// Sends one client message as a JSON text frame.
pub async fn send_message(sink: &mut WsSink, message: &ClientMessage) -> Result<()> {
    let text = serde_json::to_string(message).context("encoding client message")?;
    info!(%text, "sending");
    sink.send(Message::text(text)).await.context("sending frame")?;
    Ok(())
}

/// The payload of a data frame; `None` for control frames.
pub fn frame_text(message: Message) -> Option<String> {
    match message {
        Message::Text(text) => Some(text.to_string()),
        Message::Binary(bytes) => String::from_utf8(bytes.to_vec()).ok(),
        _ => None,
    }
}
