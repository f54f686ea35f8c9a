//! WebSocket client for nine men's morris.
//!
//! The engine on the other end of the connection owns the rules; this
//! crate mirrors its state and turns user interaction into protocol
//! messages:
//!
//! - [`Session`]: the phase state machine driving a game
//! - [`ClientMessage`]/[`ServerEvent`]: the JSON wire protocol
//! - [`Renderer`]: the contract the session drives the UI through
//! - [`run_tui`]: the terminal frontend

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod net;
mod protocol;
mod render;
mod session;
mod tui;

pub use protocol::{parse_server_message, ClientMessage, ProtocolError, ServerEvent};
pub use render::Renderer;
pub use session::{Intent, Phase, Session};
pub use tui::run_tui;
