//! Terminal frontend: one event loop interleaving keyboard input,
//! inbound engine frames, and the session's outbound messages.

mod input;
mod ui;
mod view;

use crate::net;
use crate::protocol::parse_server_message;
use crate::render::Renderer;
use crate::session::{Intent, Session};
use anyhow::Result;
use crossterm::{
    event::{Event, KeyCode, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures_util::{SinkExt, StreamExt};
use morris_board::Square;
use ratatui::{backend::Backend, backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};
use view::TuiView;

/// How a finished game loop wants to proceed.
enum Outcome {
    Quit,
    Restart,
    ConnectionLost,
}

/// Runs the terminal client until the user quits.
///
/// `preselect` skips the side menu; logging goes to `log_path` so the
/// alternate screen stays clean.
pub async fn run_tui(url: String, preselect: Option<bool>, log_path: PathBuf) -> Result<()> {
    let log_file = std::fs::File::create(&log_path)?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init();

    info!(%url, "starting morris client");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_loop(&mut terminal, &url, preselect).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &result {
        error!(error = ?err, "session error");
        eprintln!("Error: {err:?}");
    }
    result
}

async fn run_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    url: &str,
    mut preselect: Option<bool>,
) -> Result<()>
where
    <B as Backend>::Error: std::marker::Send + Sync + 'static,
{
    let mut keys = spawn_input_reader();

    loop {
        // Fresh session and board per game; the previous connection is
        // gone by the time we get here.
        let (outbox_tx, mut outbox_rx) = mpsc::unbounded_channel();
        let mut session = Session::new(TuiView::new(), outbox_tx);
        let mut cursor = Square::new(0, 1);

        let play_black = match preselect.take() {
            Some(side) => side,
            None => loop {
                terminal.draw(|frame| ui::draw(frame, &session, cursor))?;
                let Some(code) = next_key(&mut keys).await else {
                    return Ok(());
                };
                match code {
                    KeyCode::Char('b') => break true,
                    KeyCode::Char('w') => break false,
                    KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                    _ => {}
                }
            },
        };

        let stream = match net::connect(url).await {
            Ok(stream) => stream,
            Err(err) => {
                session
                    .renderer_mut()
                    .render_error("no connection to the engine");
                terminal.draw(|frame| ui::draw(frame, &session, cursor))?;
                let _ = next_key(&mut keys).await;
                return Err(err);
            }
        };
        let (mut sink, mut stream) = stream.split();
        session.handle_intent(Intent::Start { play_black })?;

        let mut closed = false;
        let outcome = 'game: loop {
            terminal.draw(|frame| ui::draw(frame, &session, cursor))?;

            tokio::select! {
                outbound = outbox_rx.recv(), if !closed => {
                    if let Some(message) = outbound {
                        net::send_message(&mut sink, &message).await?;
                    }
                }
                frame = stream.next(), if !closed => match frame {
                    Some(Ok(message)) => {
                        if let Some(text) = net::frame_text(message) {
                            debug!(%text, "received");
                            match parse_server_message(&text) {
                                Ok(events) => {
                                    for event in events {
                                        session.handle_server(event)?;
                                    }
                                    // Deferred so the send cannot re-enter
                                    // the handling of the frame that armed
                                    // it.
                                    session.flush_deferred_pass()?;
                                }
                                Err(err) => {
                                    warn!(error = %err, "bad frame");
                                    session.renderer_mut().render_error(&err.to_string());
                                }
                            }
                        }
                    }
                    Some(Err(err)) => {
                        error!(error = %err, "websocket error");
                        break 'game Outcome::ConnectionLost;
                    }
                    None => {
                        warn!("connection closed by the engine");
                        break 'game Outcome::ConnectionLost;
                    }
                },
                maybe_key = keys.recv() => {
                    let Some(key) = maybe_key else {
                        break 'game Outcome::Quit;
                    };
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    match key.code {
                        KeyCode::Char('q') | KeyCode::Esc => break 'game Outcome::Quit,
                        KeyCode::Char('r') if session.is_over() => break 'game Outcome::Restart,
                        KeyCode::Enter | KeyCode::Char(' ') => {
                            session.handle_intent(Intent::Select(cursor))?;
                        }
                        code => cursor = input::move_cursor(cursor, code),
                    }
                }
            }

            if session.is_over() && !closed {
                // Close exactly once; the disabled select arms drop any
                // queued sends and ignore any late frames.
                sink.close().await.ok();
                closed = true;
            }
        };

        match outcome {
            Outcome::Quit => return Ok(()),
            Outcome::Restart => continue,
            Outcome::ConnectionLost => {
                session.renderer_mut().render_error("connection lost");
                terminal.draw(|frame| ui::draw(frame, &session, cursor))?;
                let _ = next_key(&mut keys).await;
                return Ok(());
            }
        }
    }
}

/// Bridges blocking terminal input into the async loop.
fn spawn_input_reader() -> mpsc::UnboundedReceiver<KeyEvent> {
    let (tx, rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || {
        while let Ok(event) = crossterm::event::read() {
            if let Event::Key(key) = event {
                if tx.send(key).is_err() {
                    break;
                }
            }
        }
    });
    rx
}

async fn next_key(keys: &mut mpsc::UnboundedReceiver<KeyEvent>) -> Option<KeyCode> {
    while let Some(key) = keys.recv().await {
        if key.kind == KeyEventKind::Press {
            return Some(key.code);
        }
    }
    None
}
