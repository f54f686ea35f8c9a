//! The game-session state machine.
//!
//! One [`Session`] lives per game. User intents and decoded server events
//! are dispatched in; the session queries the board mirror for legality,
//! applies moves optimistically, drives the [`Renderer`], and pushes
//! outbound messages into a fire-and-forget channel owned by the
//! transport driver. Everything happens on one logical thread: the driver
//! hands the session exactly one event at a time.

use crate::protocol::{ClientMessage, ServerEvent};
use crate::render::Renderer;
use anyhow::{Context, Result};
use morris_board::{BoardState, Color, Move, Square};
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info, instrument, warn};

/// Where the session currently is in a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No game yet; waiting for the player to pick a side.
    AwaitingStart,
    /// The opponent is to move, or the engine owes us a legal set.
    WaitingForServer,
    /// Our turn: click an empty square to place a piece.
    Placement,
    /// Our turn: select one of our pieces, then a destination.
    Movement,
    /// Our move completed a mill: click an opponent piece to remove.
    Removal,
    /// Terminal until [`Session::reset`].
    GameOver,
}

/// A user-interaction event, already resolved to a board position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Start a game, playing black (true) or white.
    Start {
        /// Whether the player takes black, the side that places first.
        play_black: bool,
    },
    /// The user picked a square — empty or holding either side's piece.
    Select(Square),
}

/// A single game session: board mirror, phase machine, selection state.
///
/// Created together with its board when a game starts and discarded (or
/// [`reset`](Session::reset)) when the game ends; there is exactly one
/// live session per connection.
pub struct Session<R: Renderer> {
    board: BoardState,
    phase: Phase,
    player: Color,
    selection: Option<Square>,
    pending_capture: Option<Move>,
    pending_pass: bool,
    winner: Option<Color>,
    renderer: R,
    outbox: UnboundedSender<ClientMessage>,
}

impl<R: Renderer> Session<R> {
    /// Creates a fresh session in [`Phase::AwaitingStart`].
    ///
    /// Messages the session decides to send go into `outbox`; the
    /// transport driver drains it. Sends never block.
    pub fn new(renderer: R, outbox: UnboundedSender<ClientMessage>) -> Self {
        Self {
            board: BoardState::new(),
            phase: Phase::AwaitingStart,
            player: Color::Black,
            selection: None,
            pending_capture: None,
            pending_pass: false,
            winner: None,
            renderer,
            outbox,
        }
    }

    /// The board mirror.
    pub fn board(&self) -> &BoardState {
        &self.board
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The side this client plays. Meaningful once started.
    pub fn player(&self) -> Color {
        self.player
    }

    /// The currently selected piece's square, during movement.
    pub fn selection(&self) -> Option<Square> {
        self.selection
    }

    /// The winner, once the game is over.
    pub fn winner(&self) -> Option<Color> {
        self.winner
    }

    /// True once the game has ended.
    pub fn is_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    /// The renderer, for frontends that read their view state back.
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Mutable access to the renderer, for surfacing driver-level errors.
    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// Returns the session to a fresh [`Phase::AwaitingStart`].
    ///
    /// Drops the board, any selection, and any armed pass; the next game
    /// starts from nothing.
    pub fn reset(&mut self) {
        info!("session reset");
        self.board = BoardState::new();
        self.phase = Phase::AwaitingStart;
        self.player = Color::Black;
        self.selection = None;
        self.pending_capture = None;
        self.pending_pass = false;
        self.winner = None;
    }

    /// Dispatches one user intent.
    ///
    /// Clicks that do not resolve to a legal action are silently ignored;
    /// exploratory clicking is expected, not an error.
    #[instrument(skip(self), fields(phase = ?self.phase))]
    pub fn handle_intent(&mut self, intent: Intent) -> Result<()> {
        match (self.phase, intent) {
            (Phase::AwaitingStart, Intent::Start { play_black }) => self.start(play_black),
            (Phase::Placement, Intent::Select(square)) => self.place_at(square),
            (Phase::Movement, Intent::Select(square)) => self.select_or_move(square),
            (Phase::Removal, Intent::Select(square)) => self.capture_at(square),
            _ => {
                debug!(?intent, "intent ignored in this phase");
                Ok(())
            }
        }
    }

    /// Dispatches one decoded server event.
    ///
    /// # Errors
    ///
    /// Fails when the engine instructs a board mutation the mirror cannot
    /// satisfy — the two have diverged and the session must end.
    #[instrument(skip(self), fields(phase = ?self.phase))]
    pub fn handle_server(&mut self, event: ServerEvent) -> Result<()> {
        if self.phase == Phase::GameOver || self.phase == Phase::AwaitingStart {
            warn!(?event, "server event outside a live game ignored");
            return Ok(());
        }
        match event {
            ServerEvent::Move(mv) => {
                let mover = self.board.to_move();
                info!(%mv, %mover, "applying server move");
                self.board
                    .apply(mv)
                    .context("server move does not fit the local board")?;
                self.renderer.render_move(mover, &mv);
                Ok(())
            }
            ServerEvent::LegalMoves(moves) => {
                self.apply_legal_moves(moves);
                Ok(())
            }
            ServerEvent::Error(message) => {
                warn!(%message, "engine reported an error");
                self.renderer.render_error(&message);
                Ok(())
            }
            ServerEvent::End { black_won } => {
                let winner = Color::from_is_black(black_won);
                info!(%winner, "game over");
                self.winner = Some(winner);
                self.phase = Phase::GameOver;
                self.clear_selection();
                self.pending_pass = false;
                self.renderer.render_legal_highlight(Vec::new());
                self.renderer.render_result(winner);
                Ok(())
            }
        }
    }

    /// Sends the armed forced pass, if any.
    ///
    /// An empty legal set only arms the pass; the driver calls this after
    /// the message handler has returned, so the send never re-enters
    /// in-flight message handling.
    pub fn flush_deferred_pass(&mut self) -> Result<()> {
        if std::mem::take(&mut self.pending_pass) {
            info!("no legal moves, passing");
            self.send_move(Move::Pass)?;
        }
        Ok(())
    }

    fn start(&mut self, play_black: bool) -> Result<()> {
        self.player = Color::from_is_black(play_black);
        // Black places first, so black's client waits for its legal set
        // in the placement phase rather than behind the server.
        self.phase = if play_black {
            Phase::Placement
        } else {
            Phase::WaitingForServer
        };
        info!(player = %self.player, "starting game");
        self.outbox
            .send(ClientMessage::Start(play_black))
            .context("transport outbox closed")?;
        Ok(())
    }

    fn apply_legal_moves(&mut self, moves: Vec<Move>) {
        self.board.set_legal_moves(moves);
        self.clear_selection();
        if self.board.legal_moves().is_empty() {
            // Deferred: flushed by the driver once this handler is done.
            self.pending_pass = true;
            self.phase = Phase::WaitingForServer;
            return;
        }
        // The engine serves exactly one move shape per game stage, so the
        // first entry tells us which stage this is.
        let placing = matches!(self.board.legal_moves().first(), Some(Move::Place { .. }));
        self.phase = if placing {
            Phase::Placement
        } else {
            Phase::Movement
        };
        debug!(phase = ?self.phase, "turn to act");
        self.renderer
            .render_legal_highlight(self.board.legal_destinations());
    }

    fn place_at(&mut self, square: Square) -> Result<()> {
        self.resolve(Move::Place {
            to: square,
            capture: None,
        })
    }

    fn select_or_move(&mut self, square: Square) -> Result<()> {
        if let Some(piece) = self.board.piece_at(square) {
            if piece.color == self.player {
                // Selecting again just re-selects; nothing is sent.
                self.selection = Some(square);
                debug!(%square, "piece selected");
                self.renderer
                    .render_legal_highlight(self.board.legal_destinations_from(square));
            }
            return Ok(());
        }
        let Some(from) = self.selection else {
            return Ok(());
        };
        self.resolve(Move::Shift {
            from,
            to: square,
            capture: None,
        })
    }

    fn capture_at(&mut self, square: Square) -> Result<()> {
        let Some(base) = self.pending_capture else {
            warn!("removal phase without a pending move");
            return Ok(());
        };
        let mv = base.with_capture(square);
        if self.board.is_legal(&mv) {
            self.send_move(mv)
        } else {
            debug!(%mv, "capture not in the legal set, ignored");
            Ok(())
        }
    }

    /// Sends the move as-is if legal; enters the removal phase when the
    /// engine only permits it with a capture attached; ignores it
    /// otherwise.
    fn resolve(&mut self, base: Move) -> Result<()> {
        if self.board.is_legal(&base) {
            return self.send_move(base);
        }
        let captures = self.board.capture_squares_for(&base);
        if !captures.is_empty() {
            info!(%base, "move completes a mill, pick a piece to remove");
            self.pending_capture = Some(base);
            self.phase = Phase::Removal;
            self.renderer.render_legal_highlight(captures);
            return Ok(());
        }
        debug!(%base, "move not in the legal set, ignored");
        Ok(())
    }

    fn send_move(&mut self, mv: Move) -> Result<()> {
        let mover = self.board.to_move();
        // Optimistic mirror: the engine does not echo our own moves back.
        self.board
            .apply(mv)
            .context("own move does not fit the local board")?;
        info!(%mv, %mover, "move sent");
        self.renderer.render_move(mover, &mv);
        self.clear_selection();
        self.renderer.render_legal_highlight(Vec::new());
        self.outbox
            .send(ClientMessage::Move(mv))
            .context("transport outbox closed")?;
        self.phase = Phase::WaitingForServer;
        Ok(())
    }

    fn clear_selection(&mut self) {
        self.selection = None;
        self.pending_capture = None;
    }
}
