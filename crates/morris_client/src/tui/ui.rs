//! Stateless board rendering.

use super::view::TuiView;
use crate::session::{Phase, Session};
use morris_board::{Color as PieceColor, Square};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

// The classic three-ring diagram on a 13x13 logical grid, two characters
// per column. Points are overlaid with piece glyphs when drawing.
const TEMPLATE: [&str; 13] = [
    "+-----------+-----------+",
    "|           |           |",
    "|   +-------+-------+   |",
    "|   |       |       |   |",
    "|   |   +---+---+   |   |",
    "|   |   |       |   |   |",
    "+---+---+       +---+---+",
    "|   |   |       |   |   |",
    "|   |   +---+---+   |   |",
    "|   |       |       |   |",
    "|   +-------+-------+   |",
    "|           |           |",
    "+-----------+-----------+",
];

const BOARD_WIDTH: u16 = 25;
const BOARD_HEIGHT: u16 = 13;

/// Draws the whole screen: title, board, and the status block.
pub fn draw(frame: &mut Frame, session: &Session<TuiView>, cursor: Square) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(BOARD_HEIGHT),
            Constraint::Length(5),
        ])
        .split(frame.area());

    let title = Paragraph::new("Nine Men's Morris")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    draw_board(frame, chunks[1], session, cursor);

    let view = session.renderer();
    let event_line = match view.error() {
        Some(error) => Line::styled(error.to_owned(), Style::default().fg(Color::Red)),
        None => Line::raw(view.message().to_owned()),
    };
    let info = Paragraph::new(vec![
        Line::styled(status_line(session), Style::default().fg(Color::Yellow)),
        event_line,
        Line::raw(help_line(session)),
    ])
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(info, chunks[2]);
}

fn status_line(session: &Session<TuiView>) -> String {
    match session.phase() {
        Phase::AwaitingStart => "Pick a side to start a game".to_owned(),
        Phase::WaitingForServer => "Waiting for the engine...".to_owned(),
        Phase::Placement => "Your turn: place a piece on a highlighted square".to_owned(),
        Phase::Movement => match session.selection() {
            Some(square) => format!("Moving from {square}: pick a destination"),
            None => "Your turn: select one of your pieces".to_owned(),
        },
        Phase::Removal => "Mill! Choose an opponent piece to remove".to_owned(),
        Phase::GameOver => match session.winner() {
            Some(winner) if winner == session.player() => "You won!".to_owned(),
            Some(_) => "You lost.".to_owned(),
            None => "Game over".to_owned(),
        },
    }
}

fn help_line(session: &Session<TuiView>) -> &'static str {
    match session.phase() {
        Phase::AwaitingStart => "b: play black   w: play white   q: quit",
        Phase::GameOver => "r: new game   q: quit",
        _ => "arrows: move cursor   enter: select   q: quit",
    }
}

fn draw_board(frame: &mut Frame, area: Rect, session: &Session<TuiView>, cursor: Square) {
    let board_area = center_rect(area, BOARD_WIDTH, BOARD_HEIGHT);
    let view = session.renderer();

    let mut lines = Vec::with_capacity(TEMPLATE.len());
    for (row, template) in TEMPLATE.iter().enumerate() {
        let mut spans = Vec::new();
        let mut run = String::new();
        for (col, ch) in template.chars().enumerate() {
            let Some(square) = point_at(row, col) else {
                run.push(ch);
                continue;
            };
            if !run.is_empty() {
                spans.push(Span::raw(std::mem::take(&mut run)));
            }
            spans.push(point_span(session, view, square, cursor));
        }
        if !run.is_empty() {
            spans.push(Span::raw(run));
        }
        lines.push(Line::from(spans));
    }
    frame.render_widget(Paragraph::new(lines), board_area);
}

fn point_span(
    session: &Session<TuiView>,
    view: &TuiView,
    square: Square,
    cursor: Square,
) -> Span<'static> {
    let symbol = match session.board().piece_at(square) {
        Some(piece) if piece.color == PieceColor::Black => "●",
        Some(_) => "○",
        None => "·",
    };
    let mut style = Style::default();
    if view.is_highlighted(square) {
        style = style.fg(Color::Green);
    }
    if session.selection() == Some(square) {
        style = style.fg(Color::Yellow).add_modifier(Modifier::BOLD);
    }
    if square == cursor {
        style = style.add_modifier(Modifier::REVERSED);
    }
    Span::styled(symbol, style)
}

/// The square rendered at this template cell, if it is one of the 24
/// points.
fn point_at(row: usize, col: usize) -> Option<Square> {
    Square::all().find(|square| grid_point(*square) == (row, col))
}

/// Maps a square to its (row, column) in the character grid. Coordinates
/// wrap like the engine's bit-board indexing, so even a rogue square
/// lands somewhere instead of panicking.
fn grid_point(square: Square) -> (usize, usize) {
    let ring = (square.ring() % Square::RINGS) as usize;
    let (near, mid, far) = (2 * ring, 6, 12 - 2 * ring);
    let (col, row) = match square.spoke() % Square::SPOKES {
        0 => (near, near),
        1 => (mid, near),
        2 => (far, near),
        3 => (far, mid),
        4 => (far, far),
        5 => (mid, far),
        6 => (near, far),
        _ => (near, mid),
    };
    (row, col * 2)
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
