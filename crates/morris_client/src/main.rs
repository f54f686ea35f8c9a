//! Terminal client for nine men's morris.

use anyhow::Result;
use clap::{Parser, ValueEnum};

/// Play nine men's morris against a WebSocket engine.
#[derive(Parser, Debug)]
#[command(name = "morris", version, about = "Terminal client for nine men's morris")]
struct Args {
    /// Engine WebSocket URL.
    #[arg(long, default_value = "ws://localhost:999")]
    url: String,

    /// Skip the side menu and play this side.
    #[arg(long, value_enum)]
    side: Option<Side>,

    /// Log file; the terminal itself belongs to the UI.
    #[arg(long, default_value = "morris.log")]
    log_file: std::path::PathBuf,
}

/// Which side to play.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum Side {
    /// Black places first.
    Black,
    /// White moves second.
    White,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let play_black = args.side.map(|side| matches!(side, Side::Black));
    morris_client::run_tui(args.url, play_black, args.log_file).await
}
