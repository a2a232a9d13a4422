//! bitboard-engine - UCI shell around the bitboard board core.
//!
//! Reads protocol commands from stdin and answers on stdout. Logs go to
//! stderr so they never mix with protocol output.

mod config;
mod session;

use anyhow::Context;
use chess_board::AttackTables;
use clap::Parser;
use config::EngineConfig;
use session::Session;
use std::path::PathBuf;
use tracing_subscriber::filter::LevelFilter;

/// UCI shell around the bitboard board core.
#[derive(Parser)]
#[command(name = "bitboard-engine")]
#[command(about = "UCI shell around the bitboard board core")]
struct Args {
    /// Path to a TOML config file (default: engine.toml if present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Engine name reported in `id name`
    #[arg(long)]
    name: Option<String>,

    /// Author reported in `id author`
    #[arg(long)]
    author: Option<String>,

    /// Log level for stderr: off, error, warn, info, debug, trace
    #[arg(long)]
    log_level: Option<String>,
}

impl Args {
    /// Flags given on the command line win over the config file.
    fn apply(self, config: &mut EngineConfig) {
        if let Some(name) = self.name {
            config.name = name;
        }
        if let Some(author) = self.author {
            config.author = author;
        }
        if let Some(level) = self.log_level {
            config.log_level = level;
        }
    }
}

fn main() -> anyhow::Result<()> {
    let mut args = Args::parse();

    let mut config = match args.config.take() {
        Some(path) => EngineConfig::load_from(&path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => EngineConfig::load().context("loading engine.toml")?,
    };
    args.apply(&mut config);

    let level: LevelFilter = config
        .log_level
        .parse()
        .with_context(|| format!("invalid log level '{}'", config.log_level))?;
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .init();

    tracing::info!("Starting {} by {}", config.name, config.author);

    let tables = AttackTables::get();
    let mut session = Session::new(&config, tables)
        .with_context(|| format!("invalid startpos '{}'", config.startpos))?;

    let mut engine = uci::stdio_engine();
    session.run(&mut engine)?;
    tracing::debug!(fen = %session.board().to_fen(), "Final position");
    Ok(())
}
