//! UCI (Universal Chess Interface) protocol library.
//!
//! This crate provides types and parsing for the UCI protocol used by chess engines,
//! plus a JSON extension channel for structured debug output.
//!
//! # Standard UCI Commands
//!
//! - `uci` - Initialize engine, get id and options
//! - `isready` / `readyok` - Synchronization
//! - `setoption name <n> [value <v>]` - Configure the engine
//! - `ucinewgame` - Reset for a new game
//! - `position startpos|fen <fen> [moves <move>...]` - Set position
//! - `go [movetime <ms>] [depth <d>] ...` - Start search
//! - `stop`, `ponderhit`, `debug`, `register`
//! - `quit` (or `q`) - Exit engine
//!
//! # Extensions
//!
//! - `d` - Print the board (non-standard)
//! - `info string ext:<name> <json>` - Structured debug info

mod command;
mod extension;

pub use command::{GoOptions, GuiCommand};
pub use extension::ExtensionValue;

use std::io::{BufRead, Write};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum UciError {
    #[error("Parse error: {0}")]
    ParseError(String),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Messages sent from engine to GUI.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineMessage {
    /// Engine identification.
    Id {
        name: Option<String>,
        author: Option<String>,
    },
    /// UCI initialization complete.
    UciOk,
    /// Engine is ready.
    ReadyOk,
    /// Free-form text for the GUI.
    InfoString(String),
    /// Structured payload sent as `info string ext:<name> <json>`.
    Extension { name: String, value: ExtensionValue },
    /// Best move found.
    BestMove { mv: String, ponder: Option<String> },
}

impl EngineMessage {
    /// Format message for output.
    pub fn to_uci(&self) -> Result<String, UciError> {
        let line = match self {
            EngineMessage::Id { name, author } => {
                let mut parts = Vec::new();
                if let Some(n) = name {
                    parts.push(format!("id name {}", n));
                }
                if let Some(a) = author {
                    parts.push(format!("id author {}", a));
                }
                parts.join("\n")
            }
            EngineMessage::UciOk => "uciok".to_string(),
            EngineMessage::ReadyOk => "readyok".to_string(),
            EngineMessage::InfoString(text) => format!("info string {}", text),
            EngineMessage::Extension { name, value } => {
                format!("info string ext:{} {}", name, value.to_json()?)
            }
            EngineMessage::BestMove { mv, ponder } => match ponder {
                Some(p) => format!("bestmove {} ponder {}", mv, p),
                None => format!("bestmove {}", mv),
            },
        };
        Ok(line)
    }
}

/// Line-oriented UCI reader/writer pair.
pub struct UciEngine<R: BufRead, W: Write> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> UciEngine<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    /// Reads the next raw line, or `None` at end of input.
    pub fn read_line(&mut self) -> Result<Option<String>, UciError> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }

    /// Read and parse the next command from GUI. `None` at end of input.
    pub fn read_command(&mut self) -> Result<Option<GuiCommand>, UciError> {
        match self.read_line()? {
            Some(line) => GuiCommand::parse(&line).map(Some),
            None => Ok(None),
        }
    }

    /// Send a message to the GUI.
    pub fn send(&mut self, msg: &EngineMessage) -> Result<(), UciError> {
        writeln!(self.writer, "{}", msg.to_uci()?)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Writes a line that is not a structured message (board diagrams).
    pub fn send_raw(&mut self, text: &str) -> Result<(), UciError> {
        writeln!(self.writer, "{}", text)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Send engine identification.
    pub fn send_id(&mut self, name: &str, author: &str) -> Result<(), UciError> {
        self.send(&EngineMessage::Id {
            name: Some(name.to_string()),
            author: Some(author.to_string()),
        })
    }

    /// Send uciok.
    pub fn send_uciok(&mut self) -> Result<(), UciError> {
        self.send(&EngineMessage::UciOk)
    }

    /// Send readyok.
    pub fn send_readyok(&mut self) -> Result<(), UciError> {
        self.send(&EngineMessage::ReadyOk)
    }

    /// Send best move.
    pub fn send_bestmove(&mut self, mv: &str) -> Result<(), UciError> {
        self.send(&EngineMessage::BestMove {
            mv: mv.to_string(),
            ponder: None,
        })
    }

    /// Send `info string <text>`.
    pub fn send_info_string(&mut self, text: &str) -> Result<(), UciError> {
        self.send(&EngineMessage::InfoString(text.to_string()))
    }

    /// Send a structured extension payload.
    pub fn send_extension(&mut self, name: &str, value: ExtensionValue) -> Result<(), UciError> {
        self.send(&EngineMessage::Extension {
            name: name.to_string(),
            value,
        })
    }

    /// Consumes the engine, returning the writer.
    pub fn into_writer(self) -> W {
        self.writer
    }
}

/// Create a UCI engine using stdin/stdout.
pub fn stdio_engine() -> UciEngine<std::io::StdinLock<'static>, std::io::Stdout> {
    UciEngine::new(std::io::stdin().lock(), std::io::stdout())
}
