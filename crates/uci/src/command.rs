//! UCI command parsing.

use crate::UciError;
use std::str::FromStr;

/// Commands sent from GUI to engine.
#[derive(Debug, Clone, PartialEq)]
pub enum GuiCommand {
    /// Initialize UCI mode.
    Uci,
    /// Switch debug mode on or off.
    Debug(bool),
    /// Check if engine is ready.
    IsReady,
    /// Set an engine option.
    SetOption { name: String, value: Option<String> },
    /// Registration request. Registration is never required.
    Register,
    /// The next position belongs to a new game.
    UciNewGame,
    /// Set up position.
    Position {
        fen: Option<String>,
        moves: Vec<String>,
    },
    /// Start calculating.
    Go(GoOptions),
    /// Stop calculating.
    Stop,
    /// The opponent played the expected ponder move.
    PonderHit,
    /// Print the current board (non-standard `d`).
    Display,
    /// Quit the engine.
    Quit,
    /// Unknown command (for forward compatibility).
    Unknown(String),
}

/// Options for the `go` command.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GoOptions {
    /// Restrict the search to these moves.
    pub searchmoves: Vec<String>,
    /// Start searching in pondering mode.
    pub ponder: bool,
    /// White time remaining in milliseconds.
    pub wtime: Option<u64>,
    /// Black time remaining in milliseconds.
    pub btime: Option<u64>,
    /// White increment per move in milliseconds.
    pub winc: Option<u64>,
    /// Black increment per move in milliseconds.
    pub binc: Option<u64>,
    /// Moves to go until next time control.
    pub movestogo: Option<u32>,
    /// Search to this depth.
    pub depth: Option<u32>,
    /// Search at most this many nodes.
    pub nodes: Option<u64>,
    /// Search for a mate in this many moves.
    pub mate: Option<u32>,
    /// Search for exactly this time in milliseconds.
    pub movetime: Option<u64>,
    /// Search indefinitely until `stop`.
    pub infinite: bool,
}

impl GuiCommand {
    /// Parse a UCI command string.
    ///
    /// The command word is case-insensitive; arguments are kept verbatim.
    pub fn parse(input: &str) -> Result<Self, UciError> {
        let input = input.trim();
        let mut parts = input.split_whitespace();

        let cmd = parts.next().unwrap_or("").to_ascii_lowercase();

        match cmd.as_str() {
            "uci" => Ok(GuiCommand::Uci),
            "debug" => Self::parse_debug(parts),
            "isready" => Ok(GuiCommand::IsReady),
            "setoption" => Self::parse_setoption(parts),
            "register" => Ok(GuiCommand::Register),
            "ucinewgame" => Ok(GuiCommand::UciNewGame),
            "position" => Self::parse_position(parts),
            "go" => Self::parse_go(parts),
            "stop" => Ok(GuiCommand::Stop),
            "ponderhit" => Ok(GuiCommand::PonderHit),
            "d" => Ok(GuiCommand::Display),
            "quit" | "q" => Ok(GuiCommand::Quit),
            "" => Ok(GuiCommand::Unknown(String::new())),
            _ => Ok(GuiCommand::Unknown(input.to_string())),
        }
    }

    fn parse_debug<'a>(mut parts: impl Iterator<Item = &'a str>) -> Result<Self, UciError> {
        match parts.next() {
            Some("on") => Ok(GuiCommand::Debug(true)),
            Some("off") => Ok(GuiCommand::Debug(false)),
            other => Err(UciError::ParseError(format!(
                "Expected 'on' or 'off' after debug, got '{}'",
                other.unwrap_or("")
            ))),
        }
    }

    fn parse_setoption<'a>(mut parts: impl Iterator<Item = &'a str>) -> Result<Self, UciError> {
        if parts.next() != Some("name") {
            return Err(UciError::ParseError(
                "Expected 'name' after setoption".to_string(),
            ));
        }

        let rest: Vec<&str> = parts.collect();
        let (name, value) = match rest.iter().position(|&p| p == "value") {
            Some(idx) => (rest[..idx].join(" "), Some(rest[idx + 1..].join(" "))),
            None => (rest.join(" "), None),
        };

        if name.is_empty() {
            return Err(UciError::ParseError("Missing option name".to_string()));
        }

        Ok(GuiCommand::SetOption { name, value })
    }

    fn parse_position<'a>(mut parts: impl Iterator<Item = &'a str>) -> Result<Self, UciError> {
        let fen = match parts.next() {
            Some("startpos") => None,
            Some("fen") => {
                // Collect FEN parts until "moves" or end
                let mut fen_parts = Vec::new();
                for part in parts.by_ref() {
                    if part == "moves" {
                        break;
                    }
                    fen_parts.push(part);
                }
                if fen_parts.is_empty() {
                    return Err(UciError::ParseError("Missing FEN after 'fen'".to_string()));
                }
                Some(fen_parts.join(" "))
            }
            Some(other) => {
                return Err(UciError::ParseError(format!(
                    "Expected 'startpos' or 'fen', got '{}'",
                    other
                )));
            }
            None => {
                return Err(UciError::ParseError(
                    "Expected 'startpos' or 'fen'".to_string(),
                ));
            }
        };

        let remaining: Vec<&str> = parts.collect();
        let moves = if fen.is_some() {
            // The FEN loop already consumed "moves"
            remaining.iter().map(|s| s.to_string()).collect()
        } else {
            match remaining.iter().position(|&s| s == "moves") {
                Some(idx) => remaining[idx + 1..].iter().map(|s| s.to_string()).collect(),
                None => Vec::new(),
            }
        };

        Ok(GuiCommand::Position { fen, moves })
    }

    fn parse_go<'a>(parts: impl Iterator<Item = &'a str>) -> Result<Self, UciError> {
        const KEYWORDS: [&str; 12] = [
            "searchmoves",
            "ponder",
            "wtime",
            "btime",
            "winc",
            "binc",
            "movestogo",
            "depth",
            "nodes",
            "mate",
            "movetime",
            "infinite",
        ];

        let mut opts = GoOptions::default();
        let parts: Vec<&str> = parts.collect();
        let mut i = 0;

        while i < parts.len() {
            match parts[i] {
                "searchmoves" => {
                    while i + 1 < parts.len() && !KEYWORDS.contains(&parts[i + 1]) {
                        i += 1;
                        opts.searchmoves.push(parts[i].to_string());
                    }
                }
                "ponder" => opts.ponder = true,
                "infinite" => opts.infinite = true,
                "wtime" => opts.wtime = value_after(&parts, &mut i),
                "btime" => opts.btime = value_after(&parts, &mut i),
                "winc" => opts.winc = value_after(&parts, &mut i),
                "binc" => opts.binc = value_after(&parts, &mut i),
                "movestogo" => opts.movestogo = value_after(&parts, &mut i),
                "depth" => opts.depth = value_after(&parts, &mut i),
                "nodes" => opts.nodes = value_after(&parts, &mut i),
                "mate" => opts.mate = value_after(&parts, &mut i),
                "movetime" => opts.movetime = value_after(&parts, &mut i),
                _ => {}
            }
            i += 1;
        }

        Ok(GuiCommand::Go(opts))
    }
}

/// Parses the token after `parts[*i]`, advancing past it when present.
fn value_after<T: FromStr>(parts: &[&str], i: &mut usize) -> Option<T> {
    let value = parts.get(*i + 1)?;
    *i += 1;
    value.parse().ok()
}
