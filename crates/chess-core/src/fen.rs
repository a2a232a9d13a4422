//! FEN (Forsyth-Edwards Notation) parsing and serialization.
//!
//! [`ParsedFen`] validates all six fields and converts them to typed values.
//! It is the scratch state a board is built from, so a malformed string never
//! touches a live board.

use std::fmt;

use thiserror::Error;

use crate::{CastlingRights, Color, ColoredPiece, Square};

/// The standard starting position FEN.
pub const STARTPOS: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Errors that can occur when parsing FEN strings.
///
/// Every variant carries the FEN text exactly as it was supplied.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FenError {
    #[error("invalid FEN '{fen}': expected 6 fields, found {found}")]
    FieldCount { fen: String, found: usize },

    #[error("invalid FEN '{fen}': expected 8 ranks in piece placement, found {found}")]
    RankCount { fen: String, found: usize },

    #[error("invalid FEN '{fen}': unexpected character '{found}' in rank {rank}")]
    InvalidPiece { fen: String, rank: u8, found: char },

    #[error("invalid FEN '{fen}': rank {rank} ('{text}') does not describe exactly 8 files")]
    RankLength { fen: String, rank: u8, text: String },

    #[error("invalid FEN '{fen}': side to move must be 'w' or 'b', found '{found}'")]
    ActiveColor { fen: String, found: String },

    #[error("invalid FEN '{fen}': castling rights must be '-' or up to 4 of KQkq, found '{found}'")]
    Castling { fen: String, found: String },

    #[error("invalid FEN '{fen}': en passant target must be '-' or a1-h8, found '{found}'")]
    EnPassant { fen: String, found: String },

    #[error("invalid FEN '{fen}': halfmove clock must be a non-negative 64-bit integer, found '{found}'")]
    HalfmoveClock { fen: String, found: String },

    #[error("invalid FEN '{fen}': fullmove number must be a non-negative 64-bit integer, found '{found}'")]
    FullmoveNumber { fen: String, found: String },
}

/// A fully validated FEN record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedFen {
    /// Occupant of each square, indexed by LERF square index.
    pub placement: [Option<ColoredPiece>; 64],
    /// The side to move.
    pub side_to_move: Color,
    /// Castling availability.
    pub castling: CastlingRights,
    /// En passant target square.
    pub en_passant: Option<Square>,
    /// Halfmove clock (for 50-move rule).
    pub halfmove_clock: u64,
    /// Fullmove number.
    pub fullmove_number: u64,
}

impl ParsedFen {
    /// Parses a FEN string.
    ///
    /// Fields are separated by whitespace; surrounding and repeated
    /// whitespace is ignored.
    pub fn parse(fen: &str) -> Result<Self, FenError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();

        if parts.len() != 6 {
            return Err(FenError::FieldCount {
                fen: fen.to_string(),
                found: parts.len(),
            });
        }

        let placement = parse_placement(fen, parts[0])?;

        let side_to_move = Color::from_fen_field(parts[1]).ok_or_else(|| FenError::ActiveColor {
            fen: fen.to_string(),
            found: parts[1].to_string(),
        })?;

        let castling = parse_castling(parts[2]).ok_or_else(|| FenError::Castling {
            fen: fen.to_string(),
            found: parts[2].to_string(),
        })?;

        let en_passant = match parts[3] {
            "-" => None,
            ep => Some(Square::from_algebraic(ep).ok_or_else(|| FenError::EnPassant {
                fen: fen.to_string(),
                found: ep.to_string(),
            })?),
        };

        let halfmove_clock = parts[4]
            .parse::<u64>()
            .map_err(|_| FenError::HalfmoveClock {
                fen: fen.to_string(),
                found: parts[4].to_string(),
            })?;

        let fullmove_number = parts[5]
            .parse::<u64>()
            .map_err(|_| FenError::FullmoveNumber {
                fen: fen.to_string(),
                found: parts[5].to_string(),
            })?;

        Ok(ParsedFen {
            placement,
            side_to_move,
            castling,
            en_passant,
            halfmove_clock,
            fullmove_number,
        })
    }

    /// Renders the canonical FEN string.
    pub fn to_fen(&self) -> String {
        self.to_string()
    }
}

fn parse_placement(fen: &str, field: &str) -> Result<[Option<ColoredPiece>; 64], FenError> {
    let ranks: Vec<&str> = field.split('/').collect();
    if ranks.len() != 8 {
        return Err(FenError::RankCount {
            fen: fen.to_string(),
            found: ranks.len(),
        });
    }

    let mut placement = [None; 64];

    // FEN lists rank 8 first.
    for (i, text) in ranks.iter().enumerate() {
        let rank = 7 - i as u8;
        let rank_error = || FenError::RankLength {
            fen: fen.to_string(),
            rank: rank + 1,
            text: text.to_string(),
        };

        let mut file = 0u8;
        for c in text.chars() {
            match c {
                '1'..='8' => {
                    file += c as u8 - b'0';
                    if file > 8 {
                        return Err(rank_error());
                    }
                }
                _ => {
                    let piece = ColoredPiece::from_fen_char(c).ok_or_else(|| {
                        FenError::InvalidPiece {
                            fen: fen.to_string(),
                            rank: rank + 1,
                            found: c,
                        }
                    })?;
                    let sq = Square::from_coords(file, rank).ok_or_else(rank_error)?;
                    placement[sq.index() as usize] = Some(piece);
                    file += 1;
                }
            }
        }

        if file != 8 {
            return Err(rank_error());
        }
    }

    Ok(placement)
}

fn parse_castling(field: &str) -> Option<CastlingRights> {
    if field == "-" {
        return Some(CastlingRights::NONE);
    }
    if field.len() > 4 {
        return None;
    }

    let mut rights = CastlingRights::NONE;
    for c in field.chars() {
        rights.insert(CastlingRights::flag_for_char(c)?);
    }
    Some(rights)
}

impl fmt::Display for ParsedFen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8u8).rev() {
            let mut empty_count = 0;
            for file in 0..8u8 {
                let index = crate::square_index(file, rank) as usize;
                match self.placement[index] {
                    Some(piece) => {
                        if empty_count > 0 {
                            write!(f, "{}", empty_count)?;
                            empty_count = 0;
                        }
                        write!(f, "{}", piece.to_fen_char())?;
                    }
                    None => empty_count += 1,
                }
            }
            if empty_count > 0 {
                write!(f, "{}", empty_count)?;
            }
            if rank > 0 {
                write!(f, "/")?;
            }
        }

        write!(f, " {} {} ", self.side_to_move.to_fen_char(), self.castling)?;
        match self.en_passant {
            Some(sq) => write!(f, "{}", sq)?,
            None => write!(f, "-")?,
        }
        write!(f, " {} {}", self.halfmove_clock, self.fullmove_number)
    }
}

impl Default for ParsedFen {
    fn default() -> Self {
        Self::parse(STARTPOS).expect("STARTPOS is valid")
    }
}
