//! Core types for chess.
//!
//! This crate provides the fundamental value types shared by the board and
//! the protocol shell:
//! - [`Piece`], [`Color`] and [`ColoredPiece`] for piece representation
//! - [`Square`], [`File`], and [`Rank`] for board coordinates (LERF layout)
//! - [`CastlingRights`] for the four castling flags
//! - [`Move`] for the packed 16-bit move encoding
//! - FEN field parsing ([`ParsedFen`]) and its errors ([`FenError`])

mod castling;
mod color;
mod fen;
mod mov;
mod piece;
mod square;

pub use castling::CastlingRights;
pub use color::Color;
pub use fen::{FenError, ParsedFen, STARTPOS};
pub use mov::{Move, MoveFlag};
pub use piece::{ColoredPiece, Piece};
pub use square::{file_of, rank_of, square_index, File, Rank, Square};
