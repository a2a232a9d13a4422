//! Bitboard board representation and move geometry.
//!
//! This crate provides:
//! - [`Bitboard`] - 64-bit square sets with bitwise operations and shifts
//! - [`Board`] - piece placement (bitboards plus mailbox) and game state
//! - FEN import/export on [`Board`]
//! - [`AttackTables`] - knight/king/pawn tables and magic-bitboard sliders
//! - [`pawns`] - set-wise pawn push geometry
//!
//! Legality (checks, pins) and search are outside this crate; everything
//! here is pseudo-legal geometry.
//!
//! # Example
//!
//! ```
//! use chess_board::{AttackTables, Board};
//! use chess_core::Square;
//!
//! let tables = AttackTables::get();
//! let board = Board::startpos();
//! let knight = board.attacks_from(tables, Square::G1);
//! assert_eq!(knight.count(), 3);
//! assert_eq!(board.to_fen(), chess_core::STARTPOS);
//! ```

pub mod attacks;
mod bitboard;
mod board;
mod error;
mod fen;
pub mod pawns;

pub use attacks::AttackTables;
pub use bitboard::{Bitboard, Subsets};
pub use board::Board;
pub use error::BoardError;
