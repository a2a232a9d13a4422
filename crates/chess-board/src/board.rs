//! Board state: piece bitboards plus a square-indexed mailbox.

use chess_core::{CastlingRights, Color, ColoredPiece, Piece, Square, STARTPOS};
use std::fmt;

use crate::attacks::AttackTables;
use crate::pawns;
use crate::{Bitboard, BoardError};

/// Complete board state.
///
/// Piece placement is stored twice: one bitboard per colored piece kind
/// (plus one aggregate per color) and a 64-entry mailbox. Placement is only
/// changed through [`Board::put_piece`] and [`Board::remove_piece`], which
/// keep both views and the `occupied`/`empty` caches in sync.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// Bitboards indexed by [`ColoredPiece::index`].
    pieces: [Bitboard; 12],
    /// Aggregate occupancy per color.
    colors: [Bitboard; 2],
    occupied: Bitboard,
    empty: Bitboard,
    mailbox: [Option<ColoredPiece>; 64],

    /// The side to move.
    pub side_to_move: Color,

    /// Castling rights.
    pub castling: CastlingRights,

    /// En passant target square (if any).
    pub en_passant: Option<Square>,

    /// Halfmove clock for 50-move rule.
    pub halfmove_clock: u64,

    /// Fullmove number (starts at 1, increments after Black's move).
    pub fullmove_number: u64,
}

impl Board {
    /// Creates an empty board: no pieces, white to move, no castling rights.
    pub fn new() -> Self {
        Board {
            pieces: [Bitboard::EMPTY; 12],
            colors: [Bitboard::EMPTY; 2],
            occupied: Bitboard::EMPTY,
            empty: Bitboard::FULL,
            mailbox: [None; 64],
            side_to_move: Color::White,
            castling: CastlingRights::NONE,
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }

    /// Creates the standard starting position.
    pub fn startpos() -> Self {
        Self::from_fen(STARTPOS).expect("STARTPOS is valid")
    }

    /// Places `piece` on `sq`, replacing whatever stood there.
    pub fn put_piece(&mut self, sq: Square, piece: ColoredPiece) {
        self.place_piece(sq, piece);
        self.refresh_empty();
    }

    /// Places `piece` using raw file and rank indices (0-7 each).
    pub fn put_piece_at(
        &mut self,
        file: u8,
        rank: u8,
        piece: ColoredPiece,
    ) -> Result<(), BoardError> {
        let sq = Square::from_coords(file, rank)
            .ok_or(BoardError::SquareOutOfRange { file, rank })?;
        self.put_piece(sq, piece);
        Ok(())
    }

    /// Removes and returns the piece on `sq`, if any.
    pub fn remove_piece(&mut self, sq: Square) -> Option<ColoredPiece> {
        let removed = self.take_piece(sq);
        self.refresh_empty();
        removed
    }

    /// Places a piece without refreshing the `empty` cache.
    ///
    /// Callers batching placements must call [`Board::refresh_empty`] once
    /// they are done.
    pub(crate) fn place_piece(&mut self, sq: Square, piece: ColoredPiece) {
        self.take_piece(sq);
        self.toggle_piece(sq, piece);
        self.mailbox[sq.index() as usize] = Some(piece);
    }

    fn take_piece(&mut self, sq: Square) -> Option<ColoredPiece> {
        let piece = self.mailbox[sq.index() as usize].take()?;
        self.toggle_piece(sq, piece);
        Some(piece)
    }

    /// Flips `sq` in the kind, color and occupancy sets of `piece`.
    ///
    /// Only sound when the mailbox says `sq` is empty (adding) or holds
    /// exactly `piece` (removing).
    #[inline]
    fn toggle_piece(&mut self, sq: Square, piece: ColoredPiece) {
        self.pieces[piece.index()].toggle(sq);
        self.colors[piece.color().index()].toggle(sq);
        self.occupied.toggle(sq);
    }

    /// Recomputes the `empty` cache from `occupied`.
    #[inline]
    pub(crate) fn refresh_empty(&mut self) {
        self.empty = !self.occupied;
    }

    /// Returns the piece on the given square, if any.
    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<ColoredPiece> {
        self.mailbox[sq.index() as usize]
    }

    /// Returns the bitboard of one colored piece kind.
    #[inline]
    pub fn pieces(&self, piece: ColoredPiece) -> Bitboard {
        self.pieces[piece.index()]
    }

    /// Returns a bitboard of pieces of the given type and color.
    #[inline]
    pub fn pieces_of(&self, piece: Piece, color: Color) -> Bitboard {
        self.pieces(ColoredPiece::new(piece, color))
    }

    /// Returns every square holding a piece of `color`.
    #[inline]
    pub fn color_occupancy(&self, color: Color) -> Bitboard {
        self.colors[color.index()]
    }

    /// Returns a bitboard of all occupied squares.
    #[inline]
    pub fn occupied(&self) -> Bitboard {
        self.occupied
    }

    /// Returns a bitboard of all empty squares.
    #[inline]
    pub fn empty(&self) -> Bitboard {
        self.empty
    }

    /// Returns the square of the lowest-indexed king of `color`.
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces_of(Piece::King, color)
            .lsb()
            .and_then(Square::from_index)
    }

    /// Attack set of whatever stands on `sq`, blocked by the current occupancy.
    ///
    /// Empty squares attack nothing.
    pub fn attacks_from(&self, tables: &AttackTables, sq: Square) -> Bitboard {
        match self.piece_at(sq) {
            Some(piece) => tables.attacks(piece, sq, self.occupied),
            None => Bitboard::EMPTY,
        }
    }

    /// Single-push destinations for the pawns of `color`.
    pub fn pawn_push_targets(&self, color: Color) -> Bitboard {
        pawns::single_push_targets(self.pieces_of(Piece::Pawn, color), self.empty, color)
    }

    /// Double-push destinations for the pawns of `color`.
    pub fn pawn_double_push_targets(&self, color: Color) -> Bitboard {
        pawns::double_push_targets(self.pieces_of(Piece::Pawn, color), self.empty, color)
    }

    /// Checks that the bitboards, aggregates, caches and mailbox agree.
    pub fn is_consistent(&self) -> bool {
        let white = self.colors[Color::White.index()];
        let black = self.colors[Color::Black.index()];
        if self.occupied != !self.empty || self.occupied != (white | black) {
            return false;
        }
        if (white & black).is_not_empty() {
            return false;
        }

        for color in Color::ALL {
            let union = Piece::ALL
                .iter()
                .fold(Bitboard::EMPTY, |acc, &p| acc | self.pieces_of(p, color));
            if union != self.colors[color.index()] {
                return false;
            }
        }

        Square::all().all(|sq| {
            let mut holders = ColoredPiece::ALL
                .iter()
                .filter(|&&p| self.pieces[p.index()].contains(sq));
            let first = holders.next().copied();
            holders.next().is_none() && first == self.mailbox[sq.index() as usize]
        })
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    /// Renders an 8x8 diagram, rank 8 at the top, `.` for empty squares.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8u8).rev() {
            write!(f, "{} ", rank + 1)?;
            for file in 0..8u8 {
                let symbol = Square::from_coords(file, rank)
                    .and_then(|sq| self.piece_at(sq))
                    .map_or('.', ColoredPiece::to_fen_char);
                if file < 7 {
                    write!(f, "{} ", symbol)?;
                } else {
                    writeln!(f, "{}", symbol)?;
                }
            }
        }
        write!(f, "  a b c d e f g h")
    }
}
