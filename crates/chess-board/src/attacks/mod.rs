//! Attack table generation and lookup for all piece types.
//!
//! [`AttackTables::new`] is the only factory. Binaries build one eagerly at
//! start-up; library callers can use [`AttackTables::get`], which builds the
//! process-wide instance on first use.

mod leapers;
mod magics;

use crate::Bitboard;
use chess_core::{Color, ColoredPiece, Piece, Square};
use std::sync::OnceLock;
use std::time::Instant;

use leapers::{KING_ATTACKS, KNIGHT_ATTACKS, PAWN_ATTACKS};
use magics::{Slider, SliderTable};

pub use magics::{
    bishop_attacks_slow, bishop_mask, rook_attacks_slow, rook_mask, Magic, BISHOP_TABLE_SIZE,
    ROOK_TABLE_SIZE,
};

static ATTACK_TABLES: OnceLock<AttackTables> = OnceLock::new();

/// Precomputed attack sets for every piece kind.
///
/// Immutable once built, so a single instance can be shared by reference
/// across threads.
pub struct AttackTables {
    knight: [Bitboard; 64],
    king: [Bitboard; 64],
    pawn: [[Bitboard; 64]; 2],
    rook: SliderTable,
    bishop: SliderTable,
}

impl AttackTables {
    /// Builds all leaper and magic slider tables.
    pub fn new() -> Self {
        let start = Instant::now();
        let tables = AttackTables {
            knight: KNIGHT_ATTACKS,
            king: KING_ATTACKS,
            pawn: PAWN_ATTACKS,
            rook: SliderTable::new(Slider::Rook),
            bishop: SliderTable::new(Slider::Bishop),
        };
        tracing::debug!(
            rook_entries = tables.rook.len(),
            bishop_entries = tables.bishop.len(),
            elapsed_us = start.elapsed().as_micros() as u64,
            "attack tables built"
        );
        tables
    }

    /// Returns the process-wide tables, building them on first call.
    pub fn get() -> &'static AttackTables {
        ATTACK_TABLES.get_or_init(AttackTables::new)
    }

    /// Returns knight attacks from the given square.
    #[inline]
    pub fn knight_attacks(&self, sq: Square) -> Bitboard {
        self.knight[sq.index() as usize]
    }

    /// Returns king attacks from the given square.
    #[inline]
    pub fn king_attacks(&self, sq: Square) -> Bitboard {
        self.king[sq.index() as usize]
    }

    /// Returns the squares a pawn of `color` on `sq` captures on.
    #[inline]
    pub fn pawn_attacks(&self, color: Color, sq: Square) -> Bitboard {
        self.pawn[color.index()][sq.index() as usize]
    }

    /// Returns rook attacks for a square given occupied squares.
    #[inline]
    pub fn rook_attacks(&self, sq: Square, occupied: Bitboard) -> Bitboard {
        self.rook.attacks(sq, occupied)
    }

    /// Returns bishop attacks for a square given occupied squares.
    #[inline]
    pub fn bishop_attacks(&self, sq: Square, occupied: Bitboard) -> Bitboard {
        self.bishop.attacks(sq, occupied)
    }

    /// Returns queen attacks (bishop + rook).
    #[inline]
    pub fn queen_attacks(&self, sq: Square, occupied: Bitboard) -> Bitboard {
        self.rook_attacks(sq, occupied) | self.bishop_attacks(sq, occupied)
    }

    #[inline]
    pub fn rook_mask(&self, sq: Square) -> Bitboard {
        self.rook.magic(sq).mask
    }

    #[inline]
    pub fn bishop_mask(&self, sq: Square) -> Bitboard {
        self.bishop.magic(sq).mask
    }

    /// Magic entry used for rook lookups on `sq`.
    pub fn rook_magic(&self, sq: Square) -> &Magic {
        self.rook.magic(sq)
    }

    /// Magic entry used for bishop lookups on `sq`.
    pub fn bishop_magic(&self, sq: Square) -> &Magic {
        self.bishop.magic(sq)
    }

    /// Attack set of `piece` standing on `sq`. Pawns yield capture squares.
    pub fn attacks(&self, piece: ColoredPiece, sq: Square, occupied: Bitboard) -> Bitboard {
        let kind = piece.piece();
        let set = if kind.is_slider() {
            self.slider_attacks(kind, sq, occupied)
        } else {
            self.leaper_attacks(kind, piece.color(), sq)
        };
        set.unwrap_or(Bitboard::EMPTY)
    }

    /// Attack set for a leaper, or `None` if `piece` is a slider.
    ///
    /// `color` only matters for pawns.
    pub fn leaper_attacks(&self, piece: Piece, color: Color, sq: Square) -> Option<Bitboard> {
        match piece {
            Piece::Pawn => Some(self.pawn_attacks(color, sq)),
            Piece::Knight => Some(self.knight_attacks(sq)),
            Piece::King => Some(self.king_attacks(sq)),
            Piece::Bishop | Piece::Rook | Piece::Queen => None,
        }
    }

    /// Attack set for a slider, or `None` if `piece` is a leaper.
    pub fn slider_attacks(&self, piece: Piece, sq: Square, occupied: Bitboard) -> Option<Bitboard> {
        match piece {
            Piece::Bishop => Some(self.bishop_attacks(sq, occupied)),
            Piece::Rook => Some(self.rook_attacks(sq, occupied)),
            Piece::Queen => Some(self.queen_attacks(sq, occupied)),
            Piece::Pawn | Piece::Knight | Piece::King => None,
        }
    }
}

impl Default for AttackTables {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::{File, Rank};

    fn tables() -> &'static AttackTables {
        AttackTables::get()
    }

    #[test]
    fn get_returns_same_instance() {
        assert!(std::ptr::eq(AttackTables::get(), AttackTables::get()));
    }

    #[test]
    fn empty_board_counts() {
        let d4 = Square::new(File::D, Rank::R4);
        let t = tables();
        assert_eq!(t.knight_attacks(d4).count(), 8);
        assert_eq!(t.king_attacks(d4).count(), 8);
        assert_eq!(t.rook_attacks(d4, Bitboard::EMPTY).count(), 14);
        assert_eq!(t.bishop_attacks(d4, Bitboard::EMPTY).count(), 13);
        assert_eq!(t.queen_attacks(d4, Bitboard::EMPTY).count(), 27);
        assert_eq!(t.bishop_attacks(Square::A1, Bitboard::EMPTY).count(), 7);
        assert_eq!(t.rook_attacks(Square::A1, Bitboard::EMPTY).count(), 14);
    }

    #[test]
    fn leapers_are_symmetric() {
        let t = tables();
        for s in Square::all() {
            for target in Square::all() {
                assert_eq!(
                    t.knight_attacks(s).contains(target),
                    t.knight_attacks(target).contains(s)
                );
                assert_eq!(
                    t.king_attacks(s).contains(target),
                    t.king_attacks(target).contains(s)
                );
            }
        }
    }

    #[test]
    fn pawn_attacks_by_color() {
        let t = tables();
        let e4 = Square::new(File::E, Rank::R4);
        let white = t.pawn_attacks(Color::White, e4);
        assert!(white.contains(Square::new(File::D, Rank::R5)));
        assert!(white.contains(Square::new(File::F, Rank::R5)));
        assert_eq!(white.count(), 2);
        let black = t.pawn_attacks(Color::Black, e4);
        assert!(black.contains(Square::new(File::D, Rank::R3)));
        assert!(black.contains(Square::new(File::F, Rank::R3)));
        assert_eq!(t.pawn_attacks(Color::White, Square::A8), Bitboard::EMPTY);
    }

    #[test]
    fn family_lookups() {
        let t = tables();
        let d4 = Square::new(File::D, Rank::R4);
        assert_eq!(t.leaper_attacks(Piece::Rook, Color::White, d4), None);
        assert_eq!(t.slider_attacks(Piece::Knight, d4, Bitboard::EMPTY), None);
        assert_eq!(
            t.leaper_attacks(Piece::Knight, Color::Black, d4),
            Some(t.knight_attacks(d4))
        );
        assert_eq!(
            t.slider_attacks(Piece::Queen, d4, Bitboard::EMPTY),
            Some(t.queen_attacks(d4, Bitboard::EMPTY))
        );
        assert_eq!(
            t.attacks(ColoredPiece::BlackPawn, d4, Bitboard::EMPTY),
            t.pawn_attacks(Color::Black, d4)
        );
    }

    #[test]
    fn exactly_one_family_answers() {
        let t = tables();
        let e5 = Square::new(File::E, Rank::R5);
        let occupied = Bitboard::from_square(Square::new(File::E, Rank::R7));
        for index in 0..12 {
            let piece = ColoredPiece::from_index(index).unwrap();
            let kind = piece.piece();
            let slider = t.slider_attacks(kind, e5, occupied);
            let leaper = t.leaper_attacks(kind, piece.color(), e5);
            assert_eq!(slider.is_some(), kind.is_slider(), "{:?}", kind);
            assert_eq!(leaper.is_some(), !kind.is_slider(), "{:?}", kind);
            assert_eq!(
                t.attacks(piece, e5, occupied),
                slider.or(leaper).unwrap(),
                "{:?}",
                piece
            );
        }
    }

    #[test]
    fn masks_match_magics() {
        let t = tables();
        for sq in Square::all() {
            assert_eq!(t.rook_mask(sq), rook_mask(sq));
            assert_eq!(t.bishop_mask(sq), bishop_mask(sq));
            assert_eq!(t.rook_magic(sq).mask, rook_mask(sq));
        }
    }
}
