//! Set-wise pawn push geometry.
//!
//! Every function works on whole pawn sets at once. `empty` is the set of
//! unoccupied squares; captures and promotions are not considered here.

use crate::Bitboard;
use chess_core::Color;

#[inline]
fn forward(bb: Bitboard, color: Color) -> Bitboard {
    match color {
        Color::White => bb.north(),
        Color::Black => bb.south(),
    }
}

#[inline]
fn backward(bb: Bitboard, color: Color) -> Bitboard {
    match color {
        Color::White => bb.south(),
        Color::Black => bb.north(),
    }
}

/// Rank a double push lands on.
#[inline]
fn double_push_rank(color: Color) -> Bitboard {
    match color {
        Color::White => Bitboard::RANK_4,
        Color::Black => Bitboard::RANK_5,
    }
}

/// Squares reachable by pushing each pawn one rank forward onto an empty square.
#[inline]
pub fn single_push_targets(pawns: Bitboard, empty: Bitboard, color: Color) -> Bitboard {
    forward(pawns, color) & empty
}

/// Squares reachable by a two-rank push. Both squares must be empty and the
/// pawn lands on rank 4 (white) or rank 5 (black).
#[inline]
pub fn double_push_targets(pawns: Bitboard, empty: Bitboard, color: Color) -> Bitboard {
    let single = single_push_targets(pawns, empty, color);
    forward(single, color) & empty & double_push_rank(color)
}

/// Pawns that can push one rank.
#[inline]
pub fn single_push_sources(pawns: Bitboard, empty: Bitboard, color: Color) -> Bitboard {
    backward(empty, color) & pawns
}

/// Pawns that can push two ranks.
#[inline]
pub fn double_push_sources(pawns: Bitboard, empty: Bitboard, color: Color) -> Bitboard {
    let landing = empty & double_push_rank(color);
    let passable = backward(landing, color) & empty;
    single_push_sources(pawns, passable, color)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::{File, Rank, Square};

    fn bb(squares: &[&str]) -> Bitboard {
        squares
            .iter()
            .filter_map(|s| Square::from_algebraic(s))
            .collect()
    }

    #[test]
    fn start_rank_pushes() {
        let white = Bitboard::RANK_2;
        let empty = !(Bitboard::RANK_1 | Bitboard::RANK_2 | Bitboard::RANK_7 | Bitboard::RANK_8);

        assert_eq!(
            single_push_targets(white, empty, Color::White),
            Bitboard::rank_mask(Rank::R3)
        );
        assert_eq!(
            double_push_targets(white, empty, Color::White),
            Bitboard::RANK_4
        );
        assert_eq!(single_push_sources(white, empty, Color::White), white);
        assert_eq!(double_push_sources(white, empty, Color::White), white);

        let black = Bitboard::RANK_7;
        assert_eq!(
            single_push_targets(black, empty, Color::Black),
            Bitboard::rank_mask(Rank::R6)
        );
        assert_eq!(
            double_push_targets(black, empty, Color::Black),
            Bitboard::RANK_5
        );
        assert_eq!(double_push_sources(black, empty, Color::Black), black);
    }

    #[test]
    fn blocked_pawns() {
        let pawns = bb(&["e2", "d2", "c2"]);
        // e3 blocks e2 entirely, d4 blocks only the double push of d2
        let empty = !(pawns | bb(&["e3", "d4"]));

        let single = single_push_targets(pawns, empty, Color::White);
        assert_eq!(single, bb(&["d3", "c3"]));
        let double = double_push_targets(pawns, empty, Color::White);
        assert_eq!(double, bb(&["c4"]));

        assert_eq!(
            single_push_sources(pawns, empty, Color::White),
            bb(&["d2", "c2"])
        );
        assert_eq!(
            double_push_sources(pawns, empty, Color::White),
            bb(&["c2"])
        );
    }

    #[test]
    fn double_push_only_from_start_rank() {
        let pawn = Bitboard::from_square(Square::new(File::A, Rank::R3));
        let empty = !pawn;
        assert!(double_push_targets(pawn, empty, Color::White).is_empty());
        assert!(double_push_sources(pawn, empty, Color::White).is_empty());
        assert_eq!(
            single_push_targets(pawn, empty, Color::White),
            Bitboard::from_square(Square::new(File::A, Rank::R4))
        );
    }

    #[test]
    fn no_pushes_off_board() {
        assert!(single_push_targets(Bitboard::RANK_8, Bitboard::FULL, Color::White).is_empty());
        assert!(single_push_targets(Bitboard::RANK_1, Bitboard::FULL, Color::Black).is_empty());
    }
}
