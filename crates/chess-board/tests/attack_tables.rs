//! Attack table correctness against the ray-cast reference.

use chess_board::attacks::{bishop_attacks_slow, rook_attacks_slow};
use chess_board::{AttackTables, Bitboard};
use chess_core::{Color, ColoredPiece, File, Rank, Square};
use proptest::prelude::*;

#[test]
fn sliders_match_reference_for_every_mask_subset() {
    let tables = AttackTables::new();
    for sq in Square::all() {
        for blockers in tables.rook_mask(sq).subsets() {
            assert_eq!(
                tables.rook_attacks(sq, blockers),
                rook_attacks_slow(sq, blockers),
                "rook {}",
                sq
            );
        }
        for blockers in tables.bishop_mask(sq).subsets() {
            assert_eq!(
                tables.bishop_attacks(sq, blockers),
                bishop_attacks_slow(sq, blockers),
                "bishop {}",
                sq
            );
        }
    }
}

#[test]
fn knight_and_king_tables_are_symmetric() {
    let tables = AttackTables::get();
    for from in Square::all() {
        for to in tables.knight_attacks(from) {
            assert!(tables.knight_attacks(to).contains(from));
        }
        for to in tables.king_attacks(from) {
            assert!(tables.king_attacks(to).contains(from));
        }
    }
}

#[test]
fn pawn_attacks_mirror_between_colors() {
    let tables = AttackTables::get();
    for from in Square::all() {
        for to in tables.pawn_attacks(Color::White, from) {
            assert!(tables.pawn_attacks(Color::Black, to).contains(from));
        }
    }
}

#[test]
fn attacks_dispatch_by_piece() {
    let tables = AttackTables::get();
    let d4 = Square::new(File::D, Rank::R4);
    let occ = Bitboard::from_square(Square::new(File::D, Rank::R6));
    assert_eq!(
        tables.attacks(ColoredPiece::WhiteRook, d4, occ),
        rook_attacks_slow(d4, occ)
    );
    assert_eq!(
        tables.attacks(ColoredPiece::BlackQueen, d4, occ),
        rook_attacks_slow(d4, occ) | bishop_attacks_slow(d4, occ)
    );
    assert_eq!(
        tables.attacks(ColoredPiece::WhiteKing, d4, occ),
        tables.king_attacks(d4)
    );
}

proptest! {
    #[test]
    fn prop_sliders_match_reference_on_any_occupancy(index in 0u8..64, occ in any::<u64>()) {
        let tables = AttackTables::get();
        let sq = Square::from_index(index).unwrap();
        let occ = Bitboard::new(occ);
        prop_assert_eq!(tables.rook_attacks(sq, occ), rook_attacks_slow(sq, occ));
        prop_assert_eq!(tables.bishop_attacks(sq, occ), bishop_attacks_slow(sq, occ));
    }
}
