//! Attack patterns for pieces whose reach does not depend on blockers.

use crate::Bitboard;

/// Knight attack sets for every square.
pub(crate) const KNIGHT_ATTACKS: [Bitboard; 64] = compute_knight_attacks();

/// King attack sets for every square.
pub(crate) const KING_ATTACKS: [Bitboard; 64] = compute_king_attacks();

/// Pawn capture sets, indexed `[color][square]`.
pub(crate) const PAWN_ATTACKS: [[Bitboard; 64]; 2] = compute_pawn_attacks();

/// Sets the bit for (`rank` + `dr`, `file` + `df`) if it lies on the board.
const fn offset_bit(rank: i8, file: i8, dr: i8, df: i8) -> u64 {
    let r = rank + dr;
    let f = file + df;
    if r >= 0 && r < 8 && f >= 0 && f < 8 {
        1u64 << (r * 8 + f)
    } else {
        0
    }
}

const fn compute_knight_attacks() -> [Bitboard; 64] {
    const OFFSETS: [(i8, i8); 8] = [
        (2, 1),
        (2, -1),
        (-2, 1),
        (-2, -1),
        (1, 2),
        (1, -2),
        (-1, 2),
        (-1, -2),
    ];

    let mut attacks = [Bitboard::EMPTY; 64];
    let mut sq = 0;
    while sq < 64 {
        let rank = (sq / 8) as i8;
        let file = (sq % 8) as i8;
        let mut bb = 0u64;
        let mut i = 0;
        while i < OFFSETS.len() {
            bb |= offset_bit(rank, file, OFFSETS[i].0, OFFSETS[i].1);
            i += 1;
        }
        attacks[sq] = Bitboard(bb);
        sq += 1;
    }
    attacks
}

const fn compute_king_attacks() -> [Bitboard; 64] {
    let mut attacks = [Bitboard::EMPTY; 64];
    let mut sq = 0;
    while sq < 64 {
        let rank = (sq / 8) as i8;
        let file = (sq % 8) as i8;
        let mut bb = 0u64;
        let mut dr = -1;
        while dr <= 1 {
            let mut df = -1;
            while df <= 1 {
                if dr != 0 || df != 0 {
                    bb |= offset_bit(rank, file, dr, df);
                }
                df += 1;
            }
            dr += 1;
        }
        attacks[sq] = Bitboard(bb);
        sq += 1;
    }
    attacks
}

const fn compute_pawn_attacks() -> [[Bitboard; 64]; 2] {
    let mut attacks = [[Bitboard::EMPTY; 64]; 2];
    let mut sq = 0;
    while sq < 64 {
        let rank = (sq / 8) as i8;
        let file = (sq % 8) as i8;

        // White captures toward rank 8, black toward rank 1
        attacks[0][sq] = Bitboard(offset_bit(rank, file, 1, -1) | offset_bit(rank, file, 1, 1));
        attacks[1][sq] =
            Bitboard(offset_bit(rank, file, -1, -1) | offset_bit(rank, file, -1, 1));
        sq += 1;
    }
    attacks
}
