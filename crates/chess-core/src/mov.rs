//! Move representation.

use crate::{Piece, Square};
use std::fmt;

/// The 4-bit flag nibble of a packed move.
///
/// Bit 3 marks a promotion and bit 2 a capture, so the nibble can be tested
/// directly: `PromoteKnight = 0b1000`, `PromoteKnightCapture = 0b1100`.
/// Nibbles 6 and 7 are unused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MoveFlag {
    /// Non-capturing move.
    Quiet = 0,
    /// Pawn double push from starting rank.
    DoublePush = 1,
    /// Kingside castling (O-O).
    KingCastle = 2,
    /// Queenside castling (O-O-O).
    QueenCastle = 3,
    /// Ordinary capture.
    Capture = 4,
    /// En passant capture.
    EnPassant = 5,
    PromoteKnight = 8,
    PromoteBishop = 9,
    PromoteRook = 10,
    PromoteQueen = 11,
    PromoteKnightCapture = 12,
    PromoteBishopCapture = 13,
    PromoteRookCapture = 14,
    PromoteQueenCapture = 15,
}

impl MoveFlag {
    /// Promotion bit of the nibble.
    pub const PROMOTION_BIT: u8 = 0b1000;
    /// Capture bit of the nibble.
    pub const CAPTURE_BIT: u8 = 0b0100;

    /// Decodes a flag nibble. Returns `None` for the unused values and
    /// anything above 15.
    pub const fn from_bits(bits: u8) -> Option<Self> {
        let flag = match bits {
            0 => MoveFlag::Quiet,
            1 => MoveFlag::DoublePush,
            2 => MoveFlag::KingCastle,
            3 => MoveFlag::QueenCastle,
            4 => MoveFlag::Capture,
            5 => MoveFlag::EnPassant,
            8 => MoveFlag::PromoteKnight,
            9 => MoveFlag::PromoteBishop,
            10 => MoveFlag::PromoteRook,
            11 => MoveFlag::PromoteQueen,
            12 => MoveFlag::PromoteKnightCapture,
            13 => MoveFlag::PromoteBishopCapture,
            14 => MoveFlag::PromoteRookCapture,
            15 => MoveFlag::PromoteQueenCapture,
            _ => return None,
        };
        Some(flag)
    }

    /// Returns the nibble value.
    #[inline]
    pub const fn bits(self) -> u8 {
        self as u8
    }

    /// Builds the promotion flag for `piece`, with or without capture.
    /// Returns `None` for pieces a pawn cannot promote to.
    pub const fn promotion(piece: Piece, capture: bool) -> Option<Self> {
        let base = match piece {
            Piece::Knight => 0,
            Piece::Bishop => 1,
            Piece::Rook => 2,
            Piece::Queen => 3,
            _ => return None,
        };
        let capture_bit = if capture { Self::CAPTURE_BIT } else { 0 };
        Self::from_bits(Self::PROMOTION_BIT | capture_bit | base)
    }

    /// Returns true for captures, en passant and capturing promotions.
    #[inline]
    pub const fn is_capture(self) -> bool {
        self.bits() & Self::CAPTURE_BIT != 0
    }

    /// Returns true if this is a promotion move.
    #[inline]
    pub const fn is_promotion(self) -> bool {
        self.bits() & Self::PROMOTION_BIT != 0
    }

    /// Returns true if this is a castling move.
    #[inline]
    pub const fn is_castling(self) -> bool {
        matches!(self, MoveFlag::KingCastle | MoveFlag::QueenCastle)
    }

    /// Returns the promotion piece if this is a promotion move.
    #[inline]
    pub const fn promotion_piece(self) -> Option<Piece> {
        if !self.is_promotion() {
            return None;
        }
        match self.bits() & 0b11 {
            0 => Some(Piece::Knight),
            1 => Some(Piece::Bishop),
            2 => Some(Piece::Rook),
            _ => Some(Piece::Queen),
        }
    }
}

/// A chess move packed into 16 bits.
///
/// Bits 0-5 hold the destination square, bits 6-11 the source square and
/// bits 12-15 the [`MoveFlag`] nibble.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move(u16);

impl Move {
    const SQUARE_MASK: u16 = 0x3F;
    const FLAG_MASK: u16 = 0xF;

    /// A null move (used as placeholder, not a legal move).
    pub const NULL: Move = Move(0);

    /// Creates a new move.
    #[inline]
    pub const fn new(from: Square, to: Square, flag: MoveFlag) -> Self {
        Self::from_parts(from.index(), to.index(), flag.bits())
    }

    /// Packs raw parts without validation.
    ///
    /// Squares are masked to 6 bits and the flag to 4 bits, so out-of-range
    /// input wraps silently instead of being rejected.
    #[inline]
    pub const fn from_parts(from: u8, to: u8, flags: u8) -> Self {
        let encoded = ((flags as u16 & Self::FLAG_MASK) << 12)
            | ((from as u16 & Self::SQUARE_MASK) << 6)
            | (to as u16 & Self::SQUARE_MASK);
        Move(encoded)
    }

    /// Creates a quiet move (no special flags).
    #[inline]
    pub const fn quiet(from: Square, to: Square) -> Self {
        Self::new(from, to, MoveFlag::Quiet)
    }

    /// Returns the destination square.
    #[inline]
    pub const fn to(self) -> Square {
        // SAFETY: masked to 6 bits, always valid square index
        unsafe { Square::from_index_unchecked((self.0 & Self::SQUARE_MASK) as u8) }
    }

    /// Returns the source square.
    #[inline]
    pub const fn from(self) -> Square {
        // SAFETY: masked to 6 bits, always valid square index
        unsafe { Square::from_index_unchecked(((self.0 >> 6) & Self::SQUARE_MASK) as u8) }
    }

    /// Returns the raw flag nibble (0-15).
    #[inline]
    pub const fn flags(self) -> u8 {
        (self.0 >> 12) as u8
    }

    /// Returns the decoded flag, or `None` for an unused nibble.
    #[inline]
    pub const fn flag(self) -> Option<MoveFlag> {
        MoveFlag::from_bits(self.flags())
    }

    /// Returns the packed 16-bit value.
    #[inline]
    pub const fn raw(self) -> u16 {
        self.0
    }

    /// Returns the UCI notation for this move (e.g., "e2e4", "e7e8q").
    pub fn to_uci(self) -> String {
        let promo = match self.flag().and_then(MoveFlag::promotion_piece) {
            Some(Piece::Knight) => "n",
            Some(Piece::Bishop) => "b",
            Some(Piece::Rook) => "r",
            Some(Piece::Queen) => "q",
            _ => "",
        };
        format!("{}{}{}", self.from(), self.to(), promo)
    }

    /// Parses a move from UCI notation.
    ///
    /// Without a board the capture, castle and double-push flags cannot be
    /// inferred, so the result is either quiet or a non-capturing promotion.
    pub fn from_uci(s: &str) -> Option<Self> {
        if s.len() < 4 || s.len() > 5 || !s.is_ascii() {
            return None;
        }
        let from = Square::from_algebraic(&s[0..2])?;
        let to = Square::from_algebraic(&s[2..4])?;
        let flag = match s.as_bytes().get(4) {
            None => MoveFlag::Quiet,
            Some(b'n' | b'N') => MoveFlag::PromoteKnight,
            Some(b'b' | b'B') => MoveFlag::PromoteBishop,
            Some(b'r' | b'R') => MoveFlag::PromoteRook,
            Some(b'q' | b'Q') => MoveFlag::PromoteQueen,
            Some(_) => return None,
        };
        Some(Move::new(from, to, flag))
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({}, flags={:#06b})", self.to_uci(), self.flags())
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_uci())
    }
}
