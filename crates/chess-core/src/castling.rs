//! Castling rights.

use std::fmt;

/// Castling rights flags.
///
/// One bit per right: white kingside, white queenside, black kingside,
/// black queenside (bits 0-3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CastlingRights(u8);

impl CastlingRights {
    pub const NONE: CastlingRights = CastlingRights(0);
    pub const WHITE_KINGSIDE: u8 = 0b0001;
    pub const WHITE_QUEENSIDE: u8 = 0b0010;
    pub const BLACK_KINGSIDE: u8 = 0b0100;
    pub const BLACK_QUEENSIDE: u8 = 0b1000;
    pub const ALL: CastlingRights = CastlingRights(0b1111);

    /// FEN letters in serialization order, paired with their flag.
    const FEN_ORDER: [(char, u8); 4] = [
        ('K', Self::WHITE_KINGSIDE),
        ('Q', Self::WHITE_QUEENSIDE),
        ('k', Self::BLACK_KINGSIDE),
        ('q', Self::BLACK_QUEENSIDE),
    ];

    /// Creates new castling rights from flags.
    #[inline]
    pub const fn new(flags: u8) -> Self {
        CastlingRights(flags & 0b1111)
    }

    /// Returns the flag for a FEN castling letter.
    pub const fn flag_for_char(c: char) -> Option<u8> {
        match c {
            'K' => Some(Self::WHITE_KINGSIDE),
            'Q' => Some(Self::WHITE_QUEENSIDE),
            'k' => Some(Self::BLACK_KINGSIDE),
            'q' => Some(Self::BLACK_QUEENSIDE),
            _ => None,
        }
    }

    /// Returns true if every bit of `flag` is set.
    #[inline]
    pub const fn contains(self, flag: u8) -> bool {
        flag != 0 && (self.0 & flag) == flag
    }

    /// Grants the right(s) in `flag`.
    #[inline]
    pub fn insert(&mut self, flag: u8) {
        self.0 |= flag & 0b1111;
    }

    /// Returns true if no side may castle.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns the raw flags.
    #[inline]
    pub const fn raw(self) -> u8 {
        self.0
    }
}

impl fmt::Display for CastlingRights {
    /// Renders the FEN castling field: present rights in `KQkq` order, or `-`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "-");
        }
        for (c, flag) in Self::FEN_ORDER {
            if self.contains(flag) {
                write!(f, "{}", c)?;
            }
        }
        Ok(())
    }
}
