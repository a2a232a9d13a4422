//! Board square representation.
//!
//! Squares use the little-endian rank-file (LERF) layout:
//! `index = rank * 8 + file`, `file = index & 7`, `rank = index >> 3`.

use std::fmt;

/// Returns the LERF index of the square on `file` and `rank` (both 0-7).
#[inline]
pub const fn square_index(file: u8, rank: u8) -> u8 {
    (rank << 3) + file
}

/// Returns the file (0-7) of a square index.
#[inline]
pub const fn file_of(index: u8) -> u8 {
    index & 7
}

/// Returns the rank (0-7) of a square index.
#[inline]
pub const fn rank_of(index: u8) -> u8 {
    index >> 3
}

/// A file (column) on the chess board, from A to H.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum File {
    A = 0,
    B = 1,
    C = 2,
    D = 3,
    E = 4,
    F = 5,
    G = 6,
    H = 7,
}

impl File {
    /// All files in order.
    pub const ALL: [File; 8] = [
        File::A,
        File::B,
        File::C,
        File::D,
        File::E,
        File::F,
        File::G,
        File::H,
    ];

    /// Creates a file from index (0-7).
    #[inline]
    pub const fn from_index(index: u8) -> Option<Self> {
        if index < 8 {
            Some(Self::ALL[index as usize])
        } else {
            None
        }
    }

    /// Creates a file from a character ('a'-'h').
    #[inline]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'a'..='h' => Self::from_index(c as u8 - b'a'),
            _ => None,
        }
    }

    /// Returns the index (0-7).
    #[inline]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Returns the character representation.
    #[inline]
    pub const fn to_char(self) -> char {
        (b'a' + self as u8) as char
    }
}

impl fmt::Display for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// A rank (row) on the chess board, from 1 to 8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Rank {
    R1 = 0,
    R2 = 1,
    R3 = 2,
    R4 = 3,
    R5 = 4,
    R6 = 5,
    R7 = 6,
    R8 = 7,
}

impl Rank {
    /// All ranks in order.
    pub const ALL: [Rank; 8] = [
        Rank::R1,
        Rank::R2,
        Rank::R3,
        Rank::R4,
        Rank::R5,
        Rank::R6,
        Rank::R7,
        Rank::R8,
    ];

    /// Creates a rank from index (0-7).
    #[inline]
    pub const fn from_index(index: u8) -> Option<Self> {
        if index < 8 {
            Some(Self::ALL[index as usize])
        } else {
            None
        }
    }

    /// Creates a rank from a character ('1'-'8').
    #[inline]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            '1'..='8' => Self::from_index(c as u8 - b'1'),
            _ => None,
        }
    }

    /// Returns the index (0-7).
    #[inline]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Returns the character representation.
    #[inline]
    pub const fn to_char(self) -> char {
        (b'1' + self as u8) as char
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// A square on the chess board, indexed 0-63.
///
/// Squares are indexed in little-endian rank-file mapping:
/// - a1 = 0, b1 = 1, ..., h1 = 7
/// - a2 = 8, ..., h8 = 63
///
/// An absent square (e.g. no en passant target) is `Option<Square>::None`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square(u8);

impl Square {
    /// Creates a square from file and rank.
    #[inline]
    pub const fn new(file: File, rank: Rank) -> Self {
        Square(square_index(file.index(), rank.index()))
    }

    /// Creates a square from index (0-63).
    #[inline]
    pub const fn from_index(index: u8) -> Option<Self> {
        if index < 64 {
            Some(Square(index))
        } else {
            None
        }
    }

    /// Creates a square from raw file and rank indices (0-7 each).
    #[inline]
    pub const fn from_coords(file: u8, rank: u8) -> Option<Self> {
        if file < 8 && rank < 8 {
            Some(Square(square_index(file, rank)))
        } else {
            None
        }
    }

    /// Creates a square from index without bounds checking.
    ///
    /// # Safety
    /// The index must be in the range 0-63.
    #[inline]
    pub const unsafe fn from_index_unchecked(index: u8) -> Self {
        debug_assert!(index < 64);
        Square(index)
    }

    /// Parses a square from algebraic notation (e.g., "e4").
    pub const fn from_algebraic(s: &str) -> Option<Self> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return None;
        }
        let file = match File::from_char(bytes[0] as char) {
            Some(f) => f,
            None => return None,
        };
        let rank = match Rank::from_char(bytes[1] as char) {
            Some(r) => r,
            None => return None,
        };
        Some(Square::new(file, rank))
    }

    /// Iterates over all 64 squares from a1 to h8.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..64).map(Square)
    }

    /// Returns the index (0-63).
    #[inline]
    pub const fn index(self) -> u8 {
        self.0
    }

    /// Returns the file of this square.
    #[inline]
    pub const fn file(self) -> File {
        File::ALL[file_of(self.0) as usize]
    }

    /// Returns the rank of this square.
    #[inline]
    pub const fn rank(self) -> Rank {
        Rank::ALL[rank_of(self.0) as usize]
    }

    /// Returns the algebraic notation for this square.
    pub fn to_algebraic(self) -> String {
        format!("{}{}", self.file(), self.rank())
    }

    /// Returns a bitboard with only this square set.
    #[inline]
    pub const fn bitboard(self) -> u64 {
        1u64 << self.0
    }

    // Common squares
    pub const A1: Square = Square(0);
    pub const B1: Square = Square(1);
    pub const C1: Square = Square(2);
    pub const D1: Square = Square(3);
    pub const E1: Square = Square(4);
    pub const F1: Square = Square(5);
    pub const G1: Square = Square(6);
    pub const H1: Square = Square(7);
    pub const A8: Square = Square(56);
    pub const B8: Square = Square(57);
    pub const C8: Square = Square(58);
    pub const D8: Square = Square(59);
    pub const E8: Square = Square(60);
    pub const F8: Square = Square(61);
    pub const G8: Square = Square(62);
    pub const H8: Square = Square(63);
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Square({})", self.to_algebraic())
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file(), self.rank())
    }
}
