//! Chess piece representation.

use crate::Color;

/// The six types of chess pieces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Piece {
    Pawn = 0,
    Knight = 1,
    Bishop = 2,
    Rook = 3,
    Queen = 4,
    King = 5,
}

impl Piece {
    /// All piece types in order.
    pub const ALL: [Piece; 6] = [
        Piece::Pawn,
        Piece::Knight,
        Piece::Bishop,
        Piece::Rook,
        Piece::Queen,
        Piece::King,
    ];

    /// Returns the index of this piece type (0-5).
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns the FEN character for this piece with the given color.
    pub const fn to_fen_char(self, color: Color) -> char {
        let c = match self {
            Piece::Pawn => 'p',
            Piece::Knight => 'n',
            Piece::Bishop => 'b',
            Piece::Rook => 'r',
            Piece::Queen => 'q',
            Piece::King => 'k',
        };
        match color {
            Color::White => c.to_ascii_uppercase(),
            Color::Black => c,
        }
    }

    /// Returns true if this piece is a sliding piece (bishop, rook, or queen).
    #[inline]
    pub const fn is_slider(self) -> bool {
        matches!(self, Piece::Bishop | Piece::Rook | Piece::Queen)
    }
}

impl std::fmt::Display for Piece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Piece::Pawn => "Pawn",
            Piece::Knight => "Knight",
            Piece::Bishop => "Bishop",
            Piece::Rook => "Rook",
            Piece::Queen => "Queen",
            Piece::King => "King",
        };
        write!(f, "{}", name)
    }
}

/// One of the twelve colored piece kinds.
///
/// White kinds occupy 0-5 and black kinds 6-11, in [`Piece`] order, so the
/// discriminant doubles as the index of the piece's bitboard on a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ColoredPiece {
    WhitePawn = 0,
    WhiteKnight = 1,
    WhiteBishop = 2,
    WhiteRook = 3,
    WhiteQueen = 4,
    WhiteKing = 5,
    BlackPawn = 6,
    BlackKnight = 7,
    BlackBishop = 8,
    BlackRook = 9,
    BlackQueen = 10,
    BlackKing = 11,
}

impl ColoredPiece {
    /// All twelve kinds, white first.
    pub const ALL: [ColoredPiece; 12] = [
        ColoredPiece::WhitePawn,
        ColoredPiece::WhiteKnight,
        ColoredPiece::WhiteBishop,
        ColoredPiece::WhiteRook,
        ColoredPiece::WhiteQueen,
        ColoredPiece::WhiteKing,
        ColoredPiece::BlackPawn,
        ColoredPiece::BlackKnight,
        ColoredPiece::BlackBishop,
        ColoredPiece::BlackRook,
        ColoredPiece::BlackQueen,
        ColoredPiece::BlackKing,
    ];

    /// Combines a piece type and a color.
    #[inline]
    pub const fn new(piece: Piece, color: Color) -> Self {
        Self::ALL[color.index() * 6 + piece.index()]
    }

    /// Returns the index (0-11).
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Creates a colored piece from its index (0-11).
    #[inline]
    pub const fn from_index(index: usize) -> Option<Self> {
        if index < 12 {
            Some(Self::ALL[index])
        } else {
            None
        }
    }

    /// Returns the color of this piece.
    #[inline]
    pub const fn color(self) -> Color {
        if (self as u8) < 6 {
            Color::White
        } else {
            Color::Black
        }
    }

    /// Returns the uncolored piece type.
    #[inline]
    pub const fn piece(self) -> Piece {
        Piece::ALL[(self as usize) % 6]
    }

    /// Returns the FEN letter (uppercase for white).
    #[inline]
    pub const fn to_fen_char(self) -> char {
        self.piece().to_fen_char(self.color())
    }

    /// Parses a FEN piece letter.
    pub const fn from_fen_char(c: char) -> Option<Self> {
        let piece = match c.to_ascii_lowercase() {
            'p' => Piece::Pawn,
            'n' => Piece::Knight,
            'b' => Piece::Bishop,
            'r' => Piece::Rook,
            'q' => Piece::Queen,
            'k' => Piece::King,
            _ => return None,
        };
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        Some(Self::new(piece, color))
    }
}

impl std::fmt::Display for ColoredPiece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_fen_char())
    }
}
