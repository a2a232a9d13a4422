//! FEN import and export for [`Board`].

use chess_core::{FenError, ParsedFen, Square};
use std::str::FromStr;

use crate::Board;

impl Board {
    /// Creates a board from a FEN string.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let parsed = ParsedFen::parse(fen)?;
        let board = Board::from_parsed(&parsed);
        tracing::debug!(fen = %fen, pieces = board.occupied().count(), "loaded FEN");
        Ok(board)
    }

    /// Replaces this board with the position described by `fen`.
    ///
    /// On error the board is left untouched.
    pub fn set_fen(&mut self, fen: &str) -> Result<(), FenError> {
        *self = Board::from_fen(fen)?;
        Ok(())
    }

    /// Builds a board from an already validated FEN record.
    pub fn from_parsed(parsed: &ParsedFen) -> Self {
        let mut board = Board::new();
        for (sq, piece) in Square::all().zip(parsed.placement.iter()) {
            if let Some(piece) = *piece {
                board.place_piece(sq, piece);
            }
        }
        board.refresh_empty();

        board.side_to_move = parsed.side_to_move;
        board.castling = parsed.castling;
        board.en_passant = parsed.en_passant;
        board.halfmove_clock = parsed.halfmove_clock;
        board.fullmove_number = parsed.fullmove_number;
        board
    }

    /// Snapshot of this board as a FEN record.
    pub fn to_parsed(&self) -> ParsedFen {
        let mut placement = [None; 64];
        for sq in Square::all() {
            placement[sq.index() as usize] = self.piece_at(sq);
        }
        ParsedFen {
            placement,
            side_to_move: self.side_to_move,
            castling: self.castling,
            en_passant: self.en_passant,
            halfmove_clock: self.halfmove_clock,
            fullmove_number: self.fullmove_number,
        }
    }

    /// Converts the board to a FEN string.
    pub fn to_fen(&self) -> String {
        self.to_parsed().to_fen()
    }
}

impl FromStr for Board {
    type Err = FenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Board::from_fen(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Bitboard;
    use chess_core::{CastlingRights, Color, ColoredPiece, Piece, STARTPOS};

    #[test]
    fn startpos_fen_roundtrip() {
        let board = Board::from_fen(STARTPOS).unwrap();
        assert_eq!(board.to_fen(), STARTPOS);
        assert_eq!(Board::startpos(), board);
    }

    #[test]
    fn custom_fen_roundtrip() {
        let fen = "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3";
        let board = Board::from_fen(fen).unwrap();
        assert_eq!(board.to_fen(), fen);
    }

    #[test]
    fn start_position_scenario() {
        let board = Board::from_fen(STARTPOS).unwrap();
        assert_eq!(board.pieces_of(Piece::Pawn, Color::White), Bitboard::RANK_2);
        assert_eq!(board.pieces_of(Piece::Pawn, Color::White).count(), 8);
        assert_eq!(board.piece_at(Square::E8), Some(ColoredPiece::BlackKing));
        assert_eq!(board.castling, CastlingRights::ALL);
        assert_eq!(board.en_passant, None);
        assert_eq!(board.halfmove_clock, 0);
        assert_eq!(board.fullmove_number, 1);
        assert_eq!(board.side_to_move, Color::White);
        assert!(board.is_consistent());
    }

    #[test]
    fn non_canonical_input_is_normalized() {
        let board = Board::from_fen("  8/8/8/8/8/8/8/8   w  qK  -  007 +3 ").unwrap();
        assert_eq!(board.to_fen(), "8/8/8/8/8/8/8/8 w Kq - 7 3");
    }

    #[test]
    fn en_passant_and_black_to_move() {
        let fen = "rnbqkbnr/pppppp1p/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1";
        let board = Board::from_fen(fen).unwrap();
        assert_eq!(board.side_to_move, Color::Black);
        assert_eq!(board.en_passant, Square::from_algebraic("e3"));
        assert_eq!(board.to_fen(), fen);
    }

    #[test]
    fn set_fen_failure_leaves_board_untouched() {
        let mut board = Board::startpos();
        let before = board.clone();
        let err = board.set_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP w KQkq - 0 1");
        assert!(matches!(err, Err(FenError::RankCount { found: 7, .. })));
        assert_eq!(board, before);

        let err = board.set_fen("8/8/8/8/8/8/8/8 w KQkq z9 0 1");
        assert!(matches!(err, Err(FenError::EnPassant { .. })));
        assert_eq!(board, before);
    }

    #[test]
    fn set_fen_success_replaces_everything() {
        let mut board = Board::startpos();
        board.set_fen("8/P7/8/1k6/8/8/5K2/8 w - - 0 1").unwrap();
        assert_eq!(board.occupied().count(), 3);
        assert_eq!(board.castling, CastlingRights::NONE);
        assert!(board.is_consistent());
    }

    #[test]
    fn from_str() {
        let board: Board = STARTPOS.parse().unwrap();
        assert_eq!(board.to_fen(), STARTPOS);
        assert!("not a fen".parse::<Board>().is_err());
    }

    #[test]
    fn to_parsed_matches_parse() {
        let fen = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
        let board = Board::from_fen(fen).unwrap();
        assert_eq!(board.to_parsed(), ParsedFen::parse(fen).unwrap());
    }
}
