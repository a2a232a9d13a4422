//! FEN round-trip and board invariant tests.

use chess_board::{Bitboard, Board};
use chess_core::{CastlingRights, Color, ColoredPiece, FenError, Piece, Square, STARTPOS};
use proptest::prelude::*;

const CORPUS: &[&str] = &[
    STARTPOS,
    // Sparse material, no castling, black to move
    "r1bk3r/p2pBpNp/n5p1/1ppNP2P/6P1/3P4/P1P1K3/q5b1 b - - 0 1",
    // En passant target after a double push
    "rnbqkbnr/pppppp1p/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1",
    // Empty board
    "8/8/8/8/8/8/8/8 w - - 0 1",
    // Pawn about to promote
    "8/P7/8/1k6/8/8/5K2/8 w - - 0 1",
    // Kiwipete
    "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    // Partial castling rights
    "r3k2r/8/8/8/8/8/8/R3K2R b Kq - 12 40",
    // Large counters
    "4k3/8/8/8/8/8/8/4K3 w - - 4294967295 4294967295",
    "8/8/8/8/8/8/8/8 w - - 99999999999 1",
    // Every piece kind present
    "rnbqkbnr/p7/8/8/8/8/7P/RNBQKBNR w - - 0 1",
];

#[test]
fn corpus_roundtrips_byte_for_byte() {
    for fen in CORPUS {
        let board = Board::from_fen(fen).unwrap_or_else(|e| panic!("{}: {}", fen, e));
        assert_eq!(board.to_fen(), *fen);
        assert!(board.is_consistent(), "inconsistent after parsing {}", fen);
    }
}

#[test]
fn corpus_has_no_double_occupancy() {
    for fen in CORPUS {
        let board = Board::from_fen(fen).unwrap();
        let mut seen = Bitboard::EMPTY;
        for piece in ColoredPiece::ALL {
            let bb = board.pieces(piece);
            assert!((seen & bb).is_empty(), "{} overlaps in {}", piece, fen);
            seen |= bb;
        }
        assert_eq!(seen, board.occupied());
        assert_eq!(board.occupied(), !board.empty());
        assert_eq!(
            board.occupied(),
            board.color_occupancy(Color::White) | board.color_occupancy(Color::Black)
        );
    }
}

#[test]
fn start_position_scenario() {
    let board = Board::from_fen(STARTPOS).unwrap();
    let rank_2: Vec<Square> = Bitboard::RANK_2.into_iter().collect();
    for sq in rank_2 {
        assert_eq!(board.piece_at(sq), Some(ColoredPiece::WhitePawn));
    }
    assert_eq!(board.pieces_of(Piece::Pawn, Color::White).count(), 8);
    assert_eq!(board.piece_at(Square::E8), Some(ColoredPiece::BlackKing));
    assert_eq!(board.castling, CastlingRights::ALL);
    assert_eq!(board.en_passant, None);
    assert_eq!((board.halfmove_clock, board.fullmove_number), (0, 1));
    assert_eq!(board.to_fen(), STARTPOS);
}

#[test]
fn malformed_fens_are_rejected() {
    let cases = [
        ("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0", "field count"),
        ("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR/8 w KQkq - 0 1", "rank count"),
        ("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNX w KQkq - 0 1", "piece"),
        ("rnbqkbnr/pppppppp/9/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1", "piece"),
        ("rnbqkbnr/ppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1", "rank length"),
        ("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR x KQkq - 0 1", "color"),
        ("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkqK - 0 1", "castling"),
        ("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQxq - 0 1", "castling"),
        ("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq e9 0 1", "en passant"),
        ("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - -1 1", "halfmove"),
        ("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 x", "fullmove"),
    ];

    for (fen, what) in cases {
        let err = Board::from_fen(fen).expect_err(what);
        let ok = match what {
            "field count" => matches!(err, FenError::FieldCount { .. }),
            "rank count" => matches!(err, FenError::RankCount { .. }),
            "piece" => matches!(err, FenError::InvalidPiece { .. }),
            "rank length" => matches!(err, FenError::RankLength { .. }),
            "color" => matches!(err, FenError::ActiveColor { .. }),
            "castling" => matches!(err, FenError::Castling { .. }),
            "en passant" => matches!(err, FenError::EnPassant { .. }),
            "halfmove" => matches!(err, FenError::HalfmoveClock { .. }),
            "fullmove" => matches!(err, FenError::FullmoveNumber { .. }),
            _ => false,
        };
        assert!(ok, "{}: expected {} error, got {:?}", fen, what, err);
        assert!(err.to_string().contains(fen), "error should quote the FEN");
    }
}

fn piece_strategy() -> impl Strategy<Value = Option<ColoredPiece>> {
    prop_oneof![
        3 => Just(None),
        1 => (0usize..12).prop_map(ColoredPiece::from_index),
    ]
}

fn board_strategy() -> impl Strategy<Value = Board> {
    (
        prop::collection::vec(piece_strategy(), 64),
        any::<bool>(),
        0u8..16,
        prop::option::of(0u8..64),
        any::<u64>(),
        any::<u64>(),
    )
        .prop_map(|(placement, white, castling, ep, halfmove, fullmove)| {
            let mut board = Board::new();
            for (sq, piece) in Square::all().zip(placement) {
                if let Some(piece) = piece {
                    board.put_piece(sq, piece);
                }
            }
            board.side_to_move = if white { Color::White } else { Color::Black };
            board.castling = CastlingRights::new(castling);
            board.en_passant = ep.and_then(Square::from_index);
            board.halfmove_clock = halfmove;
            board.fullmove_number = fullmove;
            board
        })
}

proptest! {
    #[test]
    fn prop_fen_roundtrip(board in board_strategy()) {
        let fen = board.to_fen();
        let parsed = Board::from_fen(&fen).unwrap();
        prop_assert_eq!(&parsed, &board);
        prop_assert_eq!(parsed.to_fen(), fen);
    }

    #[test]
    fn prop_parsed_boards_are_consistent(board in board_strategy()) {
        let parsed = Board::from_fen(&board.to_fen()).unwrap();
        prop_assert!(parsed.is_consistent());
    }

    #[test]
    fn prop_mutations_keep_invariants(
        ops in prop::collection::vec((0u8..64, prop::option::of(0usize..12)), 0..100)
    ) {
        let mut board = Board::startpos();
        for (index, piece) in ops {
            let sq = Square::from_index(index).unwrap();
            match piece.and_then(ColoredPiece::from_index) {
                Some(piece) => {
                    board.put_piece(sq, piece);
                    prop_assert_eq!(board.piece_at(sq), Some(piece));
                }
                None => {
                    board.remove_piece(sq);
                    prop_assert_eq!(board.piece_at(sq), None);
                }
            }
            prop_assert!(board.is_consistent());
        }
    }
}
