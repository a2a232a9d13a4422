//! Command dispatch for one engine session.
//!
//! A session owns the current [`Board`] and borrows the shared attack tables.
//! Protocol replies go through the [`UciEngine`] writer; diagnostics go to
//! `tracing`.

use chess_board::{AttackTables, Bitboard, Board};
use chess_core::{Color, FenError, Move, Square};
use std::io::{BufRead, Write};
use uci::{ExtensionValue, GoOptions, GuiCommand, UciEngine, UciError};

use crate::config::EngineConfig;

/// Whether the command loop keeps running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Session<'a> {
    name: String,
    author: String,
    initial: Board,
    board: Board,
    tables: &'a AttackTables,
}

impl<'a> Session<'a> {
    /// Creates a session positioned on the configured start FEN.
    pub fn new(config: &EngineConfig, tables: &'a AttackTables) -> Result<Self, FenError> {
        let initial = Board::from_fen(&config.startpos)?;
        Ok(Session {
            name: config.name.clone(),
            author: config.author.clone(),
            board: initial.clone(),
            initial,
            tables,
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Reads commands until `quit` or end of input.
    pub fn run<R: BufRead, W: Write>(
        &mut self,
        engine: &mut UciEngine<R, W>,
    ) -> Result<(), UciError> {
        while let Some(line) = engine.read_line()? {
            let flow = match GuiCommand::parse(&line) {
                Ok(cmd) => self.handle(cmd, engine)?,
                Err(e) => {
                    tracing::warn!("Rejected command {:?}: {}", line.trim(), e);
                    engine.send_info_string(&format!("error: {}", e))?;
                    Flow::Continue
                }
            };
            if flow == Flow::Quit {
                break;
            }
        }
        tracing::info!("Session ended");
        Ok(())
    }

    /// Executes one parsed command.
    pub fn handle<R: BufRead, W: Write>(
        &mut self,
        cmd: GuiCommand,
        engine: &mut UciEngine<R, W>,
    ) -> Result<Flow, UciError> {
        tracing::debug!(command = ?cmd, "dispatch");

        match cmd {
            GuiCommand::Uci => {
                engine.send_id(&self.name, &self.author)?;
                engine.send_uciok()?;
            }

            GuiCommand::IsReady => engine.send_readyok()?,

            GuiCommand::SetOption { name, value } => {
                let text = match value {
                    Some(v) => format!("option {} = {}", name, v),
                    None => format!("option {}", name),
                };
                engine.send_info_string(&text)?;
            }

            GuiCommand::UciNewGame => {
                self.board = self.initial.clone();
                tracing::info!("New game");
            }

            GuiCommand::Position { fen, moves } => self.set_position(fen, &moves, engine)?,

            GuiCommand::Go(opts) => self.go(&opts, engine)?,

            GuiCommand::Stop => engine.send_info_string("stop not implemented")?,
            GuiCommand::PonderHit => engine.send_info_string("ponderhit not implemented")?,
            GuiCommand::Debug(_) => engine.send_info_string("debug not implemented")?,
            GuiCommand::Register => engine.send_info_string("register not implemented")?,

            GuiCommand::Display => self.display(engine)?,

            GuiCommand::Quit => return Ok(Flow::Quit),

            GuiCommand::Unknown(line) => {
                if !line.is_empty() {
                    tracing::warn!("Unknown command: {}", line);
                    engine.send_info_string(&format!("unknown command: {}", line))?;
                }
            }
        }

        Ok(Flow::Continue)
    }

    fn set_position<R: BufRead, W: Write>(
        &mut self,
        fen: Option<String>,
        moves: &[String],
        engine: &mut UciEngine<R, W>,
    ) -> Result<(), UciError> {
        let loaded = match fen {
            Some(fen) => self.board.set_fen(&fen),
            None => {
                self.board = Board::startpos();
                Ok(())
            }
        };
        if let Err(e) = loaded {
            tracing::warn!("Position rejected: {}", e);
            return engine.send_info_string(&format!("error: {}", e));
        }
        tracing::info!(fen = %self.board.to_fen(), "Position set");

        if moves.is_empty() {
            return Ok(());
        }

        let mut decoded = Vec::with_capacity(moves.len());
        for text in moves {
            match Move::from_uci(text) {
                Some(mv) => decoded.push(mv.to_uci()),
                None => engine.send_info_string(&format!("error: invalid move '{}'", text))?,
            }
        }
        if !decoded.is_empty() {
            engine.send_info_string(&format!("moves not applied: {}", decoded.join(" ")))?;
        }
        Ok(())
    }

    fn go<R: BufRead, W: Write>(
        &self,
        opts: &GoOptions,
        engine: &mut UciEngine<R, W>,
    ) -> Result<(), UciError> {
        tracing::debug!(?opts, "go");
        engine.send_info_string("search not implemented")?;
        engine.send_bestmove("0000")
    }

    fn display<R: BufRead, W: Write>(&self, engine: &mut UciEngine<R, W>) -> Result<(), UciError> {
        engine.send_raw(&self.board.to_string())?;
        engine.send_raw(&format!("Fen: {}", self.board.to_fen()))?;
        engine.send_extension("board", self.snapshot())
    }

    /// Structured view of the board for `ext:board`.
    pub fn snapshot(&self) -> ExtensionValue {
        let board = &self.board;
        ExtensionValue::object([
            ("fen", ExtensionValue::from(board.to_fen())),
            (
                "side",
                ExtensionValue::from(board.side_to_move.to_fen_char().to_string()),
            ),
            ("castling", ExtensionValue::from(board.castling.to_string())),
            (
                "en_passant",
                ExtensionValue::from(board.en_passant.map(|sq| sq.to_algebraic())),
            ),
            ("halfmove", ExtensionValue::from(board.halfmove_clock)),
            ("fullmove", ExtensionValue::from(board.fullmove_number)),
            (
                "pieces",
                ExtensionValue::object([
                    ("white", board.color_occupancy(Color::White).count()),
                    ("black", board.color_occupancy(Color::Black).count()),
                ]),
            ),
            (
                "attacked",
                ExtensionValue::object([
                    ("white", self.attacked_by(Color::White).count()),
                    ("black", self.attacked_by(Color::Black).count()),
                ]),
            ),
        ])
    }

    /// Every square attacked by at least one piece of `color`.
    fn attacked_by(&self, color: Color) -> Bitboard {
        self.board
            .color_occupancy(color)
            .into_iter()
            .fold(Bitboard::EMPTY, |acc, sq: Square| {
                acc | self.board.attacks_from(self.tables, sq)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::STARTPOS;
    use std::io::Cursor;

    fn run_script(script: &str) -> (String, Board) {
        let config = EngineConfig::default();
        let mut session = Session::new(&config, AttackTables::get()).unwrap();
        let mut engine = UciEngine::new(Cursor::new(script.to_string()), Vec::new());
        session.run(&mut engine).unwrap();
        let board = session.board().clone();
        (String::from_utf8(engine.into_writer()).unwrap(), board)
    }

    #[test]
    fn handshake() {
        let (out, _) = run_script("uci\nisready\n");
        assert_eq!(
            out,
            "id name bitboard-engine\nid author Tom Metten\nuciok\nreadyok\n"
        );
    }

    #[test]
    fn position_fen_loads_board() {
        let fen = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
        let (out, board) = run_script(&format!("position fen {}\n", fen));
        assert_eq!(out, "");
        assert_eq!(board.to_fen(), fen);
    }

    #[test]
    fn bad_fen_keeps_previous_board() {
        let fen = "8/8/8/8/8/8/8/K6k w - - 0 1";
        let (out, board) = run_script(&format!(
            "position fen {}\nposition fen 8/8/8 w - - 0 1\n",
            fen
        ));
        assert!(out.starts_with("info string error: invalid FEN '8/8/8 w - - 0 1'"));
        assert_eq!(board.to_fen(), fen);
    }

    #[test]
    fn moves_are_reported_not_applied() {
        let (out, board) = run_script("position startpos moves e2e4 zz e7e8q\n");
        assert_eq!(
            out,
            "info string error: invalid move 'zz'\ninfo string moves not applied: e2e4 e7e8q\n"
        );
        assert_eq!(board.to_fen(), STARTPOS);
    }

    #[test]
    fn go_answers_null_move() {
        let (out, _) = run_script("go depth 3\n");
        assert_eq!(out, "info string search not implemented\nbestmove 0000\n");
    }

    #[test]
    fn setoption_is_acknowledged() {
        let (out, _) = run_script("setoption name Hash value 64\nsetoption name Clear Hash\n");
        assert_eq!(
            out,
            "info string option Hash = 64\ninfo string option Clear Hash\n"
        );
    }

    #[test]
    fn unsupported_and_unknown_commands() {
        let (out, _) = run_script("stop\nponderhit\ndebug on\nregister later\n\nfoo bar\n");
        assert_eq!(
            out,
            "info string stop not implemented\n\
             info string ponderhit not implemented\n\
             info string debug not implemented\n\
             info string register not implemented\n\
             info string unknown command: foo bar\n"
        );
    }

    #[test]
    fn parse_errors_are_reported() {
        let (out, _) = run_script("position nowhere\n");
        assert!(out.starts_with("info string error: Parse error:"));
    }

    #[test]
    fn quit_stops_reading() {
        let (out, _) = run_script("Q\nisready\n");
        assert_eq!(out, "");
        let (out, _) = run_script("quit\nisready\n");
        assert_eq!(out, "");
    }

    #[test]
    fn ucinewgame_resets_board() {
        let (_, board) = run_script("position fen 8/8/8/8/8/8/8/K6k w - - 0 1\nucinewgame\n");
        assert_eq!(board.to_fen(), STARTPOS);
    }

    #[test]
    fn display_prints_diagram_and_snapshot() {
        let (out, _) = run_script("d\n");
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "8 r n b q k b n r");
        assert_eq!(lines[8], "  a b c d e f g h");
        assert_eq!(lines[9], format!("Fen: {}", STARTPOS));
        assert!(lines[10].starts_with("info string ext:board {"));
        assert!(lines[10].contains(r#""castling":"KQkq""#));
        assert!(lines[10].contains(r#""en_passant":null"#));
        assert!(lines[10].contains(r#""pieces":{"black":16,"white":16}"#));
    }

    #[test]
    fn snapshot_attack_counts() {
        let config = EngineConfig::default();
        let session = Session::new(&config, AttackTables::get()).unwrap();
        // Ranks 2 and 3 in full plus b1-g1
        let white = session.attacked_by(Color::White);
        assert_eq!(white.count(), 22);
        assert_eq!(session.attacked_by(Color::Black).count(), 22);
    }

    #[test]
    fn custom_startpos_from_config() {
        let config = EngineConfig {
            startpos: "8/8/8/8/8/8/8/K6k b - - 5 9".to_string(),
            ..EngineConfig::default()
        };
        let session = Session::new(&config, AttackTables::get()).unwrap();
        assert_eq!(session.board().to_fen(), "8/8/8/8/8/8/8/K6k b - - 5 9");

        let bad = EngineConfig {
            startpos: "nonsense".to_string(),
            ..EngineConfig::default()
        };
        assert!(Session::new(&bad, AttackTables::get()).is_err());
    }
}
