//! Game controller.
//!
//! `GameState` owns the one board, the move history, the undo stack, and the
//! captured/promotion ledgers for a single game. Every mutation goes through
//! `make_move`, `promote`, `undo`, or `redo`; everything else is a read-only
//! query. Move requests are validated by the per-piece rules, applied with
//! [`apply_move`], and classified afterwards as plain, check, checkmate, or
//! stalemate.

use std::collections::BTreeMap;

use crate::chess_errors::{ChessErrors, ChessResult};
use crate::game_state::board::Board;
use crate::game_state::chess_types::{
    BoardLocation, Color, GameStatus, Move, MoveResult, Piece, PieceKind, Player, Square,
};
use crate::game_state::ledgers::{CapturedLedger, PromotionLedger, PromotionRecord};
use crate::move_generation::legal_move_apply::{apply_move, replace_promoted_pawn, revert_move};
use crate::move_generation::legal_move_checks::{is_checkmate, is_pinned, is_stalemate};
use crate::move_generation::legal_move_generator::{can_move, generate_legal_moves, legal_moves_from};

#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    history: Vec<Move>,
    undo_history: Vec<Move>,
    promotions: PromotionLedger,
    // Records of undone promotion moves, in undo order, consumed by redo.
    undone_promotions: Vec<PromotionRecord>,
    // [color] -> pieces that color has captured.
    captured: [CapturedLedger; 2],
    to_move: Color,
    status: GameStatus,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new_game()
    }
}

impl GameState {
    /// Standard starting position, White to move, empty histories.
    pub fn new_game() -> Self {
        Self {
            board: Board::new_standard(),
            history: Vec::new(),
            undo_history: Vec::new(),
            promotions: PromotionLedger::default(),
            undone_promotions: Vec::new(),
            captured: Default::default(),
            to_move: Color::White,
            status: GameStatus::AwaitingMove,
        }
    }

    /// Start from an arbitrary setup with an empty history.
    ///
    /// Kings and rooks on their home squares keep their castling rights.
    /// The setup must hold exactly one king per color, no pawn on a back
    /// rank, and the side not to move must not be in check. A setup that is
    /// already mate or stalemate starts as a finished game.
    pub fn from_board(board: Board, to_move: Color) -> ChessResult<Self> {
        for color in [Color::White, Color::Black] {
            let kings = board.count_kings(color);
            if kings != 1 {
                return Err(ChessErrors::InvalidPosition(format!(
                    "{color} has {kings} kings"
                )));
            }
        }
        if let Some((at, _)) = board.pieces().find(|(at, piece)| {
            piece.kind == PieceKind::Pawn && (at.rank() == 1 || at.rank() == 8)
        }) {
            return Err(ChessErrors::InvalidPosition(format!("pawn on back rank at {at}")));
        }
        if board.is_in_check(to_move.enemy()) {
            return Err(ChessErrors::InvalidPosition(format!(
                "{} is in check but it is {to_move}'s turn",
                to_move.enemy()
            )));
        }

        let mut game = Self {
            board,
            to_move,
            ..Self::new_game()
        };
        game.classify();
        Ok(game)
    }

    /// Attempt one move for `color`.
    ///
    /// Every rejection, from a wrong turn to an illegal geometry, yields
    /// `InvalidMove` and leaves the game untouched; the reason is logged at
    /// debug level.
    pub fn make_move(
        &mut self,
        color: Color,
        source: BoardLocation,
        destination: BoardLocation,
    ) -> MoveResult {
        let validated = Square::try_from(source).and_then(|source_square| {
            let destination_square = Square::try_from(destination)?;
            self.validate(color, source_square, destination_square)
        });
        match validated {
            Ok(mv) => self.play(mv, true),
            Err(reason) => {
                tracing::debug!(%color, ?source, ?destination, %reason, "move rejected");
                MoveResult::InvalidMove
            }
        }
    }

    /// Choose the kind for the pawn waiting on `location`, then classify the
    /// resulting position for the side now to move.
    pub fn promote(&mut self, location: BoardLocation, kind: PieceKind) -> ChessResult<MoveResult> {
        let at = Square::try_from(location)?;
        let GameStatus::AwaitingPromotionChoice(pending) = self.status else {
            return Err(ChessErrors::NoPromotionPending);
        };
        if at != pending {
            return Err(ChessErrors::InvalidPromotionSquare(at));
        }
        if !kind.is_promotion_target() {
            return Err(ChessErrors::InvalidPromotionKind(kind));
        }
        Ok(self.finish_promotion(kind))
    }

    /// Take back the last move. Does nothing on an empty history.
    pub fn undo(&mut self) {
        let Some(mv) = self.history.pop() else {
            return;
        };
        if let Some(record) =
            revert_move(&mut self.board, &mv, &mut self.captured, &mut self.promotions)
        {
            self.undone_promotions.push(record);
        }
        self.undo_history.push(mv);
        self.to_move = self.to_move.enemy();
        self.status = GameStatus::AwaitingMove;
        tracing::trace!(%mv, "move undone");
    }

    /// Replay the most recently undone move through the normal validation
    /// path, restoring its promotion choice if it had one. `None` when there
    /// is nothing to redo.
    ///
    /// # Panics
    ///
    /// Panics if the restored position no longer admits the recorded move,
    /// which means history and board have diverged.
    pub fn redo(&mut self) -> Option<MoveResult> {
        let recorded = self.undo_history.pop()?;
        let color = self.to_move;
        match self.validate(color, recorded.source, recorded.destination) {
            Ok(replayed) if replayed == recorded => {}
            outcome => {
                tracing::error!(%recorded, ?outcome, "redo rejected by restored position");
                panic!("corrupted game state: redo of {recorded} no longer replays ({outcome:?})");
            }
        }

        let result = self.play(recorded, false);
        if recorded.kind.is_promotion() {
            let chosen = self
                .undone_promotions
                .pop()
                .and_then(|record| record.promoted_to);
            if let Some(kind) = chosen {
                return Some(self.finish_promotion(kind));
            }
        }
        Some(result)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Detached copy of every occupied square.
    pub fn board_snapshot(&self) -> BTreeMap<Square, Piece> {
        self.board.snapshot()
    }

    /// Pieces `color` has taken from the opponent, oldest first.
    pub fn captured_pieces(&self, color: Color) -> &[Piece] {
        self.captured[color.index()].as_slice()
    }

    /// False for both colors once the game is over.
    pub fn is_to_move(&self, color: Color) -> bool {
        !self.status.is_over() && self.to_move == color
    }

    pub fn to_move(&self) -> Color {
        self.to_move
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn history(&self) -> &[Move] {
        &self.history
    }

    pub fn undo_history(&self) -> &[Move] {
        &self.undo_history
    }

    pub fn last_move(&self) -> Option<Move> {
        self.history.last().copied()
    }

    pub fn player(&self, color: Color) -> Player {
        Player {
            color,
            captured_pieces: self.captured_pieces(color).to_vec(),
            is_to_move: self.is_to_move(color),
        }
    }

    pub fn is_in_check(&self, color: Color) -> bool {
        self.board.is_in_check(color)
    }

    /// Whether the piece on `location` shields its own king.
    pub fn is_pinned(&self, location: BoardLocation) -> ChessResult<bool> {
        let at = Square::try_from(location)?;
        let mut scratch = self.board.clone();
        Ok(is_pinned(&mut scratch, at))
    }

    /// Every legal move `color` has in the current position.
    pub fn legal_moves(&self, color: Color) -> Vec<Move> {
        let mut scratch = self.board.clone();
        generate_legal_moves(&mut scratch, &self.history, color)
    }

    /// Legal destinations of the piece on `location`; empty for an empty square.
    pub fn legal_destinations(&self, location: BoardLocation) -> ChessResult<Vec<Square>> {
        let at = Square::try_from(location)?;
        let mut scratch = self.board.clone();
        Ok(legal_moves_from(&mut scratch, &self.history, at)
            .into_iter()
            .map(|mv| mv.destination)
            .collect())
    }

    /// Apply a move produced by this game's own generator without validating
    /// it again.
    pub(crate) fn play_legal(&mut self, mv: Move) -> MoveResult {
        self.play(mv, true)
    }

    /// Coarse gating, then the piece rule.
    fn validate(&mut self, color: Color, source: Square, destination: Square) -> ChessResult<Move> {
        match self.status {
            GameStatus::Checkmate { .. } | GameStatus::Stalemate => {
                return Err(ChessErrors::GameOver)
            }
            GameStatus::AwaitingPromotionChoice(at) => {
                return Err(ChessErrors::PromotionPending(at))
            }
            GameStatus::AwaitingMove => {}
        }
        if color != self.to_move {
            return Err(ChessErrors::NotYourTurn(color));
        }
        if source == destination {
            return Err(ChessErrors::SameSquare(source));
        }
        let occupant = self
            .board
            .occupant_at(source)
            .ok_or(ChessErrors::EmptySource(source))?;
        if occupant.color != color {
            return Err(ChessErrors::WrongColor {
                square: source,
                expected: color,
            });
        }
        can_move(&mut self.board, &self.history, source, destination)
    }

    fn play(&mut self, mv: Move, fresh: bool) -> MoveResult {
        let mover = apply_move(&mut self.board, &mv, &mut self.captured, &mut self.promotions);
        self.history.push(mv);
        if fresh {
            self.undo_history.clear();
            self.undone_promotions.clear();
        }
        self.to_move = mover.color.enemy();
        tracing::trace!(%mv, color = %mover.color, fresh, "move applied");

        if mv.kind.is_promotion() {
            self.status = GameStatus::AwaitingPromotionChoice(mv.destination);
            return MoveResult::PromotionPending;
        }
        self.classify()
    }

    fn finish_promotion(&mut self, kind: PieceKind) -> MoveResult {
        let Some(mv) = self.history.last().copied() else {
            tracing::error!("promotion pending with an empty history");
            panic!("corrupted game state: promotion pending with an empty history");
        };
        replace_promoted_pawn(&mut self.board, &mv, kind);
        if let Some(record) = self.promotions.last_mut() {
            record.promoted_to = Some(kind);
        }
        tracing::trace!(%mv, %kind, "pawn promoted");
        self.classify()
    }

    /// Evaluate the position for the side to move and update the status.
    fn classify(&mut self) -> MoveResult {
        let side = self.to_move;
        if self.board.is_in_check(side) {
            if is_checkmate(&mut self.board, &self.history, side) {
                self.status = GameStatus::Checkmate { loser: side };
                tracing::info!(loser = %side, plies = self.history.len(), "checkmate");
                MoveResult::Checkmate
            } else {
                self.status = GameStatus::AwaitingMove;
                MoveResult::Check
            }
        } else if is_stalemate(&mut self.board, &self.history, side) {
            self.status = GameStatus::Stalemate;
            tracing::info!(%side, plies = self.history.len(), "stalemate");
            MoveResult::Stalemate
        } else {
            self.status = GameStatus::AwaitingMove;
            MoveResult::ValidMove
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_types::MoveKind;
    use crate::utils::render_game_state::board_from_diagram;
    use tracing_subscriber::EnvFilter;

    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }

    /// "e2" -> (5, 2)
    fn at(name: &str) -> BoardLocation {
        let bytes = name.as_bytes();
        ((bytes[0] - b'a' + 1) as i8, (bytes[1] - b'0') as i8)
    }

    fn sq(name: &str) -> Square {
        Square::try_from(at(name)).expect("square on board")
    }

    /// Plays alternating moves starting with the side to move.
    fn play_line(game: &mut GameState, line: &[(&str, &str)]) -> Vec<MoveResult> {
        line.iter()
            .map(|(source, destination)| {
                let color = game.to_move();
                game.make_move(color, at(source), at(destination))
            })
            .collect()
    }

    const SCHOLARS_MATE: [(&str, &str); 7] = [
        ("e2", "e4"),
        ("e7", "e5"),
        ("f1", "c4"),
        ("b8", "c6"),
        ("d1", "h5"),
        ("g8", "f6"),
        ("h5", "f7"),
    ];

    #[test]
    fn scholars_mate_ends_in_checkmate() {
        init_tracing();
        let mut game = GameState::new_game();
        let results = play_line(&mut game, &SCHOLARS_MATE);
        let mut expected = vec![MoveResult::ValidMove; 6];
        expected.push(MoveResult::Checkmate);
        assert_eq!(results, expected);
        assert_eq!(game.status(), GameStatus::Checkmate { loser: Color::Black });
        assert!(!game.is_to_move(Color::White));
        assert!(!game.is_to_move(Color::Black));
        assert_eq!(
            game.make_move(Color::Black, at("e8"), at("e7")),
            MoveResult::InvalidMove
        );
        assert_eq!(
            game.captured_pieces(Color::White),
            &[Piece::new(PieceKind::Pawn, Color::Black)]
        );
    }

    #[test]
    fn en_passant_capture_lands_in_whites_ledger() {
        init_tracing();
        let mut game = GameState::new_game();
        let results = play_line(
            &mut game,
            &[("a2", "a4"), ("a7", "a6"), ("a4", "a5"), ("b7", "b5"), ("a5", "b6")],
        );
        assert_eq!(results, vec![MoveResult::ValidMove; 5]);
        assert!(game.board().is_empty(sq("b5")));
        assert_eq!(
            game.board().occupant_at(sq("b6")),
            Some(Piece::new(PieceKind::Pawn, Color::White))
        );
        assert_eq!(
            game.captured_pieces(Color::White),
            &[Piece::new(PieceKind::Pawn, Color::Black)]
        );
        assert!(game.captured_pieces(Color::Black).is_empty());
        assert_eq!(game.last_move().map(|mv| mv.kind), Some(MoveKind::EnPassant));
    }

    #[test]
    fn en_passant_window_closes_after_one_ply() {
        let mut game = GameState::new_game();
        let results = play_line(
            &mut game,
            &[
                ("e2", "e4"),
                ("a7", "a6"),
                ("e4", "e5"),
                ("d7", "d5"),
                ("h2", "h3"),
                ("h7", "h6"),
            ],
        );
        assert_eq!(results, vec![MoveResult::ValidMove; 6]);
        assert_eq!(
            game.make_move(Color::White, at("e5"), at("d6")),
            MoveResult::InvalidMove
        );
    }

    #[test]
    fn turns_alternate_and_rejections_keep_the_turn() {
        let mut game = GameState::new_game();
        assert!(game.is_to_move(Color::White));
        assert!(!game.is_to_move(Color::Black));

        let rejected = [
            (Color::Black, at("e7"), at("e5")),
            (Color::White, (0, 2), at("e4")),
            (Color::White, at("e2"), (5, 9)),
            (Color::White, at("e2"), at("e2")),
            (Color::White, at("e3"), at("e4")),
            (Color::White, at("e7"), at("e6")),
            (Color::White, at("e2"), at("e5")),
        ];
        for (color, source, destination) in rejected {
            assert_eq!(
                game.make_move(color, source, destination),
                MoveResult::InvalidMove
            );
            assert!(game.is_to_move(Color::White));
            assert!(game.history().is_empty());
        }

        assert_eq!(
            game.make_move(Color::White, at("e2"), at("e4")),
            MoveResult::ValidMove
        );
        assert!(game.is_to_move(Color::Black));
        assert!(game.player(Color::Black).is_to_move);
        assert!(!game.player(Color::White).is_to_move);
    }

    #[test]
    fn undo_and_redo_round_trip_the_whole_game() {
        init_tracing();
        let mut game = GameState::new_game();
        play_line(&mut game, &SCHOLARS_MATE);
        let final_board = game.board().clone();

        for _ in 0..SCHOLARS_MATE.len() {
            game.undo();
        }
        assert_eq!(game.board(), &Board::new_standard());
        assert!(game.history().is_empty());
        assert!(game.captured_pieces(Color::White).is_empty());
        assert!(game.is_to_move(Color::White));
        game.undo();
        assert_eq!(game.undo_history().len(), SCHOLARS_MATE.len());

        let mut results = Vec::new();
        while let Some(result) = game.redo() {
            results.push(result);
        }
        assert_eq!(results.last(), Some(&MoveResult::Checkmate));
        assert_eq!(game.board(), &final_board);
        assert_eq!(game.captured_pieces(Color::White).len(), 1);
        assert_eq!(game.status(), GameStatus::Checkmate { loser: Color::Black });
        assert_eq!(game.redo(), None);
    }

    #[test]
    fn fresh_move_clears_the_redo_stack() {
        let mut game = GameState::new_game();
        play_line(&mut game, &[("e2", "e4"), ("e7", "e5")]);
        game.undo();
        assert_eq!(game.undo_history().len(), 1);
        assert_eq!(
            game.make_move(Color::Black, at("d7"), at("d5")),
            MoveResult::ValidMove
        );
        assert!(game.undo_history().is_empty());
        assert_eq!(game.redo(), None);
    }

    fn promotion_game() -> GameState {
        let board = board_from_diagram([
            "r......k", //
            ".P......", //
            "........", //
            "........", //
            "........", //
            "........", //
            "........", //
            "....K...", //
        ]);
        GameState::from_board(board, Color::White).expect("legal setup")
    }

    #[test]
    fn promotion_waits_for_a_choice() {
        init_tracing();
        let mut game = promotion_game();
        assert_eq!(
            game.promote(at("b8"), PieceKind::Queen),
            Err(ChessErrors::NoPromotionPending)
        );
        assert_eq!(
            game.make_move(Color::White, at("b7"), at("a8")),
            MoveResult::PromotionPending
        );
        assert_eq!(game.status(), GameStatus::AwaitingPromotionChoice(sq("a8")));
        assert_eq!(
            game.make_move(Color::Black, at("h8"), at("h7")),
            MoveResult::InvalidMove
        );
        assert_eq!(
            game.promote(at("b8"), PieceKind::Queen),
            Err(ChessErrors::InvalidPromotionSquare(sq("b8")))
        );
        assert_eq!(
            game.promote(at("a8"), PieceKind::King),
            Err(ChessErrors::InvalidPromotionKind(PieceKind::King))
        );
        assert_eq!(
            game.promote(at("a8"), PieceKind::Pawn),
            Err(ChessErrors::InvalidPromotionKind(PieceKind::Pawn))
        );
        // The new queen sees h8 along the empty back rank.
        assert_eq!(game.promote(at("a8"), PieceKind::Queen), Ok(MoveResult::Check));
        assert_eq!(
            game.board().occupant_at(sq("a8")),
            Some(Piece::new(PieceKind::Queen, Color::White))
        );
        assert_eq!(
            game.captured_pieces(Color::White),
            &[Piece::new(PieceKind::Rook, Color::Black)]
        );
    }

    #[test]
    fn redo_restores_the_chosen_promotion() {
        let mut game = promotion_game();
        let start = game.board().clone();
        game.make_move(Color::White, at("b7"), at("a8"));
        game.promote(at("a8"), PieceKind::Knight).expect("knight is a valid choice");
        assert_eq!(
            game.make_move(Color::Black, at("h8"), at("h7")),
            MoveResult::ValidMove
        );
        let end = game.board().clone();

        game.undo();
        game.undo();
        assert_eq!(game.board(), &start);
        assert!(game.captured_pieces(Color::White).is_empty());

        assert_eq!(game.redo(), Some(MoveResult::ValidMove));
        assert_eq!(
            game.board().occupant_at(sq("a8")),
            Some(Piece::new(PieceKind::Knight, Color::White))
        );
        assert_eq!(game.redo(), Some(MoveResult::ValidMove));
        assert_eq!(game.board(), &end);
    }

    #[test]
    fn undoing_a_pending_promotion_redoes_as_pending() {
        let mut game = promotion_game();
        game.make_move(Color::White, at("b7"), at("b8"));
        game.undo();
        assert_eq!(game.status(), GameStatus::AwaitingMove);
        assert_eq!(game.redo(), Some(MoveResult::PromotionPending));
        assert_eq!(game.promote(at("b8"), PieceKind::Rook), Ok(MoveResult::Check));
    }

    #[test]
    fn castling_is_rejected_after_the_king_has_moved() {
        let mut game = GameState::new_game();
        let results = play_line(
            &mut game,
            &[
                ("e2", "e4"),
                ("e7", "e5"),
                ("e1", "e2"),
                ("e8", "e7"),
                ("e2", "e1"),
                ("e7", "e8"),
                ("g1", "f3"),
                ("g8", "f6"),
                ("f1", "c4"),
                ("f8", "c5"),
            ],
        );
        assert!(results.iter().all(|result| *result == MoveResult::ValidMove));
        assert_eq!(
            game.make_move(Color::White, at("e1"), at("g1")),
            MoveResult::InvalidMove
        );
        assert_eq!(
            game.make_move(Color::White, at("h1"), at("e1")),
            MoveResult::InvalidMove
        );
    }

    #[test]
    fn king_walk_replayed_through_redo_still_forfeits_castling() {
        let mut game = GameState::new_game();
        let results = play_line(
            &mut game,
            &[
                ("e2", "e4"),
                ("e7", "e5"),
                ("g1", "f3"),
                ("g8", "f6"),
                ("f1", "c4"),
                ("f8", "c5"),
                ("e1", "e2"),
                ("b8", "c6"),
                ("e2", "e1"),
                ("c6", "b8"),
            ],
        );
        assert!(results.iter().all(|result| *result == MoveResult::ValidMove));

        game.undo();
        game.undo();
        assert_eq!(
            game.board().occupant_at(sq("e2")),
            Some(Piece::new(PieceKind::King, Color::White))
        );
        assert_eq!(game.redo(), Some(MoveResult::ValidMove));
        game.undo();
        assert_eq!(game.redo(), Some(MoveResult::ValidMove));
        assert_eq!(game.redo(), Some(MoveResult::ValidMove));
        assert_eq!(game.redo(), None);

        assert_eq!(
            game.board().occupant_at(sq("e1")),
            Some(Piece::new(PieceKind::King, Color::White))
        );
        assert!(game.is_to_move(Color::White));
        assert!(game
            .history()
            .iter()
            .any(|mv| mv.source == sq("e1") && mv.destination == sq("e2")));
        assert_eq!(
            game.make_move(Color::White, at("e1"), at("g1")),
            MoveResult::InvalidMove
        );
        assert_eq!(
            game.make_move(Color::White, at("h1"), at("e1")),
            MoveResult::InvalidMove
        );

        // Taking back the king's own step restores the right.
        for _ in 0..4 {
            game.undo();
        }
        assert_eq!(game.history().len(), 6);
        assert_eq!(
            game.make_move(Color::White, at("e1"), at("g1")),
            MoveResult::ValidMove
        );
        assert_eq!(game.last_move().map(|mv| mv.kind), Some(MoveKind::Castling));
    }

    #[test]
    fn castling_relocates_king_and_rook() {
        let mut game = GameState::new_game();
        play_line(
            &mut game,
            &[
                ("e2", "e4"),
                ("e7", "e5"),
                ("g1", "f3"),
                ("g8", "f6"),
                ("f1", "c4"),
                ("f8", "c5"),
            ],
        );
        assert!(game.legal_destinations(at("e1")).expect("e1").contains(&sq("g1")));
        assert_eq!(
            game.make_move(Color::White, at("h1"), at("e1")),
            MoveResult::ValidMove
        );
        assert_eq!(
            game.board().occupant_at(sq("g1")),
            Some(Piece::new(PieceKind::King, Color::White))
        );
        assert_eq!(
            game.board().occupant_at(sq("f1")),
            Some(Piece::new(PieceKind::Rook, Color::White))
        );
        assert_eq!(game.last_move().map(|mv| mv.kind), Some(MoveKind::Castling));

        game.undo();
        assert_eq!(
            game.board().occupant_at(sq("e1")),
            Some(Piece::new(PieceKind::King, Color::White))
        );
        assert_eq!(
            game.board().occupant_at(sq("h1")),
            Some(Piece::new(PieceKind::Rook, Color::White))
        );
    }

    #[test]
    fn castling_through_an_attacked_square_is_rejected() {
        let board = board_from_diagram([
            "....k...", //
            "........", //
            "........", //
            "........", //
            "..b.....", //
            "........", //
            "........", //
            "....K..R", //
        ]);
        let mut game = GameState::from_board(board, Color::White).expect("legal setup");
        assert_eq!(
            game.make_move(Color::White, at("e1"), at("g1")),
            MoveResult::InvalidMove
        );
        assert_eq!(
            game.make_move(Color::White, at("e1"), at("d1")),
            MoveResult::ValidMove
        );
    }

    #[test]
    fn stalemate_is_reported_and_ends_the_game() {
        init_tracing();
        let board = board_from_diagram([
            "k.......", //
            "........", //
            ".K......", //
            "..Q.....", //
            "........", //
            "........", //
            "........", //
            "........", //
        ]);
        let mut game = GameState::from_board(board, Color::White).expect("legal setup");
        assert_eq!(
            game.make_move(Color::White, at("c5"), at("c7")),
            MoveResult::Stalemate
        );
        assert_eq!(game.status(), GameStatus::Stalemate);
        assert!(!game.is_to_move(Color::Black));
        assert!(game.legal_moves(Color::Black).is_empty());

        game.undo();
        assert!(game.is_to_move(Color::White));
    }

    #[test]
    fn from_board_rejects_broken_setups() {
        let two_white_kings = board_from_diagram([
            "....k...", //
            "........", //
            "........", //
            "........", //
            "........", //
            "........", //
            "........", //
            "K...K...", //
        ]);
        assert!(matches!(
            GameState::from_board(two_white_kings, Color::White),
            Err(ChessErrors::InvalidPosition(_))
        ));

        let opponent_in_check = board_from_diagram([
            "....k...", //
            "........", //
            "........", //
            "........", //
            "....R...", //
            "........", //
            "........", //
            "K.......", //
        ]);
        assert!(GameState::from_board(opponent_in_check.clone(), Color::White).is_err());
        let black_to_answer =
            GameState::from_board(opponent_in_check, Color::Black).expect("black to move in check");
        assert!(black_to_answer.is_in_check(Color::Black));

        let pawn_on_back_rank = board_from_diagram([
            "....k..P", //
            "........", //
            "........", //
            "........", //
            "........", //
            "........", //
            "........", //
            "K.......", //
        ]);
        assert!(GameState::from_board(pawn_on_back_rank, Color::White).is_err());
    }

    #[test]
    fn queries_do_not_disturb_the_position() {
        let mut game = GameState::new_game();
        play_line(&mut game, &[("e2", "e4"), ("e7", "e5")]);
        let before = game.board_snapshot();
        assert_eq!(game.is_pinned(at("e8")), Ok(false));
        assert_eq!(game.legal_moves(Color::White).len(), 29);
        assert!(game.legal_destinations(at("d4")).expect("d4").is_empty());
        let mut knight_targets = game.legal_destinations(at("g1")).expect("g1");
        knight_targets.sort();
        assert_eq!(knight_targets, vec![sq("e2"), sq("f3"), sq("h3")]);
        assert_eq!(game.board_snapshot(), before);
        assert!(game.is_pinned((9, 9)).is_err());

        let mut snapshot = game.board_snapshot();
        snapshot.clear();
        assert_eq!(game.board_snapshot().len(), 32);
    }

    #[test]
    fn pinned_piece_cannot_move() {
        let mut game = GameState::new_game();
        play_line(&mut game, &[("e2", "e4"), ("d7", "d5"), ("f1", "b5"), ("c7", "c6")]);
        // c6 blocks the b5-e8 diagonal, so the c6 pawn is now pinned.
        assert_eq!(game.is_pinned(at("c6")), Ok(true));
        assert_eq!(game.is_pinned(at("d5")), Ok(false));
        assert_eq!(
            game.make_move(Color::White, at("e4"), at("d5")),
            MoveResult::ValidMove
        );
        assert_eq!(
            game.make_move(Color::Black, at("c6"), at("c5")),
            MoveResult::InvalidMove
        );
        assert_eq!(game.make_move(Color::Black, at("c6"), at("d5")), MoveResult::InvalidMove);
    }
}
