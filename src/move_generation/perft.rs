//! Move-path enumeration over the game controller.
//!
//! Each node is played with the same apply/classify path `make_move` uses and
//! taken back with `undo`, so perft exercises generation, application,
//! reversal, and post-move classification together. A pawn move onto the far
//! rank expands into one child per promotion kind. The walk runs on a copy of
//! the game; the caller's history and redo stack are left as they were.

use crate::chess_errors::{ChessErrors, ChessResult};
use crate::game_state::chess_rules::PROMOTION_TARGETS;
use crate::game_state::chess_types::{GameStatus, Move, MoveKind, MoveResult};
use crate::game_state::game_state::GameState;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: usize,
    pub captures: usize,
    pub en_passant: usize,
    pub castles: usize,
    pub promotions: usize,
    pub checks: usize,
    pub checkmates: usize,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.en_passant += rhs.en_passant;
        self.castles += rhs.castles;
        self.promotions += rhs.promotions;
        self.checks += rhs.checks;
        self.checkmates += rhs.checkmates;
    }

    fn leaf(mv: &Move, result: MoveResult) -> Self {
        PerftCounts {
            nodes: 1,
            captures: usize::from(mv.kind.is_capture()),
            en_passant: usize::from(mv.kind == MoveKind::EnPassant),
            castles: usize::from(mv.kind == MoveKind::Castling),
            promotions: usize::from(mv.kind.is_promotion()),
            checks: usize::from(matches!(result, MoveResult::Check | MoveResult::Checkmate)),
            checkmates: usize::from(result == MoveResult::Checkmate),
        }
    }
}

/// Count leaf nodes `depth` plies below the current position, with per-leaf
/// statistics.
///
/// Fails with `PromotionPending` while a pawn on the far rank still waits for
/// its promotion choice.
pub fn perft(game: &GameState, depth: u8) -> ChessResult<PerftCounts> {
    if let GameStatus::AwaitingPromotionChoice(at) = game.status() {
        return Err(ChessErrors::PromotionPending(at));
    }
    let mut scratch = game.clone();
    count_nodes(&mut scratch, depth)
}

fn count_nodes(game: &mut GameState, depth: u8) -> ChessResult<PerftCounts> {
    if depth == 0 {
        return Ok(PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        });
    }

    let mut total = PerftCounts::default();
    for mv in game.legal_moves(game.to_move()) {
        if mv.kind.is_promotion() {
            for kind in PROMOTION_TARGETS {
                game.play_legal(mv);
                let result = game.promote(mv.destination.location(), kind);
                let child = result.and_then(|result| descend(game, &mv, result, depth));
                game.undo();
                total.merge(child?);
            }
        } else {
            let result = game.play_legal(mv);
            let child = descend(game, &mv, result, depth);
            game.undo();
            total.merge(child?);
        }
    }

    Ok(total)
}

fn descend(game: &mut GameState, mv: &Move, result: MoveResult, depth: u8) -> ChessResult<PerftCounts> {
    if depth == 1 {
        Ok(PerftCounts::leaf(mv, result))
    } else {
        count_nodes(game, depth - 1)
    }
}
