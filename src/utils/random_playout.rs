//! Seeded random playouts through the public controller API.
//!
//! Every ply picks uniformly among the generated legal moves and submits it
//! with `make_move`, so a playout cross-checks generation against validation:
//! a generated move the controller rejects is reported as an error.

use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::chess_errors::{ChessErrors, ChessResult};
use crate::game_state::chess_rules::PROMOTION_TARGETS;
use crate::game_state::chess_types::{Color, GameStatus, MoveResult};
use crate::game_state::game_state::GameState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayoutConfig {
    pub max_plies: u16,
    pub seed: u64,
}

impl Default for PlayoutConfig {
    fn default() -> Self {
        Self {
            max_plies: 200,
            seed: 0x5eed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayoutOutcome {
    Checkmate { loser: Color },
    Stalemate,
    MaxPlies,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayoutSummary {
    pub outcome: PlayoutOutcome,
    pub plies: usize,
    /// Result of each ply, after any promotion choice.
    pub results: Vec<MoveResult>,
}

/// Play random legal moves on `game` until it ends or `max_plies` are played.
pub fn play_random_game(game: &mut GameState, config: &PlayoutConfig) -> ChessResult<PlayoutSummary> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut results = Vec::new();

    while results.len() < usize::from(config.max_plies) && !game.status().is_over() {
        let color = game.to_move();
        let legal = game.legal_moves(color);
        if legal.is_empty() {
            break;
        }
        let mv = legal[rng.random_range(0..legal.len())];

        let mut result = game.make_move(color, mv.source.location(), mv.destination.location());
        if result == MoveResult::PromotionPending {
            let kind = PROMOTION_TARGETS[rng.random_range(0..PROMOTION_TARGETS.len())];
            result = game.promote(mv.destination.location(), kind)?;
        }
        if result == MoveResult::InvalidMove {
            tracing::error!(%mv, %color, seed = config.seed, "generated move rejected");
            return Err(ChessErrors::RejectedGeneratedMove(mv));
        }
        results.push(result);
    }

    let outcome = match game.status() {
        GameStatus::Checkmate { loser } => PlayoutOutcome::Checkmate { loser },
        GameStatus::Stalemate => PlayoutOutcome::Stalemate,
        GameStatus::AwaitingMove | GameStatus::AwaitingPromotionChoice(_) => {
            PlayoutOutcome::MaxPlies
        }
    };
    tracing::debug!(seed = config.seed, plies = results.len(), ?outcome, "playout finished");

    Ok(PlayoutSummary {
        outcome,
        plies: results.len(),
        results,
    })
}
