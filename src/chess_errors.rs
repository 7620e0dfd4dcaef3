//! Errors used throughout the rules engine.
//!
//! `ChessErrors` is the single error type of the crate. Movement rules return
//! it to explain why a move was rejected; the game controller folds those
//! rejections into `MoveResult::InvalidMove` and logs the reason. Promotion
//! requests and position setup surface it directly to the caller.
//!
//! Corrupted internal state (a board without a king, a ledger that runs dry
//! during undo) is not represented here: those paths panic.

use thiserror::Error;

use crate::game_state::chess_types::{BoardLocation, Color, Move, PieceKind, Square};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChessErrors {
    /// A coordinate fell outside `1..=8`.
    #[error("location {0:?} is off the board")]
    OutOfBounds(BoardLocation),

    #[error("source and destination are both {0}")]
    SameSquare(Square),

    #[error("no piece on {0}")]
    EmptySource(Square),

    #[error("piece on {square} does not belong to {expected}")]
    WrongColor { square: Square, expected: Color },

    #[error("it is not {0}'s turn")]
    NotYourTurn(Color),

    #[error("the game is over")]
    GameOver,

    #[error("a promotion choice is pending on {0}")]
    PromotionPending(Square),

    /// A movement rule was handed a piece of another kind.
    #[error("piece on {square} is not a {expected}")]
    WrongPieceKind { square: Square, expected: PieceKind },

    #[error("{0} is occupied by a friendly piece")]
    OwnPieceOnDestination(Square),

    #[error("a {kind} cannot move from {source_square} to {destination}")]
    IllegalGeometry {
        kind: PieceKind,
        source_square: Square,
        destination: Square,
    },

    #[error("path from {source_square} to {destination} is blocked")]
    PathBlocked {
        source_square: Square,
        destination: Square,
    },

    #[error("moving from {source_square} to {destination} leaves the king attacked")]
    ExposesOwnKing {
        source_square: Square,
        destination: Square,
    },

    #[error("the king cannot step onto attacked square {0}")]
    KingStepsIntoCheck(Square),

    #[error("castling not allowed: {0}")]
    CastlingNotAllowed(&'static str),

    #[error("en passant onto {0} is not available")]
    EnPassantUnavailable(Square),

    #[error("no promotion is pending")]
    NoPromotionPending,

    #[error("no pending promotion on {0}")]
    InvalidPromotionSquare(Square),

    #[error("a pawn cannot promote to a {0}")]
    InvalidPromotionKind(PieceKind),

    /// A caller-supplied setup or diagram could not start a game.
    #[error("invalid position: {0}")]
    InvalidPosition(String),

    /// The controller refused a move the generator produced for it.
    #[error("generated move {0} was rejected")]
    RejectedGeneratedMove(Move),
}

pub type ChessResult<T> = Result<T, ChessErrors>;
