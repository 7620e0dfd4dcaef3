//! Checks every movement rule starts and ends with.

use crate::chess_errors::{ChessErrors, ChessResult};
use crate::game_state::board::{line_direction, squares_between, Board};
use crate::game_state::chess_types::{Move, MoveKind, Piece, PieceKind, Square};
use crate::move_generation::legal_move_checks::would_expose_own_king;

/// Distinct squares and a `kind` piece on `source`. Returns the mover.
pub fn check_preconditions(
    board: &Board,
    source: Square,
    destination: Square,
    kind: PieceKind,
) -> ChessResult<Piece> {
    if source == destination {
        return Err(ChessErrors::SameSquare(source));
    }
    let mover = board
        .occupant_at(source)
        .ok_or(ChessErrors::EmptySource(source))?;
    if mover.kind != kind {
        return Err(ChessErrors::WrongPieceKind {
            square: source,
            expected: kind,
        });
    }
    Ok(mover)
}

/// `Normal` onto an empty square, `Capture` onto an enemy; friendly occupancy rejects.
pub fn destination_kind(board: &Board, mover: Piece, destination: Square) -> ChessResult<MoveKind> {
    match board.occupant_at(destination) {
        None => Ok(MoveKind::Normal),
        Some(piece) if piece.color != mover.color => Ok(MoveKind::Capture),
        Some(_) => Err(ChessErrors::OwnPieceOnDestination(destination)),
    }
}

/// Final gate: reject `mv` if it leaves the mover's king attacked.
pub fn confirm_king_safety(board: &mut Board, mv: Move) -> ChessResult<Move> {
    if would_expose_own_king(board, &mv) {
        return Err(ChessErrors::ExposesOwnKing {
            source_square: mv.source,
            destination: mv.destination,
        });
    }
    Ok(mv)
}

#[inline]
pub fn illegal_geometry(kind: PieceKind, source: Square, destination: Square) -> ChessErrors {
    ChessErrors::IllegalGeometry {
        kind,
        source_square: source,
        destination,
    }
}

/// Shared rule for bishops, rooks, and queens.
pub fn slide_move(
    board: &mut Board,
    source: Square,
    destination: Square,
    kind: PieceKind,
    diagonal: bool,
    orthogonal: bool,
) -> ChessResult<Move> {
    let mover = check_preconditions(board, source, destination, kind)?;
    let (d_file, d_rank) = line_direction(source, destination)
        .ok_or_else(|| illegal_geometry(kind, source, destination))?;
    let along_diagonal = d_file != 0 && d_rank != 0;
    if (along_diagonal && !diagonal) || (!along_diagonal && !orthogonal) {
        return Err(illegal_geometry(kind, source, destination));
    }
    if squares_between(source, destination)
        .into_iter()
        .any(|at| !board.is_empty(at))
    {
        return Err(ChessErrors::PathBlocked {
            source_square: source,
            destination,
        });
    }
    let move_kind = destination_kind(board, mover, destination)?;
    confirm_king_safety(board, Move::new(source, destination, move_kind))
}

/// Squares a slider on `source` could reach along `directions`, up to and
/// including the first occupied square of each ray.
pub fn slide_destinations(board: &Board, source: Square, directions: &[(i8, i8)]) -> Vec<Square> {
    let mut out = Vec::new();
    for &(d_file, d_rank) in directions {
        let mut at = source.offset(d_file, d_rank);
        while let Some(current) = at {
            out.push(current);
            if !board.is_empty(current) {
                break;
            }
            at = current.offset(d_file, d_rank);
        }
    }
    out
}

/// Squares at fixed `offsets` from `source` that are on the board.
pub fn step_destinations(source: Square, offsets: &[(i8, i8)]) -> Vec<Square> {
    offsets
        .iter()
        .filter_map(|&(d_file, d_rank)| source.offset(d_file, d_rank))
        .collect()
}
