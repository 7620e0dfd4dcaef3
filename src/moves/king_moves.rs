use crate::chess_errors::{ChessErrors, ChessResult};
use crate::game_state::board::{squares_between, Board};
use crate::game_state::chess_rules::{
    KINGSIDE_KING_DESTINATION_FILE, KINGSIDE_ROOK_FILE, KING_OFFSETS, KING_START_FILE,
    QUEENSIDE_KING_DESTINATION_FILE, QUEENSIDE_ROOK_FILE,
};
use crate::game_state::chess_types::{Color, Move, MoveKind, Piece, PieceKind, Square};
use crate::move_generation::legal_move_checks::would_expose_own_king;
use crate::move_generation::legal_move_shared::{
    check_preconditions, destination_kind, illegal_geometry, step_destinations,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CastlingSide {
    Kingside,
    Queenside,
}

impl CastlingSide {
    const fn rook_file(self) -> i8 {
        match self {
            CastlingSide::Kingside => KINGSIDE_ROOK_FILE,
            CastlingSide::Queenside => QUEENSIDE_ROOK_FILE,
        }
    }

    const fn king_destination_file(self) -> i8 {
        match self {
            CastlingSide::Kingside => KINGSIDE_KING_DESTINATION_FILE,
            CastlingSide::Queenside => QUEENSIDE_KING_DESTINATION_FILE,
        }
    }
}

/// King rule: one step in any direction onto an unattacked square, or a
/// two-file slide along the back rank requesting castling.
pub fn can_king_move(
    board: &mut Board,
    history: &[Move],
    source: Square,
    destination: Square,
) -> ChessResult<Move> {
    let king = check_preconditions(board, source, destination, PieceKind::King)?;
    let d_file = destination.file() - source.file();
    let d_rank = destination.rank() - source.rank();

    if d_rank == 0 && d_file.abs() == 2 {
        let side = if d_file > 0 {
            CastlingSide::Kingside
        } else {
            CastlingSide::Queenside
        };
        let mv = castling_move(board, history, king.color, side)?;
        if mv.source != source {
            return Err(ChessErrors::CastlingNotAllowed(
                "king is not on its starting square",
            ));
        }
        return Ok(mv);
    }

    if !KING_OFFSETS.contains(&(d_file, d_rank)) {
        return Err(illegal_geometry(PieceKind::King, source, destination));
    }
    let kind = destination_kind(board, king, destination)?;
    let mv = Move::new(source, destination, kind);
    if would_expose_own_king(board, &mv) {
        return Err(ChessErrors::KingStepsIntoCheck(destination));
    }
    Ok(mv)
}

/// Castling for `color` on `side`, shared by the king and rook call paths.
///
/// Whether king or rook moved before is read off the history: any earlier
/// move that started or ended on either home square disqualifies it.
pub fn castling_move(
    board: &Board,
    history: &[Move],
    color: Color,
    side: CastlingSide,
) -> ChessResult<Move> {
    let rank = color.back_rank();
    let (Some(king_from), Some(rook_from), Some(king_to)) = (
        Square::new(KING_START_FILE, rank),
        Square::new(side.rook_file(), rank),
        Square::new(side.king_destination_file(), rank),
    ) else {
        return Err(ChessErrors::CastlingNotAllowed("castling squares are off the board"));
    };

    if board.occupant_at(king_from) != Some(Piece::new(PieceKind::King, color)) {
        return Err(ChessErrors::CastlingNotAllowed(
            "king is not on its starting square",
        ));
    }
    if board.occupant_at(rook_from) != Some(Piece::new(PieceKind::Rook, color)) {
        return Err(ChessErrors::CastlingNotAllowed(
            "rook is not on its starting square",
        ));
    }
    if has_been_touched(history, king_from) {
        return Err(ChessErrors::CastlingNotAllowed("king has already moved"));
    }
    if has_been_touched(history, rook_from) {
        return Err(ChessErrors::CastlingNotAllowed("rook has already moved"));
    }
    if squares_between(king_from, rook_from)
        .into_iter()
        .any(|at| !board.is_empty(at))
    {
        return Err(ChessErrors::CastlingNotAllowed(
            "squares between king and rook are occupied",
        ));
    }

    let enemy = color.enemy();
    if board.is_attacked(king_from, enemy) {
        return Err(ChessErrors::CastlingNotAllowed("king is in check"));
    }
    let mut path = squares_between(king_from, king_to);
    path.push(king_to);
    if path.into_iter().any(|at| board.is_attacked(at, enemy)) {
        return Err(ChessErrors::CastlingNotAllowed(
            "king would cross an attacked square",
        ));
    }

    Ok(Move::new(king_from, king_to, MoveKind::Castling))
}

fn has_been_touched(history: &[Move], home: Square) -> bool {
    history
        .iter()
        .any(|mv| mv.source == home || mv.destination == home)
}

/// Adjacent squares, plus the two castling targets for a king on its home square.
pub fn king_destinations(source: Square, color: Color) -> Vec<Square> {
    let mut out = step_destinations(source, &KING_OFFSETS);
    if source.file() == KING_START_FILE && source.rank() == color.back_rank() {
        out.extend(step_destinations(source, &[(2, 0), (-2, 0)]));
    }
    out
}
