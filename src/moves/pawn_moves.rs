use crate::chess_errors::{ChessErrors, ChessResult};
use crate::game_state::board::Board;
use crate::game_state::chess_types::{Color, Move, MoveKind, PieceKind, Square};
use crate::move_generation::legal_move_shared::{
    check_preconditions, confirm_king_safety, illegal_geometry,
};

/// Pawn rule: single and double advances, diagonal captures, promotion on the
/// far rank, and en passant right after an enemy double advance.
pub fn can_pawn_move(
    board: &mut Board,
    history: &[Move],
    source: Square,
    destination: Square,
) -> ChessResult<Move> {
    let pawn = check_preconditions(board, source, destination, PieceKind::Pawn)?;
    let color = pawn.color;
    let forward = color.pawn_direction();
    let d_file = destination.file() - source.file();
    let d_rank = destination.rank() - source.rank();
    let promotes = destination.rank() == color.promotion_rank();
    let blocked = ChessErrors::PathBlocked {
        source_square: source,
        destination,
    };

    let kind = if d_file == 0 && d_rank == forward {
        if !board.is_empty(destination) {
            return Err(blocked);
        }
        if promotes {
            MoveKind::Promotion
        } else {
            MoveKind::Normal
        }
    } else if d_file == 0 && d_rank == 2 * forward {
        if source.rank() != color.pawn_start_rank() {
            return Err(illegal_geometry(PieceKind::Pawn, source, destination));
        }
        let passed = source
            .offset(0, forward)
            .ok_or_else(|| illegal_geometry(PieceKind::Pawn, source, destination))?;
        if !board.is_empty(passed) || !board.is_empty(destination) {
            return Err(blocked);
        }
        MoveKind::Normal
    } else if d_file.abs() == 1 && d_rank == forward {
        match board.occupant_at(destination) {
            Some(piece) if piece.color == color => {
                return Err(ChessErrors::OwnPieceOnDestination(destination));
            }
            Some(_) if promotes => MoveKind::CapturePromotion,
            Some(_) => MoveKind::Capture,
            None if en_passant_available(board, history, color, source, destination) => {
                MoveKind::EnPassant
            }
            None => return Err(ChessErrors::EnPassantUnavailable(destination)),
        }
    } else {
        return Err(illegal_geometry(PieceKind::Pawn, source, destination));
    };

    confirm_king_safety(board, Move::new(source, destination, kind))
}

/// The previous ply must be an enemy pawn's double advance that landed beside
/// `source`, on the file of `destination`.
fn en_passant_available(
    board: &Board,
    history: &[Move],
    color: Color,
    source: Square,
    destination: Square,
) -> bool {
    let Some(last) = history.last() else {
        return false;
    };
    let Some(bypassed) = Square::new(destination.file(), source.rank()) else {
        return false;
    };
    last.is_two_rank_advance()
        && last.destination == bypassed
        && board
            .occupant_at(bypassed)
            .is_some_and(|piece| piece.kind == PieceKind::Pawn && piece.color == color.enemy())
}

/// Forward steps and both forward diagonals.
pub fn pawn_destinations(source: Square, color: Color) -> Vec<Square> {
    let forward = color.pawn_direction();
    [(0, forward), (0, 2 * forward), (-1, forward), (1, forward)]
        .into_iter()
        .filter_map(|(d_file, d_rank)| source.offset(d_file, d_rank))
        .collect()
}
