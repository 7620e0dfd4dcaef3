use crate::chess_errors::{ChessErrors, ChessResult};
use crate::game_state::board::Board;
use crate::game_state::chess_rules::{KINGSIDE_ROOK_FILE, ORTHOGONAL_DIRECTIONS, QUEENSIDE_ROOK_FILE};
use crate::game_state::chess_types::{Move, PieceKind, Square};
use crate::move_generation::legal_move_shared::{check_preconditions, slide_move, slide_destinations};
use crate::moves::king_moves::{castling_move, CastlingSide};

/// Rook rule. Moving a home-square rook onto its own king requests castling
/// on that rook's side; the resulting move is the king's.
pub fn can_rook_move(
    board: &mut Board,
    history: &[Move],
    source: Square,
    destination: Square,
) -> ChessResult<Move> {
    let rook = check_preconditions(board, source, destination, PieceKind::Rook)?;
    let onto_own_king = board
        .occupant_at(destination)
        .is_some_and(|piece| piece.kind == PieceKind::King && piece.color == rook.color);
    if !onto_own_king {
        return slide_move(board, source, destination, PieceKind::Rook, false, true);
    }

    let side = match source.file() {
        KINGSIDE_ROOK_FILE => CastlingSide::Kingside,
        QUEENSIDE_ROOK_FILE => CastlingSide::Queenside,
        _ => return Err(ChessErrors::CastlingNotAllowed("rook is not on its starting square")),
    };
    if source.rank() != rook.color.back_rank() {
        return Err(ChessErrors::CastlingNotAllowed("rook is not on its starting square"));
    }
    castling_move(board, history, rook.color, side)
}

#[inline]
pub fn rook_destinations(board: &Board, source: Square) -> Vec<Square> {
    slide_destinations(board, source, &ORTHOGONAL_DIRECTIONS)
}
