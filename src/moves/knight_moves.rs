use crate::chess_errors::ChessResult;
use crate::game_state::board::Board;
use crate::game_state::chess_rules::KNIGHT_OFFSETS;
use crate::game_state::chess_types::{Move, PieceKind, Square};
use crate::move_generation::legal_move_shared::{
    check_preconditions, confirm_king_safety, destination_kind, illegal_geometry,
    step_destinations,
};

pub fn can_knight_move(board: &mut Board, source: Square, destination: Square) -> ChessResult<Move> {
    let knight = check_preconditions(board, source, destination, PieceKind::Knight)?;
    let jump = (
        destination.file() - source.file(),
        destination.rank() - source.rank(),
    );
    if !KNIGHT_OFFSETS.contains(&jump) {
        return Err(illegal_geometry(PieceKind::Knight, source, destination));
    }
    let kind = destination_kind(board, knight, destination)?;
    confirm_king_safety(board, Move::new(source, destination, kind))
}

#[inline]
pub fn knight_destinations(source: Square) -> Vec<Square> {
    step_destinations(source, &KNIGHT_OFFSETS)
}
