//! Mailbox board: which piece stands on which square.
//!
//! The board holds no rules beyond containment queries, king location, and the
//! attacker computation that check detection and the movement rules build on.

use std::collections::BTreeMap;
use std::fmt;

use crate::game_state::chess_rules::{
    BACK_RANK_LAYOUT, BOARD_SIZE, DIAGONAL_DIRECTIONS, KING_OFFSETS, KNIGHT_OFFSETS,
    ORTHOGONAL_DIRECTIONS,
};
use crate::game_state::chess_types::{Color, Piece, PieceKind, Square};
use crate::utils::render_game_state::render_board;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Board {
    buffer: [[Option<Piece>; 8]; 8],
}

impl Board {
    pub fn new_empty() -> Self {
        Self::default()
    }

    /// Standard starting position.
    pub fn new_standard() -> Self {
        let mut board = Self::default();
        for (file, kind) in (1..=BOARD_SIZE).zip(BACK_RANK_LAYOUT) {
            for color in [Color::White, Color::Black] {
                board.place(square(file, color.back_rank()), Piece::new(kind, color));
                board.place(
                    square(file, color.pawn_start_rank()),
                    Piece::new(PieceKind::Pawn, color),
                );
            }
        }
        board
    }

    pub fn from_pieces<I>(pieces: I) -> Self
    where
        I: IntoIterator<Item = (Square, Piece)>,
    {
        let mut board = Self::default();
        for (at, piece) in pieces {
            board.place(at, piece);
        }
        board
    }

    #[inline]
    pub fn occupant_at(&self, at: Square) -> Option<Piece> {
        let (file, rank) = at.index();
        self.buffer[file][rank]
    }

    #[inline]
    pub fn is_empty(&self, at: Square) -> bool {
        self.occupant_at(at).is_none()
    }

    /// Put `piece` on `at`, returning whatever stood there before.
    #[inline]
    pub fn place(&mut self, at: Square, piece: Piece) -> Option<Piece> {
        let (file, rank) = at.index();
        self.buffer[file][rank].replace(piece)
    }

    #[inline]
    pub fn remove(&mut self, at: Square) -> Option<Piece> {
        let (file, rank) = at.index();
        self.buffer[file][rank].take()
    }

    /// Raw write used to restore a saved square, including an empty one.
    #[inline]
    pub(crate) fn restore(&mut self, at: Square, occupant: Option<Piece>) {
        let (file, rank) = at.index();
        self.buffer[file][rank] = occupant;
    }

    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |at| self.occupant_at(at).map(|piece| (at, piece)))
    }

    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.pieces().filter(move |(_, piece)| piece.color == color)
    }

    pub fn count_kings(&self, color: Color) -> usize {
        self.pieces_of(color)
            .filter(|(_, piece)| piece.kind == PieceKind::King)
            .count()
    }

    /// Square of `color`'s king.
    ///
    /// # Panics
    ///
    /// Panics when the king is missing. A game in progress can never reach a
    /// kingless board, so this signals corrupted state.
    pub fn king_square(&self, color: Color) -> Square {
        match self
            .pieces_of(color)
            .find(|(_, piece)| piece.kind == PieceKind::King)
        {
            Some((at, _)) => at,
            None => {
                tracing::error!(%color, "king not found on board");
                panic!("corrupted board: {color} king not found");
            }
        }
    }

    /// Every square holding a `by_color` piece that attacks `target`.
    pub fn attackers(&self, target: Square, by_color: Color) -> Vec<Square> {
        let mut attackers = Vec::new();
        let holds = |at: Square, kinds: &[PieceKind]| {
            self.occupant_at(at)
                .is_some_and(|piece| piece.color == by_color && kinds.contains(&piece.kind))
        };

        // A pawn attacks diagonally forward, so look one rank behind the target.
        let behind = -by_color.pawn_direction();
        for d_file in [-1, 1] {
            if let Some(from) = target.offset(d_file, behind) {
                if holds(from, &[PieceKind::Pawn]) {
                    attackers.push(from);
                }
            }
        }

        for (d_file, d_rank) in KNIGHT_OFFSETS {
            if let Some(from) = target.offset(d_file, d_rank) {
                if holds(from, &[PieceKind::Knight]) {
                    attackers.push(from);
                }
            }
        }

        for (d_file, d_rank) in KING_OFFSETS {
            if let Some(from) = target.offset(d_file, d_rank) {
                if holds(from, &[PieceKind::King]) {
                    attackers.push(from);
                }
            }
        }

        for direction in DIAGONAL_DIRECTIONS {
            if let Some((from, _)) = self.first_occupied(target, direction) {
                if holds(from, &[PieceKind::Bishop, PieceKind::Queen]) {
                    attackers.push(from);
                }
            }
        }

        for direction in ORTHOGONAL_DIRECTIONS {
            if let Some((from, _)) = self.first_occupied(target, direction) {
                if holds(from, &[PieceKind::Rook, PieceKind::Queen]) {
                    attackers.push(from);
                }
            }
        }

        attackers
    }

    #[inline]
    pub fn is_attacked(&self, target: Square, by_color: Color) -> bool {
        !self.attackers(target, by_color).is_empty()
    }

    pub fn is_in_check(&self, color: Color) -> bool {
        self.is_attacked(self.king_square(color), color.enemy())
    }

    /// First occupied square walking from `from` (exclusive) in `direction`.
    pub fn first_occupied(&self, from: Square, direction: (i8, i8)) -> Option<(Square, Piece)> {
        let mut at = from.offset(direction.0, direction.1);
        while let Some(current) = at {
            if let Some(piece) = self.occupant_at(current) {
                return Some((current, piece));
            }
            at = current.offset(direction.0, direction.1);
        }
        None
    }

    /// Read-only copy of the occupied squares.
    pub fn snapshot(&self) -> BTreeMap<Square, Piece> {
        self.pieces().collect()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render_board(self))
    }
}

/// Unit step from `a` towards `b` when both share a rank, file, or diagonal.
pub fn line_direction(a: Square, b: Square) -> Option<(i8, i8)> {
    let d_file = b.file() - a.file();
    let d_rank = b.rank() - a.rank();
    if (d_file, d_rank) == (0, 0) {
        return None;
    }
    if d_file == 0 || d_rank == 0 || d_file.abs() == d_rank.abs() {
        Some((d_file.signum(), d_rank.signum()))
    } else {
        None
    }
}

/// Squares strictly between `a` and `b`; empty when they are not aligned.
pub fn squares_between(a: Square, b: Square) -> Vec<Square> {
    let Some((d_file, d_rank)) = line_direction(a, b) else {
        return Vec::new();
    };
    let mut between = Vec::new();
    let mut at = a.offset(d_file, d_rank);
    while let Some(current) = at {
        if current == b {
            break;
        }
        between.push(current);
        at = current.offset(d_file, d_rank);
    }
    between
}

#[inline]
fn square(file: i8, rank: i8) -> Square {
    match Square::new(file, rank) {
        Some(at) => at,
        None => unreachable!("starting layout stays on the board"),
    }
}
