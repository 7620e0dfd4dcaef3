//! Value types shared by every layer of the rules engine.
//!
//! Squares, colors, piece kinds, and moves are small `Copy` values with no
//! behavior beyond validity predicates and a few geometric helpers.

use std::fmt;

use crate::game_state::chess_rules::BOARD_SIZE;

/// Raw `(file, rank)` pair as supplied by a caller. Not yet bounds-checked.
pub type BoardLocation = (i8, i8);

/// A square on the board, `file` and `rank` both in `1..=8`.
///
/// Construction goes through [`Square::new`] or `TryFrom<BoardLocation>`, so
/// a `Square` value is always on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square {
    file: i8,
    rank: i8,
}

impl Square {
    #[inline]
    pub const fn new(file: i8, rank: i8) -> Option<Self> {
        if file >= 1 && file <= BOARD_SIZE && rank >= 1 && rank <= BOARD_SIZE {
            Some(Self { file, rank })
        } else {
            None
        }
    }

    #[inline]
    pub const fn file(self) -> i8 {
        self.file
    }

    #[inline]
    pub const fn rank(self) -> i8 {
        self.rank
    }

    #[inline]
    pub const fn location(self) -> BoardLocation {
        (self.file, self.rank)
    }

    /// Square reached by stepping `(d_file, d_rank)`, or `None` off the board.
    #[inline]
    pub const fn offset(self, d_file: i8, d_rank: i8) -> Option<Self> {
        Self::new(self.file + d_file, self.rank + d_rank)
    }

    /// Zero-based `(column, row)` into an 8x8 array.
    #[inline]
    pub(crate) const fn index(self) -> (usize, usize) {
        ((self.file - 1) as usize, (self.rank - 1) as usize)
    }

    /// Every square of the board, rank by rank from a1 to h8.
    pub fn all() -> impl Iterator<Item = Square> {
        (1..=BOARD_SIZE).flat_map(|rank| (1..=BOARD_SIZE).map(move |file| Square { file, rank }))
    }
}

impl TryFrom<BoardLocation> for Square {
    type Error = crate::chess_errors::ChessErrors;

    fn try_from(location: BoardLocation) -> Result<Self, Self::Error> {
        Square::new(location.0, location.1)
            .ok_or(crate::chess_errors::ChessErrors::OutOfBounds(location))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file_char = char::from(b'a' + (self.file - 1) as u8);
        write!(f, "{}{}", file_char, self.rank)
    }
}

/// Side of a piece or player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }

    #[inline]
    pub const fn enemy(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Rank delta of a single pawn step.
    #[inline]
    pub const fn pawn_direction(self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    #[inline]
    pub const fn pawn_start_rank(self) -> i8 {
        match self {
            Color::White => 2,
            Color::Black => BOARD_SIZE - 1,
        }
    }

    #[inline]
    pub const fn back_rank(self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => BOARD_SIZE,
        }
    }

    /// The far rank, where this color's pawns promote.
    #[inline]
    pub const fn promotion_rank(self) -> i8 {
        self.enemy().back_rank()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => f.write_str("white"),
            Color::Black => f.write_str("black"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Bishop,
    Knight,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// Whether a pawn may be promoted into this kind.
    #[inline]
    pub const fn is_promotion_target(self) -> bool {
        matches!(
            self,
            PieceKind::Knight | PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen
        )
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PieceKind::Pawn => "pawn",
            PieceKind::Bishop => "bishop",
            PieceKind::Knight => "knight",
            PieceKind::Rook => "rook",
            PieceKind::Queen => "queen",
            PieceKind::King => "king",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
}

impl Piece {
    #[inline]
    pub const fn new(kind: PieceKind, color: Color) -> Self {
        Self { kind, color }
    }
}

/// What side effects applying a [`Move`] performs, and therefore how it is reverted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveKind {
    Normal,
    Capture,
    Castling,
    EnPassant,
    Promotion,
    CapturePromotion,
}

impl MoveKind {
    #[inline]
    pub const fn is_capture(self) -> bool {
        matches!(
            self,
            MoveKind::Capture | MoveKind::EnPassant | MoveKind::CapturePromotion
        )
    }

    #[inline]
    pub const fn is_promotion(self) -> bool {
        matches!(self, MoveKind::Promotion | MoveKind::CapturePromotion)
    }
}

/// A move confirmed legal at the time it was produced.
///
/// For castling, `source` and `destination` are the king's squares; the rook
/// relocation is implied by the destination file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub source: Square,
    pub destination: Square,
    pub kind: MoveKind,
}

impl Move {
    #[inline]
    pub const fn new(source: Square, destination: Square, kind: MoveKind) -> Self {
        Self {
            source,
            destination,
            kind,
        }
    }

    /// Square of the piece this move removes, if any.
    ///
    /// En passant captures the pawn beside the source, on the destination file.
    pub fn captured_square(&self) -> Option<Square> {
        match self.kind {
            MoveKind::Capture | MoveKind::CapturePromotion => Some(self.destination),
            MoveKind::EnPassant => Square::new(self.destination.file(), self.source.rank()),
            MoveKind::Normal | MoveKind::Castling | MoveKind::Promotion => None,
        }
    }

    /// `(rook_from, rook_to)` for a castling move.
    pub fn rook_relocation(&self) -> Option<(Square, Square)> {
        if self.kind != MoveKind::Castling {
            return None;
        }
        crate::game_state::chess_rules::castling_rook_squares(self.destination)
    }

    /// True for a pawn-style two-rank jump along one file.
    #[inline]
    pub fn is_two_rank_advance(&self) -> bool {
        self.kind == MoveKind::Normal
            && self.source.file() == self.destination.file()
            && (self.destination.rank() - self.source.rank()).abs() == 2
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{} ({:?})", self.source, self.destination, self.kind)
    }
}

/// Outcome of a move request as reported to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveResult {
    InvalidMove,
    ValidMove,
    PromotionPending,
    Check,
    Checkmate,
    Stalemate,
}

/// Controller state between calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    AwaitingMove,
    /// A pawn stands on the given far-rank square waiting for its new kind.
    AwaitingPromotionChoice(Square),
    Checkmate {
        loser: Color,
    },
    Stalemate,
}

impl GameStatus {
    #[inline]
    pub const fn is_over(self) -> bool {
        matches!(self, GameStatus::Checkmate { .. } | GameStatus::Stalemate)
    }
}

/// Read-only view of one side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub color: Color,
    /// Pieces this player has taken from the opponent, oldest first.
    pub captured_pieces: Vec<Piece>,
    pub is_to_move: bool,
}
