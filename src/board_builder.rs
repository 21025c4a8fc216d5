use crate::board::Board;
use crate::color::{Color, ALL_COLORS};
use crate::error::Error;
use crate::piece::{Piece, PieceKind};
use crate::square::{Square, ALL_SQUARES, NUM_SQUARES};

use std::convert::TryFrom;
use std::fmt;
use std::ops::{Index, IndexMut};

/// Represents a chess position that has *not* been validated.
///
/// This structure is useful in the following cases:
/// * You are trying to build a chess board manually in code, for example an endgame.
/// * You want to display the chess position in a UI.
///
/// ```
/// use chess_rules::{BoardBuilder, Board, Square, Color, PieceKind};
/// use std::convert::TryFrom;
///
/// let a1 = Square::make_square(0, 0);
/// let a8 = Square::make_square(7, 0);
/// let d1 = Square::make_square(0, 3);
///
/// let mut position = BoardBuilder::new();
/// position.piece(a1, PieceKind::King, Color::White);
/// position.piece(a8, PieceKind::Rook, Color::Black);
/// position.piece(d1, PieceKind::King, Color::Black);
///
/// // You can index the position by the square:
/// assert_eq!(position[a1], Some((PieceKind::King, Color::White)));
///
/// let board = Board::try_from(&position).expect("one king per side");
/// assert_eq!(board.is_in_check(Color::White), Ok(true));
///
/// // A second black king is not a position the rules can reason about.
/// position.piece(Square::make_square(4, 4), PieceKind::King, Color::Black);
/// assert!(Board::try_from(position).is_err());
/// ```
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct BoardBuilder {
    pieces: [Option<(PieceKind, Color)>; NUM_SQUARES],
}

impl BoardBuilder {
    /// Construct a new, empty, BoardBuilder.
    pub fn new() -> BoardBuilder {
        BoardBuilder {
            pieces: [None; NUM_SQUARES],
        }
    }

    /// Set up a board with everything pre-loaded.
    ///
    /// ```
    /// use chess_rules::{BoardBuilder, Board, Square, Color, PieceKind};
    /// use std::convert::TryInto;
    ///
    /// # use chess_rules::Error;
    /// # fn main() -> Result<(), Error> {
    /// let board: Board = BoardBuilder::setup(&[
    ///     (Square::make_square(0, 0), PieceKind::King, Color::White),
    ///     (Square::make_square(7, 7), PieceKind::King, Color::Black),
    /// ])
    /// .try_into()?;
    /// assert_eq!(board.pieces(Color::Black).count(), 1);
    /// # Ok(())
    /// # }
    /// ```
    pub fn setup<'a>(
        pieces: impl IntoIterator<Item = &'a (Square, PieceKind, Color)>,
    ) -> BoardBuilder {
        let mut result = BoardBuilder::new();

        for piece in pieces.into_iter() {
            result.pieces[piece.0.to_index()] = Some((piece.1, piece.2));
        }

        result
    }

    /// Place a piece on a square, replacing whatever was there.
    pub fn piece<'a>(&'a mut self, square: Square, piece: PieceKind, color: Color) -> &'a mut Self {
        self[square] = Some((piece, color));
        self
    }

    /// Clear a square.
    pub fn clear_square<'a>(&'a mut self, square: Square) -> &'a mut Self {
        self[square] = None;
        self
    }

    /// How many kings of this color have been placed?
    fn king_count(&self, color: Color) -> usize {
        self.pieces
            .iter()
            .filter(|p| **p == Some((PieceKind::King, color)))
            .count()
    }
}

impl Index<Square> for BoardBuilder {
    type Output = Option<(PieceKind, Color)>;

    fn index<'a>(&'a self, index: Square) -> &'a Self::Output {
        &self.pieces[index.to_index()]
    }
}

impl IndexMut<Square> for BoardBuilder {
    fn index_mut<'a>(&'a mut self, index: Square) -> &'a mut Self::Output {
        &mut self.pieces[index.to_index()]
    }
}

impl fmt::Display for BoardBuilder {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match Board::try_from(self) {
            Ok(board) => write!(f, "{}", board),
            Err(e) => write!(f, "{}", e),
        }
    }
}

impl Default for BoardBuilder {
    /// The starting position.
    fn default() -> BoardBuilder {
        BoardBuilder::from(&Board::new())
    }
}

impl From<&Board> for BoardBuilder {
    fn from(board: &Board) -> Self {
        BoardBuilder {
            pieces: board.occupancy(),
        }
    }
}

impl From<Board> for BoardBuilder {
    fn from(board: Board) -> Self {
        (&board).into()
    }
}

impl TryFrom<&BoardBuilder> for Board {
    type Error = Error;

    /// Fails with `Error::InvalidBoard` if either side has more than one king.
    fn try_from(builder: &BoardBuilder) -> Result<Self, Self::Error> {
        if ALL_COLORS.iter().any(|&color| builder.king_count(color) > 1) {
            return Err(Error::InvalidBoard);
        }

        let mut board = Board::empty();
        for sq in ALL_SQUARES.iter() {
            if let Some((kind, color)) = builder[*sq] {
                board.set(*sq, Some(Piece::new(kind, color, *sq)));
            }
        }
        Ok(board)
    }
}

impl TryFrom<&mut BoardBuilder> for Board {
    type Error = Error;

    fn try_from(builder: &mut BoardBuilder) -> Result<Self, Self::Error> {
        Board::try_from(&*builder)
    }
}

impl TryFrom<BoardBuilder> for Board {
    type Error = Error;

    fn try_from(builder: BoardBuilder) -> Result<Self, Self::Error> {
        Board::try_from(&builder)
    }
}

#[cfg(test)]
use std::convert::TryInto;

#[test]
fn check_initial_position() {
    let builder: BoardBuilder = Board::new().into();
    let board: Board = builder.try_into().unwrap();
    assert_eq!(board, Board::new());
    assert_eq!(BoardBuilder::default(), builder);
}

#[test]
fn two_white_kings() {
    let res: Result<Board, _> = BoardBuilder::new()
        .piece(Square::make_square(0, 0), PieceKind::King, Color::White)
        .piece(Square::make_square(0, 7), PieceKind::King, Color::White)
        .try_into();
    assert_eq!(res, Err(Error::InvalidBoard));
}

#[test]
fn kingless_boards_are_allowed() {
    let res: Result<Board, _> = BoardBuilder::new()
        .piece(Square::make_square(3, 3), PieceKind::Rook, Color::White)
        .try_into();
    assert!(res.is_ok());
}

#[test]
fn clear_square_removes_a_piece() {
    let mut builder = BoardBuilder::default();
    let e2 = Square::make_square(1, 4);
    builder.clear_square(e2);
    assert_eq!(builder[e2], None);

    let board: Board = (&builder).try_into().unwrap();
    assert_eq!(board.get(e2), None);
    assert_eq!(board.pieces(Color::White).count(), 15);
}

#[test]
fn display_falls_back_to_the_error() {
    let mut builder = BoardBuilder::new();
    builder
        .piece(Square::make_square(0, 0), PieceKind::King, Color::Black)
        .piece(Square::make_square(0, 1), PieceKind::King, Color::Black);
    assert!(builder.to_string().contains("two kings"));
}
