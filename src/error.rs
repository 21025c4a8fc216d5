use crate::color::Color;
use crate::square::Square;
use failure::Fail;

/// Sometimes, bad stuff happens.
#[derive(Clone, Debug, PartialEq, Eq, Fail)]
pub enum Error {
    /// The destination is not one of the moves allowed for the piece on the source square.
    #[fail(display = "The piece on {} cannot move to {}", source, dest)]
    InvalidMove { source: Square, dest: Square },

    /// There is no piece on the requested square.
    #[fail(display = "No piece on {}", square)]
    NoPiece { square: Square },

    /// The piece on the requested square belongs to the side that is not on move.
    #[fail(display = "The piece on {} does not belong to {:?}", square, side_to_move)]
    WrongSide { square: Square, side_to_move: Color },

    /// A king lookup found zero, or more than one, king of this color.  The board was
    /// corrupted by an earlier placement; answering the query would give a wrong result.
    #[fail(display = "Expected exactly one {:?} king on the board", color)]
    KingNotFound { color: Color },

    /// The board created from BoardBuilder was found to be invalid
    #[fail(
        display = "The board specified did not pass sanity checks.  Does a side have two kings?"
    )]
    InvalidBoard,

    /// The square label is invalid
    #[fail(display = "Invalid square: {}", s)]
    InvalidSquare { s: String },

    /// The move string is invalid
    #[fail(display = "Invalid move: {}", s)]
    InvalidMoveString { s: String },
}
