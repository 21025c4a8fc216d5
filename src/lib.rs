//! A chess rules engine.
//!
//! The board is an 8x8 mailbox of `Piece`s.  Each piece generates its *raw* moves (what its
//! movement rule reaches, blockers and captures included), and `BoardPiece::valid_moves`
//! filters those down to the ones that do not leave the mover's own king in check by playing
//! each candidate on a duplicate board.  Check and checkmate detection build on the same two
//! move sets.
//!
//! ```
//! use chess_rules::{Board, Color, Square};
//!
//! let mut board = Board::new();
//! board
//!     .make_move(Square::make_square(1, 4), Square::make_square(2, 4))
//!     .expect("e2e3 is legal");
//! assert_eq!(board.is_checkmate(Color::Black), Ok(false));
//! ```
//!
//! Castling, en passant, promotion and draws are not modelled.

mod board;
pub use crate::board::*;

mod board_builder;
pub use crate::board_builder::*;

mod chess_move;
pub use crate::chess_move::*;

mod color;
pub use crate::color::*;

mod error;
pub use crate::error::*;

mod game;
pub use crate::game::*;

pub mod movegen;
pub use crate::movegen::MoveSet;

mod piece;
pub use crate::piece::*;

mod square;
pub use crate::square::*;
