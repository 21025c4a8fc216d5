use crate::board::Board;
use crate::chess_move::ChessMove;
use crate::color::Color;
use crate::error::Error;
use log::info;

/// What was the result of this game?
#[derive(Copy, Clone, PartialEq, PartialOrd, Eq, Ord, Debug, Hash)]
pub enum GameResult {
    WhiteCheckmates,
    BlackCheckmates,
}

/// A board plus whose turn it is.  This is the turn loop's view of the rules: it refuses to
/// move the wrong side's pieces and hands the rest to `Board::make_move`.
#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    side_to_move: Color,
}

impl Game {
    /// Create a new `Game` with the initial position, White to move.
    ///
    /// ```
    /// use chess_rules::{Game, Board, Color};
    ///
    /// let game = Game::new();
    /// assert_eq!(game.current_position(), &Board::new());
    /// assert_eq!(game.side_to_move(), Color::White);
    /// ```
    pub fn new() -> Game {
        Game::new_with_board(Board::new(), Color::White)
    }

    /// Create a new `Game` with a specific position and side to move.
    pub fn new_with_board(board: Board, side_to_move: Color) -> Game {
        Game {
            board,
            side_to_move,
        }
    }

    /// Get the current position on the board.
    pub fn current_position(&self) -> &Board {
        &self.board
    }

    /// Who's turn is it to move?
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// Has the side to move been checkmated?
    ///
    /// ```
    /// use chess_rules::Game;
    ///
    /// let game = Game::new();
    /// assert_eq!(game.result(), Ok(None));
    /// ```
    pub fn result(&self) -> Result<Option<GameResult>, Error> {
        if !self.board.is_checkmate(self.side_to_move)? {
            return Ok(None);
        }
        Ok(Some(match self.side_to_move {
            Color::White => GameResult::BlackCheckmates,
            Color::Black => GameResult::WhiteCheckmates,
        }))
    }

    /// Play a move for the side to move, then pass the turn.
    ///
    /// Fails with `Error::NoPiece` for an empty source square, `Error::WrongSide` for the
    /// opponent's piece, and `Error::InvalidMove` for an illegal destination.  A failed move
    /// leaves the game unchanged.
    ///
    /// ```
    /// use chess_rules::{Game, ChessMove, Color, Error};
    ///
    /// let mut game = Game::new();
    /// let e7e6: ChessMove = "e7e6".parse().expect("valid move string");
    /// assert!(matches!(game.make_move(e7e6), Err(Error::WrongSide { .. })));
    ///
    /// game.make_move("e2e3".parse().expect("valid move string")).expect("legal");
    /// game.make_move(e7e6).expect("legal");
    /// assert_eq!(game.side_to_move(), Color::White);
    /// ```
    pub fn make_move(&mut self, chess_move: ChessMove) -> Result<(), Error> {
        let source = chess_move.get_source();
        let piece = self.board.piece_at(source)?;
        if piece.color() != self.side_to_move {
            return Err(Error::WrongSide {
                square: source,
                side_to_move: self.side_to_move,
            });
        }

        self.board.make_move(source, chess_move.get_dest())?;
        info!("{:?} played {}", self.side_to_move, chess_move);
        self.side_to_move = !self.side_to_move;
        Ok(())
    }
}

impl Default for Game {
    fn default() -> Game {
        Game::new()
    }
}

#[cfg(test)]
pub fn play(moves: &str) -> Game {
    let mut game = Game::new();
    for mv in moves.split(';') {
        game.make_move(mv.parse().unwrap()).unwrap();
    }
    game
}

#[test]
fn three_move_mate_with_single_steps() {
    let game = play("f2f3; e7e6; g2g3; a7a6; g3g4; d8h4");
    assert_eq!(game.side_to_move(), Color::White);
    assert_eq!(game.current_position().is_in_check(Color::White), Ok(true));
    assert_eq!(game.result(), Ok(Some(GameResult::BlackCheckmates)));
}

#[test]
fn not_mate_if_the_check_can_be_blocked() {
    // with the g-pawn still on g2 it can step into the diagonal
    let game = play("f2f3; e7e6; a2a3; d8h4");
    assert_eq!(game.current_position().is_in_check(Color::White), Ok(true));
    assert_eq!(game.result(), Ok(None));
}

#[test]
fn failed_moves_keep_the_turn() {
    let mut game = Game::new();
    let before = game.current_position().clone();

    assert_eq!(
        game.make_move("e4e5".parse().unwrap()),
        Err(Error::NoPiece {
            square: "e4".parse().unwrap()
        })
    );
    assert!(game.make_move("d1d3".parse().unwrap()).is_err());
    assert_eq!(game.current_position(), &before);
    assert_eq!(game.side_to_move(), Color::White);
}

#[test]
fn a_check_must_be_answered() {
    let mut game = play("f2f3; e7e6; a2a3; d8h4");
    // h2 pawn pushing does nothing about the queen
    assert!(matches!(
        game.make_move("h2h3".parse().unwrap()),
        Err(Error::InvalidMove { .. })
    ));
    game.make_move("g2g3".parse().unwrap()).unwrap();
    assert_eq!(game.side_to_move(), Color::Black);
}
