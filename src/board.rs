use crate::color::{Color, ALL_COLORS};
use crate::error::Error;
use crate::movegen::{self, MoveSet};
use crate::piece::{Piece, PieceKind};
use crate::square::{Square, ALL_SQUARES, NUM_SQUARES};
use log::{debug, error, trace};
use std::fmt;

/// The back rank, from the a-file to the h-file.
const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// A representation of a chess board.  That's why you're here, right?
///
/// The board is a plain 8x8 mailbox: each square holds at most one `Piece`, and each piece
/// remembers the square it stands on.  Moves mutate the board in place.
///
/// Board states uphold:
/// * at most one king per color;
/// * every stored piece's square is the square it is stored on.
#[derive(Clone, PartialEq, Eq, Debug, Hash)]
pub struct Board {
    squares: [Option<Piece>; NUM_SQUARES],
}

/// A piece together with the board it stands on.
///
/// This is how a piece looks at other pieces when it generates moves.  The borrow ties it to
/// one board: a `BoardPiece` taken from a duplicate sees the duplicate, never the original.
#[derive(Copy, Clone, Debug)]
pub struct BoardPiece<'a> {
    board: &'a Board,
    piece: Piece,
}

impl<'a> BoardPiece<'a> {
    #[inline]
    pub fn piece(&self) -> Piece {
        self.piece
    }

    #[inline]
    pub fn kind(&self) -> PieceKind {
        self.piece.kind()
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.piece.color()
    }

    #[inline]
    pub fn square(&self) -> Square {
        self.piece.square()
    }

    #[inline]
    pub fn board(&self) -> &'a Board {
        self.board
    }

    /// Every square this piece can physically reach, ignoring whether its own king would be
    /// left in check.
    #[inline]
    pub fn moves(&self) -> MoveSet {
        movegen::raw_moves(self.board, &self.piece)
    }

    /// The subset of `moves()` that does not leave this piece's own king in check.
    ///
    /// Each candidate is played with `make_move_raw` on a duplicate of the board, and the
    /// duplicate is asked whether the mover is in check.  `is_in_check` only looks at raw
    /// moves, so the simulation never nests.
    ///
    /// ```
    /// use chess_rules::{Board, Square};
    ///
    /// let board = Board::new();
    /// let pawn = board.piece_at(Square::make_square(1, 4)).expect("e2 pawn");
    /// let moves = pawn.valid_moves().expect("both kings on the board");
    /// assert_eq!(moves.as_slice(), &[Square::make_square(2, 4)]);
    /// ```
    pub fn valid_moves(&self) -> Result<MoveSet, Error> {
        let source = self.square();
        let color = self.color();
        let mut legal = MoveSet::new();

        for dest in self.moves() {
            let mut sandbox = self.board.duplicate();
            sandbox.make_move_raw(source, dest)?;
            if sandbox.is_in_check(color)? {
                trace!("{} {} would expose its king", source, dest);
            } else {
                legal.push(dest);
            }
        }

        Ok(legal)
    }
}

impl Board {
    /// Construct a board in the standard starting position.
    ///
    /// ```
    /// use chess_rules::{Board, Color, PieceKind, Square};
    ///
    /// let board = Board::new();
    /// assert_eq!(
    ///     board.piece_on(Square::make_square(0, 4)),
    ///     Some((PieceKind::King, Color::White))
    /// );
    /// assert_eq!(board.piece_on(Square::make_square(4, 4)), None);
    /// ```
    pub fn new() -> Board {
        let mut board = Board::empty();
        for &color in ALL_COLORS.iter() {
            for (file, &kind) in BACK_RANK.iter().enumerate() {
                let back = Square::make_square(color.to_my_backrank(), file as u8);
                board.set(back, Some(Piece::new(kind, color, back)));

                let pawn = Square::make_square(color.to_second_rank(), file as u8);
                board.set(pawn, Some(Piece::new(PieceKind::Pawn, color, pawn)));
            }
        }
        board
    }

    /// A board with nothing on it.  `BoardBuilder` is the public way to get one.
    pub(crate) fn empty() -> Board {
        Board {
            squares: [None; NUM_SQUARES],
        }
    }

    /// What is on this square?
    #[inline]
    pub fn get(&self, square: Square) -> Option<Piece> {
        self.squares[square.to_index()]
    }

    /// Put a piece on (or clear) a square, capturing whatever was there.  The piece is
    /// re-stamped with `square` so it always knows where it stands.
    ///
    /// This does no legality checking at all.  Placing a second king of one color breaks
    /// `is_in_check` for that color until it is removed.
    #[inline]
    pub fn set(&mut self, square: Square, piece: Option<Piece>) {
        self.squares[square.to_index()] = piece.map(|mut p| {
            p.set_square(square);
            p
        });
    }

    /// Borrow the piece on `square` together with this board, so it can generate moves.
    ///
    /// Fails with `Error::NoPiece` if the square is empty.
    #[inline]
    pub fn piece_at(&self, square: Square) -> Result<BoardPiece<'_>, Error> {
        self.get(square)
            .map(|piece| self.attach(piece))
            .ok_or(Error::NoPiece { square })
    }

    #[inline]
    fn attach(&self, piece: Piece) -> BoardPiece<'_> {
        BoardPiece { board: self, piece }
    }

    /// What kind of piece, of what color, stands on this square?  This is the read-only view
    /// renderers should use.
    #[inline]
    pub fn piece_on(&self, square: Square) -> Option<(PieceKind, Color)> {
        self.get(square).map(|p| (p.kind(), p.color()))
    }

    /// `piece_on` for all 64 squares, indexed by `Square::to_index`.
    pub fn occupancy(&self) -> [Option<(PieceKind, Color)>; NUM_SQUARES] {
        let mut result = [None; NUM_SQUARES];
        for sq in ALL_SQUARES.iter() {
            result[sq.to_index()] = self.piece_on(*sq);
        }
        result
    }

    /// Every piece of one color, in square order.
    pub fn pieces(&self, color: Color) -> impl Iterator<Item = Piece> + '_ {
        self.squares
            .iter()
            .flatten()
            .copied()
            .filter(move |p| p.color() == color)
    }

    /// Move the piece on `source` to `dest`, checking only that `dest` is among the piece's
    /// raw moves.  The move may leave the mover's own king in check.
    ///
    /// This is the path the legality filter plays candidate moves with.  On error the board
    /// is untouched.
    pub fn make_move_raw(&mut self, source: Square, dest: Square) -> Result<&mut Board, Error> {
        let moves = self.piece_at(source)?.moves();
        if !moves.contains(&dest) {
            return Err(Error::InvalidMove { source, dest });
        }
        self.relocate(source, dest);
        Ok(self)
    }

    /// Move the piece on `source` to `dest` if that is a legal move: among its raw moves,
    /// and not leaving its own king in check.  Real turns go through here.
    ///
    /// On error the board is untouched.
    ///
    /// ```
    /// use chess_rules::{Board, Error, Square};
    ///
    /// let mut board = Board::new();
    /// let e1 = Square::make_square(0, 4);
    /// let e2 = Square::make_square(1, 4);
    /// let e3 = Square::make_square(2, 4);
    ///
    /// assert_eq!(
    ///     board.make_move(e1, e2).err(),
    ///     Some(Error::InvalidMove { source: e1, dest: e2 })
    /// );
    /// board.make_move(e2, e3).expect("a legal pawn push");
    /// assert!(board.get(e2).is_none());
    /// ```
    pub fn make_move(&mut self, source: Square, dest: Square) -> Result<&mut Board, Error> {
        let moves = self.piece_at(source)?.valid_moves()?;
        if !moves.contains(&dest) {
            debug!("rejected {} {}", source, dest);
            return Err(Error::InvalidMove { source, dest });
        }
        self.relocate(source, dest);
        debug!("played {} {}", source, dest);
        Ok(self)
    }

    fn relocate(&mut self, source: Square, dest: Square) {
        let moving = self.squares[source.to_index()].take();
        if let Some(captured) = self.get(dest) {
            trace!("{} captures {} on {}", source, captured, dest);
        }
        self.set(dest, moving);
    }

    /// A deep copy of this board.  Moves played on the copy never show up on the original,
    /// and pieces borrowed from the copy see only the copy.
    ///
    /// ```
    /// use chess_rules::{Board, Square};
    ///
    /// let board = Board::new();
    /// let mut sandbox = board.duplicate();
    /// sandbox
    ///     .make_move_raw(Square::make_square(1, 0), Square::make_square(2, 0))
    ///     .expect("a2 pawn push");
    /// assert_ne!(sandbox, board);
    /// assert_eq!(board, Board::new());
    /// ```
    #[inline]
    pub fn duplicate(&self) -> Board {
        self.clone()
    }

    /// Find the king of `color`.
    ///
    /// Fails with `Error::KingNotFound` if there is no such king, or more than one.
    pub fn king_square(&self, color: Color) -> Result<Square, Error> {
        let mut kings = self
            .pieces(color)
            .filter(|p| p.kind() == PieceKind::King)
            .map(|p| p.square());

        match (kings.next(), kings.next()) {
            (Some(king), None) => Ok(king),
            _ => {
                error!("board has no unique {:?} king:\n{}", color, self);
                Err(Error::KingNotFound { color })
            }
        }
    }

    /// Is the king of `color` attacked by any raw move of the other side?
    pub fn is_in_check(&self, color: Color) -> Result<bool, Error> {
        let king = self.king_square(color)?;
        Ok(self
            .pieces(!color)
            .any(|attacker| movegen::raw_moves(self, &attacker).contains(&king)))
    }

    /// Is `color` in check with no legal move for any of its pieces?
    ///
    /// ```
    /// use chess_rules::{Board, Color};
    ///
    /// let board = Board::new();
    /// assert_eq!(board.is_checkmate(Color::White), Ok(false));
    /// ```
    pub fn is_checkmate(&self, color: Color) -> Result<bool, Error> {
        if !self.is_in_check(color)? {
            return Ok(false);
        }
        for piece in self.pieces(color) {
            if !self.attach(piece).valid_moves()?.is_empty() {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

impl Default for Board {
    /// The starting position.
    #[inline]
    fn default() -> Board {
        Board::new()
    }
}

impl fmt::Display for Board {
    /// Rank 1 on top, as the console game has always shown it.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, " ")?;
        for file in b'a'..=b'h' {
            write!(f, " {}", file as char)?;
        }
        writeln!(f)?;

        for rank in 0..8u8 {
            write!(f, "{}", rank + 1)?;
            for file in 0..8u8 {
                match self.get(Square::make_square(rank, file)) {
                    Some(piece) => write!(f, " {}", piece)?,
                    None => write!(f, " _")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
use crate::board_builder::BoardBuilder;
#[cfg(test)]
use std::convert::TryInto;

#[cfg(test)]
fn sq(rank: u8, file: u8) -> Square {
    Square::make_square(rank, file)
}

#[test]
fn starting_position_layout() {
    let board = Board::new();
    assert_eq!(board.pieces(Color::White).count(), 16);
    assert_eq!(board.pieces(Color::Black).count(), 16);
    assert_eq!(board.piece_on(sq(0, 3)), Some((PieceKind::Queen, Color::White)));
    assert_eq!(board.piece_on(sq(7, 3)), Some((PieceKind::Queen, Color::Black)));
    assert_eq!(board.piece_on(sq(7, 4)), Some((PieceKind::King, Color::Black)));
    assert_eq!(board.piece_on(sq(6, 7)), Some((PieceKind::Pawn, Color::Black)));
    for rank in 2..6 {
        for file in 0..8 {
            assert_eq!(board.get(sq(rank, file)), None);
        }
    }
}

#[test]
fn every_piece_knows_its_square() {
    let board = Board::new();
    for square in ALL_SQUARES.iter() {
        if let Some(piece) = board.get(*square) {
            assert_eq!(piece.square(), *square);
        }
    }
}

#[test]
fn pawn_push_from_the_start() {
    let mut board = Board::new();
    board.make_move(sq(1, 4), sq(2, 4)).unwrap();
    let pawn = board.get(sq(2, 4)).unwrap();
    assert_eq!(pawn.kind(), PieceKind::Pawn);
    assert_eq!(pawn.color(), Color::White);
    assert_eq!(pawn.square(), sq(2, 4));
    assert_eq!(board.get(sq(1, 4)), None);
}

#[test]
fn king_cannot_step_onto_its_own_pawn() {
    let mut board = Board::new();
    let res = board.make_move(sq(0, 4), sq(1, 4));
    assert_eq!(
        res.err(),
        Some(Error::InvalidMove {
            source: sq(0, 4),
            dest: sq(1, 4)
        })
    );
    assert_eq!(board, Board::new());
}

#[test]
fn moving_from_an_empty_square() {
    let mut board = Board::new();
    assert_eq!(
        board.make_move(sq(3, 3), sq(4, 3)).err(),
        Some(Error::NoPiece { square: sq(3, 3) })
    );
    assert_eq!(
        board.make_move_raw(sq(3, 3), sq(4, 3)).err(),
        Some(Error::NoPiece { square: sq(3, 3) })
    );
    assert!(board.piece_at(sq(3, 3)).is_err());
}

#[test]
fn capture_replaces_the_target() {
    let mut board: Board = BoardBuilder::new()
        .piece(sq(0, 0), PieceKind::King, Color::White)
        .piece(sq(7, 7), PieceKind::King, Color::Black)
        .piece(sq(3, 3), PieceKind::Rook, Color::White)
        .piece(sq(3, 6), PieceKind::Knight, Color::Black)
        .try_into()
        .unwrap();

    board.make_move(sq(3, 3), sq(3, 6)).unwrap();
    assert_eq!(board.piece_on(sq(3, 6)), Some((PieceKind::Rook, Color::White)));
    assert_eq!(board.pieces(Color::Black).count(), 1);
}

#[test]
fn pinned_knight_has_raw_moves_but_no_valid_ones() {
    let board: Board = BoardBuilder::new()
        .piece(sq(3, 0), PieceKind::King, Color::White)
        .piece(sq(3, 3), PieceKind::Knight, Color::White)
        .piece(sq(3, 7), PieceKind::Queen, Color::Black)
        .piece(sq(7, 7), PieceKind::King, Color::Black)
        .try_into()
        .unwrap();

    let knight = board.piece_at(sq(3, 3)).unwrap();
    assert!(knight.moves().contains(&sq(5, 4)));
    assert!(knight.valid_moves().unwrap().is_empty());

    let mut copy = board.duplicate();
    assert_eq!(
        copy.make_move(sq(3, 3), sq(5, 4)).err(),
        Some(Error::InvalidMove {
            source: sq(3, 3),
            dest: sq(5, 4)
        })
    );
    // the raw path does not care about the pin
    copy.make_move_raw(sq(3, 3), sq(5, 4)).unwrap();
    assert_eq!(copy.is_in_check(Color::White), Ok(true));
}

#[test]
fn pinned_rook_slides_along_the_pin() {
    let board: Board = BoardBuilder::new()
        .piece(sq(3, 0), PieceKind::King, Color::White)
        .piece(sq(3, 3), PieceKind::Rook, Color::White)
        .piece(sq(3, 7), PieceKind::Queen, Color::Black)
        .piece(sq(7, 7), PieceKind::King, Color::Black)
        .try_into()
        .unwrap();

    let mut moves = board.piece_at(sq(3, 3)).unwrap().valid_moves().unwrap().to_vec();
    moves.sort();
    assert_eq!(
        moves,
        vec![sq(3, 1), sq(3, 2), sq(3, 4), sq(3, 5), sq(3, 6), sq(3, 7)]
    );
}

#[test]
fn lone_king_mated_on_the_back_rank() {
    let board: Board = BoardBuilder::new()
        .piece(sq(7, 7), PieceKind::King, Color::White)
        .piece(sq(7, 0), PieceKind::Queen, Color::Black)
        .piece(sq(6, 0), PieceKind::Rook, Color::Black)
        .try_into()
        .unwrap();

    assert_eq!(board.is_in_check(Color::White), Ok(true));
    assert_eq!(board.is_checkmate(Color::White), Ok(true));
}

#[test]
fn queen_and_distant_rook_leave_an_escape() {
    // The rook on h1 guards the h-file, but g7 is covered by nothing.
    let board: Board = BoardBuilder::new()
        .piece(sq(7, 7), PieceKind::King, Color::White)
        .piece(sq(7, 0), PieceKind::Queen, Color::Black)
        .piece(sq(0, 7), PieceKind::Rook, Color::Black)
        .try_into()
        .unwrap();

    assert_eq!(board.is_in_check(Color::White), Ok(true));
    let king = board.piece_at(sq(7, 7)).unwrap();
    assert_eq!(king.valid_moves().unwrap().as_slice(), &[sq(6, 6)]);
    assert_eq!(board.is_checkmate(Color::White), Ok(false));
}

#[test]
fn check_can_be_blocked() {
    let board: Board = BoardBuilder::new()
        .piece(sq(0, 0), PieceKind::King, Color::White)
        .piece(sq(1, 0), PieceKind::Pawn, Color::White)
        .piece(sq(1, 1), PieceKind::Pawn, Color::White)
        .piece(sq(3, 5), PieceKind::Rook, Color::White)
        .piece(sq(0, 7), PieceKind::Rook, Color::Black)
        .piece(sq(7, 7), PieceKind::King, Color::Black)
        .try_into()
        .unwrap();

    assert_eq!(board.is_in_check(Color::White), Ok(true));
    let rook = board.piece_at(sq(3, 5)).unwrap();
    assert_eq!(rook.valid_moves().unwrap().as_slice(), &[sq(0, 5)]);
    assert_eq!(board.is_checkmate(Color::White), Ok(false));
}

#[test]
fn missing_king_is_fatal() {
    let mut board = Board::new();
    board.set(sq(0, 4), None);
    assert_eq!(
        board.is_in_check(Color::White),
        Err(Error::KingNotFound {
            color: Color::White
        })
    );
    assert_eq!(board.is_in_check(Color::Black), Ok(false));
    // any legality question for white now hits the same wall
    assert!(board.make_move(sq(1, 0), sq(2, 0)).is_err());
    assert_eq!(board.piece_on(sq(1, 0)), Some((PieceKind::Pawn, Color::White)));
}

#[test]
fn second_king_is_fatal() {
    let mut board = Board::new();
    board.set(
        sq(4, 4),
        Some(Piece::new(PieceKind::King, Color::Black, sq(4, 4))),
    );
    assert_eq!(
        board.king_square(Color::Black),
        Err(Error::KingNotFound {
            color: Color::Black
        })
    );
    assert_eq!(board.king_square(Color::White), Ok(sq(0, 4)));
}

#[test]
fn set_restamps_the_square() {
    let mut board = Board::new();
    let knight = board.get(sq(0, 1)).unwrap();
    board.set(sq(0, 1), None);
    board.set(sq(4, 4), Some(knight));
    assert_eq!(board.get(sq(4, 4)).unwrap().square(), sq(4, 4));
}

#[test]
fn render_starting_position() {
    let text = Board::new().to_string();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 9);
    assert_eq!(lines[0], "  a b c d e f g h");
    assert_eq!(lines[1], "1 R N B Q K B N R");
    assert_eq!(lines[2], "2 P P P P P P P P");
    assert_eq!(lines[3], "3 _ _ _ _ _ _ _ _");
    assert_eq!(lines[8], "8 r n b q k b n r");
}
