use crate::board::Board;
use crate::piece::{Piece, PieceKind};
use crate::square::Square;
use arrayvec::ArrayVec;

/// The most destinations any one piece can have (a centralized queen reaches 27).
pub const MAX_PIECE_MOVES: usize = 32;

/// The destinations of one piece.  No allocation, so the legality filter can build one per
/// simulated move cheaply.
pub type MoveSet = ArrayVec<Square, MAX_PIECE_MOVES>;

const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (2, 1),
    (2, -1),
    (-2, 1),
    (-2, -1),
    (1, 2),
    (1, -2),
    (-1, 2),
    (-1, -2),
];

const KING_OFFSETS: [(i8, i8); 8] = [
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
];

const BISHOP_RAYS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
const ROOK_RAYS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Generate the raw moves for a piece: every square its movement rule reaches on this board,
/// *ignoring* whether the move would leave its own king attacked.
///
/// This is the move set used to decide whether a king is attacked, so it must never consult
/// the legality filter.
///
/// ```
/// use chess_rules::{movegen, Board, Square};
///
/// let board = Board::new();
/// let knight = board.get(Square::make_square(0, 1)).expect("b1 knight");
/// let moves = movegen::raw_moves(&board, &knight);
/// assert_eq!(moves.len(), 2);
/// ```
pub fn raw_moves(board: &Board, piece: &Piece) -> MoveSet {
    let mut moves = MoveSet::new();
    match piece.kind() {
        PieceKind::Pawn => pawn_moves(board, piece, &mut moves),
        PieceKind::Knight => step_moves(board, piece, &KNIGHT_OFFSETS, &mut moves),
        PieceKind::Bishop => slide_moves(board, piece, &BISHOP_RAYS, &mut moves),
        PieceKind::Rook => slide_moves(board, piece, &ROOK_RAYS, &mut moves),
        PieceKind::Queen => {
            slide_moves(board, piece, &BISHOP_RAYS, &mut moves);
            slide_moves(board, piece, &ROOK_RAYS, &mut moves);
        }
        PieceKind::King => step_moves(board, piece, &KING_OFFSETS, &mut moves),
    }
    moves
}

/// One step forward onto an empty square, or one step diagonally forward onto an enemy.
fn pawn_moves(board: &Board, piece: &Piece, moves: &mut MoveSet) {
    let src = piece.square();
    let forward = piece.color().forward();

    if let Some(dest) = src.offset(forward, 0) {
        if board.get(dest).is_none() {
            moves.push(dest);
        }
    }

    for &side in [-1, 1].iter() {
        if let Some(dest) = src.offset(forward, side) {
            match board.get(dest) {
                Some(target) if target.color() != piece.color() => moves.push(dest),
                _ => {}
            }
        }
    }
}

/// Single jumps (knight, king): any on-board target not held by a friendly piece.
fn step_moves(board: &Board, piece: &Piece, offsets: &[(i8, i8)], moves: &mut MoveSet) {
    let src = piece.square();
    for &(dr, df) in offsets.iter() {
        if let Some(dest) = src.offset(dr, df) {
            match board.get(dest) {
                Some(target) if target.color() == piece.color() => {}
                _ => moves.push(dest),
            }
        }
    }
}

/// Rays (bishop, rook, queen): walk outward until the edge, stopping before a friendly piece
/// or on an enemy one.
fn slide_moves(board: &Board, piece: &Piece, rays: &[(i8, i8)], moves: &mut MoveSet) {
    let src = piece.square();
    for &(dr, df) in rays.iter() {
        let mut current = src;
        while let Some(dest) = current.offset(dr, df) {
            match board.get(dest) {
                None => moves.push(dest),
                Some(target) => {
                    if target.color() != piece.color() {
                        moves.push(dest);
                    }
                    break;
                }
            }
            current = dest;
        }
    }
}

#[cfg(test)]
use crate::board_builder::BoardBuilder;
#[cfg(test)]
use crate::color::Color;
#[cfg(test)]
use std::convert::TryInto;

#[cfg(test)]
fn sq(rank: u8, file: u8) -> Square {
    Square::make_square(rank, file)
}

#[cfg(test)]
fn moves_on(board: &Board, square: Square) -> Vec<Square> {
    let piece = board.get(square).expect("piece under test");
    let mut moves = raw_moves(board, &piece).to_vec();
    moves.sort();
    moves
}

#[cfg(test)]
fn sorted(mut squares: Vec<Square>) -> Vec<Square> {
    squares.sort();
    squares
}

#[test]
fn rook_stops_before_a_friendly_blocker() {
    let board: Board = BoardBuilder::new()
        .piece(sq(0, 0), PieceKind::Rook, Color::White)
        .piece(sq(0, 2), PieceKind::Knight, Color::White)
        .try_into()
        .unwrap();

    let moves = moves_on(&board, sq(0, 0));
    assert!(moves.contains(&sq(0, 1)));
    for file in 2..8 {
        assert!(!moves.contains(&sq(0, file)));
    }
    // up the a-file is open all the way
    assert_eq!(moves.len(), 1 + 7);
}

#[test]
fn bishop_captures_and_stops() {
    let board: Board = BoardBuilder::new()
        .piece(sq(0, 2), PieceKind::Bishop, Color::White)
        .piece(sq(2, 4), PieceKind::Pawn, Color::Black)
        .try_into()
        .unwrap();

    assert_eq!(
        moves_on(&board, sq(0, 2)),
        sorted(vec![sq(1, 1), sq(2, 0), sq(1, 3), sq(2, 4)])
    );
}

#[test]
fn queen_in_the_middle_of_an_empty_board() {
    let board: Board = BoardBuilder::new()
        .piece(sq(3, 3), PieceKind::Queen, Color::White)
        .try_into()
        .unwrap();

    assert_eq!(moves_on(&board, sq(3, 3)).len(), 27);
}

#[test]
fn knight_in_the_corner() {
    let board: Board = BoardBuilder::new()
        .piece(sq(0, 0), PieceKind::Knight, Color::Black)
        .piece(sq(2, 1), PieceKind::Pawn, Color::Black)
        .piece(sq(1, 2), PieceKind::Pawn, Color::White)
        .try_into()
        .unwrap();

    assert_eq!(moves_on(&board, sq(0, 0)), vec![sq(1, 2)]);
}

#[test]
fn king_steps_to_its_neighbours() {
    let board: Board = BoardBuilder::new()
        .piece(sq(0, 4), PieceKind::King, Color::White)
        .piece(sq(1, 4), PieceKind::Pawn, Color::White)
        .piece(sq(1, 3), PieceKind::Pawn, Color::Black)
        .try_into()
        .unwrap();

    assert_eq!(
        moves_on(&board, sq(0, 4)),
        sorted(vec![sq(0, 3), sq(0, 5), sq(1, 3), sq(1, 5)])
    );
}

#[test]
fn pawns_push_one_and_capture_diagonally() {
    let board: Board = BoardBuilder::new()
        .piece(sq(1, 4), PieceKind::Pawn, Color::White)
        .piece(sq(2, 3), PieceKind::Knight, Color::Black)
        .piece(sq(2, 5), PieceKind::Knight, Color::White)
        .piece(sq(6, 0), PieceKind::Pawn, Color::Black)
        .try_into()
        .unwrap();

    // no double step from the starting rank
    assert_eq!(moves_on(&board, sq(1, 4)), sorted(vec![sq(2, 4), sq(2, 3)]));
    assert_eq!(moves_on(&board, sq(6, 0)), vec![sq(5, 0)]);
}

#[test]
fn pawns_capture_forward_only() {
    let board: Board = BoardBuilder::new()
        .piece(sq(4, 4), PieceKind::Pawn, Color::Black)
        .piece(sq(3, 3), PieceKind::Knight, Color::White)
        .piece(sq(5, 5), PieceKind::Knight, Color::White)
        .piece(sq(5, 3), PieceKind::Knight, Color::White)
        .piece(sq(2, 2), PieceKind::Pawn, Color::White)
        .piece(sq(3, 2), PieceKind::Rook, Color::Black)
        .piece(sq(3, 1), PieceKind::Bishop, Color::Black)
        .piece(sq(1, 1), PieceKind::Rook, Color::Black)
        .piece(sq(1, 3), PieceKind::Rook, Color::Black)
        .try_into()
        .unwrap();

    // black captures toward rank 0, never back toward its own side
    assert_eq!(moves_on(&board, sq(4, 4)), sorted(vec![sq(3, 3), sq(3, 4)]));
    // blocked straight ahead, the white pawn keeps only its capture
    assert_eq!(moves_on(&board, sq(2, 2)), vec![sq(3, 1)]);
}

#[test]
fn blocked_pawn_has_no_moves() {
    let board: Board = BoardBuilder::new()
        .piece(sq(3, 3), PieceKind::Pawn, Color::White)
        .piece(sq(4, 3), PieceKind::Pawn, Color::Black)
        .try_into()
        .unwrap();

    assert!(moves_on(&board, sq(3, 3)).is_empty());
    assert!(moves_on(&board, sq(4, 3)).is_empty());
}

#[test]
fn starting_position_raw_move_counts() {
    let board = Board::new();
    let total: usize = board
        .pieces(Color::White)
        .map(|piece| raw_moves(&board, &piece).len())
        .sum();
    assert_eq!(total, 8 + 4);
}
