use chess_rules::{
    Board, BoardBuilder, Color, Game, PieceKind, Square, ALL_COLORS, ALL_SQUARES,
};
use std::convert::TryInto;

fn sq(rank: u8, file: u8) -> Square {
    Square::make_square(rank, file)
}

fn after(moves: &str) -> Board {
    let mut game = Game::new();
    for mv in moves.split(';') {
        game.make_move(mv.parse().unwrap()).unwrap();
    }
    game.current_position().clone()
}

/// A handful of positions with both kings present: quiet, pinned, in check, mated.
fn positions() -> Vec<Board> {
    let mut boards = vec![
        Board::new(),
        after("e2e3; e7e6; d1h5; b8c6"),
        after("f2f3; e7e6; a2a3; d8h4"),
        after("f2f3; e7e6; g2g3; a7a6; g3g4; d8h4"),
    ];

    boards.push(
        BoardBuilder::new()
            .piece(sq(3, 0), PieceKind::King, Color::White)
            .piece(sq(3, 3), PieceKind::Knight, Color::White)
            .piece(sq(2, 2), PieceKind::Pawn, Color::White)
            .piece(sq(3, 7), PieceKind::Queen, Color::Black)
            .piece(sq(7, 7), PieceKind::King, Color::Black)
            .piece(sq(6, 6), PieceKind::Pawn, Color::Black)
            .try_into()
            .unwrap(),
    );
    boards.push(
        BoardBuilder::new()
            .piece(sq(7, 7), PieceKind::King, Color::White)
            .piece(sq(7, 0), PieceKind::Queen, Color::Black)
            .piece(sq(6, 0), PieceKind::Rook, Color::Black)
            .piece(sq(0, 0), PieceKind::King, Color::Black)
            .try_into()
            .unwrap(),
    );
    boards
}

#[test]
fn valid_moves_are_a_subset_of_raw_moves() {
    for board in positions() {
        for square in ALL_SQUARES.iter() {
            if let Ok(piece) = board.piece_at(*square) {
                let raw = piece.moves();
                for dest in piece.valid_moves().unwrap() {
                    assert!(raw.contains(&dest), "{} -> {} on\n{}", square, dest, board);
                }
            }
        }
    }
}

#[test]
fn checkmate_is_check_without_valid_moves() {
    for board in positions() {
        for &color in ALL_COLORS.iter() {
            let in_check = board.is_in_check(color).unwrap();
            let stuck = board
                .pieces(color)
                .all(|p| board.piece_at(p.square()).unwrap().valid_moves().unwrap().is_empty());
            assert_eq!(
                board.is_checkmate(color).unwrap(),
                in_check && stuck,
                "{:?} on\n{}",
                color,
                board
            );
        }
    }
}

#[test]
fn mated_positions_are_recognised() {
    let boards = positions();
    assert!(boards[3].is_checkmate(Color::White).unwrap());
    assert!(boards[5].is_checkmate(Color::White).unwrap());
    assert!(!boards[2].is_checkmate(Color::White).unwrap());
    assert!(!boards[0].is_checkmate(Color::White).unwrap());
}

#[test]
fn duplicate_matches_after_a_validated_move() {
    let mut board = Board::new();
    board.make_move(sq(0, 1), sq(2, 2)).unwrap();

    let mut copy = board.duplicate();
    assert_eq!(copy.occupancy().to_vec(), board.occupancy().to_vec());

    copy.make_move(sq(6, 3), sq(5, 3)).unwrap();
    assert_eq!(board.piece_on(sq(6, 3)), Some((PieceKind::Pawn, Color::Black)));
    assert_eq!(board.piece_on(sq(5, 3)), None);

    board.make_move(sq(2, 2), sq(4, 3)).unwrap();
    assert_eq!(copy.piece_on(sq(2, 2)), Some((PieceKind::Knight, Color::White)));
    assert_eq!(copy.piece_on(sq(4, 3)), None);
}

#[test]
fn pieces_from_a_duplicate_see_the_duplicate() {
    let board = Board::new();
    let mut copy = board.duplicate();
    copy.set(sq(1, 3), None);

    // with d2 gone the c1 bishop has a diagonal on the copy only
    let on_copy = copy.piece_at(sq(0, 2)).unwrap();
    let on_original = board.piece_at(sq(0, 2)).unwrap();
    assert_eq!(on_copy.moves().len(), 5);
    assert!(on_original.moves().is_empty());
}

#[test]
fn queen_exposure_is_filtered() {
    let board: Board = BoardBuilder::new()
        .piece(sq(0, 0), PieceKind::King, Color::White)
        .piece(sq(0, 3), PieceKind::Bishop, Color::White)
        .piece(sq(0, 7), PieceKind::Queen, Color::Black)
        .piece(sq(7, 7), PieceKind::King, Color::Black)
        .try_into()
        .unwrap();

    let bishop = board.piece_at(sq(0, 3)).unwrap();
    assert!(bishop.moves().contains(&sq(1, 4)));
    assert!(bishop.valid_moves().unwrap().is_empty());
    assert_eq!(board.is_in_check(Color::White), Ok(false));
}
