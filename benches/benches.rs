#[macro_use]
extern crate bencher;
extern crate chess_rules;

use bencher::Bencher;
use chess_rules::{Board, BoardBuilder, Color, PieceKind, Square, ALL_SQUARES};
use std::convert::TryInto;

fn sq(rank: u8, file: u8) -> Square {
    Square::make_square(rank, file)
}

// A middlegame-ish position: both sides developed, nobody in check.
fn middlegame() -> Board {
    let mut board = Board::new();
    for &(source, dest) in [
        (sq(1, 4), sq(2, 4)),
        (sq(6, 4), sq(5, 4)),
        (sq(0, 6), sq(2, 5)),
        (sq(7, 1), sq(5, 2)),
        (sq(0, 5), sq(3, 2)),
        (sq(7, 6), sq(5, 5)),
    ]
    .iter()
    {
        board.make_move(source, dest).expect("legal opening move");
    }
    board
}

fn board_valid_moves_all_pieces(bench: &mut Bencher) {
    let board = middlegame();
    bench.iter(|| {
        let mut count = 0;
        for square in ALL_SQUARES.iter() {
            if let Ok(piece) = board.piece_at(*square) {
                if piece.color() == Color::White {
                    count += piece.valid_moves().expect("one king each").len();
                }
            }
        }
        assert!(count > 0);
    });
}

fn board_raw_moves_all_pieces(bench: &mut Bencher) {
    let board = middlegame();
    bench.iter(|| {
        let count: usize = board
            .pieces(Color::White)
            .map(|piece| chess_rules::movegen::raw_moves(&board, &piece).len())
            .sum();
        assert!(count > 0);
    });
}

fn board_is_checkmate(bench: &mut Bencher) {
    let board: Board = BoardBuilder::new()
        .piece(sq(7, 7), PieceKind::King, Color::White)
        .piece(sq(7, 0), PieceKind::Queen, Color::Black)
        .piece(sq(6, 0), PieceKind::Rook, Color::Black)
        .try_into()
        .expect("valid position");

    bench.iter(|| assert_eq!(board.is_checkmate(Color::White), Ok(true)));
}

fn board_duplicate(bench: &mut Bencher) {
    let board = middlegame();
    bench.iter(|| board.duplicate());
}

benchmark_group!(
    benches,
    board_valid_moves_all_pieces,
    board_raw_moves_all_pieces,
    board_is_checkmate,
    board_duplicate
);

benchmark_main!(benches);
