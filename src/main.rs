use chess_rules::{ChessMove, Error, Game, GameResult};
use log::error;
use std::io::{self, BufRead, Write};
use std::process;

fn main() {
    env_logger::init();

    if let Err(e) = play(io::stdin().lock(), io::stdout()) {
        error!("{}", e);
        process::exit(1);
    }
}

/// Alternate turns until someone is checkmated or input runs out.
fn play<R: BufRead, W: Write>(mut input: R, mut output: W) -> io::Result<()> {
    let mut game = Game::new();

    loop {
        match game.result() {
            Ok(None) => {}
            Ok(Some(result)) => {
                writeln!(output, "\n{}", game.current_position())?;
                let loser = match result {
                    GameResult::WhiteCheckmates => "black",
                    GameResult::BlackCheckmates => "white",
                };
                writeln!(output, "Checkmate, {} loses!", loser)?;
                return Ok(());
            }
            Err(e) => return Err(io::Error::new(io::ErrorKind::Other, e.to_string())),
        }

        writeln!(output, "\n{}", game.current_position())?;
        loop {
            let side = format!("{:?}", game.side_to_move()).to_lowercase();
            writeln!(output, "{}, enter your move:", side)?;
            output.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                return Ok(());
            }

            let outcome = line
                .parse::<ChessMove>()
                .and_then(|chess_move| game.make_move(chess_move));
            match outcome {
                Ok(()) => break,
                Err(Error::InvalidMove { .. }) => {
                    writeln!(output, "That piece can't move there. Try again.")?
                }
                Err(Error::NoPiece { .. }) => {
                    writeln!(output, "No piece at that location. Try again.")?
                }
                Err(Error::WrongSide { .. }) => {
                    writeln!(output, "Please move a {} piece. Try again.", side)?
                }
                Err(Error::InvalidSquare { .. }) | Err(Error::InvalidMoveString { .. }) => {
                    writeln!(output, "Enter a move like \"e2, e3\". Try again.")?
                }
                Err(e) => return Err(io::Error::new(io::ErrorKind::Other, e.to_string())),
            }
        }
    }
}

#[test]
fn scripted_game_ends_in_mate() {
    let script = "f2f3\ne7e6\ng2g3\na7a5\na7a6\ng3g4\nd8h4\n";
    let mut output = Vec::new();
    play(script.as_bytes(), &mut output).unwrap();

    let text = String::from_utf8(output).unwrap();
    assert!(text.contains("That piece can't move there."));
    assert!(text.contains("Checkmate, white loses!"));
}

#[test]
fn wrong_side_and_bad_input_reprompt() {
    let script = "e7e6\nnonsense\ne4, e5\n";
    let mut output = Vec::new();
    play(script.as_bytes(), &mut output).unwrap();

    let text = String::from_utf8(output).unwrap();
    assert!(text.contains("Please move a white piece."));
    assert!(text.contains("Enter a move like"));
    assert!(text.contains("No piece at that location."));
}
