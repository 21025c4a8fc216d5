use crate::error::Error;
use crate::square::Square;
use std::fmt;
use std::str::FromStr;

/// Represent a ChessMove in memory
#[derive(Clone, Copy, Eq, PartialOrd, PartialEq, Default, Debug, Hash)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct ChessMove {
    source: Square,
    dest: Square,
}

impl ChessMove {
    /// Create a new chess move, given a source `Square` and a destination `Square`.
    #[inline]
    pub fn new(source: Square, dest: Square) -> ChessMove {
        ChessMove { source, dest }
    }

    /// Get the source square (square the piece is currently on).
    #[inline]
    pub fn get_source(&self) -> Square {
        self.source
    }

    /// Get the destination square (square the piece is going to).
    #[inline]
    pub fn get_dest(&self) -> Square {
        self.dest
    }
}

impl fmt::Display for ChessMove {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.source, self.dest)
    }
}

impl FromStr for ChessMove {
    type Err = Error;

    /// Parse two square labels, either run together (`e2e4`) or separated by a comma and/or
    /// whitespace (`e2, e4`).
    ///
    /// ```
    /// use chess_rules::{ChessMove, Square};
    ///
    /// let mv = ChessMove::new(Square::make_square(1, 4), Square::make_square(3, 4));
    /// assert_eq!("e2e4".parse::<ChessMove>(), Ok(mv));
    /// assert_eq!("e2, e4".parse::<ChessMove>(), Ok(mv));
    /// assert!("e2".parse::<ChessMove>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidMoveString { s: s.to_owned() };
        let labels: Vec<&str> = s
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|part| !part.is_empty())
            .collect();

        let (source, dest) = match labels.as_slice() {
            [joined] if joined.len() == 4 && joined.is_ascii() => (&joined[0..2], &joined[2..4]),
            [source, dest] => (*source, *dest),
            _ => return Err(invalid()),
        };

        Ok(ChessMove::new(
            source.parse().map_err(|_| invalid())?,
            dest.parse().map_err(|_| invalid())?,
        ))
    }
}

#[test]
fn display_is_two_labels() {
    let mv = ChessMove::new(Square::make_square(0, 6), Square::make_square(2, 5));
    assert_eq!(mv.to_string(), "g1f3");
    assert_eq!(mv.to_string().parse::<ChessMove>(), Ok(mv));
}

#[test]
fn parse_rejects_garbage() {
    for bad in ["", "e2,", "e2 e4 e6", "z9e4", "e2-e4", "é2e4"].iter() {
        assert_eq!(
            bad.parse::<ChessMove>(),
            Err(Error::InvalidMoveString { s: bad.to_string() })
        );
    }
}

#[test]
fn parse_tolerates_spacing() {
    let mv = ChessMove::new(Square::make_square(6, 0), Square::make_square(5, 0));
    assert_eq!(" a7 ,a6 ".parse::<ChessMove>(), Ok(mv));
    assert_eq!("a7 a6".parse::<ChessMove>(), Ok(mv));
}
