use crate::error::Error;
use std::fmt;
use std::str::FromStr;

/// Represent a square on the chess board as a (rank index, file index) pair packed into a
/// byte.  Rank 0 is White's back rank, file 0 is the a-file.
#[derive(PartialEq, Eq, PartialOrd, Ord, Copy, Clone, Debug, Hash, Default)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct Square(u8);

/// How many squares are there?
pub const NUM_SQUARES: usize = 64;

/// A list of every square on the chessboard, rank by rank.
pub const ALL_SQUARES: [Square; NUM_SQUARES] = {
    let mut squares = [Square(0); NUM_SQUARES];
    let mut i = 0;
    while i < NUM_SQUARES {
        squares[i] = Square(i as u8);
        i += 1;
    }
    squares
};

impl Square {
    /// Make a square given a rank and a file.
    /// Note: passing a rank or file >= 8 is a programming error.
    #[inline]
    pub fn make_square(rank: u8, file: u8) -> Square {
        debug_assert!(rank < 8 && file < 8);
        Square(rank << 3 | file)
    }

    /// Return the rank given this square.
    #[inline]
    pub fn rank(&self) -> u8 {
        self.0 >> 3
    }

    /// Return the file given this square.
    #[inline]
    pub fn file(&self) -> u8 {
        self.0 & 7
    }

    /// Convert this `Square` to a `usize` for table lookup purposes
    #[inline]
    pub fn to_index(&self) -> usize {
        self.0 as usize
    }

    /// Step by a (rank, file) delta.  If that walks off the board, None.
    ///
    /// ```
    /// use chess_rules::Square;
    ///
    /// let a1 = Square::make_square(0, 0);
    /// assert_eq!(a1.offset(1, 2), Some(Square::make_square(1, 2)));
    /// assert_eq!(a1.offset(-1, 0), None);
    /// ```
    #[inline]
    pub fn offset(&self, rank_delta: i8, file_delta: i8) -> Option<Square> {
        let rank = self.rank() as i8 + rank_delta;
        let file = self.file() as i8 + file_delta;
        if (0..8).contains(&rank) && (0..8).contains(&file) {
            Some(Square::make_square(rank as u8, file as u8))
        } else {
            None
        }
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}{}",
            (b'a' + self.file()) as char,
            (b'1' + self.rank()) as char
        )
    }
}

impl FromStr for Square {
    type Err = Error;

    /// Parse a label such as `e2`: a file letter followed by a rank digit.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidSquare { s: s.to_owned() };
        let bytes = s.trim().as_bytes();
        if bytes.len() != 2 {
            return Err(invalid());
        }
        let file = bytes[0].to_ascii_lowercase();
        let rank = bytes[1];
        match (file, rank) {
            (b'a'..=b'h', b'1'..=b'8') => Ok(Square::make_square(rank - b'1', file - b'a')),
            _ => Err(invalid()),
        }
    }
}

#[test]
fn label_round_trip() {
    let e2 = Square::make_square(1, 4);
    assert_eq!(e2.to_string(), "e2");
    assert_eq!("e2".parse::<Square>(), Ok(e2));
    assert_eq!("H8".parse::<Square>(), Ok(Square::make_square(7, 7)));
}

#[test]
fn bad_labels() {
    assert!("i1".parse::<Square>().is_err());
    assert!("a9".parse::<Square>().is_err());
    assert!("a".parse::<Square>().is_err());
    assert!("".parse::<Square>().is_err());
}

#[test]
fn all_squares_are_in_order() {
    for (i, sq) in ALL_SQUARES.iter().enumerate() {
        assert_eq!(sq.to_index(), i);
        assert_eq!(Square::make_square(sq.rank(), sq.file()), *sq);
    }
}

#[test]
fn offsets_stay_on_the_board() {
    let h8 = Square::make_square(7, 7);
    assert_eq!(h8.offset(1, 0), None);
    assert_eq!(h8.offset(0, 1), None);
    assert_eq!(h8.offset(-7, -7), Some(Square::make_square(0, 0)));
}
