use crate::error::BotError;
use std::fmt;
use std::str::FromStr;

/// One grid step, or `Undefined` for "stay in place"
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Direction {
    #[default]
    Undefined = 0,
    North = 1,
    South = 2,
    East = 3,
    West = 4,
}

impl FromStr for Direction {
    type Err = BotError;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.as_bytes() {
            b"N" | b"n" => Ok(Direction::North),
            b"S" | b"s" => Ok(Direction::South),
            b"E" | b"e" => Ok(Direction::East),
            b"W" | b"w" => Ok(Direction::West),
            _ => Err(BotError::InvalidDirection(s.to_string())),
        }
    }
}

impl Direction {
    /// The four real moves, in the order adjacent tiles are scanned
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    /// Opposite direction; `Undefined` maps to itself
    #[inline]
    pub const fn reverse(self) -> Self {
        match self {
            Direction::Undefined => Direction::Undefined,
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
        }
    }

    /// `(d_col, d_row)` for one step
    #[inline]
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Direction::Undefined => (0, 0),
            Direction::North => (0, -1),
            Direction::South => (0, 1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
        }
    }

    #[inline]
    pub const fn is_defined(self) -> bool {
        !matches!(self, Direction::Undefined)
    }

    /// Single-letter wire code; `Undefined` is never sent
    pub const fn code(self) -> Option<&'static str> {
        match self {
            Direction::Undefined => None,
            Direction::North => Some("N"),
            Direction::South => Some("S"),
            Direction::East => Some("E"),
            Direction::West => Some("W"),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code().unwrap_or("U"))
    }
}
