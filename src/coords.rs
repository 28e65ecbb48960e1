use crate::direction::Direction;
use std::fmt;

/// Grid position as `(col, row)`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coordinate {
    pub col: i32,
    pub row: i32,
}

impl Coordinate {
    #[inline]
    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    /// One step in `dir`, without wrapping
    #[inline]
    pub const fn apply_direction(self, dir: Direction) -> Self {
        let (dc, dr) = dir.offset();
        Self {
            col: self.col + dc,
            row: self.row + dr,
        }
    }

    /// Wrap both axes onto a `width` x `height` torus
    #[inline]
    pub fn normalize(self, width: i32, height: i32) -> Self {
        debug_assert!(width > 0 && height > 0);
        Self {
            col: self.col.rem_euclid(width),
            row: self.row.rem_euclid(height),
        }
    }

    #[inline]
    pub fn in_bounds(self, width: i32, height: i32) -> bool {
        (0..width).contains(&self.col) && (0..height).contains(&self.row)
    }

    /// L1 distance, ignoring wraparound
    #[inline]
    pub fn manhattan(self, other: Coordinate) -> u32 {
        self.col.abs_diff(other.col) + self.row.abs_diff(other.row)
    }

    /// Nearest candidate by Manhattan distance; the first one wins ties
    pub fn closest<'a, I>(self, candidates: I) -> Option<Coordinate>
    where
        I: IntoIterator<Item = &'a Coordinate>,
    {
        let mut best: Option<(Coordinate, u32)> = None;
        for &c in candidates {
            let dist = self.manhattan(c);
            match best {
                Some((_, min)) if min <= dist => {}
                _ => best = Some((c, dist)),
            }
        }
        best.map(|(c, _)| c)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.col, self.row)
    }
}
