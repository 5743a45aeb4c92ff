//! The 8-direction compass table.

use routeviz_grid::Point;

/// A compass direction to one of the eight neighbors of a cell.
///
/// Each direction carries its unit offset, its step cost and its opposite as
/// associated data, resolved at compile time.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

use Direction::*;

impl Direction {
    /// All eight directions in the fixed expansion order: clockwise from
    /// north. Neighbor expansion follows this order, which keeps runs
    /// deterministic.
    pub const ALL: [Direction; 8] = [
        North, NorthEast, East, SouthEast, South, SouthWest, West, NorthWest,
    ];

    /// Unit offset of this direction (y grows down).
    #[inline]
    pub const fn delta(self) -> Point {
        match self {
            North => Point::new(0, -1),
            NorthEast => Point::new(1, -1),
            East => Point::new(1, 0),
            SouthEast => Point::new(1, 1),
            South => Point::new(0, 1),
            SouthWest => Point::new(-1, 1),
            West => Point::new(-1, 0),
            NorthWest => Point::new(-1, -1),
        }
    }

    /// Whether this is an axis-aligned direction.
    #[inline]
    pub const fn is_cardinal(self) -> bool {
        matches!(self, North | East | South | West)
    }

    /// Cost of one step: 10 for cardinal moves, 14 for diagonal ones
    /// (approximating 10 times the square root of 2). Integer costs keep
    /// accumulated distances exact.
    #[inline]
    pub const fn cost(self) -> i32 {
        if self.is_cardinal() { 10 } else { 14 }
    }

    /// The direction pointing the opposite way.
    #[inline]
    pub const fn opposite(self) -> Direction {
        match self {
            North => South,
            NorthEast => SouthWest,
            East => West,
            SouthEast => NorthWest,
            South => North,
            SouthWest => NorthEast,
            West => East,
            NorthWest => SouthEast,
        }
    }
}
