//! Grid geometry: [`Location`] coordinates and compass [`Direction`]s.
//!
//! The grid uses screen orientation: `x` grows to the east and `y` grows to
//! the south, so [`Direction::North`] decreases `y`.

use serde::{Deserialize, Serialize};

/// One of the eight compass directions, or [`Direction::None`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Towards decreasing `y`.
    North,
    /// North and east.
    NorthEast,
    /// Towards increasing `x`.
    East,
    /// South and east.
    SouthEast,
    /// Towards increasing `y`.
    South,
    /// South and west.
    SouthWest,
    /// Towards decreasing `x`.
    West,
    /// North and west.
    NorthWest,
    /// No movement.
    None,
}

impl Direction {
    /// The eight real directions in their fixed enumeration order.
    ///
    /// Every deterministic scan and every tie-break walks this array.
    pub const COMPASS: [Self; 8] = [
        Self::North,
        Self::NorthEast,
        Self::East,
        Self::SouthEast,
        Self::South,
        Self::SouthWest,
        Self::West,
        Self::NorthWest,
    ];

    /// Horizontal step of this direction.
    pub const fn dx(self) -> i32 {
        match self {
            Self::NorthEast | Self::East | Self::SouthEast => 1,
            Self::SouthWest | Self::West | Self::NorthWest => -1,
            Self::North | Self::South | Self::None => 0,
        }
    }

    /// Vertical step of this direction.
    pub const fn dy(self) -> i32 {
        match self {
            Self::North | Self::NorthEast | Self::NorthWest => -1,
            Self::South | Self::SouthEast | Self::SouthWest => 1,
            Self::East | Self::West | Self::None => 0,
        }
    }

    /// The next direction counter-clockwise (45 degrees).
    pub const fn rotate_left(self) -> Self {
        match self {
            Self::North => Self::NorthWest,
            Self::NorthEast => Self::North,
            Self::East => Self::NorthEast,
            Self::SouthEast => Self::East,
            Self::South => Self::SouthEast,
            Self::SouthWest => Self::South,
            Self::West => Self::SouthWest,
            Self::NorthWest => Self::West,
            Self::None => Self::None,
        }
    }

    /// The next direction clockwise (45 degrees).
    pub const fn rotate_right(self) -> Self {
        match self {
            Self::North => Self::NorthEast,
            Self::NorthEast => Self::East,
            Self::East => Self::SouthEast,
            Self::SouthEast => Self::South,
            Self::South => Self::SouthWest,
            Self::SouthWest => Self::West,
            Self::West => Self::NorthWest,
            Self::NorthWest => Self::North,
            Self::None => Self::None,
        }
    }

    /// The direction pointing the other way. `None` stays `None`.
    pub const fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::NorthEast => Self::SouthWest,
            Self::East => Self::West,
            Self::SouthEast => Self::NorthWest,
            Self::South => Self::North,
            Self::SouthWest => Self::NorthEast,
            Self::West => Self::East,
            Self::NorthWest => Self::SouthEast,
            Self::None => Self::None,
        }
    }

    /// Whether this is one of the eight real directions.
    pub const fn is_compass(self) -> bool {
        !matches!(self, Self::None)
    }

    /// Position of this direction inside [`Direction::COMPASS`].
    pub const fn ordinal(self) -> Option<usize> {
        match self {
            Self::North => Some(0),
            Self::NorthEast => Some(1),
            Self::East => Some(2),
            Self::SouthEast => Some(3),
            Self::South => Some(4),
            Self::SouthWest => Some(5),
            Self::West => Some(6),
            Self::NorthWest => Some(7),
            Self::None => None,
        }
    }
}

impl core::fmt::Display for Direction {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            Self::North => "NORTH",
            Self::NorthEast => "NORTH_EAST",
            Self::East => "EAST",
            Self::SouthEast => "SOUTH_EAST",
            Self::South => "SOUTH",
            Self::SouthWest => "SOUTH_WEST",
            Self::West => "WEST",
            Self::NorthWest => "NORTH_WEST",
            Self::None => "NONE",
        };
        f.write_str(name)
    }
}

/// An integer cell coordinate on the simulation grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Location {
    /// Column, growing eastwards.
    pub x: i32,
    /// Row, growing southwards.
    pub y: i32,
}

impl Location {
    /// Create a location from its coordinates.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The adjacent location one step in `direction`.
    ///
    /// Saturates at the `i32` range so the result is always defined;
    /// the host rejects anything off its map anyway.
    #[must_use]
    pub const fn add(self, direction: Direction) -> Self {
        Self {
            x: self.x.saturating_add(direction.dx()),
            y: self.y.saturating_add(direction.dy()),
        }
    }

    /// Squared Euclidean distance to `other`.
    pub const fn distance_squared_to(self, other: Self) -> u32 {
        let dx = self.x.abs_diff(other.x);
        let dy = self.y.abs_diff(other.y);
        dx.saturating_mul(dx).saturating_add(dy.saturating_mul(dy))
    }

    /// The 8-way heading from this location towards `target`.
    ///
    /// Returns [`Direction::None`] when both locations are equal.
    pub const fn direction_to(self, target: Self) -> Direction {
        let sx = signum(target.x, self.x);
        let sy = signum(target.y, self.y);
        match (sx, sy) {
            (0, -1) => Direction::North,
            (1, -1) => Direction::NorthEast,
            (1, 0) => Direction::East,
            (1, 1) => Direction::SouthEast,
            (0, 1) => Direction::South,
            (-1, 1) => Direction::SouthWest,
            (-1, 0) => Direction::West,
            (-1, -1) => Direction::NorthWest,
            _ => Direction::None,
        }
    }
}

/// Sign of `a - b` without risking overflow.
const fn signum(a: i32, b: i32) -> i32 {
    if a > b {
        1
    } else if a < b {
        -1
    } else {
        0
    }
}

impl core::fmt::Display for Location {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
