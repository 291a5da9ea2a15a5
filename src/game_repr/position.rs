use std::fmt;
use std::ops::{Add, Mul};

use super::piece::Color;

/// A square on the board. Row 0 is rank 8, column 0 is file a.
///
/// Positions may point off the board; move generation walks past the edges
/// routinely and every board query treats such squares as empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub row: i8,
    pub column: i8,
}

impl Position {
    pub const fn new(row: i8, column: i8) -> Self {
        Self { row, column }
    }

    pub fn is_inside(&self) -> bool {
        (0..8).contains(&self.row) && (0..8).contains(&self.column)
    }

    /// Light squares are white, dark squares are black (a8 is light).
    pub fn square_color(&self) -> Color {
        if (self.row + self.column) % 2 == 0 {
            Color::White
        } else {
            Color::Black
        }
    }

    /// Row-major index 0..64, `None` when off the board.
    pub fn index(&self) -> Option<usize> {
        self.is_inside()
            .then(|| self.row as usize * 8 + self.column as usize)
    }

    pub fn from_index(idx: usize) -> Self {
        Self::new((idx / 8) as i8, (idx % 8) as i8)
    }

    /// Parses `e4` style coordinates.
    pub fn from_algebraic(s: &str) -> Option<Self> {
        let mut chars = s.chars();
        let file = chars.next()?;
        let rank = chars.next()?;
        if chars.next().is_some() || !('a'..='h').contains(&file) || !('1'..='8').contains(&rank) {
            return None;
        }
        Some(Self::new(7 - (rank as u8 - b'1') as i8, (file as u8 - b'a') as i8))
    }

    pub fn to_algebraic(&self) -> String {
        self.to_string()
    }

    pub fn manhattan_distance(&self, other: Position) -> i32 {
        (self.row - other.row).abs() as i32 + (self.column - other.column).abs() as i32
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_inside() {
            return write!(f, "({}, {})", self.row, self.column);
        }
        let file = (b'a' + self.column as u8) as char;
        let rank = (b'8' - self.row as u8) as char;
        write!(f, "{file}{rank}")
    }
}

/// A step between squares, expressed in rows and columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Direction {
    pub row_delta: i8,
    pub column_delta: i8,
}

impl Direction {
    pub const NORTH: Direction = Direction::new(-1, 0);
    pub const SOUTH: Direction = Direction::new(1, 0);
    pub const EAST: Direction = Direction::new(0, 1);
    pub const WEST: Direction = Direction::new(0, -1);
    pub const NORTH_EAST: Direction = Direction::new(-1, 1);
    pub const NORTH_WEST: Direction = Direction::new(-1, -1);
    pub const SOUTH_EAST: Direction = Direction::new(1, 1);
    pub const SOUTH_WEST: Direction = Direction::new(1, -1);

    pub const ORTHOGONAL: [Direction; 4] = [Self::NORTH, Self::SOUTH, Self::EAST, Self::WEST];
    pub const DIAGONAL: [Direction; 4] = [
        Self::NORTH_EAST,
        Self::NORTH_WEST,
        Self::SOUTH_EAST,
        Self::SOUTH_WEST,
    ];
    pub const ALL: [Direction; 8] = [
        Self::NORTH,
        Self::SOUTH,
        Self::EAST,
        Self::WEST,
        Self::NORTH_EAST,
        Self::NORTH_WEST,
        Self::SOUTH_EAST,
        Self::SOUTH_WEST,
    ];
    pub const KNIGHT_JUMPS: [Direction; 8] = [
        Direction::new(-2, -1),
        Direction::new(-2, 1),
        Direction::new(-1, -2),
        Direction::new(-1, 2),
        Direction::new(1, -2),
        Direction::new(1, 2),
        Direction::new(2, -1),
        Direction::new(2, 1),
    ];

    pub const fn new(row_delta: i8, column_delta: i8) -> Self {
        Self { row_delta, column_delta }
    }
}

impl Add for Direction {
    type Output = Direction;

    fn add(self, rhs: Direction) -> Direction {
        Direction::new(self.row_delta + rhs.row_delta, self.column_delta + rhs.column_delta)
    }
}

impl Add<Direction> for Position {
    type Output = Position;

    fn add(self, rhs: Direction) -> Position {
        Position::new(self.row + rhs.row_delta, self.column + rhs.column_delta)
    }
}

impl Mul<i8> for Direction {
    type Output = Direction;

    fn mul(self, scalar: i8) -> Direction {
        Direction::new(self.row_delta * scalar, self.column_delta * scalar)
    }
}

impl Mul<Direction> for i8 {
    type Output = Direction;

    fn mul(self, dir: Direction) -> Direction {
        dir * self
    }
}
