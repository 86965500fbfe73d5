//! Grid coordinates.

use serde::{Deserialize, Serialize};

use crate::{LEVEL_HEIGHT, LEVEL_WIDTH};

/// Cardinal and diagonal directions, clockwise from north.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
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

impl Direction {
    pub const CARDINAL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];

    /// Unit offset for this direction. North is -y.
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::NorthEast => (1, -1),
            Direction::East => (1, 0),
            Direction::SouthEast => (1, 1),
            Direction::South => (0, 1),
            Direction::SouthWest => (-1, 1),
            Direction::West => (-1, 0),
            Direction::NorthWest => (-1, -1),
        }
    }
}

/// A position on the level grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: i32,
    pub y: i32,
}

impl Coordinate {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Canonical string key, e.g. "12x7". Used as the stable cell identity.
    pub fn key(&self) -> String {
        format!("{}x{}", self.x, self.y)
    }

    /// Check that the coordinate lies on the level grid
    pub const fn in_bounds(&self) -> bool {
        self.x >= 0
            && self.y >= 0
            && (self.x as usize) < LEVEL_WIDTH
            && (self.y as usize) < LEVEL_HEIGHT
    }

    pub const fn step(&self, dir: Direction) -> Coordinate {
        let (dx, dy) = dir.offset();
        Coordinate::new(self.x + dx, self.y + dy)
    }

    /// The 4 cardinal neighbours, in-bounds only.
    pub fn cardinal_neighbours(&self) -> Vec<Coordinate> {
        Direction::CARDINAL
            .iter()
            .map(|d| self.step(*d))
            .filter(Coordinate::in_bounds)
            .collect()
    }

    /// The full 8-ring, in-bounds only.
    pub fn neighbours(&self) -> Vec<Coordinate> {
        Direction::ALL
            .iter()
            .map(|d| self.step(*d))
            .filter(Coordinate::in_bounds)
            .collect()
    }

    /// Euclidean distance to another coordinate.
    pub fn distance(&self, other: &Coordinate) -> f32 {
        let dx = (self.x - other.x) as f32;
        let dy = (self.y - other.y) as f32;
        (dx * dx + dy * dy).sqrt()
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_format() {
        assert_eq!(Coordinate::new(12, 7).key(), "12x7");
        assert_eq!(Coordinate::new(0, 0).key(), "0x0");
    }

    #[test]
    fn test_bounds() {
        assert!(Coordinate::new(0, 0).in_bounds());
        assert!(Coordinate::new(LEVEL_WIDTH as i32 - 1, LEVEL_HEIGHT as i32 - 1).in_bounds());
        assert!(!Coordinate::new(-1, 0).in_bounds());
        assert!(!Coordinate::new(LEVEL_WIDTH as i32, 0).in_bounds());
    }

    #[test]
    fn test_corner_neighbour_count() {
        assert_eq!(Coordinate::new(0, 0).neighbours().len(), 3);
        assert_eq!(Coordinate::new(0, 0).cardinal_neighbours().len(), 2);
        assert_eq!(Coordinate::new(10, 10).neighbours().len(), 8);
    }

    #[test]
    fn test_distance() {
        let a = Coordinate::new(0, 0);
        let b = Coordinate::new(3, 4);
        assert_eq!(a.distance(&b), 5.0);
    }
}
