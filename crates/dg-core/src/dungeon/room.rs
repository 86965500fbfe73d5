//! Rooms and room connections.

use serde::{Deserialize, Serialize};

use super::area::Rect;
use super::coord::Coordinate;
use super::vaults::VaultKind;
use crate::GenRng;

/// A carved room. Generators and vault decorators mutate it during
/// generation; afterwards it only serves room queries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomModel {
    /// Interior rectangle (walls excluded).
    pub rect: Rect,
    /// Wall coordinates where corridors enter.
    pub door_spots: Vec<Coordinate>,
    pub has_stairs_up: bool,
    pub has_stairs_down: bool,
    /// Vault pattern stamped into this room, if any.
    pub vault: Option<VaultKind>,
}

impl RoomModel {
    pub fn new(rect: Rect) -> Self {
        Self {
            rect,
            door_spots: Vec::new(),
            has_stairs_up: false,
            has_stairs_down: false,
            vault: None,
        }
    }

    pub fn center(&self) -> Coordinate {
        self.rect.center()
    }

    pub fn contains(&self, coord: Coordinate) -> bool {
        self.rect.contains(coord)
    }

    pub fn has_stairs(&self) -> bool {
        self.has_stairs_up || self.has_stairs_down
    }

    pub fn random_point(&self, rng: &mut GenRng) -> Coordinate {
        self.rect.random_point(rng)
    }

    pub fn add_door_spot(&mut self, coord: Coordinate) {
        if !self.door_spots.contains(&coord) {
            self.door_spots.push(coord);
        }
    }
}

/// Records that two rooms have a traversable path between them. Not itself
/// geometric; the indices are normalized so (a, b) and (b, a) are the same
/// connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoomConnection {
    a: usize,
    b: usize,
}

impl RoomConnection {
    pub fn new(first: usize, second: usize) -> Self {
        if first <= second {
            Self {
                a: first,
                b: second,
            }
        } else {
            Self {
                a: second,
                b: first,
            }
        }
    }

    pub fn rooms(&self) -> (usize, usize) {
        (self.a, self.b)
    }

    pub fn involves(&self, room: usize) -> bool {
        self.a == room || self.b == room
    }

    /// The connected room opposite `room`, if `room` is an endpoint.
    pub fn other(&self, room: usize) -> Option<usize> {
        if self.a == room {
            Some(self.b)
        } else if self.b == room {
            Some(self.a)
        } else {
            None
        }
    }
}
