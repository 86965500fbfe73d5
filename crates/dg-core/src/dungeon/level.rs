//! Level model.
//!
//! One per (branch, level number). Holds the per-level structure the rest of
//! the game queries: stairway locations, rooms, room connections and the
//! coordinate index. Actual cell storage is delegated to the external
//! [`CellStore`]; every accessor that touches cells takes the store
//! explicitly.

use hashbrown::{HashMap, HashSet};
use serde::{Deserialize, Serialize};

use super::branch::LevelId;
use super::cell::{Cell, Terrain};
use super::coord::Coordinate;
use super::factory;
use super::room::{RoomConnection, RoomModel};
use super::store::CellStore;
use crate::{GenRng, LEVEL_HEIGHT, LEVEL_WIDTH, MAX_NEIGHBOUR_ATTEMPTS, MAX_UNOCCUPIED_ATTEMPTS};

/// Raised whenever a cell is replaced; drained by external consumers
/// (rendering, field-of-view invalidation).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellChanged {
    pub coord: Coordinate,
    pub terrain: Terrain,
}

/// Per-level structure. Lives for the game session.
#[derive(Debug, Clone)]
pub struct LevelModel {
    pub id: LevelId,
    pub default_wall: Terrain,
    pub stairs_up: Option<Coordinate>,
    pub stairs_down: Option<Coordinate>,
    pub rooms: Vec<RoomModel>,
    pub connections: HashSet<RoomConnection>,
    /// Coordinate to cell-identity key.
    index: HashMap<Coordinate, String>,
    events: Vec<CellChanged>,
}

impl LevelModel {
    pub fn new(id: LevelId, default_wall: Terrain) -> Self {
        Self {
            id,
            default_wall,
            stairs_up: None,
            stairs_down: None,
            rooms: Vec::new(),
            connections: HashSet::new(),
            index: HashMap::new(),
            events: Vec::new(),
        }
    }

    /// Fill the whole grid with the default wall. Establishes the invariant
    /// that every in-bounds coordinate has exactly one cell; generators call
    /// this before carving.
    pub fn fill_with_default_wall<S: CellStore>(&mut self, store: &mut S) {
        for x in 0..LEVEL_WIDTH as i32 {
            for y in 0..LEVEL_HEIGHT as i32 {
                let coord = Coordinate::new(x, y);
                store.set(self.id, x, y, factory::create(coord, self.default_wall));
                self.index.insert(coord, coord.key());
            }
        }
    }

    /// Read-through cell accessor.
    pub fn cell<'s, S: CellStore>(&self, store: &'s S, coord: Coordinate) -> Option<&'s Cell> {
        store.get(self.id, coord.x, coord.y)
    }

    /// Read-through accessor by raw position.
    pub fn cell_at<'s, S: CellStore>(&self, store: &'s S, x: i32, y: i32) -> Option<&'s Cell> {
        store.get(self.id, x, y)
    }

    /// Terrain shorthand used all over the generators.
    pub fn terrain_at<S: CellStore>(&self, store: &S, coord: Coordinate) -> Option<Terrain> {
        self.cell(store, coord).map(|c| c.terrain)
    }

    /// Replace the cell at a coordinate with a freshly constructed one of
    /// the given terrain. Overwrites the store and the local index and
    /// queues a change notification.
    pub fn change_cell_type<S: CellStore>(&mut self, store: &mut S, coord: Coordinate, terrain: Terrain) {
        if !coord.in_bounds() {
            return;
        }
        store.set(self.id, coord.x, coord.y, factory::create(coord, terrain));
        self.index.insert(coord, coord.key());
        self.events.push(CellChanged { coord, terrain });
    }

    /// Drain queued cell-change notifications.
    pub fn take_events(&mut self) -> Vec<CellChanged> {
        std::mem::take(&mut self.events)
    }

    /// Identity key of the cell at a coordinate, from the coordinate index.
    /// Absent for coordinates never written through this model.
    pub fn cell_key(&self, coord: Coordinate) -> Option<&str> {
        self.index.get(&coord).map(String::as_str)
    }

    /// Rejection-sample a walkable, unoccupied cell. `is_occupied` is the
    /// caller's notion of occupancy (monsters live outside the model).
    /// Absent on exhaustion; callers degrade gracefully.
    pub fn random_unoccupied_cell<S: CellStore>(
        &self,
        store: &S,
        is_occupied: impl Fn(Coordinate) -> bool,
        rng: &mut GenRng,
    ) -> Option<Coordinate> {
        for _ in 0..MAX_UNOCCUPIED_ATTEMPTS {
            let coord = Coordinate::new(
                rng.rn2(LEVEL_WIDTH as u32) as i32,
                rng.rn2(LEVEL_HEIGHT as u32) as i32,
            );
            let Some(cell) = self.cell(store, coord) else {
                continue;
            };
            if !cell.blocks_movement() && !is_occupied(coord) {
                return Some(coord);
            }
        }
        None
    }

    /// Rejection-sample one of the up-to-8 neighbours matching a predicate.
    pub fn random_neighbour<S: CellStore>(
        &self,
        store: &S,
        coord: Coordinate,
        predicate: impl Fn(&Cell) -> bool,
        rng: &mut GenRng,
    ) -> Option<Coordinate> {
        let ring = coord.neighbours();
        if ring.is_empty() {
            return None;
        }
        for _ in 0..MAX_NEIGHBOUR_ATTEMPTS {
            let candidate = ring[rng.rn2(ring.len() as u32) as usize];
            if self.cell(store, candidate).is_some_and(&predicate) {
                return Some(candidate);
            }
        }
        None
    }

    pub fn add_room(&mut self, room: RoomModel) -> usize {
        self.rooms.push(room);
        self.rooms.len() - 1
    }

    pub fn add_connection(&mut self, a: usize, b: usize) {
        self.connections.insert(RoomConnection::new(a, b));
    }

    pub fn are_connected(&self, a: usize, b: usize) -> bool {
        self.connections.contains(&RoomConnection::new(a, b))
    }

    /// Nearest other room by center distance. Linear scan; room counts are
    /// small.
    pub fn nearest_room_from(&self, room_idx: usize) -> Option<usize> {
        let center = self.rooms.get(room_idx)?.center();
        self.rooms
            .iter()
            .enumerate()
            .filter(|(idx, _)| *idx != room_idx)
            .min_by(|(_, a), (_, b)| {
                a.center()
                    .distance(&center)
                    .total_cmp(&b.center().distance(&center))
            })
            .map(|(idx, _)| idx)
    }

    /// Rooms whose rectangle intersects the given region. Linear scan.
    pub fn rooms_in_region(&self, region: super::area::Rect) -> Vec<usize> {
        self.rooms
            .iter()
            .enumerate()
            .filter(|(_, room)| room.rect.overlaps(&region, 0))
            .map(|(idx, _)| idx)
            .collect()
    }

    /// Room indices reachable from `start` over the connection set.
    pub fn reachable_rooms_from(&self, start: usize) -> HashSet<usize> {
        let mut seen = HashSet::new();
        let mut queue = vec![start];
        while let Some(room) = queue.pop() {
            if !seen.insert(room) {
                continue;
            }
            for conn in &self.connections {
                if let Some(other) = conn.other(room) {
                    if !seen.contains(&other) {
                        queue.push(other);
                    }
                }
            }
        }
        seen
    }

    /// The room holding the entry (up) stairway.
    pub fn entry_room(&self) -> Option<usize> {
        self.rooms.iter().position(|r| r.has_stairs_up)
    }
}
