//! External cell store.
//!
//! Authoritative ownership of cell instances lives here, not in the level
//! model. The model reads through and overwrites wholesale on terrain
//! changes.

use hashbrown::HashMap;

use super::branch::LevelId;
use super::cell::Cell;
use super::coord::Coordinate;

/// Storage seam for cells, keyed by (branch, level, x, y).
pub trait CellStore {
    fn get(&self, level: LevelId, x: i32, y: i32) -> Option<&Cell>;
    fn get_mut(&mut self, level: LevelId, x: i32, y: i32) -> Option<&mut Cell>;
    fn set(&mut self, level: LevelId, x: i32, y: i32, cell: Cell);

    fn get_at(&self, level: LevelId, coord: Coordinate) -> Option<&Cell> {
        self.get(level, coord.x, coord.y)
    }
}

/// In-memory cell store over a hash map.
#[derive(Debug, Default, Clone)]
pub struct MemoryCellStore {
    cells: HashMap<(LevelId, i32, i32), Cell>,
}

impl MemoryCellStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cells stored for one level.
    pub fn level_len(&self, level: LevelId) -> usize {
        self.cells.keys().filter(|(id, _, _)| *id == level).count()
    }
}

impl CellStore for MemoryCellStore {
    fn get(&self, level: LevelId, x: i32, y: i32) -> Option<&Cell> {
        self.cells.get(&(level, x, y))
    }

    fn get_mut(&mut self, level: LevelId, x: i32, y: i32) -> Option<&mut Cell> {
        self.cells.get_mut(&(level, x, y))
    }

    fn set(&mut self, level: LevelId, x: i32, y: i32, cell: Cell) {
        self.cells.insert((level, x, y), cell);
    }
}
