//! Furniture vault decorators.
//!
//! A vault is a pre-authored decoration pattern stamped into a generated
//! room. Decorators only touch the room's inner area (one cell in from the
//! walls) so door openings stay clear, and they never touch rooms holding a
//! stairway.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, IntoEnumIterator};

use super::cell::Terrain;
use super::coord::Coordinate;
use super::level::LevelModel;
use super::store::CellStore;
use crate::GenRng;

/// Available decoration patterns.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
pub enum VaultKind {
    /// Weapon racks: barrels along the top, a table in the middle.
    Armory,
    /// A single fountain at the room center.
    Shrine,
    /// Beds along the west side.
    Bunkroom,
    /// Shelves along the top, barrels in the lower corners.
    Storeroom,
}

impl VaultKind {
    /// Smallest interior (width, height) this pattern fits into.
    pub const fn min_size(&self) -> (i32, i32) {
        match self {
            VaultKind::Armory => (5, 4),
            VaultKind::Shrine => (3, 3),
            VaultKind::Bunkroom => (4, 4),
            VaultKind::Storeroom => (5, 4),
        }
    }
}

/// Stamp a vault pattern into one room. Returns false when the room is
/// ineligible (stairs, already decorated, too small); nothing is mutated in
/// that case.
pub fn decorate_room<S: CellStore>(
    level: &mut LevelModel,
    store: &mut S,
    room_idx: usize,
    kind: VaultKind,
) -> bool {
    let Some(room) = level.rooms.get(room_idx) else {
        return false;
    };
    if room.has_stairs() || room.vault.is_some() {
        return false;
    }
    let (min_w, min_h) = kind.min_size();
    if room.rect.width < min_w || room.rect.height < min_h {
        return false;
    }

    let inner = room.rect.shrunk(1);
    if inner.width < 1 || inner.height < 1 {
        return false;
    }

    match kind {
        VaultKind::Armory => {
            for x in inner.x..inner.right() {
                level.change_cell_type(store, Coordinate::new(x, inner.y), Terrain::Barrel);
            }
            level.change_cell_type(store, inner.center(), Terrain::Table);
        }
        VaultKind::Shrine => {
            level.change_cell_type(store, inner.center(), Terrain::Fountain);
        }
        VaultKind::Bunkroom => {
            let mut y = inner.y;
            while y < inner.bottom() {
                level.change_cell_type(store, Coordinate::new(inner.x, y), Terrain::Bed);
                y += 2;
            }
        }
        VaultKind::Storeroom => {
            for x in inner.x..inner.right() {
                level.change_cell_type(store, Coordinate::new(x, inner.y), Terrain::Shelf);
            }
            let last = inner.bottom() - 1;
            level.change_cell_type(store, Coordinate::new(inner.x, last), Terrain::Barrel);
            level.change_cell_type(store, Coordinate::new(inner.right() - 1, last), Terrain::Barrel);
        }
    }

    level.rooms[room_idx].vault = Some(kind);
    true
}

/// Roll over every room and stamp a random vault into some of them.
pub fn decorate_rooms<S: CellStore>(
    level: &mut LevelModel,
    store: &mut S,
    rng: &mut GenRng,
    percent_per_room: u32,
) -> usize {
    let kinds: Vec<VaultKind> = VaultKind::iter().collect();
    let mut decorated = 0;
    for room_idx in 0..level.rooms.len() {
        if !rng.chance(percent_per_room) {
            continue;
        }
        let Some(&kind) = rng.pick(&kinds) else {
            continue;
        };
        if decorate_room(level, store, room_idx, kind) {
            decorated += 1;
        }
    }
    decorated
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dungeon::area::Rect;
    use crate::dungeon::branch::LevelId;
    use crate::dungeon::room::RoomModel;
    use crate::dungeon::store::MemoryCellStore;

    fn level_with_room(rect: Rect) -> (LevelModel, MemoryCellStore, usize) {
        let mut store = MemoryCellStore::new();
        let mut level = LevelModel::new(LevelId::default(), Terrain::RockWall);
        level.fill_with_default_wall(&mut store);
        for coord in rect.coords() {
            level.change_cell_type(&mut store, coord, Terrain::StoneFloor);
        }
        let idx = level.add_room(RoomModel::new(rect));
        (level, store, idx)
    }

    #[test]
    fn test_shrine_places_fountain() {
        let rect = Rect::new(10, 10, 6, 5);
        let (mut level, mut store, idx) = level_with_room(rect);

        assert!(decorate_room(&mut level, &mut store, idx, VaultKind::Shrine));
        assert_eq!(
            level.terrain_at(&store, rect.shrunk(1).center()),
            Some(Terrain::Fountain)
        );
        assert_eq!(level.rooms[idx].vault, Some(VaultKind::Shrine));
    }

    #[test]
    fn test_stair_rooms_are_skipped() {
        let (mut level, mut store, idx) = level_with_room(Rect::new(10, 10, 6, 5));
        level.rooms[idx].has_stairs_up = true;

        assert!(!decorate_room(&mut level, &mut store, idx, VaultKind::Shrine));
        assert!(level.rooms[idx].vault.is_none());
    }

    #[test]
    fn test_undersized_room_is_skipped_untouched() {
        let rect = Rect::new(10, 10, 3, 3);
        let (mut level, mut store, idx) = level_with_room(rect);
        level.take_events();

        assert!(!decorate_room(&mut level, &mut store, idx, VaultKind::Armory));
        assert!(level.take_events().is_empty());
    }

    #[test]
    fn test_no_double_decoration() {
        let (mut level, mut store, idx) = level_with_room(Rect::new(10, 10, 8, 6));
        assert!(decorate_room(&mut level, &mut store, idx, VaultKind::Armory));
        assert!(!decorate_room(&mut level, &mut store, idx, VaultKind::Shrine));
        assert_eq!(level.rooms[idx].vault, Some(VaultKind::Armory));
    }

    #[test]
    fn test_furniture_stays_off_the_walls() {
        let rect = Rect::new(10, 10, 8, 6);
        let (mut level, mut store, idx) = level_with_room(rect);
        decorate_room(&mut level, &mut store, idx, VaultKind::Storeroom);

        // perimeter row/columns of the interior stay walkable
        for x in rect.x..rect.right() {
            let t = level.terrain_at(&store, Coordinate::new(x, rect.y)).unwrap();
            assert_eq!(t, Terrain::StoneFloor);
        }
    }
}
