//! Level persistence.
//!
//! A [`LevelSnapshot`] is the serializable image of one level: the model's
//! structure plus a sparse map of cells keyed by coordinate. Cells serialize
//! through [`SavedCell`], so default-derivable fields are omitted and
//! restored from the factory defaults.

use hashbrown::{HashMap, HashSet};
use serde::{Deserialize, Serialize};

use super::branch::LevelId;
use super::cell::{SavedCell, Terrain};
use super::coord::Coordinate;
use super::factory;
use super::level::LevelModel;
use super::room::{RoomConnection, RoomModel};
use super::store::CellStore;
use crate::{LEVEL_HEIGHT, LEVEL_WIDTH};

/// Serializable image of one generated level.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelSnapshot {
    pub id: LevelId,
    pub default_wall: Terrain,
    pub stairs_up: Option<Coordinate>,
    pub stairs_down: Option<Coordinate>,
    pub rooms: Vec<RoomModel>,
    pub connections: HashSet<RoomConnection>,
    /// Cells keyed by their coordinate key, e.g. `"12x34"`.
    pub cells: HashMap<String, SavedCell>,
}

fn parse_key(key: &str) -> Option<Coordinate> {
    let (x, y) = key.split_once('x')?;
    Some(Coordinate::new(x.parse().ok()?, y.parse().ok()?))
}

/// Capture a level and its cells into a snapshot.
pub fn snapshot<S: CellStore>(level: &LevelModel, store: &S) -> LevelSnapshot {
    let mut cells = HashMap::new();
    for x in 0..LEVEL_WIDTH as i32 {
        for y in 0..LEVEL_HEIGHT as i32 {
            if let Some(cell) = store.get(level.id, x, y) {
                // the model's coordinate index is the identity authority;
                // cells written outside it fall back to their own key
                let key = match level.cell_key(Coordinate::new(x, y)) {
                    Some(k) => k.to_string(),
                    None => cell.key(),
                };
                cells.insert(key, SavedCell::from(cell));
            }
        }
    }
    LevelSnapshot {
        id: level.id,
        default_wall: level.default_wall,
        stairs_up: level.stairs_up,
        stairs_down: level.stairs_down,
        rooms: level.rooms.clone(),
        connections: level.connections.clone(),
        cells,
    }
}

/// Rebuild a level and its cells from a snapshot. Unkeyed coordinates fall
/// back to the level's default wall.
pub fn restore<S: CellStore>(snapshot: LevelSnapshot, store: &mut S) -> LevelModel {
    let mut level = LevelModel::new(snapshot.id, snapshot.default_wall);
    level.fill_with_default_wall(store);
    level.stairs_up = snapshot.stairs_up;
    level.stairs_down = snapshot.stairs_down;
    level.rooms = snapshot.rooms;
    level.connections = snapshot.connections;

    for (key, saved) in snapshot.cells {
        let Some(coord) = parse_key(&key) else {
            continue;
        };
        if !coord.in_bounds() {
            continue;
        }
        store.set(level.id, coord.x, coord.y, factory::restore(coord, saved));
    }
    level.take_events();
    level
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dungeon::populate::{RecordingLootFactory, RecordingSpawner};
    use crate::dungeon::store::MemoryCellStore;
    use crate::dungeon::strategy::generate_random_level;
    use crate::dungeon::themes::GenerationConfig;
    use crate::GenRng;

    fn generated_level() -> (LevelModel, MemoryCellStore) {
        let mut store = MemoryCellStore::new();
        let mut level = LevelModel::new(LevelId::default(), Terrain::RockWall);
        let mut rng = GenRng::new(99);
        let mut spawner = RecordingSpawner::default();
        let mut loot = RecordingLootFactory::default();
        generate_random_level(
            &mut level,
            &mut store,
            &mut spawner,
            &mut loot,
            &mut rng,
            &GenerationConfig::default(),
        )
        .unwrap();
        (level, store)
    }

    #[test]
    fn test_parse_key() {
        assert_eq!(parse_key("12x34"), Some(Coordinate::new(12, 34)));
        assert_eq!(parse_key("0x0"), Some(Coordinate::new(0, 0)));
        assert_eq!(parse_key("12-34"), None);
        assert_eq!(parse_key("12xab"), None);
    }

    #[test]
    fn test_snapshot_restore_preserves_the_level() {
        let (level, store) = generated_level();
        let snap = snapshot(&level, &store);

        let mut restored_store = MemoryCellStore::new();
        let restored = restore(snap, &mut restored_store);

        assert_eq!(restored.id, level.id);
        assert_eq!(restored.stairs_up, level.stairs_up);
        assert_eq!(restored.stairs_down, level.stairs_down);
        assert_eq!(restored.rooms.len(), level.rooms.len());
        assert_eq!(restored.connections, level.connections);
        for x in 0..LEVEL_WIDTH as i32 {
            for y in 0..LEVEL_HEIGHT as i32 {
                assert_eq!(
                    store.get(level.id, x, y),
                    restored_store.get(restored.id, x, y),
                    "cell mismatch at {}x{}",
                    x,
                    y
                );
            }
        }
    }

    #[test]
    fn test_snapshot_survives_json() {
        let (level, store) = generated_level();
        let snap = snapshot(&level, &store);
        let json = serde_json::to_string(&snap).unwrap();
        let back: LevelSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back.stairs_up, snap.stairs_up);
        assert_eq!(back.cells.len(), snap.cells.len());
        let up_key = snap.stairs_up.unwrap().key();
        assert_eq!(back.cells[&up_key].terrain, Terrain::StairsUp);
    }

    #[test]
    fn test_restore_ignores_malformed_keys() {
        let (level, store) = generated_level();
        let mut snap = snapshot(&level, &store);
        snap.cells.insert("bogus".into(), SavedCell::from(store.get(level.id, 0, 0).unwrap()));
        snap.cells.insert("9999x9999".into(), SavedCell::from(store.get(level.id, 0, 0).unwrap()));

        let mut restored_store = MemoryCellStore::new();
        let restored = restore(snap, &mut restored_store);
        assert_eq!(
            restored_store.level_len(restored.id),
            (LEVEL_WIDTH * LEVEL_HEIGHT) as usize
        );
    }
}
