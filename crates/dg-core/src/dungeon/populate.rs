//! Collaborator seams for entity and loot placement.
//!
//! The engine decides *where* things go; constructing live monsters and item
//! instances belongs to the game proper. These traits are the boundary, and
//! the recording impls back the CLI and the tests.

use serde::{Deserialize, Serialize};

use super::coord::Coordinate;
use crate::GenRng;

/// Opaque item handle owned by the item system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemId(pub u32);

/// Loot classes the strategy scatters after generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemCategory {
    Weapon,
    Armour,
}

/// Monster species tag. The scheduler-side collaborator resolves it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Species {
    GiantRat,
}

/// Default species used by the monster scatter pass.
pub const DEFAULT_SPECIES: Species = Species::GiantRat;

/// Constructs and registers a live monster into the turn scheduler.
pub trait MonsterSpawner {
    fn spawn(&mut self, species: Species, at: Coordinate);
}

/// Produces random loot instances given only a category.
pub trait LootFactory {
    fn create(&mut self, category: ItemCategory, rng: &mut GenRng) -> ItemId;
}

/// Spawner that only records placements. Enough for generation itself and
/// for asserting on placement behaviour.
#[derive(Debug, Default)]
pub struct RecordingSpawner {
    pub spawned: Vec<(Species, Coordinate)>,
}

impl MonsterSpawner for RecordingSpawner {
    fn spawn(&mut self, species: Species, at: Coordinate) {
        self.spawned.push((species, at));
    }
}

/// Loot factory that hands out sequential ids and records categories.
#[derive(Debug, Default)]
pub struct RecordingLootFactory {
    pub created: Vec<ItemCategory>,
    next_id: u32,
}

impl LootFactory for RecordingLootFactory {
    fn create(&mut self, category: ItemCategory, _rng: &mut GenRng) -> ItemId {
        self.created.push(category);
        self.next_id += 1;
        ItemId(self.next_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_spawner() {
        let mut spawner = RecordingSpawner::default();
        spawner.spawn(DEFAULT_SPECIES, Coordinate::new(3, 4));
        assert_eq!(spawner.spawned.len(), 1);
        assert_eq!(spawner.spawned[0].1, Coordinate::new(3, 4));
    }

    #[test]
    fn test_loot_factory_ids_are_distinct() {
        let mut rng = GenRng::new(1);
        let mut loot = RecordingLootFactory::default();
        let a = loot.create(ItemCategory::Weapon, &mut rng);
        let b = loot.create(ItemCategory::Armour, &mut rng);
        assert_ne!(a, b);
        assert_eq!(loot.created, vec![ItemCategory::Weapon, ItemCategory::Armour]);
    }
}
