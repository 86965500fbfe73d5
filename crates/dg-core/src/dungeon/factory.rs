//! Cell factory.
//!
//! Pure mapping from (coordinate, terrain tag, optional persisted payload)
//! to a concrete cell. The match over `Terrain` is exhaustive, so an unknown
//! tag cannot reach runtime; corrupt persisted data fails at deserialization
//! instead.

use super::cell::{Cell, CellConditions, SavedCell, Terrain};
use super::coord::Coordinate;

/// Default display data per terrain variant: (name, sprite id).
const fn defaults(terrain: Terrain) -> (&'static str, &'static str) {
    match terrain {
        Terrain::RockWall => ("rock wall", "wall_rock"),
        Terrain::CaveWall => ("cave wall", "wall_cave"),
        Terrain::StoneFloor => ("stone floor", "floor_stone"),
        Terrain::Grass => ("grass", "floor_grass"),
        Terrain::Sand => ("sand", "floor_sand"),
        Terrain::Hill => ("hill", "hill"),
        Terrain::HillLeft => ("hillside", "hill_left"),
        Terrain::HillRight => ("hillside", "hill_right"),
        Terrain::ShallowWater => ("shallow water", "water_shallow"),
        Terrain::DeepWater => ("deep water", "water_deep"),
        Terrain::CoastNorth => ("waterline", "coast_n"),
        Terrain::CoastSouth => ("waterline", "coast_s"),
        Terrain::CoastEast => ("waterline", "coast_e"),
        Terrain::CoastWest => ("waterline", "coast_w"),
        Terrain::CoastNorthEast => ("waterline", "coast_ne"),
        Terrain::CoastNorthWest => ("waterline", "coast_nw"),
        Terrain::CoastSouthEast => ("waterline", "coast_se"),
        Terrain::CoastSouthWest => ("waterline", "coast_sw"),
        Terrain::Lava => ("lava", "lava"),
        Terrain::Bush => ("bush", "bush"),
        Terrain::Tree => ("tree", "tree"),
        Terrain::DoorClosed => ("closed door", "door_closed"),
        Terrain::DoorOpen => ("open door", "door_open"),
        Terrain::StairsUp => ("stairway up", "stairs_up"),
        Terrain::StairsDown => ("stairway down", "stairs_down"),
        Terrain::Table => ("table", "table"),
        Terrain::Barrel => ("barrel", "barrel"),
        Terrain::Shelf => ("shelf", "shelf"),
        Terrain::Bed => ("bed", "bed"),
        Terrain::Fountain => ("fountain", "fountain"),
    }
}

/// Build a fresh cell for a terrain tag with the variant's default
/// description and sprite data.
pub fn create(coord: Coordinate, terrain: Terrain) -> Cell {
    let (name, sprite) = defaults(terrain);
    Cell {
        coord,
        terrain,
        name: name.to_string(),
        sprite: sprite.to_string(),
        ground: Vec::new(),
        container: Vec::new(),
        conditions: CellConditions::empty(),
        discovered: false,
        fixed: false,
    }
}

/// Rebuild a cell from a persisted payload, splicing saved fields over the
/// variant defaults.
pub fn restore(coord: Coordinate, saved: SavedCell) -> Cell {
    let (name, sprite) = defaults(saved.terrain);
    Cell {
        coord,
        terrain: saved.terrain,
        name: saved.name.unwrap_or_else(|| name.to_string()),
        sprite: saved.sprite.unwrap_or_else(|| sprite.to_string()),
        ground: saved.ground,
        container: saved.container,
        conditions: saved.conditions,
        discovered: saved.discovered,
        fixed: saved.fixed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_create_is_total() {
        for terrain in Terrain::iter() {
            let cell = create(Coordinate::new(1, 2), terrain);
            assert_eq!(cell.terrain, terrain);
            assert!(!cell.name.is_empty());
            assert!(!cell.sprite.is_empty());
            assert!(cell.ground.is_empty());
            assert!(!cell.discovered);
        }
    }

    #[test]
    fn test_create_sets_identity() {
        let cell = create(Coordinate::new(7, 9), Terrain::Grass);
        assert_eq!(cell.key(), "7x9");
    }

    #[test]
    fn test_restore_splices_saved_fields() {
        let saved = SavedCell {
            terrain: Terrain::StoneFloor,
            name: Some("bloodied floor".to_string()),
            sprite: None,
            ground: vec![crate::dungeon::populate::ItemId(4)],
            container: Vec::new(),
            conditions: CellConditions::BLOOD,
            discovered: true,
            fixed: false,
        };

        let cell = restore(Coordinate::new(2, 3), saved);
        assert_eq!(cell.name, "bloodied floor");
        // sprite falls back to the variant default
        assert_eq!(cell.sprite, "floor_stone");
        assert!(cell.discovered);
        assert!(cell.conditions.contains(CellConditions::BLOOD));
        assert_eq!(cell.ground.len(), 1);
    }

    #[test]
    fn test_roundtrip_through_saved_payload() {
        let mut cell = create(Coordinate::new(5, 5), Terrain::Fountain);
        cell.discovered = true;
        cell.conditions |= CellConditions::MOSS;

        let saved = SavedCell::from(&cell);
        let back = restore(cell.coord, saved);
        assert_eq!(cell, back);
    }
}
