//! Map cell types.
//!
//! `Terrain` is the abstract tag generators deal in; concrete [`Cell`]
//! instances are built from it by the factory (`factory.rs`). A terrain
//! change replaces the stored cell wholesale.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use super::coord::Coordinate;
use super::populate::ItemId;

/// Terrain tag.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
#[repr(u8)]
pub enum Terrain {
    #[default]
    RockWall = 0,
    CaveWall = 1,
    StoneFloor = 2,
    Grass = 3,
    Sand = 4,
    Hill = 5,
    HillLeft = 6,
    HillRight = 7,
    ShallowWater = 8,
    DeepWater = 9,
    CoastNorth = 10,
    CoastSouth = 11,
    CoastEast = 12,
    CoastWest = 13,
    CoastNorthEast = 14,
    CoastNorthWest = 15,
    CoastSouthEast = 16,
    CoastSouthWest = 17,
    Lava = 18,
    Bush = 19,
    Tree = 20,
    DoorClosed = 21,
    DoorOpen = 22,
    StairsUp = 23,
    StairsDown = 24,
    Table = 25,
    Barrel = 26,
    Shelf = 27,
    Bed = 28,
    Fountain = 29,
}

impl Terrain {
    /// Check if this is a wall type
    pub const fn is_wall(&self) -> bool {
        matches!(self, Terrain::RockWall | Terrain::CaveWall)
    }

    /// Check if this is a water type
    pub const fn is_water(&self) -> bool {
        matches!(self, Terrain::ShallowWater | Terrain::DeepWater)
    }

    /// Check if this is one of the directional coastline variants
    pub const fn is_coastline(&self) -> bool {
        matches!(
            self,
            Terrain::CoastNorth
                | Terrain::CoastSouth
                | Terrain::CoastEast
                | Terrain::CoastWest
                | Terrain::CoastNorthEast
                | Terrain::CoastNorthWest
                | Terrain::CoastSouthEast
                | Terrain::CoastSouthWest
        )
    }

    /// Soft ground a stairway may be cut into
    pub const fn is_soft(&self) -> bool {
        matches!(self, Terrain::StoneFloor | Terrain::Grass | Terrain::Sand)
    }

    /// Check if walking onto this terrain is impossible
    pub const fn blocks_movement(&self) -> bool {
        matches!(
            self,
            Terrain::RockWall
                | Terrain::CaveWall
                | Terrain::DeepWater
                | Terrain::Lava
                | Terrain::Tree
                | Terrain::DoorClosed
                | Terrain::Table
                | Terrain::Barrel
                | Terrain::Shelf
        )
    }

    /// Check if this terrain blocks line of sight
    pub const fn blocks_sight(&self) -> bool {
        matches!(
            self,
            Terrain::RockWall
                | Terrain::CaveWall
                | Terrain::Tree
                | Terrain::DoorClosed
                | Terrain::Shelf
        )
    }

    /// Get the display character for this terrain (debug map dumps)
    pub const fn symbol(&self) -> char {
        match self {
            Terrain::RockWall => '#',
            Terrain::CaveWall => '%',
            Terrain::StoneFloor => '.',
            Terrain::Grass => '"',
            Terrain::Sand => ',',
            Terrain::Hill => '^',
            Terrain::HillLeft => '^',
            Terrain::HillRight => '^',
            Terrain::ShallowWater => '~',
            Terrain::DeepWater => '=',
            Terrain::CoastNorth => '~',
            Terrain::CoastSouth => '~',
            Terrain::CoastEast => '~',
            Terrain::CoastWest => '~',
            Terrain::CoastNorthEast => '~',
            Terrain::CoastNorthWest => '~',
            Terrain::CoastSouthEast => '~',
            Terrain::CoastSouthWest => '~',
            Terrain::Lava => '}',
            Terrain::Bush => ':',
            Terrain::Tree => 'T',
            Terrain::DoorClosed => '+',
            Terrain::DoorOpen => '\'',
            Terrain::StairsUp => '<',
            Terrain::StairsDown => '>',
            Terrain::Table => 'n',
            Terrain::Barrel => 'o',
            Terrain::Shelf => 'E',
            Terrain::Bed => '8',
            Terrain::Fountain => '{',
        }
    }
}

bitflags! {
    /// Transient surface conditions on a cell.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct CellConditions: u8 {
        const BLOOD = 0x01;
        const WEBS = 0x02;
        const MOSS = 0x04;
        const SCORCH = 0x08;
    }
}

// Manual serde impl for CellConditions
impl Serialize for CellConditions {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.bits().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for CellConditions {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let bits = u8::deserialize(deserializer)?;
        Ok(CellConditions::from_bits_truncate(bits))
    }
}

/// A single map cell. Identity is the coordinate key ("{x}x{y}"); the
/// external cell store owns the instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    /// Position (and identity) of this cell
    pub coord: Coordinate,

    /// Terrain type
    pub terrain: Terrain,

    /// Display name
    pub name: String,

    /// Sprite sheet id
    pub sprite: String,

    /// Loose items lying on the ground
    pub ground: Vec<ItemId>,

    /// Items inside the cell's container, if the variant has one
    pub container: Vec<ItemId>,

    /// Transient conditions (blood and the like)
    pub conditions: CellConditions,

    /// Has been seen by the player
    pub discovered: bool,

    /// Exempt from later bulk terrain rewrites (coastline conversions pin
    /// themselves so a following pass cannot undo them)
    pub fixed: bool,
}

impl Cell {
    /// Stable identity key, equal to the coordinate key.
    pub fn key(&self) -> String {
        self.coord.key()
    }

    pub fn blocks_movement(&self) -> bool {
        self.terrain.blocks_movement()
    }

    pub fn blocks_sight(&self) -> bool {
        self.terrain.blocks_sight()
    }
}

/// Persisted cell payload. Everything the factory cannot re-derive from the
/// terrain tag alone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedCell {
    pub terrain: Terrain,
    pub name: Option<String>,
    pub sprite: Option<String>,
    #[serde(default)]
    pub ground: Vec<ItemId>,
    #[serde(default)]
    pub container: Vec<ItemId>,
    #[serde(default)]
    pub conditions: CellConditions,
    #[serde(default)]
    pub discovered: bool,
    #[serde(default)]
    pub fixed: bool,
}

impl From<&Cell> for SavedCell {
    fn from(cell: &Cell) -> Self {
        Self {
            terrain: cell.terrain,
            name: Some(cell.name.clone()),
            sprite: Some(cell.sprite.clone()),
            ground: cell.ground.clone(),
            container: cell.container.clone(),
            conditions: cell.conditions,
            discovered: cell.discovered,
            fixed: cell.fixed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_walls_block_movement_and_sight() {
        assert!(Terrain::RockWall.blocks_movement());
        assert!(Terrain::RockWall.blocks_sight());
        assert!(Terrain::CaveWall.blocks_movement());
    }

    #[test]
    fn test_water_predicates() {
        assert!(Terrain::ShallowWater.is_water());
        assert!(Terrain::DeepWater.is_water());
        assert!(!Terrain::ShallowWater.blocks_movement());
        assert!(Terrain::DeepWater.blocks_movement());
        assert!(!Terrain::CoastNorth.is_water());
        assert!(Terrain::CoastNorth.is_coastline());
    }

    #[test]
    fn test_soft_terrain() {
        assert!(Terrain::StoneFloor.is_soft());
        assert!(Terrain::Grass.is_soft());
        assert!(!Terrain::ShallowWater.is_soft());
        assert!(!Terrain::RockWall.is_soft());
    }

    #[test]
    fn test_doors() {
        assert!(Terrain::DoorClosed.blocks_movement());
        assert!(Terrain::DoorClosed.blocks_sight());
        assert!(!Terrain::DoorOpen.blocks_movement());
        assert!(!Terrain::DoorOpen.blocks_sight());
    }

    #[test]
    fn test_every_variant_has_a_symbol() {
        for terrain in Terrain::iter() {
            // symbol() is total; this is just a reachability sweep
            let _ = terrain.symbol();
        }
    }

    #[test]
    fn test_conditions_roundtrip() {
        let conds = CellConditions::BLOOD | CellConditions::MOSS;
        let json = serde_json::to_string(&conds).unwrap();
        let back: CellConditions = serde_json::from_str(&json).unwrap();
        assert_eq!(conds, back);
    }
}
