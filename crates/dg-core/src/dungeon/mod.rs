//! Dungeon level generation.
//!
//! The model layer ([`LevelModel`], [`RoomModel`], [`Cell`]) is plain data
//! plus queries; cells live in an external [`CellStore`]. The generation
//! layer (themes, toolkit, smoothing) mutates the model through that seam,
//! and [`generate_random_level`] ties it all together.

pub mod area;
pub mod branch;
pub mod cell;
pub mod coord;
pub mod factory;
pub mod level;
pub mod populate;
pub mod room;
pub mod save;
pub mod smooth;
pub mod store;
pub mod strategy;
pub mod themes;
pub mod toolkit;
pub mod vaults;

pub use branch::{Branch, LevelId};
pub use cell::{Cell, CellConditions, SavedCell, Terrain};
pub use coord::{Coordinate, Direction};
pub use level::{CellChanged, LevelModel};
pub use populate::{ItemCategory, ItemId, LootFactory, MonsterSpawner, Species};
pub use room::{RoomConnection, RoomModel};
pub use save::LevelSnapshot;
pub use store::{CellStore, MemoryCellStore};
pub use strategy::generate_random_level;
pub use themes::{GenerationConfig, LevelTheme};
pub use vaults::VaultKind;
