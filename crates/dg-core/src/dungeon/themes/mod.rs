//! Themed level generators.
//!
//! Each generator fills the whole grid, carves its rooms, wires the room
//! network together and places the stairways, honoring the structural
//! invariants the rest of the game relies on (unique stairways, reachable
//! rooms, no coordinate without a cell).

mod catacombs;
mod caverns;
mod sunken;

pub use catacombs::generate_catacombs_level;
pub use caverns::generate_caverns_level;
pub use sunken::generate_sunken_level;

use serde::{Deserialize, Serialize};

use super::cell::Terrain;
use super::coord::Coordinate;
use super::level::LevelModel;
use super::store::CellStore;
use super::toolkit::{self, Axis};
use crate::{GenRng, GenerationError};

/// The selectable level themes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LevelTheme {
    Catacombs,
    Caverns,
    Sunken,
}

/// Strategy-level configuration, including the developer debug switches.
#[derive(Debug, Clone, Copy)]
pub struct GenerationConfig {
    /// False on the deepest level of a branch.
    pub generate_stairs_down: bool,
    /// Debug override: skip the weighted pick and use this theme.
    pub theme_override: Option<LevelTheme>,
    /// Debug switch: skip monster scattering entirely.
    pub no_monsters: bool,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            generate_stairs_down: true,
            theme_override: None,
            no_monsters: false,
        }
    }
}

/// Paint a filled disc of terrain. Out-of-bounds parts are clipped.
pub(crate) fn carve_disc<S: CellStore>(
    level: &mut LevelModel,
    store: &mut S,
    center: Coordinate,
    radius: i32,
    terrain: Terrain,
) {
    for dx in -radius..=radius {
        for dy in -radius..=radius {
            if dx * dx + dy * dy > radius * radius {
                continue;
            }
            let coord = Coordinate::new(center.x + dx, center.y + dy);
            if coord.in_bounds() {
                level.change_cell_type(store, coord, terrain);
            }
        }
    }
}

/// Guarantee a walkable path from a freshly cut stairway to the nearest
/// room. The corridor repaints the stair cell, so it is re-cut afterwards.
pub(crate) fn anchor_stairway<S: CellStore>(
    level: &mut LevelModel,
    store: &mut S,
    rng: &mut GenRng,
    stair: Coordinate,
    stair_terrain: Terrain,
    floor: Terrain,
) {
    let target = level
        .rooms
        .iter()
        .map(|r| r.center())
        .min_by(|a, b| a.distance(&stair).total_cmp(&b.distance(&stair)));
    let Some(target) = target else {
        return;
    };
    if level.rooms.iter().any(|r| r.contains(stair)) {
        return;
    }

    let axis = if rng.coin() {
        Axis::Horizontal
    } else {
        Axis::Vertical
    };
    if toolkit::create_connection_between_two_points(
        level,
        store,
        rng,
        axis,
        stair,
        target,
        &[floor],
        &[],
    )
    .is_some()
    {
        level.change_cell_type(store, stair, stair_terrain);
    }

    // The corridor may have run across an already cut stairway; re-cut any
    // recorded stairway the repaint swallowed.
    let recorded = [
        (level.stairs_up, Terrain::StairsUp),
        (level.stairs_down, Terrain::StairsDown),
    ];
    for (coord, terrain) in recorded {
        let Some(coord) = coord else {
            continue;
        };
        if level.terrain_at(store, coord) != Some(terrain) {
            level.change_cell_type(store, coord, terrain);
        }
    }
}

/// Place both stairways for a theme, then anchor them into the room
/// network.
pub(crate) fn place_stairways<S: CellStore>(
    level: &mut LevelModel,
    store: &mut S,
    rng: &mut GenRng,
    config: &GenerationConfig,
    floor: Terrain,
) -> Result<(), GenerationError> {
    let up = toolkit::generate_random_stairs_up(level, store, rng)?;
    anchor_stairway(level, store, rng, up, Terrain::StairsUp, floor);

    if config.generate_stairs_down {
        let down = toolkit::generate_random_stairs_down(level, store, rng)?;
        anchor_stairway(level, store, rng, down, Terrain::StairsDown, floor);
    }
    Ok(())
}
