//! Entry point for generating a complete level.

use super::level::LevelModel;
use super::populate::{ItemCategory, LootFactory, MonsterSpawner};
use super::store::CellStore;
use super::themes::{
    generate_catacombs_level, generate_caverns_level, generate_sunken_level, GenerationConfig,
    LevelTheme,
};
use crate::{GenRng, GenerationError, SCATTERED_LOOT_COUNT};

/// Weighted theme pick, overridable from the config.
fn pick_theme(rng: &mut GenRng, config: &GenerationConfig) -> LevelTheme {
    if let Some(theme) = config.theme_override {
        return theme;
    }
    match rng.percent_roll() {
        1..=33 => LevelTheme::Catacombs,
        34..=66 => LevelTheme::Caverns,
        _ => LevelTheme::Sunken,
    }
}

/// Drop starter loot on open floor. Items land on the ground of cells that
/// are walkable and not already holding loot.
fn scatter_loot<S: CellStore>(
    level: &mut LevelModel,
    store: &mut S,
    loot: &mut dyn LootFactory,
    rng: &mut GenRng,
) -> usize {
    let id = level.id;
    let mut placed = 0;
    for _ in 0..SCATTERED_LOOT_COUNT {
        let spot = {
            let lookup: &S = store;
            level.random_unoccupied_cell(
                lookup,
                |c| {
                    lookup
                        .get(id, c.x, c.y)
                        .is_some_and(|cell| !cell.ground.is_empty())
                },
                rng,
            )
        };
        let Some(spot) = spot else {
            continue;
        };
        let category = if rng.coin() {
            ItemCategory::Weapon
        } else {
            ItemCategory::Armour
        };
        let item = loot.create(category, rng);
        if let Some(cell) = store.get_mut(level.id, spot.x, spot.y) {
            cell.ground.push(item);
            placed += 1;
        }
    }
    placed
}

/// Generate a full level: pick a theme, run its generator, then scatter
/// starter loot. Everything downstream of the seed is deterministic.
pub fn generate_random_level<S: CellStore>(
    level: &mut LevelModel,
    store: &mut S,
    spawner: &mut dyn MonsterSpawner,
    loot: &mut dyn LootFactory,
    rng: &mut GenRng,
    config: &GenerationConfig,
) -> Result<LevelTheme, GenerationError> {
    let theme = pick_theme(rng, config);
    match theme {
        LevelTheme::Catacombs => generate_catacombs_level(level, store, spawner, rng, config)?,
        LevelTheme::Caverns => generate_caverns_level(level, store, spawner, rng, config)?,
        LevelTheme::Sunken => generate_sunken_level(level, store, spawner, rng, config)?,
    }
    if level.rooms.is_empty() {
        return Err(GenerationError::NoRooms);
    }
    scatter_loot(level, store, loot, rng);
    Ok(theme)
}
