//! Sunken theme: a flooded overgrown hall with pools, hills and dry sand
//! clearings.

use crate::dungeon::area::Rect;
use crate::dungeon::cell::Terrain;
use crate::dungeon::coord::Coordinate;
use crate::dungeon::level::LevelModel;
use crate::dungeon::populate::MonsterSpawner;
use crate::dungeon::room::RoomModel;
use crate::dungeon::smooth::{self, ChangeConfig, SmoothConfig};
use crate::dungeon::store::CellStore;
use crate::dungeon::toolkit::{self, Axis};
use crate::{GenRng, GenerationError, LEVEL_HEIGHT, LEVEL_WIDTH};

use super::{carve_disc, place_stairways, GenerationConfig};

const POOL_COUNT: usize = 10;
const POOL_SPACING: f32 = 8.0;
const CLEARING_COUNT: usize = 6;
const CLEARING_SPACING: f32 = 15.0;
const HILL_PERCENT: u32 = 3;
const VEGETATION_PERCENT: u32 = 6;

/// Pull a sampled disc center far enough inside that the disc cannot touch
/// the outer wall ring.
fn pull_inside(c: Coordinate, radius: i32) -> Coordinate {
    Coordinate::new(
        c.x.clamp(1 + radius, LEVEL_WIDTH as i32 - 2 - radius),
        c.y.clamp(1 + radius, LEVEL_HEIGHT as i32 - 2 - radius),
    )
}

fn fill_walled_meadow<S: CellStore>(level: &mut LevelModel, store: &mut S) {
    level.default_wall = Terrain::RockWall;
    level.fill_with_default_wall(store);
    for x in 1..LEVEL_WIDTH as i32 - 1 {
        for y in 1..LEVEL_HEIGHT as i32 - 1 {
            level.change_cell_type(store, Coordinate::new(x, y), Terrain::Grass);
        }
    }
}

pub fn generate_sunken_level<S: CellStore>(
    level: &mut LevelModel,
    store: &mut S,
    spawner: &mut dyn MonsterSpawner,
    rng: &mut GenRng,
    config: &GenerationConfig,
) -> Result<(), GenerationError> {
    fill_walled_meadow(level, store);

    // Flood: round pools, roughened at the rim, then shaded into coastline
    // and deep water.
    let pools = toolkit::generate_random_points(rng, POOL_COUNT, POOL_SPACING);
    for pool in &pools {
        let radius = rng.range(2, 4);
        carve_disc(
            level,
            store,
            pull_inside(*pool, radius),
            radius,
            Terrain::ShallowWater,
        );
    }
    smooth::smooth_level(
        level,
        store,
        rng,
        &SmoothConfig {
            cells_to_smooth: &[Terrain::ShallowWater],
            cells_to_change: &[Terrain::Grass],
            cells_after_change: &[Terrain::Grass, Terrain::ShallowWater],
        },
    );
    smooth::smooth_shallow_water_coastline(level, store);
    smooth::generate_deep_water(level, store);

    // Rolling hills on the remaining grass.
    smooth::change_every_cell_in_level(
        level,
        store,
        rng,
        &ChangeConfig {
            cells_to_change: &[Terrain::Grass],
            cells_after_change: &[Terrain::Hill],
            probability: HILL_PERCENT,
        },
    );
    smooth::smooth_level_hills(level, store);

    // Vegetation.
    smooth::change_every_cell_in_level(
        level,
        store,
        rng,
        &ChangeConfig {
            cells_to_change: &[Terrain::Grass],
            cells_after_change: &[Terrain::Bush, Terrain::Tree],
            probability: VEGETATION_PERCENT,
        },
    );

    // Dry sand clearings; these act as the rooms and carry the stairways.
    let clearings = toolkit::generate_random_points(rng, CLEARING_COUNT, CLEARING_SPACING);
    for clearing in &clearings {
        let radius = rng.range(2, 3);
        let center = pull_inside(*clearing, radius);
        carve_disc(level, store, center, radius, Terrain::Sand);
        let rect = Rect::new(
            center.x - radius,
            center.y - radius,
            2 * radius + 1,
            2 * radius + 1,
        );
        level.add_room(RoomModel::new(rect));
    }

    // Sand paths between consecutive clearings, skirting the deep water
    // where possible.
    for i in 1..level.rooms.len() {
        let from = level.rooms[i - 1].center();
        let to = level.rooms[i].center();
        let axis = if rng.coin() {
            Axis::Horizontal
        } else {
            Axis::Vertical
        };
        let dug = toolkit::create_connection_between_two_points(
            level,
            store,
            rng,
            axis,
            from,
            to,
            &[Terrain::Sand],
            &[Terrain::DeepWater],
        )
        .or_else(|| {
            toolkit::create_connection_between_two_points(
                level,
                store,
                rng,
                axis,
                from,
                to,
                &[Terrain::Sand],
                &[],
            )
        });
        if dug.is_some() {
            level.add_connection(i - 1, i);
        }
    }

    place_stairways(level, store, rng, config, Terrain::Sand)?;
    toolkit::generate_monsters(level, store, spawner, rng, config.no_monsters);
    Ok(())
}
