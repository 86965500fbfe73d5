//! Caverns theme: cellular-automata caves with carved chambers and lava
//! pockets.

use crate::dungeon::area::Rect;
use crate::dungeon::cell::Terrain;
use crate::dungeon::level::LevelModel;
use crate::dungeon::populate::MonsterSpawner;
use crate::dungeon::room::RoomModel;
use crate::dungeon::smooth::{self, ChangeConfig, SmoothConfig};
use crate::dungeon::store::CellStore;
use crate::dungeon::toolkit::{self, Axis};
use crate::{GenRng, GenerationError};

use super::{carve_disc, place_stairways, GenerationConfig};

const CHAMBER_COUNT: usize = 8;
const CHAMBER_SPACING: f32 = 12.0;
const OPEN_PERCENT: u32 = 45;
const LAVA_PERCENT: u32 = 2;

pub fn generate_caverns_level<S: CellStore>(
    level: &mut LevelModel,
    store: &mut S,
    spawner: &mut dyn MonsterSpawner,
    rng: &mut GenRng,
    config: &GenerationConfig,
) -> Result<(), GenerationError> {
    level.default_wall = Terrain::CaveWall;
    level.fill_with_default_wall(store);

    // Seed open pockets, then erode the walls around them.
    smooth::change_every_cell_in_level(
        level,
        store,
        rng,
        &ChangeConfig {
            cells_to_change: &[Terrain::CaveWall],
            cells_after_change: &[Terrain::StoneFloor],
            probability: OPEN_PERCENT,
        },
    );
    for _ in 0..2 {
        smooth::smooth_level(
            level,
            store,
            rng,
            &SmoothConfig {
                cells_to_smooth: &[Terrain::StoneFloor],
                cells_to_change: &[Terrain::CaveWall],
                cells_after_change: &[Terrain::StoneFloor, Terrain::CaveWall],
            },
        );
    }

    // Lava pockets deep in the remaining rock.
    smooth::change_every_cell_in_level(
        level,
        store,
        rng,
        &ChangeConfig {
            cells_to_change: &[Terrain::CaveWall],
            cells_after_change: &[Terrain::Lava],
            probability: LAVA_PERCENT,
        },
    );

    // Carve round chambers; these become the level's rooms.
    let centers = toolkit::generate_random_points(rng, CHAMBER_COUNT, CHAMBER_SPACING);
    for center in &centers {
        let radius = 1 + rng.rnd(3) as i32;
        carve_disc(level, store, *center, radius, Terrain::StoneFloor);
        let rect = Rect::new(center.x - radius, center.y - radius, 2 * radius + 1, 2 * radius + 1);
        level.add_room(RoomModel::new(rect));
    }

    // Chain the chambers in sample order. Tunnels route around lava when
    // they can and burn through it when they cannot.
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
            &[Terrain::StoneFloor],
            &[Terrain::Lava],
        )
        .or_else(|| {
            toolkit::create_connection_between_two_points(
                level,
                store,
                rng,
                axis,
                from,
                to,
                &[Terrain::StoneFloor],
                &[],
            )
        });
        if dug.is_some() {
            level.add_connection(i - 1, i);
        }
    }

    place_stairways(level, store, rng, config, Terrain::StoneFloor)?;
    toolkit::generate_monsters(level, store, spawner, rng, config.no_monsters);
    Ok(())
}
