//! Catacombs theme: classic rooms-and-corridors over a BSP partition.

use crate::dungeon::area::{Adjacency, AreaArena, Rect};
use crate::dungeon::cell::Terrain;
use crate::dungeon::coord::Coordinate;
use crate::dungeon::level::LevelModel;
use crate::dungeon::populate::MonsterSpawner;
use crate::dungeon::room::RoomModel;
use crate::dungeon::store::CellStore;
use crate::dungeon::toolkit::{self, Axis};
use crate::dungeon::vaults;
use crate::{GenRng, GenerationError, LEVEL_HEIGHT, LEVEL_WIDTH, MIN_AREA_SIZE};

use super::{place_stairways, GenerationConfig};

/// Room indices carved anywhere under an arena node.
fn rooms_under(arena: &AreaArena, id: usize) -> Vec<usize> {
    let mut rooms = Vec::new();
    let mut stack = vec![id];
    while let Some(n) = stack.pop() {
        let node = arena.node(n);
        if let Some(r) = node.room {
            rooms.push(r);
        }
        if let Some((a, b)) = node.children {
            stack.push(a);
            stack.push(b);
        }
    }
    rooms
}

/// Turn corridor cells breaching a room wall into closed doors and record
/// them as the room's door spots. A cell already next to a door stays a
/// plain opening.
fn place_doors_along<S: CellStore>(level: &mut LevelModel, store: &mut S, path: &[Coordinate]) {
    for &coord in path {
        if level.rooms.iter().any(|r| r.contains(coord)) {
            continue;
        }
        let breached = level
            .rooms
            .iter()
            .position(|r| coord.cardinal_neighbours().iter().any(|n| r.contains(*n)));
        let Some(room_idx) = breached else {
            continue;
        };
        let by_door = coord.cardinal_neighbours().iter().any(|n| {
            matches!(
                level.terrain_at(store, *n),
                Some(Terrain::DoorClosed | Terrain::DoorOpen)
            )
        });
        if by_door {
            continue;
        }
        level.change_cell_type(store, coord, Terrain::DoorClosed);
        level.rooms[room_idx].add_door_spot(coord);
    }
}

pub fn generate_catacombs_level<S: CellStore>(
    level: &mut LevelModel,
    store: &mut S,
    spawner: &mut dyn MonsterSpawner,
    rng: &mut GenRng,
    config: &GenerationConfig,
) -> Result<(), GenerationError> {
    level.default_wall = Terrain::RockWall;
    level.fill_with_default_wall(store);

    // Recursively partition, preferring to cut the longer axis.
    let mut arena = AreaArena::new(Rect::new(0, 0, LEVEL_WIDTH as i32, LEVEL_HEIGHT as i32));
    let mut stack = vec![0usize];
    while let Some(id) = stack.pop() {
        let rect = arena.node(id).rect;
        let can_vertical = rect.width >= 2 * MIN_AREA_SIZE as i32;
        let can_horizontal = rect.height >= 2 * MIN_AREA_SIZE as i32;
        let split = if can_vertical && (!can_horizontal || rect.width >= rect.height) {
            arena.split_vertical(id, rng)
        } else if can_horizontal {
            arena.split_horizontal(id, rng)
        } else {
            None
        };
        if let Some((a, b)) = split {
            stack.push(a);
            stack.push(b);
        }
    }

    // One room per leaf that can hold one. Leaf rectangles are disjoint, so
    // rooms never overlap.
    for leaf in arena.leaves() {
        let interior = arena.node(leaf).rect.shrunk(2);
        if interior.width < 3 || interior.height < 3 {
            continue;
        }
        let w = rng.range(3, interior.width.min(9));
        let h = rng.range(3, interior.height.min(7));
        let x = interior.x + rng.rn2((interior.width - w + 1) as u32) as i32;
        let y = interior.y + rng.rn2((interior.height - h + 1) as u32) as i32;

        let room_rect = Rect::new(x, y, w, h);
        for coord in room_rect.coords() {
            level.change_cell_type(store, coord, Terrain::StoneFloor);
        }
        let idx = level.add_room(RoomModel::new(room_rect));
        arena.node_mut(leaf).room = Some(idx);
    }

    // Wire the partition tree back together bottom-up: every split node
    // joins a room from each of its two subtrees, which leaves the whole
    // room set connected once the root is processed.
    for id in (0..arena.len()).rev() {
        let Some((a, b)) = arena.node(id).children else {
            continue;
        };
        let rooms_a = rooms_under(&arena, a);
        let rooms_b = rooms_under(&arena, b);
        let (Some(&ra), Some(&rb)) = (rng.pick(&rooms_a), rng.pick(&rooms_b)) else {
            continue;
        };

        let axis = match arena.node(a).adjacency {
            Some(Adjacency::East) | Some(Adjacency::West) => Axis::Horizontal,
            _ => Axis::Vertical,
        };
        let from = level.rooms[ra].center();
        let to = level.rooms[rb].center();
        if let Some(path) = toolkit::create_connection_between_two_points(
            level,
            store,
            rng,
            axis,
            from,
            to,
            &[Terrain::StoneFloor],
            &[],
        ) {
            place_doors_along(level, store, &path);
            level.add_connection(ra, rb);
        }
    }

    place_stairways(level, store, rng, config, Terrain::StoneFloor)?;
    vaults::decorate_rooms(level, store, rng, 35);
    toolkit::generate_monsters(level, store, spawner, rng, config.no_monsters);
    Ok(())
}
