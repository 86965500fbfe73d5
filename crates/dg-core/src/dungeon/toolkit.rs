//! Shared generator toolkit: point sampling, stairway placement, corridor
//! routing and monster scattering.
//!
//! Retry ceilings follow the error contract: point and monster sampling
//! under-deliver quietly, corridor routing signals failure by return value,
//! stairway placement is fatal on exhaustion.

use hashbrown::HashSet;

use super::cell::Terrain;
use super::coord::Coordinate;
use super::level::LevelModel;
use super::populate::{MonsterSpawner, DEFAULT_SPECIES};
use super::store::CellStore;
use crate::errors::StairKind;
use crate::{
    GenRng, GenerationError, LEVEL_HEIGHT, LEVEL_WIDTH, MAX_LEVEL_MONSTERS, MAX_POINT_ATTEMPTS,
    MAX_STAIRS_ATTEMPTS, MIN_STAIRS_SEPARATION,
};

/// Preferred first-leg axis for corridor routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Sample up to `count` points pairwise farther apart than `min_distance`.
/// Shares one attempt budget across all points, so the result may hold fewer
/// than `count`.
pub fn generate_random_points(
    rng: &mut GenRng,
    count: usize,
    min_distance: f32,
) -> Vec<Coordinate> {
    let mut points: Vec<Coordinate> = Vec::with_capacity(count);
    for _ in 0..MAX_POINT_ATTEMPTS {
        if points.len() >= count {
            break;
        }
        let candidate = Coordinate::new(
            rng.rn2(LEVEL_WIDTH as u32) as i32,
            rng.rn2(LEVEL_HEIGHT as u32) as i32,
        );
        if points.iter().all(|p| p.distance(&candidate) > min_distance) {
            points.push(candidate);
        }
    }
    points
}

fn random_interior_coord(rng: &mut GenRng) -> Coordinate {
    Coordinate::new(
        1 + rng.rn2(LEVEL_WIDTH as u32 - 2) as i32,
        1 + rng.rn2(LEVEL_HEIGHT as u32 - 2) as i32,
    )
}

fn place_stairs<S: CellStore>(
    level: &mut LevelModel,
    store: &mut S,
    rng: &mut GenRng,
    kind: StairKind,
) -> Result<Coordinate, GenerationError> {
    for _ in 0..MAX_STAIRS_ATTEMPTS {
        let coord = random_interior_coord(rng);
        let soft = level
            .terrain_at(store, coord)
            .is_some_and(|t| t.is_soft());
        if !soft {
            continue;
        }
        if kind == StairKind::Down {
            // keep the descent away from the entry
            if let Some(up) = level.stairs_up {
                if up.distance(&coord) < MIN_STAIRS_SEPARATION {
                    continue;
                }
            }
        }

        let terrain = match kind {
            StairKind::Up => Terrain::StairsUp,
            StairKind::Down => Terrain::StairsDown,
        };
        level.change_cell_type(store, coord, terrain);
        match kind {
            StairKind::Up => level.stairs_up = Some(coord),
            StairKind::Down => level.stairs_down = Some(coord),
        }
        for room in &mut level.rooms {
            if room.contains(coord) {
                match kind {
                    StairKind::Up => room.has_stairs_up = true,
                    StairKind::Down => room.has_stairs_down = true,
                }
            }
        }
        return Ok(coord);
    }
    Err(GenerationError::StairwayExhausted {
        kind,
        attempts: MAX_STAIRS_ATTEMPTS,
    })
}

/// Cut the up-stairway into a random soft interior cell. Fatal on
/// exhaustion; a grid with no soft cell is misconfigured.
pub fn generate_random_stairs_up<S: CellStore>(
    level: &mut LevelModel,
    store: &mut S,
    rng: &mut GenRng,
) -> Result<Coordinate, GenerationError> {
    place_stairs(level, store, rng, StairKind::Up)
}

/// Cut the down-stairway into a random soft interior cell at least
/// [`MIN_STAIRS_SEPARATION`] away from the up-stairway.
pub fn generate_random_stairs_down<S: CellStore>(
    level: &mut LevelModel,
    store: &mut S,
    rng: &mut GenRng,
) -> Result<Coordinate, GenerationError> {
    place_stairs(level, store, rng, StairKind::Down)
}

/// Build the L-shaped route: along the preferred axis to the midline, jog
/// across, finish along the preferred axis.
fn l_shaped_route(axis: Axis, a: Coordinate, b: Coordinate) -> Vec<Coordinate> {
    let mut route = Vec::new();
    let mut push = |c: Coordinate| {
        if route.last() != Some(&c) {
            route.push(c);
        }
    };

    match axis {
        Axis::Horizontal => {
            let mid = (a.x + b.x) / 2;
            let step = if mid >= a.x { 1 } else { -1 };
            let mut x = a.x;
            loop {
                push(Coordinate::new(x, a.y));
                if x == mid {
                    break;
                }
                x += step;
            }
            let step = if b.y >= a.y { 1 } else { -1 };
            let mut y = a.y;
            while y != b.y {
                y += step;
                push(Coordinate::new(mid, y));
            }
            let step = if b.x >= mid { 1 } else { -1 };
            let mut x = mid;
            while x != b.x {
                x += step;
                push(Coordinate::new(x, b.y));
            }
        }
        Axis::Vertical => {
            let mid = (a.y + b.y) / 2;
            let step = if mid >= a.y { 1 } else { -1 };
            let mut y = a.y;
            loop {
                push(Coordinate::new(a.x, y));
                if y == mid {
                    break;
                }
                y += step;
            }
            let step = if b.x >= a.x { 1 } else { -1 };
            let mut x = a.x;
            while x != b.x {
                x += step;
                push(Coordinate::new(x, mid));
            }
            let step = if b.y >= mid { 1 } else { -1 };
            let mut y = mid;
            while y != b.y {
                y += step;
                push(Coordinate::new(b.x, y));
            }
        }
    }
    route
}

/// Carve an axis-aligned L corridor between two points.
///
/// Every routed cell is validated against `forbidden_types` before anything
/// is touched; any hit aborts the whole operation with `None` and the grid
/// unchanged. On success every routed cell is repainted to a random pick
/// from `new_types` and the touched coordinates are returned, endpoints
/// included. Callers retry a different point pair on failure.
pub fn create_connection_between_two_points<S: CellStore>(
    level: &mut LevelModel,
    store: &mut S,
    rng: &mut GenRng,
    axis: Axis,
    a: Coordinate,
    b: Coordinate,
    new_types: &[Terrain],
    forbidden_types: &[Terrain],
) -> Option<Vec<Coordinate>> {
    if !a.in_bounds() || !b.in_bounds() || new_types.is_empty() {
        return None;
    }

    let route = l_shaped_route(axis, a, b);
    for coord in &route {
        let terrain = level.terrain_at(store, *coord)?;
        if forbidden_types.contains(&terrain) {
            return None;
        }
    }

    for coord in &route {
        let &next = rng.pick(new_types)?;
        level.change_cell_type(store, *coord, next);
    }
    Some(route)
}

/// Scatter up to [`MAX_LEVEL_MONSTERS`] of the default species onto
/// unoccupied cells. Returns how many landed. Skipped entirely under the
/// debug no-monsters flag.
pub fn generate_monsters<S: CellStore>(
    level: &LevelModel,
    store: &S,
    spawner: &mut dyn MonsterSpawner,
    rng: &mut GenRng,
    no_monsters: bool,
) -> usize {
    if no_monsters {
        return 0;
    }

    let mut taken: HashSet<Coordinate> = HashSet::new();
    for _ in 0..MAX_LEVEL_MONSTERS {
        let Some(coord) = level.random_unoccupied_cell(store, |c| taken.contains(&c), rng) else {
            break;
        };
        taken.insert(coord);
        spawner.spawn(DEFAULT_SPECIES, coord);
    }
    taken.len()
}
