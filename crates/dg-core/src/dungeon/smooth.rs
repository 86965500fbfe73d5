//! Terrain smoothing passes.
//!
//! All passes are single-pass with immediate mutation: later cells see the
//! replacements already made earlier in the same sweep. This is load-bearing
//! for determinism and for the coastline recursion, so none of these use a
//! snapshot-then-apply scheme.

use super::cell::Terrain;
use super::coord::{Coordinate, Direction};
use super::level::LevelModel;
use super::store::CellStore;
use crate::{GenRng, LEVEL_HEIGHT, LEVEL_WIDTH};

/// Neighbour-triggered replacement rule for [`smooth_level`].
#[derive(Debug, Clone, Copy)]
pub struct SmoothConfig<'a> {
    /// Neighbour terrains that trigger the rule.
    pub cells_to_smooth: &'a [Terrain],
    /// Terrains eligible for replacement.
    pub cells_to_change: &'a [Terrain],
    /// Replacement pool, picked uniformly.
    pub cells_after_change: &'a [Terrain],
}

/// Independent per-cell rewrite rule for [`change_every_cell_in_level`].
#[derive(Debug, Clone, Copy)]
pub struct ChangeConfig<'a> {
    pub cells_to_change: &'a [Terrain],
    pub cells_after_change: &'a [Terrain],
    /// Percent probability applied to each matching cell independently.
    pub probability: u32,
}

fn all_coords() -> impl Iterator<Item = Coordinate> {
    (0..LEVEL_WIDTH as i32)
        .flat_map(|x| (0..LEVEL_HEIGHT as i32).map(move |y| Coordinate::new(x, y)))
}

/// Mark a cell exempt from later bulk rewrites.
fn pin<S: CellStore>(level: &LevelModel, store: &mut S, coord: Coordinate) {
    if let Some(cell) = store.get_mut(level.id, coord.x, coord.y) {
        cell.fixed = true;
    }
}

/// For every cell of a `cells_to_change` type, replace it with a uniform
/// pick from `cells_after_change` if any of its 8 neighbours is a
/// `cells_to_smooth` type.
pub fn smooth_level<S: CellStore>(
    level: &mut LevelModel,
    store: &mut S,
    rng: &mut GenRng,
    cfg: &SmoothConfig<'_>,
) {
    for coord in all_coords() {
        let Some(terrain) = level.terrain_at(store, coord) else {
            continue;
        };
        if !cfg.cells_to_change.contains(&terrain) {
            continue;
        }
        let triggered = coord.neighbours().into_iter().any(|n| {
            level
                .terrain_at(store, n)
                .is_some_and(|t| cfg.cells_to_smooth.contains(&t))
        });
        if triggered {
            if let Some(&next) = rng.pick(cfg.cells_after_change) {
                level.change_cell_type(store, coord, next);
            }
        }
    }
}

/// Grass adjacent to a full hill on the west, east, or both sides becomes
/// the matching hillside sprite. Horizontal adjacency only.
pub fn smooth_level_hills<S: CellStore>(level: &mut LevelModel, store: &mut S) {
    for coord in all_coords() {
        if level.terrain_at(store, coord) != Some(Terrain::Grass) {
            continue;
        }
        let hill_west =
            level.terrain_at(store, coord.step(Direction::West)) == Some(Terrain::Hill);
        let hill_east =
            level.terrain_at(store, coord.step(Direction::East)) == Some(Terrain::Hill);

        let next = match (hill_west, hill_east) {
            (true, true) => Terrain::Hill,
            (true, false) => Terrain::HillRight,
            (false, true) => Terrain::HillLeft,
            (false, false) => continue,
        };
        level.change_cell_type(store, coord, next);
    }
}

/// Water adjacency of the 8 neighbours around a coordinate.
struct WaterRing {
    n: bool,
    s: bool,
    e: bool,
    w: bool,
}

impl WaterRing {
    fn around<S: CellStore>(level: &LevelModel, store: &S, coord: Coordinate) -> Self {
        let water = |dir: Direction| {
            level
                .terrain_at(store, coord.step(dir))
                .is_some_and(|t| t.is_water())
        };
        Self {
            n: water(Direction::North),
            s: water(Direction::South),
            e: water(Direction::East),
            w: water(Direction::West),
        }
    }

    fn cardinal_count(&self) -> usize {
        [self.n, self.s, self.e, self.w]
            .iter()
            .filter(|&&b| b)
            .count()
    }

    /// Fixed pattern table. Cardinal-only entries are checked before the
    /// two-direction corner entries; corner entries require exactly their
    /// two cardinals so the 3-sided conversion below stays reachable.
    fn coastline(&self) -> Option<Terrain> {
        let WaterRing { n, s, e, w } = *self;
        match (n, s, e, w) {
            (true, false, false, false) => Some(Terrain::CoastNorth),
            (false, true, false, false) => Some(Terrain::CoastSouth),
            (false, false, true, false) => Some(Terrain::CoastEast),
            (false, false, false, true) => Some(Terrain::CoastWest),
            (true, false, true, false) => Some(Terrain::CoastNorthEast),
            (true, false, false, true) => Some(Terrain::CoastNorthWest),
            (false, true, true, false) => Some(Terrain::CoastSouthEast),
            (false, true, false, true) => Some(Terrain::CoastSouthWest),
            _ => None,
        }
    }
}

/// Apply the coastline rule at one coordinate, recursing into the cardinal
/// neighbours when a 3-sided cell converts to water. Converted cells no
/// longer match the grass trigger, which bounds the recursion.
fn apply_coastline<S: CellStore>(level: &mut LevelModel, store: &mut S, coord: Coordinate) {
    if level.terrain_at(store, coord) != Some(Terrain::Grass) {
        return;
    }
    let ring = WaterRing::around(level, store, coord);
    if let Some(sprite) = ring.coastline() {
        level.change_cell_type(store, coord, sprite);
        pin(level, store, coord);
    } else if ring.cardinal_count() >= 3 {
        level.change_cell_type(store, coord, Terrain::ShallowWater);
        pin(level, store, coord);
        for neighbour in coord.cardinal_neighbours() {
            apply_coastline(level, store, neighbour);
        }
    }
}

/// Replace grass bordering water with directional coastline sprites; grass
/// nearly surrounded by water floods and re-evaluates its neighbours.
pub fn smooth_shallow_water_coastline<S: CellStore>(level: &mut LevelModel, store: &mut S) {
    for coord in all_coords() {
        apply_coastline(level, store, coord);
    }
}

/// A shallow-water cell whose full 2-cell-radius disk is water becomes deep
/// water.
pub fn generate_deep_water<S: CellStore>(level: &mut LevelModel, store: &mut S) {
    for coord in all_coords() {
        if level.terrain_at(store, coord) != Some(Terrain::ShallowWater) {
            continue;
        }
        let mut surrounded = true;
        'disk: for dx in -2i32..=2 {
            for dy in -2i32..=2 {
                if dx * dx + dy * dy > 4 {
                    continue;
                }
                let probe = Coordinate::new(coord.x + dx, coord.y + dy);
                let wet = level
                    .terrain_at(store, probe)
                    .is_some_and(|t| t.is_water());
                if !wet {
                    surrounded = false;
                    break 'disk;
                }
            }
        }
        if surrounded {
            level.change_cell_type(store, coord, Terrain::DeepWater);
        }
    }
}

/// Independently rewrite every matching cell with the given percent
/// probability. Cells pinned by an earlier pass are skipped.
pub fn change_every_cell_in_level<S: CellStore>(
    level: &mut LevelModel,
    store: &mut S,
    rng: &mut GenRng,
    cfg: &ChangeConfig<'_>,
) {
    for coord in all_coords() {
        let Some(cell) = level.cell(store, coord) else {
            continue;
        };
        if cell.fixed || !cfg.cells_to_change.contains(&cell.terrain) {
            continue;
        }
        if rng.chance(cfg.probability) {
            if let Some(&next) = rng.pick(cfg.cells_after_change) {
                level.change_cell_type(store, coord, next);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dungeon::branch::LevelId;
    use crate::dungeon::store::MemoryCellStore;

    fn grass_level() -> (LevelModel, MemoryCellStore) {
        let mut store = MemoryCellStore::new();
        let mut level = LevelModel::new(LevelId::default(), Terrain::RockWall);
        level.fill_with_default_wall(&mut store);
        for coord in all_coords() {
            level.change_cell_type(&mut store, coord, Terrain::Grass);
        }
        level.take_events();
        (level, store)
    }

    #[test]
    fn test_smooth_level_replaces_on_neighbour_match() {
        let (mut level, mut store) = grass_level();
        level.change_cell_type(&mut store, Coordinate::new(10, 10), Terrain::ShallowWater);
        // sand ring candidate next to the water
        level.change_cell_type(&mut store, Coordinate::new(11, 10), Terrain::Sand);

        let mut rng = GenRng::new(1);
        smooth_level(
            &mut level,
            &mut store,
            &mut rng,
            &SmoothConfig {
                cells_to_smooth: &[Terrain::ShallowWater],
                cells_to_change: &[Terrain::Sand],
                cells_after_change: &[Terrain::ShallowWater],
            },
        );

        assert_eq!(
            level.terrain_at(&store, Coordinate::new(11, 10)),
            Some(Terrain::ShallowWater)
        );
        // sand far away from water untouched
        level.change_cell_type(&mut store, Coordinate::new(40, 40), Terrain::Sand);
        smooth_level(
            &mut level,
            &mut store,
            &mut rng,
            &SmoothConfig {
                cells_to_smooth: &[Terrain::DeepWater],
                cells_to_change: &[Terrain::Sand],
                cells_after_change: &[Terrain::ShallowWater],
            },
        );
        assert_eq!(
            level.terrain_at(&store, Coordinate::new(40, 40)),
            Some(Terrain::Sand)
        );
    }

    #[test]
    fn test_hill_sides() {
        let (mut level, mut store) = grass_level();
        // hill west of 21x10, hill east of 29x10, hills both sides of 25x10
        level.change_cell_type(&mut store, Coordinate::new(20, 10), Terrain::Hill);
        level.change_cell_type(&mut store, Coordinate::new(30, 10), Terrain::Hill);
        level.change_cell_type(&mut store, Coordinate::new(24, 10), Terrain::Hill);
        level.change_cell_type(&mut store, Coordinate::new(26, 10), Terrain::Hill);

        smooth_level_hills(&mut level, &mut store);

        assert_eq!(
            level.terrain_at(&store, Coordinate::new(21, 10)),
            Some(Terrain::HillRight)
        );
        assert_eq!(
            level.terrain_at(&store, Coordinate::new(29, 10)),
            Some(Terrain::HillLeft)
        );
        assert_eq!(
            level.terrain_at(&store, Coordinate::new(25, 10)),
            Some(Terrain::Hill)
        );
        // vertical adjacency does not trigger
        assert_eq!(
            level.terrain_at(&store, Coordinate::new(20, 11)),
            Some(Terrain::Grass)
        );
    }

    #[test]
    fn test_north_water_becomes_north_coastline() {
        let (mut level, mut store) = grass_level();
        let coord = Coordinate::new(10, 10);
        level.change_cell_type(&mut store, coord.step(Direction::North), Terrain::ShallowWater);

        smooth_shallow_water_coastline(&mut level, &mut store);

        assert_eq!(level.terrain_at(&store, coord), Some(Terrain::CoastNorth));
        let pinned = level.cell(&store, coord).unwrap();
        assert!(pinned.fixed);
    }

    #[test]
    fn test_corner_pattern() {
        let (mut level, mut store) = grass_level();
        let coord = Coordinate::new(10, 10);
        level.change_cell_type(&mut store, coord.step(Direction::North), Terrain::ShallowWater);
        level.change_cell_type(&mut store, coord.step(Direction::East), Terrain::ShallowWater);

        smooth_shallow_water_coastline(&mut level, &mut store);

        assert_eq!(
            level.terrain_at(&store, coord),
            Some(Terrain::CoastNorthEast)
        );
    }

    #[test]
    fn test_three_sided_grass_floods_and_recurses() {
        let (mut level, mut store) = grass_level();
        let coord = Coordinate::new(10, 10);
        for dir in [Direction::North, Direction::East, Direction::West] {
            level.change_cell_type(&mut store, coord.step(dir), Terrain::ShallowWater);
        }

        smooth_shallow_water_coastline(&mut level, &mut store);

        assert_eq!(level.terrain_at(&store, coord), Some(Terrain::ShallowWater));
        assert!(level.cell(&store, coord).unwrap().fixed);
        // the southern neighbour was re-evaluated: it now has water to its
        // north and nothing else, so it carries the north coastline
        assert_eq!(
            level.terrain_at(&store, coord.step(Direction::South)),
            Some(Terrain::CoastNorth)
        );
    }

    #[test]
    fn test_deep_water_needs_full_disk() {
        let (mut level, mut store) = grass_level();
        // 7x7 pond: only its center has a full 2-radius water disk
        for dx in -3i32..=3 {
            for dy in -3i32..=3 {
                level.change_cell_type(
                    &mut store,
                    Coordinate::new(20 + dx, 20 + dy),
                    Terrain::ShallowWater,
                );
            }
        }

        generate_deep_water(&mut level, &mut store);

        assert_eq!(
            level.terrain_at(&store, Coordinate::new(20, 20)),
            Some(Terrain::DeepWater)
        );
        assert_eq!(
            level.terrain_at(&store, Coordinate::new(17, 20)),
            Some(Terrain::ShallowWater)
        );
    }

    #[test]
    fn test_change_every_cell_skips_pinned() {
        let (mut level, mut store) = grass_level();
        let pinned_at = Coordinate::new(5, 5);
        pin(&level, &mut store, pinned_at);

        let mut rng = GenRng::new(4);
        change_every_cell_in_level(
            &mut level,
            &mut store,
            &mut rng,
            &ChangeConfig {
                cells_to_change: &[Terrain::Grass],
                cells_after_change: &[Terrain::Sand],
                probability: 100,
            },
        );

        assert_eq!(level.terrain_at(&store, pinned_at), Some(Terrain::Grass));
        assert_eq!(
            level.terrain_at(&store, Coordinate::new(6, 5)),
            Some(Terrain::Sand)
        );
    }

    #[test]
    fn test_change_every_cell_zero_probability() {
        let (mut level, mut store) = grass_level();
        let mut rng = GenRng::new(4);
        change_every_cell_in_level(
            &mut level,
            &mut store,
            &mut rng,
            &ChangeConfig {
                cells_to_change: &[Terrain::Grass],
                cells_after_change: &[Terrain::Sand],
                probability: 0,
            },
        );
        assert_eq!(
            level.terrain_at(&store, Coordinate::new(6, 5)),
            Some(Terrain::Grass)
        );
    }
}
