//! Grid and generation constants.

/// Level grid dimensions.
pub const LEVEL_WIDTH: usize = 100;
pub const LEVEL_HEIGHT: usize = 52;

/// Rejection-sampling ceilings. Exceeding the stairway ceiling is fatal;
/// the others degrade to an absent result.
pub const MAX_POINT_ATTEMPTS: u32 = 1_000;
pub const MAX_STAIRS_ATTEMPTS: u32 = 10_000;
pub const MAX_UNOCCUPIED_ATTEMPTS: u32 = 100;
pub const MAX_NEIGHBOUR_ATTEMPTS: u32 = 15;

/// Minimum Euclidean distance between up- and down-stairways.
pub const MIN_STAIRS_SEPARATION: f32 = 40.0;

/// Per-level caps for scattered content.
pub const MAX_LEVEL_MONSTERS: usize = 5;
pub const SCATTERED_LOOT_COUNT: usize = 10;

/// Smallest BSP region the catacombs generator will split further.
pub const MIN_AREA_SIZE: usize = 12;
