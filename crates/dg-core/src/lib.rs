//! dg-core: procedural level generation for a turn-based dungeon crawler.
//!
//! This crate contains the generation engine only: the level model, the cell
//! factory, the BSP area partition, the shared generator toolkit and the
//! themed generators on top of it. Rendering, input, combat and the turn
//! scheduler are external consumers; they see the engine through
//! [`dungeon::LevelModel`] accessors and the single entry point
//! [`dungeon::strategy::generate_random_level`].
//!
//! All randomness flows through one seedable [`GenRng`]; a fixed seed and a
//! fixed call order reproduce a level byte for byte.

pub mod dungeon;

mod consts;
mod errors;
mod rng;

pub use consts::*;
pub use errors::GenerationError;
pub use rng::GenRng;
