//! Seed-reproducible map generation split into coherent submodules.
//!
//! One generation attempt runs the stages in a fixed order, all drawing from a
//! single [`MapRng`]: dimensions, exits and template, focal point, exit paths,
//! entity placement, entity paths. The call order is part of the output
//! contract; reordering any PRNG call changes every map.

pub mod config;
pub mod model;

mod carve;
mod entities;
mod exits;
mod focal;
mod generator;
mod grid;
mod invariants;
mod regenerate;
mod rng;
mod template;

pub use carve::{Axis, CarveOutcome};
pub use config::{ConfigError, MapGenConfig};
pub use exits::ExitDescriptor;
pub use focal::PathPoint;
pub use generator::MapGenerator;
pub use invariants::InvariantViolation;
pub use model::{BadMapReason, EntityPlacement, GeneratedMap};
pub use regenerate::{RegeneratedMap, find_good_map};
pub use rng::MapRng;

use crate::types::MapType;

/// Generate one map with the canonical configuration.
pub fn generate_map(seed: u32, map_type: Option<MapType>) -> GeneratedMap {
    MapGenerator::default().generate(seed, map_type)
}

/// Generate one map under `config`, rejecting configs that fail
/// [`MapGenConfig::validate`].
pub fn generate_map_with(
    config: &MapGenConfig,
    seed: u32,
    map_type: Option<MapType>,
) -> Result<GeneratedMap, ConfigError> {
    Ok(MapGenerator::try_new(config.clone())?.generate(seed, map_type))
}
