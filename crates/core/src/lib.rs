pub mod mapgen;
pub mod types;

pub use mapgen::{
    Axis, BadMapReason, CarveOutcome, ConfigError, EntityPlacement, ExitDescriptor, GeneratedMap,
    InvariantViolation, MapGenConfig, MapGenerator, MapRng, PathPoint, RegeneratedMap,
    find_good_map, generate_map, generate_map_with,
};
pub use types::*;
