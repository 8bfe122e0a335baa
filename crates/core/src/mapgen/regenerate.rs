//! Caller-side regeneration: step the seed until an attempt comes back good.

use log::debug;

use crate::types::MapType;

use super::generator::MapGenerator;
use super::model::GeneratedMap;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegeneratedMap {
    pub map: GeneratedMap,
    /// Bad attempts thrown away before `map`.
    pub discarded: u32,
}

/// Try `start_seed`, `start_seed + 1`, ... (wrapping) for at most `max_attempts`
/// attempts. Every attempt starts a fresh generator state from its own seed.
/// Build `generator` with [`MapGenerator::try_new`] when the config is untrusted.
pub fn find_good_map(
    generator: &MapGenerator,
    start_seed: u32,
    map_type: Option<MapType>,
    max_attempts: u32,
) -> Option<RegeneratedMap> {
    let mut seed = start_seed;
    for discarded in 0..max_attempts {
        let map = generator.generate(seed, map_type);
        if !map.is_bad() {
            return Some(RegeneratedMap { map, discarded });
        }
        debug!("seed {seed} discarded, trying {}", seed.wrapping_add(1));
        seed = seed.wrapping_add(1);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapgen::config::MapGenConfig;
    use crate::mapgen::generate_map;

    #[test]
    fn good_seed_is_returned_without_discards() {
        let found = find_good_map(&MapGenerator::default(), 0, None, 5).expect("seed 0 is good");
        assert_eq!(found.discarded, 0);
        assert_eq!(found.map, generate_map(0, None));
    }

    #[test]
    fn exhausted_seed_advances_to_the_next_one() {
        let found = find_good_map(&MapGenerator::default(), 56, None, 5).expect("seed 57 is good");
        assert_eq!(found.discarded, 1);
        assert_eq!(found.map.seed, 57);
        assert_eq!(found.map, generate_map(57, None));
    }

    #[test]
    fn path_hit_seed_advances_to_the_next_one() {
        let found = find_good_map(&MapGenerator::default(), 88, None, 5).expect("seed 89 is good");
        assert_eq!(found.discarded, 1);
        assert_eq!(found.map.seed, 89);
    }

    #[test]
    fn attempt_budget_is_respected() {
        assert_eq!(find_good_map(&MapGenerator::default(), 56, None, 1), None);
        assert_eq!(find_good_map(&MapGenerator::default(), 0, None, 0), None);
    }

    #[test]
    fn seed_wraps_past_u32_max() {
        let strict = MapGenerator::try_new(MapGenConfig { max_rerolls: 0, ..Default::default() })
            .expect("zero rerolls is valid");
        let found = find_good_map(&strict, u32::MAX, None, 5).expect("seed 0 is good");
        assert_eq!(found.discarded, 1);
        assert_eq!(found.map.seed, 0);
    }
}
