//! Per-side exit gaps rolled from the map-type mask.

use serde::{Deserialize, Serialize};

use crate::types::{MapType, Side};

use super::rng::RangeRng;

const MIN_EXIT_SIZE: i32 = 1;
const MAX_EXIT_SIZE: i32 = 4;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExitDescriptor {
    pub present: bool,
    /// First open cell along the side's axis.
    pub position: i32,
    pub size: i32,
}

impl ExitDescriptor {
    pub fn contains(self, coordinate: i32) -> bool {
        self.present && coordinate >= self.position && coordinate < self.position + self.size
    }

    /// Middle of the gap, rounded toward the start.
    pub fn midpoint(self) -> i32 {
        self.position + self.size / 2
    }
}

/// Length of the edge an exit on `side` runs along.
pub(super) fn side_length(side: Side, width: usize, height: usize) -> i32 {
    match side {
        Side::North | Side::South => width as i32,
        Side::West | Side::East => height as i32,
    }
}

/// Roll position and size for every side present in `map_type`, in side order.
pub(super) fn roll_exits(
    rng: &mut impl RangeRng,
    map_type: MapType,
    width: usize,
    height: usize,
    margin: usize,
) -> [ExitDescriptor; 4] {
    let margin = margin as i32;
    let mut exits = [ExitDescriptor::default(); 4];
    for side in Side::ALL {
        if !map_type.has_exit(side) {
            continue;
        }
        let length = side_length(side, width, height);
        let mut position = rng.next_in_range(margin, length - 1 - margin);
        let size = rng.next_in_range(MIN_EXIT_SIZE, MAX_EXIT_SIZE);
        let far_margin = length - margin;
        if position + size >= far_margin {
            position -= position + size - far_margin;
        }
        exits[side as usize] = ExitDescriptor { present: true, position, size };
    }
    exits
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapgen::rng::MapRng;

    #[test]
    fn absent_sides_consume_no_rolls() {
        let mut rng = MapRng::new(55);
        let exits = roll_exits(&mut rng, MapType::NONE, 12, 12, 2);
        assert_eq!(rng, MapRng::new(55));
        assert!(exits.iter().all(|exit| !exit.present));
    }

    #[test]
    fn each_present_side_consumes_two_rolls() {
        let mut rolled = MapRng::new(55);
        roll_exits(&mut rolled, MapType::new(0b1010), 12, 12, 2);

        let mut expected = MapRng::new(55);
        for _ in 0..4 {
            expected.next_in_range(0, 1);
        }
        assert_eq!(rolled.state(), expected.state());
    }

    #[test]
    fn gaps_never_reach_the_far_margin() {
        for seed in 0..500 {
            let mut rng = MapRng::new(seed);
            let width = 8 + (seed as usize % 14);
            let height = 8 + (seed as usize % 9);
            let exits = roll_exits(&mut rng, MapType::ALL_EXITS, width, height, 2);
            for side in Side::ALL {
                let exit = exits[side as usize];
                let length = side_length(side, width, height);
                assert!(exit.present);
                assert!((1..=4).contains(&exit.size));
                assert!(exit.position >= 2, "seed={seed} side={side:?} exit={exit:?}");
                assert!(exit.position + exit.size <= length - 2, "seed={seed} {exit:?}");
            }
        }
    }

    #[test]
    fn contains_covers_exactly_the_gap() {
        let exit = ExitDescriptor { present: true, position: 5, size: 3 };
        assert!(!exit.contains(4));
        assert!(exit.contains(5));
        assert!(exit.contains(7));
        assert!(!exit.contains(8));
        assert_eq!(exit.midpoint(), 6);
        assert!(!ExitDescriptor::default().contains(0));
    }
}
