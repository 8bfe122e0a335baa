//! Linear congruential generator driving every random decision in map generation.

const MULTIPLIER: u32 = 0x41C6_4E6D;
const INCREMENT: u32 = 0x0000_6073;

/// Source of bounded integers. Every generation stage draws through this seam
/// so tests can substitute scripted sequences.
pub(crate) trait RangeRng {
    fn next_in_range(&mut self, a: i32, b: i32) -> i32;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MapRng {
    seed: u32,
}

impl MapRng {
    pub fn new(seed: u32) -> Self {
        Self { seed }
    }

    /// Current generator state; after a full generation this is the map's final seed.
    pub fn state(self) -> u32 {
        self.seed
    }

    /// Advance once and return a value in the inclusive range spanned by `a` and `b`.
    /// The bounds may be given in either order.
    pub fn next_in_range(&mut self, a: i32, b: i32) -> i32 {
        self.seed = self.seed.wrapping_mul(MULTIPLIER).wrapping_add(INCREMENT);
        let span = a.abs_diff(b) + 1;
        ((self.seed >> 16) % span) as i32 + a.min(b)
    }
}

impl RangeRng for MapRng {
    fn next_in_range(&mut self, a: i32, b: i32) -> i32 {
        MapRng::next_in_range(self, a, b)
    }
}
