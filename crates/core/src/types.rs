use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub y: i32,
    pub x: i32,
}

impl Pos {
    pub fn new(x: i32, y: i32) -> Self {
        Self { y, x }
    }

    pub fn below(self) -> Self {
        Self { y: self.y + 1, x: self.x }
    }

    pub fn above(self) -> Self {
        Self { y: self.y - 1, x: self.x }
    }
}

/// Mandatory placed entities, listed in placement order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Center,
    Mart,
}

impl EntityKind {
    pub const ALL: [EntityKind; 2] = [EntityKind::Center, EntityKind::Mart];

    pub fn tile_code(self) -> u8 {
        match self {
            Self::Center => 4,
            Self::Mart => 5,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tile {
    Open,
    Wall,
    Path,
    Entity(EntityKind),
}

impl Tile {
    pub fn code(self) -> u8 {
        match self {
            Self::Open => 0,
            Self::Wall => 1,
            Self::Path => 2,
            Self::Entity(kind) => kind.tile_code(),
        }
    }

    pub fn is_entity(self) -> bool {
        matches!(self, Self::Entity(_))
    }
}

/// Exit sides in bit order of the map-type mask.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Side {
    North,
    West,
    South,
    East,
}

impl Side {
    pub const ALL: [Side; 4] = [Side::North, Side::West, Side::South, Side::East];

    pub fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

/// Four-bit mask selecting which sides carry an exit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MapType(u8);

impl MapType {
    pub const NONE: MapType = MapType(0);
    pub const ALL_EXITS: MapType = MapType(0b1111);

    pub fn new(bits: u8) -> Self {
        Self(bits & 0b1111)
    }

    pub fn bits(self) -> u8 {
        self.0
    }

    pub fn has_exit(self, side: Side) -> bool {
        self.0 & side.bit() != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tile_codes_skip_three() {
        let codes: Vec<u8> = [
            Tile::Open,
            Tile::Wall,
            Tile::Path,
            Tile::Entity(EntityKind::Center),
            Tile::Entity(EntityKind::Mart),
        ]
        .into_iter()
        .map(Tile::code)
        .collect();
        assert_eq!(codes, vec![0, 1, 2, 4, 5]);
    }

    #[test]
    fn map_type_bits_follow_north_west_south_east_order() {
        let map_type = MapType::new(0b0101);
        assert!(map_type.has_exit(Side::North));
        assert!(!map_type.has_exit(Side::West));
        assert!(map_type.has_exit(Side::South));
        assert!(!map_type.has_exit(Side::East));
        assert_eq!(MapType::new(0xF3).bits(), 0x3);
    }
}
