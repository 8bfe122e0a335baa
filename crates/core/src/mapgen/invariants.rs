//! Structural checks every non-bad map must pass.

use std::collections::{BTreeSet, VecDeque};
use std::error::Error;
use std::fmt;

use crate::types::{EntityKind, Pos, Tile};

use super::config::MapGenConfig;
use super::model::{BadMapReason, GeneratedMap};
use super::template::build_template;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InvariantViolation {
    BadMap(BadMapReason),
    DimensionsOutOfRange { width: usize, height: usize },
    AreaLimitExceeded { width: usize, height: usize },
    TileCountMismatch { expected: usize, found: usize },
    /// A wall where the template is open, or the reverse.
    WallMismatch(Pos),
    /// A carved or occupied exit gap with every entity inside the interior.
    GapNotOpen(Pos),
    FocalNotPath(Pos),
    EntityMissing(EntityKind),
    StrayEntityTile(Pos),
    EntranceNotPath(EntityKind),
    PathPointNotCarved(Pos),
    PathsDisconnected { reachable: usize, total: usize },
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BadMap(reason) => write!(f, "map is bad: {reason}"),
            Self::DimensionsOutOfRange { width, height } => {
                write!(f, "{width}x{height} is outside the configured dimension range")
            }
            Self::AreaLimitExceeded { width, height } => {
                write!(f, "{width}x{height} exceeds the area limit")
            }
            Self::TileCountMismatch { expected, found } => {
                write!(f, "expected {expected} tiles, found {found}")
            }
            Self::WallMismatch(pos) => {
                write!(f, "wall at ({}, {}) disagrees with the template", pos.x, pos.y)
            }
            Self::GapNotOpen(pos) => {
                write!(f, "exit gap cell ({}, {}) is not open", pos.x, pos.y)
            }
            Self::FocalNotPath(pos) => {
                write!(f, "focal point ({}, {}) is not carved", pos.x, pos.y)
            }
            Self::EntityMissing(kind) => write!(f, "{kind:?} is not on the grid"),
            Self::StrayEntityTile(pos) => {
                write!(f, "unrecorded entity tile at ({}, {})", pos.x, pos.y)
            }
            Self::EntranceNotPath(kind) => write!(f, "no path below {kind:?}"),
            Self::PathPointNotCarved(pos) => {
                write!(f, "path point ({}, {}) is not carved", pos.x, pos.y)
            }
            Self::PathsDisconnected { reachable, total } => {
                write!(f, "only {reachable} of {total} path tiles are connected")
            }
        }
    }
}

impl Error for InvariantViolation {}

impl GeneratedMap {
    /// Verify the structural guarantees of a finished map. Bad maps fail
    /// immediately with their verdict.
    pub fn check_invariants(&self, config: &MapGenConfig) -> Result<(), InvariantViolation> {
        if let Some(reason) = self.bad_reason {
            return Err(InvariantViolation::BadMap(reason));
        }
        self.check_dimensions(config)?;
        self.check_template(config.margin)?;

        if self.tile_at(self.focal) != Some(Tile::Path) {
            return Err(InvariantViolation::FocalNotPath(self.focal));
        }
        self.check_entities()?;
        if let Some(point) =
            self.path_points.iter().find(|point| self.tile_at(point.pos) != Some(Tile::Path))
        {
            return Err(InvariantViolation::PathPointNotCarved(point.pos));
        }
        self.check_path_connectivity()
    }

    fn check_dimensions(&self, config: &MapGenConfig) -> Result<(), InvariantViolation> {
        let (width, height) = (self.width, self.height);
        let range = config.min_dimension..=config.max_dimension;
        if !range.contains(&width) || !range.contains(&height) {
            return Err(InvariantViolation::DimensionsOutOfRange { width, height });
        }
        if !config.fits_area(width, height) {
            return Err(InvariantViolation::AreaLimitExceeded { width, height });
        }
        if self.tiles.len() != width * height {
            return Err(InvariantViolation::TileCountMismatch {
                expected: width * height,
                found: self.tiles.len(),
            });
        }
        Ok(())
    }

    /// Carving only ever replaces open cells, so the wall set is exactly the
    /// template's. Gap cells in the margin band stay open unless an entity or
    /// its entrance was nudged into the band.
    fn check_template(&self, margin: usize) -> Result<(), InvariantViolation> {
        let template = build_template(self.width, self.height, margin, &self.exits);
        let mismatch = self
            .tiles
            .iter()
            .zip(&template.tiles)
            .position(|(&tile, &expected)| (tile == Tile::Wall) != (expected == Tile::Wall));
        if let Some(index) = mismatch {
            return Err(InvariantViolation::WallMismatch(self.pos_of(index)));
        }

        let interior = |pos: Pos| {
            let margin = margin as i32;
            (margin..self.width as i32 - margin).contains(&pos.x)
                && (margin..self.height as i32 - margin).contains(&pos.y)
        };
        let nudged = self
            .entities
            .iter()
            .filter_map(|placement| placement.pos)
            .any(|pos| !interior(pos) || !interior(pos.below()));
        if nudged {
            return Ok(());
        }
        let blocked_gap = self.tiles.iter().zip(&template.tiles).enumerate().position(
            |(index, (&tile, &expected))| {
                expected == Tile::Open && tile != Tile::Open && !interior(self.pos_of(index))
            },
        );
        match blocked_gap {
            Some(index) => Err(InvariantViolation::GapNotOpen(self.pos_of(index))),
            None => Ok(()),
        }
    }

    fn check_entities(&self) -> Result<(), InvariantViolation> {
        for placement in &self.entities {
            let Some(pos) = placement.pos else {
                return Err(InvariantViolation::EntityMissing(placement.kind));
            };
            if self.tile_at(pos) != Some(Tile::Entity(placement.kind)) {
                return Err(InvariantViolation::EntityMissing(placement.kind));
            }
            if self.tile_at(pos.below()) != Some(Tile::Path) {
                return Err(InvariantViolation::EntranceNotPath(placement.kind));
            }
        }
        let recorded: BTreeSet<Pos> =
            self.entities.iter().filter_map(|placement| placement.pos).collect();
        for (index, tile) in self.tiles.iter().enumerate() {
            let pos = self.pos_of(index);
            if tile.is_entity() && !recorded.contains(&pos) {
                return Err(InvariantViolation::StrayEntityTile(pos));
            }
        }
        Ok(())
    }

    fn check_path_connectivity(&self) -> Result<(), InvariantViolation> {
        let total = self.tiles.iter().filter(|&&tile| tile == Tile::Path).count();
        let mut visited = BTreeSet::from([self.focal]);
        let mut queue = VecDeque::from([self.focal]);
        while let Some(pos) = queue.pop_front() {
            for next in [
                Pos { y: pos.y - 1, x: pos.x },
                Pos { y: pos.y + 1, x: pos.x },
                Pos { y: pos.y, x: pos.x - 1 },
                Pos { y: pos.y, x: pos.x + 1 },
            ] {
                if self.tile_at(next) == Some(Tile::Path) && visited.insert(next) {
                    queue.push_back(next);
                }
            }
        }
        if visited.len() == total {
            Ok(())
        } else {
            Err(InvariantViolation::PathsDisconnected { reachable: visited.len(), total })
        }
    }

    fn pos_of(&self, index: usize) -> Pos {
        Pos::new((index % self.width) as i32, (index / self.width) as i32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapgen::generator::MapGenerator;
    use crate::types::MapType;

    fn reference_map() -> GeneratedMap {
        MapGenerator::default().generate(0, Some(MapType::ALL_EXITS))
    }

    #[test]
    fn reference_map_passes() {
        assert_eq!(reference_map().check_invariants(&MapGenConfig::default()), Ok(()));
    }

    #[test]
    fn bad_maps_fail_with_their_verdict() {
        let map = MapGenerator::default().generate(56, None);
        let err = map.check_invariants(&MapGenConfig::default()).expect_err("seed 56 is bad");
        assert!(matches!(err, InvariantViolation::BadMap(BadMapReason::PlacementExhausted { .. })));
    }

    #[test]
    fn carved_wall_is_detected() {
        let mut map = reference_map();
        map.tiles[0] = Tile::Path;
        assert_eq!(
            map.check_invariants(&MapGenConfig::default()),
            Err(InvariantViolation::WallMismatch(Pos::new(0, 0)))
        );
    }

    #[test]
    fn reference_map_keeps_every_exit_gap_open() {
        let map = reference_map();
        let rows: Vec<&[Tile]> = map.rows().collect();
        assert_eq!(rows[0][3], Tile::Open);
        assert_eq!(rows[27][2..6], [Tile::Open; 4]);
        assert_eq!(rows[12][..2], [Tile::Open; 2]);
        assert_eq!(rows[5][6..], [Tile::Open; 2]);
    }

    #[test]
    fn carved_exit_gap_is_detected() {
        let mut map = reference_map();
        let index = 12 * map.width;
        assert_eq!(map.tiles[index], Tile::Open);
        map.tiles[index] = Tile::Path;
        assert_eq!(
            map.check_invariants(&MapGenConfig::default()),
            Err(InvariantViolation::GapNotOpen(Pos::new(0, 12)))
        );
    }

    #[test]
    fn entity_nudged_into_the_band_may_leave_its_gap_carved() {
        let map = MapGenerator::default().generate(355, None);
        assert!(!map.is_bad());
        assert_eq!(map.entity_pos(EntityKind::Center), Some(Pos::new(2, 5)));
        assert_eq!(map.tile_at(Pos::new(2, 6)), Some(Tile::Path));
        assert_eq!(map.check_invariants(&MapGenConfig::default()), Ok(()));
    }

    #[test]
    fn isolated_path_tile_is_detected() {
        let mut map = reference_map();
        let index = 26 * map.width + 2;
        assert_eq!(map.tiles[index], Tile::Open);
        map.tiles[index] = Tile::Path;
        assert!(matches!(
            map.check_invariants(&MapGenConfig::default()),
            Err(InvariantViolation::PathsDisconnected { .. })
        ));
    }

    #[test]
    fn entity_without_entrance_is_detected() {
        let mut map = reference_map();
        let center = map.entity_pos(EntityKind::Center).expect("reference map places Center");
        let below = center.below();
        map.tiles[below.y as usize * map.width + below.x as usize] = Tile::Open;
        assert_eq!(
            map.check_invariants(&MapGenConfig::default()),
            Err(InvariantViolation::EntranceNotPath(EntityKind::Center))
        );
    }

    #[test]
    fn tighter_config_flags_out_of_range_dimensions() {
        let config = MapGenConfig { max_dimension: 20, ..Default::default() };
        assert_eq!(
            reference_map().check_invariants(&config),
            Err(InvariantViolation::DimensionsOutOfRange { width: 8, height: 28 })
        );
    }
}
