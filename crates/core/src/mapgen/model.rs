//! Public data models for generated maps and bad-map verdicts.

use std::fmt;

use serde::{Deserialize, Serialize};
use xxhash_rust::xxh3::xxh3_64;

use crate::types::{EntityKind, MapType, Pos, Tile};

use super::carve::Axis;
use super::exits::ExitDescriptor;
use super::focal::PathPoint;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityPlacement {
    pub kind: EntityKind,
    /// `None` when every try was rejected.
    pub pos: Option<Pos>,
}

/// Why an attempt must be discarded and regenerated from another seed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BadMapReason {
    PathHitEntity { entity: EntityKind, at: Pos },
    PlacementExhausted { entity: EntityKind },
}

impl fmt::Display for BadMapReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PathHitEntity { entity, at } => {
                write!(f, "path reached {entity:?} at ({}, {})", at.x, at.y)
            }
            Self::PlacementExhausted { entity } => write!(f, "no legal site for {entity:?}"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedMap {
    pub width: usize,
    pub height: usize,
    pub tiles: Vec<Tile>,
    pub map_type: MapType,
    /// Indexed by [`crate::types::Side`].
    pub exits: [ExitDescriptor; 4],
    pub path_points: Vec<PathPoint>,
    pub focal: Pos,
    pub entities: Vec<EntityPlacement>,
    pub bad_reason: Option<BadMapReason>,
    pub seed: u32,
    pub final_seed: u32,
}

impl GeneratedMap {
    pub fn is_bad(&self) -> bool {
        self.bad_reason.is_some()
    }

    pub fn tile_at(&self, pos: Pos) -> Option<Tile> {
        if pos.x < 0 || pos.y < 0 {
            return None;
        }
        let x = pos.x as usize;
        let y = pos.y as usize;
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.tiles[y * self.width + x])
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Tile]> {
        self.tiles.chunks(self.width.max(1))
    }

    pub fn entity_pos(&self, kind: EntityKind) -> Option<Pos> {
        self.entities.iter().find(|placement| placement.kind == kind).and_then(|p| p.pos)
    }

    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend(self.seed.to_le_bytes());
        bytes.extend((self.width as u32).to_le_bytes());
        bytes.extend((self.height as u32).to_le_bytes());
        bytes.push(self.map_type.bits());
        for exit in &self.exits {
            bytes.push(u8::from(exit.present));
            bytes.extend(exit.position.to_le_bytes());
            bytes.extend(exit.size.to_le_bytes());
        }
        bytes.extend(self.tiles.iter().map(|tile| tile.code()));

        bytes.extend((self.path_points.len() as u32).to_le_bytes());
        for point in &self.path_points {
            bytes.extend(point.pos.y.to_le_bytes());
            bytes.extend(point.pos.x.to_le_bytes());
            bytes.push(match point.first_axis {
                Axis::X => 0,
                Axis::Y => 1,
            });
        }
        bytes.extend(self.focal.y.to_le_bytes());
        bytes.extend(self.focal.x.to_le_bytes());

        bytes.extend((self.entities.len() as u32).to_le_bytes());
        for placement in &self.entities {
            bytes.push(placement.kind.tile_code());
            match placement.pos {
                Some(pos) => {
                    bytes.push(1);
                    bytes.extend(pos.y.to_le_bytes());
                    bytes.extend(pos.x.to_le_bytes());
                }
                None => bytes.push(0),
            }
        }

        bytes.push(match self.bad_reason {
            None => 0,
            Some(BadMapReason::PathHitEntity { .. }) => 1,
            Some(BadMapReason::PlacementExhausted { .. }) => 2,
        });
        bytes.extend(self.final_seed.to_le_bytes());
        bytes
    }

    /// xxh3-64 of [`Self::canonical_bytes`].
    pub fn fingerprint(&self) -> u64 {
        xxh3_64(&self.canonical_bytes())
    }
}
