//! Tunable generation bounds. The defaults reproduce the canonical map variant.

use std::error::Error;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::EntityKind;

/// Block-to-tile expansion used by the in-game memory budget.
const BLOCK_TILES: usize = 4;
const WIDTH_PADDING: usize = 15;
const HEIGHT_PADDING: usize = 14;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapGenConfig {
    pub min_dimension: usize,
    pub max_dimension: usize,
    pub margin: usize,
    /// Exclusive upper bound for [`tile_area`].
    pub area_limit: usize,
    pub max_rerolls: usize,
    /// Paths travel at least this far before turning, unless the destination is closer.
    pub path_linearity: usize,
    pub entities: Vec<EntityKind>,
}

impl Default for MapGenConfig {
    fn default() -> Self {
        Self {
            min_dimension: 8,
            max_dimension: 30,
            margin: 2,
            area_limit: 0x2800,
            max_rerolls: 10,
            path_linearity: 4,
            entities: EntityKind::ALL.to_vec(),
        }
    }
}

impl MapGenConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_dimension > self.max_dimension {
            return Err(ConfigError::InvertedDimensions {
                min: self.min_dimension,
                max: self.max_dimension,
            });
        }
        if self.margin == 0 {
            return Err(ConfigError::ZeroMargin);
        }
        let smallest_usable = 2 * self.margin + 4;
        if self.min_dimension < smallest_usable {
            return Err(ConfigError::DimensionTooSmall {
                min: self.min_dimension,
                required: smallest_usable,
            });
        }
        let smallest_area = tile_area(self.min_dimension, self.min_dimension);
        if smallest_area >= self.area_limit {
            return Err(ConfigError::AreaLimitUnreachable {
                limit: self.area_limit,
                smallest_area,
            });
        }
        if self.path_linearity == 0 {
            return Err(ConfigError::ZeroPathLinearity);
        }
        for (index, kind) in self.entities.iter().enumerate() {
            if self.entities[..index].contains(kind) {
                return Err(ConfigError::DuplicateEntity(*kind));
            }
        }
        Ok(())
    }

    pub(super) fn fits_area(&self, width: usize, height: usize) -> bool {
        tile_area(width, height) < self.area_limit
    }
}

/// In-game tile footprint of a `width` x `height` block map.
pub fn tile_area(width: usize, height: usize) -> usize {
    (width * BLOCK_TILES + WIDTH_PADDING) * (height * BLOCK_TILES + HEIGHT_PADDING)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvertedDimensions { min: usize, max: usize },
    ZeroMargin,
    DimensionTooSmall { min: usize, required: usize },
    AreaLimitUnreachable { limit: usize, smallest_area: usize },
    ZeroPathLinearity,
    DuplicateEntity(EntityKind),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvertedDimensions { min, max } => {
                write!(f, "min_dimension {min} exceeds max_dimension {max}")
            }
            Self::ZeroMargin => write!(f, "margin must be at least 1"),
            Self::DimensionTooSmall { min, required } => {
                write!(f, "min_dimension {min} is below the {required} blocks the margin needs")
            }
            Self::AreaLimitUnreachable { limit, smallest_area } => write!(
                f,
                "area_limit {limit:#x} is not above the smallest map area {smallest_area:#x}"
            ),
            Self::ZeroPathLinearity => write!(f, "path_linearity must be at least 1"),
            Self::DuplicateEntity(kind) => write!(f, "entity {kind:?} is listed more than once"),
        }
    }
}

impl Error for ConfigError {}
