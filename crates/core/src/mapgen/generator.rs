//! Generation orchestration: runs every stage in order over one grid and one PRNG.

use log::debug;

use crate::types::{MapType, Pos, Tile};

use super::carve::{Axis, CarveOutcome, carve_path};
use super::config::{ConfigError, MapGenConfig};
use super::entities::place_entities;
use super::exits::roll_exits;
use super::focal::{FocalLayout, PathPoint, compute_focal_layout};
use super::grid::TileGrid;
use super::model::{BadMapReason, EntityPlacement, GeneratedMap};
use super::rng::MapRng;
use super::template::{build_template, roll_dimensions};

const MAP_TYPE_COUNT: i32 = 16;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum GenerationStage {
    RollDimensions,
    RollExitsAndTemplate,
    ComputeFocalPoint,
    CarveExitPaths,
    PlaceEntities,
    CarveEntityPaths,
    Done,
}

pub struct MapGenerator {
    config: MapGenConfig,
}

impl MapGenerator {
    /// The config is trusted as given; use [`Self::try_new`] for untrusted input.
    /// An unvalidated config still never panics, but its maps carry no
    /// invariant guarantees.
    pub fn new(config: MapGenConfig) -> Self {
        Self { config }
    }

    pub fn try_new(config: MapGenConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(config))
    }

    pub fn config(&self) -> &MapGenConfig {
        &self.config
    }

    /// Run one generation attempt. With `map_type` unset, the mask is rolled
    /// right after the dimensions.
    pub fn generate(&self, seed: u32, map_type: Option<MapType>) -> GeneratedMap {
        let margin = self.config.margin;
        let mut rng = MapRng::new(seed);

        enter(seed, GenerationStage::RollDimensions);
        let (width, height) = roll_dimensions(&mut rng, &self.config);
        let map_type = map_type
            .unwrap_or_else(|| MapType::new(rng.next_in_range(0, MAP_TYPE_COUNT - 1) as u8));

        enter(seed, GenerationStage::RollExitsAndTemplate);
        let exits = roll_exits(&mut rng, map_type, width, height, margin);
        let grid = build_template(width, height, margin, &exits);

        enter(seed, GenerationStage::ComputeFocalPoint);
        let FocalLayout { path_points, focal } =
            compute_focal_layout(&exits, width, height, margin);
        debug!("seed {seed}: {} path points, focal {focal:?}", path_points.len());

        let mut attempt = Attempt {
            config: &self.config,
            seed,
            rng,
            grid,
            focal,
            entities: Vec::with_capacity(self.config.entities.len()),
        };
        let bad_reason = attempt.run(&path_points).err();
        enter(seed, GenerationStage::Done);
        if let Some(reason) = bad_reason {
            debug!("seed {seed}: bad map, {reason}");
        }

        GeneratedMap {
            width,
            height,
            tiles: attempt.grid.tiles,
            map_type,
            exits,
            path_points,
            focal,
            entities: attempt.entities,
            bad_reason,
            seed,
            final_seed: attempt.rng.state(),
        }
    }
}

impl Default for MapGenerator {
    fn default() -> Self {
        Self::new(MapGenConfig::default())
    }
}

fn enter(seed: u32, stage: GenerationStage) {
    debug!("seed {seed}: {stage:?}");
}

/// Mutable state of the stages that can end the attempt early.
struct Attempt<'a> {
    config: &'a MapGenConfig,
    seed: u32,
    rng: MapRng,
    grid: TileGrid,
    focal: Pos,
    entities: Vec<EntityPlacement>,
}

impl Attempt<'_> {
    /// Each `?` is a bad-map check; the first verdict ends the attempt.
    fn run(&mut self, path_points: &[PathPoint]) -> Result<(), BadMapReason> {
        enter(self.seed, GenerationStage::CarveExitPaths);
        self.carve_exit_paths(path_points)?;
        enter(self.seed, GenerationStage::PlaceEntities);
        self.place_entities()?;
        enter(self.seed, GenerationStage::CarveEntityPaths);
        self.carve_entity_paths()
    }

    fn carve_exit_paths(&mut self, path_points: &[PathPoint]) -> Result<(), BadMapReason> {
        for point in path_points {
            self.carve(point.pos, point.first_axis)?;
        }
        self.grid.set(self.focal, Tile::Path);
        Ok(())
    }

    fn place_entities(&mut self) -> Result<(), BadMapReason> {
        self.entities = place_entities(
            &mut self.grid,
            &mut self.rng,
            self.focal,
            self.config.margin,
            self.config.max_rerolls,
            &self.config.entities,
        );
        match self.entities.iter().find(|placement| placement.pos.is_none()) {
            Some(failed) => Err(BadMapReason::PlacementExhausted { entity: failed.kind }),
            None => Ok(()),
        }
    }

    fn carve_entity_paths(&mut self) -> Result<(), BadMapReason> {
        let entrances: Vec<Pos> =
            self.entities.iter().filter_map(|placement| placement.pos).map(Pos::below).collect();
        for entrance in entrances {
            self.carve(entrance, Axis::X)?;
        }
        Ok(())
    }

    fn carve(&mut self, start: Pos, first_axis: Axis) -> Result<(), BadMapReason> {
        let linearity = self.config.path_linearity as i32;
        match carve_path(&mut self.grid, &mut self.rng, linearity, start, first_axis, self.focal) {
            CarveOutcome::Reached | CarveOutcome::MergedEarly => Ok(()),
            CarveOutcome::HitEntity { entity, at } => {
                Err(BadMapReason::PathHitEntity { entity, at })
            }
        }
    }
}
