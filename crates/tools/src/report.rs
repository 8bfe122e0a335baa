//! JSON report describing one generated map.

use serde::Serialize;

use seedmap::{Axis, EntityKind, GeneratedMap, Pos, Side};

use crate::render::render_rows;

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ExitReport {
    pub side: Side,
    pub position: i32,
    pub size: i32,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct EntityReport {
    pub kind: EntityKind,
    pub pos: Option<Pos>,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct MapReport {
    pub seed: u32,
    pub final_seed: u32,
    /// Bad attempts skipped before `seed`.
    pub discarded: u32,
    pub width: usize,
    pub height: usize,
    pub map_type: u8,
    pub bad: bool,
    pub bad_reason: Option<String>,
    pub exits: Vec<ExitReport>,
    pub path_points: Vec<(Pos, Axis)>,
    pub focal: Pos,
    pub entities: Vec<EntityReport>,
    pub fingerprint: String,
    pub rows: Vec<String>,
}

impl MapReport {
    pub fn new(map: &GeneratedMap, discarded: u32) -> Self {
        let exits = Side::ALL
            .into_iter()
            .map(|side| (side, map.exits[side as usize]))
            .filter(|(_, exit)| exit.present)
            .map(|(side, exit)| ExitReport { side, position: exit.position, size: exit.size })
            .collect();

        Self {
            seed: map.seed,
            final_seed: map.final_seed,
            discarded,
            width: map.width,
            height: map.height,
            map_type: map.map_type.bits(),
            bad: map.is_bad(),
            bad_reason: map.bad_reason.map(|reason| reason.to_string()),
            exits,
            path_points: map
                .path_points
                .iter()
                .map(|point| (point.pos, point.first_axis))
                .collect(),
            focal: map.focal,
            entities: map
                .entities
                .iter()
                .map(|placement| EntityReport { kind: placement.kind, pos: placement.pos })
                .collect(),
            fingerprint: format!("{:016x}", map.fingerprint()),
            rows: render_rows(map),
        }
    }
}
