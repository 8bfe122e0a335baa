//! Exit entry points and the interior point every path converges on.

use serde::{Deserialize, Serialize};

use crate::types::{Pos, Side};

use super::carve::Axis;
use super::exits::ExitDescriptor;

/// Start of an exit path: one tile inside the margin, centered on the gap.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PathPoint {
    pub pos: Pos,
    pub first_axis: Axis,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(super) struct FocalLayout {
    pub(super) path_points: Vec<PathPoint>,
    pub(super) focal: Pos,
}

pub(super) fn compute_focal_layout(
    exits: &[ExitDescriptor; 4],
    width: usize,
    height: usize,
    margin: usize,
) -> FocalLayout {
    let (w, h, m) = (width as i32, height as i32, margin as i32);
    let mut path_points = Vec::with_capacity(4);
    let mut negated_sum = (0_i32, 0_i32);

    for side in Side::ALL {
        let exit = exits[side as usize];
        if !exit.present || exit.position <= 0 {
            continue;
        }
        let point = match side {
            Side::North => PathPoint { pos: Pos::new(exit.midpoint(), m), first_axis: Axis::Y },
            Side::West => PathPoint { pos: Pos::new(m, exit.midpoint()), first_axis: Axis::X },
            Side::South => {
                PathPoint { pos: Pos::new(exit.midpoint(), h - (m + 1)), first_axis: Axis::Y }
            }
            Side::East => {
                PathPoint { pos: Pos::new(w - (m + 1), exit.midpoint()), first_axis: Axis::X }
            }
        };
        negated_sum.0 -= point.pos.x;
        negated_sum.1 -= point.pos.y;
        path_points.push(point);
    }

    let focal = if path_points.is_empty() {
        Pos::new(w / 2, h / 2)
    } else {
        let points = path_points.len() as i32;
        let mut x = negated_sum.0 / points - 1;
        let mut y = negated_sum.1 / points - 1;
        if x < m {
            x += w;
        }
        if y < m {
            y += h;
        }
        Pos::new(x, y)
    };

    FocalLayout { path_points, focal }
}
