//! Collision-aware orthogonal path carving.
//!
//! Paths are a constrained random walk, not a search: each segment runs along
//! one axis for a rolled length, then the walk turns. A segment stops as soon
//! as it lands on or brushes against an existing path, which is what makes the
//! union of paths grow into a tree converging on the focal point.

use log::trace;
use serde::{Deserialize, Serialize};

use crate::types::{EntityKind, Pos, Tile};

use super::grid::TileGrid;
use super::rng::RangeRng;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    fn other(self) -> Self {
        match self {
            Self::X => Self::Y,
            Self::Y => Self::X,
        }
    }

    fn of(self, pos: Pos) -> i32 {
        match self {
            Self::X => pos.x,
            Self::Y => pos.y,
        }
    }

    fn offset(self, pos: Pos, delta: i32) -> Pos {
        match self {
            Self::X => Pos { y: pos.y, x: pos.x + delta },
            Self::Y => Pos { y: pos.y + delta, x: pos.x },
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CarveOutcome {
    /// Walked the whole way without touching another path.
    Reached,
    /// Stopped on or beside an existing path; counts as arriving.
    MergedEarly,
    /// Would have overwritten an entity. The map is unusable.
    HitEntity { entity: EntityKind, at: Pos },
}

/// Walk from `start` toward `destination`, alternating axes, starting on `first_axis`.
///
/// The destination cell itself is never painted; callers that need it marked
/// do so explicitly.
pub(super) fn carve_path(
    grid: &mut TileGrid,
    rng: &mut impl RangeRng,
    linearity: i32,
    start: Pos,
    first_axis: Axis,
    destination: Pos,
) -> CarveOutcome {
    let mut point = start;
    let mut axis = first_axis;
    let mut merged = false;

    while point != destination {
        let remaining = (axis.of(destination) - axis.of(point)).abs();
        let mut length = if remaining > linearity {
            rng.next_in_range(linearity, remaining)
        } else {
            remaining
        };
        if length == 0 {
            axis = axis.other();
            length = (axis.of(destination) - axis.of(point)).abs();
        }
        if axis.of(destination) < axis.of(point) {
            length = -length;
        }

        let from = point;
        point = axis.offset(point, length);
        trace!("path segment {from:?} -> {point:?}");
        match draw_line(grid, from, point) {
            CarveOutcome::Reached => {}
            CarveOutcome::MergedEarly => {
                point = destination;
                merged = true;
            }
            hit @ CarveOutcome::HitEntity { .. } => return hit,
        }
        axis = axis.other();
    }

    if merged { CarveOutcome::MergedEarly } else { CarveOutcome::Reached }
}

/// Paint a straight run from `from` up to, but not including, `to`.
pub(super) fn draw_line(grid: &mut TileGrid, from: Pos, to: Pos) -> CarveOutcome {
    let step = Pos { y: (to.y - from.y).signum(), x: (to.x - from.x).signum() };
    let mut cursor = from;
    let mut painted = 0_usize;

    while cursor != to {
        match grid.get(cursor) {
            Some(Tile::Path) => return CarveOutcome::MergedEarly,
            Some(Tile::Entity(entity)) => return CarveOutcome::HitEntity { entity, at: cursor },
            _ => {}
        }
        grid.set(cursor, Tile::Path);

        if painted > 0 {
            // Neighbors across the direction of travel.
            let left = Pos { y: cursor.y + step.x, x: cursor.x + step.y };
            let right = Pos { y: cursor.y - step.x, x: cursor.x - step.y };
            if grid.is(left, Tile::Path) || grid.is(right, Tile::Path) {
                return CarveOutcome::MergedEarly;
            }
        }

        cursor = Pos { y: cursor.y + step.y, x: cursor.x + step.x };
        painted += 1;
    }

    if grid.is(cursor, Tile::Path) { CarveOutcome::MergedEarly } else { CarveOutcome::Reached }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use super::*;

    struct NoRolls;

    impl RangeRng for NoRolls {
        fn next_in_range(&mut self, a: i32, b: i32) -> i32 {
            panic!("unexpected roll in [{a}, {b}]")
        }
    }

    struct ScriptedRng {
        values: VecDeque<i32>,
        calls: Vec<(i32, i32)>,
    }

    impl RangeRng for ScriptedRng {
        fn next_in_range(&mut self, a: i32, b: i32) -> i32 {
            self.calls.push((a, b));
            self.values.pop_front().expect("script ran out of values")
        }
    }

    fn path_cells(grid: &TileGrid) -> Vec<Pos> {
        let mut cells = Vec::new();
        for y in 0..grid.height {
            for x in 0..grid.width {
                let pos = Pos::new(x as i32, y as i32);
                if grid.is(pos, Tile::Path) {
                    cells.push(pos);
                }
            }
        }
        cells
    }

    #[test]
    fn straight_segment_stops_short_of_the_destination_cell() {
        let mut grid = TileGrid::filled(10, 5, Tile::Open);
        let outcome =
            carve_path(&mut grid, &mut NoRolls, 8, Pos::new(1, 2), Axis::X, Pos::new(6, 2));

        assert_eq!(outcome, CarveOutcome::Reached);
        assert_eq!(path_cells(&grid), (1..6).map(|x| Pos::new(x, 2)).collect::<Vec<_>>());
        assert!(grid.is(Pos::new(6, 2), Tile::Open));
    }

    #[test]
    fn short_walk_turns_once_and_finishes_the_second_axis() {
        let mut grid = TileGrid::filled(8, 6, Tile::Open);
        let outcome =
            carve_path(&mut grid, &mut NoRolls, 8, Pos::new(1, 1), Axis::X, Pos::new(4, 3));

        assert_eq!(outcome, CarveOutcome::Reached);
        assert_eq!(
            path_cells(&grid),
            vec![Pos::new(1, 1), Pos::new(2, 1), Pos::new(3, 1), Pos::new(4, 1), Pos::new(4, 2)]
        );
    }

    #[test]
    fn aligned_start_switches_axis_without_drawing_an_empty_segment() {
        let mut grid = TileGrid::filled(6, 8, Tile::Open);
        let outcome =
            carve_path(&mut grid, &mut NoRolls, 4, Pos::new(2, 1), Axis::X, Pos::new(2, 5));

        assert_eq!(outcome, CarveOutcome::Reached);
        assert_eq!(path_cells(&grid), (1..5).map(|y| Pos::new(2, y)).collect::<Vec<_>>());
    }

    #[test]
    fn long_distances_roll_segment_lengths_from_linearity_upward() {
        let mut grid = TileGrid::filled(20, 20, Tile::Open);
        let mut rng = ScriptedRng { values: VecDeque::from([5, 6, 8]), calls: Vec::new() };
        let outcome =
            carve_path(&mut grid, &mut rng, 4, Pos::new(2, 2), Axis::X, Pos::new(15, 12));

        assert_eq!(outcome, CarveOutcome::Reached);
        assert_eq!(rng.calls, vec![(4, 13), (4, 10), (4, 8)]);
        for corner in [Pos::new(7, 2), Pos::new(7, 8), Pos::new(15, 8), Pos::new(15, 11)] {
            assert!(grid.is(corner, Tile::Path), "expected path at {corner:?}");
        }
        assert!(grid.is(Pos::new(15, 12), Tile::Open));
    }

    #[test]
    fn landing_on_an_existing_path_merges_and_stops() {
        let mut grid = TileGrid::filled(10, 5, Tile::Open);
        for y in 0..5 {
            grid.set(Pos::new(5, y), Tile::Path);
        }
        let outcome =
            carve_path(&mut grid, &mut NoRolls, 8, Pos::new(1, 2), Axis::X, Pos::new(8, 2));

        assert_eq!(outcome, CarveOutcome::MergedEarly);
        assert!(grid.is(Pos::new(4, 2), Tile::Path));
        assert!(grid.is(Pos::new(6, 2), Tile::Open));
    }

    #[test]
    fn running_alongside_a_path_stops_after_the_first_step() {
        let mut grid = TileGrid::filled(10, 5, Tile::Open);
        for x in 0..10 {
            grid.set(Pos::new(x, 3), Tile::Path);
        }
        let outcome = draw_line(&mut grid, Pos::new(1, 2), Pos::new(8, 2));

        assert_eq!(outcome, CarveOutcome::MergedEarly);
        assert!(grid.is(Pos::new(1, 2), Tile::Path));
        assert!(grid.is(Pos::new(2, 2), Tile::Path));
        assert!(grid.is(Pos::new(3, 2), Tile::Open));
    }

    #[test]
    fn first_cell_beside_a_path_is_not_checked() {
        let mut grid = TileGrid::filled(10, 5, Tile::Open);
        grid.set(Pos::new(1, 3), Tile::Path);
        let outcome = draw_line(&mut grid, Pos::new(1, 2), Pos::new(5, 2));

        assert_eq!(outcome, CarveOutcome::Reached);
        assert!(grid.is(Pos::new(4, 2), Tile::Path));
    }

    #[test]
    fn entity_in_the_way_is_reported_and_left_intact() {
        let mut grid = TileGrid::filled(10, 5, Tile::Open);
        let mart = Tile::Entity(EntityKind::Mart);
        grid.set(Pos::new(4, 2), mart);
        let outcome =
            carve_path(&mut grid, &mut NoRolls, 8, Pos::new(1, 2), Axis::X, Pos::new(8, 2));

        assert_eq!(
            outcome,
            CarveOutcome::HitEntity { entity: EntityKind::Mart, at: Pos::new(4, 2) }
        );
        assert!(grid.is(Pos::new(4, 2), mart));
    }
}
