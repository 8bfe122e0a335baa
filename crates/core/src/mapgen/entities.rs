//! Bounded-retry placement of the mandatory entities.

use log::debug;

use crate::types::{EntityKind, Pos, Tile};

use super::grid::TileGrid;
use super::model::EntityPlacement;
use super::rng::RangeRng;

/// Run `attempt` up to `budget` times, returning the first success.
pub(super) fn try_n_times<T>(budget: usize, mut attempt: impl FnMut() -> Option<T>) -> Option<T> {
    (0..budget).find_map(|_| attempt())
}

/// Place every entity in order. A failed entity gets `pos: None` and later
/// entities are still attempted.
pub(super) fn place_entities(
    grid: &mut TileGrid,
    rng: &mut impl RangeRng,
    focal: Pos,
    margin: usize,
    max_rerolls: usize,
    entities: &[EntityKind],
) -> Vec<EntityPlacement> {
    entities
        .iter()
        .map(|&kind| {
            let pos = place_entity(grid, rng, focal, margin, max_rerolls, kind);
            if pos.is_none() {
                debug!("no site for {kind:?} after {} tries", max_rerolls + 1);
            }
            EntityPlacement { kind, pos }
        })
        .collect()
}

fn place_entity(
    grid: &mut TileGrid,
    rng: &mut impl RangeRng,
    focal: Pos,
    margin: usize,
    max_rerolls: usize,
    kind: EntityKind,
) -> Option<Pos> {
    let (w, h, m) = (grid.width as i32, grid.height as i32, margin as i32);
    let site = try_n_times(max_rerolls + 1, || {
        let x = rng.next_in_range(m, w - 1 - m);
        // One row is kept free below for the connecting path.
        let y = rng.next_in_range(m, h - 2 - m);
        let mut candidate = Pos::new(x, y);
        if candidate.x == focal.x {
            candidate.x += 1;
        }
        if candidate.y == focal.y {
            candidate.y += 1;
        }
        let accepted = is_valid_site(grid, candidate);
        if !accepted {
            debug!("re-roll {kind:?}: {candidate:?} rejected");
        }
        accepted.then_some(candidate)
    })?;
    grid.set(site, Tile::Entity(kind));
    Some(site)
}

/// The site and the cell above must be open; the cell below may be open or path.
fn is_valid_site(grid: &TileGrid, site: Pos) -> bool {
    grid.is(site.above(), Tile::Open)
        && grid.is(site, Tile::Open)
        && matches!(grid.get(site.below()), Some(Tile::Open | Tile::Path))
}
