//! Dimension rolling and the bare border/margin template with exit gaps.

use log::debug;

use crate::types::{Side, Tile};

use super::config::MapGenConfig;
use super::exits::ExitDescriptor;
use super::grid::TileGrid;
use super::rng::RangeRng;

/// Coarse placement of a cell relative to the margin band.
///
/// Derived from four margin tests weighted 3, 3, 1, 1:
/// `y >= margin` (+3), `y >= height - margin` (+3), `x >= margin` (+1),
/// `x >= width - margin` (+1). The sum identifies the band uniquely:
///
/// | code | class |
/// |---|---|
/// | 0, 2, 6, 8 | `Border` (corners) |
/// | 4 | `OpenInterior` |
/// | 1 | `EdgeNorth` |
/// | 3 | `EdgeWest` |
/// | 5 | `EdgeEast` |
/// | 7 | `EdgeSouth` |
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum LocationClass {
    Border,
    OpenInterior,
    EdgeNorth,
    EdgeWest,
    EdgeSouth,
    EdgeEast,
}

pub(super) fn classify(
    x: usize,
    y: usize,
    width: usize,
    height: usize,
    margin: usize,
) -> LocationClass {
    let code = 3 * u8::from(y >= margin)
        + 3 * u8::from(y >= height.saturating_sub(margin))
        + u8::from(x >= margin)
        + u8::from(x >= width.saturating_sub(margin));

    match code {
        4 => LocationClass::OpenInterior,
        1 => LocationClass::EdgeNorth,
        3 => LocationClass::EdgeWest,
        5 => LocationClass::EdgeEast,
        7 => LocationClass::EdgeSouth,
        _ => LocationClass::Border,
    }
}

/// Roll width then height, then shrink the larger side until the area fits.
/// Neither side shrinks below `min_dimension`, so a limit the minimum square
/// cannot meet stops the loop at `min x min`.
pub(super) fn roll_dimensions(rng: &mut impl RangeRng, config: &MapGenConfig) -> (usize, usize) {
    let min = config.min_dimension as i32;
    let max = config.max_dimension as i32;
    let mut width = rng.next_in_range(min, max) as usize;
    let mut height = rng.next_in_range(min, max) as usize;
    let floor = config.min_dimension.max(1);

    while !config.fits_area(width, height) && width.max(height) > floor {
        if height >= width {
            height -= 1;
        } else {
            width -= 1;
        }
    }
    debug!("map dimensions {width}x{height}");
    (width, height)
}

pub(super) fn build_template(
    width: usize,
    height: usize,
    margin: usize,
    exits: &[ExitDescriptor; 4],
) -> TileGrid {
    let gap = |side: Side, coordinate: usize| exits[side as usize].contains(coordinate as i32);
    let mut grid = TileGrid::filled(width, height, Tile::Wall);
    for y in 0..height {
        for x in 0..width {
            let open = match classify(x, y, width, height, margin) {
                LocationClass::Border => false,
                LocationClass::OpenInterior => true,
                LocationClass::EdgeNorth => gap(Side::North, x),
                LocationClass::EdgeSouth => gap(Side::South, x),
                LocationClass::EdgeWest => gap(Side::West, y),
                LocationClass::EdgeEast => gap(Side::East, y),
            };
            if open {
                grid.tiles[y * width + x] = Tile::Open;
            }
        }
    }
    grid
}
