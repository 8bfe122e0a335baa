//! ASCII rendering of a generated map.

use seedmap::{EntityKind, GeneratedMap, Tile};

pub fn tile_char(tile: Tile) -> char {
    match tile {
        Tile::Open => '.',
        Tile::Wall => '#',
        Tile::Path => '=',
        Tile::Entity(EntityKind::Center) => 'C',
        Tile::Entity(EntityKind::Mart) => 'M',
    }
}

pub fn render_rows(map: &GeneratedMap) -> Vec<String> {
    map.rows().map(|row| row.iter().copied().map(tile_char).collect()).collect()
}

/// One line per grid row, newline-terminated.
pub fn render_ascii(map: &GeneratedMap) -> String {
    let mut out = String::with_capacity((map.width + 1) * map.height);
    for row in render_rows(map) {
        out.push_str(&row);
        out.push('\n');
    }
    out
}
