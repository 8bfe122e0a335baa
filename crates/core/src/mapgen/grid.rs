//! Row-major tile buffer shared by every generation stage.

use crate::types::{Pos, Tile};

#[derive(Clone, Debug, PartialEq, Eq)]
pub(super) struct TileGrid {
    pub(super) width: usize,
    pub(super) height: usize,
    pub(super) tiles: Vec<Tile>,
}

impl TileGrid {
    pub(super) fn filled(width: usize, height: usize, tile: Tile) -> Self {
        Self { width, height, tiles: vec![tile; width * height] }
    }

    pub(super) fn index(&self, pos: Pos) -> Option<usize> {
        if pos.x < 0 || pos.y < 0 {
            return None;
        }
        let x = pos.x as usize;
        let y = pos.y as usize;
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y * self.width + x)
    }

    /// Tile at `pos`, or `None` outside the grid.
    pub(super) fn get(&self, pos: Pos) -> Option<Tile> {
        self.index(pos).map(|index| self.tiles[index])
    }

    pub(super) fn is(&self, pos: Pos, tile: Tile) -> bool {
        self.get(pos) == Some(tile)
    }

    /// Returns false when `pos` lies outside the grid.
    pub(super) fn set(&mut self, pos: Pos, tile: Tile) -> bool {
        match self.index(pos) {
            Some(index) => {
                self.tiles[index] = tile;
                true
            }
            None => false,
        }
    }
}
