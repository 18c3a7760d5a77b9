//! The generated cave and the read-only queries renderers build on.

use serde::Serialize;
use xxhash_rust::xxh3::xxh3_64;

use crate::config::CaveConfig;
use crate::grid::Grid;
use crate::pathfinding::CavePath;
use crate::types::{CellKind, Pos, TileSize};

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Cave {
    pub config: CaveConfig,
    pub grid: Grid,
    pub entrance: Pos,
    pub exit: Pos,
    /// Shortest entrance-to-exit route found while verifying the layout.
    pub path: CavePath,
    /// Seed passed to `generate`.
    pub initial_seed: u64,
    /// Seed of the attempt that produced this cave.
    pub attempt_seed: u64,
    pub attempts: u32,
}

impl Cave {
    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }

    pub fn tile_size(&self) -> TileSize {
        self.config.tile_size
    }

    pub fn kind_at(&self, pos: Pos) -> CellKind {
        self.grid.kind_at(pos)
    }

    pub fn path_length(&self) -> u32 {
        self.path.len()
    }

    /// Centre of the tile at `pos`, in points, with the origin at the top-left
    /// corner of tile (0, 0).
    pub fn position_for(&self, pos: Pos) -> (f32, f32) {
        let tile = self.tile_size();
        (
            pos.x as f32 * tile.width + tile.width / 2.0,
            pos.y as f32 * tile.height + tile.height / 2.0,
        )
    }

    /// Tile containing the point `(x, y)`, or `None` outside the grid.
    pub fn grid_coordinate_for(&self, x: f32, y: f32) -> Option<Pos> {
        let tile = self.tile_size();
        let column = (x / tile.width).floor();
        let row = (y / tile.height).floor();
        if !column.is_finite() || !row.is_finite() || column < 0.0 || row < 0.0 {
            return None;
        }
        let pos = Pos { y: row as i32, x: column as i32 };
        self.grid.is_valid_coordinate(pos).then_some(pos)
    }

    /// Stable byte encoding of the layout and endpoints.
    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.grid.len() + 24);
        bytes.extend((self.width() as u32).to_le_bytes());
        bytes.extend((self.height() as u32).to_le_bytes());
        for kind in self.grid.raw() {
            bytes.push(kind.code() as u8);
        }
        bytes.extend(self.entrance.y.to_le_bytes());
        bytes.extend(self.entrance.x.to_le_bytes());
        bytes.extend(self.exit.y.to_le_bytes());
        bytes.extend(self.exit.x.to_le_bytes());
        bytes
    }

    pub fn fingerprint(&self) -> u64 {
        xxh3_64(&self.canonical_bytes())
    }

    /// ASCII rendering with `E` for the entrance and `X` for the exit.
    pub fn to_ascii(&self) -> String {
        let mut out = String::with_capacity((self.width() + 1) * self.height());
        for pos in self.grid.positions() {
            let glyph = if pos == self.entrance {
                'E'
            } else if pos == self.exit {
                'X'
            } else {
                self.kind_at(pos).glyph()
            };
            out.push(glyph);
            if pos.x as usize == self.width() - 1 {
                out.push('\n');
            }
        }
        out
    }
}
