//! Neighbour-count smoothing rules that turn noise into cave shapes.

use std::mem;

use crate::grid::Grid;
use crate::types::{CellKind, Pos};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SmoothingRules {
    pub floors_to_wall_conversion: u32,
    pub walls_to_floor_conversion: u32,
    pub neighborhood_radius: u32,
}

/// Walls within `radius` (Chebyshev) of `pos`, excluding `pos` itself.
/// Out-of-bounds cells count as walls.
pub fn count_wall_neighbors(grid: &Grid, pos: Pos, radius: u32) -> u32 {
    let r = radius as i32;
    let mut count = 0;
    for dy in -r..=r {
        for dx in -r..=r {
            if dx == 0 && dy == 0 {
                continue;
            }
            if grid.kind_at(Pos { y: pos.y + dy, x: pos.x + dx }) == CellKind::Wall {
                count += 1;
            }
        }
    }
    count
}

/// Runs `steps` synchronous smoothing passes.
///
/// Each pass reads only the previous generation; the two buffers are swapped
/// between passes. Border cells are never rewritten.
pub fn smooth(grid: &mut Grid, rules: SmoothingRules, steps: u32) {
    let mut next = grid.clone();
    for _ in 0..steps {
        let changed = smoothing_step(grid, &mut next, rules);
        mem::swap(grid, &mut next);
        if changed == 0 {
            break;
        }
    }
}

/// Writes one generation of `current` into `next` and returns how many cells changed.
fn smoothing_step(current: &Grid, next: &mut Grid, rules: SmoothingRules) -> usize {
    let mut changed = 0;
    for pos in current.positions() {
        let kind = current.kind_at(pos);
        let updated = if current.is_border(pos) {
            kind
        } else {
            let walls = count_wall_neighbors(current, pos, rules.neighborhood_radius);
            match kind {
                CellKind::Floor if walls >= rules.floors_to_wall_conversion => CellKind::Wall,
                CellKind::Wall if walls <= rules.walls_to_floor_conversion => CellKind::Floor,
                other => other,
            }
        };
        if updated != kind {
            changed += 1;
        }
        next.set(pos, updated);
    }
    changed
}
