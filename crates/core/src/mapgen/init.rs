//! Random wall/floor fill that seeds the automaton.

use crate::grid::Grid;
use crate::types::CellKind;

use super::seed::CaveRng;

/// Fills every cell: borders become walls, interior cells become walls with
/// `wall_birth_probability`, floors otherwise. Cells are visited row-major so
/// the same stream always yields the same grid.
pub(super) fn fill_initial_grid(grid: &mut Grid, rng: &mut CaveRng, wall_birth_probability: f64) {
    for pos in grid.positions().collect::<Vec<_>>() {
        let kind = if grid.is_border(pos) || rng.chance(wall_birth_probability) {
            CellKind::Wall
        } else {
            CellKind::Floor
        };
        grid.set(pos, kind);
    }
}
