//! One generation attempt: fill, smooth, repair, place, verify.

use log::trace;

use crate::config::CaveConfig;
use crate::error::AttemptFailure;
use crate::grid::Grid;
use crate::pathfinding::{CavePath, astar_path};
use crate::types::Pos;

use super::super::automaton::{SmoothingRules, smooth};
use super::super::init::fill_initial_grid;
use super::super::placement::place_entrance_and_exit;
use super::super::regions::{find_regions, prune_to_region, select_retained_region};
use super::super::seed::CaveRng;

#[derive(Debug)]
pub(super) struct AttemptLayout {
    pub(super) grid: Grid,
    pub(super) entrance: Pos,
    pub(super) exit: Pos,
    pub(super) path: CavePath,
}

/// Runs the whole pipeline on `grid`, overwriting every cell.
pub(super) fn run_attempt(
    config: &CaveConfig,
    attempt_seed: u64,
    mut grid: Grid,
) -> Result<AttemptLayout, AttemptFailure> {
    let mut rng = CaveRng::new(attempt_seed);

    fill_initial_grid(&mut grid, &mut rng, config.wall_birth_probability);
    smooth(&mut grid, smoothing_rules(config), config.number_of_steps);

    let required = config.required_floor_cells();
    let regions = find_regions(&grid);
    let retained = select_retained_region(&regions, config.region_retention, required, &mut rng)
        .ok_or(AttemptFailure::InsufficientFloorArea { floor_cells: 0, required })?;
    let floor_cells = regions[retained].len();
    trace!(
        "seed {attempt_seed}: {} regions, retained #{retained} with {floor_cells} cells",
        regions.len()
    );

    if floor_cells < required {
        return Err(AttemptFailure::InsufficientFloorArea { floor_cells, required });
    }
    if config.connected_cave {
        let filled = prune_to_region(&mut grid, &regions, retained);
        trace!("seed {attempt_seed}: pruned {filled} disconnected floor cells");
    }

    let mut candidates = regions[retained].cells().to_vec();
    candidates.sort_unstable();
    let (entrance, exit) = place_entrance_and_exit(
        &candidates,
        config.min_distance_between_entry_and_exit,
        config.exit_placement,
        &mut rng,
    )?;

    let path = verify_route(&grid, entrance, exit, config.min_distance_between_entry_and_exit)?;
    Ok(AttemptLayout { grid, entrance, exit, path })
}

/// Confirms the exit is reachable and at least `min_length` moves away.
///
/// Placement inside one 4-connected region already implies both, so these
/// failures only surface if the earlier stages are changed.
fn verify_route(
    grid: &Grid,
    entrance: Pos,
    exit: Pos,
    min_length: u32,
) -> Result<CavePath, AttemptFailure> {
    let path = astar_path(grid, entrance, exit).ok_or(AttemptFailure::Unreachable)?;
    if path.len() < min_length {
        return Err(AttemptFailure::PathTooShort { length: path.len(), required: min_length });
    }
    Ok(path)
}

fn smoothing_rules(config: &CaveConfig) -> SmoothingRules {
    SmoothingRules {
        floors_to_wall_conversion: config.floors_to_wall_conversion,
        walls_to_floor_conversion: config.walls_to_floor_conversion,
        neighborhood_radius: config.neighborhood_radius,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExitPlacement;
    use crate::mapgen::regions::is_single_region;
    use crate::types::CellKind;

    fn blank(config: &CaveConfig) -> Grid {
        Grid::new(config.width, config.height).unwrap()
    }

    #[test]
    fn solid_rock_has_insufficient_floor() {
        let config = CaveConfig { wall_birth_probability: 1.0, ..CaveConfig::with_size(12, 12) };
        let outcome = run_attempt(&config, 9, blank(&config));
        assert!(matches!(
            outcome,
            Err(AttemptFailure::InsufficientFloorArea { floor_cells: 0, required: 7 })
        ));
    }

    #[test]
    fn open_field_yields_verified_layout() {
        let config = CaveConfig {
            wall_birth_probability: 0.0,
            number_of_steps: 0,
            min_distance_between_entry_and_exit: 4,
            exit_placement: ExitPlacement::FarthestQuartile,
            ..CaveConfig::with_size(12, 10)
        };
        let layout = run_attempt(&config, 3, blank(&config)).unwrap();
        assert_eq!(layout.grid.count(CellKind::Floor), 10 * 8);
        assert!(layout.path.len() >= 4);
        assert_eq!(layout.path.start(), Some(layout.entrance));
        assert_eq!(layout.path.goal(), Some(layout.exit));
        assert!(is_single_region(&layout.grid));
    }

    #[test]
    fn unreachable_distance_fails_placement() {
        let config = CaveConfig {
            wall_birth_probability: 0.0,
            number_of_steps: 0,
            min_distance_between_entry_and_exit: 5,
            min_floor_cells: 2,
            exit_placement: ExitPlacement::RandomSampling { attempts: 16 },
            ..CaveConfig::with_size(5, 5)
        };
        // A 3x3 interior has 9 cells but no pair is 5 apart.
        assert_eq!(
            run_attempt(&config, 11, blank(&config)).unwrap_err(),
            AttemptFailure::PlacementUnsatisfiable
        );
    }

    #[test]
    fn route_check_rejects_split_and_short_layouts() {
        let grid = Grid::from_ascii(&[
            "#########", //
            "#...#...#",
            "#########",
        ])
        .unwrap();
        assert_eq!(
            verify_route(&grid, Pos::new(1, 1), Pos::new(5, 1), 2),
            Err(AttemptFailure::Unreachable)
        );
        assert_eq!(
            verify_route(&grid, Pos::new(1, 1), Pos::new(3, 1), 5),
            Err(AttemptFailure::PathTooShort { length: 2, required: 5 })
        );
        let path = verify_route(&grid, Pos::new(5, 1), Pos::new(7, 1), 2).unwrap();
        assert_eq!(path.len(), 2);
    }
}
