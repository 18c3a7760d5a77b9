//! Flood-fill region analysis and pruning of disconnected floor pockets.

use std::collections::VecDeque;

use crate::config::RegionRetention;
use crate::grid::Grid;
use crate::types::{CellKind, Pos};

use super::seed::CaveRng;

/// A maximal 4-connected set of floor cells.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Region {
    cells: Vec<Pos>,
    top_left: Pos,
}

impl Region {
    /// Cells in flood-fill discovery order.
    pub fn cells(&self) -> &[Pos] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Top-left corner of the bounding box.
    pub fn top_left(&self) -> Pos {
        self.top_left
    }
}

/// Partitions the floor cells of `grid` into regions, ordered by the
/// row-major position of each region's first cell.
pub fn find_regions(grid: &Grid) -> Vec<Region> {
    let mut seen = vec![false; grid.len()];
    let mut regions = Vec::new();

    for start in grid.positions() {
        if seen[grid.index(start)] || !grid.is_floor(start) {
            continue;
        }
        seen[grid.index(start)] = true;

        let mut cells = Vec::new();
        let mut top_left = start;
        let mut queue = VecDeque::from([start]);
        while let Some(current) = queue.pop_front() {
            cells.push(current);
            top_left.y = top_left.y.min(current.y);
            top_left.x = top_left.x.min(current.x);
            for next in current.neighbors() {
                if grid.is_floor(next) && !seen[grid.index(next)] {
                    seen[grid.index(next)] = true;
                    queue.push_back(next);
                }
            }
        }
        regions.push(Region { cells, top_left });
    }

    regions
}

/// Index of the largest region; ties go to the lowest `(y, x)` bounding-box corner.
pub fn largest_region(regions: &[Region]) -> Option<usize> {
    regions
        .iter()
        .enumerate()
        .min_by_key(|(_, region)| {
            (usize::MAX - region.len(), region.top_left.y, region.top_left.x)
        })
        .map(|(index, _)| index)
}

/// Picks the region that survives repair, or `None` if there is no floor at all.
///
/// `Random` draws among regions of at least `min_cells`, falling back to the
/// largest one when none qualifies.
pub(super) fn select_retained_region(
    regions: &[Region],
    retention: RegionRetention,
    min_cells: usize,
    rng: &mut CaveRng,
) -> Option<usize> {
    match retention {
        RegionRetention::Largest => largest_region(regions),
        RegionRetention::Random => {
            let eligible: Vec<usize> = regions
                .iter()
                .enumerate()
                .filter(|(_, region)| region.len() >= min_cells)
                .map(|(index, _)| index)
                .collect();
            if eligible.is_empty() {
                largest_region(regions)
            } else {
                Some(eligible[rng.index(eligible.len())])
            }
        }
    }
}

/// Turns every floor cell outside `regions[keep]` into wall and returns the
/// number of cells filled.
pub fn prune_to_region(grid: &mut Grid, regions: &[Region], keep: usize) -> usize {
    let mut filled = 0;
    for (index, region) in regions.iter().enumerate() {
        if index == keep {
            continue;
        }
        for &pos in region.cells() {
            grid.set(pos, CellKind::Wall);
            filled += 1;
        }
    }
    filled
}

/// True when all floor cells form at most one region.
pub fn is_single_region(grid: &Grid) -> bool {
    find_regions(grid).len() <= 1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_caves() -> Grid {
        Grid::from_ascii(&[
            "##########", //
            "#..##....#",
            "#..##....#",
            "######...#",
            "#.########",
            "##########",
        ])
        .unwrap()
    }

    #[test]
    fn regions_partition_the_floor() {
        let grid = two_caves();
        let regions = find_regions(&grid);
        assert_eq!(regions.len(), 3);
        assert_eq!(regions.iter().map(Region::len).collect::<Vec<_>>(), vec![4, 11, 1]);
        let total: usize = regions.iter().map(Region::len).sum();
        assert_eq!(total, grid.count(CellKind::Floor));
        assert_eq!(regions[1].top_left(), Pos::new(5, 1));
    }

    #[test]
    fn diagonal_contact_does_not_join_regions() {
        let grid = Grid::from_ascii(&["####", "#.##", "##.#", "####"]).unwrap();
        assert_eq!(find_regions(&grid).len(), 2);
    }

    #[test]
    fn largest_region_breaks_ties_by_bounding_box_corner() {
        let grid = Grid::from_ascii(&[
            "#######", //
            "#..#..#",
            "#######",
            "#..####",
            "#######",
        ])
        .unwrap();
        let regions = find_regions(&grid);
        assert_eq!(regions.len(), 3);
        let keep = largest_region(&regions).unwrap();
        assert_eq!(regions[keep].top_left(), Pos::new(1, 1));
    }

    #[test]
    fn pruning_leaves_a_single_region() {
        let mut grid = two_caves();
        let regions = find_regions(&grid);
        let keep = largest_region(&regions).unwrap();
        let filled = prune_to_region(&mut grid, &regions, keep);
        assert_eq!(filled, 5);
        assert!(is_single_region(&grid));
        assert_eq!(grid.count(CellKind::Floor), 11);
        assert_eq!(grid.kind_at(Pos::new(1, 4)), CellKind::Wall);
    }

    #[test]
    fn random_retention_only_draws_usable_regions() {
        let grid = two_caves();
        let regions = find_regions(&grid);
        for seed in 0..32 {
            let mut rng = CaveRng::new(seed);
            let picked =
                select_retained_region(&regions, RegionRetention::Random, 4, &mut rng).unwrap();
            assert!(regions[picked].len() >= 4);
        }
        let fallback =
            select_retained_region(&regions, RegionRetention::Random, 50, &mut CaveRng::new(1));
        assert_eq!(fallback, Some(1));
    }

    #[test]
    fn solid_rock_has_no_regions() {
        let grid = Grid::from_ascii(&["###", "###"]).unwrap();
        assert!(find_regions(&grid).is_empty());
        assert_eq!(largest_region(&[]), None);
        assert!(is_single_region(&grid));
    }
}
