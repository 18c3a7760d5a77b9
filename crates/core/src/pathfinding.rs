//! A* search over the 4-connected floor cells of a grid.
//! Search nodes live in a per-search arena; parents are arena handles, so the
//! whole node set is dropped in one piece once the path is extracted.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::grid::Grid;
use crate::types::Pos;

/// Handle into the per-search node arena.
type NodeId = usize;

#[derive(Clone, Copy, Debug)]
struct PathNode {
    pos: Pos,
    g: u32,
    h: u32,
    parent: Option<NodeId>,
}

impl PathNode {
    fn f(&self) -> u32 {
        self.g + self.h
    }
}

/// Open-set key: lowest f first, then lowest h, then earliest insertion.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct OpenEntry {
    f: u32,
    h: u32,
    seq: u64,
    node: NodeId,
}

/// Start-to-goal route, both ends included.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CavePath {
    steps: Vec<Pos>,
}

impl CavePath {
    pub fn steps(&self) -> &[Pos] {
        &self.steps
    }

    /// Number of moves, one less than the number of cells visited.
    pub fn len(&self) -> u32 {
        self.steps.len().saturating_sub(1) as u32
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn start(&self) -> Option<Pos> {
        self.steps.first().copied()
    }

    pub fn goal(&self) -> Option<Pos> {
        self.steps.last().copied()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExpandedNode {
    pub pos: Pos,
    pub f: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchOutcome {
    pub path: Option<CavePath>,
    /// Nodes in the order they were taken off the open set.
    pub expanded: Vec<ExpandedNode>,
}

pub fn heuristic(from: Pos, to: Pos) -> u32 {
    from.manhattan(to)
}

pub fn astar_path(grid: &Grid, start: Pos, goal: Pos) -> Option<CavePath> {
    astar_search(grid, start, goal).path
}

/// Length in moves of the shortest floor route, or `None` when unreachable.
pub fn path_distance(grid: &Grid, start: Pos, goal: Pos) -> Option<u32> {
    astar_path(grid, start, goal).map(|path| path.len())
}

pub fn astar_search(grid: &Grid, start: Pos, goal: Pos) -> SearchOutcome {
    let mut expanded = Vec::new();
    if !grid.is_floor(start) || !grid.is_floor(goal) {
        return SearchOutcome { path: None, expanded };
    }

    let mut arena: Vec<PathNode> = Vec::new();
    let mut node_at: Vec<Option<NodeId>> = vec![None; grid.len()];
    let mut closed = vec![false; grid.len()];
    let mut open = BTreeSet::new();
    let mut seq = 0_u64;

    let h = heuristic(start, goal);
    arena.push(PathNode { pos: start, g: 0, h, parent: None });
    node_at[grid.index(start)] = Some(0);
    open.insert(OpenEntry { f: h, h, seq, node: 0 });

    while let Some(entry) = open.pop_first() {
        let current = arena[entry.node];
        let current_idx = grid.index(current.pos);
        if closed[current_idx] || entry.f != current.f() {
            continue;
        }
        closed[current_idx] = true;
        expanded.push(ExpandedNode { pos: current.pos, f: current.f() });

        if current.pos == goal {
            let path = reconstruct_path(&arena, entry.node);
            return SearchOutcome { path: Some(path), expanded };
        }

        for next in current.pos.neighbors() {
            if !grid.is_floor(next) {
                continue;
            }
            let next_idx = grid.index(next);
            if closed[next_idx] {
                continue;
            }
            let tentative_g = current.g + 1;
            let node = match node_at[next_idx] {
                Some(existing) if tentative_g >= arena[existing].g => continue,
                Some(existing) => {
                    let known = &mut arena[existing];
                    known.g = tentative_g;
                    known.parent = Some(entry.node);
                    existing
                }
                None => {
                    arena.push(PathNode {
                        pos: next,
                        g: tentative_g,
                        h: heuristic(next, goal),
                        parent: Some(entry.node),
                    });
                    let id = arena.len() - 1;
                    node_at[next_idx] = Some(id);
                    id
                }
            };
            seq += 1;
            let PathNode { h, .. } = arena[node];
            open.insert(OpenEntry { f: tentative_g + h, h, seq, node });
        }
    }

    SearchOutcome { path: None, expanded }
}

fn reconstruct_path(arena: &[PathNode], goal: NodeId) -> CavePath {
    let mut steps = Vec::new();
    let mut cursor = Some(goal);
    while let Some(id) = cursor {
        steps.push(arena[id].pos);
        cursor = arena[id].parent;
    }
    steps.reverse();
    CavePath { steps }
}
