//! Entrance and exit selection inside the retained floor region.

use crate::config::ExitPlacement;
use crate::error::AttemptFailure;
use crate::types::Pos;

use super::seed::CaveRng;

/// Picks an entrance uniformly from `candidates`, then an exit whose
/// straight-line distance to it is at least `min_distance`.
pub(super) fn place_entrance_and_exit(
    candidates: &[Pos],
    min_distance: u32,
    policy: ExitPlacement,
    rng: &mut CaveRng,
) -> Result<(Pos, Pos), AttemptFailure> {
    if candidates.len() < 2 {
        return Err(AttemptFailure::PlacementUnsatisfiable);
    }
    let entrance = candidates[rng.index(candidates.len())];
    let min_distance = f64::from(min_distance);

    let exit = match policy {
        ExitPlacement::RandomSampling { attempts } => {
            (0..attempts).map(|_| candidates[rng.index(candidates.len())]).find(|&candidate| {
                candidate != entrance && entrance.euclidean(candidate) >= min_distance
            })
        }
        ExitPlacement::FarthestQuartile => {
            farthest_quartile_exit(candidates, entrance, min_distance, rng)
        }
    };

    exit.map(|exit| (entrance, exit)).ok_or(AttemptFailure::PlacementUnsatisfiable)
}

fn farthest_quartile_exit(
    candidates: &[Pos],
    entrance: Pos,
    min_distance: f64,
    rng: &mut CaveRng,
) -> Option<Pos> {
    let mut ranked: Vec<(f64, Pos)> = candidates
        .iter()
        .filter(|&&candidate| candidate != entrance)
        .map(|&candidate| (entrance.euclidean(candidate), candidate))
        .collect();
    ranked.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.cmp(&b.1)));

    let quartile = ranked.len().div_ceil(4);
    let eligible: Vec<Pos> = ranked
        .iter()
        .take(quartile)
        .filter(|(distance, _)| *distance >= min_distance)
        .map(|&(_, pos)| pos)
        .collect();
    if eligible.is_empty() {
        return None;
    }
    Some(eligible[rng.index(eligible.len())])
}
