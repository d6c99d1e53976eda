//! Crowding-distance based survivor selection.

use super::ranking::sort_by_survival;
use crate::error::{SelectionError, SelectionResult};
use crate::pareto::{crowding_distances, non_dominated_sort, ObjectiveMatrix};
use crate::population::{Candidate, CrowdingDistance};
use std::collections::{BTreeMap, HashSet};

/// Assigns crowding distance to every candidate, one front at a time.
///
/// Every candidate must already carry a Pareto rank; the first one without
/// is reported as [`SelectionError::MissingRank`]. Returns annotated copies
/// in input order.
pub fn assign_crowding_distances(candidates: &[Candidate]) -> SelectionResult<Vec<Candidate>> {
    let mut groups: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    for (i, c) in candidates.iter().enumerate() {
        groups.entry(c.require_rank()?).or_default().push(i);
    }
    if candidates.is_empty() {
        return Ok(Vec::new());
    }

    let matrix = ObjectiveMatrix::from_candidates(candidates)?;
    let mut distances = vec![CrowdingDistance::default(); candidates.len()];

    for (rank, members) in &groups {
        let rows: Vec<Vec<f64>> = members.iter().map(|&i| matrix.row(i).to_vec()).collect();
        let front_distances = crowding_distances(&rows, matrix.num_objectives());
        for (&i, d) in members.iter().zip(front_distances) {
            distances[i] = d;
        }
        log::trace!("front {rank}: {} members", members.len());
    }

    log::debug!(
        "assigned crowding distances to {} candidates across {} fronts",
        candidates.len(),
        groups.len()
    );

    Ok(candidates
        .iter()
        .zip(distances)
        .map(|(c, d)| c.with_crowding_distance(d))
        .collect())
}

/// Trims candidates to `count`, keeping the best fronts and, within the
/// cutoff front, the most isolated members.
///
/// Requires `1 <= count <= candidates.len()` and rank plus crowding
/// distance on every candidate.
pub fn select_by_crowding_distance(
    candidates: &[Candidate],
    count: usize,
) -> SelectionResult<Vec<Candidate>> {
    validate_count("count", count, candidates.len())?;

    let mut sorted = sort_by_survival(candidates)?;
    sorted.truncate(count);
    Ok(sorted)
}

/// NSGA-II environmental selection over the combined parents and offspring.
///
/// # Algorithm (Deb et al., 2002)
///
/// 1. Non-dominated sort of the combined set
/// 2. Crowding distance within every front
/// 3. Whole fronts are added in rank order while they fit
/// 4. The first front that does not fit contributes its
///    highest-crowding-distance members, boundary solutions first
///
/// The result has exactly `target_size` candidates, grouped by front and,
/// within each front, ordered by descending crowding distance. Every
/// returned candidate carries its rank and distance.
///
/// # Errors
///
/// - `target_size == 0`: [`SelectionError::InvalidParameter`]
/// - `target_size > candidates.len()`: [`SelectionError::CountExceedsPopulation`]
/// - missing or non-finite normalized objectives on any candidate
/// - a repeated candidate id: [`SelectionError::DuplicateId`]
///
/// # Example
///
/// ```
/// use u_evoselect::crowding::environmental_selection;
/// use u_evoselect::population::Candidate;
///
/// let combined = vec![
///     Candidate::new("a", 0).with_normalized_objectives([("acc", 0.9), ("lat", 0.9)]),
///     Candidate::new("b", 0).with_normalized_objectives([("acc", 0.8), ("lat", 0.8)]),
///     Candidate::new("c", 1).with_normalized_objectives([("acc", 0.85), ("lat", 0.7)]),
///     Candidate::new("d", 1).with_normalized_objectives([("acc", 0.7), ("lat", 0.85)]),
/// ];
///
/// let next = environmental_selection(&combined, 3).unwrap();
/// let ids: Vec<&str> = next.iter().map(|c| c.id.as_str()).collect();
/// assert_eq!(ids, vec!["a", "c", "d"]);
/// ```
pub fn environmental_selection(
    candidates: &[Candidate],
    target_size: usize,
) -> SelectionResult<Vec<Candidate>> {
    validate_count("target_size", target_size, candidates.len())?;

    let matrix = ObjectiveMatrix::from_candidates(candidates)?;
    let fronts = non_dominated_sort(matrix.rows());

    let mut survivors: Vec<Candidate> = Vec::with_capacity(target_size);
    for (i, front) in fronts.iter().enumerate() {
        let remaining = target_size - survivors.len();
        if remaining == 0 {
            break;
        }
        let rank = i + 1;

        let rows: Vec<Vec<f64>> = front.iter().map(|&j| matrix.row(j).to_vec()).collect();
        let distances = crowding_distances(&rows, matrix.num_objectives());

        let mut members: Vec<(CrowdingDistance, usize)> =
            distances.into_iter().zip(front.iter().copied()).collect();
        members.sort_by(|a, b| b.0.cmp(&a.0));

        if members.len() > remaining {
            log::debug!(
                "environmental selection: cutoff at front {rank}, keeping {remaining} of {}",
                members.len()
            );
            members.truncate(remaining);
        }

        survivors.extend(
            members
                .into_iter()
                .map(|(d, j)| candidates[j].ranked(rank).with_crowding_distance(d)),
        );
    }

    log::debug!(
        "environmental selection: {} -> {} candidates",
        candidates.len(),
        survivors.len()
    );

    Ok(survivors)
}

/// Ids of every candidate at the minimum or maximum of some objective.
///
/// Deduplicated, in order of discovery (objectives by name, candidates in
/// input order). Objectives on which all candidates tie have no extremes.
/// With two or fewer candidates every candidate is a boundary solution,
/// matching crowding distance assignment.
pub fn identify_boundary_solutions(candidates: &[Candidate]) -> SelectionResult<Vec<String>> {
    if candidates.is_empty() {
        return Ok(Vec::new());
    }
    let matrix = ObjectiveMatrix::from_candidates(candidates)?;
    if candidates.len() <= 2 {
        return Ok(candidates.iter().map(|c| c.id.clone()).collect());
    }

    let mut seen: HashSet<usize> = HashSet::new();
    let mut ids = Vec::new();

    for obj_idx in 0..matrix.num_objectives() {
        let column = matrix.column(obj_idx);
        let min_val = column.iter().copied().fold(f64::INFINITY, f64::min);
        let max_val = column.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if max_val - min_val <= 0.0 {
            continue;
        }
        for (i, &v) in column.iter().enumerate() {
            if (v == min_val || v == max_val) && seen.insert(i) {
                ids.push(candidates[i].id.clone());
            }
        }
    }

    Ok(ids)
}

pub(crate) fn validate_count(name: &'static str, count: usize, available: usize) -> SelectionResult<()> {
    if count == 0 {
        return Err(SelectionError::invalid(name, "must be at least 1"));
    }
    if count > available {
        return Err(SelectionError::CountExceedsPopulation {
            requested: count,
            available,
        });
    }
    Ok(())
}
