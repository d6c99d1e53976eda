//! Crowding distance within a single front.

use super::dominance::ObjectiveMatrix;
use crate::error::SelectionResult;
use crate::population::{Candidate, CrowdingDistance};
use std::collections::HashMap;

/// Options for [`crowding_distance`].
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CrowdingOptions {
    /// Objectives to measure along. `None` uses the first member's full set.
    pub objectives: Option<Vec<String>>,
}

impl CrowdingOptions {
    /// Restricts the computation to the named objectives.
    pub fn with_objectives<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.objectives = Some(names.into_iter().map(Into::into).collect());
        self
    }
}

/// Crowding distance for the members of one Pareto front.
///
/// Call this once per front: densities only compare mutually
/// non-dominated peers.
///
/// # Algorithm (Deb et al., 2002)
///
/// For each objective:
/// 1. Sort members by the objective's normalized value
/// 2. Members at the minimum or maximum value become [`CrowdingDistance::Boundary`]
/// 3. Interior members add `(next - prev) / (max - min)`
///
/// An objective whose values are all equal has no extremes and contributes
/// nothing. Fronts of one or two members are entirely boundary. A front of
/// three or more members that coincide in every objective therefore has no
/// boundary at all: every member gets `Finite(0.0)`.
///
/// # Errors
///
/// Missing or non-finite normalized objectives, or a repeated id in `front`.
///
/// # Complexity
///
/// O(m * n * log n) where m = number of objectives, n = front size
///
/// # Example
///
/// ```
/// use u_evoselect::pareto::{crowding_distance, CrowdingOptions};
/// use u_evoselect::population::Candidate;
///
/// let front: Vec<Candidate> = [0.0, 0.25, 0.5, 0.75, 1.0]
///     .iter()
///     .enumerate()
///     .map(|(i, &x)| {
///         Candidate::new(format!("c{i}"), 0).with_normalized_objectives([("x", x), ("y", 1.0 - x)])
///     })
///     .collect();
///
/// let distances = crowding_distance(&front, &CrowdingOptions::default()).unwrap();
/// assert!(distances["c0"].is_boundary());
/// assert!(distances["c4"].is_boundary());
/// assert_eq!(distances["c2"].finite(), Some(1.0));
/// ```
pub fn crowding_distance(
    front: &[Candidate],
    options: &CrowdingOptions,
) -> SelectionResult<HashMap<String, CrowdingDistance>> {
    let matrix = match &options.objectives {
        Some(names) => ObjectiveMatrix::with_objectives(front, names.clone())?,
        None => ObjectiveMatrix::from_candidates(front)?,
    };
    let distances = crowding_distances(matrix.rows(), matrix.num_objectives());

    Ok(front
        .iter()
        .map(|c| c.id.clone())
        .zip(distances)
        .collect())
}

/// Index-level crowding distance, one entry per row.
pub(crate) fn crowding_distances(rows: &[Vec<f64>], num_objectives: usize) -> Vec<CrowdingDistance> {
    let n = rows.len();
    if n <= 2 {
        return vec![CrowdingDistance::Boundary; n];
    }

    let mut boundary = vec![false; n];
    let mut distances = vec![0.0f64; n];

    for obj_idx in 0..num_objectives {
        // Sort indices by this objective; ties keep index order.
        let mut indices: Vec<usize> = (0..n).collect();
        indices.sort_by(|&a, &b| rows[a][obj_idx].total_cmp(&rows[b][obj_idx]));

        let min_val = rows[indices[0]][obj_idx];
        let max_val = rows[indices[n - 1]][obj_idx];
        let range = max_val - min_val;
        if range <= 0.0 {
            continue;
        }

        for pos in 0..n {
            let idx = indices[pos];
            let value = rows[idx][obj_idx];
            if value == min_val || value == max_val {
                boundary[idx] = true;
                continue;
            }
            let prev = rows[indices[pos - 1]][obj_idx];
            let next = rows[indices[pos + 1]][obj_idx];
            distances[idx] += (next - prev) / range;
        }
    }

    log::trace!(
        "crowding distance over {n} members, {} boundary",
        boundary.iter().filter(|&&b| b).count()
    );

    boundary
        .into_iter()
        .zip(distances)
        .map(|(is_boundary, d)| {
            if is_boundary {
                CrowdingDistance::Boundary
            } else {
                CrowdingDistance::Finite(d)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SelectionError;

    fn line(xs: &[f64]) -> Vec<Candidate> {
        xs.iter()
            .enumerate()
            .map(|(i, &x)| {
                Candidate::new(format!("c{i}"), 0).with_normalized_objectives([("x", x), ("y", 1.0 - x)])
            })
            .collect()
    }

    #[test]
    fn test_crowding_single_and_pair() {
        let one = crowding_distance(&line(&[0.5]), &CrowdingOptions::default()).unwrap();
        assert!(one["c0"].is_boundary());

        let two = crowding_distance(&line(&[0.2, 0.8]), &CrowdingOptions::default()).unwrap();
        assert!(two.values().all(CrowdingDistance::is_boundary));
    }

    #[test]
    fn test_crowding_empty_front() {
        let d = crowding_distance(&[], &CrowdingOptions::default()).unwrap();
        assert!(d.is_empty());
    }

    #[test]
    fn test_crowding_evenly_spaced() {
        let d = crowding_distance(&line(&[0.0, 0.25, 0.5, 0.75, 1.0]), &CrowdingOptions::default())
            .unwrap();
        assert!(d["c0"].is_boundary());
        assert!(d["c4"].is_boundary());
        // Each interior point: 2 objectives × (0.5 / 1.0)
        for id in ["c1", "c2", "c3"] {
            let v = d[id].finite().unwrap();
            assert!((v - 1.0).abs() < 1e-10, "{id}: {v}");
        }
    }

    #[test]
    fn test_crowding_isolated_interior_scores_higher() {
        // c1 is crowded near c0; c3 sits in a gap.
        let d = crowding_distance(&line(&[0.0, 0.05, 0.1, 0.6, 1.0]), &CrowdingOptions::default())
            .unwrap();
        let c1 = d["c1"].finite().unwrap();
        let c2 = d["c2"].finite().unwrap();
        let c3 = d["c3"].finite().unwrap();
        assert!(c1 < c2 && c2 < c3, "{c1} {c2} {c3}");
    }

    #[test]
    fn test_crowding_zero_range_objective() {
        let front: Vec<Candidate> = [0.1, 0.5, 0.9]
            .iter()
            .enumerate()
            .map(|(i, &x)| {
                Candidate::new(format!("c{i}"), 0).with_normalized_objectives([("x", x), ("flat", 0.5)])
            })
            .collect();
        let d = crowding_distance(&front, &CrowdingOptions::default()).unwrap();
        assert!(d["c0"].is_boundary());
        assert!(d["c2"].is_boundary());
        assert_eq!(d["c1"].finite(), Some(1.0));
    }

    #[test]
    fn test_crowding_ties_at_extreme_are_boundary() {
        let front = line(&[0.0, 0.0, 0.5, 1.0]);
        let d = crowding_distance(&front, &CrowdingOptions::default()).unwrap();
        assert!(d["c0"].is_boundary());
        assert!(d["c1"].is_boundary());
        assert!(d["c3"].is_boundary());
        assert!(d["c2"].finite().is_some());
    }

    #[test]
    fn test_crowding_restricted_objectives() {
        let front: Vec<Candidate> = [(0.1, 0.9), (0.5, 0.1), (0.9, 0.5)]
            .iter()
            .enumerate()
            .map(|(i, &(x, y))| {
                Candidate::new(format!("c{i}"), 0).with_normalized_objectives([("x", x), ("y", y)])
            })
            .collect();
        let opts = CrowdingOptions::default().with_objectives(["x"]);
        let d = crowding_distance(&front, &opts).unwrap();
        assert!(d["c0"].is_boundary());
        assert!(d["c2"].is_boundary());
        assert_eq!(d["c1"].finite(), Some(1.0));
    }

    #[test]
    fn test_crowding_missing_objectives_error() {
        let mut front = line(&[0.1, 0.5, 0.9]);
        front[1].normalized_objectives = None;
        assert_eq!(
            crowding_distance(&front, &CrowdingOptions::default()),
            Err(SelectionError::MissingNormalizedObjectives { id: "c1".into() })
        );
    }

    #[test]
    fn test_crowding_coincident_front_has_no_boundary() {
        let d = crowding_distance(&line(&[0.4, 0.4, 0.4]), &CrowdingOptions::default()).unwrap();
        assert_eq!(d.len(), 3);
        for id in ["c0", "c1", "c2"] {
            assert_eq!(d[id], CrowdingDistance::Finite(0.0));
        }
    }

    #[test]
    fn test_crowding_rejects_nan() {
        let mut front = line(&[0.1, 0.5, 0.9]);
        front[1] = Candidate::new("c1", 0).with_normalized_objectives([("x", f64::NAN), ("y", 0.5)]);
        assert_eq!(
            crowding_distance(&front, &CrowdingOptions::default()),
            Err(SelectionError::InvalidObjective {
                id: "c1".into(),
                objective: "x".into()
            })
        );
    }

    #[test]
    fn test_crowding_rejects_repeated_ids() {
        let mut front = line(&[0.1, 0.5, 0.9]);
        front[0].id = "dup".into();
        front[1].id = "dup".into();
        front[2].id = "m".into();
        assert_eq!(
            crowding_distance(&front, &CrowdingOptions::default()),
            Err(SelectionError::DuplicateId { id: "dup".into() })
        );
    }
}
