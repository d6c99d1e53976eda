//! Fast non-dominated sorting (Deb et al., 2002).

use super::dominance::{dominance_cmp, Dominance, ObjectiveMatrix};
use crate::error::SelectionResult;
use crate::population::Candidate;

/// One Pareto front: mutually non-dominated candidates of equal rank.
#[derive(Debug, Clone, PartialEq)]
pub struct Front {
    /// 1-based rank; 1 is the non-dominated front.
    pub rank: usize,
    /// Members annotated with `rank`, in input order.
    pub members: Vec<Candidate>,
}

impl Front {
    /// Ids of the members, in order.
    pub fn ids(&self) -> Vec<&str> {
        self.members.iter().map(|c| c.id.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Result of non-dominated sorting: a partition of the input into fronts.
///
/// Ranks are contiguous starting at 1 and every input candidate appears in
/// exactly one front. Fronts are derived data; re-run the sort whenever
/// objectives change rather than storing them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParetoFronts {
    fronts: Vec<Front>,
}

impl ParetoFronts {
    /// Number of fronts.
    pub fn len(&self) -> usize {
        self.fronts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fronts.is_empty()
    }

    /// Front with the given 1-based rank.
    pub fn get(&self, rank: usize) -> Option<&Front> {
        rank.checked_sub(1).and_then(|i| self.fronts.get(i))
    }

    /// Ids in the front with the given rank (empty if there is none).
    pub fn ids(&self, rank: usize) -> Vec<&str> {
        self.get(rank).map(Front::ids).unwrap_or_default()
    }

    /// The non-dominated front.
    pub fn first(&self) -> Option<&Front> {
        self.fronts.first()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Front> {
        self.fronts.iter()
    }

    /// All ranked candidates, best front first.
    pub fn into_candidates(self) -> Vec<Candidate> {
        self.fronts.into_iter().flat_map(|f| f.members).collect()
    }

    /// Consumes the result, returning the fronts.
    pub fn into_fronts(self) -> Vec<Front> {
        self.fronts
    }
}

impl IntoIterator for ParetoFronts {
    type Item = Front;
    type IntoIter = std::vec::IntoIter<Front>;

    fn into_iter(self) -> Self::IntoIter {
        self.fronts.into_iter()
    }
}

/// Fast non-dominated sorting over candidates.
///
/// Every candidate must carry normalized objectives for the common
/// objective set (see [`ObjectiveMatrix`]); otherwise the offending id is
/// reported. An empty input yields no fronts.
///
/// # Complexity
///
/// O(m * n²) where m = number of objectives, n = number of candidates
///
/// # Example
///
/// ```
/// use u_evoselect::pareto::fast_non_dominated_sort;
/// use u_evoselect::population::Candidate;
///
/// let pop = vec![
///     Candidate::new("a", 0).with_normalized_objectives([("acc", 0.9), ("lat", 0.9)]),
///     Candidate::new("b", 0).with_normalized_objectives([("acc", 0.8), ("lat", 0.8)]),
///     Candidate::new("c", 0).with_normalized_objectives([("acc", 0.85), ("lat", 0.7)]),
///     Candidate::new("d", 0).with_normalized_objectives([("acc", 0.7), ("lat", 0.85)]),
/// ];
///
/// let fronts = fast_non_dominated_sort(&pop).unwrap();
/// assert_eq!(fronts.ids(1), vec!["a", "c", "d"]);
/// assert_eq!(fronts.ids(2), vec!["b"]);
/// ```
pub fn fast_non_dominated_sort(candidates: &[Candidate]) -> SelectionResult<ParetoFronts> {
    if candidates.is_empty() {
        return Ok(ParetoFronts::default());
    }

    let matrix = ObjectiveMatrix::from_candidates(candidates)?;
    let index_fronts = non_dominated_sort(matrix.rows());

    let fronts: Vec<Front> = index_fronts
        .into_iter()
        .enumerate()
        .map(|(i, indices)| {
            let rank = i + 1;
            Front {
                rank,
                members: indices.iter().map(|&j| candidates[j].ranked(rank)).collect(),
            }
        })
        .collect();

    log::debug!(
        "non-dominated sort: {} candidates into {} fronts (front 1: {})",
        candidates.len(),
        fronts.len(),
        fronts.first().map_or(0, Front::len)
    );

    Ok(ParetoFronts { fronts })
}

/// Annotates every candidate with its Pareto rank, keeping input order.
///
/// Stale crowding distances are cleared because they belonged to the
/// previous fronts.
pub fn assign_ranks(candidates: &[Candidate]) -> SelectionResult<Vec<Candidate>> {
    if candidates.is_empty() {
        return Ok(Vec::new());
    }
    let matrix = ObjectiveMatrix::from_candidates(candidates)?;
    let ranks = ranks_of(&non_dominated_sort(matrix.rows()), candidates.len());

    Ok(candidates
        .iter()
        .zip(ranks)
        .map(|(c, rank)| c.ranked(rank))
        .collect())
}

/// Index-level sort: `fronts[0]` holds the indices of the non-dominated rows.
///
/// Indices within each front are ascending, so the result does not depend
/// on how dominance relationships were gathered.
pub(crate) fn non_dominated_sort(rows: &[Vec<f64>]) -> Vec<Vec<usize>> {
    let n = rows.len();
    if n == 0 {
        return Vec::new();
    }

    let dominated_by = dominance_sets(rows);
    let mut domination_count = vec![0usize; n];
    for set in &dominated_by {
        for &j in set {
            domination_count[j] += 1;
        }
    }

    let mut current: Vec<usize> = (0..n).filter(|&i| domination_count[i] == 0).collect();
    let mut fronts = Vec::new();

    while !current.is_empty() {
        let mut next_front = Vec::new();
        for &i in &current {
            for &j in &dominated_by[i] {
                domination_count[j] -= 1;
                if domination_count[j] == 0 {
                    next_front.push(j);
                }
            }
        }
        next_front.sort_unstable();
        fronts.push(current);
        current = next_front;
    }

    fronts
}

/// 1-based rank of every row given index fronts.
fn ranks_of(fronts: &[Vec<usize>], n: usize) -> Vec<usize> {
    let mut ranks = vec![0usize; n];
    for (i, front) in fronts.iter().enumerate() {
        for &j in front {
            ranks[j] = i + 1;
        }
    }
    ranks
}

/// For each row, the rows it dominates.
#[cfg(not(feature = "parallel"))]
fn dominance_sets(rows: &[Vec<f64>]) -> Vec<Vec<usize>> {
    let n = rows.len();
    let mut dominated_by: Vec<Vec<usize>> = vec![Vec::new(); n];

    for i in 0..n {
        for j in (i + 1)..n {
            match dominance_cmp(&rows[i], &rows[j]) {
                Dominance::Left => dominated_by[i].push(j),
                Dominance::Right => dominated_by[j].push(i),
                Dominance::Neither => {}
            }
        }
    }

    dominated_by
}

/// For each row, the rows it dominates (one rayon task per row).
#[cfg(feature = "parallel")]
fn dominance_sets(rows: &[Vec<f64>]) -> Vec<Vec<usize>> {
    use rayon::prelude::*;

    (0..rows.len())
        .into_par_iter()
        .map(|i| {
            (0..rows.len())
                .filter(|&j| j != i && dominance_cmp(&rows[i], &rows[j]) == Dominance::Left)
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SelectionError;
    use crate::population::CrowdingDistance;

    fn cand(id: &str, objs: &[f64]) -> Candidate {
        Candidate::new(id, 0).with_normalized_objectives(
            objs.iter()
                .enumerate()
                .map(|(i, &v)| (format!("o{i}"), v)),
        )
    }

    // ---- Index-level sort ----

    #[test]
    fn test_single_row() {
        let fronts = non_dominated_sort(&[vec![0.5, 0.5]]);
        assert_eq!(fronts, vec![vec![0]]);
    }

    #[test]
    fn test_clear_chain() {
        let rows = vec![vec![0.9, 0.9], vec![0.5, 0.5], vec![0.1, 0.1]];
        let fronts = non_dominated_sort(&rows);
        assert_eq!(fronts, vec![vec![0], vec![1], vec![2]]);
        assert_eq!(ranks_of(&fronts, 3), vec![1, 2, 3]);
    }

    #[test]
    fn test_mixed_fronts() {
        let rows = vec![
            vec![0.9, 0.1], // front 1
            vec![0.6, 0.6], // front 1
            vec![0.1, 0.9], // front 1
            vec![0.5, 0.5], // dominated by [1]
            vec![0.0, 0.0], // dominated by [3] too
        ];
        let fronts = non_dominated_sort(&rows);
        assert_eq!(fronts, vec![vec![0, 1, 2], vec![3], vec![4]]);
    }

    #[test]
    fn test_all_equal_rows_share_front() {
        let rows = vec![vec![0.4, 0.4]; 4];
        let fronts = non_dominated_sort(&rows);
        assert_eq!(fronts, vec![vec![0, 1, 2, 3]]);
    }

    #[test]
    fn test_front_indices_ascending() {
        // Row 3 is dominated by rows 0 and 1; row 2 by row 1 only.
        let rows = vec![
            vec![0.9, 0.2],
            vec![0.8, 0.9],
            vec![0.7, 0.8],
            vec![0.75, 0.1],
        ];
        let fronts = non_dominated_sort(&rows);
        assert_eq!(fronts, vec![vec![0, 1], vec![2, 3]]);
    }

    // ---- Candidate-level sort ----

    #[test]
    fn test_empty_input() {
        let fronts = fast_non_dominated_sort(&[]).unwrap();
        assert!(fronts.is_empty());
        assert!(fronts.first().is_none());
        assert!(fronts.ids(1).is_empty());
    }

    #[test]
    fn test_four_candidate_fronts() {
        let pop = vec![
            cand("c1", &[0.9, 0.9]),
            cand("c2", &[0.8, 0.8]),
            cand("c3", &[0.85, 0.7]),
            cand("c4", &[0.7, 0.85]),
        ];
        let fronts = fast_non_dominated_sort(&pop).unwrap();
        assert_eq!(fronts.len(), 2);
        assert_eq!(fronts.ids(1), vec!["c1", "c3", "c4"]);
        assert_eq!(fronts.ids(2), vec!["c2"]);
        assert!(fronts
            .get(1)
            .unwrap()
            .members
            .iter()
            .all(|c| c.pareto_rank == Some(1)));
    }

    #[test]
    fn test_into_candidates_rank_order() {
        let pop = vec![
            cand("low", &[0.1, 0.1]),
            cand("high", &[0.9, 0.9]),
            cand("mid", &[0.5, 0.5]),
        ];
        let ranked = fast_non_dominated_sort(&pop).unwrap().into_candidates();
        let ids: Vec<&str> = ranked.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["high", "mid", "low"]);
        assert_eq!(ranked[2].pareto_rank, Some(3));
    }

    #[test]
    fn test_missing_objectives_is_error() {
        let pop = vec![cand("a", &[0.1, 0.2]), Candidate::new("b", 0)];
        assert_eq!(
            fast_non_dominated_sort(&pop),
            Err(SelectionError::MissingNormalizedObjectives { id: "b".into() })
        );
    }

    #[test]
    fn test_assign_ranks_keeps_order_and_clears_distance() {
        let pop = vec![
            cand("low", &[0.1, 0.1]).with_crowding_distance(CrowdingDistance::Boundary),
            cand("high", &[0.9, 0.9]),
        ];
        let ranked = assign_ranks(&pop).unwrap();
        assert_eq!(ranked[0].id, "low");
        assert_eq!(ranked[0].pareto_rank, Some(2));
        assert!(ranked[0].crowding_distance.is_none());
        assert_eq!(ranked[1].pareto_rank, Some(1));
        // Input untouched
        assert!(pop[0].pareto_rank.is_none());
    }
}
