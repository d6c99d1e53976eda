//! Survival ordering by rank and crowding distance.

use crate::error::SelectionResult;
use crate::population::{require_unique_ids, Candidate, CrowdingDistance};
use std::cmp::Ordering;

/// A candidate's position in survival order.
///
/// Ordered so that *smaller is better*: lower rank first, then larger
/// crowding distance, with [`CrowdingDistance::Boundary`] ahead of every
/// finite distance.
///
/// # Example
///
/// ```
/// use u_evoselect::crowding::Ranking;
/// use u_evoselect::population::CrowdingDistance;
///
/// let boundary = Ranking::new(2, CrowdingDistance::Boundary);
/// let interior = Ranking::new(2, CrowdingDistance::Finite(3.0));
/// let better_front = Ranking::new(1, CrowdingDistance::Finite(0.0));
///
/// assert!(better_front < boundary);
/// assert!(boundary < interior);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ranking {
    pub rank: usize,
    pub distance: CrowdingDistance,
}

impl Ranking {
    pub fn new(rank: usize, distance: CrowdingDistance) -> Self {
        Self { rank, distance }
    }

    /// Reads rank and distance, reporting whichever is missing.
    pub fn of(candidate: &Candidate) -> SelectionResult<Self> {
        let (rank, distance) = candidate.require_ranking()?;
        Ok(Self { rank, distance })
    }
}

impl Ord for Ranking {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank
            .cmp(&other.rank)
            .then_with(|| other.distance.cmp(&self.distance))
    }
}

impl PartialOrd for Ranking {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Returns the candidates in survival order (stable on full ties).
///
/// Every candidate must carry both rank and crowding distance, and ids must
/// be unique.
pub fn sort_by_survival(candidates: &[Candidate]) -> SelectionResult<Vec<Candidate>> {
    require_unique_ids(candidates)?;
    let mut keyed = candidates
        .iter()
        .map(|c| Ok((Ranking::of(c)?, c)))
        .collect::<SelectionResult<Vec<_>>>()?;
    keyed.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(keyed.into_iter().map(|(_, c)| c.clone()).collect())
}
