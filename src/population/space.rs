//! Distances in normalized objective space.
//!
//! Shared by diverse elitism, fitness sharing, and population statistics.

use super::candidate::Candidate;
use crate::error::{SelectionError, SelectionResult};

/// Largest number of candidates used when estimating mean pairwise distance.
///
/// Full pairwise distance is O(N²); beyond this size an evenly strided
/// subset is used instead.
pub const PAIRWISE_SAMPLE_LIMIT: usize = 50;

/// Euclidean distance between two candidates in normalized objective space.
///
/// The objective set is taken from `a`. Both candidates must carry a finite
/// value for every objective in it.
///
/// # Example
///
/// ```
/// use u_evoselect::population::{objective_distance, Candidate};
///
/// let a = Candidate::new("a", 0).with_normalized_objectives([("x", 0.0), ("y", 0.0)]);
/// let b = Candidate::new("b", 0).with_normalized_objectives([("x", 0.3), ("y", 0.4)]);
/// let d = objective_distance(&a, &b).unwrap();
/// assert!((d - 0.5).abs() < 1e-12);
/// ```
pub fn objective_distance(a: &Candidate, b: &Candidate) -> SelectionResult<f64> {
    let left = a.require_normalized()?;
    let right = b.require_normalized()?;

    let mut sum = 0.0;
    for (name, &va) in left {
        let vb = right
            .get(name)
            .copied()
            .ok_or_else(|| SelectionError::MissingObjective {
                id: b.id.clone(),
                objective: name.clone(),
            })?;
        for (id, v) in [(&a.id, va), (&b.id, vb)] {
            if !v.is_finite() {
                return Err(SelectionError::InvalidObjective {
                    id: id.clone(),
                    objective: name.clone(),
                });
            }
        }
        let diff = va - vb;
        sum += diff * diff;
    }
    Ok(sum.sqrt())
}

/// Number of objectives carried by the first candidate, 0 for empty input.
pub(crate) fn objective_count(candidates: &[Candidate]) -> SelectionResult<usize> {
    match candidates.first() {
        Some(c) => Ok(c.require_normalized()?.len()),
        None => Ok(0),
    }
}

/// Evenly strided subset of at most `limit` candidates.
pub(crate) fn strided_sample(candidates: &[Candidate], limit: usize) -> Vec<&Candidate> {
    let n = candidates.len();
    if n <= limit || limit == 0 {
        return candidates.iter().collect();
    }
    (0..limit).map(|i| &candidates[i * n / limit]).collect()
}

/// Mean pairwise objective distance over a sample of the candidates.
///
/// Returns `None` for fewer than two candidates.
pub(crate) fn mean_pairwise_distance(candidates: &[Candidate]) -> SelectionResult<Option<f64>> {
    let sample = strided_sample(candidates, PAIRWISE_SAMPLE_LIMIT);
    let n = sample.len();
    if n < 2 {
        return Ok(None);
    }

    let mut total = 0.0;
    let mut pairs = 0usize;
    for i in 0..n {
        for j in (i + 1)..n {
            total += objective_distance(sample[i], sample[j])?;
            pairs += 1;
        }
    }
    Ok(Some(total / pairs as f64))
}
