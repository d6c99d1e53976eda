//! Diversity measurement driving adaptive tournament size.

use super::config::TournamentConfig;
use crate::population::Candidate;

/// Population diversity in [0, 1] from the spread of crowding distances.
///
/// `tanh(stddev / mean)` over the finite crowding distances (population
/// standard deviation). Boundary and unassigned distances are skipped.
/// Returns 0 for fewer than two candidates, when no finite distance is
/// present, or when every finite distance is zero.
///
/// # Example
///
/// ```
/// use u_evoselect::population::{Candidate, CrowdingDistance};
/// use u_evoselect::tournament::population_diversity;
///
/// let uniform: Vec<Candidate> = (0..4)
///     .map(|i| Candidate::new(format!("c{i}"), 0).with_crowding_distance(CrowdingDistance::Finite(0.5)))
///     .collect();
/// assert_eq!(population_diversity(&uniform), 0.0);
/// ```
pub fn population_diversity(candidates: &[Candidate]) -> f64 {
    if candidates.len() < 2 {
        return 0.0;
    }

    let finite: Vec<f64> = candidates
        .iter()
        .filter_map(|c| c.crowding_distance.and_then(|d| d.finite()))
        .collect();
    if finite.is_empty() {
        return 0.0;
    }

    let n = finite.len() as f64;
    let mean = finite.iter().sum::<f64>() / n;
    if mean <= 0.0 {
        return 0.0;
    }
    let variance = finite.iter().map(|d| (d - mean).powi(2)).sum::<f64>() / n;

    (variance.sqrt() / mean).tanh()
}

/// Tournament size for the measured diversity.
///
/// Below `diversity_threshold` the minimum size is used; above it the size
/// grows linearly toward `max_tournament_size` as diversity approaches 1.
pub fn adaptive_tournament_size(diversity: f64, config: &TournamentConfig) -> usize {
    let min = config.min_tournament_size;
    let max = config.max_tournament_size.max(min);
    let threshold = config.diversity_threshold;

    if diversity < threshold {
        return min;
    }
    if threshold >= 1.0 {
        return max;
    }

    let t = ((diversity - threshold) / (1.0 - threshold)).clamp(0.0, 1.0);
    min + ((max - min) as f64 * t).round() as usize
}
