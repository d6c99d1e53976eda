//! Diversity-triggered fitness sharing.

use super::config::{AdaptiveSharingConfig, DiversityMetric};
use super::niche::apply_sharing;
use super::radius::calculate_niche_radius;
use crate::error::SelectionResult;
use crate::population::{mean_pairwise_distance, objective_count, Candidate};

/// Result of [`adaptive_apply_sharing`].
#[derive(Debug, Clone, PartialEq)]
pub enum SharingOutcome {
    /// Diversity was below the threshold and sharing ran.
    Applied {
        candidates: Vec<Candidate>,
        niche_radius: f64,
        diversity: f64,
    },
    /// Diversity was sufficient; candidates are unchanged.
    Skipped {
        candidates: Vec<Candidate>,
        diversity: f64,
    },
}

impl SharingOutcome {
    /// Whether sharing ran.
    pub fn is_applied(&self) -> bool {
        matches!(self, SharingOutcome::Applied { .. })
    }

    /// Measured diversity that drove the decision.
    pub fn diversity(&self) -> f64 {
        match self {
            SharingOutcome::Applied { diversity, .. } | SharingOutcome::Skipped { diversity, .. } => {
                *diversity
            }
        }
    }

    /// The resulting candidates.
    pub fn candidates(&self) -> &[Candidate] {
        match self {
            SharingOutcome::Applied { candidates, .. }
            | SharingOutcome::Skipped { candidates, .. } => candidates,
        }
    }

    /// Consumes the outcome, returning the candidates.
    pub fn into_candidates(self) -> Vec<Candidate> {
        match self {
            SharingOutcome::Applied { candidates, .. }
            | SharingOutcome::Skipped { candidates, .. } => candidates,
        }
    }
}

/// Population diversity in [0, 1].
///
/// - `CrowdingDistance`: mean finite crowding distance divided by the number
///   of objectives, clamped to [0, 1]. Every candidate needs a crowding
///   distance. A population whose distances are all boundary scores 1.0.
/// - `PairwiseDistance`: sampled mean pairwise objective distance divided by
///   `sqrt(M)`, the diagonal of the normalized space. Fewer than two
///   candidates score 1.0.
///
/// An empty population scores 1.0 under both metrics.
///
/// # Errors
///
/// Missing crowding distance or normalized objectives.
pub fn measure_diversity(candidates: &[Candidate], metric: DiversityMetric) -> SelectionResult<f64> {
    if candidates.is_empty() {
        return Ok(1.0);
    }
    let m = objective_count(candidates)?.max(1) as f64;

    match metric {
        DiversityMetric::CrowdingDistance => {
            let mut sum = 0.0;
            let mut finite = 0usize;
            for c in candidates {
                if let Some(d) = c.require_crowding_distance()?.finite() {
                    sum += d;
                    finite += 1;
                }
            }
            if finite == 0 {
                return Ok(1.0);
            }
            Ok((sum / finite as f64 / m).clamp(0.0, 1.0))
        }
        DiversityMetric::PairwiseDistance => match mean_pairwise_distance(candidates)? {
            Some(mean) => Ok((mean / m.sqrt()).clamp(0.0, 1.0)),
            None => Ok(1.0),
        },
    }
}

/// Applies fitness sharing only when diversity is below the threshold.
///
/// The niche radius comes from `config.sharing.radius`.
///
/// # Example
///
/// ```
/// use u_evoselect::population::{Candidate, CrowdingDistance};
/// use u_evoselect::sharing::{adaptive_apply_sharing, AdaptiveSharingConfig};
///
/// // Tightly packed front: small finite crowding distances.
/// let pop: Vec<Candidate> = (0..5)
///     .map(|i| {
///         let x = 0.5 + i as f64 * 0.01;
///         Candidate::new(format!("c{i}"), 0)
///             .with_fitness(1.0)
///             .with_normalized_objectives([("x", x), ("y", 1.0 - x)])
///             .with_crowding_distance(CrowdingDistance::Finite(0.04))
///     })
///     .collect();
///
/// let outcome = adaptive_apply_sharing(&pop, &AdaptiveSharingConfig::default()).unwrap();
/// assert!(outcome.is_applied());
/// assert!(outcome.candidates()[2].fitness.unwrap() < 1.0);
/// ```
pub fn adaptive_apply_sharing(
    candidates: &[Candidate],
    config: &AdaptiveSharingConfig,
) -> SelectionResult<SharingOutcome> {
    config.validate()?;

    let diversity = measure_diversity(candidates, config.metric)?;
    if diversity >= config.diversity_threshold {
        log::debug!(
            "sharing skipped: diversity {diversity:.4} >= {:.4}",
            config.diversity_threshold
        );
        return Ok(SharingOutcome::Skipped {
            candidates: candidates.to_vec(),
            diversity,
        });
    }

    let niche_radius = calculate_niche_radius(candidates, &config.sharing.radius)?;
    let shared = apply_sharing(candidates, niche_radius, &config.sharing)?;
    Ok(SharingOutcome::Applied {
        candidates: shared,
        niche_radius,
        diversity,
    })
}
