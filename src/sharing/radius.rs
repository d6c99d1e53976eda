//! Niche radius strategies.

use super::config::check_radius;
use crate::error::{SelectionError, SelectionResult};
use crate::population::{mean_pairwise_distance, objective_count, Candidate};

/// Default fraction of the normalized-space diagonal used as niche radius.
pub const DEFAULT_RADIUS_FRACTION: f64 = 0.1;

/// How the niche radius is chosen.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NicheRadiusStrategy {
    /// Caller-supplied constant.
    Fixed(f64),

    /// `base_radius / sqrt(N)`: niches shrink as the population grows.
    PopulationBased { base_radius: f64 },

    /// `fraction × sqrt(M)`: a fraction of the diagonal of the normalized
    /// objective space, with M objectives.
    ObjectiveRange { fraction: f64 },

    /// Derived from the measured mean pairwise objective distance, scaled
    /// toward a target diversity in (0, 1].
    Adaptive { target_diversity: f64 },
}

impl Default for NicheRadiusStrategy {
    fn default() -> Self {
        NicheRadiusStrategy::ObjectiveRange {
            fraction: DEFAULT_RADIUS_FRACTION,
        }
    }
}

impl NicheRadiusStrategy {
    /// Checks the strategy's own parameter.
    pub fn validate(&self) -> SelectionResult<()> {
        match *self {
            NicheRadiusStrategy::Fixed(r) => check_radius(r),
            NicheRadiusStrategy::PopulationBased { base_radius } => {
                if !base_radius.is_finite() || base_radius <= 0.0 {
                    return Err(SelectionError::invalid(
                        "base_radius",
                        "must be finite and positive",
                    ));
                }
                Ok(())
            }
            NicheRadiusStrategy::ObjectiveRange { fraction } => {
                if !fraction.is_finite() || fraction <= 0.0 {
                    return Err(SelectionError::invalid(
                        "fraction",
                        "must be finite and positive",
                    ));
                }
                Ok(())
            }
            NicheRadiusStrategy::Adaptive { target_diversity } => {
                if !(target_diversity > 0.0 && target_diversity <= 1.0) {
                    return Err(SelectionError::invalid(
                        "target_diversity",
                        "must be within (0, 1]",
                    ));
                }
                Ok(())
            }
        }
    }
}

/// Computes the niche radius for `candidates`.
///
/// The adaptive strategy samples at most
/// [`PAIRWISE_SAMPLE_LIMIT`](crate::population::PAIRWISE_SAMPLE_LIMIT)
/// candidates. With current diversity `mean / sqrt(M)`, it returns
/// `mean × clamp(target / current, 0.5, 2.0)`: a crowded population gets a
/// wider radius, a spread one a narrower radius. When fewer than two
/// candidates exist or they all coincide, it falls back to the default
/// objective-range radius.
///
/// # Example
///
/// ```
/// use u_evoselect::population::Candidate;
/// use u_evoselect::sharing::{calculate_niche_radius, NicheRadiusStrategy};
///
/// let pop: Vec<Candidate> = (0..4)
///     .map(|i| Candidate::new(format!("c{i}"), 0).with_normalized_objectives([("a", 0.1), ("b", 0.2), ("c", 0.3), ("d", 0.4)]))
///     .collect();
///
/// let r = calculate_niche_radius(&pop, &NicheRadiusStrategy::PopulationBased { base_radius: 1.0 }).unwrap();
/// assert!((r - 0.5).abs() < 1e-12);
///
/// let r = calculate_niche_radius(&pop, &NicheRadiusStrategy::ObjectiveRange { fraction: 0.1 }).unwrap();
/// assert!((r - 0.2).abs() < 1e-12);
/// ```
pub fn calculate_niche_radius(
    candidates: &[Candidate],
    strategy: &NicheRadiusStrategy,
) -> SelectionResult<f64> {
    strategy.validate()?;

    let radius = match *strategy {
        NicheRadiusStrategy::Fixed(r) => r,
        NicheRadiusStrategy::PopulationBased { base_radius } => {
            base_radius / (candidates.len().max(1) as f64).sqrt()
        }
        NicheRadiusStrategy::ObjectiveRange { fraction } => {
            fraction * dimension(candidates)?.sqrt()
        }
        NicheRadiusStrategy::Adaptive { target_diversity } => {
            let diagonal = dimension(candidates)?.sqrt();
            match mean_pairwise_distance(candidates)? {
                Some(mean) if mean > 0.0 => {
                    let current = mean / diagonal;
                    mean * (target_diversity / current).clamp(0.5, 2.0)
                }
                _ => DEFAULT_RADIUS_FRACTION * diagonal,
            }
        }
    };

    check_radius(radius)?;
    log::debug!("niche radius {radius:.6} ({strategy:?}, {} candidates)", candidates.len());
    Ok(radius)
}

/// Number of objectives as a float, at least 1.
fn dimension(candidates: &[Candidate]) -> SelectionResult<f64> {
    Ok(objective_count(candidates)?.max(1) as f64)
}
