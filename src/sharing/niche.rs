//! Sharing function, niche counts and shared fitness.

use super::config::{check_alpha, check_radius, SharingConfig};
use super::radius::calculate_niche_radius;
use crate::error::SelectionResult;
use crate::population::{objective_distance, require_unique_ids, Candidate, MetadataValue};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Metadata key holding the fitness before sharing.
pub const META_RAW_FITNESS: &str = "raw_fitness";

/// Metadata key holding the niche count used for sharing.
pub const META_NICHE_COUNT: &str = "niche_count";

/// Sharing function `sh(d) = 1 - (d/r)^alpha` for `d < r`, else 0.
///
/// # Example
///
/// ```
/// use u_evoselect::sharing::sharing_function;
///
/// assert_eq!(sharing_function(0.0, 0.5, 1.0), 1.0);
/// assert!((sharing_function(0.25, 0.5, 1.0) - 0.5).abs() < 1e-12);
/// assert_eq!(sharing_function(0.5, 0.5, 1.0), 0.0);
/// ```
pub fn sharing_function(distance: f64, radius: f64, alpha: f64) -> f64 {
    if distance >= radius {
        return 0.0;
    }
    1.0 - (distance / radius).powf(alpha)
}

/// Niche count of `candidate` within `candidates`.
///
/// The candidate itself always contributes exactly 1.0 and its own entry in
/// `candidates`, matched by id, is skipped, so the count is at least 1.0
/// whether or not the candidate belongs to `candidates`.
///
/// # Errors
///
/// Invalid radius or alpha, missing or non-finite normalized objectives, or
/// a repeated id in `candidates`.
pub fn niche_count(
    candidate: &Candidate,
    candidates: &[Candidate],
    radius: f64,
    alpha: f64,
) -> SelectionResult<f64> {
    check_radius(radius)?;
    check_alpha(alpha)?;
    require_unique_ids(candidates)?;
    candidate.require_normalized()?;
    neighbourhood(candidate, candidates, radius, alpha)
}

fn neighbourhood(
    candidate: &Candidate,
    candidates: &[Candidate],
    radius: f64,
    alpha: f64,
) -> SelectionResult<f64> {
    let mut count = 1.0;
    for other in candidates {
        if other.id == candidate.id {
            continue;
        }
        let d = objective_distance(candidate, other)?;
        count += sharing_function(d, radius, alpha);
    }
    Ok(count)
}

/// Applies fitness sharing with an explicit niche radius.
///
/// Each candidate's fitness becomes `raw / niche_count`, penalizing crowded
/// regions of objective space. When `preserve_raw_fitness` is set the raw
/// fitness and niche count are stored under [`META_RAW_FITNESS`] and
/// [`META_NICHE_COUNT`]. Candidates without fitness keep `None`.
///
/// The fitness field is treated as raw. Sharing an already shared
/// population divides again.
///
/// # Example
///
/// ```
/// use u_evoselect::population::Candidate;
/// use u_evoselect::sharing::{apply_sharing, SharingConfig};
///
/// let pop = vec![
///     Candidate::new("a", 0).with_fitness(1.0).with_normalized_objectives([("x", 0.50)]),
///     Candidate::new("b", 0).with_fitness(1.0).with_normalized_objectives([("x", 0.50)]),
///     Candidate::new("c", 0).with_fitness(1.0).with_normalized_objectives([("x", 0.95)]),
/// ];
///
/// let shared = apply_sharing(&pop, 0.2, &SharingConfig::default()).unwrap();
/// assert_eq!(shared[0].fitness, Some(0.5));
/// assert_eq!(shared[2].fitness, Some(1.0));
/// ```
pub fn apply_sharing(
    candidates: &[Candidate],
    radius: f64,
    config: &SharingConfig,
) -> SelectionResult<Vec<Candidate>> {
    check_radius(radius)?;
    check_alpha(config.sharing_alpha)?;
    require_unique_ids(candidates)?;
    for c in candidates {
        c.require_normalized()?;
    }

    let alpha = config.sharing_alpha;
    let counts = niche_counts(candidates, radius, alpha)?;

    let shared: Vec<Candidate> = candidates
        .iter()
        .zip(counts)
        .map(|(c, niche)| {
            let mut out = c.clone();
            if let Some(raw) = c.fitness {
                out.fitness = Some(if niche > 0.0 { raw / niche } else { raw });
                if config.preserve_raw_fitness {
                    out.metadata
                        .insert(META_RAW_FITNESS.to_string(), MetadataValue::Float(raw));
                }
            }
            if config.preserve_raw_fitness {
                out.metadata
                    .insert(META_NICHE_COUNT.to_string(), MetadataValue::Float(niche));
            }
            out
        })
        .collect();

    log::debug!(
        "fitness sharing: {} candidates, radius {radius:.6}, alpha {alpha}",
        candidates.len()
    );

    Ok(shared)
}

/// Applies fitness sharing with the radius chosen by `config.radius`.
pub fn share(candidates: &[Candidate], config: &SharingConfig) -> SelectionResult<Vec<Candidate>> {
    config.validate()?;
    let radius = calculate_niche_radius(candidates, &config.radius)?;
    apply_sharing(candidates, radius, config)
}

#[cfg(not(feature = "parallel"))]
fn niche_counts(candidates: &[Candidate], radius: f64, alpha: f64) -> SelectionResult<Vec<f64>> {
    candidates
        .iter()
        .map(|c| neighbourhood(c, candidates, radius, alpha))
        .collect()
}

#[cfg(feature = "parallel")]
fn niche_counts(candidates: &[Candidate], radius: f64, alpha: f64) -> SelectionResult<Vec<f64>> {
    candidates
        .par_iter()
        .map(|c| neighbourhood(c, candidates, radius, alpha))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SelectionError;
    use crate::sharing::NicheRadiusStrategy;

    fn point(id: &str, fitness: f64, x: f64, y: f64) -> Candidate {
        Candidate::new(id, 0)
            .with_fitness(fitness)
            .with_normalized_objectives([("x", x), ("y", y)])
    }

    // ---- Sharing function ----

    #[test]
    fn test_sharing_function_shape() {
        assert_eq!(sharing_function(0.0, 0.2, 1.0), 1.0);
        assert_eq!(sharing_function(0.2, 0.2, 1.0), 0.0);
        assert_eq!(sharing_function(0.9, 0.2, 1.0), 0.0);
        // alpha 2 shares less at the same distance
        let linear = sharing_function(0.1, 0.2, 1.0);
        let squared = sharing_function(0.1, 0.2, 2.0);
        assert!((linear - 0.5).abs() < 1e-12);
        assert!((squared - 0.75).abs() < 1e-12);
    }

    // ---- Niche count ----

    #[test]
    fn test_isolated_candidate_counts_itself() {
        let pop = vec![point("a", 1.0, 0.0, 0.0), point("b", 1.0, 1.0, 1.0)];
        let n = niche_count(&pop[0], &pop, 0.1, 1.0).unwrap();
        assert_eq!(n, 1.0);

        // Not a member of the population: still counts itself
        let outsider = point("z", 1.0, 0.5, 0.5);
        assert_eq!(niche_count(&outsider, &pop, 0.1, 1.0).unwrap(), 1.0);
    }

    #[test]
    fn test_identical_neighbours_count_fully() {
        let pop = vec![
            point("a", 1.0, 0.3, 0.3),
            point("b", 1.0, 0.3, 0.3),
            point("c", 1.0, 0.3, 0.3),
        ];
        let n = niche_count(&pop[1], &pop, 0.1, 1.0).unwrap();
        assert!((n - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_niche_count_validation() {
        let pop = vec![point("a", 1.0, 0.0, 0.0)];
        assert!(matches!(
            niche_count(&pop[0], &pop, 0.0, 1.0),
            Err(SelectionError::InvalidParameter {
                name: "niche_radius",
                ..
            })
        ));
        assert!(niche_count(&pop[0], &pop, 0.1, -1.0).is_err());

        let bare = Candidate::new("bare", 0);
        assert_eq!(
            niche_count(&bare, &pop, 0.1, 1.0),
            Err(SelectionError::MissingNormalizedObjectives { id: "bare".into() })
        );
    }

    #[test]
    fn test_niche_count_rejects_repeated_ids() {
        let pop = vec![
            point("dup", 1.0, 0.3, 0.3),
            point("dup", 1.0, 0.3, 0.3),
            point("m", 1.0, 0.9, 0.9),
        ];
        assert_eq!(
            niche_count(&pop[2], &pop, 0.1, 1.0),
            Err(SelectionError::DuplicateId { id: "dup".into() })
        );
    }

    #[test]
    fn test_niche_count_rejects_nan() {
        let pop = vec![point("a", 1.0, 0.3, 0.3), point("n", 1.0, f64::NAN, 0.3)];
        assert_eq!(
            niche_count(&pop[0], &pop, 0.1, 1.0),
            Err(SelectionError::InvalidObjective {
                id: "n".into(),
                objective: "x".into()
            })
        );
    }

    // ---- Apply sharing ----

    #[test]
    fn test_crowded_pair_is_penalized() {
        let pop = vec![
            point("a", 0.8, 0.5, 0.5),
            point("b", 0.8, 0.5, 0.5),
            point("c", 0.8, 0.0, 1.0),
        ];
        let shared = apply_sharing(&pop, 0.2, &SharingConfig::default()).unwrap();

        assert!((shared[0].fitness.unwrap() - 0.4).abs() < 1e-12);
        assert!((shared[1].fitness.unwrap() - 0.4).abs() < 1e-12);
        assert!((shared[2].fitness.unwrap() - 0.8).abs() < 1e-12);

        assert_eq!(
            shared[0].metadata.get(META_RAW_FITNESS),
            Some(&MetadataValue::Float(0.8))
        );
        assert_eq!(
            shared[0].metadata.get(META_NICHE_COUNT),
            Some(&MetadataValue::Float(2.0))
        );
        // Input untouched
        assert_eq!(pop[0].fitness, Some(0.8));
    }

    #[test]
    fn test_no_metadata_without_preserve() {
        let pop = vec![point("a", 0.8, 0.5, 0.5), point("b", 0.8, 0.5, 0.5)];
        let config = SharingConfig::default().with_preserve_raw_fitness(false);
        let shared = apply_sharing(&pop, 0.2, &config).unwrap();
        assert!(shared[0].metadata.is_empty());
        assert!((shared[0].fitness.unwrap() - 0.4).abs() < 1e-12);
    }

    #[test]
    fn test_missing_fitness_stays_none() {
        let pop = vec![
            Candidate::new("u", 0).with_normalized_objectives([("x", 0.5), ("y", 0.5)]),
            point("a", 1.0, 0.5, 0.5),
        ];
        let shared = apply_sharing(&pop, 0.2, &SharingConfig::default()).unwrap();
        assert_eq!(shared[0].fitness, None);
        assert!(!shared[0].metadata.contains_key(META_RAW_FITNESS));
        assert_eq!(
            shared[0].metadata.get(META_NICHE_COUNT),
            Some(&MetadataValue::Float(2.0))
        );
        assert!((shared[1].fitness.unwrap() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_apply_sharing_requires_objectives() {
        let pop = vec![point("a", 1.0, 0.5, 0.5), Candidate::new("raw", 0).with_fitness(1.0)];
        assert_eq!(
            apply_sharing(&pop, 0.2, &SharingConfig::default()),
            Err(SelectionError::MissingNormalizedObjectives { id: "raw".into() })
        );
    }

    #[test]
    fn test_apply_sharing_rejects_repeated_ids() {
        // Coincident copies under one id would skip each other as "self"
        // and escape the crowding penalty.
        let pop = vec![point("dup", 1.0, 0.5, 0.5), point("dup", 1.0, 0.5, 0.5)];
        assert_eq!(
            apply_sharing(&pop, 0.2, &SharingConfig::default()),
            Err(SelectionError::DuplicateId { id: "dup".into() })
        );
    }

    #[test]
    fn test_share_uses_configured_radius() {
        let pop = vec![point("a", 1.0, 0.5, 0.5), point("b", 1.0, 0.55, 0.5)];
        let tight = SharingConfig::default().with_radius(NicheRadiusStrategy::Fixed(0.01));
        let shared = share(&pop, &tight).unwrap();
        assert_eq!(shared[0].fitness, Some(1.0));

        let wide = SharingConfig::default().with_radius(NicheRadiusStrategy::Fixed(0.1));
        let shared = share(&pop, &wide).unwrap();
        // sh(0.05) = 0.5 → niche 1.5
        assert!((shared[0].fitness.unwrap() - 1.0 / 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_empty_population() {
        let shared = apply_sharing(&[], 0.2, &SharingConfig::default()).unwrap();
        assert!(shared.is_empty());
    }
}
