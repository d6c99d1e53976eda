//! Elite selection strategies.

use super::config::{EliteConfig, EliteStrategy};
use crate::crowding::{sort_by_survival, Ranking};
use crate::error::{SelectionError, SelectionResult};
use crate::population::{objective_distance, Candidate};

/// Selects elites with the strategy and count resolved from `config`.
///
/// # Example
///
/// ```
/// use u_evoselect::crowding::{assign_crowding_distances, environmental_selection};
/// use u_evoselect::elite::{select, EliteConfig};
/// use u_evoselect::population::Candidate;
///
/// let pop: Vec<Candidate> = (0..10)
///     .map(|i| {
///         let x = i as f64 / 10.0;
///         Candidate::new(format!("p{i}"), 0).with_normalized_objectives([("acc", x), ("cost", 1.0 - x)])
///     })
///     .collect();
/// let ranked = environmental_selection(&pop, pop.len()).unwrap();
///
/// let elites = select(&ranked, &EliteConfig::default().with_elite_count(3)).unwrap();
/// assert_eq!(elites.len(), 3);
/// ```
pub fn select(candidates: &[Candidate], config: &EliteConfig) -> SelectionResult<Vec<Candidate>> {
    config.validate()?;
    let count = config.resolve_count(candidates.len());

    match config.strategy {
        EliteStrategy::Standard => select_top(candidates, count),
        EliteStrategy::PreserveFrontier => select_elites_preserve_frontier(candidates, count),
        EliteStrategy::Diverse => {
            select_diverse_elites(candidates, count, config.similarity_threshold)
        }
    }
}

/// Standard elitism: the top candidates by rank, then crowding distance.
///
/// The count comes from `config.resolve_count`; the strategy field is
/// ignored.
pub fn select_elites(
    candidates: &[Candidate],
    config: &EliteConfig,
) -> SelectionResult<Vec<Candidate>> {
    config.validate()?;
    select_top(candidates, config.resolve_count(candidates.len()))
}

fn select_top(candidates: &[Candidate], count: usize) -> SelectionResult<Vec<Candidate>> {
    let mut sorted = sort_by_survival(candidates)?;
    sorted.truncate(count);
    log::debug!("standard elitism: {} of {}", sorted.len(), candidates.len());
    Ok(sorted)
}

/// Frontier-preserving elitism.
///
/// - `|front 1| > elite_count`: front 1 trimmed by crowding distance,
///   never spilling into worse fronts
/// - `|front 1| < elite_count`: all of front 1, then the best of the lower
///   fronts by rank and crowding distance
/// - equal: front 1 as is
///
/// `elite_count` is capped at the population size. Every candidate must
/// carry rank and crowding distance.
pub fn select_elites_preserve_frontier(
    candidates: &[Candidate],
    elite_count: usize,
) -> SelectionResult<Vec<Candidate>> {
    let sorted = sort_by_survival(candidates)?;
    let count = elite_count.min(sorted.len());

    let (frontier, rest): (Vec<Candidate>, Vec<Candidate>) = sorted
        .into_iter()
        .partition(|c| c.pareto_rank == Some(1));

    let elites = if frontier.len() >= count {
        log::debug!(
            "frontier elitism: front 1 has {} members, keeping {count}",
            frontier.len()
        );
        frontier.into_iter().take(count).collect()
    } else {
        let shortfall = count - frontier.len();
        log::debug!(
            "frontier elitism: front 1 has {} members, filling {shortfall} from lower fronts",
            frontier.len()
        );
        frontier
            .into_iter()
            .chain(rest.into_iter().take(shortfall))
            .collect()
    };

    Ok(elites)
}

/// Diversity-preserving elitism.
///
/// Candidates are visited by rank, then crowding distance, then generation
/// (older first). A candidate is accepted only if its normalized-objective
/// distance to every accepted elite exceeds `similarity_threshold`.
/// Stops at `elite_count` accepted or when candidates run out, so the
/// result may be smaller than `elite_count`.
pub fn select_diverse_elites(
    candidates: &[Candidate],
    elite_count: usize,
    similarity_threshold: f64,
) -> SelectionResult<Vec<Candidate>> {
    if !similarity_threshold.is_finite() || similarity_threshold < 0.0 {
        return Err(SelectionError::invalid(
            "similarity_threshold",
            "must be finite and non-negative",
        ));
    }

    let mut keyed = candidates
        .iter()
        .map(|c| Ok((Ranking::of(c)?, c.generation, c)))
        .collect::<SelectionResult<Vec<_>>>()?;
    keyed.sort_by(|a, b| a.0.cmp(&b.0).then(a.1.cmp(&b.1)));

    let mut elites: Vec<Candidate> = Vec::with_capacity(elite_count);
    let mut skipped = 0usize;
    for (_, _, candidate) in keyed {
        if elites.len() >= elite_count {
            break;
        }
        let mut distinct = true;
        for elite in &elites {
            if objective_distance(candidate, elite)? <= similarity_threshold {
                distinct = false;
                break;
            }
        }
        if distinct {
            elites.push(candidate.clone());
        } else {
            skipped += 1;
        }
    }

    log::debug!(
        "diverse elitism: accepted {}, skipped {skipped} near-duplicates",
        elites.len()
    );

    Ok(elites)
}
