//! Tournament parent selection.

use super::config::{TournamentConfig, TournamentStrategy};
use super::diversity::{adaptive_tournament_size, population_diversity};
use crate::crowding::Ranking;
use crate::error::{SelectionError, SelectionResult};
use crate::population::{require_unique_ids, Candidate};
use rand::Rng;
use std::cmp::Ordering;

/// Winner comparison: `Ordering::Less` means the left contestant wins.
pub type Comparator = fn(&Ranking, &Ranking) -> Ordering;

/// Pareto comparison: lower rank wins, then larger crowding distance
/// (boundary beats any finite distance).
pub fn pareto_compare(a: &Ranking, b: &Ranking) -> Ordering {
    a.cmp(b)
}

/// Diversity comparison: larger crowding distance wins (boundary beats
/// finite); equal distances, including two boundaries, go to the lower rank.
pub fn diversity_compare(a: &Ranking, b: &Ranking) -> Ordering {
    b.distance
        .cmp(&a.distance)
        .then_with(|| a.rank.cmp(&b.rank))
}

/// Runs one tournament over `size` distinct contestants drawn uniformly.
///
/// Returns the index of the winner. Ties go to the contestant drawn first.
///
/// # Errors
///
/// [`SelectionError::InvalidParameter`] unless `2 <= size <= rankings.len()`.
pub fn tournament<R: Rng>(
    rankings: &[Ranking],
    size: usize,
    compare: Comparator,
    rng: &mut R,
) -> SelectionResult<usize> {
    if size < 2 || size > rankings.len() {
        return Err(SelectionError::invalid(
            "tournament_size",
            format!("{size} not within 2..={}", rankings.len()),
        ));
    }

    let contestants = rand::seq::index::sample(rng, rankings.len(), size);
    let mut iter = contestants.iter();
    let mut best = match iter.next() {
        Some(i) => i,
        None => return Err(SelectionError::EmptyPopulation),
    };
    for idx in iter {
        if compare(&rankings[idx], &rankings[best]) == Ordering::Less {
            best = idx;
        }
    }
    Ok(best)
}

/// Selects `count` parents by repeated tournaments.
///
/// Every candidate must carry a Pareto rank and crowding distance. The same
/// candidate may win several tournaments; winners are returned as clones in
/// the order they were selected.
///
/// # Errors
///
/// - `count == 0`: invalid parameter
/// - empty input: [`SelectionError::EmptyPopulation`]
/// - tournament size bounds violated (see [`TournamentConfig::validate`])
/// - missing rank or crowding distance on any candidate
/// - a repeated candidate id
///
/// # Example
///
/// ```
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
/// use u_evoselect::population::{Candidate, CrowdingDistance};
/// use u_evoselect::tournament::{select, TournamentConfig};
///
/// let pop: Vec<Candidate> = (1..=4)
///     .map(|rank| {
///         Candidate::new(format!("r{rank}"), 0)
///             .ranked(rank)
///             .with_crowding_distance(CrowdingDistance::Boundary)
///     })
///     .collect();
///
/// let mut rng = StdRng::seed_from_u64(42);
/// let config = TournamentConfig::default().with_tournament_size(4);
/// let parents = select(&pop, 3, &config, &mut rng).unwrap();
/// assert!(parents.iter().all(|p| p.id == "r1"));
/// ```
pub fn select<R: Rng>(
    candidates: &[Candidate],
    count: usize,
    config: &TournamentConfig,
    rng: &mut R,
) -> SelectionResult<Vec<Candidate>> {
    if count == 0 {
        return Err(SelectionError::invalid("count", "must be at least 1"));
    }
    if candidates.is_empty() {
        return Err(SelectionError::EmptyPopulation);
    }
    config.validate(candidates.len())?;
    require_unique_ids(candidates)?;

    let rankings = candidates
        .iter()
        .map(Ranking::of)
        .collect::<SelectionResult<Vec<_>>>()?;

    let (size, compare): (usize, Comparator) = match config.strategy {
        TournamentStrategy::Pareto => (config.tournament_size, pareto_compare),
        TournamentStrategy::Diversity => (config.tournament_size, diversity_compare),
        TournamentStrategy::Adaptive => {
            let diversity = population_diversity(candidates);
            let size = adaptive_tournament_size(diversity, config);
            log::debug!("adaptive tournament: diversity {diversity:.4} -> size {size}");
            (size, pareto_compare)
        }
    };

    let mut winners = Vec::with_capacity(count);
    for _ in 0..count {
        let idx = tournament(&rankings, size, compare, rng)?;
        winners.push(candidates[idx].clone());
    }

    log::debug!(
        "tournament selection: {count} parents from {} candidates (size {size}, {:?})",
        candidates.len(),
        config.strategy
    );

    Ok(winners)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::population::CrowdingDistance;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn ranked(id: &str, rank: usize, d: CrowdingDistance) -> Candidate {
        Candidate::new(id, 0).ranked(rank).with_crowding_distance(d)
    }

    // ---- Comparators ----

    #[test]
    fn test_pareto_compare() {
        let r1 = Ranking::new(1, CrowdingDistance::Finite(0.1));
        let r2 = Ranking::new(2, CrowdingDistance::Boundary);
        assert_eq!(pareto_compare(&r1, &r2), Ordering::Less);

        let edge = Ranking::new(1, CrowdingDistance::Boundary);
        assert_eq!(pareto_compare(&edge, &r1), Ordering::Less);
    }

    #[test]
    fn test_diversity_compare() {
        let r1 = Ranking::new(1, CrowdingDistance::Finite(0.1));
        let r2_edge = Ranking::new(2, CrowdingDistance::Boundary);
        assert_eq!(diversity_compare(&r2_edge, &r1), Ordering::Less);

        let r3_edge = Ranking::new(3, CrowdingDistance::Boundary);
        assert_eq!(diversity_compare(&r2_edge, &r3_edge), Ordering::Less);

        let r2_same = Ranking::new(2, CrowdingDistance::Finite(0.1));
        assert_eq!(diversity_compare(&r1, &r2_same), Ordering::Less);

        let far = Ranking::new(4, CrowdingDistance::Finite(0.9));
        assert_eq!(diversity_compare(&far, &r1), Ordering::Less);
    }

    // ---- Tournament ----

    #[test]
    fn test_full_tournament_picks_best() {
        let rankings = vec![
            Ranking::new(3, CrowdingDistance::Boundary),
            Ranking::new(1, CrowdingDistance::Finite(0.2)),
            Ranking::new(2, CrowdingDistance::Boundary),
        ];
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            assert_eq!(tournament(&rankings, 3, pareto_compare, &mut rng).unwrap(), 1);
            assert_eq!(tournament(&rankings, 3, diversity_compare, &mut rng).unwrap(), 2);
        }
    }

    #[test]
    fn test_tournament_size_bounds() {
        let rankings = vec![
            Ranking::new(2, CrowdingDistance::Boundary),
            Ranking::new(1, CrowdingDistance::Boundary),
        ];
        let mut rng = StdRng::seed_from_u64(1);
        assert!(tournament(&rankings, 0, pareto_compare, &mut rng).is_err());
        // A single contestant is a uniform draw, not a tournament
        assert_eq!(
            tournament(&rankings, 1, pareto_compare, &mut rng),
            Err(SelectionError::InvalidParameter {
                name: "tournament_size",
                reason: "1 not within 2..=2".into()
            })
        );
        assert!(tournament(&rankings, 3, pareto_compare, &mut rng).is_err());
        assert_eq!(tournament(&rankings, 2, pareto_compare, &mut rng).unwrap(), 1);
    }

    #[test]
    fn test_tournament_favors_better_ranks() {
        let pop: Vec<Candidate> = (1..=6)
            .map(|r| ranked(&format!("r{r}"), r, CrowdingDistance::Boundary))
            .collect();
        let mut rng = StdRng::seed_from_u64(42);
        let config = TournamentConfig::default();
        let parents = select(&pop, 3000, &config, &mut rng).unwrap();

        let count = |id: &str| parents.iter().filter(|p| p.id == id).count();
        // r6 is never drawn as a winner with size 3 (always beaten).
        assert_eq!(count("r6"), 0);
        assert_eq!(count("r5"), 0);
        assert!(count("r1") > count("r2"));
        assert!(count("r2") > count("r3"));
    }

    #[test]
    fn test_select_seeded_is_deterministic() {
        let pop: Vec<Candidate> = (0..8)
            .map(|i| {
                ranked(
                    &format!("c{i}"),
                    1 + i % 3,
                    CrowdingDistance::Finite(i as f64 / 10.0),
                )
            })
            .collect();
        let config = TournamentConfig::default();
        let a = select(&pop, 10, &config, &mut StdRng::seed_from_u64(99)).unwrap();
        let b = select(&pop, 10, &config, &mut StdRng::seed_from_u64(99)).unwrap();
        assert_eq!(a, b);
    }

    // ---- Validation ----

    #[test]
    fn test_select_validation() {
        let pop = vec![
            ranked("a", 1, CrowdingDistance::Boundary),
            ranked("b", 1, CrowdingDistance::Boundary),
        ];
        let mut rng = StdRng::seed_from_u64(0);
        let config = TournamentConfig::default().with_tournament_size(2);

        assert!(matches!(
            select(&pop, 0, &config, &mut rng),
            Err(SelectionError::InvalidParameter { name: "count", .. })
        ));
        assert_eq!(
            select(&[], 1, &config, &mut rng),
            Err(SelectionError::EmptyPopulation)
        );
        assert!(select(&pop, 1, &TournamentConfig::default(), &mut rng).is_err());

        let repeated = vec![pop[0].clone(), pop[0].clone()];
        assert_eq!(
            select(&repeated, 1, &config, &mut rng),
            Err(SelectionError::DuplicateId { id: "a".into() })
        );

        let unranked = vec![pop[0].clone(), Candidate::new("raw", 0)];
        assert_eq!(
            select(&unranked, 1, &config, &mut rng),
            Err(SelectionError::MissingRank { id: "raw".into() })
        );
    }

    #[test]
    fn test_adaptive_low_diversity_uses_min_size() {
        // Identical finite distances → diversity 0 → min size 2.
        let pop: Vec<Candidate> = (1..=5)
            .map(|r| ranked(&format!("r{r}"), r, CrowdingDistance::Finite(0.5)))
            .collect();
        let config = TournamentConfig::default()
            .with_strategy(TournamentStrategy::Adaptive)
            .with_size_range(2, 5);
        let mut rng = StdRng::seed_from_u64(3);
        let parents = select(&pop, 500, &config, &mut rng).unwrap();
        // With size 2 the worst can never win, but the second worst can.
        assert!(parents.iter().all(|p| p.id != "r5"));
        assert!(parents.iter().any(|p| p.id == "r4"));
    }
}
