//! Bounded, id-unique candidate collection.

use super::candidate::Candidate;
use super::space::{mean_pairwise_distance, objective_count};
use crate::error::{SelectionError, SelectionResult};
use std::collections::HashSet;

/// Aggregate statistics derived from a population's members.
///
/// Recomputed whenever membership or fitness changes; never set directly.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PopulationStats {
    /// Number of candidates.
    pub size: usize,
    /// Highest fitness among evaluated candidates.
    pub best_fitness: Option<f64>,
    /// Mean fitness among evaluated candidates.
    pub avg_fitness: Option<f64>,
    /// Mean pairwise normalized-objective distance scaled into [0, 1].
    ///
    /// `None` when fewer than two candidates carry normalized objectives.
    pub diversity: Option<f64>,
}

impl PopulationStats {
    fn compute(candidates: &[Candidate]) -> Self {
        let fitnesses: Vec<f64> = candidates.iter().filter_map(|c| c.fitness).collect();
        let best_fitness = fitnesses.iter().copied().reduce(f64::max);
        let avg_fitness = if fitnesses.is_empty() {
            None
        } else {
            Some(fitnesses.iter().sum::<f64>() / fitnesses.len() as f64)
        };

        Self {
            size: candidates.len(),
            best_fitness,
            avg_fitness,
            diversity: objective_diversity(candidates),
        }
    }
}

/// Diversity over the candidates that have normalized objectives.
fn objective_diversity(candidates: &[Candidate]) -> Option<f64> {
    let evaluated: Vec<Candidate> = candidates
        .iter()
        .filter(|c| c.require_normalized().is_ok())
        .cloned()
        .collect();
    let m = objective_count(&evaluated).ok()?;
    if m == 0 {
        return None;
    }
    // Mismatched objective sets simply leave diversity unknown.
    let mean = mean_pairwise_distance(&evaluated).ok()??;
    Some((mean / (m as f64).sqrt()).clamp(0.0, 1.0))
}

/// Fails with the first repeated id.
///
/// Slice operations treat their input as a set keyed by id, so they check
/// this at their boundary.
pub(crate) fn require_unique_ids(candidates: &[Candidate]) -> SelectionResult<()> {
    let mut seen = HashSet::with_capacity(candidates.len());
    for c in candidates {
        if !seen.insert(c.id.as_str()) {
            return Err(SelectionError::DuplicateId { id: c.id.clone() });
        }
    }
    Ok(())
}

/// A bounded collection of candidates with unique ids.
///
/// Invariants: `len() <= capacity()` and ids are unique. Every mutating
/// method either preserves both or returns an error and leaves the
/// population unchanged.
///
/// # Examples
///
/// ```
/// use u_evoselect::population::{Candidate, Population};
///
/// let mut pop = Population::new(2);
/// pop.add(Candidate::new("a", 0).with_fitness(0.4)).unwrap();
/// pop.add(Candidate::new("b", 0).with_fitness(0.8)).unwrap();
///
/// assert!(pop.add(Candidate::new("c", 0)).is_err()); // full
/// assert_eq!(pop.stats().best_fitness, Some(0.8));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Population {
    capacity: usize,
    candidates: Vec<Candidate>,
    stats: PopulationStats,
}

impl Population {
    /// Creates an empty population.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            candidates: Vec::new(),
            stats: PopulationStats::default(),
        }
    }

    /// Builds a population from existing candidates, checking both invariants.
    pub fn from_candidates(capacity: usize, candidates: Vec<Candidate>) -> SelectionResult<Self> {
        if candidates.len() > capacity {
            return Err(SelectionError::CapacityExceeded { capacity });
        }
        require_unique_ids(&candidates)?;
        let stats = PopulationStats::compute(&candidates);
        Ok(Self {
            capacity,
            candidates,
            stats,
        })
    }

    /// Returns a new snapshot with the same capacity and different members.
    pub fn with_candidates(&self, candidates: Vec<Candidate>) -> SelectionResult<Self> {
        Self::from_candidates(self.capacity, candidates)
    }

    /// Adds a candidate.
    pub fn add(&mut self, candidate: Candidate) -> SelectionResult<()> {
        if self.candidates.len() >= self.capacity {
            return Err(SelectionError::CapacityExceeded {
                capacity: self.capacity,
            });
        }
        if self.contains(&candidate.id) {
            return Err(SelectionError::DuplicateId { id: candidate.id });
        }
        self.candidates.push(candidate);
        self.refresh();
        Ok(())
    }

    /// Removes and returns the candidate with the given id.
    pub fn remove(&mut self, id: &str) -> SelectionResult<Candidate> {
        let idx = self.position(id)?;
        let removed = self.candidates.remove(idx);
        self.refresh();
        Ok(removed)
    }

    /// Replaces the candidate that has the same id.
    pub fn replace(&mut self, candidate: Candidate) -> SelectionResult<Candidate> {
        let idx = self.position(&candidate.id)?;
        let old = std::mem::replace(&mut self.candidates[idx], candidate);
        self.refresh();
        Ok(old)
    }

    /// Looks up a candidate by id.
    pub fn get(&self, id: &str) -> Option<&Candidate> {
        self.candidates.iter().find(|c| c.id == id)
    }

    /// Returns true if a candidate with this id is present.
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Candidates with the given Pareto rank, in population order.
    pub fn front(&self, rank: usize) -> Vec<&Candidate> {
        self.candidates
            .iter()
            .filter(|c| c.pareto_rank == Some(rank))
            .collect()
    }

    /// Members in insertion order.
    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    /// Consumes the population, returning its members.
    pub fn into_candidates(self) -> Vec<Candidate> {
        self.candidates
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Derived statistics for the current members.
    pub fn stats(&self) -> &PopulationStats {
        &self.stats
    }

    fn position(&self, id: &str) -> SelectionResult<usize> {
        self.candidates
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| SelectionError::UnknownCandidate { id: id.to_string() })
    }

    fn refresh(&mut self) {
        self.stats = PopulationStats::compute(&self.candidates);
    }
}
