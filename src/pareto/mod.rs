//! Pareto dominance, non-dominated sorting, and crowding distance.
//!
//! The foundation every selection strategy builds on. All comparisons are
//! over `normalized_objectives`, where higher is better in every objective.
//!
//! # Algorithms
//!
//! - [`fast_non_dominated_sort`]: Fast non-dominated sorting (Deb et al., 2002)
//! - [`crowding_distance`]: Crowding distance assignment within one front
//! - [`dominates`]: Pareto dominance predicate on candidates
//!
//! # References
//!
//! - Deb et al. (2002), "A Fast and Elitist Multiobjective Genetic Algorithm: NSGA-II"
//! - IEEE Transactions on Evolutionary Computation, 6(2), 182-197

mod crowding;
mod dominance;
mod sort;

pub use crowding::{crowding_distance, CrowdingOptions};
pub use dominance::{dominance_cmp, dominates, Dominance, ObjectiveMatrix};
pub use sort::{assign_ranks, fast_non_dominated_sort, Front, ParetoFronts};

pub(crate) use crowding::crowding_distances;
pub(crate) use sort::non_dominated_sort;
