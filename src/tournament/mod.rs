//! Tournament selection of parents for breeding.
//!
//! Each tournament draws distinct contestants uniformly at random and keeps
//! the winner under a comparator. Randomness is injected: every entry point
//! takes `&mut R: Rng`, so a seeded generator gives reproducible parents.
//!
//! # Strategies
//!
//! - [`TournamentStrategy::Pareto`]: rank, then crowding distance
//! - [`TournamentStrategy::Diversity`]: crowding distance, then rank
//! - [`TournamentStrategy::Adaptive`]: Pareto comparison, tournament size
//!   scaled by [`population_diversity`]
//!
//! # References
//!
//! - Goldberg & Deb (1991), "A Comparative Analysis of Selection Schemes
//!   Used in Genetic Algorithms"
//! - Deb et al. (2002), crowded-comparison operator

mod config;
mod diversity;
mod selector;

pub use config::{TournamentConfig, TournamentStrategy};
pub use diversity::{adaptive_tournament_size, population_diversity};
pub use selector::{diversity_compare, pareto_compare, select, tournament, Comparator};
