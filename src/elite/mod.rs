//! Elitism: guaranteed survival of the best candidates.
//!
//! Three strategies, all built on the survival order of
//! [`crowding::Ranking`](crate::crowding::Ranking):
//!
//! - [`select_elites`]: top N by rank, then crowding distance
//! - [`select_elites_preserve_frontier`]: the whole non-dominated front
//!   survives whenever it fits (the default for [`select`])
//! - [`select_diverse_elites`]: top N, skipping near-duplicates in
//!   objective space
//!
//! Every candidate must carry a Pareto rank and crowding distance, e.g.
//! from [`environmental_selection`](crate::crowding::environmental_selection)
//! or [`assign_crowding_distances`](crate::crowding::assign_crowding_distances).

mod config;
mod selector;

pub use config::{EliteConfig, EliteStrategy};
pub use selector::{
    select, select_diverse_elites, select_elites, select_elites_preserve_frontier,
};
