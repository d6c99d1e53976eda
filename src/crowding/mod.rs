//! Crowding-distance selection.
//!
//! Applies crowding distance to concrete survivor-selection tasks: trimming
//! a ranked population, NSGA-II environmental selection over parents and
//! offspring, and identifying boundary solutions.
//!
//! Survival order is defined once, by [`Ranking`]: lower Pareto rank first,
//! then larger crowding distance, with boundary solutions ahead of every
//! finite distance. Elitism reuses the same ordering.

mod ranking;
mod selector;

pub use ranking::{sort_by_survival, Ranking};
pub use selector::{
    assign_crowding_distances, environmental_selection, identify_boundary_solutions,
    select_by_crowding_distance,
};

pub(crate) use selector::validate_count;
