//! Candidate and population data model.
//!
//! Every other module reads and annotates these types. Candidates are
//! value types: selection operations take slices and return annotated
//! copies, so running an operation has no effect on its input.
//!
//! # Key Types
//!
//! - [`Candidate`]: one scored prompt variant
//! - [`CrowdingDistance`]: finite distance or boundary tag, totally ordered
//! - [`Population`]: bounded, id-unique collection with derived statistics
//! - [`objective_distance`]: Euclidean distance in normalized objective space

mod candidate;
mod collection;
mod distance;
mod space;

pub use candidate::{Candidate, MetadataValue, ObjectiveMap, META_PARENTS, META_SOURCE};
pub use collection::{Population, PopulationStats};
pub use distance::CrowdingDistance;
pub use space::{objective_distance, PAIRWISE_SAMPLE_LIMIT};

pub(crate) use collection::require_unique_ids;
pub(crate) use space::{mean_pairwise_distance, objective_count};
