//! Fitness sharing.
//!
//! Divides each candidate's fitness by its niche count, the sum of a sharing
//! function over its neighbours in normalized objective space, so that
//! crowded regions lose selection pressure relative to sparse ones.
//!
//! # Sharing function
//!
//! `sh(d) = 1 - (d/r)^alpha` for `d < r`, else 0, with niche radius `r`.
//! A candidate always shares with itself, so its niche count is at least 1.
//!
//! # Niche radius
//!
//! See [`NicheRadiusStrategy`]: fixed, population-based, objective-range
//! (default) or adaptive to the measured pairwise distance.
//!
//! # Adaptive sharing
//!
//! [`adaptive_apply_sharing`] measures diversity first and shares only when
//! it falls below a threshold.
//!
//! # References
//!
//! - Goldberg & Richardson (1987), "Genetic Algorithms with Sharing for
//!   Multimodal Function Optimization"
//! - Deb & Goldberg (1989), "An Investigation of Niche and Species Formation
//!   in Genetic Function Optimization"

mod adaptive;
mod config;
mod niche;
mod radius;

pub use adaptive::{adaptive_apply_sharing, measure_diversity, SharingOutcome};
pub use config::{AdaptiveSharingConfig, DiversityMetric, SharingConfig};
pub use niche::{
    apply_sharing, niche_count, share, sharing_function, META_NICHE_COUNT, META_RAW_FITNESS,
};
pub use radius::{calculate_niche_radius, NicheRadiusStrategy, DEFAULT_RADIUS_FRACTION};
