//! Fitness sharing configuration.

use super::radius::NicheRadiusStrategy;
use crate::error::{SelectionError, SelectionResult};

/// How population diversity is measured before adaptive sharing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DiversityMetric {
    /// Mean finite crowding distance per objective. O(N).
    #[default]
    CrowdingDistance,
    /// Mean pairwise objective distance over a bounded sample.
    PairwiseDistance,
}

/// Configuration for fitness sharing.
///
/// # Examples
///
/// ```
/// use u_evoselect::sharing::{NicheRadiusStrategy, SharingConfig};
///
/// let config = SharingConfig::default()
///     .with_radius(NicheRadiusStrategy::Fixed(0.2))
///     .with_sharing_alpha(2.0);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SharingConfig {
    /// How the niche radius is chosen.
    pub radius: NicheRadiusStrategy,

    /// Shape of the sharing function, `1 - (d/r)^alpha`.
    ///
    /// 1.0 is triangular; larger values share less with near neighbours.
    pub sharing_alpha: f64,

    /// Keep the pre-sharing fitness and niche count in metadata.
    pub preserve_raw_fitness: bool,
}

impl Default for SharingConfig {
    fn default() -> Self {
        Self {
            radius: NicheRadiusStrategy::default(),
            sharing_alpha: 1.0,
            preserve_raw_fitness: true,
        }
    }
}

impl SharingConfig {
    /// Sets the niche radius strategy.
    pub fn with_radius(mut self, radius: NicheRadiusStrategy) -> Self {
        self.radius = radius;
        self
    }

    /// Sets the sharing exponent.
    pub fn with_sharing_alpha(mut self, alpha: f64) -> Self {
        self.sharing_alpha = alpha;
        self
    }

    /// Enables or disables keeping raw fitness in metadata.
    pub fn with_preserve_raw_fitness(mut self, preserve: bool) -> Self {
        self.preserve_raw_fitness = preserve;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> SelectionResult<()> {
        check_alpha(self.sharing_alpha)?;
        self.radius.validate()
    }
}

/// Configuration for [`adaptive_apply_sharing`](super::adaptive_apply_sharing).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AdaptiveSharingConfig {
    /// Sharing runs only when measured diversity is below this value.
    pub diversity_threshold: f64,

    /// Diversity measure.
    pub metric: DiversityMetric,

    /// Sharing parameters used when sharing runs.
    pub sharing: SharingConfig,
}

impl Default for AdaptiveSharingConfig {
    fn default() -> Self {
        Self {
            diversity_threshold: 0.3,
            metric: DiversityMetric::default(),
            sharing: SharingConfig::default(),
        }
    }
}

impl AdaptiveSharingConfig {
    /// Sets the diversity threshold.
    pub fn with_diversity_threshold(mut self, threshold: f64) -> Self {
        self.diversity_threshold = threshold.clamp(0.0, 1.0);
        self
    }

    /// Sets the diversity metric.
    pub fn with_metric(mut self, metric: DiversityMetric) -> Self {
        self.metric = metric;
        self
    }

    /// Sets the sharing parameters.
    pub fn with_sharing(mut self, sharing: SharingConfig) -> Self {
        self.sharing = sharing;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> SelectionResult<()> {
        if !(0.0..=1.0).contains(&self.diversity_threshold) {
            return Err(SelectionError::invalid(
                "diversity_threshold",
                "must be within [0, 1]",
            ));
        }
        self.sharing.validate()
    }
}

pub(crate) fn check_alpha(alpha: f64) -> SelectionResult<()> {
    if !alpha.is_finite() || alpha <= 0.0 {
        return Err(SelectionError::invalid(
            "sharing_alpha",
            format!("{alpha} must be finite and positive"),
        ));
    }
    Ok(())
}

pub(crate) fn check_radius(radius: f64) -> SelectionResult<()> {
    if !radius.is_finite() || radius <= 0.0 {
        return Err(SelectionError::invalid(
            "niche_radius",
            format!("{radius} must be finite and positive"),
        ));
    }
    Ok(())
}
