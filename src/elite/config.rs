//! Elitism configuration.

use crate::error::{SelectionError, SelectionResult};

/// Which elitism strategy [`select`](super::select) applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EliteStrategy {
    /// Top candidates by rank then crowding distance.
    Standard,

    /// The whole non-dominated front survives whenever it fits; a front
    /// larger than the elite count is trimmed by crowding distance only.
    ///
    /// The only strategy that cannot regress frontier quality between
    /// generations.
    #[default]
    PreserveFrontier,

    /// Top candidates, skipping near-duplicates in objective space.
    Diverse,
}

/// Configuration for elite selection.
///
/// # Examples
///
/// ```
/// use u_evoselect::elite::{EliteConfig, EliteStrategy};
///
/// let config = EliteConfig::default()
///     .with_strategy(EliteStrategy::Diverse)
///     .with_elite_ratio(0.2)
///     .with_similarity_threshold(0.05);
///
/// assert_eq!(config.resolve_count(20), 4);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EliteConfig {
    /// Strategy used by [`select`](super::select).
    pub strategy: EliteStrategy,

    /// Fraction of the population kept as elites (0.0–1.0).
    ///
    /// Ignored when `elite_count` is set.
    pub elite_ratio: f64,

    /// Explicit elite count, overriding `elite_ratio`.
    pub elite_count: Option<usize>,

    /// Lower bound on the elite count.
    pub min_elites: usize,

    /// Minimum objective-space distance between diverse elites.
    pub similarity_threshold: f64,
}

impl Default for EliteConfig {
    fn default() -> Self {
        Self {
            strategy: EliteStrategy::default(),
            elite_ratio: 0.15,
            elite_count: None,
            min_elites: 1,
            similarity_threshold: 0.01,
        }
    }
}

impl EliteConfig {
    /// Sets the elitism strategy.
    pub fn with_strategy(mut self, strategy: EliteStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Sets the elite ratio.
    pub fn with_elite_ratio(mut self, ratio: f64) -> Self {
        self.elite_ratio = ratio.clamp(0.0, 1.0);
        self
    }

    /// Sets an explicit elite count.
    pub fn with_elite_count(mut self, count: usize) -> Self {
        self.elite_count = Some(count);
        self
    }

    /// Sets the minimum number of elites.
    pub fn with_min_elites(mut self, min: usize) -> Self {
        self.min_elites = min;
        self
    }

    /// Sets the similarity threshold for diverse elitism.
    pub fn with_similarity_threshold(mut self, threshold: f64) -> Self {
        self.similarity_threshold = threshold.max(0.0);
        self
    }

    /// Number of elites for a population of `population_size`.
    ///
    /// `elite_count` if set, else `round(population_size × elite_ratio)`;
    /// floored at `min_elites`, capped at `population_size`.
    pub fn resolve_count(&self, population_size: usize) -> usize {
        let base = self
            .elite_count
            .unwrap_or_else(|| (population_size as f64 * self.elite_ratio).round() as usize);
        base.max(self.min_elites).min(population_size)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> SelectionResult<()> {
        if !(0.0..=1.0).contains(&self.elite_ratio) {
            return Err(SelectionError::invalid(
                "elite_ratio",
                format!("{} is outside [0, 1]", self.elite_ratio),
            ));
        }
        if !self.similarity_threshold.is_finite() || self.similarity_threshold < 0.0 {
            return Err(SelectionError::invalid(
                "similarity_threshold",
                "must be finite and non-negative",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EliteConfig::default();
        assert_eq!(config.strategy, EliteStrategy::PreserveFrontier);
        assert!((config.elite_ratio - 0.15).abs() < 1e-12);
        assert_eq!(config.elite_count, None);
        assert_eq!(config.min_elites, 1);
        assert!((config.similarity_threshold - 0.01).abs() < 1e-12);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_resolve_count_ratio() {
        let config = EliteConfig::default();
        assert_eq!(config.resolve_count(100), 15);
        assert_eq!(config.resolve_count(10), 2); // round(1.5)
        assert_eq!(config.resolve_count(3), 1); // round(0.45) = 0, floored at 1
    }

    #[test]
    fn test_resolve_count_explicit_and_capped() {
        let config = EliteConfig::default().with_elite_count(8);
        assert_eq!(config.resolve_count(20), 8);
        assert_eq!(config.resolve_count(5), 5);
        assert_eq!(config.resolve_count(0), 0);
    }

    #[test]
    fn test_min_elites_floor() {
        let config = EliteConfig::default().with_min_elites(4);
        assert_eq!(config.resolve_count(10), 4);
    }

    #[test]
    fn test_clamping_builders() {
        let config = EliteConfig::default()
            .with_elite_ratio(1.7)
            .with_similarity_threshold(-1.0);
        assert!((config.elite_ratio - 1.0).abs() < 1e-12);
        assert_eq!(config.similarity_threshold, 0.0);
    }

    #[test]
    fn test_validate_rejects_raw_fields() {
        let config = EliteConfig {
            elite_ratio: 2.0,
            ..EliteConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(SelectionError::InvalidParameter {
                name: "elite_ratio",
                ..
            })
        ));

        let config = EliteConfig {
            similarity_threshold: f64::NAN,
            ..EliteConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
