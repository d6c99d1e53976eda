//! Tournament configuration.

use crate::error::{SelectionError, SelectionResult};

/// How tournament winners are decided and sized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TournamentStrategy {
    /// Lower rank wins; ties go to the larger crowding distance.
    #[default]
    Pareto,

    /// Larger crowding distance wins; ties go to the lower rank.
    Diversity,

    /// Pareto comparison with a tournament size adapted to the measured
    /// population diversity.
    Adaptive,
}

/// Configuration for tournament selection.
///
/// # Examples
///
/// ```
/// use u_evoselect::tournament::{TournamentConfig, TournamentStrategy};
///
/// let config = TournamentConfig::default()
///     .with_strategy(TournamentStrategy::Adaptive)
///     .with_size_range(2, 6)
///     .with_diversity_threshold(0.4);
///
/// assert!(config.validate(10).is_ok());
/// assert!(config.validate(4).is_err()); // max size exceeds population
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TournamentConfig {
    /// Winner comparison and sizing policy.
    pub strategy: TournamentStrategy,

    /// Contestants per tournament for the fixed-size strategies.
    ///
    /// Higher = stronger selection pressure.
    /// - 2: light pressure (good for diversity)
    /// - 3-5: moderate pressure (typical default)
    pub tournament_size: usize,

    /// Adaptive strategy: size used while diversity is below the threshold.
    pub min_tournament_size: usize,

    /// Adaptive strategy: size approached as diversity reaches 1.0.
    pub max_tournament_size: usize,

    /// Adaptive strategy: diversity below which the minimum size is used.
    pub diversity_threshold: f64,
}

impl Default for TournamentConfig {
    fn default() -> Self {
        Self {
            strategy: TournamentStrategy::default(),
            tournament_size: 3,
            min_tournament_size: 2,
            max_tournament_size: 5,
            diversity_threshold: 0.5,
        }
    }
}

impl TournamentConfig {
    /// Sets the strategy.
    pub fn with_strategy(mut self, strategy: TournamentStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Sets the fixed tournament size.
    pub fn with_tournament_size(mut self, k: usize) -> Self {
        self.tournament_size = k;
        self
    }

    /// Sets the adaptive size range.
    pub fn with_size_range(mut self, min: usize, max: usize) -> Self {
        self.min_tournament_size = min;
        self.max_tournament_size = max;
        self
    }

    /// Sets the adaptive diversity threshold.
    pub fn with_diversity_threshold(mut self, threshold: f64) -> Self {
        self.diversity_threshold = threshold.clamp(0.0, 1.0);
        self
    }

    /// Validates the configuration against a population size.
    ///
    /// Fixed strategies need `2 <= tournament_size <= population_size`.
    /// The adaptive strategy needs `min >= 2`, `min <= max` and
    /// `max <= population_size`.
    pub fn validate(&self, population_size: usize) -> SelectionResult<()> {
        match self.strategy {
            TournamentStrategy::Pareto | TournamentStrategy::Diversity => {
                check_size("tournament_size", self.tournament_size, population_size)
            }
            TournamentStrategy::Adaptive => {
                if self.min_tournament_size < 2 {
                    return Err(SelectionError::invalid(
                        "min_tournament_size",
                        "must be at least 2",
                    ));
                }
                if self.min_tournament_size > self.max_tournament_size {
                    return Err(SelectionError::invalid(
                        "min_tournament_size",
                        format!(
                            "{} exceeds max_tournament_size {}",
                            self.min_tournament_size, self.max_tournament_size
                        ),
                    ));
                }
                if self.max_tournament_size > population_size {
                    return Err(SelectionError::invalid(
                        "max_tournament_size",
                        format!(
                            "{} exceeds population size {population_size}",
                            self.max_tournament_size
                        ),
                    ));
                }
                if !(0.0..=1.0).contains(&self.diversity_threshold) {
                    return Err(SelectionError::invalid(
                        "diversity_threshold",
                        "must be within [0, 1]",
                    ));
                }
                Ok(())
            }
        }
    }
}

fn check_size(name: &'static str, size: usize, population_size: usize) -> SelectionResult<()> {
    if size < 2 {
        return Err(SelectionError::invalid(name, "must be at least 2"));
    }
    if size > population_size {
        return Err(SelectionError::invalid(
            name,
            format!("{size} exceeds population size {population_size}"),
        ));
    }
    Ok(())
}
