//! Candidate solutions and their metadata.

use super::distance::CrowdingDistance;
use crate::error::{SelectionError, SelectionResult};
use std::collections::BTreeMap;

/// Objective name → value.
pub type ObjectiveMap = BTreeMap<String, f64>;

/// Metadata key holding parent candidate ids.
pub const META_PARENTS: &str = "parents";

/// Metadata key holding the provenance of a candidate (mutation, crossover, seed).
pub const META_SOURCE: &str = "source";

/// A value in a candidate's metadata bag.
///
/// Kept to plain data so candidates stay serializable by external
/// checkpointing.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MetadataValue {
    Float(f64),
    Int(i64),
    Text(String),
    Flag(bool),
    Ids(Vec<String>),
}

impl MetadataValue {
    /// Returns the value as a float if it is numeric.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            MetadataValue::Float(v) => Some(*v),
            MetadataValue::Int(v) => Some(*v as f64),
            _ => None,
        }
    }

    /// Returns the text if this is a `Text` value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            MetadataValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<f64> for MetadataValue {
    fn from(v: f64) -> Self {
        MetadataValue::Float(v)
    }
}

impl From<i64> for MetadataValue {
    fn from(v: i64) -> Self {
        MetadataValue::Int(v)
    }
}

impl From<bool> for MetadataValue {
    fn from(v: bool) -> Self {
        MetadataValue::Flag(v)
    }
}

impl From<&str> for MetadataValue {
    fn from(v: &str) -> Self {
        MetadataValue::Text(v.to_string())
    }
}

impl From<String> for MetadataValue {
    fn from(v: String) -> Self {
        MetadataValue::Text(v)
    }
}

/// One prompt variant under evaluation.
///
/// The orchestrator owns a candidate's lifecycle. Selection operations only
/// read fields and return annotated copies; they never delete candidates.
///
/// Derived fields (`pareto_rank`, `crowding_distance`) are `None` until the
/// corresponding stage has run. Operations that need them check via
/// [`require_rank`](Candidate::require_rank) and friends, which report the
/// offending id.
///
/// # Examples
///
/// ```
/// use u_evoselect::population::Candidate;
///
/// let c = Candidate::new("p-1", 0)
///     .with_fitness(0.8)
///     .with_normalized_objectives([("accuracy", 0.9), ("latency", 0.4)]);
///
/// assert_eq!(c.id, "p-1");
/// assert!(c.pareto_rank.is_none());
/// assert_eq!(c.normalized("accuracy"), Some(0.9));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Candidate {
    /// Unique, stable identifier.
    pub id: String,

    /// Generation in which the candidate was created.
    pub generation: u32,

    /// Scalar fitness; may be overwritten by fitness sharing.
    pub fitness: Option<f64>,

    /// Raw objective values from the evaluator.
    pub objectives: Option<ObjectiveMap>,

    /// Objective values in [0, 1], higher is better.
    ///
    /// Minimization objectives arrive already inverted.
    pub normalized_objectives: Option<ObjectiveMap>,

    /// Pareto rank, 1 = non-dominated front.
    pub pareto_rank: Option<usize>,

    /// Crowding distance within the candidate's front.
    pub crowding_distance: Option<CrowdingDistance>,

    /// Provenance and annotations (parents, source, niche count, ...).
    pub metadata: BTreeMap<String, MetadataValue>,
}

impl Candidate {
    /// Creates an unevaluated candidate.
    pub fn new(id: impl Into<String>, generation: u32) -> Self {
        Self {
            id: id.into(),
            generation,
            fitness: None,
            objectives: None,
            normalized_objectives: None,
            pareto_rank: None,
            crowding_distance: None,
            metadata: BTreeMap::new(),
        }
    }

    /// Sets the scalar fitness.
    pub fn with_fitness(mut self, fitness: f64) -> Self {
        self.fitness = Some(fitness);
        self
    }

    /// Sets the raw objectives.
    pub fn with_objectives<K, I>(mut self, objectives: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, f64)>,
    {
        self.objectives = Some(objectives.into_iter().map(|(k, v)| (k.into(), v)).collect());
        self
    }

    /// Sets the normalized objectives.
    pub fn with_normalized_objectives<K, I>(mut self, objectives: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, f64)>,
    {
        self.normalized_objectives =
            Some(objectives.into_iter().map(|(k, v)| (k.into(), v)).collect());
        self
    }

    /// Inserts a metadata entry.
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<MetadataValue>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Records parent ids under [`META_PARENTS`].
    pub fn with_parents<S: Into<String>>(mut self, parents: impl IntoIterator<Item = S>) -> Self {
        let ids = parents.into_iter().map(Into::into).collect();
        self.metadata
            .insert(META_PARENTS.to_string(), MetadataValue::Ids(ids));
        self
    }

    /// Returns a copy annotated with the given Pareto rank.
    ///
    /// Any previous crowding distance is cleared, since it belonged to the
    /// old front.
    pub fn ranked(&self, rank: usize) -> Self {
        let mut c = self.clone();
        c.pareto_rank = Some(rank);
        c.crowding_distance = None;
        c
    }

    /// Returns a copy annotated with the given crowding distance.
    pub fn with_crowding_distance(&self, distance: CrowdingDistance) -> Self {
        let mut c = self.clone();
        c.crowding_distance = Some(distance);
        c
    }

    /// Looks up a single normalized objective.
    pub fn normalized(&self, objective: &str) -> Option<f64> {
        self.normalized_objectives
            .as_ref()
            .and_then(|m| m.get(objective).copied())
    }

    /// Returns the Pareto rank or a [`SelectionError::MissingRank`].
    pub fn require_rank(&self) -> SelectionResult<usize> {
        self.pareto_rank.ok_or_else(|| SelectionError::MissingRank {
            id: self.id.clone(),
        })
    }

    /// Returns the crowding distance or a [`SelectionError::MissingCrowdingDistance`].
    pub fn require_crowding_distance(&self) -> SelectionResult<CrowdingDistance> {
        self.crowding_distance
            .ok_or_else(|| SelectionError::MissingCrowdingDistance {
                id: self.id.clone(),
            })
    }

    /// Returns the normalized objectives or a typed error if absent or empty.
    pub fn require_normalized(&self) -> SelectionResult<&ObjectiveMap> {
        match &self.normalized_objectives {
            None => Err(SelectionError::MissingNormalizedObjectives {
                id: self.id.clone(),
            }),
            Some(m) if m.is_empty() => Err(SelectionError::NoObjectives {
                id: self.id.clone(),
            }),
            Some(m) => Ok(m),
        }
    }

    /// Returns `(rank, distance)`, failing on whichever is missing first.
    pub fn require_ranking(&self) -> SelectionResult<(usize, CrowdingDistance)> {
        Ok((self.require_rank()?, self.require_crowding_distance()?))
    }
}
