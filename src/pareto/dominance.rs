//! Pareto dominance over normalized objectives.

use crate::error::{SelectionError, SelectionResult};
use crate::population::{require_unique_ids, Candidate};

/// Dominance comparison result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dominance {
    /// Left dominates right.
    Left,
    /// Right dominates left.
    Right,
    /// Neither dominates the other.
    Neither,
}

/// Compares two objective rows for Pareto dominance.
///
/// All objectives are **maximized**: higher normalized values are better.
/// Rows equal in every objective are mutually non-dominated.
///
/// # Example
///
/// ```
/// use u_evoselect::pareto::{dominance_cmp, Dominance};
///
/// assert_eq!(dominance_cmp(&[0.9, 0.9], &[0.8, 0.8]), Dominance::Left);
/// assert_eq!(dominance_cmp(&[0.9, 0.1], &[0.1, 0.9]), Dominance::Neither);
/// assert_eq!(dominance_cmp(&[0.5, 0.5], &[0.5, 0.5]), Dominance::Neither);
/// ```
pub fn dominance_cmp(a: &[f64], b: &[f64]) -> Dominance {
    let mut a_better_in_some = false;
    let mut b_better_in_some = false;

    for (&va, &vb) in a.iter().zip(b.iter()) {
        if va > vb {
            a_better_in_some = true;
        } else if vb > va {
            b_better_in_some = true;
        }
    }

    match (a_better_in_some, b_better_in_some) {
        (true, false) => Dominance::Left,
        (false, true) => Dominance::Right,
        _ => Dominance::Neither,
    }
}

/// Returns true if `a` Pareto-dominates `b`.
///
/// The objective set is taken from `a`; `b` must carry all of it.
pub fn dominates(a: &Candidate, b: &Candidate) -> SelectionResult<bool> {
    let names: Vec<String> = a.require_normalized()?.keys().cloned().collect();
    let left = objective_row(a, &names)?;
    let right = objective_row(b, &names)?;
    Ok(dominance_cmp(&left, &right) == Dominance::Left)
}

/// One candidate's values over `names`, each present and finite.
fn objective_row(c: &Candidate, names: &[String]) -> SelectionResult<Vec<f64>> {
    let values = c.require_normalized()?;
    names
        .iter()
        .map(|name| match values.get(name) {
            None => Err(SelectionError::MissingObjective {
                id: c.id.clone(),
                objective: name.clone(),
            }),
            Some(v) if !v.is_finite() => Err(SelectionError::InvalidObjective {
                id: c.id.clone(),
                objective: name.clone(),
            }),
            Some(&v) => Ok(v),
        })
        .collect()
}

/// Candidates' normalized objectives laid out as rows over a common,
/// name-sorted objective set.
///
/// Building the matrix is where missing objectives are reported: a
/// candidate without normalized objectives, or without a value for one of
/// the set's objectives, is an error naming that candidate. Nothing is
/// defaulted to zero. NaN and infinite values are rejected, as are repeated
/// candidate ids.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectiveMatrix {
    names: Vec<String>,
    rows: Vec<Vec<f64>>,
}

impl ObjectiveMatrix {
    /// Uses the first candidate's objectives as the common set.
    ///
    /// Objectives that only later candidates carry are ignored.
    pub fn from_candidates(candidates: &[Candidate]) -> SelectionResult<Self> {
        let names = match candidates.first() {
            Some(first) => first.require_normalized()?.keys().cloned().collect(),
            None => Vec::new(),
        };
        Self::with_objectives(candidates, names)
    }

    /// Uses an explicit objective set.
    pub fn with_objectives(candidates: &[Candidate], names: Vec<String>) -> SelectionResult<Self> {
        require_unique_ids(candidates)?;
        let rows = candidates
            .iter()
            .map(|c| objective_row(c, &names))
            .collect::<SelectionResult<Vec<_>>>()?;
        Ok(Self { names, rows })
    }

    /// Objective names, one per column.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Objective values of the candidate at `index`.
    pub fn row(&self, index: usize) -> &[f64] {
        &self.rows[index]
    }

    /// All rows, in candidate order.
    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    /// Values of one objective across all candidates.
    pub fn column(&self, objective: usize) -> Vec<f64> {
        self.rows.iter().map(|r| r[objective]).collect()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn num_objectives(&self) -> usize {
        self.names.len()
    }
}
