//! Crowding-distance value type.

use std::cmp::Ordering;
use std::fmt;

/// Crowding distance of a candidate within its Pareto front.
///
/// Boundary solutions (the min or max of some objective in their front)
/// are tagged [`CrowdingDistance::Boundary`] instead of carrying an IEEE
/// infinity. The total order places `Boundary` above every finite value,
/// so a descending sort always puts boundary solutions first.
///
/// # Examples
///
/// ```
/// use u_evoselect::population::CrowdingDistance;
///
/// let mut ds = vec![
///     CrowdingDistance::Finite(0.4),
///     CrowdingDistance::Boundary,
///     CrowdingDistance::Finite(1.2),
/// ];
/// ds.sort_by(|a, b| b.cmp(a));
/// assert!(ds[0].is_boundary());
/// assert_eq!(ds[1].finite(), Some(1.2));
/// ```
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CrowdingDistance {
    /// Finite, non-negative density estimate.
    Finite(f64),
    /// Extreme solution of some objective; always preferred.
    Boundary,
}

impl CrowdingDistance {
    /// Converts a raw float, mapping positive infinity to `Boundary`.
    pub fn from_f64(value: f64) -> Self {
        if value == f64::INFINITY {
            CrowdingDistance::Boundary
        } else {
            CrowdingDistance::Finite(value)
        }
    }

    /// Returns true for boundary solutions.
    pub fn is_boundary(&self) -> bool {
        matches!(self, CrowdingDistance::Boundary)
    }

    /// Returns the finite value, or `None` for boundary solutions.
    pub fn finite(&self) -> Option<f64> {
        match self {
            CrowdingDistance::Finite(d) => Some(*d),
            CrowdingDistance::Boundary => None,
        }
    }

    /// Returns the distance as a float (`Boundary` → `f64::INFINITY`).
    pub fn as_f64(&self) -> f64 {
        match self {
            CrowdingDistance::Finite(d) => *d,
            CrowdingDistance::Boundary => f64::INFINITY,
        }
    }
}

impl Default for CrowdingDistance {
    fn default() -> Self {
        CrowdingDistance::Finite(0.0)
    }
}

impl Ord for CrowdingDistance {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (CrowdingDistance::Boundary, CrowdingDistance::Boundary) => Ordering::Equal,
            (CrowdingDistance::Boundary, CrowdingDistance::Finite(_)) => Ordering::Greater,
            (CrowdingDistance::Finite(_), CrowdingDistance::Boundary) => Ordering::Less,
            (CrowdingDistance::Finite(a), CrowdingDistance::Finite(b)) => a.total_cmp(b),
        }
    }
}

impl PartialOrd for CrowdingDistance {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for CrowdingDistance {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for CrowdingDistance {}

impl fmt::Display for CrowdingDistance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CrowdingDistance::Finite(d) => write!(f, "{d:.6}"),
            CrowdingDistance::Boundary => write!(f, "inf"),
        }
    }
}
