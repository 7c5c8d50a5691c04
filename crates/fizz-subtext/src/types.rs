//! Core data types for range reports and fragment search.

use serde::{Deserialize, Serialize};

/// A closed, non-negative integer interval with `min <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Range {
    pub min: u64,
    pub max: u64,
}

impl Range {
    /// Build a range from raw bounds, clamping negatives to 0 and ordering the pair.
    pub fn new(lower: i64, upper: i64) -> Self {
        let lower = lower.max(0) as u64;
        let upper = upper.max(0) as u64;

        Self {
            min: lower.min(upper),
            max: lower.max(upper),
        }
    }

    /// Number of integers covered, saturating at `u64::MAX`.
    pub fn width(&self) -> u64 {
        (self.max - self.min).saturating_add(1)
    }

    /// Iterate every integer from `min` to `max`, both ends included.
    pub fn iter(&self) -> std::ops::RangeInclusive<u64> {
        self.min..=self.max
    }
}

/// Divisor → label associations, iterated in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DivisorMapping {
    entries: Vec<(i64, String)>,
}

impl DivisorMapping {
    /// Create an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a label. An existing divisor keeps its position and takes the new label.
    pub fn insert(&mut self, divisor: i64, label: impl Into<String>) {
        let label = label.into();
        match self.entries.iter_mut().find(|(d, _)| *d == divisor) {
            Some(entry) => entry.1 = label,
            None => self.entries.push((divisor, label)),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(divisor, label)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (i64, &str)> {
        self.entries.iter().map(|(d, label)| (*d, label.as_str()))
    }

    /// Concatenate, in order, every label whose divisor evenly divides `n`.
    ///
    /// A divisor of zero never matches.
    pub fn labels_for(&self, n: u64) -> String {
        let n = n as i128;
        self.entries
            .iter()
            .filter(|(d, _)| n.checked_rem(i128::from(*d)) == Some(0))
            .map(|(_, label)| label.as_str())
            .collect()
    }
}

impl<S: Into<String>> FromIterator<(i64, S)> for DivisorMapping {
    fn from_iter<I: IntoIterator<Item = (i64, S)>>(iter: I) -> Self {
        let mut mapping = Self::new();
        for (divisor, label) in iter {
            mapping.insert(divisor, label);
        }
        mapping
    }
}

/// One fragment and the formatted positions where it occurs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FragmentMatch {
    /// The fragment exactly as supplied (original case).
    pub subtext: String,
    /// Comma-space-joined 1-based offsets, or the no-match marker.
    pub result: String,
}

/// The payload forwarded to the submission endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultEnvelope {
    pub candidate: String,
    pub text: String,
    pub results: Vec<FragmentMatch>,
}

impl ResultEnvelope {
    pub fn new(candidate: impl Into<String>, text: impl Into<String>, results: Vec<FragmentMatch>) -> Self {
        Self {
            candidate: candidate.into(),
            text: text.into(),
            results,
        }
    }
}

/// Errors raised while validating or transforming upstream payloads.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum TransformError {
    #[error("Invalid JSON: {0}")]
    InvalidJson(String),
}

/// Convenience result type.
pub type TransformResult<T> = Result<T, TransformError>;
