//! Tally of entities skipped during a conversion.

use std::collections::BTreeMap;
use std::fmt;

/// Why an entity was left out of the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SkipReason {
    UnknownProductType,
    MalformedProductId,
    EmptyId,
    DuplicateId,
    /// The product is kept, only its name is not indexed.
    DuplicateName,
    UnknownMaintenanceUnit,
    UnknownIngredient,
    NoOutputs,
    SuffixExhausted,
}

impl SkipReason {
    pub fn label(self) -> &'static str {
        match self {
            SkipReason::UnknownProductType => "unknown product type",
            SkipReason::MalformedProductId => "malformed product id",
            SkipReason::EmptyId => "empty id",
            SkipReason::DuplicateId => "duplicate id",
            SkipReason::DuplicateName => "duplicate name",
            SkipReason::UnknownMaintenanceUnit => "unknown maintenance unit",
            SkipReason::UnknownIngredient => "unknown ingredient",
            SkipReason::NoOutputs => "no outputs",
            SkipReason::SuffixExhausted => "recipe suffix exhausted",
        }
    }
}

/// Per-reason skip counters, threaded through the catalog and extractor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkipReport {
    counts: BTreeMap<SkipReason, usize>,
}

impl SkipReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, reason: SkipReason) {
        *self.counts.entry(reason).or_insert(0) += 1;
    }

    pub fn count(&self, reason: SkipReason) -> usize {
        self.counts.get(&reason).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

impl fmt::Display for SkipReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.counts.is_empty() {
            return write!(f, "nothing skipped");
        }
        let parts: Vec<String> = self
            .counts
            .iter()
            .map(|(reason, n)| format!("{}: {n}", reason.label()))
            .collect();
        write!(f, "{}", parts.join(", "))
    }
}
