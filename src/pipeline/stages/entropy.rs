//! Entropy-based selection.

use crate::core::AnalysisRecord;
use crate::pipeline::stage::{SelectStage, Stage};
use crate::warnings::WarningSink;

/// True when `record` has a baseline and its entropy change is at most
/// `threshold` (inclusive).
pub fn has_low_entropy_change(record: &AnalysisRecord, threshold: f64) -> bool {
    record
        .entropy_change()
        .is_some_and(|change| change <= threshold)
}

/// Selects transformed records whose entropy change is at most the threshold.
///
/// Records without a baseline are dropped silently.
#[derive(Debug, Clone, PartialEq)]
pub struct LowEntropyChange {
    threshold: f64,
}

impl LowEntropyChange {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }
}

impl Stage for LowEntropyChange {
    fn name(&self) -> &'static str {
        "LowEntropyChange"
    }
}

impl SelectStage for LowEntropyChange {
    fn select(
        &mut self,
        records: Vec<AnalysisRecord>,
        _sink: &dyn WarningSink,
    ) -> Vec<AnalysisRecord> {
        records
            .into_iter()
            .filter(|record| has_low_entropy_change(record, self.threshold))
            .collect()
    }
}
