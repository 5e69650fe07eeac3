//! Selection by status transitions between a baseline and its transformation.

use super::CheckSet;
use crate::core::{AnalysisRecord, OK_STATUS};
use crate::pipeline::stage::{SelectStage, Stage};
use crate::warnings::WarningSink;

/// Direction of a status change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    OkToNotOk,
    NotOkToOk,
}

impl Transition {
    pub fn matches(self, before: &str, after: &str) -> bool {
        match self {
            Self::OkToNotOk => before == OK_STATUS && after != OK_STATUS,
            Self::NotOkToOk => before != OK_STATUS && after == OK_STATUS,
        }
    }
}

/// True when any inspected check of a transformed record went through
/// `transition` relative to its baseline.
///
/// Without configured names the record's own check names are inspected.
/// Baseline records and transformed records missing their baseline never match.
pub fn has_transition(record: &AnalysisRecord, checks: &CheckSet, transition: Transition) -> bool {
    if !record.is_transformed() {
        return false;
    }
    let Some(baseline) = record.baseline.as_deref() else {
        return false;
    };

    checks
        .resolve(record)
        .iter()
        .any(|check| transition.matches(baseline.status(check), record.status(check)))
}

/// Selects transformed records where some check went from OK to not OK.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PclOutputChangedFromOkToNotOk {
    checks: CheckSet,
}

impl PclOutputChangedFromOkToNotOk {
    pub fn new(checks: impl Into<CheckSet>) -> Self {
        Self {
            checks: checks.into(),
        }
    }
}

impl Stage for PclOutputChangedFromOkToNotOk {
    fn name(&self) -> &'static str {
        "PclOutputChangedFromOkToNotOk"
    }
}

impl SelectStage for PclOutputChangedFromOkToNotOk {
    fn select(
        &mut self,
        records: Vec<AnalysisRecord>,
        _sink: &dyn WarningSink,
    ) -> Vec<AnalysisRecord> {
        records
            .into_iter()
            .filter(|record| has_transition(record, &self.checks, Transition::OkToNotOk))
            .collect()
    }
}

/// Selects transformed records where some check went from not OK to OK.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PclOutputChangedFromNotOkToOk {
    checks: CheckSet,
}

impl PclOutputChangedFromNotOkToOk {
    pub fn new(checks: impl Into<CheckSet>) -> Self {
        Self {
            checks: checks.into(),
        }
    }
}

impl Stage for PclOutputChangedFromNotOkToOk {
    fn name(&self) -> &'static str {
        "PclOutputChangedFromNotOkToOk"
    }
}

impl SelectStage for PclOutputChangedFromNotOkToOk {
    fn select(
        &mut self,
        records: Vec<AnalysisRecord>,
        _sink: &dyn WarningSink,
    ) -> Vec<AnalysisRecord> {
        records
            .into_iter()
            .filter(|record| has_transition(record, &self.checks, Transition::NotOkToOk))
            .collect()
    }
}
