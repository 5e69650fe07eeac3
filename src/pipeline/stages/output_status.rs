//! Selection by the status of a record's own checks.
//!
//! Unlike the transition stages, the default check set here is taken once
//! from the first record of the pass and applied to every record.

use super::CheckSet;
use crate::core::{AnalysisRecord, OK_STATUS};
use crate::pipeline::stage::{SelectStage, Stage};
use crate::warnings::WarningSink;

/// True when at least one of `checks` reports OK.
pub fn any_ok(record: &AnalysisRecord, checks: &[String]) -> bool {
    checks.iter().any(|check| record.status(check) == OK_STATUS)
}

/// True when at least one of `checks` reports something other than OK.
pub fn any_not_ok(record: &AnalysisRecord, checks: &[String]) -> bool {
    checks.iter().any(|check| record.status(check) != OK_STATUS)
}

/// True when `checks` report a mix of OK and not-OK statuses.
///
/// An empty check set is neither mixed nor uniform and never matches.
pub fn is_mixed(record: &AnalysisRecord, checks: &[String]) -> bool {
    let ok = checks
        .iter()
        .filter(|check| record.status(check) == OK_STATUS)
        .count();
    ok != checks.len() && ok != 0
}

fn select_with<F>(records: Vec<AnalysisRecord>, checks: &CheckSet, predicate: F) -> Vec<AnalysisRecord>
where
    F: Fn(&AnalysisRecord, &[String]) -> bool,
{
    let Some(first) = records.first() else {
        return records;
    };
    let checks = checks.resolve(first).into_owned();

    records
        .into_iter()
        .filter(|record| predicate(record, checks.as_slice()))
        .collect()
}

/// Selects records where any inspected check is OK.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PclOutputIsOk {
    checks: CheckSet,
}

impl PclOutputIsOk {
    pub fn new(checks: impl Into<CheckSet>) -> Self {
        Self {
            checks: checks.into(),
        }
    }
}

impl Stage for PclOutputIsOk {
    fn name(&self) -> &'static str {
        "PclOutputIsOk"
    }
}

impl SelectStage for PclOutputIsOk {
    fn select(
        &mut self,
        records: Vec<AnalysisRecord>,
        _sink: &dyn WarningSink,
    ) -> Vec<AnalysisRecord> {
        select_with(records, &self.checks, any_ok)
    }
}

/// Selects records where any inspected check is not OK.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PclOutputIsNotOk {
    checks: CheckSet,
}

impl PclOutputIsNotOk {
    pub fn new(checks: impl Into<CheckSet>) -> Self {
        Self {
            checks: checks.into(),
        }
    }
}

impl Stage for PclOutputIsNotOk {
    fn name(&self) -> &'static str {
        "PclOutputIsNotOk"
    }
}

impl SelectStage for PclOutputIsNotOk {
    fn select(
        &mut self,
        records: Vec<AnalysisRecord>,
        _sink: &dyn WarningSink,
    ) -> Vec<AnalysisRecord> {
        select_with(records, &self.checks, any_not_ok)
    }
}

/// Selects records whose checks disagree: some OK, some not.
///
/// The check set always comes from the first record of the pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PclOutputsAreNotAllSame;

impl Stage for PclOutputsAreNotAllSame {
    fn name(&self) -> &'static str {
        "PclOutputsAreNotAllSame"
    }
}

impl SelectStage for PclOutputsAreNotAllSame {
    fn select(
        &mut self,
        records: Vec<AnalysisRecord>,
        _sink: &dyn WarningSink,
    ) -> Vec<AnalysisRecord> {
        select_with(records, &CheckSet::Default, is_mixed)
    }
}
