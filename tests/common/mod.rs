// Test utility module for pclfilter integration tests
#![allow(dead_code)]

use pclfilter::pipeline::stages::{
    ChangePclOutputByScore, HigherScoreThan, LowEntropyChange, LowerScoreThan,
    PclOutputChangedFromNotOkToOk, PclOutputChangedFromOkToNotOk, PclOutputIsNotOk,
    PclOutputIsOk, PclOutputsAreNotAllSame, TransformationHadEffect,
};
use pclfilter::{AnalysisRecord, FilterStage, TransformRule};

/// Baseline record with the given check statuses.
pub fn baseline(sample: &str, outputs: &[(&str, &str)]) -> AnalysisRecord {
    outputs
        .iter()
        .fold(AnalysisRecord::new(sample), |r, (check, status)| {
            r.with_output(*check, *status)
        })
}

/// Transformed record derived from `base` with the given statuses and rules.
pub fn transformed(
    sample: &str,
    base: AnalysisRecord,
    outputs: &[(&str, &str)],
    rules: Vec<TransformRule>,
) -> AnalysisRecord {
    baseline(sample, outputs).transformed_from(base, rules)
}

/// One configured instance of every stage.
pub fn every_stage() -> Vec<FilterStage> {
    vec![
        LowEntropyChange::new(1.0).into(),
        PclOutputChangedFromOkToNotOk::default().into(),
        PclOutputChangedFromNotOkToOk::default().into(),
        PclOutputsAreNotAllSame.into(),
        TransformationHadEffect::new(["Leet"]).into(),
        PclOutputIsOk::default().into(),
        PclOutputIsNotOk::default().into(),
        HigherScoreThan::new([("a", 50.0)].into_iter().collect()).into(),
        LowerScoreThan::new([("a", 50.0)].into_iter().collect()).into(),
        ChangePclOutputByScore::new([("a", 50.0)].into_iter().collect()).into(),
    ]
}

pub fn samples(records: &[AnalysisRecord]) -> Vec<&str> {
    records.iter().map(|r| r.sample.as_str()).collect()
}
