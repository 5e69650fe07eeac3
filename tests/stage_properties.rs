//! Property-based tests for filter stages
//!
//! These tests verify invariants that should hold for all inputs:
//! - Select stages return a subsequence of their input
//! - Select stages are fixed points on their own output
//! - The rewrite stage never changes the number of records
//! - The rewrite stage never overwrites an existing output

use pclfilter::pipeline::stages::{
    ChangePclOutputByScore, HigherScoreThan, LowEntropyChange, LowerScoreThan,
    PclOutputChangedFromOkToNotOk, PclOutputIsNotOk, PclOutputsAreNotAllSame,
    TransformationHadEffect,
};
use pclfilter::warnings::SilentWarningSink;
use pclfilter::{AnalysisRecord, FilterStage, TransformRule};
use proptest::prelude::*;

const CHECKS: &[&str] = &["zxcvbn", "cracklib", "passwdqc"];

fn status() -> impl Strategy<Value = Option<&'static str>> {
    prop_oneof![Just(None), Just(Some("OK")), Just(Some("FAIL"))]
}

fn score() -> impl Strategy<Value = Option<Option<f64>>> {
    prop_oneof![
        Just(None),
        Just(Some(None)),
        (0.0f64..100.0).prop_map(|s| Some(Some(s))),
    ]
}

/// Record with a random subset of checks, outputs and scores
fn plain_record() -> impl Strategy<Value = AnalysisRecord> {
    (
        "[a-z]{1,8}",
        0.0f64..40.0,
        prop::collection::vec((status(), score()), CHECKS.len()),
    )
        .prop_map(|(sample, entropy, checks)| {
            checks.into_iter().zip(CHECKS).fold(
                AnalysisRecord::new(sample).with_entropy(entropy),
                |record, ((status, score), check)| {
                    let record = match status {
                        Some(status) => record.with_output(*check, status),
                        None => record,
                    };
                    match score {
                        Some(score) => record.with_score(*check, score),
                        None => record,
                    }
                },
            )
        })
}

fn record() -> impl Strategy<Value = AnalysisRecord> {
    (plain_record(), prop::option::of((plain_record(), 0i64..3))).prop_map(
        |(record, derived)| match derived {
            Some((base, effect)) => record.transformed_from(
                base,
                vec![TransformRule::new().with_effect("Leet", effect)],
            ),
            None => record,
        },
    )
}

fn select_stages() -> Vec<FilterStage> {
    vec![
        LowEntropyChange::new(2.0).into(),
        PclOutputChangedFromOkToNotOk::default().into(),
        PclOutputsAreNotAllSame.into(),
        TransformationHadEffect::new(["Leet"]).into(),
        PclOutputIsNotOk::new(Some(vec!["zxcvbn".to_string()])).into(),
        HigherScoreThan::new([("zxcvbn", 50.0)].into_iter().collect()).into(),
        LowerScoreThan::new([("cracklib", 50.0)].into_iter().collect()).into(),
    ]
}

fn is_subsequence(sub: &[AnalysisRecord], full: &[AnalysisRecord]) -> bool {
    let mut full = full.iter();
    sub.iter().all(|item| full.any(|candidate| candidate == item))
}

proptest! {
    /// Property: select stages keep a subset of their input in input order
    #[test]
    fn prop_select_returns_subsequence(records in prop::collection::vec(record(), 0..12)) {
        for mut stage in select_stages() {
            let result = stage.apply_checked(records.clone(), &SilentWarningSink);
            prop_assert!(is_subsequence(&result, &records), "{}", stage.name());
        }
    }

    /// Property: stages whose check set does not depend on the first record
    /// return their own output unchanged. A fresh instance runs the second
    /// pass so pruning from the first pass does not carry over.
    #[test]
    fn prop_select_is_idempotent(records in prop::collection::vec(record(), 1..12)) {
        for (mut first, mut second) in select_stages().into_iter().zip(select_stages()) {
            if first.name() == "PclOutputsAreNotAllSame" {
                continue;
            }
            let once = first.apply_checked(records.clone(), &SilentWarningSink);
            if once.is_empty() {
                continue;
            }
            let twice = second.apply_checked(once.clone(), &SilentWarningSink);
            prop_assert_eq!(twice, once, "{}", first.name());
        }
    }

    /// Property: the rewrite stage keeps every record and every existing output
    #[test]
    fn prop_rewrite_preserves_records(records in prop::collection::vec(record(), 1..12)) {
        let mut stage: FilterStage = ChangePclOutputByScore::new(
            [("zxcvbn", 50.0), ("passwdqc", 10.0)].into_iter().collect(),
        )
        .into();

        let result = stage.apply_checked(records.clone(), &SilentWarningSink);

        prop_assert_eq!(result.len(), records.len());
        for (before, after) in records.iter().zip(&result) {
            prop_assert_eq!(&before.sample, &after.sample);
            for (check, output) in &before.check_output {
                if !output.status().is_empty() {
                    prop_assert_eq!(after.check_output.get(check), Some(output));
                }
            }
        }
    }
}
