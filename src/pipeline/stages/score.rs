//! Score-threshold selection and the unknown-check pruning policy.
//!
//! Score stages are configured with an ordered list of `(check, threshold)`
//! pairs. When a record knows nothing about one of the checks, the stage warns
//! once per check per call and then removes the pair from its own
//! configuration. The removal is permanent for the stage instance: later
//! records in the same call and later calls no longer consult that check,
//! even when those records would know it.

use crate::core::AnalysisRecord;
use crate::pipeline::stage::{SelectStage, Stage};
use crate::warnings::WarningSink;
use serde::{Deserialize, Serialize};

/// Threshold for one check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreThreshold {
    pub check: String,
    pub threshold: f64,
}

impl ScoreThreshold {
    pub fn new(check: impl Into<String>, threshold: f64) -> Self {
        Self {
            check: check.into(),
            threshold,
        }
    }
}

/// Ordered `(check, threshold)` pairs; iteration follows insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScoreThresholds(Vec<ScoreThreshold>);

impl ScoreThresholds {
    pub fn new(entries: Vec<ScoreThreshold>) -> Self {
        Self(entries)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScoreThreshold> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Checks still configured, in order.
    pub fn checks(&self) -> Vec<&str> {
        self.0.iter().map(|entry| entry.check.as_str()).collect()
    }

    pub fn contains(&self, check: &str) -> bool {
        self.0.iter().any(|entry| entry.check == check)
    }

    fn remove(&mut self, check: &str) {
        self.0.retain(|entry| entry.check != check);
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for ScoreThresholds {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(check, threshold)| ScoreThreshold::new(check, threshold))
                .collect(),
        )
    }
}

/// Unknown checks seen during one call of a score stage.
#[derive(Debug, Default)]
pub(crate) struct UnknownChecks {
    seen: Vec<String>,
}

impl UnknownChecks {
    /// Warn about `check` unless it was already reported during this call.
    pub(crate) fn report(
        &mut self,
        source: &str,
        error: &crate::core::Error,
        check: &str,
        sink: &dyn WarningSink,
    ) {
        if self.seen.iter().any(|seen| seen == check) {
            return;
        }
        sink.print_warning(source, &error.to_string());
        self.seen.push(check.to_string());
    }

    /// Drop every reported check from `thresholds`.
    pub(crate) fn prune(&self, source: &str, thresholds: &mut ScoreThresholds) {
        for check in &self.seen {
            if thresholds.contains(check) {
                log::debug!("{}: no longer checking unknown key '{}'", source, check);
                thresholds.remove(check);
            }
        }
    }
}

/// Score value a threshold is compared against.
///
/// A missing score and a score of exactly zero both count as absent. Present
/// scores are truncated toward zero before comparison.
pub fn usable_score(score: Option<f64>) -> Option<f64> {
    score.filter(|score| *score != 0.0).map(f64::trunc)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    /// `score >= threshold`
    AtLeast,
    /// `score < threshold`
    Below,
}

impl Comparison {
    pub fn holds(self, score: f64, threshold: f64) -> bool {
        match self {
            Self::AtLeast => score >= threshold,
            Self::Below => score < threshold,
        }
    }
}

/// Keep records where some configured check has a score satisfying
/// `comparison`, pruning unknown checks from `thresholds` as it goes.
///
/// Pairs are tried in order and the first satisfied pair decides; checks
/// without a [usable score](usable_score) are skipped. Pruning happens after
/// each record.
pub fn select_by_score(
    source: &str,
    thresholds: &mut ScoreThresholds,
    comparison: Comparison,
    records: Vec<AnalysisRecord>,
    sink: &dyn WarningSink,
) -> Vec<AnalysisRecord> {
    let mut unknown = UnknownChecks::default();
    let mut selected = Vec::new();

    for record in records {
        let mut matched = false;
        for entry in thresholds.iter() {
            match record.check_score(&entry.check).map(usable_score) {
                Ok(Some(score)) if comparison.holds(score, entry.threshold) => {
                    matched = true;
                    break;
                }
                Ok(_) => {}
                Err(err) => unknown.report(source, &err, &entry.check, sink),
            }
        }

        unknown.prune(source, thresholds);
        if matched {
            selected.push(record);
        }
    }

    selected
}

/// Selects records with a score at or above a configured threshold.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HigherScoreThan {
    thresholds: ScoreThresholds,
}

impl HigherScoreThan {
    pub fn new(thresholds: ScoreThresholds) -> Self {
        Self { thresholds }
    }

    /// Current configuration, after any pruning.
    pub fn thresholds(&self) -> &ScoreThresholds {
        &self.thresholds
    }
}

impl Stage for HigherScoreThan {
    fn name(&self) -> &'static str {
        "HigherScoreThan"
    }
}

impl SelectStage for HigherScoreThan {
    fn select(
        &mut self,
        records: Vec<AnalysisRecord>,
        sink: &dyn WarningSink,
    ) -> Vec<AnalysisRecord> {
        let name = self.name();
        select_by_score(name, &mut self.thresholds, Comparison::AtLeast, records, sink)
    }
}

/// Selects records with a score strictly below a configured threshold.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LowerScoreThan {
    thresholds: ScoreThresholds,
}

impl LowerScoreThan {
    pub fn new(thresholds: ScoreThresholds) -> Self {
        Self { thresholds }
    }

    /// Current configuration, after any pruning.
    pub fn thresholds(&self) -> &ScoreThresholds {
        &self.thresholds
    }
}

impl Stage for LowerScoreThan {
    fn name(&self) -> &'static str {
        "LowerScoreThan"
    }
}

impl SelectStage for LowerScoreThan {
    fn select(
        &mut self,
        records: Vec<AnalysisRecord>,
        sink: &dyn WarningSink,
    ) -> Vec<AnalysisRecord> {
        let name = self.name();
        select_by_score(name, &mut self.thresholds, Comparison::Below, records, sink)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::warnings::RecordingWarningSink;

    fn scored(sample: &str, scores: &[(&str, Option<f64>)]) -> AnalysisRecord {
        scores
            .iter()
            .fold(AnalysisRecord::new(sample), |r, (k, v)| r.with_score(*k, *v))
    }

    fn samples(records: &[AnalysisRecord]) -> Vec<&str> {
        records.iter().map(|r| r.sample.as_str()).collect()
    }

    #[test]
    fn test_higher_score_is_inclusive() {
        let sink = RecordingWarningSink::new();
        let mut stage = HigherScoreThan::new([("a", 50.0)].into_iter().collect());
        let records = vec![
            scored("fifty", &[("a", Some(50.0))]),
            scored("forty_nine", &[("a", Some(49.0))]),
        ];

        let result = stage.select(records, &sink);

        assert_eq!(samples(&result), vec!["fifty"]);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_lower_score_is_strict() {
        let mut stage = LowerScoreThan::new([("a", 50.0)].into_iter().collect());
        let records = vec![
            scored("fifty", &[("a", Some(50.0))]),
            scored("forty_nine", &[("a", Some(49.0))]),
        ];

        let result = stage.select(records, &RecordingWarningSink::new());

        assert_eq!(samples(&result), vec!["forty_nine"]);
    }

    #[test]
    fn test_missing_score_is_skipped() {
        let mut stage = HigherScoreThan::new([("a", 0.0), ("b", 1.0)].into_iter().collect());
        let records = vec![scored("x", &[("a", None), ("b", Some(2.0))])];

        let result = stage.select(records, &RecordingWarningSink::new());

        assert_eq!(samples(&result), vec!["x"]);
    }

    #[test]
    fn test_unknown_check_warns_once_and_prunes() {
        let sink = RecordingWarningSink::new();
        let mut stage = HigherScoreThan::new([("a", 50.0), ("b", 10.0)].into_iter().collect());
        let records = vec![
            scored("no_a", &[("b", Some(20.0))]),
            scored("also_no_a", &[("b", Some(5.0))]),
            // Knows "a" but the check was already pruned
            scored("has_a", &[("a", Some(90.0)), ("b", Some(1.0))]),
        ];

        let result = stage.select(records, &sink);

        assert_eq!(samples(&result), vec!["no_a"]);
        assert_eq!(sink.messages(), vec!["Key 'a' does not exist."]);
        assert_eq!(sink.warnings()[0].source, "HigherScoreThan");
        assert_eq!(stage.thresholds().checks(), vec!["b"]);
    }

    #[test]
    fn test_pruning_persists_across_calls() {
        let sink = RecordingWarningSink::new();
        let mut stage = LowerScoreThan::new([("a", 50.0)].into_iter().collect());

        stage.select(vec![scored("unknown", &[])], &sink);
        let second = stage.select(vec![scored("low", &[("a", Some(1.0))])], &sink);

        assert!(second.is_empty());
        assert!(stage.thresholds().is_empty());
        assert_eq!(sink.len(), 1);
    }

    #[test]
    fn test_first_satisfied_pair_decides() {
        let sink = RecordingWarningSink::new();
        // "b" is unknown but never consulted because "a" matches first
        let mut stage = HigherScoreThan::new([("a", 1.0), ("b", 1.0)].into_iter().collect());

        let result = stage.select(vec![scored("x", &[("a", Some(5.0))])], &sink);

        assert_eq!(result.len(), 1);
        assert!(sink.is_empty());
        assert_eq!(stage.thresholds().len(), 2);
    }

    #[test]
    fn test_usable_score_drops_zero_and_truncates() {
        assert_eq!(usable_score(None), None);
        assert_eq!(usable_score(Some(0.0)), None);
        assert_eq!(usable_score(Some(49.7)), Some(49.0));
        assert_eq!(usable_score(Some(0.4)), Some(0.0));
        assert_eq!(usable_score(Some(-2.5)), Some(-2.0));
    }

    #[test]
    fn test_zero_score_is_never_selected() {
        let sink = RecordingWarningSink::new();
        let mut lower = LowerScoreThan::new([("a", 50.0)].into_iter().collect());
        let mut higher = HigherScoreThan::new([("a", -1.0)].into_iter().collect());

        let below = lower.select(vec![scored("zero", &[("a", Some(0.0))])], &sink);
        let above = higher.select(vec![scored("zero", &[("a", Some(0.0))])], &sink);

        assert!(below.is_empty());
        assert!(above.is_empty());
        assert!(sink.is_empty());
    }

    #[test]
    fn test_fractional_score_is_truncated() {
        let sink = RecordingWarningSink::new();
        let mut higher = HigherScoreThan::new([("a", 49.5)].into_iter().collect());
        let mut lower = LowerScoreThan::new([("a", 49.5)].into_iter().collect());
        let records = vec![scored("almost", &[("a", Some(49.7))])];

        assert!(higher.select(records.clone(), &sink).is_empty());
        assert_eq!(samples(&lower.select(records, &sink)), vec!["almost"]);
    }

    #[test]
    fn test_threshold_order_is_preserved() {
        let thresholds: ScoreThresholds = [("z", 1.0), ("a", 2.0), ("m", 3.0)].into_iter().collect();
        assert_eq!(thresholds.checks(), vec!["z", "a", "m"]);
    }
}
