//! Analysis records: the results of running password checks against one sample.
//!
//! A record either describes an untouched sample (a *baseline* record) or a
//! sample produced by applying one or more transformations to a baseline
//! (a *transformed* record). Transformed records carry their transformation
//! descriptors and a copy of the baseline they were derived from.

use super::errors::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Status string a check reports when the sample passed.
pub const OK_STATUS: &str = "OK";

/// Output reported by a single check.
///
/// Serialized either as a bare status string (`"OK"`) or as a
/// `[status, score]` pair (`["Low password score", 10]`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CheckOutput {
    Status(String),
    Scored(String, Option<f64>),
}

impl CheckOutput {
    /// Output with the given status and score.
    pub fn scored(status: impl Into<String>, score: Option<f64>) -> Self {
        Self::Scored(status.into(), score)
    }

    pub fn status(&self) -> &str {
        match self {
            Self::Status(status) | Self::Scored(status, _) => status,
        }
    }

    pub fn score(&self) -> Option<f64> {
        match self {
            Self::Status(_) => None,
            Self::Scored(_, score) => *score,
        }
    }

    /// Exact-string comparison against [`OK_STATUS`].
    pub fn is_ok(&self) -> bool {
        self.status() == OK_STATUS
    }
}

impl From<&str> for CheckOutput {
    fn from(status: &str) -> Self {
        Self::Status(status.to_string())
    }
}

/// One transformation descriptor: transformation name → effect magnitude
/// (for example the number of characters the transformation changed).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransformRule(BTreeMap<String, i64>);

impl TransformRule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_effect(mut self, name: impl Into<String>, magnitude: i64) -> Self {
        self.0.insert(name.into(), magnitude);
        self
    }

    /// Iterate over `(transformation name, magnitude)` entries.
    pub fn effects(&self) -> impl Iterator<Item = (&str, i64)> {
        self.0.iter().map(|(name, magnitude)| (name.as_str(), *magnitude))
    }
}

impl<S: Into<String>> FromIterator<(S, i64)> for TransformRule {
    fn from_iter<I: IntoIterator<Item = (S, i64)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// Check results for one password sample.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    /// The password sample the checks ran against
    pub sample: String,

    /// Entropy estimate of the sample
    #[serde(default)]
    pub entropy: f64,

    /// Pre-transformation record of the same sample
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub baseline: Option<Box<AnalysisRecord>>,

    /// Transformations applied to the baseline; present only on transformed records
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transform_rules: Option<Vec<TransformRule>>,

    /// Check name → reported output
    #[serde(default)]
    pub check_output: BTreeMap<String, CheckOutput>,

    /// Check name → score, `None` when the check recorded no score
    #[serde(default)]
    pub check_scores: BTreeMap<String, Option<f64>>,
}

impl AnalysisRecord {
    /// Create a baseline record for a sample.
    pub fn new(sample: impl Into<String>) -> Self {
        Self {
            sample: sample.into(),
            ..Self::default()
        }
    }

    pub fn with_entropy(mut self, entropy: f64) -> Self {
        self.entropy = entropy;
        self
    }

    pub fn with_output(mut self, check: impl Into<String>, output: impl Into<CheckOutput>) -> Self {
        self.check_output.insert(check.into(), output.into());
        self
    }

    pub fn with_score(mut self, check: impl Into<String>, score: Option<f64>) -> Self {
        self.check_scores.insert(check.into(), score);
        self
    }

    /// Turn this record into a transformed record derived from `baseline`.
    pub fn transformed_from(mut self, baseline: AnalysisRecord, rules: Vec<TransformRule>) -> Self {
        self.baseline = Some(Box::new(baseline));
        self.transform_rules = Some(rules);
        self
    }

    /// True when the record carries transformation descriptors.
    pub fn is_transformed(&self) -> bool {
        self.transform_rules.is_some()
    }

    /// Status reported for `check`, or `""` when the check has no output.
    pub fn status(&self, check: &str) -> &str {
        self.check_output
            .get(check)
            .map(CheckOutput::status)
            .unwrap_or("")
    }

    /// True when `check` has a non-empty status.
    pub fn has_output(&self, check: &str) -> bool {
        !self.status(check).is_empty()
    }

    pub fn set_output(&mut self, check: impl Into<String>, output: CheckOutput) {
        self.check_output.insert(check.into(), output);
    }

    /// Names of every check with an output, in key order.
    pub fn check_names(&self) -> Vec<String> {
        self.check_output.keys().cloned().collect()
    }

    /// Score recorded for `check`.
    ///
    /// Returns `Ok(None)` when the check ran without recording a score and
    /// [`Error::UnknownCheck`] when the record knows nothing about the check.
    pub fn check_score(&self, check: &str) -> Result<Option<f64>> {
        self.check_scores
            .get(check)
            .copied()
            .ok_or_else(|| Error::unknown_check(check))
    }

    /// Entropy gained (positive) or lost (negative) relative to the baseline.
    pub fn entropy_change(&self) -> Option<f64> {
        self.baseline
            .as_ref()
            .map(|baseline| self.entropy - baseline.entropy)
    }
}
