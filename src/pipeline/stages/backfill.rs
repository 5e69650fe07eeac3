//! Rewrite stage deriving missing check outputs from scores.

use super::score::{usable_score, ScoreThresholds, UnknownChecks};
use crate::core::{AnalysisRecord, CheckOutput, OK_STATUS};
use crate::pipeline::stage::{RewriteStage, Stage};
use crate::warnings::WarningSink;

/// Status written for checks whose score falls below the threshold.
pub const LOW_SCORE_STATUS: &str = "Low password score";

/// Output a check should get from its score, or `None` when the check already
/// has an output.
///
/// The threshold is compared against the [usable score](usable_score); the
/// written output keeps the score as recorded.
pub fn backfilled_output(
    record: &AnalysisRecord,
    check: &str,
    score: Option<f64>,
    threshold: f64,
) -> Option<CheckOutput> {
    if record.has_output(check) {
        return None;
    }

    let status = match usable_score(score) {
        Some(usable) if usable < threshold => LOW_SCORE_STATUS,
        _ => OK_STATUS,
    };
    Some(CheckOutput::scored(status, score))
}

/// Fills in outputs for checks that have a score but no output.
///
/// Records are never dropped; the stage is usually placed first so later
/// stages can filter on the filled-in statuses. Unknown checks are reported
/// and pruned exactly as in the score selection stages.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChangePclOutputByScore {
    thresholds: ScoreThresholds,
}

impl ChangePclOutputByScore {
    pub fn new(thresholds: ScoreThresholds) -> Self {
        Self { thresholds }
    }

    /// Current configuration, after any pruning.
    pub fn thresholds(&self) -> &ScoreThresholds {
        &self.thresholds
    }
}

impl Stage for ChangePclOutputByScore {
    fn name(&self) -> &'static str {
        "ChangePclOutputByScore"
    }
}

impl RewriteStage for ChangePclOutputByScore {
    fn rewrite(&mut self, records: &mut [AnalysisRecord], sink: &dyn WarningSink) {
        let name = self.name();
        let mut unknown = UnknownChecks::default();

        for record in records.iter_mut() {
            for entry in self.thresholds.iter() {
                match record.check_score(&entry.check) {
                    Ok(score) => {
                        if let Some(output) =
                            backfilled_output(record, &entry.check, score, entry.threshold)
                        {
                            record.set_output(entry.check.clone(), output);
                        }
                    }
                    Err(err) => unknown.report(name, &err, &entry.check, sink),
                }
            }

            unknown.prune(name, &mut self.thresholds);
        }
    }
}
