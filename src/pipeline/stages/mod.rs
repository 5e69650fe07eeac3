//! Concrete filter stages.
//!
//! Each module holds one family of rules. The selection logic itself lives in
//! small pure functions next to the stage types, so it can be tested without
//! going through a pipeline:
//! - `entropy`: entropy delta against the baseline
//! - `output_change`: status transitions between baseline and transformed record
//! - `output_status`: status of the record's own checks
//! - `transformation`: which transformations actually changed the sample
//! - `score`: score thresholds, including the unknown-check pruning policy
//! - `backfill`: the rewrite stage deriving outputs from scores

pub mod backfill;
pub mod entropy;
pub mod output_change;
pub mod output_status;
pub mod score;
pub mod transformation;

pub use backfill::ChangePclOutputByScore;
pub use entropy::LowEntropyChange;
pub use output_change::{PclOutputChangedFromNotOkToOk, PclOutputChangedFromOkToNotOk};
pub use output_status::{PclOutputIsNotOk, PclOutputIsOk, PclOutputsAreNotAllSame};
pub use score::{usable_score, HigherScoreThan, LowerScoreThan, ScoreThreshold, ScoreThresholds};
pub use transformation::TransformationHadEffect;

use crate::core::AnalysisRecord;
use crate::pipeline::stage::FilterStage;
use std::borrow::Cow;

macro_rules! into_filter_stage {
    ($kind:ident => $($stage:ty),+ $(,)?) => {
        $(
            impl From<$stage> for FilterStage {
                fn from(stage: $stage) -> Self {
                    FilterStage::$kind(Box::new(stage))
                }
            }
        )+
    };
}

into_filter_stage!(Select =>
    LowEntropyChange,
    PclOutputChangedFromOkToNotOk,
    PclOutputChangedFromNotOkToOk,
    PclOutputsAreNotAllSame,
    TransformationHadEffect,
    PclOutputIsOk,
    PclOutputIsNotOk,
    HigherScoreThan,
    LowerScoreThan,
);
into_filter_stage!(Rewrite => ChangePclOutputByScore);

/// Check names a status stage inspects.
///
/// `Default` defers to the check names found on a record; which record that
/// is depends on the stage (the record itself, or the first record of the
/// pass).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CheckSet {
    #[default]
    Default,
    Named(Vec<String>),
}

impl CheckSet {
    /// An empty list counts as "not configured".
    pub fn named<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        if names.is_empty() {
            Self::Default
        } else {
            Self::Named(names)
        }
    }

    /// Configured names, or every check with an output on `fallback`.
    pub fn resolve<'a>(&'a self, fallback: &AnalysisRecord) -> Cow<'a, [String]> {
        match self {
            Self::Named(names) => Cow::Borrowed(names.as_slice()),
            Self::Default => Cow::Owned(fallback.check_names()),
        }
    }
}

impl From<Option<Vec<String>>> for CheckSet {
    fn from(names: Option<Vec<String>>) -> Self {
        names.map(Self::named).unwrap_or_default()
    }
}
