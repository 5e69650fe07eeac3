//! Selection by transformation effect.

use crate::core::AnalysisRecord;
use crate::pipeline::stage::{SelectStage, Stage};
use crate::warnings::WarningSink;

/// Warning emitted when the stage runs without transformation names.
pub const MISSING_TRANSFORMATIONS_WARNING: &str =
    "Set list of names of transformation as the first argument in constructor.";

/// True when one of the record's transformation descriptors names one of
/// `names` (substring match on the descriptor key) with a non-zero effect.
///
/// Baseline records never match.
pub fn had_effect(record: &AnalysisRecord, names: &[String]) -> bool {
    let Some(rules) = record.transform_rules.as_deref() else {
        return false;
    };

    rules.iter().any(|rule| {
        rule.effects().any(|(transformation, magnitude)| {
            magnitude != 0 && names.iter().any(|name| transformation.contains(name.as_str()))
        })
    })
}

/// Selects transformed records where a named transformation changed the sample.
///
/// The transformation names are required; without them the stage warns and
/// selects nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransformationHadEffect {
    names: Option<Vec<String>>,
}

impl TransformationHadEffect {
    /// An empty list counts as "not configured".
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        Self {
            names: (!names.is_empty()).then_some(names),
        }
    }

    /// Stage with no transformation names; it only ever warns.
    pub fn unconfigured() -> Self {
        Self::default()
    }
}

impl Stage for TransformationHadEffect {
    fn name(&self) -> &'static str {
        "TransformationHadEffect"
    }
}

impl SelectStage for TransformationHadEffect {
    fn select(
        &mut self,
        records: Vec<AnalysisRecord>,
        sink: &dyn WarningSink,
    ) -> Vec<AnalysisRecord> {
        let Some(names) = self.names.as_deref() else {
            sink.print_warning(self.name(), MISSING_TRANSFORMATIONS_WARNING);
            return Vec::new();
        };

        records
            .into_iter()
            .filter(|record| had_effect(record, names))
            .collect()
    }
}
