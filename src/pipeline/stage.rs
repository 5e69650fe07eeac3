//! Filter stage abstractions for composable record pipelines.
//!
//! Every stage is reached through [`FilterStage::apply_checked`], the guarded
//! entry point: empty input is reported to the [`WarningSink`] and short-circuits
//! to an empty result without running the stage's own logic.
//!
//! Stages come in two kinds:
//! - [`SelectStage`]: returns a subset of its input, order preserved
//! - [`RewriteStage`]: rewrites records in place; it receives a slice, so it
//!   cannot add or drop records

use crate::core::AnalysisRecord;
use crate::warnings::WarningSink;

/// Warning emitted by the guarded entry point on empty input.
pub const EMPTY_INPUT_WARNING: &str = "No input data to be filtered";

/// Common identity of every stage.
pub trait Stage {
    /// Stage type name, used as the source tag of warnings.
    fn name(&self) -> &'static str;
}

/// A stage that selects a subset of its input.
pub trait SelectStage: Stage {
    /// Return the matching records in input order.
    ///
    /// Only called with non-empty input; see [`FilterStage::apply_checked`].
    fn select(
        &mut self,
        records: Vec<AnalysisRecord>,
        sink: &dyn WarningSink,
    ) -> Vec<AnalysisRecord>;
}

/// A stage that rewrites records in place without changing membership.
pub trait RewriteStage: Stage {
    /// Rewrite each record. Only called with non-empty input.
    fn rewrite(&mut self, records: &mut [AnalysisRecord], sink: &dyn WarningSink);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageKind {
    Select,
    Rewrite,
}

/// A configured stage ready to run in a pipeline.
pub enum FilterStage {
    Select(Box<dyn SelectStage + Send>),
    Rewrite(Box<dyn RewriteStage + Send>),
}

impl FilterStage {
    pub fn select<S>(stage: S) -> Self
    where
        S: SelectStage + Send + 'static,
    {
        Self::Select(Box::new(stage))
    }

    pub fn rewrite<S>(stage: S) -> Self
    where
        S: RewriteStage + Send + 'static,
    {
        Self::Rewrite(Box::new(stage))
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Select(stage) => stage.name(),
            Self::Rewrite(stage) => stage.name(),
        }
    }

    pub fn kind(&self) -> StageKind {
        match self {
            Self::Select(_) => StageKind::Select,
            Self::Rewrite(_) => StageKind::Rewrite,
        }
    }

    /// Run the stage on `records`.
    ///
    /// Empty input emits exactly one warning tagged with the stage name and
    /// returns an empty sequence.
    pub fn apply_checked(
        &mut self,
        records: Vec<AnalysisRecord>,
        sink: &dyn WarningSink,
    ) -> Vec<AnalysisRecord> {
        if records.is_empty() {
            sink.print_warning(self.name(), EMPTY_INPUT_WARNING);
            return Vec::new();
        }

        self.transform(records, sink)
    }

    fn transform(
        &mut self,
        mut records: Vec<AnalysisRecord>,
        sink: &dyn WarningSink,
    ) -> Vec<AnalysisRecord> {
        match self {
            Self::Select(stage) => stage.select(records, sink),
            Self::Rewrite(stage) => {
                stage.rewrite(&mut records, sink);
                records
            }
        }
    }
}

impl std::fmt::Debug for FilterStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilterStage")
            .field("name", &self.name())
            .field("kind", &self.kind())
            .finish()
    }
}
