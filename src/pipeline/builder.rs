//! Pipeline builder for composing filter stages.
//!
//! This module provides a fluent API for building record pipelines. Every
//! stage consumes the records produced by the previous one.

use super::stage::FilterStage;
use crate::core::AnalysisRecord;
use crate::warnings::WarningSink;
use std::time::{Duration, Instant};

/// Builder for constructing pipelines.
///
/// # Example
///
/// ```rust
/// use pclfilter::pipeline::PipelineBuilder;
/// use pclfilter::pipeline::stages::{ChangePclOutputByScore, PclOutputIsNotOk};
///
/// let pipeline = PipelineBuilder::new()
///     .stage(ChangePclOutputByScore::new([("zxcvbn", 3.0)].into_iter().collect()))
///     .stage(PclOutputIsNotOk::default())
///     .build();
///
/// assert_eq!(pipeline.stage_count(), 2);
/// ```
#[derive(Debug, Default)]
pub struct PipelineBuilder {
    stages: Vec<FilterStage>,
    progress_enabled: bool,
}

impl PipelineBuilder {
    /// Create a new empty pipeline builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a stage to the pipeline.
    pub fn stage(mut self, stage: impl Into<FilterStage>) -> Self {
        self.stages.push(stage.into());
        self
    }

    /// Add stages conditionally.
    ///
    /// If the condition is true, `f` is applied to the builder. Otherwise,
    /// this is a no-op.
    pub fn when<F>(self, condition: bool, f: F) -> Self
    where
        F: FnOnce(Self) -> Self,
    {
        if condition {
            f(self)
        } else {
            self
        }
    }

    /// Enable progress reporting for this pipeline.
    pub fn with_progress(mut self) -> Self {
        self.progress_enabled = true;
        self
    }

    /// Build the final pipeline ready for execution.
    pub fn build(self) -> FilterPipeline {
        FilterPipeline {
            stages: self.stages,
            progress_enabled: self.progress_enabled,
        }
    }
}

/// A built pipeline ready for execution.
///
/// The pipeline can be run multiple times. Score stages keep their pruned
/// configuration between runs.
#[derive(Debug)]
pub struct FilterPipeline {
    stages: Vec<FilterStage>,
    progress_enabled: bool,
}

impl FilterPipeline {
    /// Run every stage in order, feeding each stage the previous stage's output.
    pub fn run(
        &mut self,
        records: Vec<AnalysisRecord>,
        sink: &dyn WarningSink,
    ) -> Vec<AnalysisRecord> {
        self.run_with_timing(records, sink).0
    }

    /// Run the pipeline and collect timing information for each stage.
    pub fn run_with_timing(
        &mut self,
        records: Vec<AnalysisRecord>,
        sink: &dyn WarningSink,
    ) -> (Vec<AnalysisRecord>, Vec<StageTiming>) {
        let total = self.stages.len();
        let report = self.progress_enabled && !quiet();
        let mut timings = Vec::with_capacity(total);

        if report {
            log::info!("Pipeline: {} stages, {} records", total, records.len());
        }

        let records = self
            .stages
            .iter_mut()
            .enumerate()
            .fold(records, |records, (i, stage)| {
                if report {
                    log::info!("Stage {}/{}: {}", i + 1, total, stage.name());
                }

                let records_in = records.len();
                let start = Instant::now();
                let output = stage.apply_checked(records, sink);

                log::debug!(
                    "{}: {} -> {} records",
                    stage.name(),
                    records_in,
                    output.len()
                );
                timings.push(StageTiming {
                    name: stage.name().to_string(),
                    duration: start.elapsed(),
                    records_in,
                    records_out: output.len(),
                });
                output
            });

        (records, timings)
    }

    /// Get the number of stages in this pipeline.
    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    /// Stage names in execution order.
    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(FilterStage::name).collect()
    }

    pub fn stages(&self) -> &[FilterStage] {
        &self.stages
    }
}

fn quiet() -> bool {
    std::env::var("PCLFILTER_QUIET").is_ok_and(|value| value == "true")
}

/// Timing information for a pipeline stage.
#[derive(Debug, Clone)]
pub struct StageTiming {
    /// Name of the stage
    pub name: String,

    /// Time taken to execute the stage
    pub duration: Duration,

    /// Records handed to the stage
    pub records_in: usize,

    /// Records the stage returned
    pub records_out: usize,
}

impl StageTiming {
    /// Format the timing as a human-readable string.
    pub fn format(&self) -> String {
        format!(
            "{}: {:.2}ms ({} -> {} records)",
            self.name,
            self.duration.as_secs_f64() * 1000.0,
            self.records_in,
            self.records_out
        )
    }
}
