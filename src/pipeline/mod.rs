//! Composable filter pipeline over analysis records.
//!
//! A pipeline is an ordered list of [`FilterStage`]s. Records flow through the
//! stages in order; each stage is entered through its guarded
//! [`FilterStage::apply_checked`] entry point.

pub mod builder;
pub mod stage;
pub mod stages;

pub use builder::{FilterPipeline, PipelineBuilder, StageTiming};
pub use stage::{FilterStage, RewriteStage, SelectStage, Stage, StageKind, EMPTY_INPUT_WARNING};
