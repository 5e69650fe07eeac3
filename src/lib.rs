//! Composable filter pipeline for password-check analysis records.
//!
//! Records describe the outputs and scores of named password checks (PCLs)
//! for one sample, optionally before and after a transformation. A
//! [`FilterPipeline`] runs an ordered list of stages over a record set; each
//! stage selects a subset of records or, for [`ChangePclOutputByScore`],
//! fills in missing check outputs. Recoverable problems are reported through
//! a [`WarningSink`](warnings::WarningSink) and never abort a run.
//!
//! ```rust
//! use pclfilter::{AnalysisRecord, PipelineBuilder};
//! use pclfilter::pipeline::stages::{ChangePclOutputByScore, PclOutputIsNotOk};
//! use pclfilter::warnings::RecordingWarningSink;
//!
//! let records = vec![
//!     AnalysisRecord::new("hunter2").with_score("zxcvbn", Some(1.0)),
//!     AnalysisRecord::new("correct horse").with_score("zxcvbn", Some(4.0)),
//! ];
//!
//! let mut pipeline = PipelineBuilder::new()
//!     .stage(ChangePclOutputByScore::new([("zxcvbn", 3.0)].into_iter().collect()))
//!     .stage(PclOutputIsNotOk::default())
//!     .build();
//!
//! let sink = RecordingWarningSink::new();
//! let weak = pipeline.run(records, &sink);
//!
//! assert_eq!(weak.len(), 1);
//! assert_eq!(weak[0].sample, "hunter2");
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod io;
pub mod pipeline;
pub mod warnings;

// Re-export commonly used types
pub use crate::config::{PipelineConfig, StageConfig};
pub use crate::core::{AnalysisRecord, CheckOutput, Error, Result, TransformRule, OK_STATUS};
pub use crate::pipeline::stages::ChangePclOutputByScore;
pub use crate::pipeline::{FilterPipeline, FilterStage, PipelineBuilder, StageKind};
