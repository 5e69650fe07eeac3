//! Pipeline configuration.
//!
//! A pipeline file lists stages in execution order, each tagged by `kind`:
//!
//! ```toml
//! progress = true
//!
//! [[stage]]
//! kind = "change_pcl_output_by_score"
//! thresholds = [{ check = "zxcvbn", threshold = 3 }]
//!
//! [[stage]]
//! kind = "pcl_output_changed_from_ok_to_not_ok"
//! checks = ["zxcvbn"]
//! ```

mod loader;

pub use loader::{load_pipeline_config, parse_pipeline_config, ConfigFormat};

use crate::core::{Error, Result};
use crate::pipeline::stages::{
    ChangePclOutputByScore, HigherScoreThan, LowEntropyChange, LowerScoreThan,
    PclOutputChangedFromNotOkToOk, PclOutputChangedFromOkToNotOk, PclOutputIsNotOk,
    PclOutputIsOk, PclOutputsAreNotAllSame, ScoreThresholds, TransformationHadEffect,
};
use crate::pipeline::{FilterPipeline, FilterStage, PipelineBuilder};
use serde::{Deserialize, Serialize};

/// Configuration of a single stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StageConfig {
    LowEntropyChange {
        threshold: f64,
    },
    PclOutputChangedFromOkToNotOk {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        checks: Option<Vec<String>>,
    },
    PclOutputChangedFromNotOkToOk {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        checks: Option<Vec<String>>,
    },
    PclOutputsAreNotAllSame,
    TransformationHadEffect {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        transformations: Option<Vec<String>>,
    },
    PclOutputIsOk {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        checks: Option<Vec<String>>,
    },
    PclOutputIsNotOk {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        checks: Option<Vec<String>>,
    },
    HigherScoreThan {
        #[serde(default)]
        thresholds: ScoreThresholds,
    },
    LowerScoreThan {
        #[serde(default)]
        thresholds: ScoreThresholds,
    },
    ChangePclOutputByScore {
        #[serde(default)]
        thresholds: ScoreThresholds,
    },
}

impl StageConfig {
    /// Build the configured stage.
    pub fn into_stage(self) -> FilterStage {
        match self {
            Self::LowEntropyChange { threshold } => LowEntropyChange::new(threshold).into(),
            Self::PclOutputChangedFromOkToNotOk { checks } => {
                PclOutputChangedFromOkToNotOk::new(checks).into()
            }
            Self::PclOutputChangedFromNotOkToOk { checks } => {
                PclOutputChangedFromNotOkToOk::new(checks).into()
            }
            Self::PclOutputsAreNotAllSame => PclOutputsAreNotAllSame.into(),
            Self::TransformationHadEffect { transformations } => {
                TransformationHadEffect::new(transformations.unwrap_or_default()).into()
            }
            Self::PclOutputIsOk { checks } => PclOutputIsOk::new(checks).into(),
            Self::PclOutputIsNotOk { checks } => PclOutputIsNotOk::new(checks).into(),
            Self::HigherScoreThan { thresholds } => HigherScoreThan::new(thresholds).into(),
            Self::LowerScoreThan { thresholds } => LowerScoreThan::new(thresholds).into(),
            Self::ChangePclOutputByScore { thresholds } => {
                ChangePclOutputByScore::new(thresholds).into()
            }
        }
    }

    fn thresholds(&self) -> Option<&ScoreThresholds> {
        match self {
            Self::HigherScoreThan { thresholds }
            | Self::LowerScoreThan { thresholds }
            | Self::ChangePclOutputByScore { thresholds } => Some(thresholds),
            _ => None,
        }
    }
}

/// Ordered list of stages plus runner options.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Log stage progress while running
    #[serde(default)]
    pub progress: bool,

    #[serde(default, rename = "stage")]
    pub stages: Vec<StageConfig>,
}

impl PipelineConfig {
    /// Reject configurations no pipeline can run meaningfully.
    ///
    /// Missing optional settings are not errors; stages warn about those at
    /// run time.
    pub fn validate(&self) -> Result<()> {
        if self.stages.is_empty() {
            return Err(Error::Configuration("pipeline has no stages".into()));
        }

        for (i, stage) in self.stages.iter().enumerate() {
            if let StageConfig::LowEntropyChange { threshold } = stage {
                if !threshold.is_finite() {
                    return Err(Error::Configuration(format!(
                        "stage {}: entropy threshold must be finite",
                        i + 1
                    )));
                }
            }

            let non_finite = stage
                .thresholds()
                .and_then(|t| t.iter().find(|entry| !entry.threshold.is_finite()));
            if let Some(entry) = non_finite {
                return Err(Error::Configuration(format!(
                    "stage {}: threshold for '{}' must be finite",
                    i + 1,
                    entry.check
                )));
            }
        }

        Ok(())
    }

    /// Build a runnable pipeline from this configuration.
    pub fn build(self) -> FilterPipeline {
        let progress = self.progress;
        self.stages
            .into_iter()
            .fold(PipelineBuilder::new(), |builder, stage| {
                builder.stage(stage.into_stage())
            })
            .when(progress, PipelineBuilder::with_progress)
            .build()
    }
}
