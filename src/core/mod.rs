pub mod errors;
pub mod record;

pub use errors::{Error, Result, ResultExt};
pub use record::{AnalysisRecord, CheckOutput, TransformRule, OK_STATUS};
