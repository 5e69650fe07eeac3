//! Warning sinks for recoverable filter conditions.
//!
//! Stages never fail: empty input, missing configuration and unknown check
//! names are reported through a [`WarningSink`] and the stage carries on with
//! a degraded result. This module provides the sink abstraction and its
//! implementations:
//!
//! - [`LogWarningSink`]: forwards warnings to `log::warn!` (CLI default)
//! - [`SilentWarningSink`]: drops every warning
//! - [`RecordingWarningSink`]: captures warnings for callers and tests
//!
//! # Example
//!
//! ```rust
//! use pclfilter::warnings::{RecordingWarningSink, WarningSink};
//!
//! let sink = RecordingWarningSink::new();
//! sink.print_warning("HigherScoreThan", "Key 'zxcvbn' does not exist.");
//!
//! assert_eq!(sink.warnings().len(), 1);
//! assert_eq!(sink.warnings()[0].source, "HigherScoreThan");
//! ```

use parking_lot::Mutex;
use std::sync::Arc;

/// Receiver of human-readable warnings emitted by filter stages.
///
/// Delivery is fire-and-forget; stages do not inspect the outcome.
pub trait WarningSink {
    /// Report `message` on behalf of `source` (usually a stage type name).
    fn print_warning(&self, source: &str, message: &str);
}

/// Sink that writes every warning to the `log` facade.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogWarningSink;

impl WarningSink for LogWarningSink {
    fn print_warning(&self, source: &str, message: &str) {
        log::warn!("{}: {}", source, message);
    }
}

/// Sink that discards every warning.
#[derive(Clone, Copy, Debug, Default)]
pub struct SilentWarningSink;

impl WarningSink for SilentWarningSink {
    #[inline]
    fn print_warning(&self, _source: &str, _message: &str) {}
}

/// Warning captured by [`RecordingWarningSink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    pub source: String,
    pub message: String,
}

/// Sink that records warnings in order.
///
/// Clones share the same underlying buffer, so a clone can be handed to the
/// pipeline while the original is inspected afterwards.
#[derive(Clone, Debug, Default)]
pub struct RecordingWarningSink {
    warnings: Arc<Mutex<Vec<Warning>>>,
}

impl RecordingWarningSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every warning recorded so far.
    pub fn warnings(&self) -> Vec<Warning> {
        self.warnings.lock().clone()
    }

    /// Warning messages only, in emission order.
    pub fn messages(&self) -> Vec<String> {
        self.warnings
            .lock()
            .iter()
            .map(|w| w.message.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.warnings.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.lock().is_empty()
    }

    pub fn clear(&self) {
        self.warnings.lock().clear();
    }
}

impl WarningSink for RecordingWarningSink {
    fn print_warning(&self, source: &str, message: &str) {
        self.warnings.lock().push(Warning {
            source: source.to_string(),
            message: message.to_string(),
        });
    }
}
