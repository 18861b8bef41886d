//! Diagnostics sink for ingestion anomalies
//!
//! Collects (message, optional detail) pairs for unknown sections,
//! unknown discriminators, and unrecognized properties. Purely
//! observational: reporting never fails and never aborts ingestion.

use serde::Serialize;
use tracing::{debug, warn};

#[derive(Debug, Clone, Serialize)]
pub struct Diagnostic {
    pub message: String,
    pub detail: Option<String>,
}

#[derive(Debug, Default, Serialize)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an anomaly worth surfacing to the operator.
    pub fn report(&mut self, message: impl Into<String>) {
        let message = message.into();
        warn!(target: "chronicler::ingest", "{message}");
        self.entries.push(Diagnostic {
            message,
            detail: None,
        });
    }

    /// Record an anomaly with its offending value.
    pub fn report_detail(&mut self, message: impl Into<String>, detail: impl Into<String>) {
        let message = message.into();
        let detail = detail.into();
        debug!(target: "chronicler::ingest", "{message}: {detail}");
        self.entries.push(Diagnostic {
            message,
            detail: Some(detail),
        });
    }

    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
