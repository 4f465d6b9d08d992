//! Presentation-surface state.
//!
//! The surface owns exactly one result at a time: each extraction replaces
//! the previous result wholly, and export always serializes the current one.
//! The extractor itself stays stateless.

use crate::export::{ExportDocument, ExportFormat};
use crate::types::{ExtractionError, ExtractionResult};

/// A serialized export: document text plus suggested filename.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportPayload {
    pub document: String,
    pub filename: String,
}

/// Holds the currently extracted result between requests.
#[derive(Debug, Default)]
pub struct Session {
    /// Identifier stamped into the JSON export envelope.
    source: String,
    result: Option<ExtractionResult>,
}

impl Session {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            result: None,
        }
    }

    /// Replace the current result. No merging across runs.
    pub fn record(&mut self, result: ExtractionResult) {
        self.result = Some(result);
    }

    /// The current result, if an extraction has run.
    pub fn current(&self) -> Option<&ExtractionResult> {
        self.result.as_ref()
    }

    /// Serialize the current result.
    ///
    /// Fails with [`ExtractionError::NoData`] when no extraction has run.
    /// An empty result exports fine - zero matches is a valid outcome.
    pub fn export(&self, format: ExportFormat) -> Result<ExportPayload, ExtractionError> {
        let result = self.result.as_ref().ok_or(ExtractionError::NoData)?;
        let document = ExportDocument::new(self.source.clone(), result.clone());

        Ok(ExportPayload {
            document: document.serialize(format)?,
            filename: format.default_filename().to_string(),
        })
    }
}
