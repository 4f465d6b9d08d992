//! Wire payload types for the host bridge.
//!
//! Requests arrive as newline-delimited JSON over the Unix socket, tagged by
//! `action`. A document can be delivered either as a pre-built snapshot
//! (the extension path, built in the privileged page context) or as raw HTML
//! the service parses itself.

use serde::{Deserialize, Serialize};

use crate::export::ExportFormat;
use crate::snapshot::DocumentSnapshot;
use crate::types::ExtractionResult;

/// Request received from a host bridge client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum Request {
    /// Run the extractor against one document.
    #[serde(rename_all = "camelCase")]
    Extract {
        /// Caller identifier ("chrome", "cli", ...)
        source: String,

        /// Document URL, if the caller knows it. Doubles as the base for
        /// resolving relative hrefs on the HTML path.
        #[serde(default)]
        url: String,

        /// Pre-built snapshot (text + anchors).
        #[serde(default, skip_serializing_if = "Option::is_none")]
        snapshot: Option<DocumentSnapshot>,

        /// Raw HTML for the service to parse instead.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        html: Option<String>,

        /// Explicit base URL override for the HTML path.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        base_url: Option<String>,
    },

    /// Serialize the session's current result.
    Export { format: ExportFormat },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Ok,
    Error,
}

/// Response sent back to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    pub status: ResponseStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,

    /// Extraction outcome (on extract requests).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<ExtractionResult>,

    /// Serialized export text (on export requests).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document: Option<String>,

    /// Suggested download filename (on export requests).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Response {
    pub fn extracted(request_id: String, result: ExtractionResult) -> Self {
        Self {
            status: ResponseStatus::Ok,
            request_id: Some(request_id),
            result: Some(result),
            document: None,
            filename: None,
            message: None,
        }
    }

    pub fn exported(request_id: String, document: String, filename: String) -> Self {
        Self {
            status: ResponseStatus::Ok,
            request_id: Some(request_id),
            result: None,
            document: Some(document),
            filename: Some(filename),
            message: None,
        }
    }

    pub fn error(request_id: Option<String>, message: &str) -> Self {
        Self {
            status: ResponseStatus::Error,
            request_id,
            result: None,
            document: None,
            filename: None,
            message: Some(message.to_string()),
        }
    }
}
