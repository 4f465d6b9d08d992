//! Core result types and the error taxonomy at the service boundary.

use serde::{Deserialize, Serialize};

/// Social media platforms the extractor recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SocialPlatform {
    Facebook,
    Twitter,
    Linkedin,
    Instagram,
    Youtube,
    Github,
    Tiktok,
}

impl SocialPlatform {
    pub fn as_str(&self) -> &'static str {
        match self {
            SocialPlatform::Facebook => "facebook",
            SocialPlatform::Twitter => "twitter",
            SocialPlatform::Linkedin => "linkedin",
            SocialPlatform::Instagram => "instagram",
            SocialPlatform::Youtube => "youtube",
            SocialPlatform::Github => "github",
            SocialPlatform::Tiktok => "tiktok",
        }
    }
}

/// A classified social profile link.
///
/// `url` is the resolved absolute URL of the anchor, query string included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLink {
    pub platform: SocialPlatform,
    pub url: String,
}

/// Result of one extraction run.
///
/// `emails` and `phones` carry set semantics (exact-string dedup); they are
/// stored in first-seen order for stable display but consumers must not rely
/// on ordering. `social_links` is ordered by first encounter of each distinct
/// URL. A result is built fresh on every run and replaced wholly by the next.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionResult {
    #[serde(default)]
    pub emails: Vec<String>,
    #[serde(default)]
    pub phones: Vec<String>,
    #[serde(default)]
    pub social_links: Vec<SocialLink>,
}

impl ExtractionResult {
    /// True when the run matched nothing. A valid outcome, not an error;
    /// the surface uses this to show its "no data" state.
    pub fn is_empty(&self) -> bool {
        self.emails.is_empty() && self.phones.is_empty() && self.social_links.is_empty()
    }

    /// Total number of extracted records across all three categories.
    pub fn len(&self) -> usize {
        self.emails.len() + self.phones.len() + self.social_links.len()
    }
}

/// Errors that can occur around the extractor. The extractor itself never
/// fails; these belong to the host bridge and export surface.
#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("no document access: {0}")]
    NoDocumentAccess(String),

    #[error("extraction host unavailable: {0}")]
    HostUnavailable(String),

    #[error("malformed snapshot: {0}")]
    MalformedSnapshot(String),

    #[error("no extracted data to export")]
    NoData,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
