//! The extractor: one pass over the snapshot text, one pass over its
//! anchors, no side effects. Absence of matches yields empty containers.

use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;

use crate::snapshot::DocumentSnapshot;
use crate::types::{ExtractionResult, SocialLink, SocialPlatform};

/// URI scheme prefix marking a dialable number.
const TEL_SCHEME: &str = "tel:";

lazy_static! {
    static ref EMAIL: Regex =
        Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").unwrap();
}

/// Platform match table. Order is significant: patterns are tested top to
/// bottom per link and the first match wins, so a URL embedding another
/// platform's domain in a query parameter is never reclassified.
const PLATFORM_PATTERNS: &[(SocialPlatform, &[&str])] = &[
    (SocialPlatform::Facebook, &["facebook.com"]),
    (SocialPlatform::Twitter, &["twitter.com", "x.com"]),
    (SocialPlatform::Linkedin, &["linkedin.com"]),
    (SocialPlatform::Instagram, &["instagram.com"]),
    (SocialPlatform::Youtube, &["youtube.com"]),
    (SocialPlatform::Github, &["github.com"]),
    (SocialPlatform::Tiktok, &["tiktok.com"]),
];

/// Classify a resolved URL against the platform table.
pub fn classify(url: &str) -> Option<SocialPlatform> {
    let lowered = url.to_ascii_lowercase();
    for (platform, needles) in PLATFORM_PATTERNS {
        if needles.iter().any(|needle| lowered.contains(needle)) {
            return Some(*platform);
        }
    }
    None
}

/// Extract contact signals from a document snapshot.
///
/// Emails come from the rendered text, phones only from `tel:` anchors
/// (free text is never scanned for digits), social links from every anchor
/// with a non-empty resolved href. All three are deduplicated by exact
/// string equality; social links keep first-seen order.
pub fn extract(snapshot: &DocumentSnapshot) -> ExtractionResult {
    let mut emails = Vec::new();
    let mut seen_emails = HashSet::new();
    for found in EMAIL.find_iter(&snapshot.text) {
        let email = found.as_str();
        if seen_emails.insert(email.to_string()) {
            emails.push(email.to_string());
        }
    }

    let mut phones = Vec::new();
    let mut seen_phones = HashSet::new();
    for anchor in &snapshot.anchors {
        if let Some(rest) = anchor.raw_href.strip_prefix(TEL_SCHEME) {
            let phone = rest.trim();
            if phone.is_empty() {
                continue;
            }
            if seen_phones.insert(phone.to_string()) {
                phones.push(phone.to_string());
            }
        }
    }

    let mut social_links = Vec::new();
    let mut seen_urls = HashSet::new();
    for anchor in &snapshot.anchors {
        if anchor.href.is_empty() {
            continue;
        }
        if let Some(platform) = classify(&anchor.href) {
            if seen_urls.insert(anchor.href.clone()) {
                social_links.push(SocialLink {
                    platform,
                    url: anchor.href.clone(),
                });
            }
        }
    }

    ExtractionResult {
        emails,
        phones,
        social_links,
    }
}
