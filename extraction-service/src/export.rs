//! One-shot export serialization (JSON and CSV).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::ExtractionResult;

/// Export file formats offered by the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Json,
    Csv,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
        }
    }

    /// Suggested download filename for this format.
    pub fn default_filename(&self) -> &'static str {
        match self {
            ExportFormat::Json => "extracted-data.json",
            ExportFormat::Csv => "extracted-data.csv",
        }
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            other => Err(format!("unknown export format '{}'", other)),
        }
    }
}

/// The JSON export envelope: timestamp, source identifier, extracted data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    pub extracted_at: DateTime<Utc>,
    pub source: String,
    pub data: ExtractionResult,
}

impl ExportDocument {
    /// Stamp a result for export. `extracted_at` is taken at export time.
    pub fn new(source: impl Into<String>, data: ExtractionResult) -> Self {
        Self {
            extracted_at: Utc::now(),
            source: source.into(),
            data,
        }
    }

    /// Serialize in the requested format.
    pub fn serialize(&self, format: ExportFormat) -> serde_json::Result<String> {
        match format {
            ExportFormat::Json => self.to_json(),
            ExportFormat::Csv => Ok(self.to_csv()),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// CSV rendering: header `Type,Value,Platform`, one row per record,
    /// every field double-quoted with embedded quotes doubled.
    pub fn to_csv(&self) -> String {
        let mut rows = Vec::with_capacity(1 + self.data.len());
        rows.push(csv_row(&["Type", "Value", "Platform"]));

        for email in &self.data.emails {
            rows.push(csv_row(&["Email", email.as_str(), ""]));
        }
        for phone in &self.data.phones {
            rows.push(csv_row(&["Phone", phone.as_str(), ""]));
        }
        for link in &self.data.social_links {
            rows.push(csv_row(&[
                "Social Link",
                link.url.as_str(),
                link.platform.as_str(),
            ]));
        }

        rows.join("\n")
    }
}

fn csv_field(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

fn csv_row(cells: &[&str]) -> String {
    cells
        .iter()
        .map(|cell| csv_field(cell))
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{SocialLink, SocialPlatform};

    fn sample_result() -> ExtractionResult {
        ExtractionResult {
            emails: vec!["a@example.com".to_string()],
            phones: vec!["+1 555-0100".to_string()],
            social_links: vec![SocialLink {
                platform: SocialPlatform::Facebook,
                url: "https://www.facebook.com/page?ref=1".to_string(),
            }],
        }
    }

    /// Minimal CSV row parser for round-trip checks: splits quoted fields
    /// and un-doubles embedded quotes.
    fn parse_csv_row(row: &str) -> Vec<String> {
        let mut fields = Vec::new();
        let mut current = String::new();
        let mut in_quotes = false;
        let mut chars = row.chars().peekable();

        while let Some(c) = chars.next() {
            match c {
                '"' if !in_quotes => in_quotes = true,
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    current.push('"');
                }
                '"' => in_quotes = false,
                ',' if !in_quotes => {
                    fields.push(std::mem::take(&mut current));
                }
                _ => current.push(c),
            }
        }
        fields.push(current);
        fields
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!("json".parse::<ExportFormat>().unwrap(), ExportFormat::Json);
        assert_eq!("CSV".parse::<ExportFormat>().unwrap(), ExportFormat::Csv);
        assert!("xml".parse::<ExportFormat>().is_err());
    }

    #[test]
    fn test_default_filenames() {
        assert_eq!(ExportFormat::Json.default_filename(), "extracted-data.json");
        assert_eq!(ExportFormat::Csv.default_filename(), "extracted-data.csv");
    }

    #[test]
    fn test_csv_has_header_plus_one_row_per_record() {
        let document = ExportDocument::new("test", sample_result());
        let csv = document.to_csv();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "\"Type\",\"Value\",\"Platform\"");
    }

    #[test]
    fn test_csv_roundtrip_recovers_values() {
        let document = ExportDocument::new("test", sample_result());
        let csv = document.to_csv();
        let rows: Vec<Vec<String>> = csv.lines().map(parse_csv_row).collect();

        assert_eq!(rows[1], vec!["Email", "a@example.com", ""]);
        assert_eq!(rows[2], vec!["Phone", "+1 555-0100", ""]);
        assert_eq!(
            rows[3],
            vec![
                "Social Link",
                "https://www.facebook.com/page?ref=1",
                "facebook"
            ]
        );
    }

    #[test]
    fn test_csv_escapes_embedded_quotes() {
        let result = ExtractionResult {
            emails: vec!["\"odd\"@example.com".to_string()],
            ..Default::default()
        };
        let csv = ExportDocument::new("test", result).to_csv();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines[1], "\"Email\",\"\"\"odd\"\"@example.com\",\"\"");
        assert_eq!(parse_csv_row(lines[1])[1], "\"odd\"@example.com");
    }

    #[test]
    fn test_csv_empty_result_is_header_only() {
        let csv = ExportDocument::new("test", ExtractionResult::default()).to_csv();
        assert_eq!(csv.lines().count(), 1);
    }

    #[test]
    fn test_json_envelope_fields() {
        let document = ExportDocument::new("Contact Extraction Service", sample_result());
        let json = document.to_json().unwrap();

        assert!(json.contains("\"extractedAt\""));
        assert!(json.contains("\"source\": \"Contact Extraction Service\""));
        assert!(json.contains("\"socialLinks\""));
    }

    #[test]
    fn test_json_roundtrip() {
        let document = ExportDocument::new("test", sample_result());
        let json = document.to_json().unwrap();
        let parsed: ExportDocument = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.source, document.source);
        assert_eq!(parsed.data, document.data);
        assert_eq!(parsed.extracted_at, document.extracted_at);
    }

    #[test]
    fn test_json_roundtrip_order_insensitive_sets() {
        // emails/phones are sets: compare them sorted.
        let mut a = sample_result();
        a.emails.push("b@example.com".to_string());
        let json = ExportDocument::new("t", a.clone()).to_json().unwrap();
        let parsed: ExportDocument = serde_json::from_str(&json).unwrap();

        let mut left = parsed.data.emails.clone();
        let mut right = a.emails.clone();
        left.sort();
        right.sort();
        assert_eq!(left, right);
        // social links stay order-sensitive
        assert_eq!(parsed.data.social_links, a.social_links);
    }
}
