//! One-shot extraction CLI.
//!
//! Extracts contact data from a local HTML document and renders the three
//! categorized lists, optionally serializing them to JSON or CSV.
//!
//! # Usage
//!
//! ```bash
//! # Extract from a file and print the lists
//! extract page.html
//!
//! # Resolve relative links against a base URL
//! extract page.html --base-url https://example.com/contact
//!
//! # Read from stdin and write a CSV export
//! extract - --format csv --output contacts.csv
//! ```

use std::env;
use std::io::Read;
use std::path::PathBuf;
use std::process;

use extraction_service::{
    extract, Config, DocumentSnapshot, ExportFormat, ExtractionResult, Session,
};
use url::Url;

/// Parsed command line options
#[derive(Debug, Clone)]
struct CliOptions {
    /// HTML input path, or "-" for stdin
    input: String,
    /// Base URL for resolving relative hrefs
    base_url: Option<String>,
    /// Export format, when an export was requested
    format: Option<ExportFormat>,
    /// Export destination; stdout when absent
    output: Option<PathBuf>,
}

fn print_usage() {
    eprintln!("Usage: extract <file.html | -> [--base-url <url>] [--format json|csv] [--output <path>]");
}

/// Parse command line arguments
fn parse_args(args: &[String]) -> Result<CliOptions, String> {
    let mut input = None;
    let mut base_url = None;
    let mut format = None;
    let mut output = None;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--base-url" => {
                let value = iter.next().ok_or("--base-url requires a value")?;
                base_url = Some(value.clone());
            }
            "--format" => {
                let value = iter.next().ok_or("--format requires a value")?;
                format = Some(value.parse::<ExportFormat>()?);
            }
            "--output" => {
                let value = iter.next().ok_or("--output requires a value")?;
                output = Some(PathBuf::from(value));
            }
            "--help" | "-h" => return Err(String::new()),
            other if other.starts_with("--") => {
                return Err(format!("unknown option '{}'", other));
            }
            other => {
                if input.is_some() {
                    return Err("multiple input files given".to_string());
                }
                input = Some(other.to_string());
            }
        }
    }

    Ok(CliOptions {
        input: input.ok_or("missing input file (use '-' for stdin)")?,
        base_url,
        format,
        output,
    })
}

/// Render the three categorized lists, or the no-data state.
fn render(result: &ExtractionResult) {
    if result.is_empty() {
        println!("No data extracted.");
        return;
    }

    println!("Emails ({}):", result.emails.len());
    for email in &result.emails {
        println!("  {}", email);
    }

    println!("Phones ({}):", result.phones.len());
    for phone in &result.phones {
        println!("  {}", phone);
    }

    println!("Social links ({}):", result.social_links.len());
    for link in &result.social_links {
        println!("  {}  {}", link.platform.as_str(), link.url);
    }
}

fn run(options: CliOptions) -> Result<(), Box<dyn std::error::Error>> {
    let html = if options.input == "-" {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        std::fs::read_to_string(&options.input)?
    };

    let base = match &options.base_url {
        Some(raw) => Some(Url::parse(raw)?),
        None => None,
    };

    let snapshot = DocumentSnapshot::from_html(&html, base.as_ref());
    let result = extract(&snapshot);

    let config = Config::load();
    let mut session = Session::new(config.export.source);
    session.record(result);

    if let Some(current) = session.current() {
        render(current);
    }

    if let Some(format) = options.format {
        let payload = session.export(format)?;
        match &options.output {
            Some(path) => {
                std::fs::write(path, &payload.document)?;
                println!("Wrote {} export to {}", format.as_str(), path.display());
            }
            None => println!("{}", payload.document),
        }
    }

    Ok(())
}

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();

    let options = match parse_args(&args) {
        Ok(options) => options,
        Err(message) => {
            if !message.is_empty() {
                eprintln!("Error: {}", message);
            }
            print_usage();
            process::exit(2);
        }
    };

    if let Err(e) = run(options) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
