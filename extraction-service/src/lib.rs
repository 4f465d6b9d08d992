//! Contact Extraction Service Library
//!
//! Extracts contact signals (email addresses, telephone links, social media
//! profile links) from a single document snapshot, and serves that extractor
//! over a Unix socket to the browser host bridge.

pub mod config;
pub mod export;
pub mod extract;
pub mod payload;
pub mod server;
pub mod session;
pub mod snapshot;
pub mod types;

pub use config::Config;
pub use export::{ExportDocument, ExportFormat};
pub use extract::extract;
pub use payload::{Request, Response, ResponseStatus};
pub use server::{ExtractionServer, ServerConfig};
pub use session::{ExportPayload, Session};
pub use snapshot::{AnchorElement, DocumentSnapshot};
pub use types::{ExtractionError, ExtractionResult, SocialLink, SocialPlatform};
