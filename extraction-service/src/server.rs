//! Unix socket server for the host bridge.
//!
//! Receives newline-delimited JSON requests (one per line), runs the
//! extractor or serializes an export, and writes one response line back.
//! The session lock serializes requests, so at most one extraction runs at
//! a time.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{UnixListener, UnixStream};
use tokio::sync::Mutex;
use tracing::{error, info, warn};
use url::Url;
use uuid::Uuid;

use crate::config::Config;
use crate::extract;
use crate::payload::{Request, Response};
use crate::session::Session;
use crate::snapshot::DocumentSnapshot;
use crate::types::ExtractionError;

/// Extraction server configuration
pub struct ServerConfig {
    /// Path to the Unix socket
    pub socket_path: PathBuf,
    /// Source identifier stamped into exports
    pub export_source: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        let config = Config::default();
        Self {
            socket_path: config.server.socket_path,
            export_source: config.export.source,
        }
    }
}

impl ServerConfig {
    pub fn from_config(config: &Config) -> Self {
        Self {
            socket_path: config.server.socket_path.clone(),
            export_source: config.export.source.clone(),
        }
    }
}

/// Extraction server that listens on a Unix socket
pub struct ExtractionServer {
    config: ServerConfig,
    session: Arc<Mutex<Session>>,
}

impl ExtractionServer {
    pub fn new(config: ServerConfig) -> Self {
        let session = Arc::new(Mutex::new(Session::new(config.export_source.clone())));
        Self { config, session }
    }

    pub fn with_defaults() -> Self {
        Self::new(ServerConfig::default())
    }

    /// Start the server and listen for connections.
    pub async fn run(&self) -> Result<(), ExtractionError> {
        // Remove existing socket file if present
        if self.config.socket_path.exists() {
            std::fs::remove_file(&self.config.socket_path)?;
        }

        let listener = UnixListener::bind(&self.config.socket_path)?;
        info!("Extraction server listening on {:?}", self.config.socket_path);

        loop {
            match listener.accept().await {
                Ok((stream, _addr)) => {
                    let session = Arc::clone(&self.session);
                    tokio::spawn(async move {
                        if let Err(e) = handle_connection(stream, session).await {
                            error!("Connection error: {}", e);
                        }
                    });
                }
                Err(e) => {
                    error!("Accept error: {}", e);
                }
            }
        }
    }

    /// Get the socket path
    pub fn socket_path(&self) -> &Path {
        &self.config.socket_path
    }

    /// Process a single request (for direct integration without socket)
    pub async fn process(&self, request: Request) -> Response {
        let mut session = self.session.lock().await;
        process_request(&mut session, request)
    }
}

/// Handle a single client connection
async fn handle_connection(
    stream: UnixStream,
    session: Arc<Mutex<Session>>,
) -> Result<(), ExtractionError> {
    let (reader, mut writer) = stream.into_split();
    let mut reader = BufReader::new(reader);
    let mut line = String::new();

    // Read one JSON request per line
    while reader.read_line(&mut line).await? > 0 {
        let response = match serde_json::from_str::<Request>(&line) {
            Ok(request) => {
                let mut session = session.lock().await;
                process_request(&mut session, request)
            }
            Err(e) => {
                warn!("Failed to parse request: {}", e);
                Response::error(None, &format!("Parse error: {}", e))
            }
        };

        let response_json = serde_json::to_string(&response)?;
        writer.write_all(response_json.as_bytes()).await?;
        writer.write_all(b"\n").await?;
        writer.flush().await?;

        line.clear();
    }

    Ok(())
}

/// Process a single request against the session
fn process_request(session: &mut Session, request: Request) -> Response {
    let request_id = Uuid::new_v4().to_string();

    match request {
        Request::Extract {
            source,
            url,
            snapshot,
            html,
            base_url,
        } => {
            let snapshot = match (snapshot, html) {
                (Some(snapshot), _) => snapshot,
                (None, Some(html)) => {
                    let base = base_url
                        .as_deref()
                        .or_else(|| if url.is_empty() { None } else { Some(url.as_str()) })
                        .and_then(|raw| Url::parse(raw).ok());
                    DocumentSnapshot::from_html(&html, base.as_ref())
                }
                (None, None) => {
                    warn!("Extract request from {} carried no document", source);
                    let err = ExtractionError::MalformedSnapshot(
                        "request carries neither snapshot nor html".to_string(),
                    );
                    return Response::error(Some(request_id), &err.to_string());
                }
            };

            let result = extract::extract(&snapshot);
            info!(
                "[{}] Extracted from {} ({}): {} emails, {} phones, {} social links",
                request_id,
                source,
                if url.is_empty() { "<unknown>" } else { &url },
                result.emails.len(),
                result.phones.len(),
                result.social_links.len()
            );

            session.record(result.clone());
            Response::extracted(request_id, result)
        }

        Request::Export { format } => match session.export(format) {
            Ok(payload) => {
                info!("[{}] Exported {} document", request_id, format.as_str());
                Response::exported(request_id, payload.document, payload.filename)
            }
            Err(e) => {
                warn!("[{}] Export failed: {}", request_id, e);
                Response::error(Some(request_id), &e.to_string())
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::ExportFormat;
    use crate::payload::ResponseStatus;
    use crate::snapshot::AnchorElement;
    use std::time::Duration;

    fn extract_request(snapshot: DocumentSnapshot) -> Request {
        Request::Extract {
            source: "test".to_string(),
            url: "https://example.com/".to_string(),
            snapshot: Some(snapshot),
            html: None,
            base_url: None,
        }
    }

    #[tokio::test]
    async fn test_process_extract_then_export() {
        let server = ExtractionServer::with_defaults();

        let snapshot = DocumentSnapshot {
            text: "contact info@example.com".to_string(),
            anchors: vec![AnchorElement::new("tel:555-0100", "tel:555-0100")],
        };

        let response = server.process(extract_request(snapshot)).await;
        assert_eq!(response.status, ResponseStatus::Ok);
        let result = response.result.unwrap();
        assert_eq!(result.emails, vec!["info@example.com"]);
        assert_eq!(result.phones, vec!["555-0100"]);

        let response = server
            .process(Request::Export {
                format: ExportFormat::Csv,
            })
            .await;
        assert_eq!(response.status, ResponseStatus::Ok);
        assert_eq!(response.filename.as_deref(), Some("extracted-data.csv"));
        assert_eq!(response.document.unwrap().lines().count(), 3);
    }

    #[tokio::test]
    async fn test_process_export_without_extraction_errors() {
        let server = ExtractionServer::with_defaults();
        let response = server
            .process(Request::Export {
                format: ExportFormat::Json,
            })
            .await;

        assert_eq!(response.status, ResponseStatus::Error);
        assert!(response.message.unwrap().contains("no extracted data"));
    }

    #[tokio::test]
    async fn test_process_html_delivery_resolves_links() {
        let server = ExtractionServer::with_defaults();
        let request = Request::Extract {
            source: "test".to_string(),
            url: String::new(),
            snapshot: None,
            html: Some(r#"<body><a href="/company/acme">l</a></body>"#.to_string()),
            base_url: Some("https://www.linkedin.com/".to_string()),
        };

        let response = server.process(request).await;
        let result = response.result.unwrap();
        assert_eq!(result.social_links.len(), 1);
        assert_eq!(
            result.social_links[0].url,
            "https://www.linkedin.com/company/acme"
        );
    }

    #[tokio::test]
    async fn test_process_request_without_document_errors() {
        let server = ExtractionServer::with_defaults();
        let request = Request::Extract {
            source: "test".to_string(),
            url: String::new(),
            snapshot: None,
            html: None,
            base_url: None,
        };

        let response = server.process(request).await;
        assert_eq!(response.status, ResponseStatus::Error);
        assert!(response.message.unwrap().contains("malformed snapshot"));
    }

    #[tokio::test]
    async fn test_socket_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let socket_path = dir.path().join("extraction-test.sock");

        let server = ExtractionServer::new(ServerConfig {
            socket_path: socket_path.clone(),
            export_source: "test".to_string(),
        });
        let server = Arc::new(server);
        let running = Arc::clone(&server);
        tokio::spawn(async move {
            let _ = running.run().await;
        });

        // Wait for the socket to come up
        let mut stream = loop {
            match UnixStream::connect(&socket_path).await {
                Ok(stream) => break stream,
                Err(_) => tokio::time::sleep(Duration::from_millis(20)).await,
            }
        };

        let request = serde_json::to_string(&extract_request(DocumentSnapshot {
            text: "ping admin@example.com".to_string(),
            anchors: vec![],
        }))
        .unwrap();

        stream.write_all(request.as_bytes()).await.unwrap();
        stream.write_all(b"\n").await.unwrap();
        stream.flush().await.unwrap();

        let mut reader = BufReader::new(stream);
        let mut line = String::new();
        reader.read_line(&mut line).await.unwrap();

        let response: Response = serde_json::from_str(&line).unwrap();
        assert_eq!(response.status, ResponseStatus::Ok);
        assert_eq!(response.result.unwrap().emails, vec!["admin@example.com"]);
    }
}
