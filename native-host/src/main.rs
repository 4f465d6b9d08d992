//! Native Messaging Host - Thin relay to the Extraction Service
//!
//! This binary receives extraction requests from the browser extension via
//! stdin/stdout (Chrome Native Messaging framing: 4-byte native-endian
//! length prefix + JSON body) and forwards them to the extraction service
//! over its Unix socket. When the service is unreachable the extension gets
//! an error envelope it renders as "no data".

use serde::Serialize;
use std::io::{self, BufRead, BufReader, Read, Write};
use std::os::unix::net::UnixStream;
use std::time::Duration;

const DEFAULT_SOCKET_PATH: &str = "/tmp/extraction-service.sock";
const SOCKET_TIMEOUT: Duration = Duration::from_secs(5);
/// Chrome caps a single message to a native host at 1 MB.
const MAX_MESSAGE_BYTES: usize = 1024 * 1024;

/// Relay status envelope, mirroring the service response shape.
#[derive(Debug, Serialize)]
struct HostStatus<'a> {
    status: &'a str,
    message: &'a str,
}

fn socket_path() -> String {
    std::env::var("EXTRACTION_SOCKET").unwrap_or_else(|_| DEFAULT_SOCKET_PATH.to_string())
}

/// Read one native messaging frame. Returns None on a clean EOF.
fn read_message<R: Read>(input: &mut R) -> io::Result<Option<Vec<u8>>> {
    let mut length_bytes = [0u8; 4];

    match input.read_exact(&mut length_bytes) {
        Ok(_) => {}
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => return Ok(None),
        Err(e) => return Err(e),
    }

    let length = u32::from_ne_bytes(length_bytes) as usize;
    if length == 0 {
        return Ok(None);
    }
    if length > MAX_MESSAGE_BYTES {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("message of {} bytes exceeds the 1 MB frame limit", length),
        ));
    }

    let mut message = vec![0u8; length];
    input.read_exact(&mut message)?;

    Ok(Some(message))
}

/// Write one native messaging frame.
fn write_message<W: Write>(output: &mut W, message: &[u8]) -> io::Result<()> {
    let length = message.len() as u32;
    output.write_all(&length.to_ne_bytes())?;
    output.write_all(message)?;
    output.flush()?;

    Ok(())
}

/// Forward a request to the extraction service and read its one-line reply.
fn forward_to_service(socket: &str, message: &[u8]) -> io::Result<Vec<u8>> {
    let stream = UnixStream::connect(socket)?;
    stream.set_read_timeout(Some(SOCKET_TIMEOUT))?;
    stream.set_write_timeout(Some(SOCKET_TIMEOUT))?;

    let mut writer = stream.try_clone()?;
    writer.write_all(message)?;
    writer.write_all(b"\n")?;
    writer.flush()?;

    let mut reader = BufReader::new(stream);
    let mut response = Vec::new();
    reader.read_until(b'\n', &mut response)?;
    if response.last() == Some(&b'\n') {
        response.pop();
    }

    Ok(response)
}

fn status_response(status: &str, message: &str) -> Vec<u8> {
    serde_json::to_vec(&HostStatus { status, message })
        .unwrap_or_else(|_| br#"{"status":"error"}"#.to_vec())
}

/// Decide the response for one incoming message.
///
/// Invalid JSON and pings are answered locally; everything else goes to the
/// service.
fn handle_message(socket: &str, message: &[u8]) -> Vec<u8> {
    let value: serde_json::Value = match serde_json::from_slice(message) {
        Ok(value) => value,
        Err(e) => return status_response("error", &format!("invalid request JSON: {}", e)),
    };

    if value.get("action").and_then(|action| action.as_str()) == Some("ping") {
        return status_response("ok", "extraction-host alive");
    }

    match forward_to_service(socket, message) {
        Ok(response) if response.is_empty() => {
            status_response("error", "extraction service closed the connection")
        }
        Ok(response) => response,
        Err(e) => status_response("error", &format!("extraction service unavailable: {}", e)),
    }
}

fn main() {
    let socket = socket_path();
    eprintln!("Extraction host started, relaying to {}", socket);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut input = stdin.lock();
    let mut output = stdout.lock();

    loop {
        match read_message(&mut input) {
            Ok(Some(message)) => {
                let response = handle_message(&socket, &message);
                if let Err(e) = write_message(&mut output, &response) {
                    eprintln!("Failed to write response: {}", e);
                    break;
                }
            }
            Ok(None) => {
                eprintln!("Extension disconnected");
                break;
            }
            Err(e) => {
                eprintln!("Read error: {}", e);
                break;
            }
        }
    }
}
