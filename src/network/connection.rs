//! Connection Handler
//!
//! Handles individual client connections.
//!
//! Each frame walks the same path: read the opcode, read the key, read the
//! value (SET only), dispatch to the service, write the response, then wait
//! for the next opcode. A clean end-of-stream before an opcode ends the
//! connection silently; any decode failure is reported to the client with a
//! status byte and ends the connection.

use std::io::{BufReader, BufWriter, Read, Write};
use std::net::TcpStream;
use std::time::Duration;

use crate::config::{Config, GetMode};
use crate::error::{QuickDbError, Result};
use crate::protocol::{
    read_key, read_opcode, read_value, status_for_decode_error, write_response, OpCode,
    Response, Status,
};
use crate::service::Service;

/// Handles a single client connection
pub struct Connection<S, R: Read, W: Write> {
    /// Stream reader (buffered for efficiency)
    reader: BufReader<R>,

    /// Stream writer (buffered for efficiency)
    writer: BufWriter<W>,

    /// Storage the requests are dispatched to
    service: S,

    /// GET handling
    get_mode: GetMode,

    /// Peer address for logging
    peer_addr: String,
}

impl<S: Service> Connection<S, TcpStream, TcpStream> {
    /// Create a connection handler for an accepted TCP stream
    ///
    /// Sets up buffered I/O and applies the configured timeouts.
    pub fn from_tcp(stream: TcpStream, service: S, config: &Config) -> Result<Self> {
        let peer_addr = stream
            .peer_addr()
            .map(|a| a.to_string())
            .unwrap_or_else(|_| "unknown".to_string());

        // Disable Nagle's algorithm for low latency
        stream.set_nodelay(true)?;

        if config.read_timeout_ms > 0 {
            stream.set_read_timeout(Some(Duration::from_millis(config.read_timeout_ms)))?;
        }
        if config.write_timeout_ms > 0 {
            stream.set_write_timeout(Some(Duration::from_millis(config.write_timeout_ms)))?;
        }

        let read_stream = stream.try_clone()?;

        Ok(Connection::new(read_stream, stream, service)
            .with_get_mode(config.get_mode)
            .with_peer_addr(peer_addr))
    }
}

impl<S: Service, R: Read, W: Write> Connection<S, R, W> {
    /// Create a handler over an arbitrary reader/writer pair
    pub fn new(reader: R, writer: W, service: S) -> Self {
        Self {
            reader: BufReader::new(reader),
            writer: BufWriter::new(writer),
            service,
            get_mode: GetMode::default(),
            peer_addr: "unknown".to_string(),
        }
    }

    pub fn with_get_mode(mut self, mode: GetMode) -> Self {
        self.get_mode = mode;
        self
    }

    pub fn with_peer_addr(mut self, addr: impl Into<String>) -> Self {
        self.peer_addr = addr.into();
        self
    }

    /// Get the peer address string
    pub fn peer_addr(&self) -> &str {
        &self.peer_addr
    }

    /// Handle the connection (blocking until closed)
    ///
    /// Consumes the handler so the underlying streams are dropped, and the
    /// connection closed, on every return path.
    pub fn handle(mut self) -> Result<()> {
        tracing::debug!("Connection established from {}", self.peer_addr);

        loop {
            let op = match read_opcode(&mut self.reader) {
                Ok(Some(op)) => op,
                Ok(None) => {
                    tracing::debug!("Client {} disconnected", self.peer_addr);
                    return Ok(());
                }
                Err(e) => return self.abort(e),
            };

            let key = match read_key(&mut self.reader) {
                Ok(key) => key,
                Err(e) => return self.abort(e),
            };

            match OpCode::try_from(op) {
                Ok(OpCode::Set) => {
                    let value = match read_value(&mut self.reader) {
                        Ok(value) => value,
                        Err(e) => return self.abort(e),
                    };
                    tracing::debug!(
                        "SET operation from {} for key: {}, value: {} bytes",
                        self.peer_addr,
                        String::from_utf8_lossy(&key),
                        value.len()
                    );
                    let response = self.execute_set(key, value);
                    self.send_response(&response);
                }
                Ok(OpCode::Get) => match self.get_mode {
                    GetMode::Silent => {
                        tracing::debug!(
                            "GET operation from {} for key: {}",
                            self.peer_addr,
                            String::from_utf8_lossy(&key)
                        );
                    }
                    GetMode::Reply => {
                        let response = self.execute_get(&key);
                        self.send_response(&response);
                    }
                },
                Err(unknown) => {
                    tracing::warn!(
                        "Unknown operation code 0x{:02x} from {}",
                        unknown,
                        self.peer_addr
                    );
                    let message = format!("Unknown operation code: 0x{:02x}", unknown);
                    self.send_response(&Response::error(Status::ErrUnknownOp, &message));
                }
            }
        }
    }

    fn execute_set(&self, key: Vec<u8>, value: Vec<u8>) -> Response {
        match self.service.set(key, value) {
            Ok(()) => Response::set_ok(),
            Err(e) => {
                tracing::warn!("SET failed for {}: {}", self.peer_addr, e);
                Response::error(Status::ErrStorage, &e.to_string())
            }
        }
    }

    fn execute_get(&self, key: &[u8]) -> Response {
        match self.service.get(key) {
            Ok(Some(value)) => Response::success(value),
            Ok(None) => Response::not_found(),
            Err(e) => {
                tracing::warn!("GET failed for {}: {}", self.peer_addr, e);
                Response::error(Status::ErrStorage, &e.to_string())
            }
        }
    }

    /// Report a decode failure to the client and end the connection
    fn abort(&mut self, err: QuickDbError) -> Result<()> {
        tracing::warn!("Error reading from {}: {}", self.peer_addr, err);
        let status = status_for_decode_error(&err);
        self.send_response(&Response::error(status, &err.to_string()));
        Err(err)
    }

    /// Send a response to the client
    ///
    /// Delivery is best-effort: a failed write is logged and the read loop
    /// carries on.
    fn send_response(&mut self, response: &Response) {
        if let Err(e) = write_response(&mut self.writer, response) {
            tracing::warn!("Failed to send response to {}: {}", self.peer_addr, e);
        }
    }
}
