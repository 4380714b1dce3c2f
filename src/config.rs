//! Configuration for QuickDB
//!
//! Centralized configuration with sensible defaults.

use crate::error::{QuickDbError, Result};

/// Default TCP port
pub const DEFAULT_PORT: &str = "8080";

/// How the connection handler treats GET requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GetMode {
    /// Read the key and send nothing back (wire-compatible with existing clients)
    ///
    /// Only GET is affected: an unknown opcode is still answered with
    /// `ErrUnknownOp` in either mode.
    #[default]
    Silent,

    /// Look the key up and reply with the value or NOT_FOUND
    Reply,
}

/// Main configuration for a QuickDB server
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Network Configuration
    // -------------------------------------------------------------------------
    /// TCP listen address
    pub listen_addr: String,

    /// Connection read timeout (milliseconds, 0 = none)
    pub read_timeout_ms: u64,

    /// Connection write timeout (milliseconds, 0 = none)
    pub write_timeout_ms: u64,

    // -------------------------------------------------------------------------
    // Protocol Configuration
    // -------------------------------------------------------------------------
    /// GET handling
    pub get_mode: GetMode,

    // -------------------------------------------------------------------------
    // Store Configuration
    // -------------------------------------------------------------------------
    /// Max number of distinct keys (None = unlimited)
    pub max_entries: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: format!("0.0.0.0:{}", DEFAULT_PORT),
            read_timeout_ms: 0,
            write_timeout_ms: 0,
            get_mode: GetMode::Silent,
            max_entries: None,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Default config listening on all interfaces at `port`
    ///
    /// `port` is a bare port string such as `"8080"`.
    pub fn with_port(port: &str) -> Result<Self> {
        let port = parse_port(port)?;
        Ok(Self {
            listen_addr: format!("0.0.0.0:{}", port),
            ..Self::default()
        })
    }
}

/// Validate a bare port string
pub fn parse_port(port: &str) -> Result<u16> {
    port.trim()
        .parse::<u16>()
        .map_err(|e| QuickDbError::Config(format!("invalid port {:?}: {}", port, e)))
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the TCP listen address (host:port)
    pub fn listen_addr(mut self, addr: impl Into<String>) -> Self {
        self.config.listen_addr = addr.into();
        self
    }

    /// Set the read timeout (in milliseconds)
    pub fn read_timeout_ms(mut self, ms: u64) -> Self {
        self.config.read_timeout_ms = ms;
        self
    }

    /// Set the write timeout (in milliseconds)
    pub fn write_timeout_ms(mut self, ms: u64) -> Self {
        self.config.write_timeout_ms = ms;
        self
    }

    /// Set how GET requests are handled
    pub fn get_mode(mut self, mode: GetMode) -> Self {
        self.config.get_mode = mode;
        self
    }

    /// Cap the number of distinct keys the store accepts
    pub fn max_entries(mut self, limit: usize) -> Self {
        self.config.max_entries = Some(limit);
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
