//! Error types for QuickDB
//!
//! Provides a unified error type for all operations.

use std::fmt;

use thiserror::Error;

use crate::protocol::Status;

/// Result type alias using QuickDbError
pub type Result<T> = std::result::Result<T, QuickDbError>;

/// Wire fields that can fail to decode or encode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    OpCode,
    KeyLength,
    Key,
    ValueLength,
    Value,
    Status,
    PayloadLength,
    Payload,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::OpCode => "operation code",
            Field::KeyLength => "key length",
            Field::Key => "key",
            Field::ValueLength => "value length",
            Field::Value => "value",
            Field::Status => "status",
            Field::PayloadLength => "payload length",
            Field::Payload => "payload",
        };
        f.write_str(name)
    }
}

/// Unified error type for QuickDB operations
#[derive(Debug, Error)]
pub enum QuickDbError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Protocol Errors
    // -------------------------------------------------------------------------
    #[error("Error reading {field}: {source}")]
    Decode {
        field: Field,
        #[source]
        source: std::io::Error,
    },

    #[error("{field} too large: {len} bytes (max 65535)")]
    FieldTooLarge { field: Field, len: usize },

    #[error("Protocol error: {0}")]
    Protocol(String),

    #[error("Server replied {status:?}: {message}")]
    Server { status: Status, message: String },

    // -------------------------------------------------------------------------
    // Storage Errors
    // -------------------------------------------------------------------------
    #[error("Store is full: limit of {limit} entries reached")]
    StoreFull { limit: usize },

    #[error("Storage error: {0}")]
    Storage(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl QuickDbError {
    /// Build a decode error for `field`
    pub fn decode(field: Field, source: std::io::Error) -> Self {
        QuickDbError::Decode { field, source }
    }

    /// True for errors produced by the storage layer
    pub fn is_storage(&self) -> bool {
        matches!(self, QuickDbError::StoreFull { .. } | QuickDbError::Storage(_))
    }

    /// True when the peer closed the stream in the middle of a field
    pub fn is_unexpected_eof(&self) -> bool {
        match self {
            QuickDbError::Decode { source, .. } | QuickDbError::Io(source) => {
                source.kind() == std::io::ErrorKind::UnexpectedEof
            }
            _ => false,
        }
    }
}
