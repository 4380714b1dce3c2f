//! Protocol Module
//!
//! Defines the wire protocol for client-server communication.
//!
//! ## Protocol Format (Simple Binary, big-endian)
//!
//! ### Request Format
//! ```text
//! ┌─────────┬────────────┬───────┬──────────────┬─────────┐
//! │ Op (1)  │ KeyLen (2) │  Key  │ ValueLen (2) │  Value  │
//! └─────────┴────────────┴───────┴──────────────┴─────────┘
//! ```
//! The value length and value are only present for SET.
//!
//! ### Operations
//! - 0x01: SET - key + value
//! - 0x02: GET - key
//!
//! ### Response Format
//! ```text
//! ┌───────────┬──────────┬─────────────────────────────┐
//! │Status (1) │ Len (2)  │         Payload             │
//! └───────────┴──────────┴─────────────────────────────┘
//! ```
//!
//! ### Status Codes
//! - 0x00: SUCCESS
//! - 0x01: NOT_FOUND
//! - 0xFB: unknown operation code
//! - 0xFC: storage error
//! - 0xFD: error reading value
//! - 0xFE: error reading key
//! - 0xFF: error reading operation code

mod codec;
mod request;
mod response;

pub use codec::{
    decode_request, decode_response, encode_request, encode_response, read_key, read_opcode,
    read_request, read_response, read_value, write_request, write_response, MAX_FIELD_LEN,
    RESPONSE_HEADER_SIZE,
};
pub use request::{OpCode, Request};
pub use response::{Response, Status, SET_SUCCESS_MESSAGE};

use crate::error::{Field, QuickDbError};

/// Status byte reported to the client when a request fails to decode
pub fn status_for_decode_error(err: &QuickDbError) -> Status {
    match err {
        QuickDbError::Decode { field, .. } => match field {
            Field::KeyLength | Field::Key => Status::ErrReadKey,
            Field::ValueLength | Field::Value => Status::ErrReadValue,
            _ => Status::ErrReadOp,
        },
        _ => Status::ErrReadOp,
    }
}
