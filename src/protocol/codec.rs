//! Protocol codec
//!
//! Encoding and decoding functions for the wire protocol.
//!
//! ## Wire Format
//!
//! All integers are big-endian.
//!
//! ### Request Format
//! ```text
//! ┌─────────┬────────────┬───────┬──────────────┬─────────┐
//! │ Op (1)  │ KeyLen (2) │  Key  │ ValueLen (2) │  Value  │
//! └─────────┴────────────┴───────┴──────────────┴─────────┘
//!                                 └─── SET only ─────────┘
//! ```
//!
//! ### Response Format
//! ```text
//! ┌───────────┬──────────┬─────────────────────────────┐
//! │Status (1) │ Len (2)  │         Payload             │
//! └───────────┴──────────┴─────────────────────────────┘
//! ```

use std::io::{ErrorKind, Read, Write};

use bytes::{Buf, BufMut, Bytes, BytesMut};

use super::{OpCode, Request, Response, Status};
use crate::error::{Field, QuickDbError, Result};

/// Response header size: 1 byte status + 2 bytes length
pub const RESPONSE_HEADER_SIZE: usize = 3;

/// Largest key, value or payload a frame can carry
pub const MAX_FIELD_LEN: usize = u16::MAX as usize;

// =============================================================================
// Request Encoding/Decoding
// =============================================================================

/// Encode a request to bytes
pub fn encode_request(request: &Request) -> Result<Bytes> {
    let mut buf = match request {
        Request::Set { key, value } => BytesMut::with_capacity(5 + key.len() + value.len()),
        Request::Get { key } => BytesMut::with_capacity(3 + key.len()),
    };

    buf.put_u8(request.op_code() as u8);
    put_field(&mut buf, Field::Key, request.key())?;
    if let Request::Set { value, .. } = request {
        put_field(&mut buf, Field::Value, value)?;
    }

    Ok(buf.freeze())
}

/// Decode a single request from bytes
///
/// Bytes after the first complete frame are ignored.
pub fn decode_request(bytes: &[u8]) -> Result<Request> {
    let mut cursor = bytes;
    read_request(&mut cursor)?
        .ok_or_else(|| QuickDbError::Protocol("Empty request".to_string()))
}

// =============================================================================
// Response Encoding/Decoding
// =============================================================================

/// Encode a response to bytes
///
/// An empty payload is sent as a zero length with nothing after it.
pub fn encode_response(response: &Response) -> Result<Bytes> {
    let mut buf = BytesMut::with_capacity(RESPONSE_HEADER_SIZE + response.payload.len());
    buf.put_u8(response.status as u8);
    put_field(&mut buf, Field::Payload, &response.payload)?;
    Ok(buf.freeze())
}

/// Decode a response from bytes
pub fn decode_response(bytes: &[u8]) -> Result<Response> {
    if bytes.len() < RESPONSE_HEADER_SIZE {
        return Err(QuickDbError::Protocol(format!(
            "Incomplete response header: expected {} bytes, got {}",
            RESPONSE_HEADER_SIZE,
            bytes.len()
        )));
    }

    let mut buf = bytes;
    let status = parse_status(buf.get_u8())?;
    let payload_len = buf.get_u16() as usize;

    if buf.remaining() < payload_len {
        return Err(QuickDbError::Protocol(format!(
            "Incomplete response payload: expected {} bytes, got {}",
            payload_len,
            buf.remaining()
        )));
    }

    Ok(Response {
        status,
        payload: buf[..payload_len].to_vec(),
    })
}

// =============================================================================
// Stream-based I/O helpers
// =============================================================================

/// Read the opcode that starts a frame
///
/// Returns `Ok(None)` when the stream ends cleanly before any byte of a new
/// frame arrives.
pub fn read_opcode<R: Read>(reader: &mut R) -> Result<Option<u8>> {
    let mut byte = [0u8; 1];
    loop {
        match reader.read(&mut byte) {
            Ok(0) => return Ok(None),
            Ok(_) => return Ok(Some(byte[0])),
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(QuickDbError::decode(Field::OpCode, e)),
        }
    }
}

/// Read a length-prefixed key
///
/// Keys are opaque bytes; only a short read is a failure.
pub fn read_key<R: Read>(reader: &mut R) -> Result<Vec<u8>> {
    read_prefixed(reader, Field::KeyLength, Field::Key)
}

/// Read a length-prefixed value
pub fn read_value<R: Read>(reader: &mut R) -> Result<Vec<u8>> {
    read_prefixed(reader, Field::ValueLength, Field::Value)
}

/// Read a complete request from a stream
///
/// Blocks until a complete request is received, the stream ends cleanly
/// (`Ok(None)`), or an error occurs.
pub fn read_request<R: Read>(reader: &mut R) -> Result<Option<Request>> {
    let Some(op) = read_opcode(reader)? else {
        return Ok(None);
    };
    let key = read_key(reader)?;

    match OpCode::try_from(op) {
        Ok(OpCode::Set) => {
            let value = read_value(reader)?;
            Ok(Some(Request::Set { key, value }))
        }
        Ok(OpCode::Get) => Ok(Some(Request::Get { key })),
        Err(unknown) => Err(QuickDbError::Protocol(format!(
            "Unknown operation code: 0x{:02x}",
            unknown
        ))),
    }
}

/// Write a request to a stream
pub fn write_request<W: Write>(writer: &mut W, request: &Request) -> Result<()> {
    let bytes = encode_request(request)?;
    writer.write_all(&bytes)?;
    writer.flush()?;
    Ok(())
}

/// Read a complete response from a stream
pub fn read_response<R: Read>(reader: &mut R) -> Result<Response> {
    let mut status = [0u8; 1];
    reader
        .read_exact(&mut status)
        .map_err(|e| QuickDbError::decode(Field::Status, e))?;
    let status = parse_status(status[0])?;
    let payload = read_prefixed(reader, Field::PayloadLength, Field::Payload)?;

    Ok(Response { status, payload })
}

/// Write a response to a stream
pub fn write_response<W: Write>(writer: &mut W, response: &Response) -> Result<()> {
    let bytes = encode_response(response)?;
    writer.write_all(&bytes)?;
    writer.flush()?;
    Ok(())
}

// =============================================================================
// Helpers
// =============================================================================

fn put_field(buf: &mut BytesMut, field: Field, bytes: &[u8]) -> Result<()> {
    let len = u16::try_from(bytes.len()).map_err(|_| QuickDbError::FieldTooLarge {
        field,
        len: bytes.len(),
    })?;
    buf.put_u16(len);
    buf.put_slice(bytes);
    Ok(())
}

fn read_prefixed<R: Read>(reader: &mut R, len_field: Field, field: Field) -> Result<Vec<u8>> {
    let mut len = [0u8; 2];
    reader
        .read_exact(&mut len)
        .map_err(|e| QuickDbError::decode(len_field, e))?;

    let mut bytes = vec![0u8; u16::from_be_bytes(len) as usize];
    reader
        .read_exact(&mut bytes)
        .map_err(|e| QuickDbError::decode(field, e))?;
    Ok(bytes)
}

fn parse_status(byte: u8) -> Result<Status> {
    Status::try_from(byte)
        .map_err(|b| QuickDbError::Protocol(format!("Unknown response status: 0x{:02x}", b)))
}
