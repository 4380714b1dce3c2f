//! Codec Tests
//!
//! Tests for request and response encoding/decoding.

use std::io::Cursor;

use quickdb::error::{Field, QuickDbError};
use quickdb::protocol::{
    decode_request, decode_response, encode_request, encode_response, read_key, read_opcode,
    read_request, read_response, read_value, status_for_decode_error, write_request,
    write_response, Request, Response, Status, MAX_FIELD_LEN,
};

// =============================================================================
// Request Encoding/Decoding Tests
// =============================================================================

#[test]
fn test_encode_set_matches_wire_format() {
    let req = Request::Set {
        key: b"key".to_vec(),
        value: b"value".to_vec(),
    };
    let encoded = encode_request(&req).unwrap();

    assert_eq!(
        &encoded[..],
        &[0x01, 0x00, 0x03, b'k', b'e', b'y', 0x00, 0x05, b'v', b'a', b'l', b'u', b'e']
    );
}

#[test]
fn test_encode_get_has_no_value_section() {
    let req = Request::Get {
        key: b"key".to_vec(),
    };
    let encoded = encode_request(&req).unwrap();

    assert_eq!(&encoded[..], &[0x02, 0x00, 0x03, b'k', b'e', b'y']);
}

#[test]
fn test_decode_set() {
    let bytes = [0x01, 0x00, 0x02, b'h', b'i', 0x00, 0x03, 0x00, 0xFF, 0x10];
    let decoded = decode_request(&bytes).unwrap();

    assert_eq!(
        decoded,
        Request::Set {
            key: b"hi".to_vec(),
            value: vec![0x00, 0xFF, 0x10],
        }
    );
}

#[test]
fn test_decode_empty_key_and_value() {
    let bytes = [0x01, 0x00, 0x00, 0x00, 0x00];
    let decoded = decode_request(&bytes).unwrap();

    assert_eq!(
        decoded,
        Request::Set {
            key: Vec::new(),
            value: vec![],
        }
    );
}

#[test]
fn test_encode_decode_binary_value() {
    let binary_value: Vec<u8> = (0..=255).collect();
    let req = Request::Set {
        key: b"bin".to_vec(),
        value: binary_value.clone(),
    };
    let decoded = decode_request(&encode_request(&req).unwrap()).unwrap();

    match decoded {
        Request::Set { key, value } => {
            assert_eq!(key, b"bin");
            assert_eq!(value, binary_value);
        }
        _ => panic!("Expected SET request"),
    }
}

#[test]
fn test_encode_rejects_oversized_key() {
    let req = Request::Get {
        key: vec![b'k'; MAX_FIELD_LEN + 1],
    };
    let err = encode_request(&req).unwrap_err();
    assert!(matches!(
        err,
        QuickDbError::FieldTooLarge {
            field: Field::Key,
            ..
        }
    ));
}

#[test]
fn test_encode_rejects_oversized_value() {
    let req = Request::Set {
        key: b"k".to_vec(),
        value: vec![0; MAX_FIELD_LEN + 1],
    };
    assert!(matches!(
        encode_request(&req),
        Err(QuickDbError::FieldTooLarge {
            field: Field::Value,
            ..
        })
    ));
}

#[test]
fn test_decode_empty_request() {
    let result = decode_request(&[]);
    assert!(matches!(result, Err(QuickDbError::Protocol(_))));
}

#[test]
fn test_decode_unknown_opcode() {
    let bytes = [0x07, 0x00, 0x01, b'k'];
    let err = decode_request(&bytes).unwrap_err();
    assert!(err.to_string().contains("Unknown operation code: 0x07"));
}

// =============================================================================
// Response Encoding/Decoding Tests
// =============================================================================

#[test]
fn test_encode_set_ok_response() {
    let encoded = encode_response(&Response::set_ok()).unwrap();

    let mut expected = vec![0x00, 0x00, 0x0E];
    expected.extend_from_slice(b"SET successful");
    assert_eq!(&encoded[..], &expected[..]);
}

#[test]
fn test_encode_empty_payload_writes_zero_length() {
    let encoded = encode_response(&Response::not_found()).unwrap();
    assert_eq!(&encoded[..], &[0x01, 0x00, 0x00]);
}

#[test]
fn test_encode_decode_error_response() {
    let resp = Response::error(Status::ErrReadKey, "Error reading key: early eof");
    let decoded = decode_response(&encode_response(&resp).unwrap()).unwrap();

    assert_eq!(decoded.status, Status::ErrReadKey);
    assert_eq!(decoded.message(), "Error reading key: early eof");
}

#[test]
fn test_error_response_truncates_long_message() {
    let long = "x".repeat(MAX_FIELD_LEN + 10);
    let resp = Response::error(Status::ErrStorage, &long);
    assert_eq!(resp.payload.len(), MAX_FIELD_LEN);
    assert!(encode_response(&resp).is_ok());
}

#[test]
fn test_status_bytes() {
    assert_eq!(Status::Success as u8, 0x00);
    assert_eq!(Status::NotFound as u8, 0x01);
    assert_eq!(Status::ErrUnknownOp as u8, 0xFB);
    assert_eq!(Status::ErrStorage as u8, 0xFC);
    assert_eq!(Status::ErrReadValue as u8, 0xFD);
    assert_eq!(Status::ErrReadKey as u8, 0xFE);
    assert_eq!(Status::ErrReadOp as u8, 0xFF);
    assert_eq!(Status::try_from(0x42), Err(0x42));
    assert!(Status::Success.is_success());
    assert!(!Status::NotFound.is_success());
}

#[test]
fn test_decode_response_incomplete_header() {
    let result = decode_response(&[0x00, 0x00]);
    assert!(result.unwrap_err().to_string().contains("Incomplete response header"));
}

#[test]
fn test_decode_response_incomplete_payload() {
    let result = decode_response(&[0x00, 0x00, 0x05, b'a']);
    assert!(result.unwrap_err().to_string().contains("Incomplete response payload"));
}

#[test]
fn test_decode_response_unknown_status() {
    let result = decode_response(&[0x42, 0x00, 0x00]);
    assert!(result.unwrap_err().to_string().contains("Unknown response status"));
}

// =============================================================================
// Stream-based I/O Tests
// =============================================================================

#[test]
fn test_read_opcode_clean_eof() {
    let mut cursor = Cursor::new(Vec::<u8>::new());
    assert_eq!(read_opcode(&mut cursor).unwrap(), None);
}

#[test]
fn test_read_request_clean_eof() {
    let mut cursor = Cursor::new(Vec::<u8>::new());
    assert_eq!(read_request(&mut cursor).unwrap(), None);
}

#[test]
fn test_read_key_short_read_is_decode_error() {
    // Declares 5 bytes, supplies 3
    let mut cursor = Cursor::new(vec![0x00, 0x05, b'k', b'e', b'y']);
    let err = read_key(&mut cursor).unwrap_err();

    assert!(matches!(
        err,
        QuickDbError::Decode {
            field: Field::Key,
            ..
        }
    ));
    assert!(err.is_unexpected_eof());
    assert_eq!(status_for_decode_error(&err), Status::ErrReadKey);
}

#[test]
fn test_read_key_accepts_non_utf8_bytes() {
    let mut cursor = Cursor::new(vec![0x00, 0x02, 0xC3, 0x28]);
    assert_eq!(read_key(&mut cursor).unwrap(), vec![0xC3, 0x28]);
}

#[test]
fn test_read_value_missing_length() {
    let mut cursor = Cursor::new(vec![0x00]);
    let err = read_value(&mut cursor).unwrap_err();

    assert!(matches!(
        err,
        QuickDbError::Decode {
            field: Field::ValueLength,
            ..
        }
    ));
    assert_eq!(status_for_decode_error(&err), Status::ErrReadValue);
}

#[test]
fn test_decode_error_status_for_opcode() {
    let err = QuickDbError::decode(
        Field::OpCode,
        std::io::Error::new(std::io::ErrorKind::ConnectionReset, "reset"),
    );
    assert_eq!(status_for_decode_error(&err), Status::ErrReadOp);
}

#[test]
fn test_stream_reads_consecutive_requests() {
    let mut buf = Vec::new();
    let first = Request::Set {
        key: b"a".to_vec(),
        value: b"1".to_vec(),
    };
    let second = Request::Get {
        key: b"a".to_vec(),
    };
    write_request(&mut buf, &first).unwrap();
    write_request(&mut buf, &second).unwrap();

    let mut cursor = Cursor::new(buf);
    assert_eq!(read_request(&mut cursor).unwrap(), Some(first));
    assert_eq!(read_request(&mut cursor).unwrap(), Some(second));
    assert_eq!(read_request(&mut cursor).unwrap(), None);
}

#[test]
fn test_stream_write_read_response() {
    let mut buf = Vec::new();
    write_response(&mut buf, &Response::success(b"value".to_vec())).unwrap();
    write_response(&mut buf, &Response::not_found()).unwrap();

    let mut cursor = Cursor::new(buf);
    let first = read_response(&mut cursor).unwrap();
    assert_eq!(first.status, Status::Success);
    assert_eq!(first.payload, b"value");

    let second = read_response(&mut cursor).unwrap();
    assert_eq!(second.status, Status::NotFound);
    assert!(second.payload.is_empty());
}

#[test]
fn test_read_response_eof_mid_payload() {
    let mut cursor = Cursor::new(vec![0x00, 0x00, 0x04, b'a', b'b']);
    let err = read_response(&mut cursor).unwrap_err();
    assert!(matches!(
        err,
        QuickDbError::Decode {
            field: Field::Payload,
            ..
        }
    ));
}
