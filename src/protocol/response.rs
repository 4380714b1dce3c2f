//! Response definitions
//!
//! Represents responses to clients.

/// Payload sent after a successful SET
pub const SET_SUCCESS_MESSAGE: &str = "SET successful";

/// Response status codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Status {
    Success = 0x00,
    NotFound = 0x01,
    ErrUnknownOp = 0xFB,
    ErrStorage = 0xFC,
    ErrReadValue = 0xFD,
    ErrReadKey = 0xFE,
    ErrReadOp = 0xFF,
}

impl Status {
    pub fn is_success(self) -> bool {
        self == Status::Success
    }
}

impl TryFrom<u8> for Status {
    type Error = u8;

    fn try_from(byte: u8) -> Result<Self, Self::Error> {
        match byte {
            0x00 => Ok(Status::Success),
            0x01 => Ok(Status::NotFound),
            0xFB => Ok(Status::ErrUnknownOp),
            0xFC => Ok(Status::ErrStorage),
            0xFD => Ok(Status::ErrReadValue),
            0xFE => Ok(Status::ErrReadKey),
            0xFF => Ok(Status::ErrReadOp),
            other => Err(other),
        }
    }
}

/// A response to send to client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// Status code
    pub status: Status,

    /// Payload (value for GET, message otherwise; may be empty)
    pub payload: Vec<u8>,
}

impl Response {
    /// Create a SUCCESS response carrying `payload`
    pub fn success(payload: Vec<u8>) -> Self {
        Self {
            status: Status::Success,
            payload,
        }
    }

    /// The fixed acknowledgement for a stored SET
    pub fn set_ok() -> Self {
        Self::success(SET_SUCCESS_MESSAGE.as_bytes().to_vec())
    }

    /// Create a NOT_FOUND response
    pub fn not_found() -> Self {
        Self {
            status: Status::NotFound,
            payload: Vec::new(),
        }
    }

    /// Create an error response with a human-readable message
    ///
    /// Messages longer than a frame can carry are cut at a char boundary.
    pub fn error(status: Status, message: &str) -> Self {
        let max = u16::MAX as usize;
        let mut end = message.len().min(max);
        while !message.is_char_boundary(end) {
            end -= 1;
        }
        Self {
            status,
            payload: message[..end].as_bytes().to_vec(),
        }
    }

    /// Payload as text, for messages
    pub fn message(&self) -> String {
        String::from_utf8_lossy(&self.payload).into_owned()
    }
}
