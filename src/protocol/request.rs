//! Request definitions
//!
//! Represents requests from clients.

/// Operation codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum OpCode {
    Set = 0x01,
    Get = 0x02,
}

impl TryFrom<u8> for OpCode {
    type Error = u8;

    fn try_from(byte: u8) -> Result<Self, Self::Error> {
        match byte {
            0x01 => Ok(OpCode::Set),
            0x02 => Ok(OpCode::Get),
            other => Err(other),
        }
    }
}

/// A parsed request frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// Store a value under a key
    Set { key: Vec<u8>, value: Vec<u8> },

    /// Fetch a value by key
    Get { key: Vec<u8> },
}

impl Request {
    /// Get the operation code
    pub fn op_code(&self) -> OpCode {
        match self {
            Request::Set { .. } => OpCode::Set,
            Request::Get { .. } => OpCode::Get,
        }
    }

    pub fn key(&self) -> &[u8] {
        match self {
            Request::Set { key, .. } | Request::Get { key } => key,
        }
    }
}
