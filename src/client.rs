//! Blocking client
//!
//! Speaks the wire protocol over a single TCP connection, one request at a
//! time.

use std::io::{BufReader, BufWriter};
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;

use crate::error::{QuickDbError, Result};
use crate::protocol::{read_response, write_request, Request, Response, Status};

/// Client for a QuickDB server
pub struct Client {
    reader: BufReader<TcpStream>,
    writer: BufWriter<TcpStream>,
}

impl Client {
    /// Connect to a server
    pub fn connect<A: ToSocketAddrs>(addr: A) -> Result<Self> {
        let stream = TcpStream::connect(addr)?;
        stream.set_nodelay(true)?;
        let read_stream = stream.try_clone()?;

        Ok(Self {
            reader: BufReader::new(read_stream),
            writer: BufWriter::new(stream),
        })
    }

    /// Bound how long a reply may take (None = wait forever)
    pub fn set_read_timeout(&self, timeout: Option<Duration>) -> Result<()> {
        self.reader.get_ref().set_read_timeout(timeout)?;
        Ok(())
    }

    /// Send a request without waiting for a reply
    pub fn send(&mut self, request: &Request) -> Result<()> {
        write_request(&mut self.writer, request)
    }

    /// Read the next response frame
    pub fn read_response(&mut self) -> Result<Response> {
        read_response(&mut self.reader)
    }

    /// Store `value` under `key`
    pub fn set(&mut self, key: &[u8], value: &[u8]) -> Result<()> {
        self.send(&Request::Set {
            key: key.to_vec(),
            value: value.to_vec(),
        })?;

        let response = self.read_response()?;
        if response.status.is_success() {
            return Ok(());
        }
        Err(QuickDbError::Server {
            status: response.status,
            message: response.message(),
        })
    }

    /// Fetch the value for `key`
    ///
    /// Only servers running with GET replies enabled answer; against a
    /// silent server this waits until the read timeout.
    pub fn get(&mut self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        self.send(&Request::Get { key: key.to_vec() })?;

        let response = self.read_response()?;
        match response.status {
            Status::Success => Ok(Some(response.payload)),
            Status::NotFound => Ok(None),
            status => Err(QuickDbError::Server {
                status,
                message: response.message(),
            }),
        }
    }
}
