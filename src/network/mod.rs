//! Network Module
//!
//! TCP server and client handling.
//!
//! ## Architecture
//! - Single acceptor loop
//! - One handler thread per connection
//! - Requests routed through a `Service`

mod connection;
mod server;

pub use connection::Connection;
pub use server::{start_server, Server};
