//! # QuickDB
//!
//! An in-memory key-value store served over a compact binary TCP protocol:
//! - One shared map behind a single exclusive lock
//! - Length-prefixed binary request/response frames
//! - One handler thread per client connection
//! - Storage reached through a `Service` trait, so handlers stay storage-agnostic
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     TCP Listener                             │
//! │              (one thread per connection)                     │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                 Connection Handler                           │
//! │     read opcode → key → value → dispatch → respond           │
//! └──────────┬──────────────────────────────────┬───────────────┘
//!            │                                  │
//!            ▼                                  ▼
//!   ┌─────────────────┐                ┌─────────────────┐
//!   │ Protocol Codec  │                │     Service     │
//!   └─────────────────┘                └────────┬────────┘
//!                                               │
//!                                               ▼
//!                                      ┌─────────────────┐
//!                                      │ KeyValueStore   │
//!                                      │    (Mutex)      │
//!                                      └─────────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;

pub mod client;
pub mod network;
pub mod protocol;
pub mod service;
pub mod store;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use client::Client;
pub use config::{Config, GetMode};
pub use error::{QuickDbError, Result};
pub use network::{start_server, Connection, Server};
pub use service::Service;
pub use store::KeyValueStore;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of QuickDB
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
