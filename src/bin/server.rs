//! QuickDB Server Binary
//!
//! Starts the TCP server for QuickDB.

use std::sync::Arc;

use clap::Parser;
use quickdb::config::{parse_port, DEFAULT_PORT};
use quickdb::{Config, GetMode, KeyValueStore, Server};
use tracing_subscriber::{fmt, EnvFilter};

/// QuickDB Server
#[derive(Parser, Debug)]
#[command(name = "quickdb-server")]
#[command(about = "In-memory key-value store over a binary TCP protocol")]
#[command(version)]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = DEFAULT_PORT)]
    port: String,

    /// Interface to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Answer GET requests with the stored value (silent by default)
    #[arg(long)]
    get_replies: bool,

    /// Maximum number of distinct keys
    #[arg(short, long)]
    max_entries: Option<usize>,

    /// Connection read timeout in milliseconds (0 = none)
    #[arg(long, default_value = "0")]
    read_timeout_ms: u64,

    /// Connection write timeout in milliseconds (0 = none)
    #[arg(long, default_value = "0")]
    write_timeout_ms: u64,
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,quickdb=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .init();

    let args = Args::parse();

    let port = match parse_port(&args.port) {
        Ok(port) => port,
        Err(e) => {
            tracing::error!("{}", e);
            std::process::exit(1);
        }
    };

    tracing::info!("QuickDB Server v{}", quickdb::VERSION);

    let mut builder = Config::builder()
        .listen_addr(format!("{}:{}", args.host, port))
        .read_timeout_ms(args.read_timeout_ms)
        .write_timeout_ms(args.write_timeout_ms)
        .get_mode(if args.get_replies {
            GetMode::Reply
        } else {
            GetMode::Silent
        });
    if let Some(limit) = args.max_entries {
        builder = builder.max_entries(limit);
    }
    let config = builder.build();

    tracing::info!("GET mode: {:?}", config.get_mode);

    let store = Arc::new(KeyValueStore::from_config(&config));

    let server = match Server::bind(config, store) {
        Ok(server) => server,
        Err(e) => {
            tracing::error!("Failed to listen on port {}: {}", port, e);
            std::process::exit(1);
        }
    };

    if let Err(e) = server.run() {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
