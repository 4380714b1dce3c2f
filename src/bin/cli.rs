//! QuickDB CLI Client
//!
//! Command-line interface for interacting with QuickDB.

use std::time::Duration;

use clap::{Parser, Subcommand};
use quickdb::Client;

/// QuickDB CLI
#[derive(Parser, Debug)]
#[command(name = "quickdb-cli")]
#[command(about = "CLI for the QuickDB key-value store")]
struct Args {
    /// Server address
    #[arg(short, long, default_value = "127.0.0.1:8080")]
    server: String,

    /// How long to wait for a reply, in milliseconds
    #[arg(short, long, default_value = "5000")]
    timeout_ms: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Get a value by key (server must run with --get-replies)
    Get {
        /// The key to get
        key: String,
    },

    /// Set a key-value pair
    Set {
        /// The key to set
        key: String,

        /// The value to set
        value: String,
    },
}

fn main() {
    let args = Args::parse();

    if let Err(e) = run(args) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> quickdb::Result<()> {
    let mut client = Client::connect(&args.server)?;
    client.set_read_timeout(Some(Duration::from_millis(args.timeout_ms)))?;

    match args.command {
        Commands::Set { key, value } => {
            client.set(key.as_bytes(), value.as_bytes())?;
            println!("OK");
        }
        Commands::Get { key } => match client.get(key.as_bytes())? {
            Some(value) => println!("{}", String::from_utf8_lossy(&value)),
            None => println!("(nil)"),
        },
    }

    Ok(())
}
