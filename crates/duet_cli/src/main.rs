//! Duet CLI
//!
//! Runs the relay and talks to it from the command line.
//!
//! # Commands
//!
//! - `serve` - Run the relay server
//! - `send` - Send one message
//! - `watch` - Poll a conversation (or every conversation) and print new messages

mod commands;

use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use tracing_subscriber::EnvFilter;

/// Two-party message relay.
#[derive(Parser)]
#[command(name = "duet")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(global = true, short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the relay server
    Serve {
        /// Address to listen on
        #[arg(short, long, default_value = "127.0.0.1:20202")]
        bind: SocketAddr,
    },

    /// Send one message
    Send {
        /// Relay base URL
        #[arg(short, long, default_value = "http://127.0.0.1:20202")]
        server: String,

        /// Sender
        #[arg(long)]
        from: String,

        /// Recipient
        #[arg(long)]
        to: String,

        /// Message text
        message: String,
    },

    /// Print new messages as they arrive
    Watch {
        /// Relay base URL
        #[arg(short, long, default_value = "http://127.0.0.1:20202")]
        server: String,

        /// One participant of the conversation to watch
        #[arg(long, requires = "to")]
        from_user: Option<String>,

        /// The other participant of the conversation to watch
        #[arg(long, requires = "from_user")]
        to: Option<String>,

        /// Only show messages after this timestamp
        #[arg(long)]
        since: Option<String>,

        /// Poll interval in milliseconds
        #[arg(long, default_value = "2000", value_parser = clap::value_parser!(u64).range(1..))]
        interval_ms: u64,

        /// Request timeout in milliseconds
        #[arg(long, default_value = "10000", value_parser = clap::value_parser!(u64).range(1..))]
        timeout_ms: u64,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Serve { bind } => {
            commands::serve::run(bind)?;
        }
        Commands::Send {
            server,
            from,
            to,
            message,
        } => {
            commands::send::run(&server, &from, &to, &message)?;
        }
        Commands::Watch {
            server,
            from_user,
            to,
            since,
            interval_ms,
            timeout_ms,
        } => {
            let options = commands::watch::WatchOptions {
                server,
                pair: from_user.zip(to),
                since,
                interval_ms,
                timeout_ms,
            };
            commands::watch::run(options)?;
        }
    }

    Ok(())
}
