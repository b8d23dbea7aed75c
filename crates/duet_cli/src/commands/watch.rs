//! Watch command implementation.

use duet_protocol::{Message, Scope};
use duet_sync_engine::{ChannelSink, PollConfig, Poller};
use std::thread;
use std::time::Duration;
use tracing::info;

/// Options for the watch command.
pub struct WatchOptions {
    /// Relay base URL.
    pub server: String,
    /// Conversation to watch; every conversation if absent.
    pub pair: Option<(String, String)>,
    /// Initial cursor.
    pub since: Option<String>,
    /// Poll interval in milliseconds.
    pub interval_ms: u64,
    /// Request timeout in milliseconds.
    pub timeout_ms: u64,
}

impl WatchOptions {
    fn poll_config(&self) -> PollConfig {
        let scope = match &self.pair {
            Some((a, b)) => Scope::pair(a.as_str(), b.as_str()),
            None => Scope::All,
        };
        let mut config = PollConfig::new(self.server.as_str())
            .with_scope(scope)
            .with_poll_interval(Duration::from_millis(self.interval_ms))
            .with_timeout(Duration::from_millis(self.timeout_ms));
        if let Some(since) = &self.since {
            config = config.with_since(since.as_str());
        }
        config
    }
}

/// Polls until Ctrl-C, printing every delivered message.
pub fn run(options: WatchOptions) -> Result<(), Box<dyn std::error::Error>> {
    let (sink, batches) = ChannelSink::unbounded();
    let poller = Poller::connect(options.poll_config(), sink);

    let printer = thread::Builder::new()
        .name("duet-printer".into())
        .spawn(move || {
            for batch in batches.iter() {
                for message in &batch {
                    print_message(message);
                }
            }
        })?;

    poller.start()?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(tokio::signal::ctrl_c())?;
    info!("shutdown requested");

    let stopped = poller.stop();
    drop(poller);
    // A detached poll thread still holds the sender; do not wait on it.
    if stopped && printer.join().is_err() {
        return Err("printer thread panicked".into());
    }
    Ok(())
}

fn print_message(message: &Message) {
    println!(
        "[{}] {} -> {}: {}",
        message.timestamp, message.sender, message.recipient, message.body
    );
}
