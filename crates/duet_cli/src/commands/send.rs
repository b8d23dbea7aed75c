//! Send command implementation.

use duet_sync_engine::{send_message, HttpTransport, UreqClient};
use std::time::Duration;

/// Sends one message and prints the stored record.
pub fn run(server: &str, from: &str, to: &str, body: &str) -> Result<(), Box<dyn std::error::Error>> {
    let transport = HttpTransport::new(server, UreqClient::new(Duration::from_secs(10)));
    let message =
        send_message(&transport, from, to, body).map_err(|e| format!("send failed: {}", e))?;

    println!("{}", serde_json::to_string_pretty(&message)?);
    Ok(())
}
