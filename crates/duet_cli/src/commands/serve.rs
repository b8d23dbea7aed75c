//! Serve command implementation.

use duet_server::{RelayServer, ServerConfig};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::info;

/// Runs the relay until Ctrl-C.
pub fn run(bind: SocketAddr) -> Result<(), Box<dyn std::error::Error>> {
    let server = RelayServer::new(ServerConfig::new(bind));
    let runtime = tokio::runtime::Runtime::new()?;

    runtime.block_on(async {
        let listener = TcpListener::bind(server.config().bind_addr).await?;
        server
            .serve_with_shutdown(listener, async {
                let _ = tokio::signal::ctrl_c().await;
                info!("shutdown requested");
            })
            .await
    })?;

    let store = server.store();
    info!(
        conversations = store.conversation_count(),
        messages = store.message_count(),
        "relay exited"
    );
    Ok(())
}
