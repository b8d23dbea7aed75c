//! HTTP relay server.

use crate::config::ServerConfig;
use crate::error::ServerResult;
use crate::handler::RequestHandler;
use crate::store::ConversationStore;
use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, RawQuery, State},
    http::{header, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use duet_protocol::{RawResponse, JSON_CONTENT_TYPE, MESSAGES_PATH};
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

/// The relay server.
///
/// Serves `POST /messages` (append) and `GET /messages` (read) over HTTP
/// and answers every other path with 404. The same contract is available
/// in-process through [`RelayServer::dispatch`].
///
/// # Example
///
/// ```
/// use duet_server::{RelayServer, ServerConfig};
///
/// let server = RelayServer::new(ServerConfig::default());
/// let reply = server.dispatch(
///     "POST",
///     "/messages",
///     br#"{"from":"a","to":"b","timestamp":"2024-01-01T10:00:00+00:00","message":"hi"}"#,
/// );
/// assert_eq!(reply.status, 201);
/// assert_eq!(server.store().message_count(), 1);
/// ```
pub struct RelayServer {
    config: ServerConfig,
    handler: Arc<RequestHandler>,
}

impl RelayServer {
    /// Creates a relay server with an empty store.
    pub fn new(config: ServerConfig) -> Self {
        Self::with_store(config, Arc::new(ConversationStore::new()))
    }

    /// Creates a relay server with an existing store.
    pub fn with_store(config: ServerConfig, store: Arc<ConversationStore>) -> Self {
        Self {
            config,
            handler: Arc::new(RequestHandler::new(store)),
        }
    }

    /// Returns the server configuration.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Returns the conversation store.
    pub fn store(&self) -> &Arc<ConversationStore> {
        self.handler.store()
    }

    /// Handles a request without going through the network.
    pub fn dispatch(&self, method: &str, target: &str, body: &[u8]) -> RawResponse {
        self.handler.dispatch(method, target, body)
    }

    /// Builds the axum router for this server.
    pub fn router(&self) -> Router {
        let messages = get(fetch_messages)
            .post(append_message)
            .fallback(not_found);

        Router::new()
            .route(MESSAGES_PATH, messages)
            .fallback(not_found)
            .layer(DefaultBodyLimit::max(self.config.max_body_bytes))
            .with_state(Arc::clone(&self.handler))
    }

    /// Serves requests on an already bound listener until the process ends.
    pub async fn serve(&self, listener: TcpListener) -> ServerResult<()> {
        info!(addr = %listener.local_addr()?, "relay server listening");
        axum::serve(listener, self.router()).await?;
        Ok(())
    }

    /// Serves requests until `shutdown` completes.
    pub async fn serve_with_shutdown<F>(&self, listener: TcpListener, shutdown: F) -> ServerResult<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        info!(addr = %listener.local_addr()?, "relay server listening");
        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await?;
        info!("relay server stopped");
        Ok(())
    }

    /// Binds the configured address and serves requests.
    pub async fn run(&self) -> ServerResult<()> {
        let listener = TcpListener::bind(self.config.bind_addr).await?;
        self.serve(listener).await
    }
}

async fn fetch_messages(
    State(handler): State<Arc<RequestHandler>>,
    RawQuery(query): RawQuery,
) -> Response {
    into_response(handler.handle_fetch(query.as_deref()))
}

async fn append_message(State(handler): State<Arc<RequestHandler>>, body: Bytes) -> Response {
    into_response(handler.handle_append(&body))
}

async fn not_found(State(handler): State<Arc<RequestHandler>>, uri: Uri) -> Response {
    into_response(handler.handle_not_found(uri.path()))
}

fn into_response(raw: RawResponse) -> Response {
    let status = StatusCode::from_u16(raw.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, [(header::CONTENT_TYPE, JSON_CONTENT_TYPE)], raw.body).into_response()
}
