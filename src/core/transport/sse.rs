//! SSE transport implementation.
//!
//! HTTP + Server-Sent-Events, the MCP 2024-11-05 remote transport:
//! - `GET /sse` opens a session. The first event names the endpoint the
//!   client must POST its messages to; every server message follows as an
//!   `event: message`.
//! - `POST /messages?sessionId=<id>` delivers one client JSON-RPC message.
//!
//! Each session runs its own rmcp service, bound to its own credentials. A
//! bearer token on a POST replaces that session's API key.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
    response::{
        IntoResponse, Response,
        sse::{Event, KeepAlive, Sse},
    },
    routing::{get, post},
};
use futures::{
    SinkExt, Stream, StreamExt,
    channel::mpsc,
    future, stream,
};
use rmcp::{
    ServiceExt,
    model::{ClientJsonRpcMessage, ServerJsonRpcMessage},
};
use serde::Deserialize;
use std::{collections::HashMap, sync::Arc, time::Duration};
use tokio::sync::RwLock;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use super::{TransportError, TransportResult, config::SseConfig};
use crate::core::McpServer;
use crate::core::credentials::{SessionCredentials, bearer_token};

/// Buffered messages per direction before senders wait.
const CHANNEL_CAPACITY: usize = 64;

/// Live sessions keyed by session id.
type Sessions = Arc<RwLock<HashMap<String, SessionHandle>>>;

/// SSE transport handler.
pub struct SseTransport {
    config: SseConfig,
}

/// The POST side of one session.
#[derive(Clone)]
struct SessionHandle {
    /// Feeds client messages into the session's rmcp service.
    to_server: mpsc::Sender<ClientJsonRpcMessage>,

    /// Credentials the session's tools resolve their key from.
    credentials: SessionCredentials,
}

/// Application state shared across HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    /// Template server; each session gets a clone with its own credentials.
    server: McpServer,
    sessions: Sessions,
    sse_path: Arc<str>,
    message_path: Arc<str>,
    keep_alive: Duration,
}

impl AppState {
    /// Create handler state for the given server and paths.
    pub fn new(server: McpServer, config: &SseConfig) -> Self {
        Self {
            server,
            sessions: Arc::new(RwLock::new(HashMap::new())),
            sse_path: Arc::from(config.sse_path.as_str()),
            message_path: Arc::from(config.message_path.as_str()),
            keep_alive: Duration::from_secs(config.keep_alive_secs),
        }
    }

    /// Number of open sessions.
    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

/// Removes its session when the event stream is dropped.
struct SessionGuard {
    id: String,
    sessions: Sessions,
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        let id = std::mem::take(&mut self.id);
        let sessions = self.sessions.clone();
        if let Ok(handle) = tokio::runtime::Handle::try_current() {
            handle.spawn(async move {
                if sessions.write().await.remove(&id).is_some() {
                    info!(session_id = %id, "SSE client disconnected");
                }
            });
        }
    }
}

#[derive(Debug, Deserialize)]
struct MessageQuery {
    #[serde(rename = "sessionId")]
    session_id: Option<String>,
}

impl SseTransport {
    /// Create a new SSE transport with the given config.
    pub fn new(config: SseConfig) -> Self {
        Self { config }
    }

    /// Get the bind address.
    pub fn address(&self) -> String {
        format!("{}:{}", self.config.host, self.config.port)
    }

    /// Build the axum router for the given state.
    pub fn router(&self, state: AppState) -> Router {
        let app = Router::new()
            .route(&self.config.sse_path, get(handle_sse))
            .route(&self.config.message_path, post(handle_message))
            .route("/health", get(health_check))
            .route("/", get(root_handler))
            .with_state(state);

        let app = if self.config.enable_cors {
            let cors = CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any);
            app.layer(cors)
        } else {
            app
        };

        app.layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
    }

    /// Run the SSE transport until the listener fails.
    pub async fn run(self, server: McpServer) -> TransportResult<()> {
        let addr = self.address();
        if let Some(notice) = missing_key_notice(&server) {
            warn!("{}", notice);
        }
        let state = AppState::new(server, &self.config);
        let app = self.router(state);

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| TransportError::bind(&addr, e))?;

        let cors_status = if self.config.enable_cors {
            "enabled"
        } else {
            "disabled"
        };
        info!("Ready - listening on {} (SSE, CORS {})", addr, cors_status);
        info!("  → Events:   GET {}", self.config.sse_path);
        info!("  → Messages: POST {}?sessionId=<id>", self.config.message_path);
        info!("  → Health:   GET /health");

        axum::serve(listener, app)
            .await
            .map_err(|e| TransportError::http(e.to_string()))?;

        Ok(())
    }
}

/// Startup notice for servers without a configured fallback key.
fn missing_key_notice(server: &McpServer) -> Option<&'static str> {
    server.config().credentials.meetgeek_api_key.is_none().then_some(
        "MEETGEEK_API_KEY not set - every SSE client must send \
         'Authorization: Bearer <key>' with its messages",
    )
}

fn authorization(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(bearer_token)
}

fn json_error(status: StatusCode, message: &str) -> Response {
    (status, Json(serde_json::json!({ "error": message }))).into_response()
}

/// Open a session and stream its server messages.
#[instrument(skip_all, fields(session_id))]
async fn handle_sse(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Sse<impl Stream<Item = Result<Event, axum::Error>>> {
    let session_id = Uuid::new_v4().to_string();
    tracing::Span::current().record("session_id", session_id.as_str());

    let credentials = state.server.session_credentials();
    if let Some(token) = authorization(&headers) {
        credentials.set_bearer(token).await;
    }

    let (to_server_tx, to_server_rx) = mpsc::channel::<ClientJsonRpcMessage>(CHANNEL_CAPACITY);
    let (to_client_tx, to_client_rx) = mpsc::channel::<ServerJsonRpcMessage>(CHANNEL_CAPACITY);

    state.sessions.write().await.insert(
        session_id.clone(),
        SessionHandle {
            to_server: to_server_tx,
            credentials: credentials.clone(),
        },
    );
    info!("SSE client connected");

    let server = state.server.with_credentials(credentials);
    let sessions = state.sessions.clone();
    let id = session_id.clone();
    tokio::spawn(async move {
        match server.serve((to_client_tx, to_server_rx)).await {
            Ok(service) => {
                if let Err(e) = service.waiting().await {
                    warn!(session_id = %id, "Session task failed: {}", e);
                }
            }
            Err(e) => warn!(session_id = %id, "Session initialization failed: {}", e),
        }
        sessions.write().await.remove(&id);
        info!(session_id = %id, "Session closed");
    });

    let endpoint = Event::default()
        .event("endpoint")
        .data(format!("{}?sessionId={}", state.message_path, session_id));

    let guard = SessionGuard {
        id: session_id,
        sessions: state.sessions.clone(),
    };
    let messages = to_client_rx.map(move |message| {
        let _session = &guard;
        Event::default().event("message").json_data(&message)
    });

    let events = stream::once(future::ready(Ok(endpoint))).chain(messages);
    Sse::new(events).keep_alive(KeepAlive::new().interval(state.keep_alive))
}

/// Deliver one client message to its session.
#[instrument(skip_all, fields(session_id))]
async fn handle_message(
    State(state): State<AppState>,
    Query(query): Query<MessageQuery>,
    headers: HeaderMap,
    Json(message): Json<ClientJsonRpcMessage>,
) -> Response {
    let Some(session_id) = query.session_id.filter(|id| !id.is_empty()) else {
        return json_error(StatusCode::BAD_REQUEST, "Missing sessionId");
    };
    tracing::Span::current().record("session_id", session_id.as_str());

    let Some(session) = state.sessions.read().await.get(&session_id).cloned() else {
        warn!("Message for unknown session");
        return json_error(StatusCode::NOT_FOUND, "Unknown session");
    };

    if let Some(token) = authorization(&headers) {
        session.credentials.set_bearer(token).await;
    }

    let mut to_server = session.to_server;
    match to_server.send(message).await {
        Ok(()) => (StatusCode::ACCEPTED, "Accepted").into_response(),
        Err(e) => {
            warn!("Session channel closed: {}", e);
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
        }
    }
}

/// Root handler - provides API info.
async fn root_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "name": state.server.name(),
        "version": state.server.version(),
        "transport": "SSE",
        "endpoints": {
            "sse": &*state.sse_path,
            "messages": &*state.message_path,
            "health": "/health"
        },
        "protocol": "MCP 2024-11-05 (HTTP+SSE)"
    }))
}

/// Health check endpoint.
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "sessions": state.session_count().await
    }))
}
