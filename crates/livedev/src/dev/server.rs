//! Development server with live reload.
//!
//! Serves the root directory and exposes two push endpoints: a Server-Sent
//! Events stream used by the injected client, and a WebSocket alternative
//! sending `reload:<timestamp>` text frames.

use crate::dev::inject::{RELOAD_SCRIPT, RELOAD_SCRIPT_PATH};
use crate::dev::session::ClientSession;
use crate::dev::static_files::handle_request;
use crate::dev::SharedState;
use crate::error::{CliError, Result};
use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    http::header,
    response::{
        sse::{Event, Sse},
        IntoResponse, Response,
    },
    routing::get,
    Router,
};
use std::convert::Infallible;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio_stream::Stream;
use tower_http::cors::{Any, CorsLayer};

/// Route of the Server-Sent Events endpoint.
pub const EVENTS_PATH: &str = "/__livedev__/events";

/// Route of the WebSocket endpoint.
pub const WS_PATH: &str = "/__livedev__/ws";

/// Development server.
pub struct DevServer {
    /// Shared application state
    state: SharedState,
}

impl DevServer {
    /// Create a new development server.
    pub fn new(state: SharedState) -> Self {
        Self { state }
    }

    /// Bind the listen address.
    ///
    /// # Errors
    ///
    /// Returns error if the address cannot be bound
    pub async fn bind(addr: std::net::SocketAddr) -> Result<TcpListener> {
        TcpListener::bind(addr)
            .await
            .map_err(|e| CliError::Server(format!("Failed to bind to {}: {}", addr, e)))
    }

    /// Serve connections on an already bound listener until the task is
    /// dropped or the server fails.
    ///
    /// Open event streams are cut off abruptly when the process exits; there
    /// is no graceful drain.
    pub async fn run(self, listener: TcpListener) -> Result<()> {
        let app = self.router();

        axum::serve(listener, app)
            .await
            .map_err(|e| CliError::Server(format!("Server error: {}", e)))
    }

    /// Build the axum router with all routes.
    pub fn router(&self) -> Router {
        Router::new()
            .route(EVENTS_PATH, get(handle_sse))
            .route(WS_PATH, get(handle_ws))
            .route(RELOAD_SCRIPT_PATH, get(handle_reload_script))
            .fallback(handle_request)
            .layer(
                // CORS: Allow all origins for dev (standard practice)
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            )
            .with_state(Arc::clone(&self.state))
    }
}

/// Handle SSE connections for reload events.
///
/// The session lives inside the stream, so hyper dropping the body on
/// disconnect also deregisters the client.
async fn handle_sse(
    State(state): State<SharedState>,
) -> Sse<impl Stream<Item = std::result::Result<Event, Infallible>>> {
    let mut session = ClientSession::open(Arc::clone(state.hub()));
    let keep_alive = state.keep_alive();

    let stream = async_stream::stream! {
        yield Ok::<_, Infallible>(Event::default().event("connected").data(session.id().to_string()));

        let mut ticker = tokio::time::interval_at(tokio::time::Instant::now() + keep_alive, keep_alive);

        loop {
            let event = tokio::select! {
                notice = session.next_notice() => match notice {
                    Some(notice) => Event::default().event("reload").data(notice.wire_text()),
                    None => break,
                },
                _ = ticker.tick() => Event::default().comment("keep-alive"),
            };
            yield Ok::<_, Infallible>(event);
        }

        session.close();
    };

    Sse::new(stream)
}

/// Handle WebSocket upgrades for reload events.
async fn handle_ws(ws: WebSocketUpgrade, State(state): State<SharedState>) -> Response {
    ws.on_upgrade(move |socket| relay_socket(socket, state))
}

/// Relay hub notices to an established WebSocket until either side closes.
async fn relay_socket(mut socket: WebSocket, state: SharedState) {
    let mut session = ClientSession::open(Arc::clone(state.hub()));

    if socket
        .send(Message::Text("connected".into()))
        .await
        .is_err()
    {
        session.close();
        return;
    }

    loop {
        tokio::select! {
            notice = session.next_notice() => {
                let Some(notice) = notice else { break };
                if socket.send(Message::Text(notice.wire_text().into())).await.is_err() {
                    break;
                }
            }
            incoming = socket.recv() => match incoming {
                Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                Some(Ok(_)) => {}
            },
        }
    }

    session.close();
}

/// Serve the reload client script.
async fn handle_reload_script() -> impl IntoResponse {
    (
        [
            (header::CONTENT_TYPE, "application/javascript; charset=utf-8"),
            (header::CACHE_CONTROL, "no-cache"),
        ],
        RELOAD_SCRIPT,
    )
}
