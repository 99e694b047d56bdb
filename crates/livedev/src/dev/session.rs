//! Per-connection client sessions.
//!
//! A [`ClientSession`] is created by a push endpoint when a browser connects
//! and owns that browser's registration in the [`ReloadHub`]. Dropping the
//! session deregisters it, so every exit path of the endpoint (normal close,
//! transport error, task cancellation at shutdown) cleans up.

use crate::dev::hub::{ClientId, ReloadHub, ReloadNotice};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Lifecycle of a client session.
///
/// `Connecting -> Active -> Closing -> Closed`. No transition is retried and a
/// closed session is never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Handshake accepted, not yet registered
    Connecting,
    /// Registered and relaying notices
    Active,
    /// Close detected, deregistration in progress
    Closing,
    /// Deregistered
    Closed,
}

/// Server-side state for one connected browser.
pub struct ClientSession {
    id: ClientId,
    opened_at: DateTime<Utc>,
    state: SessionState,
    hub: Arc<ReloadHub>,
    notices: mpsc::Receiver<ReloadNotice>,
}

impl ClientSession {
    /// Register a new session with the hub.
    pub fn open(hub: Arc<ReloadHub>) -> Self {
        let opened_at = Utc::now();
        let (id, notices) = hub.register();
        let state = Self::advance(id, SessionState::Connecting, SessionState::Active);

        tracing::info!(client = %id, clients = hub.client_count(), "Browser connected");

        Self {
            id,
            opened_at,
            state,
            hub,
            notices,
        }
    }

    /// Wait for the next notice addressed to this session.
    ///
    /// Returns `None` once the session has been closed or removed from the hub.
    pub async fn next_notice(&mut self) -> Option<ReloadNotice> {
        if self.state != SessionState::Active {
            return None;
        }
        self.notices.recv().await
    }

    /// Close the session and deregister it. Calling this more than once is a
    /// no-op.
    pub fn close(&mut self) {
        if matches!(self.state, SessionState::Closing | SessionState::Closed) {
            return;
        }

        self.state = Self::advance(self.id, self.state, SessionState::Closing);
        self.notices.close();
        self.hub.deregister(self.id);
        self.state = Self::advance(self.id, self.state, SessionState::Closed);

        let connected_for = Utc::now().signed_duration_since(self.opened_at);
        tracing::info!(
            client = %self.id,
            connected_ms = connected_for.num_milliseconds(),
            clients = self.hub.client_count(),
            "Browser disconnected"
        );
    }

    /// Session id.
    pub fn id(&self) -> ClientId {
        self.id
    }

    /// When the connection was accepted.
    pub fn opened_at(&self) -> DateTime<Utc> {
        self.opened_at
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    fn advance(id: ClientId, from: SessionState, to: SessionState) -> SessionState {
        tracing::trace!(client = %id, ?from, ?to, "Session state change");
        to
    }
}

impl Drop for ClientSession {
    fn drop(&mut self) {
        self.close();
    }
}
