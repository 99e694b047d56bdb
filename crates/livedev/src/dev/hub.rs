//! Client registry and reload broadcasting.
//!
//! The hub owns the set of connected browser sessions. Each session is
//! represented by the sending half of a small bounded queue; broadcasting
//! uses `try_send` so a slow client can never stall the others.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::mpsc::{self, error::TrySendError};

/// Capacity of each client's outbound queue.
pub const CLIENT_QUEUE_CAPACITY: usize = 16;

/// Unique identifier for a connected client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClientId(u64);

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Reload instruction pushed to every client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReloadNotice {
    /// Unix timestamp (seconds) of the broadcast
    pub timestamp: i64,
}

impl ReloadNotice {
    /// Create a notice stamped with the current time.
    pub fn now() -> Self {
        Self {
            timestamp: chrono::Utc::now().timestamp(),
        }
    }

    /// Text payload sent over the wire: `reload:<unix-timestamp>`.
    pub fn wire_text(&self) -> String {
        format!("reload:{}", self.timestamp)
    }
}

/// Outcome of a single broadcast pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BroadcastReport {
    /// Clients whose queue accepted the notice
    pub delivered: usize,
    /// Clients skipped because their queue was full
    pub skipped: usize,
    /// Clients removed because their session had already ended
    pub removed: usize,
}

/// Registry of delivery handles keyed by client id.
#[derive(Default)]
struct ClientRegistry {
    clients: HashMap<ClientId, mpsc::Sender<ReloadNotice>>,
}

/// Broadcast hub for reload notifications.
///
/// All registry access goes through a single mutex. The lock is held for the
/// in-memory map operation and the non-blocking `try_send` calls only.
pub struct ReloadHub {
    registry: Mutex<ClientRegistry>,
    next_id: AtomicU64,
    queue_capacity: usize,
}

impl ReloadHub {
    /// Create an empty hub with the default per-client queue capacity.
    pub fn new() -> Self {
        Self::with_queue_capacity(CLIENT_QUEUE_CAPACITY)
    }

    /// Create an empty hub with a custom per-client queue capacity.
    pub fn with_queue_capacity(queue_capacity: usize) -> Self {
        Self {
            registry: Mutex::new(ClientRegistry::default()),
            next_id: AtomicU64::new(0),
            queue_capacity: queue_capacity.max(1),
        }
    }

    /// Register a new client.
    ///
    /// # Returns
    ///
    /// The client id and the receiving half of its outbound queue
    pub fn register(&self) -> (ClientId, mpsc::Receiver<ReloadNotice>) {
        let id = ClientId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let (tx, rx) = mpsc::channel(self.queue_capacity);

        self.registry.lock().clients.insert(id, tx);
        tracing::debug!(client = %id, "Registered client");

        (id, rx)
    }

    /// Remove a client. Removing an unknown or already-removed id is a no-op.
    ///
    /// # Returns
    ///
    /// `true` if the client was registered
    pub fn deregister(&self, id: ClientId) -> bool {
        let removed = self.registry.lock().clients.remove(&id).is_some();
        if removed {
            tracing::debug!(client = %id, "Deregistered client");
        }
        removed
    }

    /// Push a notice to every registered client.
    ///
    /// A full queue skips that client for this pass. A closed queue means the
    /// session is gone, so its handle is dropped from the registry here.
    pub fn broadcast(&self, notice: ReloadNotice) -> BroadcastReport {
        let mut report = BroadcastReport::default();
        let mut registry = self.registry.lock();

        registry.clients.retain(|id, tx| match tx.try_send(notice) {
            Ok(()) => {
                report.delivered += 1;
                true
            }
            Err(TrySendError::Full(_)) => {
                tracing::debug!(client = %id, "Client queue full, skipping");
                report.skipped += 1;
                true
            }
            Err(TrySendError::Closed(_)) => {
                tracing::debug!(client = %id, "Client gone, removing");
                report.removed += 1;
                false
            }
        });

        report
    }

    /// Number of currently registered clients.
    pub fn client_count(&self) -> usize {
        self.registry.lock().clients.len()
    }

    /// Check whether a client is registered.
    pub fn contains(&self, id: ClientId) -> bool {
        self.registry.lock().clients.contains_key(&id)
    }
}

impl Default for ReloadHub {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_register_assigns_unique_ids() {
        let hub = ReloadHub::new();

        let (id1, _rx1) = hub.register();
        let (id2, _rx2) = hub.register();

        assert_ne!(id1, id2);
        assert_eq!(hub.client_count(), 2);
        assert!(hub.contains(id1));
    }

    #[test]
    fn test_deregister_is_idempotent() {
        let hub = ReloadHub::new();
        let (id, _rx) = hub.register();

        assert!(hub.deregister(id));
        assert!(!hub.deregister(id));
        assert!(!hub.deregister(id));
        assert_eq!(hub.client_count(), 0);

        // Registry still usable afterwards
        let (other, _rx2) = hub.register();
        assert!(hub.contains(other));
        assert_eq!(hub.client_count(), 1);
    }

    #[test]
    fn test_broadcast_empty_registry_is_noop() {
        let hub = ReloadHub::new();
        let report = hub.broadcast(ReloadNotice::now());
        assert_eq!(report, BroadcastReport::default());
    }

    #[test]
    fn test_broadcast_reaches_every_client() {
        let hub = ReloadHub::new();
        let (_a, mut rx_a) = hub.register();
        let (_b, mut rx_b) = hub.register();

        let notice = ReloadNotice { timestamp: 42 };
        let report = hub.broadcast(notice);

        assert_eq!(report.delivered, 2);
        assert_eq!(rx_a.try_recv().unwrap(), notice);
        assert_eq!(rx_b.try_recv().unwrap(), notice);
    }

    #[test]
    fn test_broken_client_removed_others_delivered() {
        let hub = ReloadHub::new();
        let mut receivers = Vec::new();
        for _ in 0..4 {
            receivers.push(hub.register());
        }

        // Break one handle permanently
        let (broken_id, broken_rx) = receivers.remove(1);
        drop(broken_rx);

        let report = hub.broadcast(ReloadNotice { timestamp: 7 });

        assert_eq!(report.delivered, 3);
        assert_eq!(report.removed, 1);
        assert!(!hub.contains(broken_id));
        assert_eq!(hub.client_count(), 3);

        for (_, rx) in receivers.iter_mut() {
            assert_eq!(rx.try_recv().unwrap().timestamp, 7);
        }
    }

    #[test]
    fn test_full_queue_is_skipped_not_removed() {
        let hub = ReloadHub::with_queue_capacity(1);
        let (slow, _slow_rx) = hub.register();
        let (_fast, mut fast_rx) = hub.register();

        hub.broadcast(ReloadNotice { timestamp: 1 });
        fast_rx.try_recv().unwrap();

        // Slow client never drained its queue
        let report = hub.broadcast(ReloadNotice { timestamp: 2 });
        assert_eq!(report.delivered, 1);
        assert_eq!(report.skipped, 1);
        assert!(hub.contains(slow));
        assert_eq!(fast_rx.try_recv().unwrap().timestamp, 2);
    }

    #[test]
    fn test_per_client_order_preserved() {
        let hub = ReloadHub::new();
        let (_id, mut rx) = hub.register();

        for ts in 1..=5 {
            hub.broadcast(ReloadNotice { timestamp: ts });
        }

        let received: Vec<i64> = std::iter::from_fn(|| rx.try_recv().ok())
            .map(|n| n.timestamp)
            .collect();
        assert_eq!(received, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_wire_text_format() {
        let notice = ReloadNotice {
            timestamp: 1_700_000_000,
        };
        assert_eq!(notice.wire_text(), "reload:1700000000");
    }

    #[test]
    fn test_concurrent_register_and_broadcast() {
        let hub = Arc::new(ReloadHub::new());
        let mut handles = Vec::new();

        for _ in 0..8 {
            let hub = Arc::clone(&hub);
            handles.push(std::thread::spawn(move || {
                for _ in 0..50 {
                    let (id, rx) = hub.register();
                    hub.broadcast(ReloadNotice { timestamp: 0 });
                    drop(rx);
                    hub.deregister(id);
                }
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(hub.client_count(), 0);
    }
}
