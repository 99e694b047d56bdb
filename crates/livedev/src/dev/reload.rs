//! Glue between change detection and the broadcast hub.

use crate::dev::debouncer::Debouncer;
use crate::dev::hub::{BroadcastReport, ReloadHub, ReloadNotice};
use crate::dev::watcher::ChangeEvent;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Debounces change events and fans forwarded ones out to every client.
///
/// Runs inside whichever task consumes the detector channel; broadcasting is
/// synchronous and never waits on a client.
pub struct ReloadDispatcher {
    debouncer: Debouncer,
    hub: Arc<ReloadHub>,
}

impl ReloadDispatcher {
    pub fn new(hub: Arc<ReloadHub>, debounce: Duration) -> Self {
        Self {
            debouncer: Debouncer::new(debounce),
            hub,
        }
    }

    /// Handle a change event observed now.
    pub fn dispatch(&mut self, change: &ChangeEvent) -> Option<BroadcastReport> {
        self.dispatch_at(change, Instant::now())
    }

    /// Handle a change event observed at `now`.
    ///
    /// # Returns
    ///
    /// The broadcast report, or `None` if the event was debounced away
    pub fn dispatch_at(&mut self, change: &ChangeEvent, now: Instant) -> Option<BroadcastReport> {
        if !self.debouncer.should_forward(now) {
            tracing::trace!(paths = change.paths.len(), "Change debounced");
            return None;
        }

        let report = self.hub.broadcast(ReloadNotice::now());

        match change.paths.as_slice() {
            [single] => tracing::info!(
                path = %single.display(),
                clients = report.delivered,
                "File changed, reloading"
            ),
            paths => tracing::info!(
                files = paths.len(),
                clients = report.delivered,
                "Files changed, reloading"
            ),
        }
        if report.skipped > 0 || report.removed > 0 {
            tracing::debug!(
                skipped = report.skipped,
                removed = report.removed,
                "Some clients were not notified"
            );
        }

        Some(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn change() -> ChangeEvent {
        ChangeEvent {
            paths: vec![PathBuf::from("/site/index.html")],
            detected_at: Instant::now(),
        }
    }

    #[test]
    fn test_dispatch_with_no_clients_succeeds() {
        let hub = Arc::new(ReloadHub::new());
        let mut dispatcher = ReloadDispatcher::new(hub, Duration::from_millis(100));

        let report = dispatcher.dispatch(&change()).expect("first change forwarded");
        assert_eq!(report.delivered, 0);
    }

    #[test]
    fn test_burst_yields_one_notice_per_client() {
        let hub = Arc::new(ReloadHub::new());
        let (_a, mut rx_a) = hub.register();
        let (_b, mut rx_b) = hub.register();
        let mut dispatcher = ReloadDispatcher::new(Arc::clone(&hub), Duration::from_millis(100));

        let start = Instant::now();
        for offset in [0, 5, 30, 80] {
            dispatcher.dispatch_at(&change(), start + Duration::from_millis(offset));
        }

        assert!(rx_a.try_recv().is_ok());
        assert!(rx_a.try_recv().is_err());
        assert!(rx_b.try_recv().is_ok());
        assert!(rx_b.try_recv().is_err());

        // A separate burst later produces exactly one more
        dispatcher.dispatch_at(&change(), start + Duration::from_millis(300));
        dispatcher.dispatch_at(&change(), start + Duration::from_millis(320));

        assert!(rx_a.try_recv().is_ok());
        assert!(rx_a.try_recv().is_err());
    }
}
