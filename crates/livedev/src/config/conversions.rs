use crate::dev::watcher::WatchStrategy;

// Conversion implementations: CLI enums -> Config enums

impl From<crate::cli::Strategy> for WatchStrategy {
    fn from(s: crate::cli::Strategy) -> Self {
        match s {
            crate::cli::Strategy::Events => WatchStrategy::Events,
            crate::cli::Strategy::Poll => WatchStrategy::Poll,
        }
    }
}
