use clap::ValueEnum;

/// Change detection strategy
#[derive(Copy, Clone, PartialEq, Eq, Debug, ValueEnum)]
pub enum Strategy {
    /// OS file change notifications
    ///
    /// Low latency and no idle cost. Each directory under the root is
    /// registered individually, skipping hidden directories and
    /// node_modules.
    #[value(name = "events")]
    Events,

    /// Periodic directory snapshots
    ///
    /// Works on file systems that do not deliver notifications, such as
    /// some network shares and container bind mounts.
    #[value(name = "poll", alias = "polling")]
    Poll,
}
