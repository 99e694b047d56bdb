//! Change detection for the served directory tree.
//!
//! Two strategies share one contract: a background task sends a
//! [`ChangeEvent`] down a channel whenever files under the root are added,
//! modified or removed.
//!
//! - [`WatchStrategy::Events`] subscribes to OS notifications (inotify,
//!   FSEvents, ReadDirectoryChangesW) through `notify`, registering each
//!   directory individually so excluded subtrees are never watched.
//! - [`WatchStrategy::Poll`] takes periodic [`DirectorySnapshot`]s and
//!   diffs them.
//!
//! Hidden entries (any component starting with `.`) and `node_modules`
//! directories are pruned during traversal. Both strategies follow symlinked
//! directories.

use crate::error::{CliError, Result};
use notify::event::ModifyKind;
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};
use std::time::{Duration, Instant, SystemTime};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use walkdir::WalkDir;

/// Default polling interval in milliseconds.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 500;

/// Directory names pruned from watching regardless of visibility.
const EXCLUDED_DIRS: &[&str] = &["node_modules"];

/// Suffixes of editor backup and temp files.
const IGNORED_SUFFIXES: &[&str] = &["~", ".tmp"];

/// How changes are detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WatchStrategy {
    /// OS change notifications
    #[default]
    Events,
    /// Periodic snapshot diffing
    #[serde(alias = "polling")]
    Poll,
}

/// Something under the root changed since the last event.
///
/// `paths` is informational; consumers only rely on the event itself.
#[derive(Debug, Clone)]
pub struct ChangeEvent {
    pub paths: Vec<PathBuf>,
    pub detected_at: Instant,
}

impl ChangeEvent {
    fn new(paths: Vec<PathBuf>) -> Self {
        Self {
            paths,
            detected_at: Instant::now(),
        }
    }
}

/// Check whether a single directory entry name is excluded from watching.
pub fn is_excluded_name(name: &OsStr) -> bool {
    let name = name.to_string_lossy();
    name.starts_with('.') || EXCLUDED_DIRS.iter().any(|dir| name == *dir)
}

/// Check whether a path is excluded relative to the watched root.
///
/// Paths outside the root are always excluded.
pub fn is_excluded(path: &Path, root: &Path) -> bool {
    let Ok(relative) = path.strip_prefix(root) else {
        return true;
    };

    relative.components().any(|component| match component {
        Component::Normal(name) => is_excluded_name(name),
        _ => true,
    })
}

/// Check whether a file name carries a backup/temp suffix.
pub fn is_ignored_file(path: &Path) -> bool {
    let name = path.to_string_lossy();
    IGNORED_SUFFIXES.iter().any(|suffix| name.ends_with(suffix))
}

/// Point-in-time capture of modification times under a root.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectorySnapshot {
    files: HashMap<PathBuf, SystemTime>,
}

/// Difference between two snapshots.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SnapshotDiff {
    /// Added or modified files
    pub changed: Vec<PathBuf>,
    /// Removed files
    pub deleted: Vec<PathBuf>,
}

impl SnapshotDiff {
    pub fn is_empty(&self) -> bool {
        self.changed.is_empty() && self.deleted.is_empty()
    }

    fn into_paths(self) -> Vec<PathBuf> {
        let mut paths = self.changed;
        paths.extend(self.deleted);
        paths
    }
}

impl DirectorySnapshot {
    /// Walk `root` and record the modification time of every non-excluded
    /// file.
    ///
    /// # Errors
    ///
    /// Fails if the root itself cannot be read. Entries that vanish or become
    /// unreadable mid-walk are skipped.
    pub fn capture(root: &Path) -> Result<Self> {
        let mut files = HashMap::new();

        let walker = WalkDir::new(root)
            .follow_links(true)
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !is_excluded_name(entry.file_name()));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) if err.depth() == 0 => return Err(CliError::Snapshot(err)),
                Err(err) => {
                    tracing::debug!(error = %err, "Skipping unreadable entry");
                    continue;
                }
            };

            if !entry.file_type().is_file() || is_ignored_file(entry.path()) {
                continue;
            }

            match entry.metadata().map(|m| m.modified()) {
                Ok(Ok(modified)) => {
                    files.insert(entry.into_path(), modified);
                }
                Ok(Err(err)) => {
                    tracing::debug!(error = %err, "No modification time, skipping");
                }
                Err(err) => {
                    tracing::debug!(error = %err, "Skipping unreadable entry");
                }
            }
        }

        Ok(Self { files })
    }

    /// Compare against a newer snapshot.
    pub fn diff(&self, newer: &DirectorySnapshot) -> SnapshotDiff {
        let mut changed: Vec<PathBuf> = newer
            .files
            .iter()
            .filter(|(path, modified)| match self.files.get(*path) {
                Some(previous) => *modified > previous,
                None => true,
            })
            .map(|(path, _)| path.clone())
            .collect();

        let mut deleted: Vec<PathBuf> = self
            .files
            .keys()
            .filter(|path| !newer.files.contains_key(*path))
            .cloned()
            .collect();

        changed.sort();
        deleted.sort();

        SnapshotDiff { changed, deleted }
    }

    /// Number of files captured.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }
}

/// Background change detector.
///
/// Holds the detector task; dropping the watcher aborts it.
pub struct FileWatcher {
    /// Active strategy
    strategy: WatchStrategy,
    task: JoinHandle<()>,
}

impl FileWatcher {
    /// Start watching `root`.
    ///
    /// # Arguments
    ///
    /// * `root` - Absolute root directory to watch recursively
    /// * `strategy` - Detection strategy
    /// * `poll_interval` - Interval between snapshots (polling only)
    ///
    /// # Returns
    ///
    /// Tuple of (FileWatcher, receiver for change events)
    ///
    /// # Errors
    ///
    /// Returns error if the root does not exist, the OS facility cannot be
    /// initialized, or the initial snapshot cannot be taken. Must be called
    /// from within a tokio runtime.
    pub fn spawn(
        root: PathBuf,
        strategy: WatchStrategy,
        poll_interval: Duration,
    ) -> Result<(Self, mpsc::Receiver<ChangeEvent>)> {
        if !root.is_dir() {
            return Err(CliError::DirectoryNotFound(root));
        }

        let (tx, rx) = mpsc::channel(64);

        let task = match strategy {
            WatchStrategy::Events => Self::spawn_events(root.clone(), tx)?,
            WatchStrategy::Poll => Self::spawn_polling(root.clone(), poll_interval, tx)?,
        };

        tracing::info!(root = %root.display(), ?strategy, "Watching for changes");

        Ok((Self { strategy, task }, rx))
    }

    /// Get the active strategy.
    pub fn strategy(&self) -> WatchStrategy {
        self.strategy
    }

    fn spawn_events(root: PathBuf, tx: mpsc::Sender<ChangeEvent>) -> Result<JoinHandle<()>> {
        let (raw_tx, mut raw_rx) = mpsc::channel::<notify::Result<Event>>(256);

        // notify calls back on its own thread, outside the runtime
        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
            let _ = raw_tx.blocking_send(res);
        })?;

        let registered = register_tree(&mut watcher, &root, &root)?;
        tracing::debug!(directories = registered, "Registered directories");

        Ok(tokio::spawn(async move {
            while let Some(res) = raw_rx.recv().await {
                let event = match res {
                    Ok(event) => event,
                    Err(err) => {
                        tracing::warn!(error = %err, "Watcher error");
                        continue;
                    }
                };

                if let Some(change) = classify_event(&mut watcher, &root, event) {
                    if tx.send(change).await.is_err() {
                        break;
                    }
                }
            }
            tracing::debug!("Event watcher stopped");
        }))
    }

    fn spawn_polling(
        root: PathBuf,
        poll_interval: Duration,
        tx: mpsc::Sender<ChangeEvent>,
    ) -> Result<JoinHandle<()>> {
        let mut baseline = DirectorySnapshot::capture(&root)?;
        tracing::debug!(files = baseline.len(), "Initial snapshot taken");

        Ok(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(poll_interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            // The first tick completes immediately
            ticker.tick().await;

            loop {
                ticker.tick().await;

                let walk_root = root.clone();
                let snapshot =
                    tokio::task::spawn_blocking(move || DirectorySnapshot::capture(&walk_root))
                        .await;

                let current = match snapshot {
                    Ok(Ok(current)) => current,
                    Ok(Err(err)) => {
                        tracing::warn!(error = %err, "Poll failed, retrying next interval");
                        continue;
                    }
                    Err(err) => {
                        tracing::warn!(error = %err, "Poll task failed, retrying next interval");
                        continue;
                    }
                };

                let diff = baseline.diff(&current);
                baseline = current;

                if diff.is_empty() {
                    continue;
                }

                tracing::debug!(
                    changed = diff.changed.len(),
                    deleted = diff.deleted.len(),
                    "Snapshot changed"
                );
                if tx.send(ChangeEvent::new(diff.into_paths())).await.is_err() {
                    break;
                }
            }
            tracing::debug!("Polling watcher stopped");
        }))
    }
}

impl Drop for FileWatcher {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Register `dir` and every non-excluded directory below it.
///
/// # Returns
///
/// Number of directories registered
fn register_tree(watcher: &mut RecommendedWatcher, root: &Path, dir: &Path) -> Result<usize> {
    let mut count = 0;

    let walker = WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_excluded_name(entry.file_name()));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) if err.depth() == 0 => return Err(CliError::Snapshot(err)),
            Err(err) => {
                tracing::debug!(error = %err, "Skipping unreadable directory");
                continue;
            }
        };
        if !entry.file_type().is_dir() {
            continue;
        }
        if entry.path() != root && is_excluded(entry.path(), root) {
            continue;
        }

        watcher.watch(entry.path(), RecursiveMode::NonRecursive)?;
        count += 1;
    }

    Ok(count)
}

/// Turn a raw notify event into a change signal.
///
/// Directories created in place are registered and do not count as changes
/// by themselves. Directories renamed into the tree are registered and do
/// count, since they arrive with content.
fn classify_event(
    watcher: &mut RecommendedWatcher,
    root: &Path,
    event: Event,
) -> Option<ChangeEvent> {
    let (registers_dirs, is_create) = match event.kind {
        EventKind::Create(_) => (true, true),
        EventKind::Modify(ModifyKind::Name(_)) => (true, false),
        EventKind::Modify(_) | EventKind::Remove(_) => (false, false),
        _ => return None,
    };

    let mut paths = Vec::new();

    for path in event.paths {
        if is_ignored_file(&path) || is_excluded(&path, root) {
            continue;
        }

        if registers_dirs && path.is_dir() {
            match register_tree(watcher, root, &path) {
                Ok(count) => {
                    tracing::debug!(path = %path.display(), directories = count, "Watching new directory");
                }
                Err(err) => {
                    tracing::warn!(path = %path.display(), error = %err, "Failed to watch new directory");
                }
            }
            if is_create {
                continue;
            }
        }

        paths.push(path);
    }

    if paths.is_empty() {
        return None;
    }

    tracing::debug!(paths = ?paths, "Raw change");
    Some(ChangeEvent::new(paths))
}
