//! Data file watcher for `--watch`.
//!
//! The parent directory is watched, not the file: a save-by-rename replaces
//! the file's inode and a direct watch would stop firing.

use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};

use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};

#[derive(Debug, thiserror::Error)]
pub enum WatchError {
    #[error("cannot watch {path}: {source}")]
    Notify {
        path: PathBuf,
        #[source]
        source: notify::Error,
    },
}

/// Watches one data file and reports whether it changed since last asked.
pub struct DataWatcher {
    file: PathBuf,
    rx: Receiver<Event>,
    // Dropping the watcher stops the OS watch.
    _watcher: RecommendedWatcher,
}

impl DataWatcher {
    pub fn new(file: &Path) -> Result<Self, WatchError> {
        let (tx, rx) = mpsc::channel();
        let notify_err = |source| WatchError::Notify {
            path: file.to_path_buf(),
            source,
        };

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(ev) => {
                    if tx.send(ev).is_err() {
                        tracing::warn!("watch channel closed, dropping event");
                    }
                }
                Err(err) => tracing::warn!(error = %err, "watch error"),
            },
            Config::default(),
        )
        .map_err(notify_err)?;

        let dir = match file.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        watcher
            .watch(dir, RecursiveMode::NonRecursive)
            .map_err(notify_err)?;
        tracing::debug!(file = %file.display(), "watching data file");

        Ok(Self {
            file: file.to_path_buf(),
            rx,
            _watcher: watcher,
        })
    }

    /// Drain pending events. Returns `true` if any of them touched the file.
    pub fn changed(&self) -> bool {
        let mut changed = false;
        while let Ok(ev) = self.rx.try_recv() {
            changed |= touches(&ev, &self.file);
        }
        changed
    }
}

fn touches(ev: &Event, file: &Path) -> bool {
    let relevant = matches!(
        ev.kind,
        EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
    );
    let name = file.file_name();
    relevant && ev.paths.iter().any(|p| p.file_name() == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{AccessKind, CreateKind, ModifyKind};

    fn event(kind: EventKind, path: &str) -> Event {
        Event::new(kind).add_path(PathBuf::from(path))
    }

    #[test]
    fn modify_of_the_watched_file_counts() {
        let file = Path::new("/data/drills_data.yaml");
        let ev = event(EventKind::Modify(ModifyKind::Any), "/data/drills_data.yaml");
        assert!(touches(&ev, file));
        let ev = event(EventKind::Create(CreateKind::File), "/data/drills_data.yaml");
        assert!(touches(&ev, file));
    }

    #[test]
    fn other_files_and_reads_are_ignored() {
        let file = Path::new("/data/drills_data.yaml");
        let ev = event(EventKind::Modify(ModifyKind::Any), "/data/index_data.yaml");
        assert!(!touches(&ev, file));
        let ev = event(EventKind::Access(AccessKind::Any), "/data/drills_data.yaml");
        assert!(!touches(&ev, file));
    }

    #[test]
    fn writing_the_file_is_noticed() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("page_data.yaml");
        std::fs::write(&file, "tables: []\n").unwrap();
        let watcher = DataWatcher::new(&file).unwrap();

        std::fs::write(&file, "tables: []\ntrees: []\n").unwrap();
        let deadline = std::time::Instant::now() + std::time::Duration::from_secs(5);
        let mut seen = false;
        while !seen && std::time::Instant::now() < deadline {
            seen = watcher.changed();
            std::thread::sleep(std::time::Duration::from_millis(50));
        }
        assert!(seen);
    }
}
