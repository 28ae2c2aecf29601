//! Watches the browsed directory so the listing can be refreshed

use log::warn;
use notify_debouncer_mini::notify::RecommendedWatcher;
use notify_debouncer_mini::{new_debouncer, notify::RecursiveMode, DebounceEventResult, Debouncer};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};
use std::time::Duration;
use vista_core::{Result, VistaError};

/// Debounced, non-recursive watch on one directory at a time
pub struct DirectoryWatcher {
    debouncer: Debouncer<RecommendedWatcher>,
    rx: Receiver<DebounceEventResult>,
    watched: Option<PathBuf>,
}

impl DirectoryWatcher {
    pub fn new(delay: Duration) -> Result<Self> {
        let (tx, rx) = mpsc::channel();
        let debouncer = new_debouncer(delay, tx)
            .map_err(|e| VistaError::WatchError(format!("Failed to create file watcher: {}", e)))?;
        Ok(Self {
            debouncer,
            rx,
            watched: None,
        })
    }

    /// Currently watched directory
    pub fn watched(&self) -> Option<&Path> {
        self.watched.as_deref()
    }

    /// Switch the watch to `dir`, dropping the previous one.
    /// Changes already queued for the old directory are discarded.
    pub fn watch(&mut self, dir: &Path) -> Result<()> {
        if self.watched.as_deref() == Some(dir) {
            return Ok(());
        }
        if let Some(old) = self.watched.take() {
            // The old directory may be gone already
            self.debouncer.watcher().unwatch(&old).ok();
        }
        self.debouncer
            .watcher()
            .watch(dir, RecursiveMode::NonRecursive)
            .map_err(|e| VistaError::WatchError(format!("Failed to watch {}: {}", dir.display(), e)))?;
        self.rx.try_iter().for_each(drop);
        self.watched = Some(dir.to_path_buf());
        Ok(())
    }

    /// True when the watched directory changed since the last poll
    pub fn poll(&self) -> bool {
        let mut changed = false;
        for result in self.rx.try_iter() {
            match result {
                Ok(events) => changed |= !events.is_empty(),
                Err(e) => warn!("Watch error: {:?}", e),
            }
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::time::Instant;

    fn temp_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("vista_watch_test_{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_reports_new_file() {
        let dir = temp_dir();
        let mut watcher = DirectoryWatcher::new(Duration::from_millis(50)).unwrap();
        watcher.watch(&dir).unwrap();
        assert_eq!(watcher.watched(), Some(dir.as_path()));
        assert!(!watcher.poll());

        fs::write(dir.join("new.obj"), b"v 0 0 0").unwrap();

        let deadline = Instant::now() + Duration::from_secs(5);
        let mut changed = false;
        while !changed && Instant::now() < deadline {
            std::thread::sleep(Duration::from_millis(50));
            changed = watcher.poll();
        }
        assert!(changed);

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_missing_directory_errors() {
        let dir = temp_dir();
        let mut watcher = DirectoryWatcher::new(Duration::from_millis(50)).unwrap();
        let err = watcher.watch(&dir.join("missing")).unwrap_err();
        assert!(matches!(err, VistaError::WatchError(_)));
        assert_eq!(watcher.watched(), None);

        fs::remove_dir_all(&dir).ok();
    }
}
