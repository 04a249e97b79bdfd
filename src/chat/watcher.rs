//! File system watcher for external changes to the store file.

use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};
use std::time::Duration;

use anyhow::{Context as _, Result};
use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};

/// Watches the directory containing the store file and reports when the
/// file itself is created or modified (editors and other processes often
/// replace the file rather than write in place, so the parent is watched).
pub struct StoreWatcher {
    _watcher: RecommendedWatcher,
    rx: Receiver<()>,
}

impl StoreWatcher {
    /// Create a watcher for the given store file path.
    pub fn new(store_path: &Path) -> Result<Self> {
        let parent = store_path
            .parent()
            .context("Store path has no parent directory")?
            .to_path_buf();
        std::fs::create_dir_all(&parent)
            .with_context(|| format!("Failed to create store directory: {}", parent.display()))?;

        let file_name: PathBuf = store_path
            .file_name()
            .context("Store path has no file name")?
            .into();

        let (tx, rx) = mpsc::channel();
        let mut watcher = RecommendedWatcher::new(
            move |res: Result<Event, notify::Error>| {
                if let Ok(event) = res {
                    if event.kind.is_modify() || event.kind.is_create() {
                        let hits_store = event
                            .paths
                            .iter()
                            .any(|p| p.file_name().is_some_and(|n| n == file_name.as_os_str()));
                        if hits_store {
                            let _ = tx.send(());
                        }
                    }
                }
            },
            Config::default().with_poll_interval(Duration::from_millis(500)),
        )?;

        watcher.watch(&parent, RecursiveMode::NonRecursive)?;

        Ok(Self {
            _watcher: watcher,
            rx,
        })
    }

    /// Drain pending change notifications (non-blocking). Returns true when
    /// at least one change was seen since the last call.
    pub fn take_change(&self) -> bool {
        let mut changed = false;
        while self.rx.try_recv().is_ok() {
            changed = true;
        }
        changed
    }
}
