//! Application state for convotui.

mod actions;

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use ratatui::layout::Rect;

use crate::chat::{ChatStore, Conversation, StoreWatcher};
use crate::config::Config;
use crate::ui::nav::{build_snapshots, EditPrefs, NavListState, RowSnapshot};

/// Two clicks on the same row within this window count as a double click.
pub const DOUBLE_CLICK_TIMEOUT_MS: u64 = 400;

/// How long transient action feedback stays visible in the help bar.
pub const FEEDBACK_VISIBLE_MS: u64 = 2000;

/// Transient feedback about the last store action, for help-bar display.
#[derive(Debug, Clone)]
pub enum ActionStatus {
    /// Nothing recent
    None,
    /// A title was renamed
    Renamed {
        /// The new title
        title: String,
        /// When the rename happened
        at: Instant,
    },
    /// A conversation was deleted
    Deleted {
        /// Title of the deleted conversation
        title: String,
        /// When the delete happened
        at: Instant,
    },
    /// The store file changed externally and was reloaded
    Reloaded {
        /// When the reload happened
        at: Instant,
    },
    /// Writing the store file failed
    SaveFailed {
        /// Error description
        message: String,
        /// When the failure happened
        at: Instant,
    },
}

impl ActionStatus {
    /// The status, if it is younger than `max_age_ms`.
    pub fn recent(&self, max_age_ms: u64) -> Option<&Self> {
        let at = match self {
            ActionStatus::None => return None,
            ActionStatus::Renamed { at, .. }
            | ActionStatus::Deleted { at, .. }
            | ActionStatus::Reloaded { at }
            | ActionStatus::SaveFailed { at, .. } => at,
        };
        (at.elapsed().as_millis() as u64 <= max_age_ms).then_some(self)
    }
}

/// The previous mouse click, kept around for double-click promotion.
#[derive(Debug, Clone, Copy)]
pub struct LastClick {
    /// Row index that was clicked
    pub index: usize,
    /// When the click happened
    pub at: Instant,
}

/// Application state
pub struct App {
    /// Conversation store (list + active selection)
    pub store: ChatStore,
    /// Application configuration
    pub config: Config,
    /// Drawer interaction state (one row controller per conversation)
    pub nav: NavListState,
    /// Should quit
    pub should_quit: bool,
    /// Terminal size
    pub term_size: (u16, u16),
    /// Drawer area inside the borders, cached during render for mouse
    /// coordinate mapping
    pub drawer_inner: Option<Rect>,
    /// List scroll offset at last render (pairs with `drawer_inner`)
    pub drawer_offset: usize,
    /// Previous click, for double-click detection
    pub last_click: Option<LastClick>,
    /// Transient feedback for the help bar
    pub action_status: ActionStatus,
    /// Watcher for external store-file changes
    watcher: Option<StoreWatcher>,
    /// Ignore watcher events until this instant (our own saves echo back)
    suppress_watch_until: Option<Instant>,
}

impl App {
    /// Create a new application instance from the default config and store
    /// locations.
    pub fn new() -> Result<Self> {
        let mut config = Config::load().unwrap_or_default();
        config.layout.validate();

        let store_path = ChatStore::default_path()?;
        let store = ChatStore::load(store_path).context("Failed to load conversation store")?;

        Ok(Self::with_store(store, config))
    }

    /// Build an app around an existing store and config.
    pub fn with_store(store: ChatStore, config: Config) -> Self {
        // The watcher is optional; the app works without it.
        let watcher = StoreWatcher::new(store.path()).ok();

        let mut app = Self {
            store,
            config,
            nav: NavListState::new(),
            should_quit: false,
            term_size: (80, 24),
            drawer_inner: None,
            drawer_offset: 0,
            last_click: None,
            action_status: ActionStatus::None,
            watcher,
            suppress_watch_until: None,
        };
        app.nav.sync(app.store.conversations());
        app
    }

    /// Per-row data for this pass.
    pub fn snapshots(&self) -> Vec<RowSnapshot> {
        build_snapshots(&self.store, &self.config)
    }

    pub fn edit_prefs(&self) -> EditPrefs {
        EditPrefs::from_config(&self.config)
    }

    /// The active conversation record, if any.
    pub fn active_conversation(&self) -> Option<&Conversation> {
        self.store.active_id().and_then(|id| self.store.get(id))
    }

    /// Align row controllers with the store and clear any armed row whose
    /// conversation is no longer active. Runs once per event-loop pass.
    pub fn reconcile_rows(&mut self) {
        self.nav.sync(self.store.conversations());
        self.nav.reconcile(self.store.active_id());
    }

    /// Reload the store if the file changed externally.
    pub fn check_store_updates(&mut self) {
        let Some(watcher) = &self.watcher else { return };
        if !watcher.take_change() {
            return;
        }
        // Our own saves echo back through the watcher; skip those.
        if self
            .suppress_watch_until
            .is_some_and(|until| Instant::now() < until)
        {
            return;
        }
        if self.store.reload().is_ok() {
            self.nav.sync(self.store.conversations());
            self.action_status = ActionStatus::Reloaded { at: Instant::now() };
        }
    }

    /// Mark the next second of watcher events as self-inflicted.
    pub(crate) fn note_own_save(&mut self) {
        self.suppress_watch_until = Some(Instant::now() + Duration::from_secs(1));
    }

    /// Whether the previous click promotes the given row click to a double
    /// click. Updates the stored click either way.
    pub fn register_click(&mut self, index: usize) -> bool {
        let now = Instant::now();
        let is_double = self.last_click.is_some_and(|last| {
            last.index == index && last.at.elapsed().as_millis() as u64 <= DOUBLE_CLICK_TIMEOUT_MS
        });
        self.last_click = if is_double {
            None
        } else {
            Some(LastClick { index, at: now })
        };
        is_double
    }
}
