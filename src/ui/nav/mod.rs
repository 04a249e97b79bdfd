//! Conversation drawer: per-row interaction state, snapshots, and effects.

mod edit;
mod rendering;
mod row;

use crossterm::event::KeyEvent;
use ratatui::widgets::ListState;

use crate::chat::{ChatStore, Conversation, ConversationId};
use crate::config::Config;

// Re-export public API
pub use edit::{EditOutcome, InlineEdit, SubmitPolicy};
pub use rendering::{hit_test, NavDrawer, RowHit, RowZone};
pub use row::{RowInteraction, RowPhase};

/// Read-only per-row data assembled by the app each pass. The interaction
/// state machine consumes this; it never mutates it.
#[derive(Debug, Clone)]
pub struct RowSnapshot {
    pub id: ConversationId,
    /// Whether this row is the active conversation (externally owned).
    pub is_active: bool,
    pub title: String,
    pub message_count: u32,
    /// Progress denominator; zero disables the progress bar.
    pub max_messages: u32,
    /// The assistant is mid-response. Informational only, blocks nothing.
    pub is_busy: bool,
    /// This is the only row in the list; delete affordances are suppressed.
    pub is_lonely: bool,
}

impl RowSnapshot {
    /// Progress through the message budget, in percent. Not clamped; a
    /// conversation past its budget reads over 100 and renderers decide
    /// how to clip.
    pub fn progress_percent(&self) -> f64 {
        if self.max_messages == 0 {
            0.0
        } else {
            100.0 * f64::from(self.message_count) / f64::from(self.max_messages)
        }
    }

    /// Title as displayed, with a typing marker while the assistant is busy.
    pub fn display_title(&self) -> String {
        let title = if self.title.is_empty() {
            "(untitled)"
        } else {
            &self.title
        };
        if self.is_busy {
            format!("{title}...")
        } else {
            title.to_string()
        }
    }

    /// A brand-new conversation has no messages yet and gets a muted glyph.
    pub fn is_new(&self) -> bool {
        self.message_count == 0
    }
}

/// Editing preferences the row state machine reads at decision time. Passed
/// explicitly rather than looked up ambiently so rows stay testable in
/// isolation.
#[derive(Debug, Clone, Copy)]
pub struct EditPrefs {
    pub double_click_to_edit: bool,
    pub enter_is_newline: bool,
}

impl EditPrefs {
    pub fn from_config(config: &Config) -> Self {
        Self {
            double_click_to_edit: config.editing.double_click_to_edit,
            enter_is_newline: config.editing.enter_is_newline,
        }
    }
}

/// Outbound, fire-and-forget effect emitted by a row gesture. The app layer
/// applies these to the store; no result flows back into row state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavEffect {
    /// Make this conversation the active one, optionally closing the drawer.
    Activate {
        id: ConversationId,
        close_drawer: bool,
    },
    /// Persist an edited title.
    Rename { id: ConversationId, title: String },
    /// Request removal of the conversation. The row has already returned to
    /// `Viewing` by the time this is applied.
    RequestDelete { id: ConversationId },
}

/// One drawer row: the conversation it tracks plus its interaction state.
#[derive(Debug)]
struct RowSlot {
    id: ConversationId,
    interaction: RowInteraction,
}

/// State for the whole drawer: one `RowInteraction` per visible row plus the
/// keyboard cursor. Rows keep their interaction state across refreshes as
/// long as the conversation survives; rows that disappear drop theirs.
#[derive(Debug, Default)]
pub struct NavListState {
    rows: Vec<RowSlot>,
    /// Ratatui list selection state (keyboard cursor, scroll offset).
    pub list_state: ListState,
}

impl NavListState {
    /// Create drawer state with the first row under the cursor.
    pub fn new() -> Self {
        let mut state = Self::default();
        state.list_state.select(Some(0));
        state
    }

    /// Align row slots with the current conversation list. Surviving rows
    /// keep their interaction state; new rows start in `Viewing`.
    pub fn sync(&mut self, conversations: &[Conversation]) {
        let mut old: Vec<RowSlot> = std::mem::take(&mut self.rows);
        self.rows = conversations
            .iter()
            .map(|conv| {
                let kept = old
                    .iter()
                    .position(|slot| slot.id == conv.id)
                    .map(|i| old.swap_remove(i).interaction);
                RowSlot {
                    id: conv.id.clone(),
                    interaction: kept.unwrap_or_default(),
                }
            })
            .collect();

        // Keep the cursor on a real row.
        if self.rows.is_empty() {
            self.list_state.select(None);
        } else {
            let selected = self.list_state.selected().unwrap_or(0);
            self.list_state
                .select(Some(selected.min(self.rows.len() - 1)));
        }
    }

    /// Revert any armed row whose conversation is no longer active. Driven
    /// by the event loop once per pass, so the disarm intentionally lands one
    /// pass after the external activation, not inside the same gesture.
    pub fn reconcile(&mut self, active_id: Option<&ConversationId>) {
        for slot in &mut self.rows {
            let is_active = active_id == Some(&slot.id);
            slot.interaction.reconcile(is_active);
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn interaction(&self, index: usize) -> Option<&RowInteraction> {
        self.rows.get(index).map(|slot| &slot.interaction)
    }

    /// Index of the row currently holding an open editor, if any.
    pub fn editing_index(&self) -> Option<usize> {
        self.rows
            .iter()
            .position(|slot| slot.interaction.is_editing())
    }

    /// Armed flag per row, in row order (used for hit testing).
    pub fn armed_flags(&self) -> Vec<bool> {
        self.rows
            .iter()
            .map(|slot| slot.interaction.is_armed())
            .collect()
    }

    pub fn selected(&self) -> Option<usize> {
        self.list_state.selected()
    }

    /// Move the cursor, clamped to the list.
    pub fn select(&mut self, index: usize) {
        if !self.rows.is_empty() {
            self.list_state.select(Some(index.min(self.rows.len() - 1)));
        }
    }

    pub fn cursor_up(&mut self) {
        if let Some(current) = self.list_state.selected() {
            self.select(current.saturating_sub(1));
        }
    }

    pub fn cursor_down(&mut self) {
        if let Some(current) = self.list_state.selected() {
            self.select(current + 1);
        }
    }

    pub fn cursor_to_first(&mut self) {
        self.select(0);
    }

    pub fn cursor_to_last(&mut self) {
        if !self.rows.is_empty() {
            self.select(self.rows.len() - 1);
        }
    }

    // Gesture dispatchers. Each forwards to the indexed row's state machine;
    // out-of-range indices are no-ops.

    pub fn click(&mut self, index: usize, snaps: &[RowSnapshot]) -> Option<NavEffect> {
        let snap = snaps.get(index)?;
        self.rows.get_mut(index)?.interaction.click(snap)
    }

    pub fn double_click(&mut self, index: usize, snaps: &[RowSnapshot], prefs: &EditPrefs) {
        if let (Some(snap), Some(slot)) = (snaps.get(index), self.rows.get_mut(index)) {
            slot.interaction.double_click(snap, prefs);
        }
    }

    pub fn begin_rename(&mut self, index: usize, snaps: &[RowSnapshot], prefs: &EditPrefs) {
        if let (Some(snap), Some(slot)) = (snaps.get(index), self.rows.get_mut(index)) {
            slot.interaction.begin_rename(snap, prefs);
        }
    }

    /// Delete-affordance click. Refused outright when the caller-supplied
    /// snapshots report more than one active row (a contract violation
    /// upstream); otherwise forwarded to the row.
    pub fn delete_click(&mut self, index: usize, snaps: &[RowSnapshot]) -> Option<NavEffect> {
        if snaps.iter().filter(|s| s.is_active).count() > 1 {
            return None;
        }
        let snap = snaps.get(index)?;
        self.rows.get_mut(index)?.interaction.delete_click(snap)
    }

    pub fn confirm_click(&mut self, index: usize, snaps: &[RowSnapshot]) -> Option<NavEffect> {
        let snap = snaps.get(index)?;
        self.rows.get_mut(index)?.interaction.confirm_click(snap)
    }

    pub fn cancel_click(&mut self, index: usize) {
        if let Some(slot) = self.rows.get_mut(index) {
            slot.interaction.cancel_click();
        }
    }

    pub fn edit_key(
        &mut self,
        index: usize,
        snaps: &[RowSnapshot],
        key: KeyEvent,
    ) -> Option<NavEffect> {
        let snap = snaps.get(index)?;
        self.rows.get_mut(index)?.interaction.edit_key(snap, key)
    }

    /// Commit the open editor, if any, because focus moved elsewhere.
    pub fn blur_editing(&mut self, snaps: &[RowSnapshot]) -> Option<NavEffect> {
        let index = self.editing_index()?;
        let snap = snaps.get(index)?;
        self.rows.get_mut(index)?.interaction.blur(snap)
    }
}

/// Build the per-row snapshots for one pass from the store and preferences.
pub fn build_snapshots(store: &ChatStore, config: &Config) -> Vec<RowSnapshot> {
    let lonely = store.len() == 1;
    store
        .conversations()
        .iter()
        .map(|conv| RowSnapshot {
            id: conv.id.clone(),
            is_active: store.is_active(&conv.id),
            title: conv.title.clone(),
            message_count: conv.message_count,
            max_messages: config.max_chat_messages,
            is_busy: conv.assistant_busy,
            is_lonely: lonely,
        })
        .collect()
}
