//! Application of drawer effects and direct app-level actions.

use std::time::Instant;

use super::{ActionStatus, App};
use crate::ui::nav::NavEffect;

impl App {
    /// Apply an outbound drawer effect to the store.
    ///
    /// Effects are fire-and-forget from the drawer's point of view: the row
    /// has already returned to `Viewing`, and nothing here reports back into
    /// row state. Persistence failures only surface as help-bar feedback.
    pub fn apply(&mut self, effect: NavEffect) {
        match effect {
            NavEffect::Activate { id, close_drawer } => {
                if self.store.activate(&id)
                    && close_drawer
                    && !self.config.layout.drawer_pinned
                {
                    self.config.layout.drawer_minimized = true;
                }
                self.persist();
            }
            NavEffect::Rename { id, title } => {
                if self.store.set_user_title(&id, &title) {
                    self.action_status = ActionStatus::Renamed {
                        title,
                        at: Instant::now(),
                    };
                }
                self.persist();
            }
            NavEffect::RequestDelete { id } => {
                let title = self
                    .store
                    .get(&id)
                    .map(|conv| conv.title.clone())
                    .unwrap_or_default();
                if self.store.delete(&id) {
                    self.action_status = ActionStatus::Deleted {
                        title,
                        at: Instant::now(),
                    };
                }
                self.persist();
            }
        }
    }

    fn persist(&mut self) {
        self.note_own_save();
        if let Err(err) = self.store.save() {
            self.action_status = ActionStatus::SaveFailed {
                message: err.to_string(),
                at: Instant::now(),
            };
        }
    }

    /// Append a fresh conversation, activate it, and move the cursor to it.
    pub fn new_conversation(&mut self) {
        self.store.add_new();
        self.nav.sync(self.store.conversations());
        self.nav.cursor_to_last();
        self.persist();
    }

    /// Toggle the drawer between minimized and open.
    pub fn toggle_drawer_minimized(&mut self) {
        self.config.layout.drawer_minimized = !self.config.layout.drawer_minimized;
        let _ = self.config.save();
    }

    /// Flip the transient busy flag on the row under the cursor (debug aid
    /// for the typing indicator).
    pub fn toggle_busy_selected(&mut self) {
        let Some(index) = self.nav.selected() else { return };
        if let Some(conv) = self.store.conversations().get(index) {
            let id = conv.id.clone();
            let busy = conv.assistant_busy;
            self.store.set_busy(&id, !busy);
        }
    }
}
