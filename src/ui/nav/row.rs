//! Per-row interaction state machine for the conversation drawer.
//!
//! Each visible row owns one `RowInteraction`. It mediates between row-level
//! gestures (click, double-click, delete-icon clicks, edit keys) and the
//! outbound effects the app applies to the store. Every transition is
//! synchronous with the triggering input; unmatched events are no-ops.

use crossterm::event::KeyEvent;

use super::edit::{EditOutcome, InlineEdit, SubmitPolicy};
use super::{EditPrefs, NavEffect, RowSnapshot};

/// Interaction phase of a single row.
///
/// `EditingTitle` owns the editor, so a row can never be editing and armed
/// at the same time.
#[derive(Debug, Clone, Default)]
pub enum RowPhase {
    /// Plain display, no gesture in progress.
    #[default]
    Viewing,
    /// Inline title edit in progress.
    EditingTitle(InlineEdit),
    /// First half of the two-step delete gesture.
    DeleteArmed,
}

/// Interaction controller for one conversation row.
#[derive(Debug, Clone, Default)]
pub struct RowInteraction {
    phase: RowPhase,
}

impl RowInteraction {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> &RowPhase {
        &self.phase
    }

    pub fn is_viewing(&self) -> bool {
        matches!(self.phase, RowPhase::Viewing)
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.phase, RowPhase::EditingTitle(_))
    }

    pub fn is_armed(&self) -> bool {
        matches!(self.phase, RowPhase::DeleteArmed)
    }

    /// The live editor, when in `EditingTitle`.
    pub fn editor(&self) -> Option<&InlineEdit> {
        match &self.phase {
            RowPhase::EditingTitle(edit) => Some(edit),
            _ => None,
        }
    }

    /// Single click on the row body.
    ///
    /// Activates an inactive row (and asks the host to close the drawer);
    /// a click on an already-active row is swallowed to avoid redundant
    /// activation work. While editing, the edit surface captures the click.
    pub fn click(&mut self, row: &RowSnapshot) -> Option<NavEffect> {
        match self.phase {
            RowPhase::Viewing | RowPhase::DeleteArmed => {
                if row.is_active {
                    None
                } else {
                    Some(NavEffect::Activate {
                        id: row.id.clone(),
                        close_drawer: true,
                    })
                }
            }
            RowPhase::EditingTitle(_) => None,
        }
    }

    /// Double click on the title region. Enters `EditingTitle` unless the
    /// preference disables it; then `begin_rename` is the only way in.
    pub fn double_click(&mut self, row: &RowSnapshot, prefs: &EditPrefs) {
        if prefs.double_click_to_edit {
            self.begin_rename(row, prefs);
        }
    }

    /// Explicit rename trigger. Works regardless of the double-click
    /// preference, but only from `Viewing`; an armed row must be resolved
    /// first.
    pub fn begin_rename(&mut self, row: &RowSnapshot, prefs: &EditPrefs) {
        if self.is_viewing() {
            let policy = SubmitPolicy::from_enter_is_newline(prefs.enter_is_newline);
            self.phase = RowPhase::EditingTitle(InlineEdit::new(&row.title, policy));
        }
    }

    /// Click on the delete affordance.
    ///
    /// On an inactive row this only selects it (the affordance doubles as a
    /// selection target); arming requires the row to already be active. A
    /// lonely row has no affordance rendered; stray events are dropped.
    pub fn delete_click(&mut self, row: &RowSnapshot) -> Option<NavEffect> {
        if row.is_lonely {
            return None;
        }
        match self.phase {
            RowPhase::Viewing => {
                if row.is_active {
                    self.phase = RowPhase::DeleteArmed;
                    None
                } else {
                    Some(NavEffect::Activate {
                        id: row.id.clone(),
                        close_drawer: false,
                    })
                }
            }
            RowPhase::EditingTitle(_) | RowPhase::DeleteArmed => None,
        }
    }

    /// Click on the confirm half of the armed icon pair. Disarms before the
    /// delete resolves; the row optimistically returns to `Viewing` no
    /// matter what the store does with the request.
    pub fn confirm_click(&mut self, row: &RowSnapshot) -> Option<NavEffect> {
        if self.is_armed() {
            self.phase = RowPhase::Viewing;
            Some(NavEffect::RequestDelete { id: row.id.clone() })
        } else {
            None
        }
    }

    /// Click on the cancel half of the armed icon pair.
    pub fn cancel_click(&mut self) {
        if self.is_armed() {
            self.phase = RowPhase::Viewing;
        }
    }

    /// Key event while this row's editor has focus.
    pub fn edit_key(&mut self, row: &RowSnapshot, key: KeyEvent) -> Option<NavEffect> {
        let outcome = match &mut self.phase {
            RowPhase::EditingTitle(edit) => edit.handle_key(key),
            _ => return None,
        };
        self.resolve_edit(row, outcome)
    }

    /// The editor lost focus (click elsewhere, cursor moved away). An
    /// implicit commit of the current draft.
    pub fn blur(&mut self, row: &RowSnapshot) -> Option<NavEffect> {
        let outcome = match &self.phase {
            RowPhase::EditingTitle(edit) => edit.blur(),
            _ => return None,
        };
        self.resolve_edit(row, outcome)
    }

    /// External reconciliation: a row may only stay armed while it is the
    /// active conversation. Runs once per event-loop pass, so the disarm
    /// lands one pass after the activation that displaced this row.
    pub fn reconcile(&mut self, is_active: bool) {
        if self.is_armed() && !is_active {
            self.phase = RowPhase::Viewing;
        }
    }

    fn resolve_edit(&mut self, row: &RowSnapshot, outcome: EditOutcome) -> Option<NavEffect> {
        match outcome {
            EditOutcome::Pending => None,
            EditOutcome::Commit(text) => {
                self.phase = RowPhase::Viewing;
                if text == row.title {
                    None
                } else {
                    Some(NavEffect::Rename {
                        id: row.id.clone(),
                        title: text,
                    })
                }
            }
            EditOutcome::Cancel => {
                self.phase = RowPhase::Viewing;
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::ConversationId;
    use crossterm::event::{KeyCode, KeyModifiers};

    fn snapshot(active: bool) -> RowSnapshot {
        RowSnapshot {
            id: ConversationId::from("conv-1"),
            is_active: active,
            title: "Chat 1".to_string(),
            message_count: 3,
            max_messages: 20,
            is_busy: false,
            is_lonely: false,
        }
    }

    fn prefs() -> EditPrefs {
        EditPrefs {
            double_click_to_edit: true,
            enter_is_newline: false,
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_str(row: &mut RowInteraction, snap: &RowSnapshot, text: &str) {
        for c in text.chars() {
            assert!(row.edit_key(snap, key(KeyCode::Char(c))).is_none());
        }
    }

    #[test]
    fn click_on_inactive_row_activates_and_closes_drawer() {
        let mut row = RowInteraction::new();
        let snap = snapshot(false);
        assert_eq!(
            row.click(&snap),
            Some(NavEffect::Activate {
                id: snap.id.clone(),
                close_drawer: true,
            })
        );
        assert!(row.is_viewing());
    }

    #[test]
    fn click_on_active_row_is_swallowed() {
        let mut row = RowInteraction::new();
        assert_eq!(row.click(&snapshot(true)), None);
    }

    #[test]
    fn delete_click_on_inactive_row_only_selects_it() {
        let mut row = RowInteraction::new();
        let snap = snapshot(false);
        assert_eq!(
            row.delete_click(&snap),
            Some(NavEffect::Activate {
                id: snap.id.clone(),
                close_drawer: false,
            })
        );
        assert!(row.is_viewing());
    }

    #[test]
    fn delete_click_on_active_row_arms_without_effect() {
        let mut row = RowInteraction::new();
        assert_eq!(row.delete_click(&snapshot(true)), None);
        assert!(row.is_armed());
    }

    #[test]
    fn confirm_emits_exactly_one_delete_and_disarms() {
        let mut row = RowInteraction::new();
        let snap = snapshot(true);
        row.delete_click(&snap);
        assert_eq!(
            row.confirm_click(&snap),
            Some(NavEffect::RequestDelete { id: snap.id.clone() })
        );
        assert!(row.is_viewing());
        // A second confirm has nothing to act on.
        assert_eq!(row.confirm_click(&snap), None);
    }

    #[test]
    fn cancel_disarms_without_effect() {
        let mut row = RowInteraction::new();
        let snap = snapshot(true);
        row.delete_click(&snap);
        row.cancel_click();
        assert!(row.is_viewing());
    }

    #[test]
    fn lonely_row_never_arms() {
        let mut row = RowInteraction::new();
        let mut snap = snapshot(true);
        snap.is_lonely = true;
        assert_eq!(row.delete_click(&snap), None);
        assert!(row.is_viewing());
        snap.is_active = false;
        assert_eq!(row.delete_click(&snap), None);
        assert!(row.is_viewing());
    }

    #[test]
    fn reconcile_disarms_when_row_loses_active() {
        let mut row = RowInteraction::new();
        row.delete_click(&snapshot(true));
        assert!(row.is_armed());
        // Another row was activated; this row hears about it a pass later.
        row.reconcile(false);
        assert!(row.is_viewing());
    }

    #[test]
    fn reconcile_keeps_armed_row_that_is_still_active() {
        let mut row = RowInteraction::new();
        row.delete_click(&snapshot(true));
        row.reconcile(true);
        assert!(row.is_armed());
    }

    #[test]
    fn double_click_enters_editing_seeded_with_title() {
        let mut row = RowInteraction::new();
        row.double_click(&snapshot(true), &prefs());
        assert_eq!(row.editor().map(InlineEdit::draft), Some("Chat 1"));
    }

    #[test]
    fn double_click_disabled_by_preference() {
        let mut row = RowInteraction::new();
        let p = EditPrefs {
            double_click_to_edit: false,
            enter_is_newline: false,
        };
        row.double_click(&snapshot(true), &p);
        assert!(row.is_viewing());
        // The explicit command still works.
        row.begin_rename(&snapshot(true), &p);
        assert!(row.is_editing());
    }

    #[test]
    fn editing_and_armed_are_mutually_exclusive() {
        let mut row = RowInteraction::new();
        let snap = snapshot(true);
        row.begin_rename(&snap, &prefs());
        assert_eq!(row.delete_click(&snap), None);
        assert!(row.is_editing());
        assert!(!row.is_armed());

        let mut row = RowInteraction::new();
        row.delete_click(&snap);
        row.begin_rename(&snap, &prefs());
        assert!(row.is_armed());
        assert!(!row.is_editing());
    }

    #[test]
    fn click_while_editing_does_not_activate() {
        let mut row = RowInteraction::new();
        let snap = snapshot(false);
        row.begin_rename(&snap, &prefs());
        assert_eq!(row.click(&snap), None);
        assert!(row.is_editing());
    }

    #[test]
    fn commit_with_changed_text_emits_one_rename() {
        let mut row = RowInteraction::new();
        let snap = snapshot(true);
        row.begin_rename(&snap, &prefs());
        type_str(&mut row, &snap, "!");
        assert_eq!(
            row.edit_key(&snap, key(KeyCode::Enter)),
            Some(NavEffect::Rename {
                id: snap.id.clone(),
                title: "Chat 1!".to_string(),
            })
        );
        assert!(row.is_viewing());
    }

    #[test]
    fn commit_with_unchanged_text_emits_nothing() {
        let mut row = RowInteraction::new();
        let snap = snapshot(true);
        row.begin_rename(&snap, &prefs());
        assert_eq!(row.edit_key(&snap, key(KeyCode::Enter)), None);
        assert!(row.is_viewing());
    }

    #[test]
    fn blur_commits_like_submit() {
        let mut row = RowInteraction::new();
        let snap = snapshot(true);
        row.begin_rename(&snap, &prefs());
        type_str(&mut row, &snap, " renamed");
        assert_eq!(
            row.blur(&snap),
            Some(NavEffect::Rename {
                id: snap.id.clone(),
                title: "Chat 1 renamed".to_string(),
            })
        );
        assert!(row.is_viewing());
    }

    #[test]
    fn cancel_key_discards_draft() {
        let mut row = RowInteraction::new();
        let snap = snapshot(true);
        row.begin_rename(&snap, &prefs());
        type_str(&mut row, &snap, "xyz");
        assert_eq!(row.edit_key(&snap, key(KeyCode::Esc)), None);
        assert!(row.is_viewing());
    }
}
