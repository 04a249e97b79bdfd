//! Keyboard routing. Every row gesture funnels into the same per-row state
//! machine the mouse paths use.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::App;
use crate::ui::nav::RowSnapshot;

/// Action returned from key handling
pub enum KeyAction {
    Continue,
    Quit,
}

pub fn handle_key_event(app: &mut App, key: KeyEvent) -> Result<KeyAction> {
    // True global keybinding, works even while editing
    if key.code == KeyCode::Char('q') && key.modifiers == KeyModifiers::CONTROL {
        return Ok(KeyAction::Quit);
    }

    let snaps = app.snapshots();

    // An open editor captures every key before normal bindings.
    if let Some(index) = app.nav.editing_index() {
        if let Some(effect) = app.nav.edit_key(index, &snaps, key) {
            app.apply(effect);
        }
        return Ok(KeyAction::Continue);
    }

    match (key.code, key.modifiers) {
        (KeyCode::Char('q'), KeyModifiers::NONE) => return Ok(KeyAction::Quit),
        // Toggle drawer minimized (Alt+B to avoid conflict with Ctrl+B in terminals)
        (KeyCode::Char('b'), KeyModifiers::ALT) => app.toggle_drawer_minimized(),
        _ => handle_drawer_key(app, key, &snaps),
    }
    Ok(KeyAction::Continue)
}

fn handle_drawer_key(app: &mut App, key: KeyEvent, snaps: &[RowSnapshot]) {
    match key.code {
        // Navigation
        KeyCode::Char('j') | KeyCode::Down => app.nav.cursor_down(),
        KeyCode::Char('k') | KeyCode::Up => app.nav.cursor_up(),
        KeyCode::Char('g') => app.nav.cursor_to_first(),
        KeyCode::Char('G') => app.nav.cursor_to_last(),

        // Enter activates, or confirms a pending delete on an armed row
        KeyCode::Enter => {
            let Some(index) = app.nav.selected() else { return };
            let armed = app.nav.interaction(index).is_some_and(|i| i.is_armed());
            let effect = if armed {
                app.nav.confirm_click(index, snaps)
            } else {
                app.nav.click(index, snaps)
            };
            if let Some(effect) = effect {
                app.apply(effect);
            }
        }

        // Explicit rename trigger; works even when double-click-to-edit is off
        KeyCode::Char('r') | KeyCode::F(2) => {
            let Some(index) = app.nav.selected() else { return };
            let prefs = app.edit_prefs();
            app.nav.begin_rename(index, snaps, &prefs);
        }

        // 'd' is the delete affordance: first press arms (or selects an
        // inactive row), second press confirms
        KeyCode::Char('d') => {
            let Some(index) = app.nav.selected() else { return };
            let armed = app.nav.interaction(index).is_some_and(|i| i.is_armed());
            let effect = if armed {
                app.nav.confirm_click(index, snaps)
            } else {
                app.nav.delete_click(index, snaps)
            };
            if let Some(effect) = effect {
                app.apply(effect);
            }
        }

        // Esc backs out of a pending delete
        KeyCode::Esc => {
            if let Some(index) = app.nav.selected() {
                app.nav.cancel_click(index);
            }
        }

        // 'a' adds a new conversation
        KeyCode::Char('a') => app.new_conversation(),

        // 'b' flips the busy flag on the selected row (typing indicator)
        KeyCode::Char('b') => app.toggle_busy_selected(),

        _ => {}
    }
}
