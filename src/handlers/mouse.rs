//! Mouse routing: drawer hit testing, double-click promotion, and
//! blur-on-outside-click for the inline editor.

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

use crate::app::App;
use crate::ui::nav::{hit_test, RowHit, RowZone};

pub fn handle_mouse_event(app: &mut App, mouse: MouseEvent) {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            handle_left_click(app, mouse.column, mouse.row);
        }
        MouseEventKind::ScrollUp => app.nav.cursor_up(),
        MouseEventKind::ScrollDown => app.nav.cursor_down(),
        _ => {}
    }
}

fn handle_left_click(app: &mut App, column: u16, row: u16) {
    let snaps = app.snapshots();
    let hit = app.drawer_inner.and_then(|inner| {
        hit_test(
            inner,
            app.drawer_offset,
            &snaps,
            &app.nav.armed_flags(),
            column,
            row,
        )
    });

    // Any click outside the editing row's text region blurs the editor,
    // committing the draft. A click inside it stays with the editor.
    if let Some(edit_index) = app.nav.editing_index() {
        let inside_editor = matches!(
            hit,
            Some(RowHit {
                index,
                zone: RowZone::Body,
            }) if index == edit_index
        );
        if inside_editor {
            return;
        }
        if let Some(effect) = app.nav.blur_editing(&snaps) {
            app.apply(effect);
        }
    }

    let Some(RowHit { index, zone }) = hit else {
        return;
    };
    app.nav.select(index);

    let effect = match zone {
        RowZone::Delete => {
            app.last_click = None;
            app.nav.delete_click(index, &snaps)
        }
        RowZone::Confirm => {
            app.last_click = None;
            app.nav.confirm_click(index, &snaps)
        }
        RowZone::Cancel => {
            app.last_click = None;
            app.nav.cancel_click(index);
            None
        }
        RowZone::Body => {
            if app.register_click(index) {
                let prefs = app.edit_prefs();
                app.nav.double_click(index, &snaps, &prefs);
                None
            } else {
                app.nav.click(index, &snaps)
            }
        }
    };
    if let Some(effect) = effect {
        app.apply(effect);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::ChatStore;
    use crate::config::Config;
    use crossterm::event::KeyModifiers;
    use ratatui::layout::Rect;

    fn click_at(app: &mut App, column: u16, row: u16) {
        handle_mouse_event(
            app,
            MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column,
                row,
                modifiers: KeyModifiers::NONE,
            },
        );
    }

    /// App with two conversations (second active) and a rendered drawer
    /// area: rows at y=1 and y=2, delete glyph in the last two columns.
    fn test_app() -> (tempfile::TempDir, App) {
        let dir = tempfile::tempdir().unwrap();
        let store = ChatStore::load(dir.path().join("conversations.json")).unwrap();
        let mut app = App::with_store(store, Config::default());
        app.new_conversation();
        app.reconcile_rows();
        app.drawer_inner = Some(Rect {
            x: 1,
            y: 1,
            width: 30,
            height: 10,
        });
        app.drawer_offset = 0;
        (dir, app)
    }

    #[test]
    fn body_click_on_inactive_row_activates_it() {
        let (_dir, mut app) = test_app();
        let first = app.store.conversations()[0].id.clone();
        click_at(&mut app, 5, 1);
        assert!(app.store.is_active(&first));
        assert_eq!(app.nav.selected(), Some(0));
    }

    #[test]
    fn body_click_on_active_row_is_swallowed() {
        let (_dir, mut app) = test_app();
        let active = app.store.active_id().cloned();
        // Outside the double-click window each click is a fresh single click.
        click_at(&mut app, 5, 2);
        app.last_click = None;
        click_at(&mut app, 5, 2);
        assert_eq!(app.store.active_id().cloned(), active);
        assert!(app.nav.interaction(1).unwrap().is_viewing());
    }

    #[test]
    fn delete_glyph_click_on_inactive_row_activates_without_arming() {
        let (_dir, mut app) = test_app();
        let first = app.store.conversations()[0].id.clone();
        click_at(&mut app, 30, 1);
        assert!(app.store.is_active(&first));
        assert!(app.nav.interaction(0).unwrap().is_viewing());
    }

    #[test]
    fn delete_then_confirm_clicks_remove_the_active_row() {
        let (_dir, mut app) = test_app();
        let second = app.store.conversations()[1].id.clone();
        click_at(&mut app, 30, 2);
        assert!(app.nav.interaction(1).unwrap().is_armed());

        // Confirm is the left half of the armed pair.
        click_at(&mut app, 27, 2);
        assert_eq!(app.store.len(), 1);
        assert!(app.store.get(&second).is_none());
    }

    #[test]
    fn cancel_click_disarms_without_deleting() {
        let (_dir, mut app) = test_app();
        click_at(&mut app, 30, 2);
        assert!(app.nav.interaction(1).unwrap().is_armed());
        click_at(&mut app, 30, 2);
        assert!(app.nav.interaction(1).unwrap().is_viewing());
        assert_eq!(app.store.len(), 2);
    }

    #[test]
    fn double_click_opens_the_inline_editor() {
        let (_dir, mut app) = test_app();
        click_at(&mut app, 5, 2);
        click_at(&mut app, 5, 2);
        assert_eq!(app.nav.editing_index(), Some(1));
    }

    #[test]
    fn double_click_respects_the_disabled_preference() {
        let (_dir, mut app) = test_app();
        app.config.editing.double_click_to_edit = false;
        click_at(&mut app, 5, 2);
        click_at(&mut app, 5, 2);
        assert_eq!(app.nav.editing_index(), None);
    }

    #[test]
    fn click_outside_the_editing_row_commits_the_draft() {
        let (_dir, mut app) = test_app();
        let id = app.store.conversations()[1].id.clone();
        app.store.set_user_title(&id, "Chat 1");

        let snaps = app.snapshots();
        let prefs = app.edit_prefs();
        app.nav.begin_rename(1, &snaps, &prefs);
        app.nav.edit_key(
            1,
            &snaps,
            crossterm::event::KeyEvent::new(
                crossterm::event::KeyCode::Char('!'),
                KeyModifiers::NONE,
            ),
        );

        // Click the other row: the draft commits, then the click activates.
        click_at(&mut app, 5, 1);
        assert_eq!(app.store.get(&id).unwrap().title, "Chat 1!");
        assert_eq!(app.nav.editing_index(), None);
        let first = app.store.conversations()[0].id.clone();
        assert!(app.store.is_active(&first));
    }

    #[test]
    fn click_inside_the_editing_row_keeps_the_editor_open() {
        let (_dir, mut app) = test_app();
        let snaps = app.snapshots();
        let prefs = app.edit_prefs();
        app.nav.begin_rename(1, &snaps, &prefs);

        click_at(&mut app, 5, 2);
        assert_eq!(app.nav.editing_index(), Some(1));
    }

    #[test]
    fn click_outside_the_drawer_blurs_the_editor() {
        let (_dir, mut app) = test_app();
        let id = app.store.conversations()[1].id.clone();
        app.store.set_user_title(&id, "Chat 1");

        let snaps = app.snapshots();
        let prefs = app.edit_prefs();
        app.nav.begin_rename(1, &snaps, &prefs);
        app.nav.edit_key(
            1,
            &snaps,
            crossterm::event::KeyEvent::new(
                crossterm::event::KeyCode::Char('!'),
                KeyModifiers::NONE,
            ),
        );

        click_at(&mut app, 70, 5);
        assert_eq!(app.store.get(&id).unwrap().title, "Chat 1!");
        assert_eq!(app.nav.editing_index(), None);
    }

    #[test]
    fn scroll_moves_the_cursor() {
        let (_dir, mut app) = test_app();
        app.nav.select(1);
        handle_mouse_event(
            &mut app,
            MouseEvent {
                kind: MouseEventKind::ScrollUp,
                column: 5,
                row: 2,
                modifiers: KeyModifiers::NONE,
            },
        );
        assert_eq!(app.nav.selected(), Some(0));
    }
}
