use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{poll, read, Event};
use ratatui::{
    backend::CrosstermBackend,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame, Terminal,
};

use crate::app::{ActionStatus, App, FEEDBACK_VISIBLE_MS};
use crate::handlers::keyboard::{handle_key_event, KeyAction};
use crate::handlers::mouse::handle_mouse_event;
use crate::ui::detail::DetailPane;
use crate::ui::layout::create_layout;
use crate::ui::nav::NavDrawer;

pub fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        // Check for external store-file changes and reload if needed
        app.check_store_updates();

        // One reconciliation pass per loop iteration: armed rows whose
        // conversation lost the active flag revert before the next frame
        app.reconcile_rows();

        // Draw UI
        terminal.draw(|f| draw_ui(f, app))?;

        // Handle events with timeout so reconciliation keeps ticking
        if poll(Duration::from_millis(50))? {
            match read()? {
                Event::Key(key) => match handle_key_event(app, key)? {
                    KeyAction::Continue => {}
                    KeyAction::Quit => return Ok(()),
                },
                Event::Mouse(mouse) => {
                    handle_mouse_event(app, mouse);
                }
                Event::Resize(w, h) => {
                    app.term_size = (w, h);
                }
                _ => {}
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn draw_ui(f: &mut Frame, app: &mut App) {
    let (drawer_area, detail_area, help_area) = create_layout(f.area(), &app.config.layout);

    let snapshots = app.snapshots();

    if drawer_area.width > 0 {
        let drawer = NavDrawer::new(&snapshots, true, app.config.show_symbols);
        f.render_stateful_widget(drawer, drawer_area, &mut app.nav);

        // Cache inner area and scroll offset for mouse coordinate mapping
        // (area minus 1px border)
        app.drawer_inner = Some(Rect {
            x: drawer_area.x + 1,
            y: drawer_area.y + 1,
            width: drawer_area.width.saturating_sub(2),
            height: drawer_area.height.saturating_sub(2),
        });
        app.drawer_offset = app.nav.list_state.offset();
    } else {
        app.drawer_inner = None;
    }

    let detail = DetailPane::new(app.active_conversation(), app.config.max_chat_messages);
    f.render_widget(detail, detail_area);

    draw_help_bar(f, help_area, app);
}

fn draw_help_bar(f: &mut Frame, area: Rect, app: &App) {
    // Editing hint comes first since the keys change meaning entirely
    if app.nav.editing_index().is_some() {
        let submit_hint = if app.config.editing.enter_is_newline {
            " Shift+Enter save  Enter newline  Esc cancel  click elsewhere saves"
        } else {
            " Enter save  Shift+Enter newline  Esc cancel  click elsewhere saves"
        };
        let msg = Paragraph::new(Line::from(vec![
            Span::styled(
                " EDITING ",
                Style::default().fg(Color::Black).bg(Color::Yellow),
            ),
            Span::raw(submit_hint),
        ]))
        .style(Style::default().bg(Color::DarkGray));
        f.render_widget(msg, area);
        return;
    }

    // Pending delete on the selected row
    let selected_armed = app
        .nav
        .selected()
        .and_then(|i| app.nav.interaction(i))
        .is_some_and(|i| i.is_armed());
    if selected_armed {
        let msg = Paragraph::new(Line::from(vec![
            Span::styled(" ARMED ", Style::default().fg(Color::Black).bg(Color::Red)),
            Span::raw(" d/Enter delete  Esc cancel"),
        ]))
        .style(Style::default().bg(Color::DarkGray));
        f.render_widget(msg, area);
        return;
    }

    // Recent action feedback (visible for 2 seconds)
    if let Some(status) = app.action_status.recent(FEEDBACK_VISIBLE_MS) {
        let (label, label_bg, text) = match status {
            ActionStatus::Renamed { title, .. } => {
                (" RENAMED ", Color::Green, format!(" {title}"))
            }
            ActionStatus::Deleted { title, .. } => (
                " DELETED ",
                Color::Green,
                if title.is_empty() {
                    " (untitled)".to_string()
                } else {
                    format!(" {title}")
                },
            ),
            ActionStatus::Reloaded { .. } => (
                " RELOADED ",
                Color::Green,
                " Conversation list updated".to_string(),
            ),
            ActionStatus::SaveFailed { message, .. } => {
                (" SAVE FAILED ", Color::Red, format!(" {message}"))
            }
            ActionStatus::None => unreachable!("recent() filters None"),
        };
        let msg = Paragraph::new(Line::from(vec![
            Span::styled(label, Style::default().fg(Color::Black).bg(label_bg)),
            Span::raw(text),
        ]))
        .style(Style::default().bg(Color::DarkGray));
        f.render_widget(msg, area);
        return;
    }

    let help = Paragraph::new(Line::from(vec![
        Span::styled(" j/k ", Style::default().fg(Color::Cyan)),
        Span::raw("nav "),
        Span::styled(" Enter ", Style::default().fg(Color::Cyan)),
        Span::raw("open "),
        Span::styled(" r ", Style::default().fg(Color::Cyan)),
        Span::raw("rename "),
        Span::styled(" dd ", Style::default().fg(Color::Cyan)),
        Span::raw("delete "),
        Span::styled(" a ", Style::default().fg(Color::Cyan)),
        Span::raw("new "),
        Span::styled(" M-b ", Style::default().fg(Color::Cyan)),
        Span::raw("drawer "),
        Span::styled(" q ", Style::default().fg(Color::Cyan)),
        Span::raw("quit"),
    ]))
    .style(Style::default().bg(Color::DarkGray));
    f.render_widget(help, area);
}
