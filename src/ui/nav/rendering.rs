//! Drawer widget rendering and the mouse hit zones that mirror it.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, StatefulWidget, Widget},
};

use super::{InlineEdit, NavListState, RowSnapshot};

/// Columns reserved at the right edge of each row for the delete / confirm /
/// cancel affordances. Hit testing and rendering must agree on this.
const ACTION_COLS: u16 = 4;

/// Cells in the per-row progress bar.
const PROGRESS_CELLS: u32 = 8;

/// Drawer widget listing conversation rows.
pub struct NavDrawer<'a> {
    snapshots: &'a [RowSnapshot],
    focused: bool,
    show_symbols: bool,
}

impl<'a> NavDrawer<'a> {
    pub fn new(snapshots: &'a [RowSnapshot], focused: bool, show_symbols: bool) -> Self {
        Self {
            snapshots,
            focused,
            show_symbols,
        }
    }
}

impl StatefulWidget for NavDrawer<'_> {
    type State = NavListState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let border_style = if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let block = Block::default()
            .title(" Conversations ")
            .borders(Borders::ALL)
            .border_style(border_style);

        let inner_area = block.inner(area);
        block.render(area, buf);

        let items = build_row_items(self.snapshots, state, inner_area.width, self.show_symbols);
        // No highlight symbol: it would shift the selected row's columns and
        // desync the hit zones.
        let list = List::new(items).highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        );

        StatefulWidget::render(list, inner_area, buf, &mut state.list_state);
    }
}

/// Build one list item per row.
fn build_row_items(
    snapshots: &[RowSnapshot],
    state: &NavListState,
    width: u16,
    show_symbols: bool,
) -> Vec<ListItem<'static>> {
    snapshots
        .iter()
        .enumerate()
        .map(|(index, snap)| {
            let interaction = state.interaction(index);
            let editor = interaction.and_then(|i| i.editor());
            let armed = interaction.is_some_and(|i| i.is_armed());
            ListItem::new(row_line(snap, editor, armed, width, show_symbols))
        })
        .collect()
}

fn row_line(
    snap: &RowSnapshot,
    editor: Option<&InlineEdit>,
    armed: bool,
    width: u16,
    show_symbols: bool,
) -> Line<'static> {
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut used: usize = 0;

    if show_symbols {
        let (glyph, style) = if snap.is_busy {
            ("◌ ", Style::default().fg(Color::Yellow))
        } else if snap.is_new() {
            ("· ", Style::default().fg(Color::DarkGray))
        } else {
            ("● ", Style::default().fg(Color::Blue))
        };
        spans.push(Span::styled(glyph, style));
        used += 2;
    }

    let actions = action_spans(snap, armed);
    let action_width: usize = if actions.is_empty() {
        0
    } else {
        ACTION_COLS as usize
    };

    let bar = progress_spans(snap);
    let bar_width: usize = if bar.is_empty() {
        0
    } else {
        PROGRESS_CELLS as usize + 1
    };

    let avail = (width as usize)
        .saturating_sub(used)
        .saturating_sub(action_width)
        .saturating_sub(bar_width);

    match editor {
        Some(edit) => spans.extend(editor_spans(edit, avail)),
        None => {
            let title_style = if snap.is_active {
                Style::default().add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            let title = fit_text(&snap.display_title(), avail);
            let pad = avail.saturating_sub(title.chars().count());
            spans.push(Span::styled(title, title_style));
            spans.push(Span::raw(" ".repeat(pad)));
        }
    }

    spans.extend(bar);
    spans.extend(actions);
    Line::from(spans)
}

/// Right-edge affordances: a delete glyph, or the confirm/cancel pair while
/// armed. A lonely row renders nothing at all here.
fn action_spans(snap: &RowSnapshot, armed: bool) -> Vec<Span<'static>> {
    if snap.is_lonely {
        return Vec::new();
    }
    if armed {
        vec![
            Span::styled("✓ ", Style::default().fg(Color::Red)),
            Span::styled("✕ ", Style::default().fg(Color::Gray)),
        ]
    } else {
        vec![
            Span::raw("  "),
            Span::styled("✕ ", Style::default().fg(Color::DarkGray)),
        ]
    }
}

/// Compact message-budget bar. Hidden at zero; a conversation past its
/// budget clips to a full bar (clipping is a render decision).
fn progress_spans(snap: &RowSnapshot) -> Vec<Span<'static>> {
    let percent = snap.progress_percent();
    if percent <= 0.0 {
        return Vec::new();
    }
    let filled = ((percent / 100.0 * f64::from(PROGRESS_CELLS)).round() as u32)
        .clamp(1, PROGRESS_CELLS) as usize;
    let empty = PROGRESS_CELLS as usize - filled;
    vec![
        Span::styled("▰".repeat(filled), Style::default().fg(Color::Cyan)),
        Span::styled("▱".repeat(empty), Style::default().fg(Color::DarkGray)),
        Span::raw(" "),
    ]
}

/// Render the open editor: draft text with a block cursor, scrolled so the
/// cursor stays visible. Literal newlines in the draft display as ↵.
fn editor_spans(edit: &InlineEdit, avail: usize) -> Vec<Span<'static>> {
    let draft: String = edit
        .draft()
        .chars()
        .map(|c| if c == '\n' { '↵' } else { c })
        .collect();
    let cursor_pos = edit.draft()[..edit.cursor()].chars().count();

    let chars: Vec<char> = draft.chars().collect();
    let (start, cursor_offset) = if avail == 0 || cursor_pos < avail {
        (0, cursor_pos)
    } else {
        (cursor_pos - avail + 1, avail - 1)
    };
    let visible: Vec<char> = chars.iter().skip(start).take(avail).copied().collect();

    let style = Style::default().fg(Color::Yellow);
    let mut spans = Vec::new();
    for (i, c) in visible.iter().enumerate() {
        if i == cursor_offset {
            spans.push(Span::styled(
                c.to_string(),
                Style::default().bg(Color::White).fg(Color::Black),
            ));
        } else {
            spans.push(Span::styled(c.to_string(), style));
        }
    }
    // Block cursor at end of text
    if cursor_offset >= visible.len() && avail > visible.len() {
        spans.push(Span::styled(" ", Style::default().bg(Color::White)));
    }
    let drawn = visible.len().max(cursor_offset + 1).min(avail);
    if avail > drawn {
        spans.push(Span::raw(" ".repeat(avail - drawn)));
    }
    spans
}

fn fit_text(text: &str, avail: usize) -> String {
    let flat: String = text
        .chars()
        .map(|c| if c == '\n' { '↵' } else { c })
        .collect();
    if flat.chars().count() <= avail {
        flat
    } else {
        flat.chars().take(avail.saturating_sub(1)).collect::<String>() + "…"
    }
}

/// Which part of a row a mouse position landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowZone {
    /// The text region (glyph + title).
    Body,
    /// The delete-arm glyph.
    Delete,
    /// Confirm half of the armed icon pair.
    Confirm,
    /// Cancel half of the armed icon pair.
    Cancel,
}

/// A resolved mouse hit inside the drawer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowHit {
    pub index: usize,
    pub zone: RowZone,
}

/// Map a screen position to a row and zone. `inner` is the drawer area
/// inside the borders; `offset` is the list scroll offset at render time.
pub fn hit_test(
    inner: Rect,
    offset: usize,
    snapshots: &[RowSnapshot],
    armed: &[bool],
    column: u16,
    row: u16,
) -> Option<RowHit> {
    if column < inner.x
        || column >= inner.x + inner.width
        || row < inner.y
        || row >= inner.y + inner.height
    {
        return None;
    }

    let index = offset + (row - inner.y) as usize;
    let snap = snapshots.get(index)?;

    // A lonely row has no action affordances; everything is body.
    if snap.is_lonely {
        return Some(RowHit {
            index,
            zone: RowZone::Body,
        });
    }

    let right = inner.x + inner.width;
    let zone = if armed.get(index).copied().unwrap_or(false) {
        if column >= right.saturating_sub(2) {
            RowZone::Cancel
        } else if column >= right.saturating_sub(ACTION_COLS) {
            RowZone::Confirm
        } else {
            RowZone::Body
        }
    } else if column >= right.saturating_sub(2) {
        RowZone::Delete
    } else {
        RowZone::Body
    };

    Some(RowHit { index, zone })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::ConversationId;

    fn snaps(n: usize, lonely: bool) -> Vec<RowSnapshot> {
        (0..n)
            .map(|i| RowSnapshot {
                id: ConversationId::from(format!("c{i}").as_str()),
                is_active: i == 0,
                title: format!("Chat {i}"),
                message_count: 0,
                max_messages: 20,
                is_busy: false,
                is_lonely: lonely,
            })
            .collect()
    }

    fn inner() -> Rect {
        Rect {
            x: 1,
            y: 1,
            width: 30,
            height: 10,
        }
    }

    #[test]
    fn hit_outside_the_drawer_misses() {
        let snaps = snaps(2, false);
        let armed = vec![false, false];
        assert_eq!(hit_test(inner(), 0, &snaps, &armed, 0, 2), None);
        assert_eq!(hit_test(inner(), 0, &snaps, &armed, 5, 0), None);
        assert_eq!(hit_test(inner(), 0, &snaps, &armed, 31, 2), None);
    }

    #[test]
    fn hit_below_the_last_row_misses() {
        let snaps = snaps(2, false);
        let armed = vec![false, false];
        assert_eq!(hit_test(inner(), 0, &snaps, &armed, 5, 5), None);
    }

    #[test]
    fn body_and_delete_zones_for_unarmed_row() {
        let snaps = snaps(2, false);
        let armed = vec![false, false];
        assert_eq!(
            hit_test(inner(), 0, &snaps, &armed, 5, 1),
            Some(RowHit {
                index: 0,
                zone: RowZone::Body,
            })
        );
        // Rightmost two columns are the delete glyph.
        assert_eq!(
            hit_test(inner(), 0, &snaps, &armed, 29, 1),
            Some(RowHit {
                index: 0,
                zone: RowZone::Delete,
            })
        );
        assert_eq!(
            hit_test(inner(), 0, &snaps, &armed, 30, 1),
            Some(RowHit {
                index: 0,
                zone: RowZone::Delete,
            })
        );
        assert_eq!(
            hit_test(inner(), 0, &snaps, &armed, 28, 1),
            Some(RowHit {
                index: 0,
                zone: RowZone::Body,
            })
        );
    }

    #[test]
    fn armed_row_splits_into_confirm_and_cancel() {
        let snaps = snaps(2, false);
        let armed = vec![true, false];
        assert_eq!(
            hit_test(inner(), 0, &snaps, &armed, 27, 1).unwrap().zone,
            RowZone::Confirm
        );
        assert_eq!(
            hit_test(inner(), 0, &snaps, &armed, 29, 1).unwrap().zone,
            RowZone::Cancel
        );
        assert_eq!(
            hit_test(inner(), 0, &snaps, &armed, 20, 1).unwrap().zone,
            RowZone::Body
        );
    }

    #[test]
    fn lonely_row_is_all_body() {
        let snaps = snaps(1, true);
        let armed = vec![false];
        assert_eq!(
            hit_test(inner(), 0, &snaps, &armed, 30, 1).unwrap().zone,
            RowZone::Body
        );
    }

    #[test]
    fn scroll_offset_shifts_row_indices() {
        let snaps = snaps(8, false);
        let armed = vec![false; 8];
        assert_eq!(
            hit_test(inner(), 3, &snaps, &armed, 5, 2).unwrap().index,
            4
        );
    }

    #[test]
    fn progress_bar_hidden_at_zero_and_clipped_past_budget() {
        let mut snap = snaps(1, false).remove(0);
        assert!(progress_spans(&snap).is_empty());

        snap.message_count = 60; // 300% of budget
        let spans = progress_spans(&snap);
        assert_eq!(spans[0].content.chars().count(), PROGRESS_CELLS as usize);
        assert_eq!(spans[1].content.chars().count(), 0);
    }
}
