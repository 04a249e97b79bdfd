//! Detail pane for the active conversation.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::chat::Conversation;

/// Read-only pane showing the active conversation's metadata.
pub struct DetailPane<'a> {
    conversation: Option<&'a Conversation>,
    max_messages: u32,
}

impl<'a> DetailPane<'a> {
    pub fn new(conversation: Option<&'a Conversation>, max_messages: u32) -> Self {
        Self {
            conversation,
            max_messages,
        }
    }
}

impl Widget for DetailPane<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(" Conversation ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));
        let inner = block.inner(area);
        block.render(area, buf);

        let Some(conv) = self.conversation else {
            Paragraph::new(Line::from(Span::styled(
                "No active conversation",
                Style::default().fg(Color::DarkGray),
            )))
            .render(inner, buf);
            return;
        };

        let title = if conv.title.is_empty() {
            "(untitled)"
        } else {
            &conv.title
        };

        let mut lines = vec![
            Line::from(Span::styled(
                title.to_string(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::default(),
            Line::from(vec![
                Span::styled("id        ", Style::default().fg(Color::DarkGray)),
                Span::raw(conv.id.to_string()),
            ]),
            Line::from(vec![
                Span::styled("messages  ", Style::default().fg(Color::DarkGray)),
                Span::raw(format!("{} / {}", conv.message_count, self.max_messages)),
            ]),
            Line::from(vec![
                Span::styled("created   ", Style::default().fg(Color::DarkGray)),
                Span::raw(conv.created_at.format("%Y-%m-%d %H:%M UTC").to_string()),
            ]),
            Line::from(vec![
                Span::styled("updated   ", Style::default().fg(Color::DarkGray)),
                Span::raw(conv.updated_at.format("%Y-%m-%d %H:%M UTC").to_string()),
            ]),
        ];

        if conv.assistant_busy {
            lines.push(Line::default());
            lines.push(Line::from(Span::styled(
                "assistant is responding...",
                Style::default().fg(Color::Yellow),
            )));
        }

        Paragraph::new(lines).render(inner, buf);
    }
}
