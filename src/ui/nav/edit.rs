//! Inline title editor: a draft string edited in place and committed or
//! discarded as a whole.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Which Enter combination commits the draft.
///
/// Mirrors the `enter_is_newline` preference: the commit combination and the
/// newline combination are always complementary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmitPolicy {
    /// Plain Enter commits; Shift+Enter or Alt+Enter inserts a newline.
    #[default]
    Enter,
    /// Shift+Enter or Alt+Enter commits; plain Enter inserts a newline.
    ModifiedEnter,
}

impl SubmitPolicy {
    /// Map the `enter_is_newline` preference onto a policy.
    pub fn from_enter_is_newline(enter_is_newline: bool) -> Self {
        if enter_is_newline {
            SubmitPolicy::ModifiedEnter
        } else {
            SubmitPolicy::Enter
        }
    }
}

/// Result of feeding one key (or a blur) to the editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    /// Editing continues.
    Pending,
    /// Draft finalized with the given text.
    Commit(String),
    /// Editing abandoned, draft discarded.
    Cancel,
}

/// An in-progress title edit.
///
/// Owns the draft text; the source title is never touched until commit. If
/// the title changes elsewhere while the edit is open, the draft is not
/// resynchronized (last write wins on commit).
#[derive(Debug, Clone)]
pub struct InlineEdit {
    draft: String,
    /// Byte offset of the cursor within `draft`, always on a char boundary.
    cursor: usize,
    policy: SubmitPolicy,
}

impl InlineEdit {
    /// Start an edit seeded with the current title, cursor at the end.
    pub fn new(initial_text: &str, policy: SubmitPolicy) -> Self {
        Self {
            draft: initial_text.to_string(),
            cursor: initial_text.len(),
            policy,
        }
    }

    /// Current draft text.
    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Cursor byte offset, for rendering.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Handle a key event while the editor has focus.
    ///
    /// The draft accepts no validation: an empty committed title is legal;
    /// trimming is the store's concern.
    pub fn handle_key(&mut self, key: KeyEvent) -> EditOutcome {
        match key.code {
            KeyCode::Enter => {
                let modified = key
                    .modifiers
                    .intersects(KeyModifiers::SHIFT | KeyModifiers::ALT);
                let commits = match self.policy {
                    SubmitPolicy::Enter => !modified,
                    SubmitPolicy::ModifiedEnter => modified,
                };
                if commits {
                    EditOutcome::Commit(self.draft.clone())
                } else {
                    self.insert('\n');
                    EditOutcome::Pending
                }
            }
            KeyCode::Esc => EditOutcome::Cancel,
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.insert(c);
                EditOutcome::Pending
            }
            KeyCode::Backspace => {
                if let Some(prev) = self.prev_boundary() {
                    self.draft.remove(prev);
                    self.cursor = prev;
                }
                EditOutcome::Pending
            }
            KeyCode::Delete => {
                if self.cursor < self.draft.len() {
                    self.draft.remove(self.cursor);
                }
                EditOutcome::Pending
            }
            KeyCode::Left => {
                if let Some(prev) = self.prev_boundary() {
                    self.cursor = prev;
                }
                EditOutcome::Pending
            }
            KeyCode::Right => {
                if self.cursor < self.draft.len() {
                    self.cursor += self.draft[self.cursor..]
                        .chars()
                        .next()
                        .map_or(1, char::len_utf8);
                }
                EditOutcome::Pending
            }
            KeyCode::Home => {
                self.cursor = 0;
                EditOutcome::Pending
            }
            KeyCode::End => {
                self.cursor = self.draft.len();
                EditOutcome::Pending
            }
            _ => EditOutcome::Pending,
        }
    }

    /// Focus left the editor for any reason other than submit/cancel keys.
    /// Treated as an implicit commit of the current draft.
    pub fn blur(&self) -> EditOutcome {
        EditOutcome::Commit(self.draft.clone())
    }

    fn insert(&mut self, c: char) {
        self.draft.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    /// Byte offset of the char boundary before the cursor, if any.
    fn prev_boundary(&self) -> Option<usize> {
        self.draft[..self.cursor].char_indices().last().map(|(i, _)| i)
    }
}
