//! Persistence for the conversation list and the active selection.
//!
//! A single JSON file holds both. Mutations are applied in memory first;
//! callers decide when to save. Save failures never flow back into row
//! interaction state; the drawer has already moved on.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::conversation::{Conversation, ConversationId};

/// On-disk layout of the store file.
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreFile {
    conversations: Vec<Conversation>,
    active_id: Option<ConversationId>,
}

/// The conversation store backing the drawer.
#[derive(Debug)]
pub struct ChatStore {
    path: PathBuf,
    conversations: Vec<Conversation>,
    active_id: Option<ConversationId>,
}

impl ChatStore {
    /// Load the store from `path`, seeding a first conversation when the
    /// file does not exist yet (the drawer always has at least one row to
    /// show, and a lonely row cannot be deleted).
    pub fn load(path: PathBuf) -> Result<Self> {
        let mut store = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read store file: {}", path.display()))?;
            let file: StoreFile = serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse store file: {}", path.display()))?;
            Self {
                path,
                conversations: file.conversations,
                active_id: file.active_id,
            }
        } else {
            Self {
                path,
                conversations: Vec::new(),
                active_id: None,
            }
        };

        if store.conversations.is_empty() {
            let conv = Conversation::new("New conversation".to_string());
            store.active_id = Some(conv.id.clone());
            store.conversations.push(conv);
        }
        store.ensure_active_exists();
        Ok(store)
    }

    /// Default store location under the user's data directory.
    pub fn default_path() -> Result<PathBuf> {
        let data_dir = dirs::data_dir().context("Could not find data directory")?;
        Ok(data_dir.join("convotui").join("conversations.json"))
    }

    /// Write the store to disk.
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create store directory: {}", parent.display())
            })?;
        }
        let file = StoreFile {
            conversations: self.conversations.clone(),
            active_id: self.active_id.clone(),
        };
        let contents =
            serde_json::to_string_pretty(&file).context("Failed to serialize store")?;
        fs::write(&self.path, contents)
            .with_context(|| format!("Failed to write store file: {}", self.path.display()))?;
        Ok(())
    }

    /// Re-read the file after an external change. The active selection is
    /// kept if the conversation still exists, otherwise it falls back to the
    /// first row.
    pub fn reload(&mut self) -> Result<()> {
        let previous_active = self.active_id.clone();
        let fresh = Self::load(self.path.clone())?;
        self.conversations = fresh.conversations;
        self.active_id = previous_active.or(fresh.active_id);
        self.ensure_active_exists();
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn conversations(&self) -> &[Conversation] {
        &self.conversations
    }

    pub fn len(&self) -> usize {
        self.conversations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conversations.is_empty()
    }

    pub fn active_id(&self) -> Option<&ConversationId> {
        self.active_id.as_ref()
    }

    pub fn is_active(&self, id: &ConversationId) -> bool {
        self.active_id.as_ref() == Some(id)
    }

    pub fn get(&self, id: &ConversationId) -> Option<&Conversation> {
        self.conversations.iter().find(|c| &c.id == id)
    }

    fn get_mut(&mut self, id: &ConversationId) -> Option<&mut Conversation> {
        self.conversations.iter_mut().find(|c| &c.id == id)
    }

    /// Make `id` the active conversation. Unknown ids are ignored.
    pub fn activate(&mut self, id: &ConversationId) -> bool {
        if self.get(id).is_some() {
            self.active_id = Some(id.clone());
            true
        } else {
            false
        }
    }

    /// Set a user-chosen title. Empty titles are stored as-is; display
    /// substitution happens at render time.
    pub fn set_user_title(&mut self, id: &ConversationId, title: &str) -> bool {
        if let Some(conv) = self.get_mut(id) {
            conv.title = title.to_string();
            conv.updated_at = Utc::now();
            true
        } else {
            false
        }
    }

    /// Remove a conversation. If it was active, activation falls back to
    /// the first remaining row.
    pub fn delete(&mut self, id: &ConversationId) -> bool {
        let before = self.conversations.len();
        self.conversations.retain(|c| &c.id != id);
        let removed = self.conversations.len() != before;
        if removed {
            self.ensure_active_exists();
        }
        removed
    }

    /// Append a fresh conversation and activate it.
    pub fn add_new(&mut self) -> ConversationId {
        let conv = Conversation::new(String::new());
        let id = conv.id.clone();
        self.conversations.push(conv);
        self.active_id = Some(id.clone());
        id
    }

    /// Flip the transient busy flag on a conversation.
    pub fn set_busy(&mut self, id: &ConversationId, busy: bool) -> bool {
        if let Some(conv) = self.get_mut(id) {
            conv.assistant_busy = busy;
            true
        } else {
            false
        }
    }

    fn ensure_active_exists(&mut self) {
        let exists = self
            .active_id
            .as_ref()
            .is_some_and(|id| self.get(id).is_some());
        if !exists {
            self.active_id = self.conversations.first().map(|c| c.id.clone());
        }
    }
}
