//! Conversation records held by the store.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Opaque stable identifier of a conversation, unique across the list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConversationId(String);

static NEXT_ID: AtomicU64 = AtomicU64::new(0);

impl ConversationId {
    /// Mint a fresh identifier. Timestamp plus a process-local counter is
    /// enough for a single-user store file.
    pub fn generate() -> Self {
        let n = NEXT_ID.fetch_add(1, Ordering::Relaxed);
        Self(format!("conv-{}-{n}", Utc::now().timestamp_millis()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ConversationId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for ConversationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A chat conversation as the drawer sees it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conversation {
    pub id: ConversationId,
    /// Display title. May be empty; renderers substitute a placeholder.
    pub title: String,
    /// Number of messages exchanged so far.
    pub message_count: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Whether the assistant is currently producing a response. Transient,
    /// never persisted.
    #[serde(skip)]
    pub assistant_busy: bool,
}

impl Conversation {
    /// Create a brand-new conversation with no messages.
    pub fn new(title: String) -> Self {
        let now = Utc::now();
        Self {
            id: ConversationId::generate(),
            title,
            message_count: 0,
            created_at: now,
            updated_at: now,
            assistant_busy: false,
        }
    }
}
