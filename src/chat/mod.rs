//! Conversation domain: records, persistence, and change watching.

mod conversation;
mod store;
mod watcher;

pub use conversation::{Conversation, ConversationId};
pub use store::ChatStore;
pub use watcher::StoreWatcher;
