//! Chat store: the single source of truth for all chats
//!
//! The store owns the chat collection, tracks which chat is active, and
//! mediates every mutation. Each successful mutation is followed by a
//! full-collection persist to the injected key-value store. Persistence is
//! best-effort: a failed write is logged and not retried, and the in-memory
//! state stays authoritative for the rest of the session.

use crate::storage::{KvStore, CHATS_KEY};

pub mod types;
pub use types::{Chat, ChatCollection, Message, Role, AUTO_TITLE_CHARS, DEFAULT_CHAT_TITLE};

/// Owns the chat collection and the active chat id
///
/// Constructed once per process with an injected storage adapter. All
/// operations referencing an unknown chat id are silent no-ops, matching
/// the error model of the surrounding application: bad input never panics
/// and never surfaces an error to the display layer.
pub struct ChatStore {
    collection: ChatCollection,
    storage: Box<dyn KvStore>,
}

impl ChatStore {
    /// Load the store from durable storage
    ///
    /// A missing or unparseable blob is treated as "no prior state": the
    /// store starts with a single fresh default chat, active. This is a
    /// recoverable fallback, not a fatal condition.
    pub fn load(storage: Box<dyn KvStore>) -> Self {
        let collection = match storage.load(CHATS_KEY) {
            Ok(Some(blob)) => match serde_json::from_str::<ChatCollection>(&blob) {
                Ok(collection) => {
                    tracing::debug!(chats = collection.chats.len(), "loaded chat history");
                    Some(collection)
                }
                Err(e) => {
                    tracing::warn!("discarding unparseable chat history: {}", e);
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                tracing::warn!("failed to read chat history: {}", e);
                None
            }
        };

        let mut store = Self {
            collection: collection.unwrap_or_default(),
            storage,
        };

        if store.collection.chats.is_empty() {
            store.create_chat();
        }

        store
    }

    /// Create a new empty chat, insert it at the front, and make it active
    ///
    /// Always succeeds; returns the new chat's id.
    pub fn create_chat(&mut self) -> String {
        let chat = Chat::new();
        let id = chat.id.clone();
        self.collection.chats.insert(0, chat);
        self.collection.current_chat_id = Some(id.clone());
        tracing::debug!(chat_id = %id, "created chat");
        self.persist();
        id
    }

    /// Make `chat_id` the active chat if it exists; otherwise no-op
    pub fn select_chat(&mut self, chat_id: &str) {
        if self.collection.chats.iter().any(|c| c.id == chat_id) {
            self.collection.current_chat_id = Some(chat_id.to_string());
            self.persist();
        } else {
            tracing::debug!(chat_id = %chat_id, "select ignored: unknown chat");
        }
    }

    /// Remove the chat with `chat_id` if present
    ///
    /// If the deleted chat was active, the new first chat in the remaining
    /// collection becomes active, or none if the collection is now empty.
    pub fn delete_chat(&mut self, chat_id: &str) {
        let before = self.collection.chats.len();
        self.collection.chats.retain(|c| c.id != chat_id);
        if self.collection.chats.len() == before {
            return;
        }

        if self.collection.current_chat_id.as_deref() == Some(chat_id) {
            self.collection.current_chat_id =
                self.collection.chats.first().map(|c| c.id.clone());
        }
        tracing::debug!(chat_id = %chat_id, "deleted chat");
        self.persist();
    }

    /// Set the title of the chat with `chat_id`
    ///
    /// No-op if the chat does not exist or the trimmed title is empty. A
    /// successful rename freezes auto-titling for that chat permanently.
    pub fn rename_chat(&mut self, chat_id: &str, new_title: &str) {
        let title = new_title.trim();
        if title.is_empty() {
            return;
        }
        if let Some(chat) = self.collection.chats.iter_mut().find(|c| c.id == chat_id) {
            chat.title = title.to_string();
            chat.custom_title = true;
            self.persist();
        }
    }

    /// Append a user message to the chat with `chat_id`
    ///
    /// No-op if the chat does not exist or the trimmed content is empty.
    /// The first message appended to an empty chat auto-titles it with the
    /// first [`AUTO_TITLE_CHARS`] characters of the content, unless the
    /// chat was renamed earlier.
    pub fn append_user_message(&mut self, chat_id: &str, content: &str) {
        if content.trim().is_empty() {
            return;
        }
        if let Some(chat) = self.collection.chats.iter_mut().find(|c| c.id == chat_id) {
            if chat.messages.is_empty() && !chat.custom_title {
                chat.title = content.chars().take(AUTO_TITLE_CHARS).collect();
            }
            chat.messages.push(Message::user(content));
            self.persist();
        }
    }

    /// Append an assistant message to the chat with `chat_id`
    ///
    /// The content may be the partial accumulated text of a cancelled
    /// stream. No-op if the chat does not exist.
    pub fn append_assistant_message(&mut self, chat_id: &str, content: &str) {
        if let Some(chat) = self.collection.chats.iter_mut().find(|c| c.id == chat_id) {
            chat.messages.push(Message::assistant(content));
            self.persist();
        }
    }

    /// The chat matching the active id, or the first chat as a fallback
    ///
    /// The fallback keeps the display layer supplied with something to
    /// show whenever any chat exists, even if the active id is stale.
    pub fn active_chat(&self) -> Option<&Chat> {
        self.collection
            .current_chat_id
            .as_deref()
            .and_then(|id| self.collection.chats.iter().find(|c| c.id == id))
            .or_else(|| self.collection.chats.first())
    }

    /// All chats, newest-created first
    pub fn chats(&self) -> &[Chat] {
        &self.collection.chats
    }

    /// Identifier of the active chat, if any
    pub fn current_chat_id(&self) -> Option<&str> {
        self.collection.current_chat_id.as_deref()
    }

    /// Persist the full collection under the fixed storage key
    ///
    /// Failures are logged and swallowed; the caller's mutation has
    /// already taken effect in memory.
    fn persist(&self) {
        let blob = match serde_json::to_string(&self.collection) {
            Ok(blob) => blob,
            Err(e) => {
                tracing::warn!("failed to serialize chat history: {}", e);
                return;
            }
        };
        if let Err(e) = self.storage.save(CHATS_KEY, &blob) {
            tracing::warn!("failed to persist chat history: {}", e);
        }
    }
}
