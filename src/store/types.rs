//! Core chat data types
//!
//! Messages are immutable once created: content is set exactly once at
//! construction time. Chats are append-only message sequences owned by
//! the [`ChatStore`](crate::store::ChatStore).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Author of a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Message typed by the user
    User,
    /// Message produced by the simulated assistant
    Assistant,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::User => write!(f, "user"),
            Self::Assistant => write!(f, "assistant"),
        }
    }
}

/// A single turn in a chat
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Unique message identifier (UUID v4)
    pub id: String,
    /// Role of the message author
    pub role: Role,
    /// Message content, set exactly once at creation
    pub content: String,
}

impl Message {
    /// Creates a new user message
    ///
    /// # Examples
    ///
    /// ```
    /// use banter::store::{Message, Role};
    ///
    /// let msg = Message::user("Hello!");
    /// assert_eq!(msg.role, Role::User);
    /// assert_eq!(msg.content, "Hello!");
    /// ```
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role: Role::User,
            content: content.into(),
        }
    }

    /// Creates a new assistant message
    ///
    /// # Examples
    ///
    /// ```
    /// use banter::store::{Message, Role};
    ///
    /// let msg = Message::assistant("Hi there!");
    /// assert_eq!(msg.role, Role::Assistant);
    /// ```
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Title given to every freshly created chat
pub const DEFAULT_CHAT_TITLE: &str = "New Chat";

/// Maximum number of characters taken from the first user message
/// when auto-titling a chat.
pub const AUTO_TITLE_CHARS: usize = 30;

/// A titled, ordered conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chat {
    /// Unique chat identifier (UUID v4)
    pub id: String,
    /// Display title
    pub title: String,
    /// Messages in send order, append-only
    pub messages: Vec<Message>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Set once the user renames the chat; suppresses auto-titling.
    /// Defaults to false when absent in previously persisted data.
    #[serde(default)]
    pub custom_title: bool,
}

impl Chat {
    /// Creates an empty chat with the default title
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: DEFAULT_CHAT_TITLE.to_string(),
            messages: Vec::new(),
            created_at: Utc::now(),
            custom_title: false,
        }
    }
}

impl Default for Chat {
    fn default() -> Self {
        Self::new()
    }
}

/// The persisted unit: every chat plus which one is active
///
/// Serialized as a single JSON blob under one fixed storage key on every
/// mutation, and deserialized once at startup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatCollection {
    /// Chats in creation order, newest first
    pub chats: Vec<Chat>,
    /// Identifier of the active chat, if any
    pub current_chat_id: Option<String>,
}
