/*!
Command handlers for the CLI

This module provides the handlers invoked by the CLI entrypoint.

It exposes two top-level command modules:

- `chat`    — Interactive chat session
- `history` — List, show, rename, and delete stored chats

These handlers are intentionally small and use the library components:
the chat store, the streaming session, and the storage adapters.
*/

use crate::config::Config;
use crate::error::Result;
use crate::storage::{KvStore, SledStore};
use crate::store::Chat;

pub mod chat;
pub mod history;

/// Open the configured durable storage
pub(crate) fn open_storage(config: &Config) -> Result<Box<dyn KvStore>> {
    let store = match &config.storage.path {
        Some(path) => SledStore::new_with_path(path)?,
        None => SledStore::new()?,
    };
    Ok(Box::new(store))
}

/// Resolve a chat id given in full or as a unique prefix
///
/// Returns `None` when nothing matches or the prefix is ambiguous.
pub(crate) fn resolve_chat_id(chats: &[Chat], needle: &str) -> Option<String> {
    if let Some(chat) = chats.iter().find(|c| c.id == needle) {
        return Some(chat.id.clone());
    }
    let mut matches = chats.iter().filter(|c| c.id.starts_with(needle));
    match (matches.next(), matches.next()) {
        (Some(chat), None) => Some(chat.id.clone()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chat_with_id(id: &str) -> Chat {
        let mut chat = Chat::new();
        chat.id = id.to_string();
        chat
    }

    #[test]
    fn test_resolve_exact_id() {
        let chats = vec![chat_with_id("abcd-1"), chat_with_id("abce-2")];
        assert_eq!(resolve_chat_id(&chats, "abcd-1").as_deref(), Some("abcd-1"));
    }

    #[test]
    fn test_resolve_unique_prefix() {
        let chats = vec![chat_with_id("abcd-1"), chat_with_id("abce-2")];
        assert_eq!(resolve_chat_id(&chats, "abcd").as_deref(), Some("abcd-1"));
    }

    #[test]
    fn test_resolve_ambiguous_prefix_fails() {
        let chats = vec![chat_with_id("abcd-1"), chat_with_id("abce-2")];
        assert!(resolve_chat_id(&chats, "abc").is_none());
    }

    #[test]
    fn test_resolve_unknown_id_fails() {
        let chats = vec![chat_with_id("abcd-1")];
        assert!(resolve_chat_id(&chats, "zzzz").is_none());
    }
}
