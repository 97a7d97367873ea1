//! End-to-end test: streaming session over durable storage
//!
//! Drives a full send/stream/commit cycle against a sled-backed store and
//! verifies the finished conversation survives a reload.

use banter::session::{NoDelays, StreamingSession};
use banter::storage::SledStore;
use banter::store::{ChatStore, Role};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

#[tokio::test]
async fn test_completed_stream_is_persisted() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("chats.db");
    let reply = "streamed reply across several words";

    {
        let storage = SledStore::new_with_path(&db_path).expect("Failed to open store");
        let store = Arc::new(Mutex::new(ChatStore::load(Box::new(storage))));
        let session = StreamingSession::new(Arc::clone(&store), reply, Arc::new(NoDelays));

        let done = session.send_message("Tell me a joke").expect("send rejected");
        done.await.expect("stream task failed");
        // store (and the database lock) released at end of scope
    }

    let reloaded = ChatStore::load(Box::new(
        SledStore::new_with_path(&db_path).expect("Failed to reopen store"),
    ));
    let chat = reloaded.active_chat().expect("no active chat");
    assert_eq!(chat.title, "Tell me a joke");
    assert_eq!(chat.messages.len(), 2);
    assert_eq!(chat.messages[0].role, Role::User);
    assert_eq!(chat.messages[0].content, "Tell me a joke");
    assert_eq!(chat.messages[1].role, Role::Assistant);
    assert_eq!(chat.messages[1].content, reply);
}
