//! Banter - local chat playground with a simulated streaming assistant
//!
//! This library provides the core functionality for the Banter chat
//! application: the chat store, the streaming-response simulator, and the
//! durable persistence layer. There is no backend; assistant replies are
//! synthesized locally by replaying a fixed text in incremental chunks.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `store`: Chat collection, active chat, and all chat mutations
//! - `session`: Streaming session lifecycle, chunking, and cancellation
//! - `storage`: Key-value persistence seam (`sled` and in-memory)
//! - `config`: Configuration management and validation
//! - `error`: Error types and result aliases
//! - `cli`: Command-line interface definition
//!
//! # Example
//!
//! ```
//! use banter::session::{NoDelays, StreamingSession};
//! use banter::storage::MemoryStore;
//! use banter::store::ChatStore;
//! use std::sync::{Arc, Mutex};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let store = Arc::new(Mutex::new(ChatStore::load(Box::new(MemoryStore::new()))));
//!     let session = StreamingSession::new(
//!         Arc::clone(&store),
//!         "simulated reply",
//!         Arc::new(NoDelays),
//!     );
//!
//!     if let Some(done) = session.send_message("Hello!") {
//!         done.await.unwrap();
//!     }
//! }
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod session;
pub mod storage;
pub mod store;

// Re-export commonly used types
pub use config::Config;
pub use error::{BanterError, Result};
pub use session::{StreamSnapshot, StreamingSession};
pub use store::{Chat, ChatStore, Message, Role};
