//! Streaming session: the simulated assistant reply
//!
//! A session replays a fixed reply text in deterministic chunks, publishing
//! the accumulated text after every chunk over a `watch` channel. The loop
//! suspends at each randomized delay, and those suspension points are the
//! only cancellation points: a chunk, once started, always completes and is
//! published. On natural completion or cancellation the accumulated text is
//! committed to the chat store exactly once.

use crate::store::ChatStore;
use rand::Rng;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

pub mod chunk;
pub use chunk::split_chunks;

/// What a consumer sees of an in-flight stream
///
/// Published on every chunk boundary. Consumers read it for display and
/// must not feed it back into the store; committing the final text is the
/// session's job.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StreamSnapshot {
    /// Whether a reply is currently being generated
    pub streaming: bool,
    /// Concatenation of all chunks emitted so far
    pub content: String,
}

/// Pacing policy for the simulated generation
///
/// Injectable so tests can run with zero delay. The delays carry no
/// functional contract beyond "some delay occurs"; they only shape the
/// perceived typing rhythm.
pub trait DelayPolicy: Send + Sync {
    /// Simulated network latency before the first chunk
    fn first_chunk_delay(&self) -> Duration;

    /// Pause before each subsequent chunk
    fn next_chunk_delay(&self) -> Duration;
}

/// Production pacing: fixed initial latency, uniformly random per-chunk delay
pub struct TypingDelays {
    first_ms: u64,
    min_chunk_ms: u64,
    max_chunk_ms: u64,
}

impl TypingDelays {
    /// Create a pacing policy
    ///
    /// `max_chunk_ms` below `min_chunk_ms` is clamped up to it.
    pub fn new(first_ms: u64, min_chunk_ms: u64, max_chunk_ms: u64) -> Self {
        Self {
            first_ms,
            min_chunk_ms,
            max_chunk_ms: max_chunk_ms.max(min_chunk_ms),
        }
    }
}

impl Default for TypingDelays {
    fn default() -> Self {
        Self::new(500, 30, 80)
    }
}

impl DelayPolicy for TypingDelays {
    fn first_chunk_delay(&self) -> Duration {
        Duration::from_millis(self.first_ms)
    }

    fn next_chunk_delay(&self) -> Duration {
        let ms = rand::rng().random_range(self.min_chunk_ms..=self.max_chunk_ms);
        Duration::from_millis(ms)
    }
}

/// Zero-delay pacing for deterministic tests
pub struct NoDelays;

impl DelayPolicy for NoDelays {
    fn first_chunk_delay(&self) -> Duration {
        Duration::ZERO
    }

    fn next_chunk_delay(&self) -> Duration {
        Duration::ZERO
    }
}

/// State held while a stream is in flight
struct ActiveStream {
    id: u64,
    chat_id: String,
    token: CancellationToken,
}

/// Shared state behind a [`StreamingSession`] handle
struct SessionInner {
    store: Arc<Mutex<ChatStore>>,
    reply: String,
    delays: Arc<dyn DelayPolicy>,
    snapshot_tx: watch::Sender<StreamSnapshot>,
    active: Mutex<Option<ActiveStream>>,
    next_stream_id: AtomicU64,
}

/// Owns the lifecycle of "the assistant is currently producing output"
///
/// Constructed once per process next to the [`ChatStore`]; cloning yields
/// another handle to the same session. At most one stream is in flight at
/// a time; a `send_message` issued while streaming is rejected silently
/// (callers wanting auto-cancel can invoke
/// [`stop_streaming`](Self::stop_streaming) first).
#[derive(Clone)]
pub struct StreamingSession {
    inner: Arc<SessionInner>,
}

impl StreamingSession {
    /// Create a session over the given store, canned reply, and pacing
    pub fn new(
        store: Arc<Mutex<ChatStore>>,
        reply: impl Into<String>,
        delays: Arc<dyn DelayPolicy>,
    ) -> Self {
        let (snapshot_tx, _) = watch::channel(StreamSnapshot::default());
        Self {
            inner: Arc::new(SessionInner {
                store,
                reply: reply.into(),
                delays,
                snapshot_tx,
                active: Mutex::new(None),
                next_stream_id: AtomicU64::new(0),
            }),
        }
    }

    /// Subscribe to streaming snapshots
    ///
    /// The receiver observes every chunk boundary plus the final cleared
    /// snapshot when the session returns to idle.
    pub fn subscribe(&self) -> watch::Receiver<StreamSnapshot> {
        self.inner.snapshot_tx.subscribe()
    }

    /// Whether a reply is currently being generated
    pub fn is_streaming(&self) -> bool {
        self.inner.snapshot_tx.borrow().streaming
    }

    /// Append the user message and start the simulated reply
    ///
    /// Silent no-op (returns `None`) when the trimmed content is empty,
    /// when there is no active chat, or when a stream is already in
    /// flight. Otherwise exactly one user message is appended, and at most
    /// one assistant message will follow: exactly one on natural
    /// completion, none only if cancelled before the first chunk.
    ///
    /// The returned handle resolves when the stream reaches idle; callers
    /// may drop it.
    pub fn send_message(&self, content: &str) -> Option<JoinHandle<()>> {
        if content.trim().is_empty() {
            tracing::debug!("send ignored: empty content");
            return None;
        }

        let mut active = lock_unpoisoned(&self.inner.active);
        if active.is_some() {
            tracing::debug!("send ignored: a reply is already streaming");
            return None;
        }

        let chat_id = {
            let mut store = lock_unpoisoned(&self.inner.store);
            let Some(chat_id) = store.active_chat().map(|c| c.id.clone()) else {
                tracing::debug!("send ignored: no active chat");
                return None;
            };
            store.append_user_message(&chat_id, content);
            chat_id
        };

        let id = self.inner.next_stream_id.fetch_add(1, Ordering::Relaxed);
        let token = CancellationToken::new();
        *active = Some(ActiveStream {
            id,
            chat_id: chat_id.clone(),
            token: token.clone(),
        });
        drop(active);

        self.inner.snapshot_tx.send_replace(StreamSnapshot {
            streaming: true,
            content: String::new(),
        });

        tracing::debug!(chat_id = %chat_id, stream = id, "streaming started");
        let inner = Arc::clone(&self.inner);
        Some(tokio::spawn(inner.run_stream(id, chat_id, token)))
    }

    /// Stop the in-flight stream, if any
    ///
    /// Flushes whatever text has accumulated so far as an assistant
    /// message (nothing is appended when no chunk was emitted yet), clears
    /// the published snapshot, and returns the session to idle before this
    /// call returns. Idempotent: a no-op when idle, including the race
    /// where natural completion has already committed the reply.
    pub fn stop_streaming(&self) {
        let mut active = lock_unpoisoned(&self.inner.active);
        let Some(stream) = active.take() else {
            return;
        };
        stream.token.cancel();

        let content = self.inner.snapshot_tx.borrow().content.clone();
        if !content.is_empty() {
            lock_unpoisoned(&self.inner.store).append_assistant_message(&stream.chat_id, &content);
        }
        self.inner.snapshot_tx.send_replace(StreamSnapshot::default());
        tracing::debug!(chat_id = %stream.chat_id, stream = stream.id, "streaming cancelled");
    }
}

impl SessionInner {
    /// The chunk-emission loop
    ///
    /// Emits chunks one at a time in deterministic order, sleeping between
    /// them. Cancellation is observed at each suspension point and again
    /// under the session lock before publishing, so a stop never races a
    /// late chunk into the snapshot.
    async fn run_stream(self: Arc<Self>, id: u64, chat_id: String, token: CancellationToken) {
        tokio::select! {
            _ = token.cancelled() => return,
            _ = tokio::time::sleep(self.delays.first_chunk_delay()) => {}
        }

        let mut accumulated = String::new();
        for chunk in split_chunks(&self.reply) {
            tokio::select! {
                _ = token.cancelled() => return,
                _ = tokio::time::sleep(self.delays.next_chunk_delay()) => {}
            }

            let active = lock_unpoisoned(&self.active);
            if token.is_cancelled() {
                return;
            }
            accumulated.push_str(chunk);
            self.snapshot_tx.send_replace(StreamSnapshot {
                streaming: true,
                content: accumulated.clone(),
            });
            drop(active);
        }

        // Natural completion: commit unless a stop already finalized us.
        let mut active = lock_unpoisoned(&self.active);
        if active.as_ref().map(|s| s.id) != Some(id) {
            return;
        }
        *active = None;
        lock_unpoisoned(&self.store).append_assistant_message(&chat_id, &accumulated);
        self.snapshot_tx.send_replace(StreamSnapshot::default());
        tracing::debug!(chat_id = %chat_id, stream = id, "streaming completed");
    }
}

/// Lock a mutex, recovering the inner value if a holder panicked
fn lock_unpoisoned<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
