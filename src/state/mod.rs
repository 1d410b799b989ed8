/// State management module
///
/// This module handles all client-side view state, including:
/// - The photo list and active category filter (feed.rs)
/// - Session identity and the mutation gate (session.rs)
/// - Persisted display-mode preference (prefs.rs)
///
/// None of it is authoritative: durable state lives in the remote
/// photo service, and the feed is replaced from a fresh read after
/// every successful mutation.

pub mod feed;
pub mod prefs;
pub mod session;
