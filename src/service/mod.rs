/// Remote photo service boundary
///
/// This module owns everything that crosses the wire:
/// - Shared data structures returned by the service (types.rs)
/// - The `PhotoService` trait describing its fixed RPC surface
/// - The HTTP/JSON client implementation (http.rs)
///
/// The service owns all durable state: photos, likes, comments and
/// profile pictures. The client never mutates that state locally; it
/// issues a call and re-reads.

pub mod http;
pub mod types;

#[cfg(test)]
pub mod fake;

use async_trait::async_trait;

pub use types::{Comment, Photo, PhotoId, Principal};

/// What went wrong with a remote call.
///
/// Local precondition failures (not signed in, confirmation declined)
/// never construct one of these; they are handled before a call exists.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ServiceError {
    /// The request never produced a usable response (connection refused,
    /// DNS failure, non-success HTTP status).
    #[error("could not reach the photo service: {0}")]
    Transport(String),

    /// The service answered with its tagged `err` variant. The message
    /// is the server's own text and is shown to the user verbatim.
    #[error("{0}")]
    Rejected(String),

    /// The response body did not decode as the expected shape.
    #[error("malformed response from the photo service: {0}")]
    Decode(String),
}

/// Result alias for every remote call.
pub type CallResult<T> = Result<T, ServiceError>;

/// The remote photo service's RPC surface, latest interface revision.
///
/// Query operations are read-only and side-effect free; update
/// operations mutate durable state and answer with a tagged result.
/// Author and creator identities are derived server-side from the
/// authenticated caller — the client never passes them.
#[async_trait]
pub trait PhotoService: Send + Sync {
    /// All photos, unfiltered.
    async fn get_photos(&self) -> CallResult<Vec<Photo>>;

    /// Photos whose category equals the given text, verbatim.
    async fn get_photos_by_category(&self, category: &str) -> CallResult<Vec<Photo>>;

    /// Record a like by the calling identity.
    async fn like_photo(&self, id: PhotoId) -> CallResult<()>;

    /// Append a comment authored by the calling identity.
    async fn add_comment(&self, id: PhotoId, content: &str) -> CallResult<()>;

    /// Create a photo owned by the calling identity; returns its id.
    async fn add_photo(
        &self,
        title: &str,
        category: &str,
        image_url: &str,
    ) -> CallResult<PhotoId>;

    /// Remove a photo. The service enforces that only the creator may
    /// do this; the client merely requests it.
    async fn remove_photo(&self, id: PhotoId) -> CallResult<()>;

    /// Whether the calling identity has liked the photo.
    async fn has_liked_photo(&self, id: PhotoId) -> CallResult<bool>;

    /// The calling identity's profile picture, if one was ever set.
    async fn get_profile_picture(&self) -> CallResult<Option<String>>;

    /// Set the calling identity's profile picture.
    async fn set_profile_picture(&self, image_url: &str) -> CallResult<()>;
}
