/// Shared data structures for the photo service
///
/// These structs mirror the records the remote service returns. Field
/// names are renamed to the service's camelCase wire names so they
/// deserialize straight off the JSON transport.

use serde::{Deserialize, Serialize};

/// Server-assigned photo identifier. Opaque to the client; never
/// interpreted beyond equality and display.
pub type PhotoId = u64;

/// An authenticated caller reference.
///
/// Principals are opaque: the client never inspects the text beyond a
/// light shape check at sign-in. Two principals are the same identity
/// if and only if their canonical text forms are equal, and nothing in
/// this crate compares identities any other way.
#[derive(Debug, Clone, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Principal(String);

impl Principal {
    /// Parse a principal from its canonical text form.
    ///
    /// Accepts lowercase alphanumerics and dashes, which is the shape
    /// the service hands back. Anything else is rejected at the door so
    /// a typo'd sign-in fails locally instead of on the first call.
    pub fn from_text(text: &str) -> Result<Self, InvalidPrincipal> {
        let text = text.trim();
        if text.is_empty() {
            return Err(InvalidPrincipal::Empty);
        }
        if !text
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        {
            return Err(InvalidPrincipal::BadCharacter);
        }
        Ok(Principal(text.to_string()))
    }

    /// The canonical text form. This is the only projection used for
    /// comparison, display, and transport.
    pub fn to_text(&self) -> &str {
        &self.0
    }

    /// The leading character, used for avatar badges in the UI.
    pub fn initial(&self) -> char {
        self.0.chars().next().unwrap_or('?')
    }
}

impl PartialEq for Principal {
    fn eq(&self, other: &Self) -> bool {
        // Canonical-string equality is the identity contract.
        self.0 == other.0
    }
}

impl std::fmt::Display for Principal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Why a principal text failed to parse.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InvalidPrincipal {
    #[error("principal text is empty")]
    Empty,
    #[error("principal text may only contain lowercase letters, digits and dashes")]
    BadCharacter,
}

/// A comment on a photo. Append-only; the service never edits or
/// removes comments through this interface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    /// Derived server-side from the authenticated caller.
    pub author: Principal,
    pub content: String,
    /// Epoch nanoseconds, as the service reports them.
    pub created_at: i64,
}

/// A photo as the remote service returns it.
///
/// `likes == liked_by.len()` is maintained server-side; the client
/// displays `likes` and only consults `liked_by` for the advisory
/// "already liked" guard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Photo {
    pub id: PhotoId,
    pub title: String,
    /// Free text; also the filter key. The fixed category chips in the
    /// UI are a client-side convention, not server-enforced.
    pub category: String,
    pub image_url: String,
    /// Derived server-side from the authenticated caller.
    pub creator: Principal,
    /// Epoch nanoseconds.
    pub created_at: i64,
    pub likes: u64,
    #[serde(default)]
    pub liked_by: Vec<Principal>,
    pub comments: Vec<Comment>,
}

impl Photo {
    /// Whether the given principal has already liked this photo,
    /// according to the last server read.
    pub fn is_liked_by(&self, who: &Principal) -> bool {
        self.liked_by.iter().any(|p| p == who)
    }

    /// Whether the given principal created this photo.
    pub fn created_by(&self, who: &Principal) -> bool {
        &self.creator == who
    }

    /// Creation time formatted for display, e.g. "2026-08-30 14:02".
    pub fn created_at_label(&self) -> String {
        let secs = self.created_at.div_euclid(1_000_000_000);
        let nanos = self.created_at.rem_euclid(1_000_000_000) as u32;
        match chrono::DateTime::from_timestamp(secs, nanos) {
            Some(t) => t.format("%Y-%m-%d %H:%M").to_string(),
            None => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_principal_equality_is_canonical_text() {
        let a = Principal::from_text("w7x7r-cok77-xa").unwrap();
        let b = Principal::from_text("w7x7r-cok77-xa").unwrap();
        let c = Principal::from_text("aaaaa-aa").unwrap();

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.to_text(), "w7x7r-cok77-xa");
    }

    #[test]
    fn test_principal_rejects_bad_text() {
        assert_eq!(Principal::from_text("  "), Err(InvalidPrincipal::Empty));
        assert_eq!(
            Principal::from_text("Not A Principal"),
            Err(InvalidPrincipal::BadCharacter)
        );
    }

    #[test]
    fn test_photo_deserializes_wire_names() {
        let json = r#"{
            "id": 3,
            "title": "Dunes",
            "category": "Travel",
            "imageUrl": "https://example.com/dunes.jpg",
            "creator": "w7x7r-cok77-xa",
            "createdAt": 1700000000000000000,
            "likes": 1,
            "likedBy": ["aaaaa-aa"],
            "comments": [
                {"author": "aaaaa-aa", "content": "nice shot", "createdAt": 1700000001000000000}
            ]
        }"#;

        let photo: Photo = serde_json::from_str(json).unwrap();
        assert_eq!(photo.id, 3);
        assert_eq!(photo.image_url, "https://example.com/dunes.jpg");
        assert_eq!(photo.likes, 1);
        assert_eq!(photo.comments[0].content, "nice shot");

        let liker = Principal::from_text("aaaaa-aa").unwrap();
        assert!(photo.is_liked_by(&liker));
        assert!(!photo.created_by(&liker));
    }
}
