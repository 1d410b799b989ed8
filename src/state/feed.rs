/// The feed: the one in-memory photo list and its filter
///
/// The list is a straight copy of the latest successful server read.
/// There is no merge, patch, pagination or local mutation: every
/// refresh replaces it wholesale, and every successful mutation is
/// followed by a refresh. Staleness is bounded by that rule alone.

use crate::service::{CallResult, Photo, PhotoId, ServiceError};

/// The fixed category chips offered by the UI.
///
/// Category is free text on the wire; this set is purely a client-side
/// convention. `All` is the sentinel for the unfiltered query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    All,
    Nature,
    Travel,
    Food,
    People,
    Architecture,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::All,
        Category::Nature,
        Category::Travel,
        Category::Food,
        Category::People,
        Category::Architecture,
    ];

    /// The literal category string sent to the service, or None for
    /// the unfiltered query.
    pub fn query_key(self) -> Option<&'static str> {
        match self {
            Category::All => None,
            Category::Nature => Some("Nature"),
            Category::Travel => Some("Travel"),
            Category::Food => Some("Food"),
            Category::People => Some("People"),
            Category::Architecture => Some("Architecture"),
        }
    }

    pub fn label(self) -> &'static str {
        self.query_key().unwrap_or("All")
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Client-side copy of the photo list plus the active filter.
#[derive(Debug)]
pub struct Feed {
    photos: Vec<Photo>,
    pub filter: Category,
    /// A refresh is in flight. Purely cosmetic; a superseded refresh is
    /// never cancelled, the later completion simply overwrites again.
    pub loading: bool,
}

impl Feed {
    pub fn new() -> Self {
        Feed {
            photos: Vec::new(),
            filter: Category::All,
            loading: true,
        }
    }

    pub fn photos(&self) -> &[Photo] {
        &self.photos
    }

    pub fn photo(&self, id: PhotoId) -> Option<&Photo> {
        self.photos.iter().find(|p| p.id == id)
    }

    /// Fold a finished refresh into the feed.
    ///
    /// Success replaces the whole list atomically. Failure leaves the
    /// previous list untouched and hands the error back for surfacing.
    pub fn apply_loaded(&mut self, result: CallResult<Vec<Photo>>) -> Option<ServiceError> {
        self.loading = false;
        match result {
            Ok(photos) => {
                self.photos = photos;
                None
            }
            Err(error) => Some(error),
        }
    }
}

impl Default for Feed {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::fake;
    use crate::service::Principal;

    fn some_photos() -> Vec<Photo> {
        let alice = Principal::from_text("alice-aa").unwrap();
        vec![
            fake::photo(1, "Fern", "Nature", &alice),
            fake::photo(2, "Dunes", "Travel", &alice),
        ]
    }

    #[test]
    fn test_successful_load_replaces_wholesale() {
        let mut feed = Feed::new();
        assert!(feed.apply_loaded(Ok(some_photos())).is_none());
        assert_eq!(feed.photos().len(), 2);

        // A later load does not merge, it replaces.
        let alice = Principal::from_text("alice-aa").unwrap();
        let only_travel = vec![fake::photo(2, "Dunes", "Travel", &alice)];
        feed.apply_loaded(Ok(only_travel));
        assert_eq!(feed.photos().len(), 1);
        assert_eq!(feed.photos()[0].id, 2);
    }

    #[test]
    fn test_failed_load_leaves_list_untouched() {
        let mut feed = Feed::new();
        feed.apply_loaded(Ok(some_photos()));
        let before = feed.photos().to_vec();

        let error = feed.apply_loaded(Err(ServiceError::Transport("connection refused".into())));
        assert!(error.is_some());
        assert_eq!(feed.photos(), before.as_slice());
        assert!(!feed.loading);
    }

    #[test]
    fn test_all_is_the_unfiltered_sentinel() {
        assert_eq!(Category::All.query_key(), None);
        assert_eq!(Category::Travel.query_key(), Some("Travel"));
        assert_eq!(Category::ALL.len(), 6);
    }
}
