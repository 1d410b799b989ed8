/// In-memory photo service for tests
///
/// Implements the full server-side semantics the client relies on:
/// caller-derived authorship, like idempotency, creator-only removal,
/// per-identity profile pictures. Also records every operation name so
/// tests can assert which calls were (or were not) issued.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::{CallResult, Comment, Photo, PhotoId, PhotoService, Principal, ServiceError};

#[derive(Default)]
struct State {
    photos: Vec<Photo>,
    next_id: PhotoId,
    profile_pictures: Vec<(Principal, String)>,
    calls: Vec<String>,
}

/// A fake remote photo service holding its state behind a mutex, with
/// a configurable calling identity (None = anonymous caller).
#[derive(Clone, Default)]
pub struct FakePhotoService {
    state: Arc<Mutex<State>>,
    caller: Option<Principal>,
}

impl FakePhotoService {
    pub fn new() -> Self {
        Self::default()
    }

    /// The identity all subsequent calls arrive as.
    pub fn with_caller(mut self, caller: Principal) -> Self {
        self.caller = Some(caller);
        self
    }

    /// Seed a photo directly into the store, bypassing the RPC surface.
    pub fn seed_photo(&self, photo: Photo) {
        let mut state = self.state.lock().unwrap();
        state.next_id = state.next_id.max(photo.id + 1);
        state.photos.push(photo);
    }

    /// Every operation name invoked so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }

    fn record(&self, name: &str) {
        self.state.lock().unwrap().calls.push(name.to_string());
    }

    fn require_caller(&self) -> CallResult<Principal> {
        self.caller
            .clone()
            .ok_or_else(|| ServiceError::Rejected("caller is not authenticated".to_string()))
    }

    fn now() -> i64 {
        use std::time::{SystemTime, UNIX_EPOCH};
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as i64)
            .unwrap_or(0)
    }
}

#[async_trait]
impl PhotoService for FakePhotoService {
    async fn get_photos(&self) -> CallResult<Vec<Photo>> {
        self.record("getPhotos");
        Ok(self.state.lock().unwrap().photos.clone())
    }

    async fn get_photos_by_category(&self, category: &str) -> CallResult<Vec<Photo>> {
        self.record("getPhotosByCategory");
        let state = self.state.lock().unwrap();
        Ok(state
            .photos
            .iter()
            .filter(|p| p.category == category)
            .cloned()
            .collect())
    }

    async fn like_photo(&self, id: PhotoId) -> CallResult<()> {
        self.record("likePhoto");
        let caller = self.require_caller()?;
        let mut state = self.state.lock().unwrap();
        let photo = state
            .photos
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| ServiceError::Rejected("photo not found".to_string()))?;
        if photo.liked_by.contains(&caller) {
            return Err(ServiceError::Rejected("photo already liked".to_string()));
        }
        photo.liked_by.push(caller);
        photo.likes = photo.liked_by.len() as u64;
        Ok(())
    }

    async fn add_comment(&self, id: PhotoId, content: &str) -> CallResult<()> {
        self.record("addComment");
        let caller = self.require_caller()?;
        let mut state = self.state.lock().unwrap();
        let photo = state
            .photos
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| ServiceError::Rejected("photo not found".to_string()))?;
        photo.comments.push(Comment {
            author: caller,
            content: content.to_string(),
            created_at: Self::now(),
        });
        Ok(())
    }

    async fn add_photo(
        &self,
        title: &str,
        category: &str,
        image_url: &str,
    ) -> CallResult<PhotoId> {
        self.record("addPhoto");
        let caller = self.require_caller()?;
        let mut state = self.state.lock().unwrap();
        let id = state.next_id;
        state.next_id += 1;
        state.photos.push(Photo {
            id,
            title: title.to_string(),
            category: category.to_string(),
            image_url: image_url.to_string(),
            creator: caller,
            created_at: Self::now(),
            likes: 0,
            liked_by: Vec::new(),
            comments: Vec::new(),
        });
        Ok(id)
    }

    async fn remove_photo(&self, id: PhotoId) -> CallResult<()> {
        self.record("removePhoto");
        let caller = self.require_caller()?;
        let mut state = self.state.lock().unwrap();
        let photo = state
            .photos
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| ServiceError::Rejected("photo not found".to_string()))?;
        if photo.creator != caller {
            return Err(ServiceError::Rejected(
                "only the creator may remove a photo".to_string(),
            ));
        }
        state.photos.retain(|p| p.id != id);
        Ok(())
    }

    async fn has_liked_photo(&self, id: PhotoId) -> CallResult<bool> {
        self.record("hasLikedPhoto");
        let caller = match &self.caller {
            Some(c) => c.clone(),
            None => return Ok(false),
        };
        let state = self.state.lock().unwrap();
        Ok(state
            .photos
            .iter()
            .find(|p| p.id == id)
            .map(|p| p.liked_by.contains(&caller))
            .unwrap_or(false))
    }

    async fn get_profile_picture(&self) -> CallResult<Option<String>> {
        self.record("getProfilePicture");
        let caller = match &self.caller {
            Some(c) => c.clone(),
            None => return Ok(None),
        };
        let state = self.state.lock().unwrap();
        Ok(state
            .profile_pictures
            .iter()
            .find(|(who, _)| who == &caller)
            .map(|(_, url)| url.clone()))
    }

    async fn set_profile_picture(&self, image_url: &str) -> CallResult<()> {
        self.record("setProfilePicture");
        let caller = self.require_caller()?;
        let mut state = self.state.lock().unwrap();
        state.profile_pictures.retain(|(who, _)| who != &caller);
        state.profile_pictures.push((caller, image_url.to_string()));
        Ok(())
    }
}

/// Build a seeded photo for tests.
pub fn photo(id: PhotoId, title: &str, category: &str, creator: &Principal) -> Photo {
    Photo {
        id,
        title: title.to_string(),
        category: category.to_string(),
        image_url: format!("https://example.com/{id}.jpg"),
        creator: creator.clone(),
        created_at: 1_700_000_000_000_000_000 + id as i64,
        likes: 0,
        liked_by: Vec::new(),
        comments: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn principal(text: &str) -> Principal {
        Principal::from_text(text).unwrap()
    }

    #[tokio::test]
    async fn test_comment_appears_after_refetch() {
        let alice = principal("alice-aa");
        let service = FakePhotoService::new().with_caller(alice.clone());
        service.seed_photo(photo(3, "Dunes", "Travel", &alice));

        service.add_comment(3, "nice shot").await.unwrap();

        let photos = service.get_photos().await.unwrap();
        let dunes = photos.iter().find(|p| p.id == 3).unwrap();
        assert_eq!(dunes.comments.len(), 1);
        assert_eq!(dunes.comments[0].content, "nice shot");
        assert_eq!(dunes.comments[0].author, alice);
    }

    #[tokio::test]
    async fn test_like_is_not_idempotent_server_side() {
        let alice = principal("alice-aa");
        let service = FakePhotoService::new().with_caller(alice.clone());
        service.seed_photo(photo(1, "Fern", "Nature", &alice));

        service.like_photo(1).await.unwrap();
        let second = service.like_photo(1).await;
        assert!(matches!(second, Err(ServiceError::Rejected(_))));

        let photos = service.get_photos().await.unwrap();
        assert_eq!(photos[0].likes, 1);
        assert_eq!(photos[0].liked_by, vec![alice.clone()]);
        assert!(service.has_liked_photo(1).await.unwrap());
    }

    #[tokio::test]
    async fn test_only_creator_may_remove() {
        let alice = principal("alice-aa");
        let bob = principal("bob-bb");
        let service = FakePhotoService::new().with_caller(bob);
        service.seed_photo(photo(1, "Fern", "Nature", &alice));

        let denied = service.remove_photo(1).await;
        assert!(matches!(denied, Err(ServiceError::Rejected(_))));
        assert_eq!(service.get_photos().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_anonymous_mutations_are_rejected() {
        let alice = principal("alice-aa");
        let service = FakePhotoService::new();
        service.seed_photo(photo(1, "Fern", "Nature", &alice));

        assert!(service.like_photo(1).await.is_err());
        assert!(service.add_comment(1, "hi").await.is_err());
        assert!(service.add_photo("t", "c", "u").await.is_err());
        assert!(service.set_profile_picture("u").await.is_err());
    }

    #[tokio::test]
    async fn test_profile_picture_round_trip() {
        let alice = principal("alice-aa");
        let service = FakePhotoService::new().with_caller(alice);

        assert_eq!(service.get_profile_picture().await.unwrap(), None);
        service
            .set_profile_picture("https://example.com/me.png")
            .await
            .unwrap();
        assert_eq!(
            service.get_profile_picture().await.unwrap(),
            Some("https://example.com/me.png".to_string())
        );
    }

    #[tokio::test]
    async fn test_category_query_scopes_verbatim() {
        let alice = principal("alice-aa");
        let service = FakePhotoService::new().with_caller(alice.clone());
        service.seed_photo(photo(1, "Fern", "Nature", &alice));
        service.seed_photo(photo(2, "Dunes", "Travel", &alice));

        let travel = service.get_photos_by_category("Travel").await.unwrap();
        assert_eq!(travel.len(), 1);
        assert_eq!(travel[0].title, "Dunes");

        // Category text matches verbatim, no normalization.
        assert!(service
            .get_photos_by_category("travel")
            .await
            .unwrap()
            .is_empty());
    }
}
