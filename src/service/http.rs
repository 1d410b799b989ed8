/// HTTP/JSON client for the remote photo service
///
/// Each operation is one POST to `{base}/api/{method}` with a JSON
/// body. Query operations answer with the plain result; update
/// operations answer with the service's tagged form, either
/// `{"ok": ...}` or `{"err": "..."}`.

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::{CallResult, Photo, PhotoId, PhotoService, Principal, ServiceError};

/// Header carrying the signed-in principal. The service derives
/// authorship from the authenticated transport; unauthenticated calls
/// simply omit it and arrive as the anonymous caller.
const PRINCIPAL_HEADER: &str = "x-pixel-principal";

/// Environment override for the service address.
const BACKEND_URL_VAR: &str = "PIXEL_BACKEND_URL";

/// Local replica default, matching the service's dev setup.
const DEFAULT_BACKEND_URL: &str = "http://localhost:4943";

/// Client for the photo service over HTTP.
#[derive(Clone)]
pub struct HttpPhotoService {
    client: Client,
    base_url: String,
    principal: Option<Principal>,
}

impl HttpPhotoService {
    /// Create a client against the given base URL, unauthenticated.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            principal: None,
        }
    }

    /// Create a client against `PIXEL_BACKEND_URL`, or the local
    /// replica default when unset.
    pub fn from_env() -> Self {
        let base_url =
            std::env::var(BACKEND_URL_VAR).unwrap_or_else(|_| DEFAULT_BACKEND_URL.to_string());
        Self::new(base_url)
    }

    /// Attach a signed-in principal to every subsequent call.
    pub fn with_principal(mut self, principal: Principal) -> Self {
        self.principal = Some(principal);
        self
    }

    /// One POST to the named operation, decoding the plain response.
    async fn call<B, R>(&self, method: &str, body: &B) -> CallResult<R>
    where
        B: Serialize + Sync,
        R: DeserializeOwned,
    {
        let url = format!("{}/api/{}", self.base_url, method);
        let mut request = self.client.post(&url).json(body);
        if let Some(principal) = &self.principal {
            request = request.header(PRINCIPAL_HEADER, principal.to_text());
        }

        let response = request
            .send()
            .await
            .map_err(|e| ServiceError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ServiceError::Transport(format!("{} from {}", status, url)));
        }

        response
            .json::<R>()
            .await
            .map_err(|e| ServiceError::Decode(e.to_string()))
    }

    /// Like `call`, but unwraps the service's tagged ok/err form.
    async fn update<B, R>(&self, method: &str, body: &B) -> CallResult<R>
    where
        B: Serialize + Sync,
        R: DeserializeOwned,
    {
        let tagged: Tagged<R> = self.call(method, body).await?;
        match tagged {
            Tagged::Ok(value) => Ok(value),
            Tagged::Err(message) => Err(ServiceError::Rejected(message)),
        }
    }
}

/// The service's tagged update result, `{"ok": ...} | {"err": "..."}`.
#[derive(Deserialize)]
enum Tagged<T> {
    #[serde(rename = "ok")]
    Ok(T),
    #[serde(rename = "err")]
    Err(String),
}

#[derive(Serialize)]
struct IdArg {
    id: PhotoId,
}

#[derive(Serialize)]
struct CategoryArg<'a> {
    category: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CommentArgs<'a> {
    id: PhotoId,
    content: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AddPhotoArgs<'a> {
    title: &'a str,
    category: &'a str,
    image_url: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ImageUrlArg<'a> {
    image_url: &'a str,
}

#[async_trait]
impl PhotoService for HttpPhotoService {
    async fn get_photos(&self) -> CallResult<Vec<Photo>> {
        self.call("getPhotos", &()).await
    }

    async fn get_photos_by_category(&self, category: &str) -> CallResult<Vec<Photo>> {
        self.call("getPhotosByCategory", &CategoryArg { category })
            .await
    }

    async fn like_photo(&self, id: PhotoId) -> CallResult<()> {
        self.update("likePhoto", &IdArg { id }).await
    }

    async fn add_comment(&self, id: PhotoId, content: &str) -> CallResult<()> {
        self.update("addComment", &CommentArgs { id, content }).await
    }

    async fn add_photo(
        &self,
        title: &str,
        category: &str,
        image_url: &str,
    ) -> CallResult<PhotoId> {
        self.update(
            "addPhoto",
            &AddPhotoArgs {
                title,
                category,
                image_url,
            },
        )
        .await
    }

    async fn remove_photo(&self, id: PhotoId) -> CallResult<()> {
        self.update("removePhoto", &IdArg { id }).await
    }

    async fn has_liked_photo(&self, id: PhotoId) -> CallResult<bool> {
        self.call("hasLikedPhoto", &IdArg { id }).await
    }

    async fn get_profile_picture(&self) -> CallResult<Option<String>> {
        self.call("getProfilePicture", &()).await
    }

    async fn set_profile_picture(&self, image_url: &str) -> CallResult<()> {
        self.update("setProfilePicture", &ImageUrlArg { image_url })
            .await
    }
}

/// Fetch raw image bytes for a photo card or profile badge.
///
/// Card images live at arbitrary URLs outside the service, so this goes
/// through a plain GET rather than the RPC surface. Failures are
/// reported like any transport fault; the caller keeps a placeholder.
pub async fn fetch_image(url: String) -> CallResult<Vec<u8>> {
    let response = reqwest::get(&url)
        .await
        .map_err(|e| ServiceError::Transport(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(ServiceError::Transport(format!("{} from {}", status, url)));
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| ServiceError::Transport(e.to_string()))?;
    Ok(bytes.to_vec())
}
