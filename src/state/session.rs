/// Session state and the mutation gate
///
/// The session holds who the user is signed in as, if anyone. The gate
/// checks mirror the service's authorization client-side so an action
/// that can only fail is rejected locally, before any call is issued.
/// They are advisory: the server remains the authority and the next
/// refresh reflects its verdict.

use crate::service::{Photo, Principal};

/// Why the gate refused an action locally. The display text is the
/// user-facing notice.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Denied {
    #[error("Sign in to do that")]
    NotSignedIn,
    #[error("You already liked this photo")]
    AlreadyLiked,
    #[error("Only the creator can remove a photo")]
    NotCreator,
}

/// Who the user currently is. Never persisted; a restart starts
/// signed out.
#[derive(Debug, Default)]
pub struct Session {
    principal: Option<Principal>,
}

impl Session {
    pub fn anonymous() -> Self {
        Session { principal: None }
    }

    pub fn sign_in(&mut self, principal: Principal) {
        self.principal = Some(principal);
    }

    pub fn sign_out(&mut self) {
        self.principal = None;
    }

    pub fn principal(&self) -> Option<&Principal> {
        self.principal.as_ref()
    }

    pub fn is_signed_in(&self) -> bool {
        self.principal.is_some()
    }

    /// Gate shared by every mutating action: there must be a signed-in
    /// principal.
    pub fn check_mutate(&self) -> Result<&Principal, Denied> {
        self.principal.as_ref().ok_or(Denied::NotSignedIn)
    }

    /// Gate for liking: signed in, and not already in the photo's
    /// liked-by set as of the last server read.
    pub fn check_like(&self, photo: &Photo) -> Result<(), Denied> {
        let principal = self.check_mutate()?;
        if photo.is_liked_by(principal) {
            return Err(Denied::AlreadyLiked);
        }
        Ok(())
    }

    /// Whether the signed-in user already liked this photo. Drives the
    /// disabled state of the like button.
    pub fn has_liked(&self, photo: &Photo) -> bool {
        self.principal
            .as_ref()
            .map(|p| photo.is_liked_by(p))
            .unwrap_or(false)
    }

    /// Whether the removal control is presented at all: canonical
    /// string equality between the session principal and the creator.
    pub fn owns(&self, photo: &Photo) -> bool {
        self.principal
            .as_ref()
            .map(|p| photo.created_by(p))
            .unwrap_or(false)
    }

    /// Gate for removal: signed in and the creator.
    pub fn check_remove(&self, photo: &Photo) -> Result<(), Denied> {
        let principal = self.check_mutate()?;
        if !photo.created_by(principal) {
            return Err(Denied::NotCreator);
        }
        Ok(())
    }
}
