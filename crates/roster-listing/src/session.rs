use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

/// Shared handle to the signed-in user's bearer token.
///
/// Created once at startup and cloned into whatever makes requests; signing
/// out through any clone is seen by all of them.
#[derive(Clone, Default)]
pub struct Session {
    token: Arc<RwLock<Option<String>>>,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("signed_in", &self.is_signed_in())
            .finish()
    }
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sign_in(&self, token: impl Into<String>) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = Some(token.into());
        tracing::info!("session signed in");
    }

    pub fn sign_out(&self) {
        let previous = self
            .token
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if previous.is_some() {
            tracing::info!("session signed out");
        }
    }

    pub fn token(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_signed_in(&self) -> bool {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}
