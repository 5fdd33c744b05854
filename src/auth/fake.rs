use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use super::Authenticator;
use crate::error::AuthError;
use crate::model::User;

/// In-memory identity provider.
///
/// There is no session until [`sign_in_anonymously`](Authenticator::sign_in_anonymously)
/// succeeds; each sign-in mints a fresh random token.
pub struct FakeAuthenticator {
    session: Mutex<Option<User>>,
    error: Option<AuthError>,
    sign_ins: AtomicUsize,
}

impl FakeAuthenticator {
    pub fn new() -> Self {
        Self {
            session: Mutex::new(None),
            error: None,
            sign_ins: AtomicUsize::new(0),
        }
    }

    /// A provider whose sign-in always fails with exactly `error`.
    #[cfg(test)]
    pub fn failing(error: AuthError) -> Self {
        Self {
            error: Some(error),
            ..Self::new()
        }
    }

    /// Number of successful anonymous sign-ins so far.
    #[cfg(test)]
    pub fn sign_in_count(&self) -> usize {
        self.sign_ins.load(Ordering::Relaxed)
    }

    fn lock_session(&self) -> Result<std::sync::MutexGuard<'_, Option<User>>, AuthError> {
        self.session
            .lock()
            .map_err(|_| AuthError::Provider("session lock poisoned".into()))
    }
}

impl Default for FakeAuthenticator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Authenticator for FakeAuthenticator {
    async fn current_user(&self) -> Result<Option<User>, AuthError> {
        Ok(self.lock_session()?.clone())
    }

    async fn sign_in_anonymously(&self) -> Result<User, AuthError> {
        if let Some(error) = &self.error {
            return Err(error.clone());
        }
        let user = User::with_token(format!("fake-{}", Uuid::new_v4()));
        *self.lock_session()? = Some(user.clone());
        self.sign_ins.fetch_add(1, Ordering::Relaxed);
        Ok(user)
    }
}
