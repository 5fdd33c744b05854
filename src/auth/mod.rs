//! Identity provider seam.
//!
//! The app only needs an identity token, obtained by anonymous sign-in.
//! [`Authenticator`] is the port; [`IdentityToolkitAuthenticator`] talks to
//! a hosted identity REST endpoint and [`FakeAuthenticator`] keeps an
//! in-memory session for offline runs and tests.

mod fake;
mod identity_toolkit;

pub use fake::FakeAuthenticator;
pub use identity_toolkit::{IdentityToolkitAuthenticator, DEFAULT_ENDPOINT as IDENTITY_TOOLKIT_ENDPOINT};

use async_trait::async_trait;
use tracing::info;

use crate::error::AuthError;
use crate::model::User;

#[async_trait]
pub trait Authenticator: Send + Sync {
    /// The signed-in user, or `None` when there is no session.
    async fn current_user(&self) -> Result<Option<User>, AuthError>;

    /// Start an anonymous session and return its user.
    async fn sign_in_anonymously(&self) -> Result<User, AuthError>;
}

/// Reuse the current session if there is one, otherwise sign in
/// anonymously.  Provider errors are returned unchanged.
pub async fn ensure_user(auth: &dyn Authenticator) -> Result<User, AuthError> {
    if let Some(user) = auth.current_user().await? {
        return Ok(user);
    }
    let user = auth.sign_in_anonymously().await?;
    info!("signed in anonymously");
    Ok(user)
}
