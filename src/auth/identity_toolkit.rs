//! Anonymous sign-up against an Identity Toolkit style REST endpoint.
//!
//! `POST {endpoint}/accounts:signUp?key={api_key}` with
//! `{"returnSecureToken": true}` creates an anonymous account and answers
//! with its `idToken`.  The session lives in memory for the process
//! lifetime; there is no refresh.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::Authenticator;
use crate::error::AuthError;
use crate::model::User;

pub const DEFAULT_ENDPOINT: &str = "https://identitytoolkit.googleapis.com/v1";

pub struct IdentityToolkitAuthenticator {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    session: Mutex<Option<User>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SignUpRequest {
    return_secure_token: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignUpResponse {
    #[serde(default)]
    id_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

impl IdentityToolkitAuthenticator {
    pub fn new(endpoint: &str, api_key: &str, timeout: Duration) -> Result<Self, AuthError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            session: Mutex::new(None),
        })
    }

    fn sign_up_url(&self) -> String {
        format!("{}/accounts:signUp", self.endpoint)
    }

    fn store(&self, user: Option<User>) -> Result<(), AuthError> {
        let mut session = self
            .session
            .lock()
            .map_err(|_| AuthError::Provider("session lock poisoned".into()))?;
        *session = user;
        Ok(())
    }
}

/// Turn a sign-up response body into a user, given the HTTP status.
fn parse_sign_up(success: bool, body: &str) -> Result<User, AuthError> {
    if !success {
        let message = serde_json::from_str::<ErrorEnvelope>(body)
            .map(|e| e.error.message)
            .unwrap_or_else(|_| body.trim().to_string());
        return Err(AuthError::Provider(message));
    }
    let response: SignUpResponse =
        serde_json::from_str(body).map_err(|e| AuthError::Provider(e.to_string()))?;
    match response.id_token {
        Some(token) if !token.is_empty() => Ok(User::with_token(token)),
        _ => Err(AuthError::MissingToken),
    }
}

#[async_trait]
impl Authenticator for IdentityToolkitAuthenticator {
    async fn current_user(&self) -> Result<Option<User>, AuthError> {
        let session = self
            .session
            .lock()
            .map_err(|_| AuthError::Provider("session lock poisoned".into()))?;
        Ok(session.clone())
    }

    async fn sign_in_anonymously(&self) -> Result<User, AuthError> {
        debug!(endpoint = %self.endpoint, "anonymous sign-up");
        let response = self
            .client
            .post(self.sign_up_url())
            .query(&[("key", self.api_key.as_str())])
            .json(&SignUpRequest {
                return_secure_token: true,
            })
            .send()
            .await?;

        let success = response.status().is_success();
        let body = response.text().await?;
        let user = parse_sign_up(success, &body).inspect_err(|e| {
            warn!(error = %e, "anonymous sign-up failed");
        })?;
        self.store(Some(user.clone()))?;
        Ok(user)
    }
}
