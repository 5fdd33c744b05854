//! Reqwest-backed feed client for the real backend.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use super::{decode_feed, FeedApi};
use crate::auth::Authenticator;
use crate::error::FeedError;
use crate::model::{FeedItem, User};

/// Fetches `{base_url}/feeds` and decodes the standard response.
///
/// When an [`Authenticator`] is attached, the current session's id token is
/// sent as a bearer credential.  This client never signs in by itself.
pub struct HttpFeedApi {
    client: reqwest::Client,
    url: String,
    auth: Option<Arc<dyn Authenticator>>,
}

impl HttpFeedApi {
    pub fn new(base_url: &str, user_agent: &str, timeout: Duration) -> Result<Self, FeedError> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;
        Ok(Self {
            client,
            url: feeds_url(base_url),
            auth: None,
        })
    }

    pub fn with_authenticator(mut self, auth: Arc<dyn Authenticator>) -> Self {
        self.auth = Some(auth);
        self
    }

    /// Token of the current session, if any.  Lookup failures only cost
    /// the header.
    async fn id_token(&self) -> Option<String> {
        let auth = self.auth.as_ref()?;
        match auth.current_user().await {
            Ok(user) => user.filter(User::is_signed_in).and_then(|u| u.id_token),
            Err(e) => {
                warn!(error = %e, "could not read session; fetching without token");
                None
            }
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

fn feeds_url(base_url: &str) -> String {
    format!("{}/feeds", base_url.trim_end_matches('/'))
}

#[async_trait]
impl FeedApi for HttpFeedApi {
    async fn fetch(&self) -> Result<Vec<FeedItem>, FeedError> {
        let start = tokio::time::Instant::now();
        debug!(url = %self.url, "GET feeds");

        let mut request = self.client.get(&self.url);
        if let Some(token) = self.id_token().await {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| {
            warn!(url = %self.url, error = %e, "feed request failed");
            FeedError::from(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(url = %self.url, status = status.as_u16(), "feed request rejected");
            return Err(FeedError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        let items = decode_feed(&body)?;
        debug!(
            count = items.len(),
            latency_ms = start.elapsed().as_millis() as u64,
            "feeds decoded"
        );
        Ok(items)
    }
}
