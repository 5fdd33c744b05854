//! One-shot background feed fetch.
//!
//! A fetch is a tokio task that (optionally) makes sure there is a signed-in
//! user, then asks the [`FeedApi`] for the feed.  Each step reports back to
//! the UI loop over an unbounded channel; the UI loop owns all view-model
//! state and is the only writer.
//!
//! ## For contributors
//!
//! There is no polling and no retry here.  The UI starts a fetch on launch
//! and again only when the user asks for a retry; [`FeedViewModel::begin_load`]
//! guards against two fetches overlapping.
//!
//! [`FeedViewModel::begin_load`]: crate::viewmodel::FeedViewModel::begin_load

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::api::FeedApi;
use crate::auth::{ensure_user, Authenticator};
use crate::error::{AuthError, FeedError};
use crate::model::{FeedItem, User};

/// Messages sent from a fetch task to the UI loop.
#[derive(Debug)]
pub enum FetchMsg {
    /// A session is available (reused or freshly created).
    SignedIn(User),
    /// Sign-in failed; the feed fetch was not attempted.
    AuthFailed(AuthError),
    /// The feed fetch finished.
    Feed(Result<Vec<FeedItem>, FeedError>),
}

/// The collaborators a fetch needs.
#[derive(Clone)]
pub struct Backend {
    pub api: Arc<dyn FeedApi>,
    /// `None` runs the fetch without any session.
    pub auth: Option<Arc<dyn Authenticator>>,
}

impl Backend {
    /// Run one fetch to completion, reporting every step through `tx`.
    pub async fn run(&self, tx: &mpsc::UnboundedSender<FetchMsg>) {
        if let Some(auth) = &self.auth {
            match ensure_user(auth.as_ref()).await {
                Ok(user) => {
                    let _ = tx.send(FetchMsg::SignedIn(user));
                }
                Err(e) => {
                    let _ = tx.send(FetchMsg::AuthFailed(e));
                    return;
                }
            }
        }

        debug!("fetching feed");
        let result = self.api.fetch().await;
        if let Ok(items) = &result {
            info!(count = items.len(), "fetch complete");
        }
        // If the receiver is gone the UI has exited; nothing left to do.
        let _ = tx.send(FetchMsg::Feed(result));
    }
}

/// Spawn a fetch on the current tokio runtime.
pub fn spawn(backend: Backend, tx: mpsc::UnboundedSender<FetchMsg>) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move { backend.run(&tx).await })
}
