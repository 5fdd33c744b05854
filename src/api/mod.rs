//! Feed client abstraction.
//!
//! This module defines the [`FeedApi`] trait and its two implementations:
//! [`HttpFeedApi`], which talks to the backend, and [`FakeFeedApi`], which
//! decodes a bundled fixture and is used for `--offline` runs and tests.
//!
//! ## For contributors — adding a new client
//!
//! 1. Create a new file in this directory.
//! 2. Define a struct and implement [`FeedApi`] for it, returning the items
//!    newest first (decode through [`decode_feed`] if the payload is the
//!    standard `/feeds` JSON).
//! 3. Add `mod` + `pub use` lines below and construct it in `main.rs`.

mod fake;
mod http;
mod response;

pub use fake::FakeFeedApi;
pub use http::HttpFeedApi;
pub use response::decode_feed;

use async_trait::async_trait;

use crate::error::FeedError;
use crate::model::FeedItem;

/// Trait that every feed client must implement.
///
/// The fetch runs on a tokio task, so implementations must be
/// [`Send`] + [`Sync`].
///
/// ## Implementing a new client
///
/// ```ignore
/// pub struct MyApi { /* config fields */ }
///
/// #[async_trait]
/// impl FeedApi for MyApi {
///     async fn fetch(&self) -> Result<Vec<FeedItem>, FeedError> {
///         let body = /* HTTP / IO */;
///         decode_feed(&body)
///     }
/// }
/// ```
#[async_trait]
pub trait FeedApi: Send + Sync {
    /// Fetch the whole feed, newest first.
    ///
    /// One shot: no pagination and no retry.  Errors are surfaced to the UI
    /// as a retryable state.
    async fn fetch(&self) -> Result<Vec<FeedItem>, FeedError>;
}
