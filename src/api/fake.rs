//! Deterministic in-process feed client.

use async_trait::async_trait;

use super::{decode_feed, FeedApi};
use crate::error::FeedError;
use crate::model::FeedItem;

const FIXTURE: &str = include_str!("fixtures/feeds.json");

/// Feed client backed by a bundled JSON document.
///
/// Either returns the fixture items on every call, or fails every call with
/// the error it was built with.
pub struct FakeFeedApi {
    items: Vec<FeedItem>,
    error: Option<FeedError>,
}

impl FakeFeedApi {
    /// A client that always succeeds with the fixture feed.
    ///
    /// The fixture is decoded once here and the result cached, so every
    /// fetch hands out identical items.
    pub fn new() -> Result<Self, FeedError> {
        let items = decode_feed(FIXTURE)?;
        Ok(Self { items, error: None })
    }

    /// A client whose every fetch fails with exactly `error`.
    #[cfg(test)]
    pub fn failing(error: FeedError) -> Self {
        Self {
            items: Vec::new(),
            error: Some(error),
        }
    }
}

#[async_trait]
impl FeedApi for FakeFeedApi {
    async fn fetch(&self) -> Result<Vec<FeedItem>, FeedError> {
        if let Some(error) = &self.error {
            tracing::debug!(%error, "fake feed api returning supplied error");
            return Err(error.clone());
        }
        Ok(self.items.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FeedKind;

    const FIXTURE_IDS: [&str; 6] = [
        "9d264ffd-abac-40b9-83ef-9e76eb1d7e53",
        "f725b41c-4375-43b5-8237-393370441c00",
        "925cd30a-63b6-4536-823b-bec1e46f9ddf",
        "8bf7bd0a-2ec8-45da-b6fa-406c1e5a0b36",
        "f6691d69-ffbb-499e-812b-12878179fe25",
        "106ab422-b8e9-415c-8814-8fa9d29938d7",
    ];

    #[tokio::test]
    async fn fetch_returns_fixture_items_in_order() {
        let items = FakeFeedApi::new().unwrap().fetch().await.unwrap();
        let ids: Vec<&str> = items.iter().map(|i| i.id()).collect();
        assert_eq!(ids, FIXTURE_IDS);
    }

    #[tokio::test]
    async fn fixture_has_two_of_each_kind() {
        let items = FakeFeedApi::new().unwrap().fetch().await.unwrap();
        for kind in [FeedKind::Blog, FeedKind::Podcast, FeedKind::Video] {
            assert_eq!(items.iter().filter(|i| i.kind() == kind).count(), 2, "{kind:?}");
        }
    }

    #[tokio::test]
    async fn repeated_fetches_are_identical() {
        let api = FakeFeedApi::new().unwrap();
        let first = api.fetch().await.unwrap();
        let second = api.fetch().await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn fetch_fails_with_supplied_error() {
        let supplied = FeedError::Transport("connection reset".into());
        let api = FakeFeedApi::failing(supplied.clone());
        assert_eq!(api.fetch().await.unwrap_err(), supplied);
        assert_eq!(api.fetch().await.unwrap_err(), supplied);
    }
}
