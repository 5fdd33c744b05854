//! Wire shape of the `/feeds` response.
//!
//! These structs mirror the JSON one-to-one and are converted into
//! [`FeedItem`]s by [`FeedsResponse::into_feed_items`].  Nothing outside
//! this module sees them.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::error::FeedError;
use crate::model::{
    duration_label, Article, AspectRatio, Author, Episode, ExternalId, FeedItem, FeedItemBase,
    Image, Language, Media, MultiLangText, Recording, Speaker, Status,
};

#[derive(Debug, Deserialize)]
pub struct FeedsResponse {
    pub status: String,
    #[serde(default)]
    pub articles: Vec<ArticleResponse>,
    #[serde(default)]
    pub episodes: Vec<EpisodeResponse>,
    #[serde(default)]
    pub recordings: Vec<RecordingResponse>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalIdResponse {
    pub value: String,
    pub service_name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThumbnailResponse {
    pub small_url: String,
    pub standard_url: String,
    pub large_url: String,
}

/// Unknown values decode as `Unknown` instead of failing the whole feed.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusResponse {
    Submitted,
    Published,
    #[default]
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleResponse {
    pub id: String,
    pub external_id: ExternalIdResponse,
    pub title: String,
    #[serde(default)]
    pub summary: String,
    pub author_name: String,
    #[serde(default)]
    pub author_url: String,
    pub thumbnail: ThumbnailResponse,
    pub link: String,
    pub published_at: DateTime<Utc>,
    #[serde(default)]
    pub status: StatusResponse,
    #[serde(default)]
    pub language: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeakerResponse {
    pub name: String,
    #[serde(default)]
    pub icon_url: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EpisodeResponse {
    pub id: String,
    pub external_id: ExternalIdResponse,
    pub title: String,
    #[serde(default)]
    pub summary: String,
    pub duration: u32,
    #[serde(default)]
    pub duration_label: Option<String>,
    #[serde(default)]
    pub speakers: Vec<SpeakerResponse>,
    pub thumbnail: ThumbnailResponse,
    pub link: String,
    pub published_at: DateTime<Utc>,
    #[serde(default)]
    pub status: StatusResponse,
    #[serde(default)]
    pub language: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LocaleTextResponse {
    #[serde(default)]
    pub japanese: String,
    #[serde(default)]
    pub english: String,
}

#[derive(Debug, Deserialize)]
pub struct AspectRatioResponse {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordingResponse {
    pub id: String,
    pub external_id: ExternalIdResponse,
    pub title: LocaleTextResponse,
    pub summary: LocaleTextResponse,
    pub thumbnail: ThumbnailResponse,
    pub aspect_ratio: AspectRatioResponse,
    pub link: String,
    pub published_at: DateTime<Utc>,
    #[serde(default)]
    pub status: StatusResponse,
    #[serde(default)]
    pub language: Option<String>,
}

// ---------------------------------------------------------------------------
// Conversion into domain types
// ---------------------------------------------------------------------------

impl From<ExternalIdResponse> for ExternalId {
    fn from(r: ExternalIdResponse) -> Self {
        ExternalId {
            service: Media::from_service_name(&r.service_name),
            value: r.value,
        }
    }
}

impl From<ThumbnailResponse> for Image {
    fn from(r: ThumbnailResponse) -> Self {
        Image {
            small_url: r.small_url,
            standard_url: r.standard_url,
            large_url: r.large_url,
        }
    }
}

impl From<StatusResponse> for Status {
    fn from(r: StatusResponse) -> Self {
        match r {
            StatusResponse::Submitted => Status::Submitted,
            StatusResponse::Published => Status::Published,
            StatusResponse::Unknown => Status::Unknown,
        }
    }
}

impl From<LocaleTextResponse> for MultiLangText {
    fn from(r: LocaleTextResponse) -> Self {
        MultiLangText::new(r.japanese, r.english)
    }
}

impl From<ArticleResponse> for FeedItem {
    fn from(r: ArticleResponse) -> Self {
        FeedItem::Article(Article {
            base: FeedItemBase {
                id: r.id,
                external_id: r.external_id.into(),
                title: MultiLangText::same(r.title),
                summary: MultiLangText::same(r.summary),
                thumbnail: r.thumbnail.into(),
                link: r.link,
                published_at: r.published_at,
                status: r.status.into(),
                language: r.language.as_deref().and_then(Language::from_wire),
            },
            author: Author {
                name: r.author_name,
                link: r.author_url,
            },
        })
    }
}

impl From<EpisodeResponse> for FeedItem {
    fn from(r: EpisodeResponse) -> Self {
        let label = r
            .duration_label
            .filter(|l| !l.is_empty())
            .unwrap_or_else(|| duration_label(r.duration));
        FeedItem::Episode(Episode {
            base: FeedItemBase {
                id: r.id,
                external_id: r.external_id.into(),
                title: MultiLangText::same(r.title),
                summary: MultiLangText::same(r.summary),
                thumbnail: r.thumbnail.into(),
                link: r.link,
                published_at: r.published_at,
                status: r.status.into(),
                language: r.language.as_deref().and_then(Language::from_wire),
            },
            duration: r.duration,
            duration_label: label,
            speakers: r
                .speakers
                .into_iter()
                .map(|s| Speaker {
                    name: s.name,
                    icon_url: s.icon_url,
                })
                .collect(),
        })
    }
}

impl From<RecordingResponse> for FeedItem {
    fn from(r: RecordingResponse) -> Self {
        FeedItem::Recording(Recording {
            base: FeedItemBase {
                id: r.id,
                external_id: r.external_id.into(),
                title: r.title.into(),
                summary: r.summary.into(),
                thumbnail: r.thumbnail.into(),
                link: r.link,
                published_at: r.published_at,
                status: r.status.into(),
                language: r.language.as_deref().and_then(Language::from_wire),
            },
            aspect_ratio: AspectRatio {
                width: r.aspect_ratio.width,
                height: r.aspect_ratio.height,
            },
        })
    }
}

impl FeedsResponse {
    /// Flatten all three lists into one, newest first.
    ///
    /// Fails if the backend did not report `"OK"`.
    pub fn into_feed_items(self) -> Result<Vec<FeedItem>, FeedError> {
        if self.status != "OK" {
            return Err(FeedError::Decode(format!(
                "unexpected response status {:?}",
                self.status
            )));
        }

        let mut items: Vec<FeedItem> = self
            .articles
            .into_iter()
            .map(FeedItem::from)
            .chain(self.episodes.into_iter().map(FeedItem::from))
            .chain(self.recordings.into_iter().map(FeedItem::from))
            .collect();
        // Stable sort: same-timestamp items keep their wire order.
        items.sort();
        Ok(items)
    }
}

/// Decode a `/feeds` response body into feed items.
pub fn decode_feed(text: &str) -> Result<Vec<FeedItem>, FeedError> {
    let response: FeedsResponse = serde_json::from_str(text)?;
    response.into_feed_items()
}
