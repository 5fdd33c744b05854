//! The feed entry union shared by every layer.
//!
//! `FeedItem` is one of three kinds of content: a blog [`Article`], a
//! podcast [`Episode`] or a session [`Recording`].  The fields every kind
//! has live in [`FeedItemBase`]; the accessors on [`FeedItem`] reach them
//! without matching on the variant.

use chrono::{DateTime, Utc};
use std::cmp::Ordering;

use super::text::{Language, MultiLangText};

/// Service that hosts the original content.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Media {
    Medium,
    DroidKaigiFm,
    YouTube,
    Other(String),
}

impl Media {
    pub fn from_service_name(name: &str) -> Self {
        match name {
            "medium" => Media::Medium,
            "droidkaigi_fm" => Media::DroidKaigiFm,
            "youtube" => Media::YouTube,
            other => Media::Other(other.to_string()),
        }
    }

    pub fn service_name(&self) -> &str {
        match self {
            Media::Medium => "medium",
            Media::DroidKaigiFm => "droidkaigi_fm",
            Media::YouTube => "youtube",
            Media::Other(name) => name,
        }
    }
}

/// Identifier of the item on its hosting service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalId {
    pub value: String,
    pub service: Media,
}

/// Thumbnail in three resolutions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Image {
    pub small_url: String,
    pub standard_url: String,
    pub large_url: String,
}

/// Review status of a feed entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Status {
    Submitted,
    Published,
    #[default]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    pub name: String,
    pub link: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Speaker {
    pub name: String,
    pub icon_url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AspectRatio {
    pub width: u32,
    pub height: u32,
}

/// Fields common to every kind of feed entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedItemBase {
    /// UUID assigned by the backend; stable across fetches.
    pub id: String,
    pub external_id: ExternalId,
    pub title: MultiLangText,
    pub summary: MultiLangText,
    pub thumbnail: Image,
    pub link: String,
    pub published_at: DateTime<Utc>,
    pub status: Status,
    pub language: Option<Language>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    pub base: FeedItemBase,
    pub author: Author,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Episode {
    pub base: FeedItemBase,
    /// Length in seconds.
    pub duration: u32,
    pub duration_label: String,
    pub speakers: Vec<Speaker>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recording {
    pub base: FeedItemBase,
    pub aspect_ratio: AspectRatio,
}

/// Coarse content kind, used by the feed tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeedKind {
    Blog,
    Podcast,
    Video,
}

/// A single feed entry.
///
/// ## Sorting
///
/// `FeedItem` implements [`Ord`] for **reverse-chronological** ordering:
/// newer items sort before older ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedItem {
    Article(Article),
    Episode(Episode),
    Recording(Recording),
}

impl FeedItem {
    pub fn base(&self) -> &FeedItemBase {
        match self {
            FeedItem::Article(a) => &a.base,
            FeedItem::Episode(e) => &e.base,
            FeedItem::Recording(r) => &r.base,
        }
    }

    pub fn id(&self) -> &str {
        &self.base().id
    }

    pub fn title(&self) -> &MultiLangText {
        &self.base().title
    }

    pub fn link(&self) -> &str {
        &self.base().link
    }

    pub fn published_at(&self) -> DateTime<Utc> {
        self.base().published_at
    }

    pub fn kind(&self) -> FeedKind {
        match self {
            FeedItem::Article(_) => FeedKind::Blog,
            FeedItem::Episode(_) => FeedKind::Podcast,
            FeedItem::Recording(_) => FeedKind::Video,
        }
    }

    /// Who made it: the article author or the episode speakers.
    pub fn credits(&self) -> Option<String> {
        match self {
            FeedItem::Article(a) => Some(a.author.name.clone()),
            FeedItem::Episode(e) if !e.speakers.is_empty() => Some(
                e.speakers
                    .iter()
                    .map(|s| s.name.as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
            ),
            _ => None,
        }
    }
}

/// Render a duration in seconds as `m:ss`.
pub fn duration_label(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

// ---------------------------------------------------------------------------
// Ordering — reverse chronological (newest first)
// ---------------------------------------------------------------------------

impl Ord for FeedItem {
    fn cmp(&self, other: &Self) -> Ordering {
        // `other` first so that newer timestamps sort earlier.
        other.published_at().cmp(&self.published_at())
    }
}

impl PartialOrd for FeedItem {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::TimeZone;

    fn base(id: &str, title: &str, published_at: DateTime<Utc>) -> FeedItemBase {
        FeedItemBase {
            id: id.to_string(),
            external_id: ExternalId {
                value: format!("ext-{id}"),
                service: Media::Medium,
            },
            title: MultiLangText::same(title),
            summary: MultiLangText::default(),
            thumbnail: Image::default(),
            link: format!("https://example.com/{id}"),
            published_at,
            status: Status::Submitted,
            language: None,
        }
    }

    /// Shorthand constructors for tests elsewhere in the crate.
    pub fn make_article(id: &str, title: &str, published_at: DateTime<Utc>) -> FeedItem {
        FeedItem::Article(Article {
            base: base(id, title, published_at),
            author: Author {
                name: "author".to_string(),
                link: "https://example.com/@author".to_string(),
            },
        })
    }

    pub fn make_episode(id: &str, title: &str, published_at: DateTime<Utc>) -> FeedItem {
        FeedItem::Episode(Episode {
            base: base(id, title, published_at),
            duration: 90,
            duration_label: duration_label(90),
            speakers: vec![Speaker {
                name: "host".to_string(),
                icon_url: String::new(),
            }],
        })
    }

    pub fn make_recording(id: &str, title: &str, published_at: DateTime<Utc>) -> FeedItem {
        FeedItem::Recording(Recording {
            base: base(id, title, published_at),
            aspect_ratio: AspectRatio { width: 16, height: 9 },
        })
    }

    #[test]
    fn sort_reverse_chronological() {
        let old = make_article("1", "Old", Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap());
        let mid = make_episode("2", "Mid", Utc.with_ymd_and_hms(2020, 6, 15, 12, 0, 0).unwrap());
        let new = make_recording("3", "New", Utc.with_ymd_and_hms(2021, 1, 1, 0, 0, 0).unwrap());

        let mut items = vec![old, new, mid];
        items.sort();

        assert_eq!(items[0].id(), "3", "newest first");
        assert_eq!(items[1].id(), "2");
        assert_eq!(items[2].id(), "1", "oldest last");
    }

    #[test]
    fn same_date_yields_equal_ordering() {
        let ts = Utc.with_ymd_and_hms(2020, 12, 21, 3, 0, 0).unwrap();
        let a = make_episode("a", "A", ts);
        let b = make_episode("b", "B", ts);
        assert_eq!(a.cmp(&b), Ordering::Equal);
    }

    #[test]
    fn kind_follows_variant() {
        let ts = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(make_article("a", "A", ts).kind(), FeedKind::Blog);
        assert_eq!(make_episode("e", "E", ts).kind(), FeedKind::Podcast);
        assert_eq!(make_recording("r", "R", ts).kind(), FeedKind::Video);
    }

    #[test]
    fn credits_join_speaker_names() {
        let ts = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(make_episode("e", "E", ts).credits().as_deref(), Some("host"));
        assert_eq!(make_recording("r", "R", ts).credits(), None);
    }

    #[test]
    fn duration_label_pads_seconds() {
        assert_eq!(duration_label(1456), "24:16");
        assert_eq!(duration_label(65), "1:05");
        assert_eq!(duration_label(0), "0:00");
    }

    #[test]
    fn media_maps_known_service_names() {
        assert_eq!(Media::from_service_name("youtube"), Media::YouTube);
        assert_eq!(Media::from_service_name("droidkaigi_fm"), Media::DroidKaigiFm);
        let other = Media::from_service_name("vimeo");
        assert_eq!(other, Media::Other("vimeo".into()));
        assert_eq!(other.service_name(), "vimeo");
    }
}
