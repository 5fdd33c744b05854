//! Domain types.
//!
//! [`FeedItem`] is what the feed client produces and the view-models hold.
//! [`Filters`] and [`User`] are the only other pieces of state that cross
//! module boundaries.

mod feed_item;
mod text;

pub use feed_item::{
    duration_label, Article, AspectRatio, Author, Episode, ExternalId, FeedItem, FeedItemBase,
    FeedKind, Image, Media, Recording, Speaker, Status,
};
pub use text::{Language, MultiLangText};

#[cfg(test)]
pub(crate) use feed_item::tests as test_items;

/// User-toggled view restrictions on the feed list.
///
/// Holds nothing but the last toggle; the fetched list is never touched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Filters {
    pub filter_favorite: bool,
}

/// The signed-in user, as far as the app cares: an identity token.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct User {
    pub id_token: Option<String>,
}

impl User {
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            id_token: Some(token.into()),
        }
    }

    pub fn is_signed_in(&self) -> bool {
        self.id_token.as_deref().is_some_and(|t| !t.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filters_default_to_showing_everything() {
        assert!(!Filters::default().filter_favorite);
    }

    #[test]
    fn empty_token_is_not_signed_in() {
        assert!(!User::default().is_signed_in());
        assert!(!User::with_token("").is_signed_in());
        assert!(User::with_token("abc").is_signed_in());
    }
}
