//! Feed screen state.
//!
//! Owns the last fetched list, the favorite filter, the active tab and the
//! loading / error indicator.  The list is replaced wholesale by a fetch and
//! otherwise never touched: filtering only changes what [`FeedViewModel::visible`]
//! returns.

use tracing::{debug, info, warn};

use super::favorites::FavoriteStore;
#[cfg(test)]
use crate::api::FeedApi;
use crate::error::{AppError, FeedError};
use crate::model::{FeedItem, FeedKind, Filters};

/// Feed screen tabs.  `Home` shows every kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FeedTab {
    #[default]
    Home,
    Blog,
    Video,
    Podcast,
}

impl FeedTab {
    pub const ALL: [FeedTab; 4] = [FeedTab::Home, FeedTab::Blog, FeedTab::Video, FeedTab::Podcast];

    pub fn label(self) -> &'static str {
        match self {
            FeedTab::Home => "Home",
            FeedTab::Blog => "Blog",
            FeedTab::Video => "Video",
            FeedTab::Podcast => "Podcast",
        }
    }

    pub fn next(self) -> Self {
        match self {
            FeedTab::Home => FeedTab::Blog,
            FeedTab::Blog => FeedTab::Video,
            FeedTab::Video => FeedTab::Podcast,
            FeedTab::Podcast => FeedTab::Home,
        }
    }

    pub fn shows(self, kind: FeedKind) -> bool {
        match self {
            FeedTab::Home => true,
            FeedTab::Blog => kind == FeedKind::Blog,
            FeedTab::Video => kind == FeedKind::Video,
            FeedTab::Podcast => kind == FeedKind::Podcast,
        }
    }
}

pub struct FeedViewModel<S: FavoriteStore> {
    contents: Option<Vec<FeedItem>>,
    favorites: S,
    filters: Filters,
    tab: FeedTab,
    loading: bool,
    error: Option<AppError>,
}

impl<S: FavoriteStore> FeedViewModel<S> {
    pub fn new(favorites: S) -> Self {
        Self {
            contents: None,
            favorites,
            filters: Filters::default(),
            tab: FeedTab::default(),
            loading: false,
            error: None,
        }
    }

    // -- loading -------------------------------------------------------------

    /// Mark a fetch as started.  Returns `false` (and changes nothing) if
    /// one is already outstanding.
    pub fn begin_load(&mut self) -> bool {
        if self.loading {
            debug!("feed fetch already in flight");
            return false;
        }
        self.loading = true;
        self.error = None;
        true
    }

    /// Record the outcome of the outstanding fetch.
    ///
    /// A failure keeps the previously fetched list so the screen does not go
    /// blank on a retryable error.
    pub fn finish_load(&mut self, result: Result<Vec<FeedItem>, FeedError>) {
        self.loading = false;
        match result {
            Ok(items) => {
                info!(count = items.len(), "feed loaded");
                self.contents = Some(items);
            }
            Err(e) => {
                warn!(error = %e, "feed load failed");
                self.error = Some(e.into());
            }
        }
    }

    /// Record a failure that happened before the fetch could start.
    pub fn fail_load(&mut self, error: AppError) {
        warn!(%error, "feed load aborted");
        self.loading = false;
        self.error = Some(error);
    }

    /// Fetch through `api` and store the outcome.  The terminal runs the
    /// fetch on its own task instead, so this is only used in-process.
    #[cfg(test)]
    pub async fn load(&mut self, api: &dyn FeedApi) {
        if !self.begin_load() {
            return;
        }
        let result = api.fetch().await;
        self.finish_load(result);
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&AppError> {
        self.error.as_ref()
    }

    /// Everything the last successful fetch returned, unfiltered.
    pub fn contents(&self) -> &[FeedItem] {
        self.contents.as_deref().unwrap_or_default()
    }

    /// Whether any fetch has succeeded yet.
    pub fn has_contents(&self) -> bool {
        self.contents.is_some()
    }

    // -- filters -------------------------------------------------------------

    pub fn filters(&self) -> Filters {
        self.filters
    }

    pub fn set_favorite_filter(&mut self, filter_favorite: bool) {
        self.filters = Filters { filter_favorite };
    }

    pub fn toggle_favorite_filter(&mut self) {
        self.set_favorite_filter(!self.filters.filter_favorite);
    }

    pub fn tab(&self) -> FeedTab {
        self.tab
    }

    pub fn select_tab(&mut self, tab: FeedTab) {
        self.tab = tab;
    }

    pub fn next_tab(&mut self) {
        self.tab = self.tab.next();
    }

    // -- favorites -----------------------------------------------------------

    pub fn is_favorite(&self, id: &str) -> bool {
        self.favorites.is_favorite(id)
    }

    pub fn favorite_count(&self) -> usize {
        self.favorites.favorites().len()
    }

    /// Flip the favorite mark on `id`; returns the new state.
    pub fn toggle_favorite(&mut self, id: &str) -> bool {
        let now = self.favorites.toggle(id);
        debug!(id, favorite = now, "favorite toggled");
        now
    }

    /// Items on the current tab, restricted to favorites when the filter is on.
    pub fn visible(&self) -> Vec<&FeedItem> {
        self.contents()
            .iter()
            .filter(|item| self.tab.shows(item.kind()))
            .filter(|item| !self.filters.filter_favorite || self.favorites.is_favorite(item.id()))
            .collect()
    }
}
