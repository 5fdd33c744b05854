//! Application state for the terminal front-end.
//!
//! [`App`] bundles the view-models with the bits of state only the terminal
//! cares about (list selection, status line, quit flag).  Every mutation
//! happens on the UI loop: key presses via [`crate::input`] and fetch
//! results via [`App::apply`].

use ratatui::widgets::ListState;
use tracing::debug;

use crate::error::AppError;
use crate::fetch::FetchMsg;
use crate::model::{FeedItem, Language, User};
use crate::viewmodel::{
    FeedTab, FeedViewModel, InMemoryFavoriteStore, PlayerViewModel, SettingsViewModel,
};

pub struct App {
    pub feed: FeedViewModel<InMemoryFavoriteStore>,
    pub settings: SettingsViewModel,
    pub player: PlayerViewModel,
    /// Session from the last successful sign-in.
    pub user: Option<User>,
    /// List selection state, indexing into [`FeedViewModel::visible`].
    pub list_state: ListState,
    /// Whether the user has requested to quit.
    pub quit: bool,
    /// One-line message shown in the status bar.
    pub status: String,
    reload_requested: bool,
}

impl App {
    pub fn new(language: Language) -> Self {
        Self {
            feed: FeedViewModel::new(InMemoryFavoriteStore::new()),
            settings: SettingsViewModel::new(language),
            player: PlayerViewModel::new(),
            user: None,
            list_state: ListState::default(),
            quit: false,
            status: "Starting…".into(),
            reload_requested: false,
        }
    }

    // -- fetch results -------------------------------------------------------

    /// Fold a message from the fetch task into the view-models.
    pub fn apply(&mut self, msg: FetchMsg) {
        match msg {
            FetchMsg::SignedIn(user) => {
                self.status = if user.is_signed_in() {
                    "Signed in".into()
                } else {
                    "Session has no token; fetching anonymously".into()
                };
                self.user = Some(user);
            }
            FetchMsg::AuthFailed(e) => {
                let error = AppError::Auth(e);
                let hint = if error.is_transient() { "  (r: retry)" } else { "" };
                self.status = format!("Sign-in failed: {error}{hint}");
                self.feed.fail_load(error);
            }
            FetchMsg::Feed(result) => {
                self.feed.finish_load(result);
                self.status = match self.feed.error() {
                    Some(e) if e.is_retryable() => format!("Error: {e}  (r: retry)"),
                    Some(e) => format!("Error: {e}"),
                    None => format!("Fetched {} items", self.feed.contents().len()),
                };
                self.clamp_selection();
            }
        }
    }

    /// Ask the main loop to start a fetch.  Only honoured after a failure
    /// that asking again can fix.
    pub fn request_reload(&mut self) {
        match self.feed.error() {
            Some(e) if e.is_transient() => self.reload_requested = true,
            Some(_) => self.status = "Sign-in was refused; not retrying".into(),
            None => {}
        }
    }

    /// Consume a pending reload request.
    pub fn take_reload_request(&mut self) -> bool {
        std::mem::take(&mut self.reload_requested)
    }

    // -- selection -----------------------------------------------------------

    pub fn visible_len(&self) -> usize {
        self.feed.visible().len()
    }

    pub fn selected_item(&self) -> Option<&FeedItem> {
        let index = self.list_state.selected()?;
        self.feed.visible().get(index).copied()
    }

    pub fn select_next(&mut self) {
        let len = self.visible_len();
        if len == 0 {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => (i + 1).min(len - 1),
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    pub fn select_previous(&mut self) {
        if self.visible_len() == 0 {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => i.saturating_sub(1),
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    pub fn select_first(&mut self) {
        if self.visible_len() > 0 {
            self.list_state.select(Some(0));
        }
    }

    pub fn select_last(&mut self) {
        let len = self.visible_len();
        if len > 0 {
            self.list_state.select(Some(len - 1));
        }
    }

    /// Keep the selection inside the visible list after it shrinks or grows.
    fn clamp_selection(&mut self) {
        let len = self.visible_len();
        let selected = match (len, self.list_state.selected()) {
            (0, _) => None,
            (_, Some(i)) => Some(i.min(len - 1)),
            (_, None) => None,
        };
        self.list_state.select(selected);
    }

    // -- actions -------------------------------------------------------------

    pub fn toggle_favorite_filter(&mut self) {
        self.feed.toggle_favorite_filter();
        self.list_state.select(None);
        self.select_first();
    }

    pub fn next_tab(&mut self) {
        self.feed.next_tab();
        self.list_state.select(None);
        self.select_first();
    }

    pub fn select_tab(&mut self, tab: FeedTab) {
        self.feed.select_tab(tab);
        self.list_state.select(None);
        self.select_first();
    }

    pub fn toggle_selected_favorite(&mut self) {
        let Some(id) = self.selected_item().map(|item| item.id().to_string()) else {
            return;
        };
        let now = self.feed.toggle_favorite(&id);
        let msg = if now { "Added to favorites" } else { "Removed from favorites" };
        self.status = msg.into();
        self.clamp_selection();
    }

    pub fn toggle_play_selected(&mut self) {
        let Some(item) = self.selected_item().cloned() else {
            return;
        };
        if !self.player.toggle(&item) {
            self.status = "Only podcast episodes can be played".into();
        }
    }

    pub fn stop_player(&mut self) {
        self.player.stop();
    }

    pub fn toggle_language(&mut self) {
        let language = self.settings.toggle_language();
        debug!(%language, "ui language");
    }

    pub fn show_selected_link(&mut self) {
        if let Some(link) = self.selected_item().map(|item| item.link().to_string()) {
            self.status = link;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::FakeFeedApi;
    use crate::error::{AuthError, FeedError};

    async fn loaded_app() -> App {
        let mut app = App::new(Language::English);
        app.feed.begin_load();
        let items = crate::api::FeedApi::fetch(&FakeFeedApi::new().unwrap()).await;
        app.apply(FetchMsg::Feed(items));
        app
    }

    // -- construction --------------------------------------------------------

    #[test]
    fn new_app_starts_empty() {
        let app = App::new(Language::Japanese);
        assert_eq!(app.visible_len(), 0);
        assert!(!app.quit);
        assert!(app.list_state.selected().is_none());
        assert!(app.user.is_none());
    }

    // -- fetch results -------------------------------------------------------

    #[tokio::test]
    async fn feed_message_populates_list() {
        let app = loaded_app().await;
        assert_eq!(app.visible_len(), 6);
        assert_eq!(app.status, "Fetched 6 items");
        assert!(!app.feed.is_loading());
    }

    #[test]
    fn signed_in_message_stores_user() {
        let mut app = App::new(Language::Japanese);
        app.apply(FetchMsg::SignedIn(User::with_token("t")));
        assert_eq!(app.user, Some(User::with_token("t")));
    }

    #[test]
    fn signed_in_without_token_is_reported() {
        let mut app = App::new(Language::Japanese);
        app.apply(FetchMsg::SignedIn(User::default()));
        assert!(app.status.starts_with("Session has no token"));
        assert_eq!(app.user, Some(User::default()));
    }

    #[test]
    fn refused_sign_in_is_not_retryable() {
        let mut app = App::new(Language::Japanese);
        app.feed.begin_load();
        app.apply(FetchMsg::AuthFailed(AuthError::Provider("denied".into())));
        assert!(!app.feed.is_loading());
        app.request_reload();
        assert!(!app.take_reload_request());
        assert_eq!(app.status, "Sign-in was refused; not retrying");
    }

    #[test]
    fn unreachable_provider_can_be_retried_by_hand() {
        let mut app = App::new(Language::Japanese);
        app.feed.begin_load();
        app.apply(FetchMsg::AuthFailed(AuthError::Transport("connection reset".into())));
        assert!(app.status.ends_with("(r: retry)"));
        app.request_reload();
        assert!(app.take_reload_request());
    }

    #[test]
    fn feed_failure_can_be_retried_once() {
        let mut app = App::new(Language::Japanese);
        app.feed.begin_load();
        app.apply(FetchMsg::Feed(Err(FeedError::Status(500))));
        assert!(app.status.starts_with("Error:"));
        app.request_reload();
        assert!(app.take_reload_request());
        assert!(!app.take_reload_request());
    }

    #[tokio::test]
    async fn reload_is_ignored_without_error() {
        let mut app = loaded_app().await;
        app.request_reload();
        assert!(!app.take_reload_request());
    }

    // -- navigation ----------------------------------------------------------

    #[test]
    fn navigation_on_empty_is_noop() {
        let mut app = App::new(Language::Japanese);
        app.select_next();
        app.select_previous();
        app.select_first();
        app.select_last();
        assert!(app.list_state.selected().is_none());
    }

    #[tokio::test]
    async fn select_next_clamps_at_last_item() {
        let mut app = loaded_app().await;
        app.select_next();
        assert_eq!(app.list_state.selected(), Some(0));
        app.select_last();
        app.select_next();
        assert_eq!(app.list_state.selected(), Some(5));
        app.select_first();
        app.select_previous();
        assert_eq!(app.list_state.selected(), Some(0));
    }

    // -- actions -------------------------------------------------------------

    #[tokio::test]
    async fn favorite_filter_shows_only_marked_items() {
        let mut app = loaded_app().await;
        app.select_first();
        app.toggle_selected_favorite();
        let favorite = app.selected_item().unwrap().id().to_string();

        app.toggle_favorite_filter();
        assert_eq!(app.visible_len(), 1);
        assert_eq!(app.selected_item().unwrap().id(), favorite);
        assert_eq!(app.feed.contents().len(), 6);

        // Unmarking under the filter empties the list and the selection.
        app.toggle_selected_favorite();
        assert_eq!(app.visible_len(), 0);
        assert!(app.list_state.selected().is_none());
    }

    #[tokio::test]
    async fn next_tab_resets_selection_to_top() {
        let mut app = loaded_app().await;
        app.select_last();
        app.next_tab();
        assert_eq!(app.feed.tab(), FeedTab::Blog);
        assert_eq!(app.visible_len(), 2);
        assert_eq!(app.list_state.selected(), Some(0));
    }

    #[tokio::test]
    async fn select_tab_jumps_straight_to_section() {
        let mut app = loaded_app().await;
        app.select_tab(FeedTab::Video);
        assert_eq!(app.visible_len(), 2);
        assert_eq!(app.list_state.selected(), Some(0));
        app.select_tab(FeedTab::Home);
        assert_eq!(app.visible_len(), 6);
    }

    #[tokio::test]
    async fn play_only_accepts_episodes() {
        let mut app = loaded_app().await;
        // Fixture order puts the two episodes first.
        app.select_first();
        app.toggle_play_selected();
        let id = app.selected_item().unwrap().id().to_string();
        assert!(app.player.is_playing(&id));

        app.select_last();
        app.toggle_play_selected();
        assert_eq!(app.status, "Only podcast episodes can be played");
        assert!(app.player.is_playing(&id));

        app.stop_player();
        assert!(!app.player.is_playing(&id));
    }

    #[tokio::test]
    async fn show_link_puts_url_in_status() {
        let mut app = loaded_app().await;
        app.select_first();
        app.show_selected_link();
        assert_eq!(app.status, "https://droidkaigi.jp/fm/episode/5");
    }

    #[test]
    fn toggle_language_switches_settings() {
        let mut app = App::new(Language::Japanese);
        app.toggle_language();
        assert_eq!(app.settings.language(), Language::English);
    }
}
