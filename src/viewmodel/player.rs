//! Podcast player state.
//!
//! One episode at a time.  This tracks what the user asked for; actual
//! audio output is up to whatever front-end drives it.

use tracing::info;

use crate::model::{FeedItem, Language, MultiLangText};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PlayerState {
    #[default]
    Stopped,
    Playing {
        id: String,
    },
    Paused {
        id: String,
    },
}

#[derive(Debug, Default)]
pub struct PlayerViewModel {
    state: PlayerState,
    title: Option<MultiLangText>,
}

impl PlayerViewModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &PlayerState {
        &self.state
    }

    /// Title of the episode currently loaded, playing or paused.
    pub fn title(&self, language: Language) -> Option<&str> {
        self.title.as_ref().map(|t| t.get(language))
    }

    /// Play/pause toggle for `item`.
    ///
    /// A different episode replaces whatever is loaded and starts playing;
    /// the loaded one flips between playing and paused.  Anything other than
    /// an episode is refused and `false` is returned.
    pub fn toggle(&mut self, item: &FeedItem) -> bool {
        let FeedItem::Episode(episode) = item else {
            return false;
        };
        let id = episode.base.id.clone();

        self.state = match std::mem::take(&mut self.state) {
            PlayerState::Playing { id: current } if current == id => PlayerState::Paused { id },
            PlayerState::Paused { id: current } if current == id => PlayerState::Playing { id },
            _ => {
                info!(id = %id, duration = %episode.duration_label, "playing episode");
                self.title = Some(episode.base.title.clone());
                PlayerState::Playing { id }
            }
        };
        true
    }

    pub fn stop(&mut self) {
        self.state = PlayerState::Stopped;
        self.title = None;
    }

    pub fn is_playing(&self, id: &str) -> bool {
        matches!(&self.state, PlayerState::Playing { id: current } if current == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::test_items::{make_article, make_episode};
    use chrono::{TimeZone, Utc};

    fn ts() -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2020, 12, 21, 3, 0, 0).unwrap()
    }

    #[test]
    fn toggle_plays_pauses_and_resumes() {
        let mut player = PlayerViewModel::new();
        let ep = make_episode("5", "Notifications", ts());

        assert!(player.toggle(&ep));
        assert_eq!(player.state(), &PlayerState::Playing { id: "5".into() });
        assert!(player.toggle(&ep));
        assert_eq!(player.state(), &PlayerState::Paused { id: "5".into() });
        assert!(player.toggle(&ep));
        assert!(player.is_playing("5"));
        assert_eq!(player.title(Language::English), Some("Notifications"));
    }

    #[test]
    fn other_episode_replaces_current() {
        let mut player = PlayerViewModel::new();
        player.toggle(&make_episode("5", "Five", ts()));
        player.toggle(&make_episode("6", "Six", ts()));
        assert!(player.is_playing("6"));
        assert_eq!(player.title(Language::English), Some("Six"));
    }

    #[test]
    fn articles_are_not_playable() {
        let mut player = PlayerViewModel::new();
        assert!(!player.toggle(&make_article("a", "Article", ts())));
        assert_eq!(player.state(), &PlayerState::Stopped);
    }

    #[test]
    fn stop_clears_everything() {
        let mut player = PlayerViewModel::new();
        player.toggle(&make_episode("5", "Five", ts()));
        player.stop();
        assert_eq!(player.state(), &PlayerState::Stopped);
        assert_eq!(player.title(Language::English), None);
    }
}
