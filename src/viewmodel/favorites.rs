use std::collections::HashSet;

/// Where the user's favorite item ids live.
pub trait FavoriteStore {
    fn is_favorite(&self, id: &str) -> bool;

    /// Flip `id` and return whether it is now a favorite.
    fn toggle(&mut self, id: &str) -> bool;

    fn favorites(&self) -> HashSet<String>;
}

/// Session-only store; favorites are gone when the process exits.
#[derive(Debug, Default)]
pub struct InMemoryFavoriteStore {
    ids: HashSet<String>,
}

impl InMemoryFavoriteStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FavoriteStore for InMemoryFavoriteStore {
    fn is_favorite(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    fn toggle(&mut self, id: &str) -> bool {
        if self.ids.remove(id) {
            false
        } else {
            self.ids.insert(id.to_string());
            true
        }
    }

    fn favorites(&self) -> HashSet<String> {
        self.ids.clone()
    }
}
