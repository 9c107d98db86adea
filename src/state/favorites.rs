/// Session-local favorites collection
///
/// Membership is keyed by catalog identifier only. Entries are stored
/// by value, so a favorited copy is unaffected by later lookups for
/// the same title. Nothing here touches the network or disk; the set
/// lives exactly as long as the process.

use super::data::MovieSummary;

/// The user-curated set of favorite titles
///
/// Invariant: no two entries share an identifier. Insertion order is
/// kept for stable rendering but carries no meaning.
#[derive(Debug, Clone, Default)]
pub struct Favorites {
    entries: Vec<MovieSummary>,
}

impl Favorites {
    /// Create an empty favorites set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the movie if absent, remove it if present.
    ///
    /// Toggling twice restores the original membership.
    pub fn toggle(&mut self, movie: &MovieSummary) {
        if let Some(pos) = self
            .entries
            .iter()
            .position(|fav| fav.imdb_id == movie.imdb_id)
        {
            self.entries.remove(pos);
        } else {
            self.entries.push(movie.clone());
        }
    }

    /// Membership test by identifier equality only
    pub fn contains(&self, imdb_id: &str) -> bool {
        self.entries.iter().any(|fav| fav.imdb_id == imdb_id)
    }

    /// Iterate the favorited records
    pub fn iter(&self) -> impl Iterator<Item = &MovieSummary> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
