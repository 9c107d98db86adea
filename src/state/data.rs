/// Shared data structures for the application state
///
/// These structs represent the movie records that flow between
/// the OMDb API layer and the UI layer. Field names follow Rust
/// conventions; serde renames map them to the API's JSON keys.

use serde::{Deserialize, Serialize};

/// Sentinel the API uses when a title has no poster image
pub const NO_POSTER: &str = "N/A";

/// Abbreviated record returned by a title search
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MovieSummary {
    /// Unique catalog identifier (e.g., "tt0133093")
    #[serde(rename = "imdbID")]
    pub imdb_id: String,
    /// Display title
    #[serde(rename = "Title")]
    pub title: String,
    /// Release year as text ("1999", or a range like "2010–2015" for series)
    #[serde(rename = "Year")]
    pub year: String,
    /// Poster image URL, or "N/A" when the title has no poster
    #[serde(rename = "Poster")]
    pub poster: String,
}

impl MovieSummary {
    /// Whether the record carries a real poster URL
    pub fn has_poster(&self) -> bool {
        self.poster != NO_POSTER
    }
}

/// Full record returned by a single-title lookup
///
/// Superset of [`MovieSummary`]. Exactly one instance is displayed at
/// a time; it is replaced wholesale by each completed detail request.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MovieDetail {
    /// Unique catalog identifier
    #[serde(rename = "imdbID")]
    pub imdb_id: String,
    /// Display title
    #[serde(rename = "Title")]
    pub title: String,
    /// Release year as text
    #[serde(rename = "Year")]
    pub year: String,
    /// Poster image URL, or "N/A"
    #[serde(rename = "Poster")]
    pub poster: String,
    /// Plot synopsis
    #[serde(rename = "Plot")]
    pub plot: String,
    /// Comma-separated genre list
    #[serde(rename = "Genre")]
    pub genre: String,
    /// Credited director(s)
    #[serde(rename = "Director")]
    pub director: String,
    /// Aggregate rating as text (e.g., "8.7", or "N/A")
    #[serde(rename = "imdbRating")]
    pub imdb_rating: String,
}

impl MovieDetail {
    /// Whether the record carries a real poster URL
    pub fn has_poster(&self) -> bool {
        self.poster != NO_POSTER
    }
}
