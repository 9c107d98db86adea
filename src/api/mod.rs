/// OMDb API module
///
/// This module handles:
/// - Typed requests against the movie database endpoint (client.rs)
/// - Poster download, downscaling, and disk caching (poster.rs)

pub mod client;
pub mod poster;

pub use client::{FetchError, OmdbClient};
