/// Poster download and cache
///
/// Posters are fetched once per title, downscaled to card size, and
/// written to the user cache directory as `<identifier>.jpg`. A file
/// already on disk short-circuits the network entirely. The in-memory
/// map tracks which identifiers are loading so a poster is never
/// requested twice in one session.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use image::imageops::FilterType;

use crate::api::client::OmdbClient;

/// Longest edge of a cached poster image (square bound)
const POSTER_SIZE: u32 = 512;

/// Load state of one title's poster
#[derive(Debug, Clone)]
pub enum PosterState {
    /// Download or decode in progress
    Loading,
    /// Decoded and cached; ready to display from this path
    Ready(PathBuf),
    /// The load failed; the card keeps its placeholder
    Unavailable,
}

/// In-memory view of the poster cache, keyed by identifier
#[derive(Debug, Default)]
pub struct PosterCache {
    states: HashMap<String, PosterState>,
}

impl PosterCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark an identifier as loading.
    ///
    /// Returns `false` if a load was already started for it, so each
    /// poster is fetched at most once per session.
    pub fn begin(&mut self, imdb_id: &str) -> bool {
        if self.states.contains_key(imdb_id) {
            return false;
        }
        self.states.insert(imdb_id.to_string(), PosterState::Loading);
        true
    }

    /// Record the outcome of a finished load
    pub fn resolve(&mut self, imdb_id: &str, path: Option<PathBuf>) {
        let state = match path {
            Some(path) => PosterState::Ready(path),
            None => PosterState::Unavailable,
        };
        self.states.insert(imdb_id.to_string(), state);
    }

    /// Current load state for an identifier, if a load was ever started
    pub fn state(&self, imdb_id: &str) -> Option<&PosterState> {
        self.states.get(imdb_id)
    }
}

/// Get the poster cache directory
/// Returns ~/.cache/movie-search/posters on Linux
pub fn poster_cache_dir() -> PathBuf {
    let mut path = dirs_next::cache_dir()
        .or_else(|| dirs_next::home_dir())
        .expect("Could not determine cache directory");

    path.push("movie-search");
    path.push("posters");

    // Ensure the directory exists
    std::fs::create_dir_all(&path).expect("Failed to create poster cache directory");

    path
}

/// Expected cache file for an identifier (doesn't check existence)
pub fn poster_path(cache_dir: &Path, imdb_id: &str) -> PathBuf {
    cache_dir.join(format!("{}.jpg", imdb_id))
}

/// Download, downscale, and cache one poster.
///
/// Returns the cached file path. A file already in the cache is
/// reused without a network request.
pub async fn load_poster(
    client: OmdbClient,
    imdb_id: String,
    url: String,
    cache_dir: PathBuf,
) -> Result<PathBuf, String> {
    let target = poster_path(&cache_dir, &imdb_id);
    if target.exists() {
        return Ok(target);
    }

    let bytes = client
        .fetch_bytes(&url)
        .await
        .map_err(|e| format!("Poster download failed for {}: {}", imdb_id, e))?;

    // Spawn blocking because image decoding is CPU-intensive
    tokio::task::spawn_blocking(move || save_poster(&bytes, &target))
        .await
        .map_err(|e| format!("Task join error: {}", e))?
}

/// Blocking decode, resize, and encode step
fn save_poster(bytes: &[u8], target: &Path) -> Result<PathBuf, String> {
    let img = image::load_from_memory(bytes)
        .map_err(|e| format!("Failed to decode poster: {}", e))?;

    let scaled = img.resize(POSTER_SIZE, POSTER_SIZE, FilterType::Lanczos3);

    // JPEG output has no alpha channel
    scaled
        .to_rgb8()
        .save(target)
        .map_err(|e| format!("Failed to write poster cache: {}", e))?;

    Ok(target.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgb, RgbImage};
    use std::io::Cursor;

    #[test]
    fn test_cache_tracks_one_load_per_identifier() {
        let mut cache = PosterCache::new();

        assert!(cache.begin("tt0133093"));
        assert!(!cache.begin("tt0133093"));
        assert!(matches!(
            cache.state("tt0133093"),
            Some(PosterState::Loading)
        ));

        cache.resolve("tt0133093", Some(PathBuf::from("/tmp/tt0133093.jpg")));
        assert!(matches!(cache.state("tt0133093"), Some(PosterState::Ready(_))));

        // A finished load still blocks re-requests.
        assert!(!cache.begin("tt0133093"));
    }

    #[test]
    fn test_failed_load_resolves_to_unavailable() {
        let mut cache = PosterCache::new();

        cache.begin("tt0000001");
        cache.resolve("tt0000001", None);

        assert!(matches!(
            cache.state("tt0000001"),
            Some(PosterState::Unavailable)
        ));
        assert!(cache.state("tt9999999").is_none());
    }

    #[test]
    fn test_poster_path_is_keyed_by_identifier() {
        let dir = PathBuf::from("/cache/posters");
        assert_eq!(
            poster_path(&dir, "tt0133093"),
            PathBuf::from("/cache/posters/tt0133093.jpg")
        );
    }

    #[test]
    fn test_save_poster_writes_a_jpeg() {
        let mut png = Vec::new();
        RgbImage::from_pixel(8, 12, Rgb([180, 40, 40]))
            .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
            .unwrap();

        let target = std::env::temp_dir().join("movie-search-test-poster.jpg");
        let _ = std::fs::remove_file(&target);

        let written = save_poster(&png, &target).unwrap();
        assert!(written.exists());

        let _ = std::fs::remove_file(&target);
    }

    #[test]
    fn test_save_poster_rejects_garbage_bytes() {
        let target = std::env::temp_dir().join("movie-search-test-garbage.jpg");
        assert!(save_poster(b"not an image", &target).is_err());
        assert!(!target.exists());
    }
}
