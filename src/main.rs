use iced::widget::{button, column, container, row, scrollable, text, text_input, Column};
use iced::{Element, Length, Task, Theme};
use std::path::PathBuf;

mod api;
mod config;
mod state;
mod ui;

use api::poster::{self, PosterCache};
use api::{FetchError, OmdbClient};
use config::Config;
use state::data::{MovieDetail, MovieSummary};
use state::favorites::Favorites;
use state::search::{Phase, SearchOutcome, SearchState, DETAIL_FAILED_MSG};

/// Main application state
struct MovieSearch {
    /// Client shared by every API request
    omdb: OmdbClient,
    /// Query controller: input text, results, busy flag, visible error
    search: SearchState,
    /// Currently displayed detail record, if any
    selected: Option<MovieDetail>,
    /// Session-local favorites
    favorites: Favorites,
    /// Poster load states keyed by identifier
    posters: PosterCache,
    /// On-disk poster cache directory
    poster_dir: PathBuf,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    /// Search box text edited
    QueryChanged(String),
    /// Search submitted via the button or Enter
    SubmitSearch,
    /// A search request finished
    SearchComplete {
        generation: u64,
        outcome: SearchOutcome,
    },
    /// "View Details" pressed on a card
    ShowDetails(String),
    /// A detail request finished
    DetailLoaded(Result<MovieDetail, String>),
    /// The detail modal was dismissed
    CloseDetails,
    /// A favorite toggle was pressed
    ToggleFavorite(MovieSummary),
    /// A poster finished downloading (or failed)
    PosterLoaded {
        imdb_id: String,
        path: Option<PathBuf>,
    },
}

impl MovieSearch {
    /// Create a new instance of the application
    fn new() -> (Self, Task<Message>) {
        // Without a key the app cannot reach the API at all
        let config = Config::load()
            .expect("Failed to load configuration. Set OMDB_API_KEY or create config.toml.");
        let omdb = OmdbClient::new(&config).expect("Failed to initialize HTTP client.");

        let poster_dir = poster::poster_cache_dir();
        println!("🎬 Movie Search ready (API at {})", config.base_url);
        println!("📁 Poster cache at: {}", poster_dir.display());

        (
            MovieSearch {
                omdb,
                search: SearchState::new(),
                selected: None,
                favorites: Favorites::new(),
                posters: PosterCache::new(),
                poster_dir,
            },
            Task::none(),
        )
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::QueryChanged(query) => {
                self.search.query = query;
                Task::none()
            }
            Message::SubmitSearch => match self.search.submit() {
                Some(generation) => {
                    let omdb = self.omdb.clone();
                    let query = self.search.query.trim().to_string();
                    Task::perform(run_search(omdb, query), move |outcome| {
                        Message::SearchComplete {
                            generation,
                            outcome,
                        }
                    })
                }
                // Empty query: nothing to do
                None => Task::none(),
            },
            Message::SearchComplete {
                generation,
                outcome,
            } => {
                if self.search.complete(generation, outcome) {
                    self.load_missing_posters()
                } else {
                    Task::none()
                }
            }
            Message::ShowDetails(imdb_id) => {
                let omdb = self.omdb.clone();
                Task::perform(
                    async move { omdb.detail(&imdb_id).await.map_err(|e| e.to_string()) },
                    Message::DetailLoaded,
                )
            }
            Message::DetailLoaded(Ok(detail)) => {
                let task = if detail.has_poster() {
                    self.request_poster(detail.imdb_id.clone(), detail.poster.clone())
                } else {
                    Task::none()
                };
                self.selected = Some(detail);
                task
            }
            Message::DetailLoaded(Err(reason)) => {
                // The previously displayed record (if any) stays up.
                eprintln!("⚠️  Detail request failed: {}", reason);
                self.search.set_error(DETAIL_FAILED_MSG);
                Task::none()
            }
            Message::CloseDetails => {
                self.selected = None;
                Task::none()
            }
            Message::ToggleFavorite(movie) => {
                self.favorites.toggle(&movie);
                Task::none()
            }
            Message::PosterLoaded { imdb_id, path } => {
                self.posters.resolve(&imdb_id, path);
                Task::none()
            }
        }
    }

    /// Kick off poster loads for results that don't have one yet
    fn load_missing_posters(&mut self) -> Task<Message> {
        let pending: Vec<(String, String)> = self
            .search
            .results
            .iter()
            .filter(|movie| movie.has_poster())
            .map(|movie| (movie.imdb_id.clone(), movie.poster.clone()))
            .collect();

        Task::batch(
            pending
                .into_iter()
                .map(|(imdb_id, url)| self.request_poster(imdb_id, url)),
        )
    }

    /// Start one poster download unless it is already loading or done
    fn request_poster(&mut self, imdb_id: String, url: String) -> Task<Message> {
        if !self.posters.begin(&imdb_id) {
            return Task::none();
        }

        let omdb = self.omdb.clone();
        let cache_dir = self.poster_dir.clone();
        let id_for_message = imdb_id.clone();
        Task::perform(
            poster::load_poster(omdb, imdb_id, url, cache_dir),
            move |result| {
                let path = match result {
                    Ok(path) => Some(path),
                    Err(reason) => {
                        eprintln!("⚠️  {}", reason);
                        None
                    }
                };
                Message::PosterLoaded {
                    imdb_id: id_for_message.clone(),
                    path,
                }
            },
        )
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let busy = self.search.busy;

        let search_bar = row![
            text_input("Search for movies...", &self.search.query)
                .on_input(Message::QueryChanged)
                .on_submit(Message::SubmitSearch)
                .padding(10)
                .size(18),
            button(text(if busy { "Searching..." } else { "Search" }))
                .padding(10)
                .on_press_maybe((!busy).then_some(Message::SubmitSearch)),
        ]
        .spacing(12);

        let mut body = Column::new().spacing(24);

        if let Some(message) = &self.search.error {
            body = body.push(error_banner(message));
        }

        body = body.push(ui::grid::movie_grid(
            self.search.results.iter(),
            &self.favorites,
            &self.posters,
            true,
        ));

        if !self.favorites.is_empty() {
            body = body.push(text("Favorites").size(26));
            body = body.push(ui::grid::movie_grid(
                self.favorites.iter(),
                &self.favorites,
                &self.posters,
                false,
            ));
        }

        let content = column![
            container(text("Movie Search").size(40)).center_x(Length::Fill),
            search_bar,
            text(self.status_line()).size(14),
            scrollable(body).height(Length::Fill),
        ]
        .spacing(16)
        .padding(24);

        let base: Element<Message> = container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .into();

        match &self.selected {
            Some(movie) => ui::detail::modal(base, movie, &self.posters),
            None => base,
        }
    }

    /// One-line summary of the current phase
    fn status_line(&self) -> String {
        match self.search.phase() {
            Phase::Idle => String::from("Ready."),
            Phase::Loading => String::from("Searching..."),
            Phase::Results => format!("{} titles found.", self.search.results.len()),
            Phase::EmptyError => String::new(),
        }
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

/// The single visible error string, rendered as a banner
fn error_banner(message: &str) -> Element<Message> {
    container(text(message).size(15).style(|_theme| text::Style {
        color: Some(iced::Color::from_rgb(0.96, 0.44, 0.44)),
    }))
    .padding(12)
    .width(Length::Fill)
    .style(container::rounded_box)
    .into()
}

/// Run one search request and classify the outcome for the UI
async fn run_search(omdb: OmdbClient, query: String) -> SearchOutcome {
    match omdb.search(&query).await {
        Ok(movies) => SearchOutcome::Found(movies),
        Err(FetchError::NoMatches(reason)) => {
            println!("🔍 No matches for \"{}\": {}", query, reason);
            SearchOutcome::NoMatches
        }
        Err(err) => {
            eprintln!("⚠️  Search request failed: {}", err);
            SearchOutcome::Failed
        }
    }
}

fn main() -> iced::Result {
    iced::application("Movie Search", MovieSearch::update, MovieSearch::view)
        .theme(MovieSearch::theme)
        .window_size(iced::Size::new(1100.0, 800.0))
        .centered()
        .run_with(MovieSearch::new)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::poster::PosterState;
    use crate::state::data::NO_POSTER;

    fn test_app() -> MovieSearch {
        let config = Config {
            api_key: "test-key".to_string(),
            base_url: "http://localhost:1/".to_string(),
        };
        let omdb = OmdbClient::new(&config).expect("client should build");

        MovieSearch {
            omdb,
            search: SearchState::new(),
            selected: None,
            favorites: Favorites::new(),
            posters: PosterCache::new(),
            poster_dir: std::env::temp_dir(),
        }
    }

    fn summary(imdb_id: &str, title: &str, year: &str) -> MovieSummary {
        MovieSummary {
            imdb_id: imdb_id.to_string(),
            title: title.to_string(),
            year: year.to_string(),
            poster: NO_POSTER.to_string(),
        }
    }

    fn full_detail(imdb_id: &str) -> MovieDetail {
        MovieDetail {
            imdb_id: imdb_id.to_string(),
            title: "The Matrix Reloaded".to_string(),
            year: "2003".to_string(),
            poster: NO_POSTER.to_string(),
            plot: "Freedom fighters Neo, Trinity and Morpheus continue to lead the revolt."
                .to_string(),
            genre: "Action, Sci-Fi".to_string(),
            director: "Lana Wachowski, Lilly Wachowski".to_string(),
            imdb_rating: "7.2".to_string(),
        }
    }

    #[test]
    fn test_search_to_favorites_to_details_flow() {
        let mut app = test_app();

        let _ = app.update(Message::QueryChanged("Matrix".to_string()));
        let _ = app.update(Message::SubmitSearch);
        assert!(app.search.busy);

        let matrix = summary("tt0133093", "The Matrix", "1999");
        let reloaded = summary("tt0234215", "The Matrix Reloaded", "2003");
        let generation = app.search.generation();
        let _ = app.update(Message::SearchComplete {
            generation,
            outcome: SearchOutcome::Found(vec![matrix.clone(), reloaded.clone()]),
        });

        assert!(!app.search.busy);
        assert_eq!(app.search.results.len(), 2);
        assert_eq!(app.search.phase(), Phase::Results);

        let _ = app.update(Message::ToggleFavorite(matrix.clone()));
        assert!(app.favorites.contains("tt0133093"));

        let _ = app.update(Message::ToggleFavorite(matrix));
        assert!(!app.favorites.contains("tt0133093"));

        let _ = app.update(Message::DetailLoaded(Ok(full_detail("tt0234215"))));
        let shown = app.selected.as_ref().expect("modal should be open");
        assert_eq!(shown.imdb_id, "tt0234215");
        assert_eq!(shown.genre, "Action, Sci-Fi");
        assert_eq!(shown.imdb_rating, "7.2");

        let _ = app.update(Message::CloseDetails);
        assert!(app.selected.is_none());
    }

    #[test]
    fn test_submit_with_blank_query_changes_nothing() {
        let mut app = test_app();
        let _ = app.update(Message::QueryChanged("   ".to_string()));
        let _ = app.update(Message::SubmitSearch);

        assert!(!app.search.busy);
        assert!(app.search.results.is_empty());
        assert_eq!(app.search.error, None);
    }

    #[test]
    fn test_dismissal_then_late_detail_response_still_lands() {
        let mut app = test_app();

        let mut first = full_detail("tt0133093");
        first.title = "The Matrix".to_string();
        let _ = app.update(Message::DetailLoaded(Ok(first)));
        let _ = app.update(Message::CloseDetails);
        assert!(app.selected.is_none());

        // The outstanding fetch resolves after dismissal; last write wins.
        let _ = app.update(Message::DetailLoaded(Ok(full_detail("tt0234215"))));
        assert_eq!(
            app.selected.as_ref().map(|d| d.imdb_id.as_str()),
            Some("tt0234215")
        );
    }

    #[test]
    fn test_detail_failure_keeps_previous_record() {
        let mut app = test_app();
        let _ = app.update(Message::DetailLoaded(Ok(full_detail("tt0133093"))));

        let _ = app.update(Message::DetailLoaded(Err("connection reset".to_string())));

        assert_eq!(
            app.selected.as_ref().map(|d| d.imdb_id.as_str()),
            Some("tt0133093")
        );
        assert_eq!(app.search.error.as_deref(), Some(DETAIL_FAILED_MSG));
    }

    #[test]
    fn test_search_completion_starts_poster_loads() {
        let mut app = test_app();
        let _ = app.update(Message::QueryChanged("matrix".to_string()));
        let _ = app.update(Message::SubmitSearch);
        let generation = app.search.generation();

        let mut movie = summary("tt0133093", "The Matrix", "1999");
        movie.poster = "https://example.com/matrix.jpg".to_string();
        let _ = app.update(Message::SearchComplete {
            generation,
            outcome: SearchOutcome::Found(vec![movie]),
        });

        assert!(matches!(
            app.posters.state("tt0133093"),
            Some(PosterState::Loading)
        ));

        let _ = app.update(Message::PosterLoaded {
            imdb_id: "tt0133093".to_string(),
            path: None,
        });
        assert!(matches!(
            app.posters.state("tt0133093"),
            Some(PosterState::Unavailable)
        ));
    }

    #[test]
    fn test_stale_search_completion_is_ignored_at_message_level() {
        let mut app = test_app();
        let _ = app.update(Message::QueryChanged("matrix".to_string()));
        let _ = app.update(Message::SubmitSearch);
        let first = app.search.generation();

        let _ = app.update(Message::SubmitSearch);

        let _ = app.update(Message::SearchComplete {
            generation: first,
            outcome: SearchOutcome::Found(vec![summary("tt0133093", "The Matrix", "1999")]),
        });

        // The superseded completion neither fills the list nor clears busy.
        assert!(app.search.busy);
        assert!(app.search.results.is_empty());
    }
}
