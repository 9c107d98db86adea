/// Search state machine
///
/// Owns everything the query controller mutates: the input text, the
/// result list, the busy flag, the single visible error string, and
/// the request generation counter used to discard stale completions.

use super::data::MovieSummary;

/// Message shown when the API reports zero matches
pub const NO_MATCHES_MSG: &str = "No movies found. Please try a different search.";

/// Message shown when the search request itself fails
pub const SEARCH_FAILED_MSG: &str = "An error occurred while searching for movies.";

/// Message shown when a detail lookup fails
pub const DETAIL_FAILED_MSG: &str = "Error fetching movie details.";

/// Rendering phase derived from the controller state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No results, no error, nothing outstanding
    Idle,
    /// A search request is outstanding
    Loading,
    /// A non-empty result list is on screen
    Results,
    /// An error is on screen and the list is empty
    EmptyError,
}

/// Outcome of one search request, already classified for the UI
#[derive(Debug, Clone)]
pub enum SearchOutcome {
    /// Positive response, entries in the order the API sent them
    Found(Vec<MovieSummary>),
    /// Negative response: the API matched nothing
    NoMatches,
    /// Transport or decode failure
    Failed,
}

/// Query controller state
#[derive(Debug, Clone, Default)]
pub struct SearchState {
    /// Current contents of the search box
    pub query: String,
    /// Result list from the most recent completed search
    pub results: Vec<MovieSummary>,
    /// The single visible error string (search and detail share it)
    pub error: Option<String>,
    /// True while a search request is outstanding
    pub busy: bool,
    /// Token of the most recent submission; completions carrying an
    /// older token are discarded
    generation: u64,
}

impl SearchState {
    /// Create an idle controller with an empty query
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a search for the current query.
    ///
    /// Returns the generation token for the new request, or `None` if
    /// the trimmed query is empty, in which case nothing changes.
    pub fn submit(&mut self) -> Option<u64> {
        if self.query.trim().is_empty() {
            return None;
        }

        self.generation += 1;
        self.busy = true;
        self.error = None;
        Some(self.generation)
    }

    /// Apply a completed search.
    ///
    /// A completion whose generation is not current belongs to a
    /// superseded request; it is ignored and `false` is returned.
    /// Otherwise the busy flag clears regardless of the outcome.
    pub fn complete(&mut self, generation: u64, outcome: SearchOutcome) -> bool {
        if generation != self.generation {
            return false;
        }

        self.busy = false;
        match outcome {
            SearchOutcome::Found(movies) => {
                self.results = movies;
                self.error = None;
            }
            SearchOutcome::NoMatches => {
                self.results.clear();
                self.error = Some(NO_MATCHES_MSG.to_string());
            }
            SearchOutcome::Failed => {
                self.results.clear();
                self.error = Some(SEARCH_FAILED_MSG.to_string());
            }
        }
        true
    }

    /// Overwrite the visible error string (detail failures land here too)
    pub fn set_error(&mut self, message: &str) {
        self.error = Some(message.to_string());
    }

    /// Token of the most recent submission
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Current rendering phase
    pub fn phase(&self) -> Phase {
        if self.busy {
            Phase::Loading
        } else if !self.results.is_empty() {
            Phase::Results
        } else if self.error.is_some() {
            Phase::EmptyError
        } else {
            Phase::Idle
        }
    }
}
