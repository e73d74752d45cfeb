use std::time::Instant;

use serde::Serialize;

use crate::bookmarks::{BookmarkError, BookmarkOrder, BookmarkStore, Toggle};
use crate::error::Result;
use crate::models::RepositorySummary;
use crate::search::{Completion, SearchController, SearchStatus, SearchTicket};

/// One row handed to the rendering surface
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayedRepo {
    #[serde(flatten)]
    pub summary: RepositorySummary,
    pub is_bookmarked: bool,
}

/// Glue between the search session and the bookmark set
///
/// Owns both components and the display-mode flag. Switching the display mode
/// only changes what [`displayed`](Self::displayed) returns.
pub struct Bookmarker {
    search: SearchController,
    bookmarks: BookmarkStore,
    show_bookmarks_only: bool,
}

impl Bookmarker {
    pub fn new(search: SearchController, bookmarks: BookmarkStore) -> Self {
        Self {
            search,
            bookmarks,
            show_bookmarks_only: false,
        }
    }

    pub fn search(&self) -> &SearchController {
        &self.search
    }

    pub fn bookmarks(&self) -> &BookmarkStore {
        &self.bookmarks
    }

    pub fn show_bookmarks_only(&self) -> bool {
        self.show_bookmarks_only
    }

    pub fn set_show_bookmarks_only(&mut self, value: bool) {
        self.show_bookmarks_only = value;
    }

    /// Flip the display mode, returning the new value
    pub fn toggle_display_mode(&mut self) -> bool {
        self.show_bookmarks_only = !self.show_bookmarks_only;
        self.show_bookmarks_only
    }

    pub fn set_query(&mut self, text: &str, now: Instant) {
        self.search.set_query(text, now);
    }

    pub fn poll(&mut self, now: Instant) -> Option<SearchTicket> {
        self.search.poll(now)
    }

    pub fn flush(&mut self) -> Option<SearchTicket> {
        self.search.flush()
    }

    pub fn complete(&mut self, seq: u64, outcome: Result<Vec<RepositorySummary>>) -> Completion {
        self.search.complete(seq, outcome)
    }

    pub fn toggle(&mut self, repo: &RepositorySummary) -> std::result::Result<Toggle, BookmarkError> {
        self.bookmarks.toggle(repo)
    }

    /// Current list for the rendering surface
    pub fn displayed(&self) -> Vec<DisplayedRepo> {
        let items = if self.show_bookmarks_only {
            self.bookmarks.list(BookmarkOrder::StarsDescending)
        } else {
            self.search.results().to_vec()
        };

        items
            .into_iter()
            .map(|summary| DisplayedRepo {
                is_bookmarked: self.bookmarks.is_bookmarked(summary.id),
                summary,
            })
            .collect()
    }

    /// Status line such as "Loading repositories...", if one applies
    pub fn status_message(&self) -> Option<String> {
        match self.search.status() {
            SearchStatus::Pending => Some("Loading repositories...".to_string()),
            SearchStatus::Failed => self.search.error().map(str::to_string),
            SearchStatus::Idle | SearchStatus::Succeeded => {
                if self.displayed().is_empty() {
                    Some("No repositories found.".to_string())
                } else {
                    None
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RepomarkError;
    use crate::models::fixtures::repo;
    use crate::search::DEFAULT_DEBOUNCE;
    use crate::storage::MemoryStore;

    fn bookmarker() -> Bookmarker {
        Bookmarker::new(
            SearchController::default(),
            BookmarkStore::open(Box::new(MemoryStore::new())),
        )
    }

    fn search(app: &mut Bookmarker, query: &str, items: Vec<RepositorySummary>) {
        let now = Instant::now();
        app.set_query(query, now);
        let ticket = app.poll(now + DEFAULT_DEBOUNCE).unwrap();
        assert_eq!(app.complete(ticket.seq, Ok(items)), Completion::Applied);
    }

    #[test]
    fn test_scenario_c_bookmarks_only_shows_snapshot() {
        let mut app = bookmarker();
        search(&mut app, "answer", vec![repo(42, "answer", 42), repo(43, "other", 1)]);

        let target = app.search().results()[0].clone();
        app.toggle(&target).unwrap();
        app.set_show_bookmarks_only(true);

        let displayed = app.displayed();
        assert_eq!(displayed.len(), 1);
        assert_eq!(displayed[0].summary, target);
        assert!(displayed[0].is_bookmarked);
    }

    #[test]
    fn test_snapshot_survives_result_replacement() {
        let mut app = bookmarker();
        search(&mut app, "a", vec![repo(1, "a", 1)]);
        let first = app.search().results()[0].clone();
        app.toggle(&first).unwrap();

        search(&mut app, "b", vec![repo(2, "b", 2)]);
        app.set_show_bookmarks_only(true);

        assert_eq!(app.displayed()[0].summary, first);
    }

    #[test]
    fn test_display_mode_switch_is_lossless() {
        let mut app = bookmarker();
        search(&mut app, "x", vec![repo(1, "x", 1), repo(2, "y", 2)]);
        app.toggle(&repo(2, "y", 2)).unwrap();
        let results_before = app.displayed();

        assert!(app.toggle_display_mode());
        assert!(!app.toggle_display_mode());
        assert!(app.toggle_display_mode());
        assert!(!app.toggle_display_mode());

        assert_eq!(app.displayed(), results_before);
        assert_eq!(app.bookmarks().len(), 1);
        assert_eq!(app.search().status(), SearchStatus::Succeeded);
    }

    #[test]
    fn test_results_mark_bookmarked_rows() {
        let mut app = bookmarker();
        search(&mut app, "x", vec![repo(1, "x", 1), repo(2, "y", 2)]);
        app.toggle(&repo(1, "x", 1)).unwrap();

        let flags: Vec<bool> = app.displayed().iter().map(|d| d.is_bookmarked).collect();
        assert_eq!(flags, vec![true, false]);
    }

    #[test]
    fn test_bookmarks_view_sorted_by_stars() {
        let mut app = bookmarker();
        app.toggle(&repo(1, "small", 3)).unwrap();
        app.toggle(&repo(2, "big", 300)).unwrap();
        app.set_show_bookmarks_only(true);

        let ids: Vec<u64> = app.displayed().iter().map(|d| d.summary.id).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn test_status_messages() {
        let mut app = bookmarker();
        assert_eq!(
            app.status_message().as_deref(),
            Some("No repositories found.")
        );

        let now = Instant::now();
        app.set_query("x", now);
        let ticket = app.flush().unwrap();
        assert_eq!(
            app.status_message().as_deref(),
            Some("Loading repositories...")
        );

        app.complete(ticket.seq, Err(RepomarkError::Http("down".to_string())));
        assert_eq!(
            app.status_message().as_deref(),
            Some("Failed to fetch repositories. Try again.")
        );

        app.set_query("xy", now);
        let ticket = app.flush().unwrap();
        app.complete(ticket.seq, Ok(vec![repo(1, "x", 1)]));
        assert_eq!(app.status_message(), None);
    }
}
