//! Debounced search session with a stale-response guard.
//!
//! [`SearchController`] does not perform I/O. When the debounce timer fires it
//! hands out a [`SearchTicket`]; the host runs the ticket against a
//! [`RepositorySearch`](crate::RepositorySearch) however it likes (inline, on a
//! worker thread) and reports the outcome back through
//! [`SearchController::complete`]. Outcomes for anything but the latest ticket
//! are dropped.

use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::{debug, warn};

use crate::debounce::DebounceTimer;
use crate::error::Result;
use crate::models::RepositorySummary;

/// Quiet period between the last keystroke and the outbound request
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(400);

/// Message shown when a search could not be completed
pub const SEARCH_FAILED_MESSAGE: &str = "Failed to fetch repositories. Try again.";

/// Lifecycle of the current search session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchStatus {
    Idle,
    Pending,
    Succeeded,
    Failed,
}

/// A request the host must dispatch on behalf of the controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    /// Monotonically increasing sequence number
    pub seq: u64,
    /// Query text exactly as it was typed
    pub query: String,
}

/// What happened to an outcome handed to [`SearchController::complete`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The outcome belonged to the latest request and updated the session
    Applied,
    /// The outcome was superseded by a newer request (or a cleared query) and was dropped
    Stale,
}

/// Owns the query, the debounce timer and the result list
#[derive(Debug)]
pub struct SearchController {
    query: String,
    timer: DebounceTimer,
    status: SearchStatus,
    results: Vec<RepositorySummary>,
    error: Option<String>,
    last_issued: u64,
    in_flight: Option<u64>,
}

impl Default for SearchController {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

impl SearchController {
    pub fn new(delay: Duration) -> Self {
        Self {
            query: String::new(),
            timer: DebounceTimer::new(delay),
            status: SearchStatus::Idle,
            results: Vec::new(),
            error: None,
            last_issued: 0,
            in_flight: None,
        }
    }

    /// Record a new query value
    ///
    /// Non-empty queries (re)start the debounce timer. A query that is empty
    /// after trimming clears the results right away and neutralizes any
    /// request still in flight.
    pub fn set_query(&mut self, text: &str, now: Instant) {
        if text == self.query {
            return;
        }
        self.query = text.to_string();

        if self.query.trim().is_empty() {
            self.timer.cancel();
            self.results.clear();
            self.error = None;
            self.status = SearchStatus::Idle;
            self.in_flight = None;
            return;
        }

        self.timer.schedule(now);
    }

    /// Issue a ticket if the debounce timer has elapsed
    pub fn poll(&mut self, now: Instant) -> Option<SearchTicket> {
        if self.timer.fire_if_due(now) {
            self.issue()
        } else {
            None
        }
    }

    /// Fire a pending debounce timer immediately
    pub fn flush(&mut self) -> Option<SearchTicket> {
        if self.timer.fire_now() {
            self.issue()
        } else {
            None
        }
    }

    fn issue(&mut self) -> Option<SearchTicket> {
        if self.query.trim().is_empty() {
            return None;
        }

        self.last_issued += 1;
        let seq = self.last_issued;
        self.in_flight = Some(seq);
        self.status = SearchStatus::Pending;
        self.error = None;

        debug!(seq, query = %self.query, "Issuing repository search");

        Some(SearchTicket {
            seq,
            query: self.query.clone(),
        })
    }

    /// Hand back the outcome of a dispatched ticket
    ///
    /// Successful outcomes replace the results wholesale. Failures keep the
    /// previous results and record a message. Outcomes for superseded tickets
    /// change nothing.
    pub fn complete(&mut self, seq: u64, outcome: Result<Vec<RepositorySummary>>) -> Completion {
        if self.in_flight != Some(seq) {
            debug!(seq, latest = self.last_issued, "Dropping stale search response");
            return Completion::Stale;
        }
        self.in_flight = None;

        match outcome {
            Ok(items) => {
                debug!(seq, count = items.len(), "Search succeeded");
                self.results = items;
                self.error = None;
                self.status = SearchStatus::Succeeded;
            }
            Err(e) => {
                warn!(seq, error = %e, "Search failed");
                self.error = Some(SEARCH_FAILED_MESSAGE.to_string());
                self.status = SearchStatus::Failed;
            }
        }

        Completion::Applied
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn status(&self) -> SearchStatus {
        self.status
    }

    pub fn results(&self) -> &[RepositorySummary] {
        &self.results
    }

    /// Error message, present iff the status is `Failed`
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Deadline of the pending debounce timer, if any
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timer.deadline()
    }

    /// How long an event loop may wait before it has to call [`poll`](Self::poll)
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.timer.remaining(now)
    }

    /// Sequence number of the request whose outcome is still awaited
    pub fn in_flight(&self) -> Option<u64> {
        self.in_flight
    }

    pub fn debounce(&self) -> Duration {
        self.timer.delay()
    }
}
