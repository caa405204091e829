//! Debounced search controller.
//!
//! Converts a rapidly-changing query string into at most one in-flight
//! request per provider. This is a debounce, not a throttle: a keystroke
//! inside the quiet window discards the pending deadline outright, so a
//! superseded query never issues a request at all. Responses carry the
//! sequence number of the request that produced them; a response whose
//! sequence is no longer current is discarded, so the displayed results
//! always reflect the latest query.
//!
//! The controller is a pure state machine driven by explicit `Instant`s;
//! the caller owns the clock, which keeps every transition testable
//! without real timers.

use std::time::{Duration, Instant};

/// Lifecycle phase of the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchPhase {
    /// No query, or query below the minimum length.
    #[default]
    Idle,
    /// A deadline is armed; no request issued yet.
    Pending,
    /// Exactly one request is in flight.
    InFlight,
    /// Results for the current query are displayed.
    Settled,
}

/// A request the caller should issue, tagged for stale-response detection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    /// Sequence number to echo back into [`DebounceController::accept`].
    pub seq: u64,
    /// The query to send.
    pub query: String,
}

/// Debounce state machine for one search provider.
#[derive(Debug)]
pub struct DebounceController<T> {
    window: Duration,
    min_len: usize,
    query: String,
    phase: SearchPhase,
    deadline: Option<Instant>,
    seq: u64,
    in_flight: Option<u64>,
    results: Vec<T>,
}

impl<T> DebounceController<T> {
    /// Create a controller with a quiet window and minimum query length.
    pub fn new(window: Duration, min_len: usize) -> Self {
        Self {
            window,
            min_len,
            query: String::new(),
            phase: SearchPhase::Idle,
            deadline: None,
            seq: 0,
            in_flight: None,
            results: Vec::new(),
        }
    }

    /// The current query string.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// The current phase.
    pub fn phase(&self) -> SearchPhase {
        self.phase
    }

    /// Results for the current query.
    pub fn results(&self) -> &[T] {
        &self.results
    }

    /// Record a keystroke. Cancels any pending deadline; below the minimum
    /// length the controller goes straight to idle with empty results.
    pub fn on_input(&mut self, query: impl Into<String>, now: Instant) {
        self.query = query.into();
        self.deadline = None;
        // Orphan any in-flight request so its response is discarded.
        self.in_flight = None;

        if self.query.chars().count() < self.min_len {
            self.phase = SearchPhase::Idle;
            self.results.clear();
            return;
        }

        self.deadline = Some(now + self.window);
        self.phase = SearchPhase::Pending;
    }

    /// Fire the armed deadline if it has passed. Returns the single request
    /// to issue; at most one per armed deadline.
    pub fn poll_fire(&mut self, now: Instant) -> Option<SearchRequest> {
        let deadline = self.deadline?;
        if now < deadline {
            return None;
        }
        self.deadline = None;
        self.seq += 1;
        self.in_flight = Some(self.seq);
        self.phase = SearchPhase::InFlight;
        Some(SearchRequest {
            seq: self.seq,
            query: self.query.clone(),
        })
    }

    /// Apply a response. Returns false (and changes nothing) when the
    /// response does not belong to the current in-flight request.
    pub fn accept(&mut self, seq: u64, results: Vec<T>) -> bool {
        if self.in_flight != Some(seq) {
            return false;
        }
        self.in_flight = None;
        self.results = results;
        self.phase = SearchPhase::Settled;
        true
    }

    /// Record a failed request. Stale failures are ignored; a current
    /// failure just returns the controller to idle with nothing shown.
    pub fn fail(&mut self, seq: u64) {
        if self.in_flight == Some(seq) {
            self.in_flight = None;
            self.results.clear();
            self.phase = SearchPhase::Idle;
        }
    }

    /// Reset to idle, clearing query and results synchronously. Used when a
    /// result is selected or the search is dismissed.
    pub fn clear(&mut self) {
        self.query.clear();
        self.results.clear();
        self.deadline = None;
        self.in_flight = None;
        self.phase = SearchPhase::Idle;
    }
}
