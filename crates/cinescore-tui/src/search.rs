//! Debounced search input.
//!
//! Each edit re-arms a deadline; the owner polls with the current instant
//! and issues at most one request per burst of typing.

use std::time::{Duration, Instant};

/// Default quiet period before a search fires.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Queries shorter than this clear the results instead of searching.
pub const MIN_QUERY_CHARS: usize = 2;

/// Outcome of [`SearchBox::poll`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchPoll {
    /// Nothing to do yet.
    Idle,
    /// The text settled below the minimum length: drop any results.
    Clear,
    /// The text settled: search for this query.
    Fire(String),
}

/// Text input with a debounce deadline.
#[derive(Debug, Clone)]
pub struct SearchBox {
    text: String,
    delay: Duration,
    deadline: Option<Instant>,
}

impl Default for SearchBox {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

impl SearchBox {
    /// Creates an empty box with the given debounce delay.
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self {
            text: String::new(),
            delay,
            deadline: None,
        }
    }

    /// Current text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether a poll is pending.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Appends a character.
    pub fn push(&mut self, ch: char, now: Instant) {
        self.text.push(ch);
        self.arm(now);
    }

    /// Removes the last character.
    pub fn pop(&mut self, now: Instant) {
        self.text.pop();
        self.arm(now);
    }

    /// Replaces the whole text.
    pub fn set(&mut self, text: impl Into<String>, now: Instant) {
        self.text = text.into();
        self.arm(now);
    }

    /// Empties the text.
    pub fn clear(&mut self, now: Instant) {
        self.text.clear();
        self.arm(now);
    }

    fn arm(&mut self, now: Instant) {
        self.deadline = now.checked_add(self.delay).or(Some(now));
    }

    /// Reports whether the debounce period has elapsed since the last edit.
    pub fn poll(&mut self, now: Instant) -> SearchPoll {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                if self.text.chars().count() < MIN_QUERY_CHARS {
                    SearchPoll::Clear
                } else {
                    SearchPoll::Fire(self.text.clone())
                }
            }
            _ => SearchPoll::Idle,
        }
    }
}
