//! Numeric identifiers for lists and tasks
//!
//! IDs are plain integers on the wire (`{"id": 1712345678901}`) so documents
//! written by earlier versions of the board keep loading.
//!
//! New IDs come from [`IdGenerator`], a strictly monotonic counter seeded from
//! the wall clock once per session. Two IDs requested in the same millisecond
//! still differ.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IdError {
    #[error("Invalid list ID: expected a non-negative integer, got '{0}'")]
    InvalidListId(String),

    #[error("Invalid task ID: expected a non-negative integer, got '{0}'")]
    InvalidTaskId(String),

    #[error("No IDs left after {0}")]
    Exhausted(u64),
}

/// Identifier of a list (a board column)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ListId(u64);

impl ListId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw integer value
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ListId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ListId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(Self)
            .map_err(|_| IdError::InvalidListId(s.to_string()))
    }
}

/// Identifier of a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(u64);

impl TaskId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw integer value
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TaskId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(Self)
            .map_err(|_| IdError::InvalidTaskId(s.to_string()))
    }
}

/// Session-wide source of fresh list and task IDs
///
/// Lists and tasks draw from the same sequence, so task IDs are unique across
/// the whole board and not just within their list.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    last: u64,
}

impl IdGenerator {
    /// Seeds the generator from the current wall-clock time in milliseconds
    pub fn from_clock() -> Self {
        let millis = u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0);
        Self::starting_at(millis)
    }

    /// Creates a generator whose first ID is `first`
    pub fn starting_at(first: u64) -> Self {
        Self {
            last: first.saturating_sub(1),
        }
    }

    /// Ensures every later ID is strictly greater than `seen`
    pub fn observe(&mut self, seen: u64) {
        self.last = self.last.max(seen);
    }

    /// Returns the next ID, strictly greater than every ID returned or observed so far
    ///
    /// Fails once `u64::MAX` has been handed out or observed.
    pub fn next_raw(&mut self) -> Result<u64, IdError> {
        self.last = self
            .last
            .checked_add(1)
            .ok_or(IdError::Exhausted(self.last))?;
        Ok(self.last)
    }

    pub fn next_list_id(&mut self) -> Result<ListId, IdError> {
        self.next_raw().map(ListId)
    }

    pub fn next_task_id(&mut self) -> Result<TaskId, IdError> {
        self.next_raw().map(TaskId)
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::from_clock()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_id_roundtrip() {
        let id: ListId = "42".parse().unwrap();
        assert_eq!(id, ListId::new(42));
        assert_eq!(id.to_string(), "42");
    }

    #[test]
    fn task_id_trims_whitespace() {
        let id: TaskId = " 7 ".parse().unwrap();
        assert_eq!(id.get(), 7);
    }

    #[test]
    fn invalid_ids() {
        assert!("".parse::<ListId>().is_err());
        assert!("abc".parse::<ListId>().is_err());
        assert!("-1".parse::<TaskId>().is_err());
        assert_eq!(
            "x1".parse::<TaskId>(),
            Err(IdError::InvalidTaskId("x1".to_string()))
        );
    }

    #[test]
    fn serializes_as_plain_integer() {
        let json = serde_json::to_string(&TaskId::new(1234)).unwrap();
        assert_eq!(json, "1234");

        let id: ListId = serde_json::from_str("99").unwrap();
        assert_eq!(id.get(), 99);
    }

    #[test]
    fn generator_is_strictly_monotonic() {
        let mut ids = IdGenerator::starting_at(10);
        let a = ids.next_raw().unwrap();
        let b = ids.next_raw().unwrap();
        let c = ids.next_raw().unwrap();
        assert_eq!((a, b, c), (10, 11, 12));
    }

    #[test]
    fn generator_skips_observed_ids() {
        let mut ids = IdGenerator::starting_at(5);
        ids.observe(100);
        assert_eq!(ids.next_task_id(), Ok(TaskId::new(101)));

        // Observing a smaller ID never moves the counter backwards
        ids.observe(3);
        assert_eq!(ids.next_list_id(), Ok(ListId::new(102)));
    }

    #[test]
    fn clock_seeded_generator_never_repeats() {
        let mut ids = IdGenerator::from_clock();
        let first = ids.next_raw().unwrap();
        let second = ids.next_raw().unwrap();
        assert!(second > first);
    }

    #[test]
    fn generator_stops_at_the_top_of_the_range() {
        let mut ids = IdGenerator::starting_at(u64::MAX - 1);
        assert_eq!(ids.next_raw(), Ok(u64::MAX - 1));
        assert_eq!(ids.next_raw(), Ok(u64::MAX));
        assert_eq!(ids.next_raw(), Err(IdError::Exhausted(u64::MAX)));
        assert_eq!(ids.next_task_id(), Err(IdError::Exhausted(u64::MAX)));

        let mut observed = IdGenerator::starting_at(1);
        observed.observe(u64::MAX);
        assert!(observed.next_list_id().is_err());
    }
}
