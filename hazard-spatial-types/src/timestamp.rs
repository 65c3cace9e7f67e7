//! Edit timestamps.
//!
//! The display's selected time is a wall-clock instant in milliseconds. Two
//! edits can land on the same millisecond, so a sequence number orders them:
//! - Ordering is by wall time, then sequence
//! - `next()` always yields a strictly greater timestamp

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// Selected time attached to a geometry edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EditTimestamp {
    /// Milliseconds since Unix epoch. Negative before the epoch.
    wall_time_ms: i64,
    /// Orders edits sharing a wall time.
    sequence: u32,
}

impl EditTimestamp {
    /// Greatest representable timestamp.
    pub const MAX: EditTimestamp = EditTimestamp::new(i64::MAX, u32::MAX);

    /// Creates a timestamp at the current time.
    #[must_use]
    pub fn now() -> Self {
        Self::from_millis(current_millis())
    }

    /// Creates a timestamp at the given wall time with sequence zero.
    #[must_use]
    pub const fn from_millis(wall_time_ms: i64) -> Self {
        Self { wall_time_ms, sequence: 0 }
    }

    /// Creates a timestamp from components.
    #[must_use]
    pub const fn new(wall_time_ms: i64, sequence: u32) -> Self {
        Self { wall_time_ms, sequence }
    }

    /// Returns the wall time component (milliseconds since Unix epoch).
    #[must_use]
    pub const fn wall_time_ms(&self) -> i64 {
        self.wall_time_ms
    }

    /// Returns the sequence number within the wall time.
    #[must_use]
    pub const fn sequence(&self) -> u32 {
        self.sequence
    }

    /// Returns the next timestamp for a local edit.
    ///
    /// Moves to the current wall time when the clock has advanced, otherwise
    /// bumps the sequence. When the sequence is exhausted the wall time is
    /// advanced by one millisecond instead.
    ///
    /// [`EditTimestamp::MAX`] is a ceiling: its successor is itself.
    #[must_use]
    pub fn next(&self) -> Self {
        let now = current_millis();
        if now > self.wall_time_ms {
            return Self::from_millis(now);
        }
        if let Some(sequence) = self.sequence.checked_add(1) {
            return Self { wall_time_ms: self.wall_time_ms, sequence };
        }
        match self.wall_time_ms.checked_add(1) {
            Some(wall_time_ms) => Self::from_millis(wall_time_ms),
            None => *self,
        }
    }

    /// Returns true if this timestamp orders before the other.
    #[must_use]
    pub fn is_before(&self, other: &Self) -> bool {
        self < other
    }

    /// Returns true if this timestamp orders after the other.
    #[must_use]
    pub fn is_after(&self, other: &Self) -> bool {
        self > other
    }
}

fn current_millis() -> i64 {
    match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(since) => i64::try_from(since.as_millis()).unwrap_or(i64::MAX),
        Err(before) => i64::try_from(before.duration().as_millis()).map_or(i64::MIN, |ms| -ms),
    }
}

impl Default for EditTimestamp {
    fn default() -> Self {
        Self::now()
    }
}

impl PartialOrd for EditTimestamp {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for EditTimestamp {
    fn cmp(&self, other: &Self) -> Ordering {
        self.wall_time_ms
            .cmp(&other.wall_time_ms)
            .then(self.sequence.cmp(&other.sequence))
    }
}

impl fmt::Display for EditTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.wall_time_ms, self.sequence)
    }
}
