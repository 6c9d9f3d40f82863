//! Validated snapshot timestamp.
//!
//! [`LogTimestamp`] wraps a [`chrono::NaiveDateTime`] and enforces the
//! canonical `YYYY-MM-DD HH:MM:SS` wire format on both parse and display.
//! No timezone is assumed; robots report wall-clock time as-is.

use std::fmt;

use chrono::NaiveDateTime;

/// Wire format for snapshot timestamps.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Canonical form is exactly 19 characters (`2025-03-27 13:22:00`).
const CANONICAL_LEN: usize = 19;

/// A snapshot timestamp in canonical `YYYY-MM-DD HH:MM:SS` form.
///
/// The newtype guarantees every value round-trips through the exact wire
/// format, so timestamps stored as text compare chronologically under
/// plain lexicographic ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LogTimestamp(NaiveDateTime);

impl LogTimestamp {
    /// Parses a timestamp from the exact `YYYY-MM-DD HH:MM:SS` format.
    ///
    /// Returns `None` for any other shape, including unpadded fields and
    /// trailing garbage.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.len() != CANONICAL_LEN {
            return None;
        }
        NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT)
            .ok()
            .map(Self)
    }

    /// Returns the inner [`NaiveDateTime`].
    #[must_use]
    pub const fn as_naive(&self) -> NaiveDateTime {
        self.0
    }
}

impl fmt::Display for LogTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(TIMESTAMP_FORMAT))
    }
}

impl From<NaiveDateTime> for LogTimestamp {
    fn from(value: NaiveDateTime) -> Self {
        Self(value)
    }
}
