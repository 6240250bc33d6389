use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

const MS_PER_DAY: u64 = 86_400_000;

/// Wall-clock instant in milliseconds since the UNIX epoch.
///
/// Serialized as a bare number so it matches `Date.now()` values written by
/// the browser board.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(u64);

impl Timestamp {
    /// Create a timestamp from raw milliseconds.
    pub const fn from_millis(ms: u64) -> Self {
        Self(ms)
    }

    /// The current wall-clock time.
    pub fn now() -> Self {
        let ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64;
        Self(ms)
    }

    /// Raw milliseconds since the epoch.
    pub const fn as_millis(&self) -> u64 {
        self.0
    }

    /// This timestamp moved `days` whole days into the past, clamped at the epoch.
    pub fn days_before(&self, days: u64) -> Self {
        Self(self.0.saturating_sub(days.saturating_mul(MS_PER_DAY)))
    }
}

impl fmt::Debug for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Timestamp({}ms)", self.0)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
