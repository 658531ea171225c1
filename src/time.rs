use std::sync::RwLock;

use chrono::{DateTime, Duration, TimeZone, Utc};

/// Clock abstracts access to the current timestamp so ledgers and reports remain
/// deterministic in tests.
pub trait Clock: Send + Sync {
    /// Returns the current UTC timestamp.
    fn now(&self) -> DateTime<Utc>;
}

/// Real-time clock backed by the system UTC time source.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock pinned to an instant that only moves when a test advances it.
#[derive(Debug)]
pub struct FixedClock {
    instant: RwLock<DateTime<Utc>>,
}

impl FixedClock {
    pub fn new(instant: DateTime<Utc>) -> Self {
        Self {
            instant: RwLock::new(instant),
        }
    }

    /// Builds a clock from a unix timestamp, falling back to the epoch when out of range.
    pub fn at_unix(seconds: i64) -> Self {
        let instant = Utc
            .timestamp_opt(seconds, 0)
            .single()
            .unwrap_or(DateTime::<Utc>::UNIX_EPOCH);
        Self::new(instant)
    }

    pub fn advance(&self, by: Duration) {
        if let Ok(mut guard) = self.instant.write() {
            *guard += by;
        }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.instant
            .read()
            .map(|guard| *guard)
            .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
    }
}

/// Drops sub-second precision; stored timestamps are whole seconds.
pub(crate) fn truncate_to_seconds(instant: DateTime<Utc>) -> DateTime<Utc> {
    Utc.timestamp_opt(instant.timestamp(), 0)
        .single()
        .unwrap_or(instant)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_clock_advances() {
        let clock = FixedClock::at_unix(1_700_000_000);
        clock.advance(Duration::days(2));
        assert_eq!(clock.now().timestamp(), 1_700_000_000 + 2 * 86_400);
    }

    #[test]
    fn truncation_drops_nanoseconds() {
        let instant = Utc.timestamp_opt(42, 999_000_000).unwrap();
        assert_eq!(truncate_to_seconds(instant).timestamp_subsec_nanos(), 0);
        assert_eq!(truncate_to_seconds(instant).timestamp(), 42);
    }
}
