//! UTC instants stamped on carts, orders and products.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// A UTC instant, serialized as RFC 3339.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    pub fn now() -> Self {
        Self(Utc::now())
    }

    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    pub fn is_before(&self, other: &Timestamp) -> bool {
        self < other
    }

    /// Shifts by `secs`; negative values go back in time.
    pub fn plus_secs(&self, secs: i64) -> Self {
        Self(self.0 + Duration::seconds(secs))
    }

    /// Next `updated_at` after a mutation observed at `now`.
    ///
    /// Always strictly later than `self`, even when the clock has not moved
    /// or has stepped backwards.
    pub fn advance_from(&self, now: Timestamp) -> Self {
        let floor = Self(self.0 + Duration::microseconds(1));
        now.max(floor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64) -> Timestamp {
        Timestamp::from_datetime(Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap())
    }

    #[test]
    fn serializes_as_rfc3339_string() {
        let json = serde_json::to_string(&at(0)).unwrap();
        assert_eq!(json, "\"2023-11-14T22:13:20Z\"");

        let back: Timestamp = serde_json::from_str(&json).unwrap();
        assert_eq!(back, at(0));
    }

    #[test]
    fn advance_takes_the_later_clock_reading() {
        assert_eq!(at(0).advance_from(at(5)), at(5));
    }

    #[test]
    fn advance_never_stalls_or_rewinds() {
        let ts = at(0);
        assert!(ts.is_before(&ts.advance_from(ts)));
        assert!(ts.is_before(&ts.advance_from(at(-10))));
    }

    #[test]
    fn plus_secs_moves_both_ways() {
        assert_eq!(at(0).plus_secs(30), at(30));
        assert_eq!(at(0).plus_secs(-30), at(-30));
    }
}
