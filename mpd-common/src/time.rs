//! Timestamp utilities

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};

/// Get current UTC timestamp, truncated to the stored precision
///
/// A freshly created record and its stored copy must compare equal.
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// Format a timestamp for storage
///
/// Fixed-width microsecond RFC 3339 so that text ordering in SQLite matches
/// chronological ordering.
pub fn to_storage(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Parse a stored timestamp
pub fn from_storage(s: &str) -> crate::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| crate::Error::Internal(format!("Failed to parse timestamp '{}': {}", s, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_now_returns_valid_timestamp() {
        let timestamp = now();
        // After 2000-01-01 00:00:00 UTC
        assert!(timestamp.timestamp() > 946_684_800);
    }

    #[test]
    fn test_now_survives_storage_round_trip() {
        let ts = now();
        assert_eq!(from_storage(&to_storage(&ts)).unwrap(), ts);
    }

    #[tokio::test]
    async fn test_now_successive_calls_advance() {
        let time1 = now();
        tokio::time::sleep(Duration::from_millis(10)).await;
        let time2 = now();
        assert!(time2 > time1);
    }

    #[test]
    fn test_storage_format_roundtrip_keeps_microseconds() {
        let ts = now();
        let parsed = from_storage(&to_storage(&ts)).unwrap();
        assert_eq!(parsed.timestamp_micros(), ts.timestamp_micros());
    }

    #[test]
    fn test_storage_format_sorts_chronologically() {
        let earlier = from_storage("2024-01-01T09:00:00.000001Z").unwrap();
        let later = from_storage("2024-01-01T10:00:00.000000Z").unwrap();
        assert!(to_storage(&earlier) < to_storage(&later));
    }

    #[test]
    fn test_from_storage_rejects_garbage() {
        assert!(from_storage("yesterday").is_err());
    }
}
