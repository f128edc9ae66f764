//! Time helpers
//!
//! All storage timestamps are UTC milliseconds; calendar arithmetic for
//! search filters and reports happens here.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Utc};

/// Parse an ISO-8601 datetime into UTC millis.
///
/// Accepts RFC 3339 with offset, or naive `YYYY-MM-DDTHH:MM[:SS]`
/// values which are treated as UTC.
pub fn parse_iso_millis(s: &str) -> Option<i64> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.timestamp_millis());
    }
    let naive = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M"))
        .ok()?;
    Some(naive.and_utc().timestamp_millis())
}

/// Half-open UTC millis range covering one calendar day
pub fn day_range_millis(date: NaiveDate) -> (i64, i64) {
    let start = date.and_time(NaiveTime::MIN).and_utc();
    let end = start + Duration::days(1);
    (start.timestamp_millis(), end.timestamp_millis())
}

/// Week containing `today`, starting on the most recent Monday.
/// Returns the week start date plus the half-open UTC millis range.
pub fn week_range_millis(today: NaiveDate) -> (NaiveDate, i64, i64) {
    let monday = today - Duration::days(today.weekday().num_days_from_monday() as i64);
    let start = monday.and_time(NaiveTime::MIN).and_utc();
    let end = start + Duration::days(7);
    (monday, start.timestamp_millis(), end.timestamp_millis())
}

/// Today's date in UTC
pub fn today_utc() -> NaiveDate {
    Utc::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_iso_millis() {
        assert_eq!(
            parse_iso_millis("2025-06-01T18:30:00Z"),
            Some(1_748_802_600_000)
        );
        // Naive values are UTC
        assert_eq!(
            parse_iso_millis("2025-06-01T18:30:00"),
            Some(1_748_802_600_000)
        );
        assert_eq!(
            parse_iso_millis("2025-06-01T18:30"),
            Some(1_748_802_600_000)
        );
        // Offset is honored
        assert_eq!(
            parse_iso_millis("2025-06-01T20:30:00+02:00"),
            Some(1_748_802_600_000)
        );
        assert_eq!(parse_iso_millis("yesterday"), None);
        assert_eq!(parse_iso_millis(""), None);
    }

    #[test]
    fn test_day_range_millis() {
        let date = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let (start, end) = day_range_millis(date);
        assert_eq!(end - start, 86_400_000);
        // 2025-06-01T00:00:00Z
        assert_eq!(start, 1_748_736_000_000);
    }

    #[test]
    fn test_week_range_starts_monday() {
        // 2025-06-05 is a Thursday; the week starts 2025-06-02 (Monday)
        let thursday = NaiveDate::from_ymd_opt(2025, 6, 5).unwrap();
        let (monday, start, end) = week_range_millis(thursday);
        assert_eq!(monday, NaiveDate::from_ymd_opt(2025, 6, 2).unwrap());
        assert_eq!(end - start, 7 * 86_400_000);

        // A Monday maps to itself
        let (same, _, _) = week_range_millis(monday);
        assert_eq!(same, monday);
    }
}
