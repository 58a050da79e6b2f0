use chrono::{DateTime, Utc};

use crate::constants::UNKNOWN_CREATED;

/// Human-readable age of `then` relative to `now` ("5 minutes ago").
/// Timestamps in the future read as "just now".
pub fn relative_time(now: DateTime<Utc>, then: DateTime<Utc>) -> String {
    let seconds = (now - then).num_seconds();
    if seconds < 60 {
        return "just now".to_string();
    }

    let minutes = seconds / 60;
    let hours = minutes / 60;
    let days = hours / 24;

    let (value, unit) = if minutes < 60 {
        (minutes, "minute")
    } else if hours < 24 {
        (hours, "hour")
    } else if days < 30 {
        (days, "day")
    } else if days < 365 {
        (days / 30, "month")
    } else {
        (days / 365, "year")
    };

    if value == 1 {
        format!("1 {} ago", unit)
    } else {
        format!("{} {}s ago", value, unit)
    }
}

/// Created column text: relative time, or "Unknown" without a timestamp
pub fn created_label(now: DateTime<Utc>, created: Option<DateTime<Utc>>) -> String {
    created
        .map(|then| relative_time(now, then))
        .unwrap_or_else(|| UNKNOWN_CREATED.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_relative_time_units() {
        let now = now();
        assert_eq!(relative_time(now, now - Duration::seconds(10)), "just now");
        assert_eq!(relative_time(now, now - Duration::minutes(1)), "1 minute ago");
        assert_eq!(relative_time(now, now - Duration::minutes(59)), "59 minutes ago");
        assert_eq!(relative_time(now, now - Duration::hours(3)), "3 hours ago");
        assert_eq!(relative_time(now, now - Duration::days(1)), "1 day ago");
        assert_eq!(relative_time(now, now - Duration::days(65)), "2 months ago");
        assert_eq!(relative_time(now, now - Duration::days(800)), "2 years ago");
    }

    #[test]
    fn test_future_reads_just_now() {
        let now = now();
        assert_eq!(relative_time(now, now + Duration::hours(1)), "just now");
    }

    #[test]
    fn test_created_label_unknown() {
        assert_eq!(created_label(now(), None), "Unknown");
    }
}
