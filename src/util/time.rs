// src/util/time.rs
use chrono::{DateTime, Datelike, Duration, Local, Utc};

/// Human-friendly age of `then` relative to `now`, in local time.
///
/// `just now`, `5m ago`, `3h ago` (same calendar day only), `yesterday`,
/// `4d ago`, then a short date such as `Mar 7`.
pub fn relative_time(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let then_local = then.with_timezone(&Local);
    let now_local = now.with_timezone(&Local);
    let elapsed = now - then;

    let seconds = elapsed.num_seconds();
    let minutes = elapsed.num_minutes();
    let hours = elapsed.num_hours();
    let days = elapsed.num_days();

    if seconds < 60 {
        return "just now".to_string();
    }
    if minutes < 60 {
        return format!("{minutes}m ago");
    }
    if hours < 24 && now_local.day() == then_local.day() {
        return format!("{hours}h ago");
    }

    let yesterday = (now_local - Duration::days(1)).date_naive();
    if then_local.date_naive() == yesterday {
        return "yesterday".to_string();
    }
    if days < 7 {
        return format!("{days}d ago");
    }

    then_local.format("%b %-d").to_string()
}

/// Timestamp with month, day and time of day, e.g. `Mar 7, 14:05`.
pub fn short_timestamp(at: DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%b %-d, %H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn local_noon(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Local
            .with_ymd_and_hms(y, m, d, 12, 0, 0)
            .single()
            .expect("unambiguous local time")
            .with_timezone(&Utc)
    }

    #[test]
    fn given_seconds_old_when_formatting_then_just_now() {
        let now = local_noon(2024, 6, 12);

        assert_eq!(relative_time(now - Duration::seconds(30), now), "just now");
    }

    #[test]
    fn given_minutes_old_when_formatting_then_minutes_ago() {
        let now = local_noon(2024, 6, 12);

        assert_eq!(relative_time(now - Duration::minutes(42), now), "42m ago");
    }

    #[test]
    fn given_hours_old_same_day_when_formatting_then_hours_ago() {
        let now = local_noon(2024, 6, 12);

        assert_eq!(relative_time(now - Duration::hours(3), now), "3h ago");
    }

    #[test]
    fn given_previous_day_when_formatting_then_yesterday() {
        let now = local_noon(2024, 6, 12);

        assert_eq!(relative_time(now - Duration::hours(23), now), "yesterday");
    }

    #[test]
    fn given_few_days_old_when_formatting_then_days_ago() {
        let now = local_noon(2024, 6, 12);

        assert_eq!(relative_time(now - Duration::days(4), now), "4d ago");
    }

    #[test]
    fn given_older_than_week_when_formatting_then_short_date() {
        let now = local_noon(2024, 6, 12);

        assert_eq!(relative_time(local_noon(2024, 2, 7), now), "Feb 7");
    }
}
