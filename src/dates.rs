use chrono::{DateTime, Local, NaiveDate, SecondsFormat, Utc};

/// Current instant as an ISO-8601 UTC timestamp, e.g. `2024-01-01T09:30:00.000Z`.
pub fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Formats a stored timestamp as a short date in local time.
///
/// The format is always `%m/%d/%y`; chrono's `%x` does not consult the host
/// locale. Accepts full RFC 3339 timestamps as well as bare `YYYY-MM-DD` dates.
/// Returns `None` when the string is neither.
pub fn short_local_date(stamp: &str) -> Option<String> {
    if let Ok(instant) = DateTime::parse_from_rfc3339(stamp) {
        return Some(instant.with_timezone(&Local).format("%x").to_string());
    }
    NaiveDate::parse_from_str(stamp, "%Y-%m-%d")
        .ok()
        .map(|date| date.format("%x").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn now_is_parseable_back() {
        let stamp = now_iso();
        assert!(stamp.ends_with('Z'));
        assert!(short_local_date(&stamp).is_some());
    }

    #[test]
    fn bare_dates_are_accepted() {
        assert_eq!(short_local_date("2024-01-31").as_deref(), Some("01/31/24"));
    }

    #[test]
    fn malformed_stamps_are_rejected() {
        assert_eq!(short_local_date("yesterday-ish"), None);
        assert_eq!(short_local_date(""), None);
    }
}
