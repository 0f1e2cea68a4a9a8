use chrono::{SecondsFormat, Utc};

/// Current UTC time as a fixed-width RFC3339 string ("...T12:00:00.123456Z").
///
/// Fixed microsecond precision keeps the strings lexicographically ordered,
/// which the store's sort key and the queue's visibility check rely on.
pub fn now_ts() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// A timestamp `secs` seconds in the future, same format as [`now_ts`].
pub fn ts_after_secs(secs: i64) -> String {
    (Utc::now() + chrono::Duration::seconds(secs)).to_rfc3339_opts(SecondsFormat::Micros, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamps_sort_lexicographically() {
        let earlier = now_ts();
        let later = ts_after_secs(60);
        assert!(earlier < later);
        assert!(earlier.ends_with('Z'));
    }
}
