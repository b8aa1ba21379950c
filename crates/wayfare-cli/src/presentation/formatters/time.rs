use chrono::{DateTime, Utc};

/// `2026-03-01 14:05 UTC`
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M UTC").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_timestamp() {
        let ts = Utc.with_ymd_and_hms(2026, 3, 1, 14, 5, 59).unwrap();
        assert_eq!(format_timestamp(&ts), "2026-03-01 14:05 UTC");
    }
}
