//! Timestamp rendering.

use chrono::{DateTime, Utc};

/// Marker shown when the node reported no usable timestamp.
pub const UNKNOWN_TIMESTAMP: &str = "unknown";

/// Render a millisecond Unix timestamp as `YYYY-MM-DD HH:MM:SS UTC`.
///
/// Absent or out-of-range values render as [`UNKNOWN_TIMESTAMP`].
pub fn format_timestamp_ms(timestamp_ms: Option<u64>) -> String {
    timestamp_ms
        .and_then(|ms| i64::try_from(ms).ok())
        .and_then(DateTime::<Utc>::from_timestamp_millis)
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| UNKNOWN_TIMESTAMP.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_millisecond_timestamps_in_utc() {
        assert_eq!(
            format_timestamp_ms(Some(1_700_000_000_000)),
            "2023-11-14 22:13:20 UTC"
        );
    }

    #[test]
    fn missing_timestamp_is_unknown() {
        assert_eq!(format_timestamp_ms(None), UNKNOWN_TIMESTAMP);
    }

    #[test]
    fn out_of_range_timestamp_is_unknown() {
        assert_eq!(format_timestamp_ms(Some(u64::MAX)), UNKNOWN_TIMESTAMP);
    }
}
