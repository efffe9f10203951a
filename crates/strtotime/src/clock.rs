//! Current-time getters.
//!
//! Thin wrappers over the system clock. Each call reads the clock and the
//! process-local zone afresh; nothing is cached.

use chrono::{Local, Utc};

use crate::instant::{Instant, Zone};

/// The current local wall-clock time.
pub fn now() -> Instant {
    Instant::new(Local::now().naive_local(), Zone::Local)
}

/// Seconds since the Unix epoch.
pub fn timestamp() -> i64 {
    Utc::now().timestamp()
}

/// Milliseconds since the Unix epoch.
pub fn timestamp_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Microseconds since the Unix epoch.
pub fn timestamp_micros() -> i64 {
    Utc::now().timestamp_micros()
}

/// Nanoseconds since the Unix epoch. Saturates at `i64::MAX` once the
/// nanosecond count no longer fits (year 2262).
pub fn timestamp_nanos() -> i64 {
    Utc::now().timestamp_nanos_opt().unwrap_or(i64::MAX)
}

/// Today's local date as `YYYY-MM-DD`.
pub fn date() -> String {
    Local::now().format("%Y-%m-%d").to_string()
}

/// The current local time as `YYYY-MM-DD HH:MM:SS`.
pub fn datetime() -> String {
    Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

// ── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // 2020-01-01T00:00:00Z, a floor for "the clock is sane".
    const Y2020: i64 = 1_577_836_800;

    #[test]
    fn test_timestamp_scales_agree() {
        let seconds = timestamp();
        assert!(seconds > Y2020);
        assert!(timestamp_millis() / 1_000 >= seconds);
        assert!(timestamp_micros() / 1_000_000 >= seconds);
        assert!(timestamp_nanos() / 1_000_000_000 >= seconds);
    }

    #[test]
    fn test_now_is_local_tagged() {
        assert_eq!(now().zone(), Zone::Local);
    }

    #[test]
    fn test_formatted_now_parses_back() {
        let today = date();
        assert_eq!(today.len(), 10);
        assert!(crate::parse(&today).is_ok());
        assert!(crate::parse(&datetime()).is_ok());
    }
}
