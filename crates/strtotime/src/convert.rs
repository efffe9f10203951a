//! Re-expressing parsed instants in named zones.

use chrono_tz::Tz;
use tracing::debug;

use crate::error::{Result, TimeError};
use crate::instant::{Instant, Zone};
use crate::parse::parse;

/// Look up an IANA zone name.
pub(crate) fn lookup_zone(name: &str) -> Result<Tz> {
    name.parse::<Tz>().map_err(|_| {
        debug!(zone = %name, "zone name did not resolve");
        TimeError::UnknownZone(name.to_string())
    })
}

/// Parse `text` and re-express the resulting instant in `to_zone`.
///
/// With `from_zone`, the parsed wall-clock fields are first reinterpreted
/// as belonging to that zone — useful when the input carries no offset but
/// the caller knows where it was produced. Both zone names are IANA names
/// (`"Asia/Tokyo"`, `"America/New_York"`, `"UTC"`).
///
/// The input instant is never mutated: conversion produces a new instant
/// tagged [`Zone::Named`].
///
/// # Errors
///
/// - [`TimeError::UnsupportedFormat`] if `text` cannot be parsed.
/// - [`TimeError::UnknownZone`] if either zone name does not resolve.
/// - [`TimeError::AmbiguousLocalTime`] if the wall-clock fields are
///   ambiguous or nonexistent in the source zone (DST transitions).
///
/// # Examples
///
/// ```
/// use strtotime::convert_zone;
///
/// // 20:46 UTC is 05:46 the next day in Tokyo (UTC+9).
/// let t = convert_zone("2018-02-09T20:46:17Z", "Asia/Tokyo", None).unwrap();
/// assert_eq!((t.month(), t.day(), t.hour()), (2, 10, 5));
/// ```
pub fn convert_zone(text: &str, to_zone: &str, from_zone: Option<&str>) -> Result<Instant> {
    let mut instant = parse(text)?;
    if let Some(name) = from_zone {
        let tz = lookup_zone(name)?;
        instant = Instant::new(instant.naive(), Zone::Named(tz));
    }
    let to = lookup_zone(to_zone)?;
    let absolute = instant.to_fixed()?;
    Ok(Instant::new(
        absolute.with_timezone(&to).naive_local(),
        Zone::Named(to),
    ))
}

// ── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_utc_input_to_tokyo() {
        let t = convert_zone("2018-02-09T20:46:17Z", "Asia/Tokyo", None).unwrap();
        assert_eq!((t.year(), t.month(), t.day()), (2018, 2, 10));
        assert_eq!((t.hour(), t.minute(), t.second()), (5, 46, 17));
        assert_eq!(t.zone(), Zone::Named(chrono_tz::Asia::Tokyo));
    }

    #[test]
    fn test_from_zone_reinterprets_wall_fields() {
        // The fields parse as 20:46 with a zero offset; reinterpreting them
        // as Tokyo wall-clock time makes the absolute instant 11:46 UTC.
        let t = convert_zone("2018-02-09T20:46:17Z", "UTC", Some("Asia/Tokyo")).unwrap();
        assert_eq!((t.day(), t.hour(), t.minute()), (9, 11, 46));
    }

    #[test]
    fn test_unknown_target_zone() {
        let err = convert_zone("2018-02-09", "Nowhere/Fake", None).unwrap_err();
        assert!(matches!(err, TimeError::UnknownZone(_)));
    }

    #[test]
    fn test_unknown_source_zone() {
        let err = convert_zone("2018-02-09", "UTC", Some("Nowhere/Fake")).unwrap_err();
        assert!(matches!(err, TimeError::UnknownZone(_)));
    }

    #[test]
    fn test_parse_failure_propagates() {
        let err = convert_zone("hello", "UTC", None).unwrap_err();
        assert!(matches!(err, TimeError::UnsupportedFormat(_)));
    }
}
