//! The parsed point-in-time value and its zone tag.

use std::fmt;

use chrono::{
    DateTime, Datelike, Duration, FixedOffset, Local, LocalResult, NaiveDate, NaiveDateTime,
    NaiveTime, TimeZone, Timelike, Utc,
};
use chrono_tz::Tz;
use serde::{Serialize, Serializer};

use crate::error::{Result, TimeError};

// ── Zone ────────────────────────────────────────────────────────────────────

/// The zone an [`Instant`]'s wall-clock fields are expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zone {
    /// The process-local zone, read at the moment the instant is interpreted.
    Local,
    /// UTC. Any explicit input offset was already folded into the wall-clock
    /// fields.
    Utc,
    /// A named IANA zone.
    Named(Tz),
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Zone::Local => f.write_str("Local"),
            Zone::Utc => f.write_str("UTC"),
            Zone::Named(tz) => write!(f, "{tz}"),
        }
    }
}

// ── Calendar fields ─────────────────────────────────────────────────────────

/// Integer calendar fields prior to calendar normalization.
///
/// Values may be out of range (day 32, hour -7). Construction carries the
/// excess into the next field per civil-calendar arithmetic, so a zeroed
/// field set is still constructible.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Fields {
    pub year: i64,
    pub month: i64,
    pub day: i64,
    pub hour: i64,
    pub minute: i64,
    pub second: i64,
    /// Invariant: in `[0, 1_000_000_000)`.
    pub nanosecond: i64,
}

// ── Instant ─────────────────────────────────────────────────────────────────

/// An absolute point in time: calendar fields plus the zone they are
/// expressed in.
///
/// Instants are immutable; zone conversion produces a new value. Equality
/// compares the wall-clock fields and the zone tag, not the absolute
/// instant they denote.
///
/// # Examples
///
/// ```
/// let t = strtotime::parse("2018-02-09 20:46:17.897").unwrap();
/// assert_eq!(t.hour(), 20);
/// assert_eq!(t.nanosecond(), 897_000_000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instant {
    datetime: NaiveDateTime,
    zone: Zone,
}

impl Instant {
    pub(crate) fn new(datetime: NaiveDateTime, zone: Zone) -> Instant {
        Instant { datetime, zone }
    }

    /// Build an instant from raw integer fields, carrying out-of-range
    /// components forward.
    ///
    /// Months fold into years by euclidean division; the remaining
    /// day/hour/minute/second/nanosecond excess is applied as a signed
    /// duration from the first of the normalized month, so `day: 32` lands
    /// in the next month and `hour: -7` in the previous day.
    ///
    /// # Errors
    ///
    /// Returns [`TimeError::OutOfRange`] if the normalized result falls
    /// outside the representable calendar range.
    pub(crate) fn from_fields(fields: Fields, zone: Zone) -> Result<Instant> {
        let months = fields.month - 1;
        let year = i32::try_from(fields.year + months.div_euclid(12))
            .map_err(|_| out_of_range(&fields))?;
        let month = (months.rem_euclid(12) + 1) as u32;
        let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| out_of_range(&fields))?;

        let seconds = (fields.day - 1) * 86_400
            + fields.hour * 3_600
            + fields.minute * 60
            + fields.second;
        let excess = Duration::new(seconds, fields.nanosecond as u32)
            .ok_or_else(|| out_of_range(&fields))?;
        let datetime = first
            .and_time(NaiveTime::MIN)
            .checked_add_signed(excess)
            .ok_or_else(|| out_of_range(&fields))?;

        Ok(Instant { datetime, zone })
    }

    /// The wall-clock fields, without the zone tag.
    pub fn naive(&self) -> NaiveDateTime {
        self.datetime
    }

    /// The zone the wall-clock fields are expressed in.
    pub fn zone(&self) -> Zone {
        self.zone
    }

    pub fn year(&self) -> i32 {
        self.datetime.year()
    }

    pub fn month(&self) -> u32 {
        self.datetime.month()
    }

    pub fn day(&self) -> u32 {
        self.datetime.day()
    }

    pub fn hour(&self) -> u32 {
        self.datetime.hour()
    }

    pub fn minute(&self) -> u32 {
        self.datetime.minute()
    }

    pub fn second(&self) -> u32 {
        self.datetime.second()
    }

    pub fn nanosecond(&self) -> u32 {
        self.datetime.nanosecond()
    }

    /// Format the wall-clock fields with a chrono layout string.
    ///
    /// The layout must be a valid chrono format string; zone-dependent
    /// specifiers (`%Z`, `%z`) are not supported here since only the wall
    /// fields are formatted.
    pub fn format(&self, layout: &str) -> String {
        self.datetime.format(layout).to_string()
    }

    /// The absolute instant in UTC.
    ///
    /// # Errors
    ///
    /// Returns [`TimeError::AmbiguousLocalTime`] if the wall-clock fields
    /// are ambiguous or nonexistent in the instant's zone (DST
    /// transitions).
    pub fn to_utc(&self) -> Result<DateTime<Utc>> {
        Ok(self.to_fixed()?.with_timezone(&Utc))
    }

    /// Seconds since the Unix epoch.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Instant::to_utc`].
    pub fn timestamp(&self) -> Result<i64> {
        Ok(self.to_fixed()?.timestamp())
    }

    /// Interpret the wall-clock fields in the instant's zone.
    pub(crate) fn to_fixed(&self) -> Result<DateTime<FixedOffset>> {
        match self.zone {
            Zone::Utc => Ok(Utc.from_utc_datetime(&self.datetime).fixed_offset()),
            Zone::Local => fix_single(Local.from_local_datetime(&self.datetime), self),
            Zone::Named(tz) => fix_single(tz.from_local_datetime(&self.datetime), self),
        }
    }
}

/// Collapse a local-time interpretation to a single fixed-offset datetime.
fn fix_single<T: TimeZone>(
    result: LocalResult<DateTime<T>>,
    instant: &Instant,
) -> Result<DateTime<FixedOffset>> {
    result
        .single()
        .map(|dt| dt.fixed_offset())
        .ok_or_else(|| TimeError::AmbiguousLocalTime(instant.to_string()))
}

fn out_of_range(fields: &Fields) -> TimeError {
    TimeError::OutOfRange(format!("{fields:?}"))
}

impl fmt::Display for Instant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}",
            self.datetime.format("%Y-%m-%d %H:%M:%S%.f"),
            self.zone
        )
    }
}

/// Serializes as the display string: wall-clock fields plus zone name.
impl Serialize for Instant {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(year: i64, month: i64, day: i64, hour: i64, minute: i64, second: i64) -> Fields {
        Fields {
            year,
            month,
            day,
            hour,
            minute,
            second,
            nanosecond: 0,
        }
    }

    #[test]
    fn test_build_plain_fields() {
        let t = Instant::from_fields(fields(2018, 2, 9, 20, 46, 17), Zone::Local).unwrap();
        assert_eq!((t.year(), t.month(), t.day()), (2018, 2, 9));
        assert_eq!((t.hour(), t.minute(), t.second()), (20, 46, 17));
        assert_eq!(t.zone(), Zone::Local);
    }

    #[test]
    fn test_build_day_overflow_carries_into_month() {
        let t = Instant::from_fields(fields(2018, 1, 32, 0, 0, 0), Zone::Local).unwrap();
        assert_eq!((t.year(), t.month(), t.day()), (2018, 2, 1));
    }

    #[test]
    fn test_build_month_overflow_carries_into_year() {
        let t = Instant::from_fields(fields(2018, 13, 1, 0, 0, 0), Zone::Local).unwrap();
        assert_eq!((t.year(), t.month(), t.day()), (2019, 1, 1));
    }

    #[test]
    fn test_build_negative_hour_borrows_from_day() {
        // An explicit +08:00 offset against a zero local offset shifts the
        // hour field below zero before construction.
        let t = Instant::from_fields(fields(2014, 1, 17, -7, 19, 15), Zone::Utc).unwrap();
        assert_eq!((t.year(), t.month(), t.day()), (2014, 1, 16));
        assert_eq!((t.hour(), t.minute(), t.second()), (17, 19, 15));
    }

    #[test]
    fn test_build_zeroed_fields() {
        // An unsplittable date group leaves every field at zero; construction
        // still succeeds by borrowing backwards from year 0, month 1, day 1.
        let t = Instant::from_fields(Fields::default(), Zone::Local).unwrap();
        assert_eq!((t.year(), t.month(), t.day()), (-1, 11, 30));
    }

    #[test]
    fn test_build_far_out_of_range_year() {
        let err = Instant::from_fields(fields(i64::MAX, 1, 1, 0, 0, 0), Zone::Local).unwrap_err();
        assert!(matches!(err, TimeError::OutOfRange(_)));
    }

    #[test]
    fn test_to_utc_of_utc_tagged_instant_is_identity() {
        let t = Instant::from_fields(fields(2018, 2, 9, 20, 46, 17), Zone::Utc).unwrap();
        let utc = t.to_utc().unwrap();
        assert_eq!(utc.to_rfc3339(), "2018-02-09T20:46:17+00:00");
    }

    #[test]
    fn test_to_utc_of_named_zone() {
        let t = Instant::from_fields(
            fields(2018, 2, 9, 20, 46, 17),
            Zone::Named(chrono_tz::Asia::Tokyo),
        )
        .unwrap();
        // Tokyo is UTC+9 year-round.
        assert_eq!(t.to_utc().unwrap().to_rfc3339(), "2018-02-09T11:46:17+00:00");
    }

    #[test]
    fn test_nonexistent_wall_clock_is_rejected() {
        // 2026-03-08 02:30 does not exist in New York (spring forward).
        let t = Instant::from_fields(
            fields(2026, 3, 8, 2, 30, 0),
            Zone::Named(chrono_tz::America::New_York),
        )
        .unwrap();
        let err = t.to_utc().unwrap_err();
        assert!(matches!(err, TimeError::AmbiguousLocalTime(_)));
    }

    #[test]
    fn test_display_includes_fraction_and_zone() {
        let t = Instant::from_fields(
            Fields {
                nanosecond: 897_000_000,
                ..fields(2018, 2, 9, 20, 46, 17)
            },
            Zone::Utc,
        )
        .unwrap();
        assert_eq!(t.to_string(), "2018-02-09 20:46:17.897 UTC");
    }

    #[test]
    fn test_serialize_as_display_string() {
        let t = Instant::from_fields(fields(2018, 2, 9, 20, 46, 17), Zone::Utc).unwrap();
        let json = serde_json::to_string(&t).unwrap();
        assert_eq!(json, "\"2018-02-09 20:46:17 UTC\"");
    }
}
