//! Grammar-driven permissive parsing.
//!
//! One compiled pattern recognizes the whole family of supported formats in
//! a single matching pass; missing fields are reconstructed afterwards from
//! whatever the pattern captured. This replaces the usual probe loop over a
//! list of known layout strings, which grows linearly with every format the
//! parser learns.

use chrono::{DateTime, Datelike, Local, Offset, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, trace};

use crate::convert::lookup_zone;
use crate::error::{Result, TimeError};
use crate::instant::{Fields, Instant, Zone};

// ── Field grammar ───────────────────────────────────────────────────────────

/// The single pattern behind [`parse`]. Capture groups, in order: date,
/// time, fraction, zone marker, sign, offset digits. Every group past the
/// date is optional, which is what lets one pass cover the whole family.
const GRAMMAR: &str =
    r"(\d{2,4}[-/]\d{2}[-/]\d{2})[\sT]?(\d{0,2}:?\d{0,2}:?\d{0,2})\.?(\d{0,9})([\sZ]?)([+-]?)([:\d]*)";

static GRAMMAR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(GRAMMAR).expect("field grammar must compile"));

/// Raw substrings captured by the field grammar for one input. Transient;
/// discarded once the fields are normalized.
#[derive(Debug, Clone, Copy)]
struct RawMatch<'a> {
    date: &'a str,
    time: &'a str,
    fraction: &'a str,
    zone_marker: &'a str,
    sign: &'a str,
    offset: &'a str,
}

/// Apply the grammar once; `None` when the input has no recognizable shape.
fn extract(input: &str) -> Option<RawMatch<'_>> {
    let caps = GRAMMAR_RE.captures(input)?;
    let group = |i: usize| caps.get(i).map_or("", |m| m.as_str());
    Some(RawMatch {
        date: group(1),
        time: group(2),
        fraction: group(3),
        zone_marker: group(4),
        sign: group(5),
        offset: group(6),
    })
}

// ── Parse context ───────────────────────────────────────────────────────────

/// Ambient inputs for grammar-driven parsing.
///
/// Reading the process clock and zone inside the parser would make
/// concurrent callers with different zone needs interfere through global
/// state; threading them in as a context keeps every parse a pure function
/// of its arguments. [`parse`] snapshots the system context per call.
#[derive(Debug, Clone, Copy)]
pub struct ParseContext {
    /// Year of the reference moment; supplies the century for two-digit
    /// years.
    pub reference_year: i32,
    /// The local zone's offset from UTC in seconds at the reference moment.
    pub local_offset: i32,
    /// Zone tag applied to results that keep their wall-clock fields.
    pub zone: Zone,
}

impl ParseContext {
    /// Snapshot of the process-local zone and clock at the current moment.
    pub fn system() -> ParseContext {
        let now = Local::now();
        ParseContext {
            reference_year: now.year(),
            local_offset: now.offset().local_minus_utc(),
            zone: Zone::Local,
        }
    }

    /// Context scoped to a named zone at a given reference instant.
    ///
    /// Inputs parsed under this context that keep their wall-clock fields
    /// are tagged with the named zone instead of [`Zone::Local`].
    ///
    /// # Errors
    ///
    /// Returns [`TimeError::UnknownZone`] if `zone` is not a valid IANA
    /// timezone name.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::{TimeZone, Utc};
    /// use strtotime::ParseContext;
    ///
    /// let at = Utc.with_ymd_and_hms(2026, 6, 15, 12, 0, 0).unwrap();
    /// let ctx = ParseContext::for_zone("Asia/Tokyo", at).unwrap();
    /// assert_eq!(ctx.local_offset, 9 * 3600);
    /// assert_eq!(ctx.reference_year, 2026);
    /// ```
    pub fn for_zone(zone: &str, at: DateTime<Utc>) -> Result<ParseContext> {
        let tz = lookup_zone(zone)?;
        let local = at.with_timezone(&tz);
        Ok(ParseContext {
            reference_year: local.year(),
            local_offset: local.offset().fix().local_minus_utc(),
            zone: Zone::Named(tz),
        })
    }
}

// ── Public entry points ─────────────────────────────────────────────────────

/// Parse a textual datetime in any of the recognized shapes.
///
/// A single permissive pattern recognizes the whole family in one pass:
///
/// ```text
/// 2017-12-14 04:51:34 +0805 LMT
/// 2014-01-17T01:19:15+08:00
/// 2018-02-09T20:46:17.897Z
/// 2018-02-09 20:46:17.897
/// 2018-02-09T20:46:17Z
/// 2018-02-09 20:46:17
/// 2018-02-09
/// 18/02/09
/// ```
///
/// Date separators may be `-` or `/`. Missing time components default to
/// zero and two-digit years borrow the current century. An input carrying
/// an explicit offset (or a bare `Z`, read as offset zero) is compared
/// against the local zone's current offset: on a match the fields stay
/// local wall-clock time, otherwise they are shifted to their UTC
/// equivalent and the result is tagged [`Zone::Utc`].
///
/// The process clock and local zone are read at call time; use
/// [`parse_with_context`] to supply them explicitly.
///
/// # Errors
///
/// Returns [`TimeError::UnsupportedFormat`] if the input has no
/// recognizable shape.
///
/// # Examples
///
/// ```
/// let t = strtotime::parse("2018-02-09").unwrap();
/// assert_eq!((t.year(), t.month(), t.day()), (2018, 2, 9));
/// assert_eq!((t.hour(), t.minute(), t.second()), (0, 0, 0));
///
/// assert!(strtotime::parse("hello").is_err());
/// ```
pub fn parse(text: &str) -> Result<Instant> {
    parse_with_context(text, &ParseContext::system())
}

/// Parse a textual datetime with explicit ambient inputs.
///
/// Same grammar and field reconstruction as [`parse`], with the reference
/// year, local offset and zone tag taken from `ctx` instead of the running
/// process. This is the deterministic entry point: two calls with the same
/// arguments always produce the same instant.
///
/// # Errors
///
/// Returns [`TimeError::UnsupportedFormat`] if the input has no
/// recognizable shape, or [`TimeError::OutOfRange`] if the normalized
/// fields fall outside the representable calendar range.
///
/// # Examples
///
/// ```
/// use strtotime::{parse_with_context, ParseContext, Zone};
///
/// let ctx = ParseContext {
///     reference_year: 2026,
///     local_offset: 0,
///     zone: Zone::Local,
/// };
/// let t = parse_with_context("99-12-14", &ctx).unwrap();
/// assert_eq!(t.year(), 2099);
/// ```
pub fn parse_with_context(text: &str, ctx: &ParseContext) -> Result<Instant> {
    let Some(raw) = extract(text) else {
        debug!(input = %text, "input matched no recognized datetime shape");
        return Err(TimeError::UnsupportedFormat(text.to_string()));
    };
    let mut fields = normalize(&raw, ctx.reference_year);
    let zone = resolve_zone(&raw, &mut fields, ctx);
    Instant::from_fields(fields, zone)
}

// ── Field normalization ─────────────────────────────────────────────────────

/// Convert raw substrings into integer calendar fields.
///
/// Every omitted optional group defaults to zero, and a fragment that fails
/// numeric conversion also reads as zero; the permissiveness lives here,
/// not in the grammar.
fn normalize(raw: &RawMatch<'_>, reference_year: i32) -> Fields {
    let mut fields = Fields::default();

    // Date: '-'-separated first, then '/'. A date group that splits under
    // neither separator (mixed separators) leaves the date fields zeroed.
    let mut date: Vec<&str> = raw.date.split('-').collect();
    if date.len() < 3 {
        date = raw.date.split('/').collect();
    }
    if date.len() >= 3 {
        fields.year = digits(date[0]);
        if fields.year < 100 {
            // Two-digit years borrow the century of the reference moment,
            // not a plausibility window: 99 in 2026 reads as 2099.
            fields.year += i64::from(reference_year) / 100 * 100;
        }
        fields.month = digits(date[1]);
        fields.day = digits(date[2]);
    }

    if !raw.time.is_empty() {
        let mut time = raw.time.split(':');
        fields.hour = time.next().map_or(0, digits);
        fields.minute = time.next().map_or(0, digits);
        fields.second = time.next().map_or(0, digits);
    }

    if !raw.fraction.is_empty() {
        // Left-align the captured digits to nanosecond precision: ".5" is
        // half a second, not five nanoseconds.
        fields.nanosecond = digits(raw.fraction);
        for _ in raw.fraction.len()..9 {
            fields.nanosecond *= 10;
        }
    }

    fields
}

/// Parse a digit fragment, reading failures as zero.
fn digits(s: &str) -> i64 {
    s.parse().unwrap_or(0)
}

// ── Zone resolution ─────────────────────────────────────────────────────────

/// Decide the effective zone for the normalized fields and, when the input
/// carries an offset that disagrees with the local one, shift the fields to
/// their UTC equivalent.
fn resolve_zone(raw: &RawMatch<'_>, fields: &mut Fields, ctx: &ParseContext) -> Zone {
    // A bare zone marker (trailing whitespace or `Z`) with no offset digits
    // implies offset zero.
    let offset = if !raw.zone_marker.is_empty() && raw.offset.is_empty() {
        "000000"
    } else {
        raw.offset
    };
    if offset.is_empty() {
        return ctx.zone;
    }

    let (h, m, s) = offset_components(offset);
    let shifted = shift_to_utc(fields, raw.sign, h, m, s, i64::from(ctx.local_offset));
    trace!(
        offset_hours = h,
        offset_minutes = m,
        offset_seconds = s,
        shifted,
        "resolved explicit offset"
    );
    if shifted {
        Zone::Utc
    } else {
        ctx.zone
    }
}

/// Normalize an offset fragment into 2-digit hour/minute/second components.
///
/// Colons and leading sign characters are stripped and the digits
/// right-padded with zeros to six places, so `"08:00"`, `"0800"` and
/// `"08"` all read as `(8, 0, 0)`.
fn offset_components(offset: &str) -> (i64, i64, i64) {
    let stripped = offset.replace(':', "");
    let mut padded = stripped.trim_start_matches(['+', '-']).to_string();
    while padded.len() < 6 {
        padded.push('0');
    }
    (
        digits(&padded[0..2]),
        digits(&padded[2..4]),
        digits(&padded[4..6]),
    )
}

/// Shift wall-clock fields to their UTC equivalent when the parsed offset
/// disagrees with the local one. Returns whether the result is now
/// UTC-tagged.
///
/// The sign convention is part of the recognized format family and is kept
/// as-is: `+` subtracts the offset components, anything else (including a
/// missing sign) adds them, and only components with positive magnitude
/// participate. The magnitude comparison against the local offset ignores
/// the parsed sign.
fn shift_to_utc(
    fields: &mut Fields,
    sign: &str,
    h: i64,
    m: i64,
    s: i64,
    local_offset: i64,
) -> bool {
    if h * 3_600 + m * 60 + s == local_offset {
        return false;
    }
    let direction = if sign == "+" { -1 } else { 1 };
    if h > 0 {
        fields.hour += direction * h;
    }
    if m > 0 {
        fields.minute += direction * m;
    }
    if s > 0 {
        fields.second += direction * s;
    }
    true
}

// ── Tests ───────────────────────────────────────────────────────────────────
