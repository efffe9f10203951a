//! Layout-driven strict parsing.
//!
//! The second parsing strategy alongside the permissive grammar: the caller
//! names the expected shape, either as a `Y-m-d H:i:s` style token format
//! or as a native chrono layout, and the input must match it exactly.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use tracing::debug;

use crate::error::{Result, TimeError};
use crate::instant::{Instant, Zone};

/// Custom-token → chrono-specifier pairs, tried in table order at each
/// input position, so a token must precede any later token it is a prefix
/// of. Characters matching no entry pass through as literals.
const TOKENS: &[(&str, &str)] = &[
    ("Y", "%Y"),  // four-digit year        2006
    ("y", "%y"),  // two-digit year         06
    ("m", "%m"),  // zero-padded month      01
    ("n", "%-m"), // month                  1
    ("d", "%d"),  // zero-padded day        02
    ("j", "%-d"), // day                    2
    ("H", "%H"),  // zero-padded 24h hour   15
    ("G", "%-H"), // 24h hour               15
    ("h", "%I"),  // zero-padded 12h hour   03
    ("g", "%-I"), // 12h hour               3
    ("i", "%M"),  // minutes                04
    ("s", "%S"),  // seconds                05
    ("A", "%p"),  // AM / PM
    ("a", "%P"),  // am / pm
];

/// Translate a custom-token format into a native chrono layout.
///
/// Pure, table-driven substitution over [`TOKENS`]; a literal `%` is
/// escaped so it survives the chrono formatter.
///
/// # Examples
///
/// ```
/// use strtotime::format_to_layout;
///
/// assert_eq!(format_to_layout("Y-m-d H:i:s"), "%Y-%m-%d %H:%M:%S");
/// assert_eq!(format_to_layout("j/n/Y"), "%-d/%-m/%Y");
/// ```
pub fn format_to_layout(format: &str) -> String {
    let mut layout = String::with_capacity(format.len() * 2);
    let mut rest = format;
    while let Some(ch) = rest.chars().next() {
        if let Some(&(token, native)) = TOKENS.iter().find(|&&(t, _)| rest.starts_with(t)) {
            layout.push_str(native);
            rest = &rest[token.len()..];
        } else {
            if ch == '%' {
                layout.push_str("%%");
            } else {
                layout.push(ch);
            }
            rest = &rest[ch.len_utf8()..];
        }
    }
    layout
}

/// Parse a textual datetime against a custom-token format.
///
/// The format is translated via [`format_to_layout`] and the input must
/// match the result exactly — none of the leniency of
/// [`parse`](crate::parse()) applies here.
///
/// # Errors
///
/// Returns [`TimeError::LayoutMismatch`] if the input does not conform to
/// the translated layout.
///
/// # Examples
///
/// ```
/// use strtotime::parse_with_format;
///
/// let t = parse_with_format("2018-02-09 20:46:17", "Y-m-d H:i:s").unwrap();
/// assert_eq!((t.year(), t.hour()), (2018, 20));
///
/// assert!(parse_with_format("09/02/2018", "Y-m-d").is_err());
/// ```
pub fn parse_with_format(text: &str, format: &str) -> Result<Instant> {
    parse_with_layout(text, &format_to_layout(format))
}

/// Parse a textual datetime against a native chrono layout.
///
/// The input must conform to the layout exactly. Date-only layouts yield
/// midnight; time-only layouts anchor to the epoch date. The result keeps
/// its wall-clock fields and is tagged [`Zone::Local`].
///
/// # Errors
///
/// Returns [`TimeError::LayoutMismatch`] if the input does not conform to
/// the layout.
///
/// # Examples
///
/// ```
/// use strtotime::parse_with_layout;
///
/// let t = parse_with_layout("2018-02-09", "%Y-%m-%d").unwrap();
/// assert_eq!((t.day(), t.hour()), (9, 0));
/// ```
pub fn parse_with_layout(text: &str, layout: &str) -> Result<Instant> {
    let datetime = match NaiveDateTime::parse_from_str(text, layout) {
        Ok(dt) => dt,
        Err(primary) => NaiveDate::parse_from_str(text, layout)
            .map(|d| d.and_time(NaiveTime::MIN))
            .or_else(|_| {
                NaiveTime::parse_from_str(text, layout)
                    .map(|t| NaiveDateTime::new(NaiveDate::default(), t))
            })
            .map_err(|_| {
                debug!(input = %text, layout = %layout, "strict layout parse failed");
                TimeError::LayoutMismatch(format!("{text:?} against {layout:?}: {primary}"))
            })?,
    };
    Ok(Instant::new(datetime, Zone::Local))
}

// ── Tests ───────────────────────────────────────────────────────────────────
