//! # strtotime
//!
//! Flexible textual-datetime parsing.
//!
//! A single permissive pattern recognizes a whole family of
//! loosely-specified date/time shapes in one matching pass — no probe loop
//! over known layout strings. Missing fields are reconstructed (two-digit
//! years borrow the current century, absent time components default to
//! zero, fractional seconds left-align to nanosecond precision) and
//! explicit offsets are resolved against the local zone's current offset.
//! A strict layout-driven parser and a named-zone converter round out the
//! surface.
//!
//! ## Modules
//!
//! - [`parse`] — grammar-driven permissive parsing
//! - [`layout`] — strict layout-driven parsing and the custom token table
//! - [`convert`] — re-expressing parsed instants in named zones
//! - [`instant`] — the parsed point-in-time value and its zone tag
//! - [`clock`] — current-time getters
//! - [`error`] — error types
//!
//! ## Quick start
//!
//! ```
//! let t = strtotime::parse("2018-02-09T20:46:17.897Z").unwrap();
//! assert_eq!(t.nanosecond(), 897_000_000);
//!
//! let t = strtotime::parse_with_format("2018-02-09 20:46:17", "Y-m-d H:i:s").unwrap();
//! assert_eq!(t.hour(), 20);
//! ```

pub mod clock;
pub mod convert;
pub mod error;
pub mod instant;
pub mod layout;
pub mod parse;

pub use clock::{
    date, datetime, now, timestamp, timestamp_micros, timestamp_millis, timestamp_nanos,
};
pub use convert::convert_zone;
pub use error::TimeError;
pub use instant::{Instant, Zone};
pub use layout::{format_to_layout, parse_with_format, parse_with_layout};
pub use parse::{parse, parse_with_context, ParseContext};
