//! Deterministic tag-URI minting for relationship-less activity notices.
//!
//! # Responsibility
//! - Produce stable URIs for events whose relationship row no longer exists
//!   (unfollow, unlike, leave).
//!
//! # Invariants
//! - Minting is a pure function of `(label, left, right, at)`.
//! - Distinct input tuples yield distinct URIs; timestamps carry
//!   microsecond precision.

use chrono::{DateTime, SecondsFormat, Utc};

/// Formats a timestamp as ISO-8601 with microsecond precision, UTC.
pub fn iso8601_micros(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Mints a `<label>:<left>:<right>:<timestamp>` URI.
///
/// `left` and `right` are the two entity ids involved in the event, in the
/// order the label implies (actor first).
pub fn mint(label: &str, left: i64, right: i64, at: DateTime<Utc>) -> String {
    format!("{label}:{left}:{right}:{}", iso8601_micros(at))
}
