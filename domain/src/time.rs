//! Timestamp normalization for list results.
//!
//! Backends report timestamps with whatever precision and offset they carry
//! internally. Everything leaving an action group is reduced to one textual
//! form: RFC 3339, whole seconds, `Z` suffix.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serializer;

/// Render a timestamp in the canonical wire form.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Normalize a textual timestamp to the canonical wire form.
///
/// Idempotent: normalizing an already-normalized value yields the same
/// string. Values that do not parse as RFC 3339 pass through unchanged.
pub fn normalize_timestamp(value: &str) -> String {
    match DateTime::parse_from_rfc3339(value) {
        Ok(parsed) => format_timestamp(&parsed.with_timezone(&Utc)),
        Err(_) => value.to_string(),
    }
}

/// Serde helper for record fields holding a timestamp.
pub fn serialize_timestamp<S>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format_timestamp(ts))
}

/// Serde helper for optional timestamp fields.
pub fn serialize_opt_timestamp<S>(
    ts: &Option<DateTime<Utc>>,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match ts {
        Some(ts) => serializer.serialize_some(&format_timestamp(ts)),
        None => serializer.serialize_none(),
    }
}
