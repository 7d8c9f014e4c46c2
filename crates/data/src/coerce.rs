//! Leaf coercions shared by both decoders.
//!
//! Numbers arrive as literal text and are narrowed in a fixed order:
//! `i64` when the text is exactly an integer rendering, `f64` when the
//! shortest rendering of the parsed float is numerically the same as the
//! text, and [`BigDecimal`] for everything else.
//!
//! Dates have no slot of their own in JSON and travel as strings. A string is
//! promoted to [`Value::Date`] only when re-rendering the parsed timestamp
//! reproduces the input exactly, case included. RFC 3339 fractions are limited
//! to whole microseconds so the remote element-tree bridge can mirror the rule.

use std::str::FromStr;

use bigdecimal::BigDecimal;
use chrono::{DateTime, FixedOffset, NaiveDateTime, SecondsFormat};

use crate::{DecodeError, Value};

/// Invariant-culture general date/time pattern (`G`), e.g. `1/2/2024 3:04:05 PM`.
const GENERAL_PARSE: &str = "%m/%d/%Y %I:%M:%S %p";
const GENERAL_RENDER: &str = "%-m/%-d/%Y %-I:%M:%S %p";

/// Coerces numeric literal text to the narrowest exact representation.
pub fn number(text: &str) -> Result<Value, DecodeError> {
	if let Ok(int) = text.parse::<i64>()
		&& int.to_string() == text
	{
		return Ok(Value::Int(int));
	}

	let exact = BigDecimal::from_str(text).map_err(|_| DecodeError::InvalidNumber(text.to_owned()))?;

	if let Ok(float) = text.parse::<f64>()
		&& float.is_finite()
		&& BigDecimal::from_str(&float.to_string()).is_ok_and(|shortest| shortest == exact)
	{
		return Ok(Value::Float(float));
	}

	Ok(Value::Decimal(exact))
}

/// Coerces string text, promoting exact date/time renderings to [`Value::Date`].
pub fn string(text: String) -> Value {
	match parse_date(&text) {
		Some(date) => Value::Date(date),
		None => Value::String(text),
	}
}

/// Parses `true`/`false` exactly.
pub fn boolean(text: &str) -> Result<bool, DecodeError> {
	match text {
		"true" => Ok(true),
		"false" => Ok(false),
		other => Err(DecodeError::InvalidBoolean(other.to_owned())),
	}
}

/// Recognizes RFC 3339 timestamps and the general date/time pattern.
pub fn parse_date(text: &str) -> Option<DateTime<FixedOffset>> {
	if let Ok(date) = DateTime::parse_from_rfc3339(text) {
		// Whole microseconds only, and no leap second.
		let nanos = date.timestamp_subsec_nanos();
		if nanos % 1_000 != 0 || nanos >= 1_000_000_000 {
			return None;
		}
		let rendered = date.to_rfc3339_opts(SecondsFormat::AutoSi, text.ends_with('Z'));
		return (rendered == text).then_some(date);
	}

	let naive = NaiveDateTime::parse_from_str(text, GENERAL_PARSE).ok()?;
	if naive.format(GENERAL_RENDER).to_string() != text {
		return None;
	}
	Some(naive.and_utc().fixed_offset())
}

/// Renders a date the way [`parse_date`] reads it back.
pub fn format_date(date: &DateTime<FixedOffset>) -> String {
	let utc = date.offset().local_minus_utc() == 0;
	date.to_rfc3339_opts(SecondsFormat::AutoSi, utc)
}
