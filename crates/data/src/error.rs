//! Error types for payload marshaling.

use thiserror::Error;

use crate::ValueType;

/// A value could not be turned into transit text.
///
/// Raised before any command text is generated.
#[derive(Debug, Error)]
pub enum EncodingError {
	/// JSON has no representation for NaN or infinities.
	#[error("cannot encode non-finite float {0}")]
	NonFiniteFloat(f64),

	/// A decimal rendered to text that is not a JSON number.
	#[error("cannot encode decimal {0} as a JSON number")]
	InvalidDecimal(String),

	/// Serialization of the assembled document failed.
	#[error("JSON serialization failed: {0}")]
	Json(#[from] serde_json::Error),
}

/// Inbound text could not be turned back into values.
///
/// Always an explicit failure so "no data" and "corrupted data" stay distinct.
#[derive(Debug, Error)]
pub enum DecodeError {
	/// The transit layer is not valid base64.
	#[error("payload is not valid base64: {0}")]
	Base64(#[from] base64::DecodeError),

	/// The decoded bytes are not UTF-8 text.
	#[error("payload is not valid UTF-8: {0}")]
	Utf8(#[from] std::string::FromUtf8Error),

	/// The structured text does not parse.
	#[error("malformed JSON: {0}")]
	Json(#[from] serde_json::Error),

	/// Nothing but whitespace was received.
	#[error("no parseable document in input")]
	NoDocument,

	/// A payload decoded to something other than a mapping.
	#[error("expected a top-level record, got {0}")]
	NotARecord(ValueType),

	/// A number leaf carries text that is not a numeric literal.
	#[error("invalid number literal '{0}'")]
	InvalidNumber(String),

	/// A boolean leaf carries text other than `true`/`false`.
	#[error("invalid boolean literal '{0}'")]
	InvalidBoolean(String),
}
