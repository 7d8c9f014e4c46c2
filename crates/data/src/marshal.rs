use std::fmt;
use std::str::FromStr;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::tree::TreeNode;
use crate::{DecodeError, EncodingError, Record, Value, coerce};

/// Decoder used for inbound structured text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Codec {
	/// Direct JSON decoding.
	#[default]
	Native,
	/// Decoding through the typed element tree in [`crate::tree`].
	LegacyTree,
}

/// Transit-safe single-line text embedding an encoded document.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EncodedPayload(String);

impl EncodedPayload {
	pub fn as_str(&self) -> &str {
		&self.0
	}

	pub fn into_string(self) -> String {
		self.0
	}
}

impl fmt::Display for EncodedPayload {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

/// Converts a value into its canonical JSON form.
pub fn to_json(value: &Value) -> Result<serde_json::Value, EncodingError> {
	Ok(match value {
		Value::Nothing => serde_json::Value::Null,
		Value::Bool(val) => serde_json::Value::Bool(*val),
		Value::Int(val) => serde_json::Value::Number((*val).into()),
		Value::Float(val) => serde_json::Number::from_f64(*val)
			.map(serde_json::Value::Number)
			.ok_or(EncodingError::NonFiniteFloat(*val))?,
		Value::Decimal(val) => {
			let text = val.to_string();
			let num = serde_json::Number::from_str(&text).map_err(|_| EncodingError::InvalidDecimal(text))?;
			serde_json::Value::Number(num)
		}
		Value::String(val) => serde_json::Value::String(val.clone()),
		Value::Date(val) => serde_json::Value::String(coerce::format_date(val)),
		Value::List(vals) => serde_json::Value::Array(vals.iter().map(to_json).collect::<Result<_, _>>()?),
		Value::Record(record) => {
			let mut map = serde_json::Map::with_capacity(record.len());
			for (key, item) in record {
				map.insert(key.to_owned(), to_json(item)?);
			}
			serde_json::Value::Object(map)
		}
	})
}

/// Converts decoded JSON into a value, applying the shared leaf coercions.
pub fn from_json(json: serde_json::Value) -> Result<Value, DecodeError> {
	Ok(match json {
		serde_json::Value::Null => Value::Nothing,
		serde_json::Value::Bool(val) => Value::Bool(val),
		serde_json::Value::Number(num) => coerce::number(&num.to_string())?,
		serde_json::Value::String(val) => coerce::string(val),
		serde_json::Value::Array(items) => Value::List(items.into_iter().map(from_json).collect::<Result<_, _>>()?),
		serde_json::Value::Object(members) => {
			let mut record = Record::with_capacity(members.len());
			for (key, item) in members {
				record.insert(key, from_json(item)?);
			}
			Value::Record(record)
		}
	})
}

/// Serializes a value to compact JSON text.
pub fn encode_json(value: &Value) -> Result<String, EncodingError> {
	Ok(serde_json::to_string(&to_json(value)?)?)
}

/// Serializes a record and base64-encodes it for embedding in command text.
pub fn encode_payload(record: &Record) -> Result<EncodedPayload, EncodingError> {
	let json = encode_json(&Value::Record(record.clone()))?;
	Ok(EncodedPayload(STANDARD.encode(json)))
}

/// Decodes structured text with the chosen codec.
pub fn decode_document(text: &str, codec: Codec) -> Result<Value, DecodeError> {
	match codec {
		Codec::Native => {
			if text.trim().is_empty() {
				return Err(DecodeError::NoDocument);
			}
			from_json(serde_json::from_str(text)?)
		}
		Codec::LegacyTree => TreeNode::parse(text)?.into_value(),
	}
}

/// Reverses [`encode_payload`].
///
/// Whitespace inside the payload is ignored so line-wrapped base64 decodes too.
pub fn decode_payload(payload: &str, codec: Codec) -> Result<Record, DecodeError> {
	let compact: String = payload.chars().filter(|c| !c.is_ascii_whitespace()).collect();
	if compact.is_empty() {
		return Err(DecodeError::NoDocument);
	}
	let text = String::from_utf8(STANDARD.decode(compact)?)?;
	decode_document(&text, codec)?
		.into_record()
		.map_err(|other| DecodeError::NotARecord(other.get_type()))
}
