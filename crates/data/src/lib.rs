//! Data boundary for psrun.
//!
//! This crate defines the compact value model that task arguments and task
//! output are expressed in, and the bridge that moves those values across a
//! text-only remote shell:
//!
//! * [`encode_payload`] serializes a [`Record`] to canonical JSON and wraps it
//!   in single-line base64 so it can sit inside a quoted literal.
//! * [`decode_payload`] and [`decode_document`] reverse that on the receiving
//!   side, either through `serde_json` directly ([`Codec::Native`]) or through
//!   the typed element tree used by interpreters without a JSON codec
//!   ([`Codec::LegacyTree`]).
//!
//! Both decoders share the leaf coercions in [`coerce`]: integers win over
//! floats, floats over arbitrary-precision decimals, and date-shaped strings
//! become [`Value::Date`].

pub mod coerce;
mod error;
mod marshal;
pub mod tree;
mod value;

pub use error::{DecodeError, EncodingError};
pub use marshal::{Codec, EncodedPayload, decode_document, decode_payload, encode_json, encode_payload, from_json, to_json};
pub use value::{Entries, IntoEntries, Record, Value, ValueType, ValueTypeError};
