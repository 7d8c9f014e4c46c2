use std::fmt;

use bigdecimal::BigDecimal;
use chrono::{DateTime, FixedOffset};

/// Insertion-ordered string-keyed mapping used by [`Value::Record`].
///
/// Lookups scan from the back, so when a key was pushed twice the later
/// binding wins. [`Record::insert`] never creates a second binding.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
	entries: Vec<Entry>,
}

#[derive(Debug, Clone, PartialEq)]
struct Entry {
	key: String,
	value: Value,
}

impl Record {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_capacity(capacity: usize) -> Self {
		Self {
			entries: Vec::with_capacity(capacity),
		}
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	fn position(&self, key: &str) -> Option<usize> {
		self.entries.iter().rposition(|entry| entry.key == key)
	}

	/// Appends a binding, even when `key` is already bound.
	pub fn push(&mut self, key: impl Into<String>, value: Value) {
		self.entries.push(Entry { key: key.into(), value });
	}

	/// Rebinds `key` where it already sits, or appends it.
	pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
		let key = key.into();
		match self.position(&key) {
			Some(idx) => Some(std::mem::replace(&mut self.entries[idx].value, value)),
			None => {
				self.entries.push(Entry { key, value });
				None
			}
		}
	}

	pub fn contains(&self, key: impl AsRef<str>) -> bool {
		self.position(key.as_ref()).is_some()
	}

	pub fn get(&self, key: impl AsRef<str>) -> Option<&Value> {
		let idx = self.position(key.as_ref())?;
		Some(&self.entries[idx].value)
	}

	pub fn get_mut(&mut self, key: impl AsRef<str>) -> Option<&mut Value> {
		let idx = self.position(key.as_ref())?;
		Some(&mut self.entries[idx].value)
	}

	/// Drops every binding whose key fails `keep`; survivors keep their order.
	pub fn retain_keys(&mut self, mut keep: impl FnMut(&str) -> bool) {
		self.entries.retain(|entry| keep(&entry.key));
	}

	pub fn keys(&self) -> impl Iterator<Item = &str> {
		self.entries.iter().map(|entry| entry.key.as_str())
	}

	/// Bindings in insertion order.
	pub fn iter(&self) -> Entries<'_> {
		Entries(self.entries.iter())
	}
}

/// Borrowing iterator over a [`Record`]'s bindings.
pub struct Entries<'a>(std::slice::Iter<'a, Entry>);

impl<'a> Iterator for Entries<'a> {
	type Item = (&'a str, &'a Value);

	fn next(&mut self) -> Option<Self::Item> {
		let entry = self.0.next()?;
		Some((entry.key.as_str(), &entry.value))
	}

	fn size_hint(&self) -> (usize, Option<usize>) {
		self.0.size_hint()
	}
}

impl ExactSizeIterator for Entries<'_> {}

impl<'a> IntoIterator for &'a Record {
	type Item = (&'a str, &'a Value);
	type IntoIter = Entries<'a>;

	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}

/// Owning iterator over a [`Record`]'s bindings.
pub struct IntoEntries(std::vec::IntoIter<Entry>);

impl Iterator for IntoEntries {
	type Item = (String, Value);

	fn next(&mut self) -> Option<Self::Item> {
		self.0.next().map(|Entry { key, value }| (key, value))
	}

	fn size_hint(&self) -> (usize, Option<usize>) {
		self.0.size_hint()
	}
}

impl ExactSizeIterator for IntoEntries {}

impl IntoIterator for Record {
	type Item = (String, Value);
	type IntoIter = IntoEntries;

	fn into_iter(self) -> Self::IntoIter {
		IntoEntries(self.entries.into_iter())
	}
}

/// Collects through [`Record::insert`], so repeated keys keep their first
/// position and their last value.
impl<K: Into<String>> FromIterator<(K, Value)> for Record {
	fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
		let iter = iter.into_iter();
		let mut record = Self::with_capacity(iter.size_hint().0);
		for (key, value) in iter {
			record.insert(key, value);
		}
		record
	}
}

/// A structured value as it crosses the remote shell boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
	Nothing,
	Bool(bool),
	Int(i64),
	Float(f64),
	/// Numeric text that neither `i64` nor `f64` reproduces exactly.
	Decimal(BigDecimal),
	String(String),
	Date(DateTime<FixedOffset>),
	List(Vec<Value>),
	Record(Record),
}

impl Value {
	pub fn string(val: impl Into<String>) -> Self {
		Self::String(val.into())
	}

	pub fn get_type(&self) -> ValueType {
		match self {
			Self::Nothing => ValueType::Nothing,
			Self::Bool(_) => ValueType::Bool,
			Self::Int(_) => ValueType::Int,
			Self::Float(_) => ValueType::Float,
			Self::Decimal(_) => ValueType::Decimal,
			Self::String(_) => ValueType::String,
			Self::Date(_) => ValueType::Date,
			Self::List(_) => ValueType::List,
			Self::Record(_) => ValueType::Record,
		}
	}

	pub fn is_nothing(&self) -> bool {
		matches!(self, Self::Nothing)
	}

	pub fn as_bool(&self) -> Result<bool, ValueTypeError> {
		match self {
			Self::Bool(val) => Ok(*val),
			other => Err(ValueTypeError::new("bool", other.get_type())),
		}
	}

	pub fn as_int(&self) -> Result<i64, ValueTypeError> {
		match self {
			Self::Int(val) => Ok(*val),
			other => Err(ValueTypeError::new("int", other.get_type())),
		}
	}

	pub fn as_float(&self) -> Result<f64, ValueTypeError> {
		match self {
			Self::Float(val) => Ok(*val),
			other => Err(ValueTypeError::new("float", other.get_type())),
		}
	}

	pub fn as_decimal(&self) -> Result<&BigDecimal, ValueTypeError> {
		match self {
			Self::Decimal(val) => Ok(val),
			other => Err(ValueTypeError::new("decimal", other.get_type())),
		}
	}

	pub fn as_str(&self) -> Result<&str, ValueTypeError> {
		match self {
			Self::String(val) => Ok(val),
			other => Err(ValueTypeError::new("string", other.get_type())),
		}
	}

	pub fn as_date(&self) -> Result<&DateTime<FixedOffset>, ValueTypeError> {
		match self {
			Self::Date(val) => Ok(val),
			other => Err(ValueTypeError::new("date", other.get_type())),
		}
	}

	pub fn as_list(&self) -> Result<&[Value], ValueTypeError> {
		match self {
			Self::List(vals) => Ok(vals),
			other => Err(ValueTypeError::new("list", other.get_type())),
		}
	}

	pub fn as_record(&self) -> Result<&Record, ValueTypeError> {
		match self {
			Self::Record(val) => Ok(val),
			other => Err(ValueTypeError::new("record", other.get_type())),
		}
	}

	pub fn into_record(self) -> Result<Record, Self> {
		match self {
			Self::Record(val) => Ok(val),
			other => Err(other),
		}
	}
}

impl From<bool> for Value {
	fn from(val: bool) -> Self {
		Self::Bool(val)
	}
}

impl From<i64> for Value {
	fn from(val: i64) -> Self {
		Self::Int(val)
	}
}

impl From<f64> for Value {
	fn from(val: f64) -> Self {
		Self::Float(val)
	}
}

impl From<&str> for Value {
	fn from(val: &str) -> Self {
		Self::String(val.to_owned())
	}
}

impl From<String> for Value {
	fn from(val: String) -> Self {
		Self::String(val)
	}
}

impl From<Record> for Value {
	fn from(val: Record) -> Self {
		Self::Record(val)
	}
}

impl From<Vec<Value>> for Value {
	fn from(vals: Vec<Value>) -> Self {
		Self::List(vals)
	}
}

/// Coarse value type used for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
	Nothing,
	Bool,
	Int,
	Float,
	Decimal,
	String,
	Date,
	List,
	Record,
}

impl fmt::Display for ValueType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self {
			Self::Nothing => "nothing",
			Self::Bool => "bool",
			Self::Int => "int",
			Self::Float => "float",
			Self::Decimal => "decimal",
			Self::String => "string",
			Self::Date => "date",
			Self::List => "list",
			Self::Record => "record",
		};
		f.write_str(name)
	}
}

/// Error returned by typed accessors like [`Value::as_record`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueTypeError {
	expected: &'static str,
	got: ValueType,
}

impl ValueTypeError {
	pub fn new(expected: &'static str, got: ValueType) -> Self {
		Self { expected, got }
	}
}

impl fmt::Display for ValueTypeError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "expected {}, got {}", self.expected, self.got)
	}
}

impl std::error::Error for ValueTypeError {}
