//! Typed element tree for interpreters without a native JSON codec.
//!
//! The legacy bridge never sees typed JSON values. It sees a tree of named
//! elements, each tagged with a [`NodeKind`] and holding its leaf content as
//! raw text, and rebuilds values by walking that tree. Object members named
//! `__*` carry serializer type hints and are not data.

use crate::{DecodeError, Record, Value, coerce};

/// Name given to the document element.
pub const ROOT: &str = "root";
/// Name given to array elements.
pub const ITEM: &str = "item";

/// Type tag carried by every tree element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
	String,
	Number,
	Boolean,
	Null,
	Array,
	Object,
}

impl NodeKind {
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::String => "string",
			Self::Number => "number",
			Self::Boolean => "boolean",
			Self::Null => "null",
			Self::Array => "array",
			Self::Object => "object",
		}
	}
}

/// One element of the intermediate tree.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeNode {
	pub name: String,
	pub kind: NodeKind,
	/// Leaf content; empty for arrays, objects and nulls.
	pub text: String,
	pub children: Vec<TreeNode>,
}

impl TreeNode {
	fn leaf(name: String, kind: NodeKind, text: String) -> Self {
		Self {
			name,
			kind,
			text,
			children: Vec::new(),
		}
	}

	fn branch(name: String, kind: NodeKind, children: Vec<TreeNode>) -> Self {
		Self {
			name,
			kind,
			text: String::new(),
			children,
		}
	}

	/// Parses structured text into a tree rooted at [`ROOT`].
	///
	/// Number leaves keep their literal text so coercion sees exactly what
	/// the producer wrote.
	pub fn parse(text: &str) -> Result<Self, DecodeError> {
		if text.trim().is_empty() {
			return Err(DecodeError::NoDocument);
		}
		let json: serde_json::Value = serde_json::from_str(text)?;
		Ok(Self::build(ROOT.to_owned(), json))
	}

	fn build(name: String, json: serde_json::Value) -> Self {
		match json {
			serde_json::Value::Null => Self::leaf(name, NodeKind::Null, String::new()),
			serde_json::Value::Bool(val) => Self::leaf(name, NodeKind::Boolean, val.to_string()),
			serde_json::Value::Number(num) => Self::leaf(name, NodeKind::Number, num.to_string()),
			serde_json::Value::String(val) => Self::leaf(name, NodeKind::String, val),
			serde_json::Value::Array(items) => {
				let children = items.into_iter().map(|item| Self::build(ITEM.to_owned(), item)).collect();
				Self::branch(name, NodeKind::Array, children)
			}
			serde_json::Value::Object(members) => {
				let children = members.into_iter().map(|(key, item)| Self::build(key, item)).collect();
				Self::branch(name, NodeKind::Object, children)
			}
		}
	}

	/// Walks the tree, coercing each leaf into a native value.
	///
	/// Objects come out as plain [`Record`]s and arrays as plain lists.
	pub fn into_value(self) -> Result<Value, DecodeError> {
		match self.kind {
			NodeKind::Null => Ok(Value::Nothing),
			NodeKind::Boolean => coerce::boolean(&self.text).map(Value::Bool),
			NodeKind::Number => coerce::number(&self.text),
			NodeKind::String => Ok(coerce::string(self.text)),
			NodeKind::Array => self.children.into_iter().map(Self::into_value).collect::<Result<Vec<_>, _>>().map(Value::List),
			NodeKind::Object => {
				let mut record = Record::with_capacity(self.children.len());
				for mut child in self.children {
					if child.name.starts_with("__") {
						continue;
					}
					let name = std::mem::take(&mut child.name);
					record.insert(name, child.into_value()?);
				}
				Ok(Value::Record(record))
			}
		}
	}
}
