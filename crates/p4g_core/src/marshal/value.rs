use std::borrow::Cow;
use std::fmt;
use std::hash::{Hash, Hasher};

use indexmap::IndexMap;

/// Dynamically typed value decoded from one tagged unit of the stream.
#[derive(Debug, Clone)]
pub enum Value {
	/// `N`: absence of a value.
	Null,
	/// `i` / `c`: signed 32-bit integer.
	Int(i32),
	/// `g`: IEEE-754 double.
	Float(f64),
	/// `s` / `u` / `t`: opaque byte string, usually text.
	Bytes(Vec<u8>),
	/// `(` / `[`: ordered sequence.
	List(Vec<Value>),
	/// `{`: key/value mapping.
	Dict(Dict),
}

impl Value {
	/// Build a byte-string value from text.
	pub fn text(value: impl Into<String>) -> Self {
		Self::Bytes(value.into().into_bytes())
	}

	/// Borrow a byte string as UTF-8, if it is one.
	pub fn as_str(&self) -> Option<&str> {
		match self {
			Self::Bytes(bytes) => std::str::from_utf8(bytes).ok(),
			_ => None,
		}
	}

	/// Borrow raw byte-string payload.
	pub fn as_bytes(&self) -> Option<&[u8]> {
		match self {
			Self::Bytes(bytes) => Some(bytes),
			_ => None,
		}
	}

	/// Byte string decoded lossily as UTF-8.
	pub fn to_text_lossy(&self) -> Option<Cow<'_, str>> {
		self.as_bytes().map(String::from_utf8_lossy)
	}

	/// Integer payload.
	pub fn as_int(&self) -> Option<i32> {
		match self {
			Self::Int(value) => Some(*value),
			_ => None,
		}
	}

	/// Float payload.
	pub fn as_float(&self) -> Option<f64> {
		match self {
			Self::Float(value) => Some(*value),
			_ => None,
		}
	}

	/// Sequence payload.
	pub fn as_list(&self) -> Option<&[Value]> {
		match self {
			Self::List(items) => Some(items),
			_ => None,
		}
	}

	/// Mapping payload.
	pub fn as_dict(&self) -> Option<&Dict> {
		match self {
			Self::Dict(dict) => Some(dict),
			_ => None,
		}
	}

	/// Consume into a mapping payload.
	pub fn into_dict(self) -> Result<Dict, Self> {
		match self {
			Self::Dict(dict) => Ok(dict),
			other => Err(other),
		}
	}

	/// Stable lowercase label for the value kind.
	pub fn kind(&self) -> &'static str {
		match self {
			Self::Null => "null",
			Self::Int(_) => "int",
			Self::Float(_) => "float",
			Self::Bytes(_) => "bytes",
			Self::List(_) => "list",
			Self::Dict(_) => "dict",
		}
	}
}

// Floats compare by bit pattern so values can key a `Dict`.
impl PartialEq for Value {
	fn eq(&self, other: &Self) -> bool {
		match (self, other) {
			(Self::Null, Self::Null) => true,
			(Self::Int(left), Self::Int(right)) => left == right,
			(Self::Float(left), Self::Float(right)) => left.to_bits() == right.to_bits(),
			(Self::Bytes(left), Self::Bytes(right)) => left == right,
			(Self::List(left), Self::List(right)) => left == right,
			(Self::Dict(left), Self::Dict(right)) => left == right,
			_ => false,
		}
	}
}

impl Eq for Value {}

impl Hash for Value {
	fn hash<H: Hasher>(&self, state: &mut H) {
		std::mem::discriminant(self).hash(state);
		match self {
			Self::Null => {}
			Self::Int(value) => value.hash(state),
			Self::Float(value) => value.to_bits().hash(state),
			Self::Bytes(bytes) => bytes.hash(state),
			Self::List(items) => items.hash(state),
			Self::Dict(dict) => dict.hash(state),
		}
	}
}

impl From<&str> for Value {
	fn from(value: &str) -> Self {
		Self::text(value)
	}
}

impl From<i32> for Value {
	fn from(value: i32) -> Self {
		Self::Int(value)
	}
}

impl fmt::Display for Value {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Null => f.write_str("None"),
			Self::Int(value) => write!(f, "{value}"),
			Self::Float(value) => write!(f, "{value}"),
			Self::Bytes(bytes) => f.write_str(&String::from_utf8_lossy(bytes)),
			Self::List(items) => {
				f.write_str("[")?;
				for (idx, item) in items.iter().enumerate() {
					if idx > 0 {
						f.write_str(", ")?;
					}
					write!(f, "{item}")?;
				}
				f.write_str("]")
			}
			Self::Dict(dict) => {
				f.write_str("{")?;
				for (idx, (key, value)) in dict.iter().enumerate() {
					if idx > 0 {
						f.write_str(", ")?;
					}
					write!(f, "{key}: {value}")?;
				}
				f.write_str("}")
			}
		}
	}
}

/// Key-unique mapping that keeps first-insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dict {
	entries: IndexMap<Value, Value>,
}

impl Dict {
	/// Create an empty mapping.
	pub fn new() -> Self {
		Self::default()
	}

	/// Insert a pair; an equal key keeps its position and takes the new value.
	pub fn insert(&mut self, key: Value, value: Value) -> Option<Value> {
		self.entries.insert(key, value)
	}

	/// Look up by arbitrary key value.
	pub fn get(&self, key: &Value) -> Option<&Value> {
		self.entries.get(key)
	}

	/// Look up by text key.
	pub fn get_str(&self, key: &str) -> Option<&Value> {
		self.entries.get(&Value::text(key))
	}

	/// Whether a text key is present.
	pub fn contains_key(&self, key: &str) -> bool {
		self.get_str(key).is_some()
	}

	/// Number of entries.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Whether the mapping has no entries.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Iterate entries in insertion order.
	pub fn iter(&self) -> indexmap::map::Iter<'_, Value, Value> {
		self.entries.iter()
	}
}

// Entry order does not take part in equality, so only the length is hashed.
impl Hash for Dict {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.entries.len().hash(state);
	}
}

impl<'a> IntoIterator for &'a Dict {
	type Item = (&'a Value, &'a Value);
	type IntoIter = indexmap::map::Iter<'a, Value, Value>;

	fn into_iter(self) -> Self::IntoIter {
		self.entries.iter()
	}
}

impl<K: Into<Value>, V: Into<Value>> FromIterator<(K, V)> for Dict {
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		let mut dict = Self::new();
		for (key, value) in iter {
			dict.insert(key.into(), value.into());
		}
		dict
	}
}
