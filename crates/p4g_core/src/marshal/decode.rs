use crate::marshal::{Cursor, Dict, MarshalError, Result, Value};

/// Decoder limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
	/// Maximum container nesting depth.
	pub max_depth: u32,
}

impl Default for DecodeOptions {
	fn default() -> Self {
		Self { max_depth: 64 }
	}
}

/// Outcome of one top-level decode call.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
	/// One complete value and the number of bytes it occupied.
	Value {
		/// Decoded value tree.
		value: Value,
		/// Bytes consumed from the cursor, tag included.
		consumed: usize,
	},
	/// No further top-level value: the input is exhausted or an
	/// end-of-object marker was read.
	EndOfStream,
}

/// Value kinds that can start a tagged unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
	Null,
	Int,
	Float,
	Str,
	Seq,
	Map,
}

/// Classified tag byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tag {
	Value(Kind),
	/// `'0'`: closes the innermost dict. Invalid anywhere else.
	MappingComplete,
	/// `0x00`: no further top-level objects. Invalid inside containers.
	StreamExhausted,
}

const TAG_NONE: u8 = b'N';
const TAG_INT: u8 = b'i';
const TAG_INT2: u8 = b'c';
const TAG_FLOAT: u8 = b'g';
const TAG_STRING: u8 = b's';
const TAG_UNICODE: u8 = b'u';
const TAG_TSTRING: u8 = b't';
const TAG_TUPLE: u8 = b'(';
const TAG_LIST: u8 = b'[';
const TAG_DICT: u8 = b'{';
const TAG_STOP: u8 = b'0';
const TAG_END: u8 = 0;

fn classify(byte: u8) -> Option<Tag> {
	Some(match byte {
		TAG_NONE => Tag::Value(Kind::Null),
		TAG_INT | TAG_INT2 => Tag::Value(Kind::Int),
		TAG_FLOAT => Tag::Value(Kind::Float),
		TAG_STRING | TAG_UNICODE | TAG_TSTRING => Tag::Value(Kind::Str),
		TAG_TUPLE | TAG_LIST => Tag::Value(Kind::Seq),
		TAG_DICT => Tag::Value(Kind::Map),
		TAG_STOP => Tag::MappingComplete,
		TAG_END => Tag::StreamExhausted,
		_ => return None,
	})
}

/// Decode the next top-level value from `cursor`.
///
/// Running out of input before a tag, or reading a leading `0x00`, reports
/// [`Step::EndOfStream`]. A bare `'0'` stop tag at top level is rejected as
/// [`MarshalError::UnknownTag`]. On error the cursor position is unspecified
/// and the stream should not be decoded further.
pub fn decode_one(cursor: &mut Cursor<'_>, options: &DecodeOptions) -> Result<Step> {
	let start = cursor.pos();
	let Some(byte) = cursor.next_byte() else {
		return Ok(Step::EndOfStream);
	};

	let kind = match classify(byte) {
		Some(Tag::Value(kind)) => kind,
		Some(Tag::StreamExhausted) => return Ok(Step::EndOfStream),
		Some(Tag::MappingComplete) | None => return Err(MarshalError::UnknownTag { at: start, tag: byte }),
	};

	let mut decoder = Decoder {
		cursor,
		max_depth: options.max_depth,
	};
	let value = decoder.read_value(kind, 0)?;
	Ok(Step::Value {
		value,
		consumed: decoder.cursor.pos() - start,
	})
}

struct Decoder<'c, 'a> {
	cursor: &'c mut Cursor<'a>,
	max_depth: u32,
}

impl Decoder<'_, '_> {
	/// Read a tag that must start a value, then its payload.
	fn read_tagged(&mut self, depth: u32) -> Result<Value> {
		let at = self.cursor.pos();
		let byte = self.cursor.read_u8()?;
		match classify(byte) {
			Some(Tag::Value(kind)) => self.read_value(kind, depth),
			_ => Err(MarshalError::UnknownTag { at, tag: byte }),
		}
	}

	fn read_value(&mut self, kind: Kind, depth: u32) -> Result<Value> {
		match kind {
			Kind::Null => Ok(Value::Null),
			Kind::Int => Ok(Value::Int(self.cursor.read_i32_le()?)),
			Kind::Float => Ok(Value::Float(self.cursor.read_f64_le()?)),
			Kind::Str => {
				let len = self.cursor.read_len()?;
				Ok(Value::Bytes(self.cursor.read_exact(len)?.to_vec()))
			}
			Kind::Seq => {
				let depth = self.enter(depth)?;
				self.read_list(depth)
			}
			Kind::Map => {
				let depth = self.enter(depth)?;
				self.read_dict(depth)
			}
		}
	}

	fn enter(&self, depth: u32) -> Result<u32> {
		if depth >= self.max_depth {
			return Err(MarshalError::DepthExceeded { max_depth: self.max_depth });
		}
		Ok(depth + 1)
	}

	fn read_list(&mut self, depth: u32) -> Result<Value> {
		let count = self.cursor.read_len()?;
		// Every element needs at least its tag byte.
		let mut items = Vec::with_capacity(count.min(self.cursor.remaining()));
		for _ in 0..count {
			items.push(self.read_tagged(depth)?);
		}
		debug_assert_eq!(items.len(), count);
		Ok(Value::List(items))
	}

	fn read_dict(&mut self, depth: u32) -> Result<Value> {
		let mut dict = Dict::new();
		loop {
			let at = self.cursor.pos();
			let byte = self.cursor.read_u8()?;
			let kind = match classify(byte) {
				Some(Tag::MappingComplete) => return Ok(Value::Dict(dict)),
				Some(Tag::Value(kind)) => kind,
				Some(Tag::StreamExhausted) | None => return Err(MarshalError::UnknownTag { at, tag: byte }),
			};

			let key = self.read_value(kind, depth)?;
			let value = self.read_tagged(depth)?;
			dict.insert(key, value);
		}
	}
}
