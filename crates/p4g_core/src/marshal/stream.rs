use crate::marshal::{Cursor, DecodeOptions, Result, Step, Value, decode_one};

/// Iterator over concatenated top-level values in one buffer.
///
/// Yields one item per record until the buffer is exhausted or an
/// end-of-object marker is read. The first error is yielded once and ends the
/// iteration; the stream is not resynchronised.
pub struct RecordIter<'a> {
	cursor: Cursor<'a>,
	options: DecodeOptions,
	done: bool,
}

impl<'a> RecordIter<'a> {
	/// Create an iterator starting at the beginning of `bytes`.
	pub fn new(bytes: &'a [u8], options: DecodeOptions) -> Self {
		Self {
			cursor: Cursor::new(bytes),
			options,
			done: false,
		}
	}

	/// Return current byte offset into the buffer.
	pub fn pos(&self) -> usize {
		self.cursor.pos()
	}

	/// Return the bytes not yet consumed.
	pub fn remainder(&self) -> &'a [u8] {
		self.cursor.rest()
	}
}

impl Iterator for RecordIter<'_> {
	type Item = Result<Value>;

	fn next(&mut self) -> Option<Self::Item> {
		if self.done {
			return None;
		}

		match decode_one(&mut self.cursor, &self.options) {
			Ok(Step::Value { value, .. }) => Some(Ok(value)),
			Ok(Step::EndOfStream) => {
				self.done = true;
				None
			}
			Err(err) => {
				self.done = true;
				Some(Err(err))
			}
		}
	}
}

impl std::iter::FusedIterator for RecordIter<'_> {}

/// Lazily decode every top-level value in `bytes`.
pub fn decode_stream(bytes: &[u8], options: DecodeOptions) -> RecordIter<'_> {
	RecordIter::new(bytes, options)
}

/// Decode every top-level value in `bytes`, failing on the first error.
pub fn decode_all(bytes: &[u8], options: DecodeOptions) -> Result<Vec<Value>> {
	decode_stream(bytes, options).collect()
}
