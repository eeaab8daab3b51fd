use crate::marshal::{MarshalError, Result};

/// Simple bounded cursor over an immutable byte slice.
///
/// The decoder only ever consumes from the front; the caller keeps the cursor
/// across repeated calls to walk a multi-record stream.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
	bytes: &'a [u8],
	pos: usize,
}

impl<'a> Cursor<'a> {
	/// Create a cursor at position 0.
	pub fn new(bytes: &'a [u8]) -> Self {
		Self { bytes, pos: 0 }
	}

	/// Return current byte offset.
	pub fn pos(&self) -> usize {
		self.pos
	}

	/// Return remaining unread bytes.
	pub fn remaining(&self) -> usize {
		self.bytes.len().saturating_sub(self.pos)
	}

	/// Return the unread tail without consuming it.
	pub fn rest(&self) -> &'a [u8] {
		self.bytes.get(self.pos..).unwrap_or(&[])
	}

	/// Read exactly `n` bytes and advance cursor.
	pub fn read_exact(&mut self, n: usize) -> Result<&'a [u8]> {
		if n > self.remaining() {
			return Err(MarshalError::Truncated {
				at: self.pos,
				need: n,
				rem: self.remaining(),
			});
		}

		let start = self.pos;
		self.pos += n;
		Ok(&self.bytes[start..self.pos])
	}

	/// Read one byte, or `None` when the input is exhausted.
	pub fn next_byte(&mut self) -> Option<u8> {
		let byte = self.bytes.get(self.pos).copied()?;
		self.pos += 1;
		Some(byte)
	}

	/// Read one byte.
	pub fn read_u8(&mut self) -> Result<u8> {
		let raw = self.read_exact(1)?;
		Ok(raw[0])
	}

	/// Read a little-endian `i32`.
	pub fn read_i32_le(&mut self) -> Result<i32> {
		let raw = self.read_exact(4)?;
		let mut buf = [0_u8; 4];
		buf.copy_from_slice(raw);
		Ok(i32::from_le_bytes(buf))
	}

	/// Read a little-endian IEEE-754 `f64`.
	pub fn read_f64_le(&mut self) -> Result<f64> {
		let raw = self.read_exact(8)?;
		let mut buf = [0_u8; 8];
		buf.copy_from_slice(raw);
		Ok(f64::from_le_bytes(buf))
	}

	/// Read a signed little-endian length prefix and reject negative values.
	pub fn read_len(&mut self) -> Result<usize> {
		let at = self.pos;
		let len = self.read_i32_le()?;
		usize::try_from(len).map_err(|_| MarshalError::InvalidLength { at, len })
	}
}
