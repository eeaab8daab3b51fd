use thiserror::Error;

/// Crate-local result type for marshal decoding.
pub type Result<T> = std::result::Result<T, MarshalError>;

/// Wire-format failures produced while decoding a marshal stream.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MarshalError {
	/// Not enough bytes remained for a fixed-size field or declared length.
	#[error("truncated input at offset {at}, need {need} bytes, remaining {rem}")]
	Truncated {
		/// Byte offset where the read was attempted.
		at: usize,
		/// Requested bytes.
		need: usize,
		/// Bytes still available.
		rem: usize,
	},
	/// A length or count prefix was negative.
	#[error("invalid length {len} at offset {at}")]
	InvalidLength {
		/// Offset of the length prefix.
		at: usize,
		/// Parsed signed length.
		len: i32,
	},
	/// Tag byte is not assigned, or is not valid where it appeared.
	#[error("unknown tag 0x{tag:02x} at offset {at}")]
	UnknownTag {
		/// Offset of the tag byte.
		at: usize,
		/// Offending tag byte.
		tag: u8,
	},
	/// Containers nested deeper than the configured limit.
	#[error("decode depth exceeded (max={max_depth})")]
	DepthExceeded {
		/// Configured depth ceiling.
		max_depth: u32,
	},
}
