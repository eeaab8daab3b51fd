mod bytes;
mod decode;
mod error;
mod stream;
mod value;

/// Bounded byte cursor used by the decoder.
pub use bytes::Cursor;
/// Single-value decode entry point and options.
pub use decode::{DecodeOptions, Step, decode_one};
/// Error and result aliases.
pub use error::{MarshalError, Result};
/// Lazy multi-record decoding.
pub use stream::{RecordIter, decode_all, decode_stream};
/// Decoded dynamic value types.
pub use value::{Dict, Value};
