//! Shared test helpers for workspace crates.

use std::path::{Path, PathBuf};

/// Resolve the workspace root path.
pub fn workspace_root() -> PathBuf {
	let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
	manifest_dir
		.join("..")
		.join("..")
		.canonicalize()
		.unwrap_or_else(|_| manifest_dir.join("..").join(".."))
}

/// Resolve a fixture path under `<workspace>/fixtures`.
pub fn fixture_path(name: &str) -> PathBuf {
	workspace_root().join("fixtures").join(name)
}

/// Read a fixture stream into memory.
pub fn fixture_bytes(name: &str) -> Vec<u8> {
	let path = fixture_path(name);
	std::fs::read(&path).unwrap_or_else(|err| panic!("fixture {} should be readable: {err}", path.display()))
}

/// Resolve the workspace target directory.
pub fn target_dir() -> PathBuf {
	std::env::var_os("CARGO_TARGET_DIR")
		.map(PathBuf::from)
		.unwrap_or_else(|| workspace_root().join("target"))
}

/// Byte builder for hand-written marshal streams.
///
/// Writes tags and payloads exactly as laid out on the wire so decoder tests
/// do not depend on any encoder in the crate under test.
#[derive(Debug, Default, Clone)]
pub struct Wire {
	bytes: Vec<u8>,
}

impl Wire {
	/// Start an empty stream.
	pub fn new() -> Self {
		Self::default()
	}

	/// Append one raw byte.
	pub fn byte(mut self, byte: u8) -> Self {
		self.bytes.push(byte);
		self
	}

	/// Append raw bytes verbatim.
	pub fn raw(mut self, bytes: &[u8]) -> Self {
		self.bytes.extend_from_slice(bytes);
		self
	}

	/// Append a `N` none value.
	pub fn none(self) -> Self {
		self.byte(b'N')
	}

	/// Append an `i` integer.
	pub fn int(self, value: i32) -> Self {
		self.byte(b'i').raw(&value.to_le_bytes())
	}

	/// Append a `g` float.
	pub fn float(self, value: f64) -> Self {
		self.byte(b'g').raw(&value.to_le_bytes())
	}

	/// Append an `s` string.
	pub fn str(self, value: &str) -> Self {
		self.string_with_tag(b's', value.as_bytes())
	}

	/// Append a string payload under an explicit tag.
	pub fn string_with_tag(self, tag: u8, value: &[u8]) -> Self {
		let len = i32::try_from(value.len()).expect("test string fits in i32");
		self.byte(tag).raw(&len.to_le_bytes()).raw(value)
	}

	/// Append a `[` list header declaring `count` elements.
	pub fn list(self, count: i32) -> Self {
		self.byte(b'[').raw(&count.to_le_bytes())
	}

	/// Append a `{` dict opener.
	pub fn dict(self) -> Self {
		self.byte(b'{')
	}

	/// Append the `0` dict stop tag.
	pub fn stop(self) -> Self {
		self.byte(b'0')
	}

	/// Append the `0x00` end-of-object marker.
	pub fn end(self) -> Self {
		self.byte(0)
	}

	/// Append a complete dict of text keys and text values.
	pub fn record(self, pairs: &[(&str, &str)]) -> Self {
		let mut wire = self.dict();
		for (key, value) in pairs {
			wire = wire.str(key).str(value);
		}
		wire.stop()
	}

	/// Finish and return the encoded bytes.
	pub fn build(self) -> Vec<u8> {
		self.bytes
	}
}
