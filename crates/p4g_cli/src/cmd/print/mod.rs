use std::fmt::Write as _;
use std::io::{self, Write};

use p4g::marshal::{Dict, Value};
use p4g::p4::Result;
use serde::Serialize;
use serde_json::{Map, Number};

/// Render one record as `key: value` lines in wire order.
pub fn render_record(record: &Dict) -> String {
	let mut out = String::new();
	for (key, value) in record {
		let _ = writeln!(out, "{key}: {value}");
	}
	out
}

/// Print records separated by blank lines.
pub fn print_records<'a>(records: impl IntoIterator<Item = &'a Dict>) {
	for record in records {
		print!("{}", render_record(record));
		println!();
	}
}

/// Convert a decoded value to JSON.
///
/// Byte strings become lossy UTF-8 text, non-finite floats become `null`, and
/// dict keys are rendered as text.
pub fn value_json(value: &Value) -> serde_json::Value {
	match value {
		Value::Null => serde_json::Value::Null,
		Value::Int(v) => serde_json::Value::Number(Number::from(*v)),
		Value::Float(v) => Number::from_f64(*v).map_or(serde_json::Value::Null, serde_json::Value::Number),
		Value::Bytes(bytes) => serde_json::Value::String(String::from_utf8_lossy(bytes).into_owned()),
		Value::List(items) => serde_json::Value::Array(items.iter().map(value_json).collect()),
		Value::Dict(dict) => record_json(dict),
	}
}

/// Convert a record to a JSON object preserving key order.
pub fn record_json(record: &Dict) -> serde_json::Value {
	let mut map = Map::new();
	for (key, value) in record {
		map.insert(key.to_string(), value_json(value));
	}
	serde_json::Value::Object(map)
}

/// Write pretty JSON to stdout.
pub fn emit_json<T: Serialize>(payload: &T) -> Result<()> {
	let mut stdout = io::stdout().lock();
	serde_json::to_writer_pretty(&mut stdout, payload).map_err(io::Error::from)?;
	writeln!(stdout)?;
	Ok(())
}
