use std::fs;
use std::path::PathBuf;

use p4g::marshal::{DecodeOptions, Value, decode_all};
use p4g::p4::Result;

use crate::cmd::print::{emit_json, render_record, value_json};

#[derive(clap::Args)]
pub struct Args {
	/// File holding captured `p4 -G` stdout.
	pub path: PathBuf,
	#[arg(long)]
	pub json: bool,
	/// Maximum container nesting depth.
	#[arg(long, default_value_t = DecodeOptions::default().max_depth)]
	pub max_depth: u32,
}

/// Decode a captured marshal stream and print each top-level value.
pub fn run(args: Args) -> Result<()> {
	let Args { path, json, max_depth } = args;

	let bytes = fs::read(&path)?;
	let values = decode_all(&bytes, DecodeOptions { max_depth })?;

	if json {
		let payload: Vec<_> = values.iter().map(value_json).collect();
		return emit_json(&payload);
	}

	for value in &values {
		match value {
			Value::Dict(record) => print!("{}", render_record(record)),
			other => println!("{other}"),
		}
		println!();
	}
	Ok(())
}
