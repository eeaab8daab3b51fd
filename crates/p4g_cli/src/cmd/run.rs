use p4g::p4::{P4, Result, Runner};

use crate::cmd::print::{emit_json, print_records, record_json};

#[derive(clap::Args)]
pub struct Args {
	#[arg(long)]
	pub json: bool,
	/// Command and arguments passed to p4 after -G.
	#[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
	pub args: Vec<String>,
}

/// Run `p4 -G <args>` and print every record.
pub fn run(p4: &P4, args: Args) -> Result<()> {
	let Args { json, args } = args;

	let records = p4.run(&args)?;
	if json {
		let payload: Vec<_> = records.iter().map(record_json).collect();
		return emit_json(&payload);
	}

	print_records(&records);
	Ok(())
}
