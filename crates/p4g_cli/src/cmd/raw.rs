use std::io::{self, Write};

use p4g::p4::{P4, Result};

#[derive(clap::Args)]
pub struct Args {
	/// Command and arguments passed to p4.
	#[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
	pub args: Vec<String>,
}

/// Run `p4 <args>` and copy its output to stdout.
pub fn run(p4: &P4, args: Args) -> Result<()> {
	let data = p4.run_bytes(&args.args)?;
	let mut stdout = io::stdout().lock();
	stdout.write_all(&data)?;
	stdout.flush()?;
	Ok(())
}
