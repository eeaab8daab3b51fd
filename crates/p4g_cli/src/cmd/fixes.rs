use p4g::p4::{Fix, P4, Result, run_fixes};

use crate::cmd::describe::format_time;
use crate::cmd::print::emit_json;

#[derive(clap::Args)]
pub struct Args {
	#[arg(long)]
	pub json: bool,
	/// Arguments passed to `p4 fixes`.
	#[arg(trailing_var_arg = true, allow_hyphen_values = true)]
	pub args: Vec<String>,
}

/// List fixes as `job fixed by change` lines.
pub fn run(p4: &P4, args: Args) -> Result<()> {
	let Args { json, args } = args;

	let fixes = run_fixes(p4, &args)?;
	if json {
		let payload: Vec<_> = fixes.iter().map(FixJson::from).collect();
		return emit_json(&payload);
	}

	for fix in &fixes {
		println!(
			"{} fixed by change {} on {} by {}@{} ({})",
			fix.job,
			fix.change,
			format_time(fix.date).unwrap_or_else(|| "-".to_owned()),
			fix.user,
			fix.client,
			fix.status
		);
	}
	Ok(())
}

#[derive(serde::Serialize)]
struct FixJson<'a> {
	job: &'a str,
	change: i64,
	date: Option<String>,
	user: &'a str,
	client: &'a str,
	status: &'a str,
}

impl<'a> From<&'a Fix> for FixJson<'a> {
	fn from(fix: &'a Fix) -> Self {
		Self {
			job: &fix.job,
			change: fix.change,
			date: format_time(fix.date),
			user: &fix.user,
			client: &fix.client,
			status: &fix.status,
		}
	}
}
