use p4g::p4::{Describe, P4, Result, run_describe};
use serde::Serialize;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::cmd::print::emit_json;

#[derive(clap::Args)]
pub struct Args {
	#[arg(long)]
	pub json: bool,
	/// Change number and any extra `p4 describe` flags.
	#[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
	pub args: Vec<String>,
}

/// Describe a change as a header, its jobs, and its revisions.
pub fn run(p4: &P4, args: Args) -> Result<()> {
	let Args { json, args } = args;

	let describe = run_describe(p4, &args)?;
	if json {
		return emit_json(&DescribeJson::from(&describe));
	}

	print!("{}", render_describe(&describe));
	Ok(())
}

/// RFC 3339 rendering of an optional server timestamp.
pub fn format_time(time: Option<OffsetDateTime>) -> Option<String> {
	time.and_then(|time| time.format(&Rfc3339).ok())
}

fn render_describe(describe: &Describe) -> String {
	let mut out = format!(
		"change {} by {}@{} on {} ({}, {})\n",
		describe.change,
		describe.user,
		describe.client,
		format_time(describe.time).unwrap_or_else(|| "-".to_owned()),
		describe.status,
		describe.change_type,
	);
	for line in describe.desc.lines() {
		out.push('\t');
		out.push_str(line);
		out.push('\n');
	}

	if !describe.jobs.is_empty() {
		out.push_str("\njobs:\n");
		for job in &describe.jobs {
			out.push_str(&format!("  {} ({})\n", job.job, job.status));
		}
	}

	if !describe.revisions.is_empty() {
		out.push_str("\nrevisions:\n");
		for rev in &describe.revisions {
			out.push_str(&format!(
				"  {}#{} {} {} {} bytes\n",
				rev.depot_file, rev.rev, rev.action, rev.file_type, rev.file_size
			));
		}
	}
	out
}

#[derive(Serialize)]
struct DescribeJson<'a> {
	change: i64,
	old_change: i64,
	change_type: &'a str,
	client: &'a str,
	user: &'a str,
	status: &'a str,
	path: &'a str,
	time: Option<String>,
	desc: &'a str,
	jobs: Vec<JobJson<'a>>,
	revisions: Vec<RevisionJson<'a>>,
}

#[derive(Serialize)]
struct JobJson<'a> {
	job: &'a str,
	status: &'a str,
}

#[derive(Serialize)]
struct RevisionJson<'a> {
	depot_file: &'a str,
	rev: i64,
	action: &'a str,
	file_type: &'a str,
	digest: &'a str,
	file_size: i64,
}

impl<'a> From<&'a Describe> for DescribeJson<'a> {
	fn from(describe: &'a Describe) -> Self {
		Self {
			change: describe.change,
			old_change: describe.old_change,
			change_type: &describe.change_type,
			client: &describe.client,
			user: &describe.user,
			status: &describe.status,
			path: &describe.path,
			time: format_time(describe.time),
			desc: &describe.desc,
			jobs: describe
				.jobs
				.iter()
				.map(|job| JobJson {
					job: &job.job,
					status: &job.status,
				})
				.collect(),
			revisions: describe
				.revisions
				.iter()
				.map(|rev| RevisionJson {
					depot_file: &rev.depot_file,
					rev: rev.rev,
					action: &rev.action,
					file_type: &rev.file_type,
					digest: &rev.digest,
					file_size: rev.file_size,
				})
				.collect(),
		}
	}
}
