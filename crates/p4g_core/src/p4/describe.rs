use time::OffsetDateTime;

use crate::marshal::Dict;
use crate::p4::record::{number, string, text, timestamp};
use crate::p4::{Result, Runner, check_error};

/// One file revision listed by `p4 describe`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Revision {
	/// Action taken on the file (`add`, `edit`, ...).
	pub action: String,
	/// Revision number.
	pub rev: i64,
	/// Depot path.
	pub depot_file: String,
	/// File type (`text`, `binary+x`, ...).
	pub file_type: String,
	/// MD5 digest reported by the server.
	pub digest: String,
	/// File size in bytes.
	pub file_size: i64,
}

/// One job attached to a described change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobDescription {
	/// Job name.
	pub job: String,
	/// Job status.
	pub status: String,
}

/// Typed view of a `p4 describe` record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Describe {
	/// Record code, normally `stat`.
	pub code: String,
	/// Change number.
	pub change: i64,
	/// Change number before renumbering on submit.
	pub old_change: i64,
	/// `public` or `restricted`.
	pub change_type: String,
	/// Client workspace that owns the change.
	pub client: String,
	/// Change description.
	pub desc: String,
	/// Common depot path of the files in the change.
	pub path: String,
	/// Submit or last-update time.
	pub time: Option<OffsetDateTime>,
	/// `pending`, `shelved`, or `submitted`.
	pub status: String,
	/// Change owner.
	pub user: String,
	/// Attached jobs in index order.
	pub jobs: Vec<JobDescription>,
	/// Affected revisions in index order.
	pub revisions: Vec<Revision>,
}

/// Run `p4 describe <args>` and map the first record.
///
/// No output maps to an empty [`Describe`].
pub fn run_describe<R: Runner + ?Sized>(runner: &R, args: &[String]) -> Result<Describe> {
	let mut full = vec!["describe".to_owned()];
	full.extend_from_slice(args);

	let records = runner.run(&full)?;
	let Some(record) = records.first() else {
		return Ok(Describe::default());
	};
	check_error(record)?;
	Describe::from_record(record)
}

impl Describe {
	/// Map a decoded describe record.
	pub fn from_record(record: &Dict) -> Result<Self> {
		Ok(Self {
			code: string(record, "code")?,
			change: number(record, "change")?.unwrap_or_default(),
			old_change: number(record, "oldChange")?.unwrap_or_default(),
			change_type: string(record, "changeType")?,
			client: string(record, "client")?,
			desc: string(record, "desc")?,
			path: string(record, "path")?,
			time: timestamp(record, "time")?,
			status: string(record, "status")?,
			user: string(record, "user")?,
			jobs: jobs(record)?,
			revisions: revisions(record)?,
		})
	}
}

// Indexed fields run from 0 up to the first missing index.
fn jobs(record: &Dict) -> Result<Vec<JobDescription>> {
	let mut out = Vec::new();
	for idx in 0.. {
		let Some(job) = text(record, &format!("job{idx}"))? else {
			break;
		};
		out.push(JobDescription {
			job: job.to_owned(),
			status: string(record, &format!("jobstat{idx}"))?,
		});
	}
	Ok(out)
}

fn revisions(record: &Dict) -> Result<Vec<Revision>> {
	let mut out = Vec::new();
	for idx in 0.. {
		let Some(rev) = number(record, &format!("rev{idx}"))? else {
			break;
		};
		out.push(Revision {
			action: string(record, &format!("action{idx}"))?,
			rev,
			depot_file: string(record, &format!("depotFile{idx}"))?,
			file_type: string(record, &format!("type{idx}"))?,
			digest: string(record, &format!("digest{idx}"))?,
			file_size: number(record, &format!("fileSize{idx}"))?.unwrap_or_default(),
		});
	}
	Ok(out)
}
