use time::OffsetDateTime;

use crate::marshal::Dict;
use crate::p4::record::{number, string, timestamp};
use crate::p4::{Result, Runner, check_error};

/// One job/change link from `p4 fixes`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fix {
	/// Record code, normally `stat`.
	pub code: String,
	/// Fixing change number.
	pub change: i64,
	/// Client the fix was made from.
	pub client: String,
	/// When the fix was recorded.
	pub date: Option<OffsetDateTime>,
	/// Fixed job.
	pub job: String,
	/// Job status set by the fix.
	pub status: String,
	/// User who recorded the fix.
	pub user: String,
}

impl Fix {
	/// Map a decoded fixes record.
	pub fn from_record(record: &Dict) -> Result<Self> {
		Ok(Self {
			code: string(record, "code")?,
			change: number(record, "Change")?.unwrap_or_default(),
			client: string(record, "Client")?,
			date: timestamp(record, "Date")?,
			job: string(record, "Job")?,
			status: string(record, "Status")?,
			user: string(record, "User")?,
		})
	}
}

/// Run `p4 fixes <args>` and map every record.
///
/// An error record anywhere in the output fails the whole call.
pub fn run_fixes<R: Runner + ?Sized>(runner: &R, args: &[String]) -> Result<Vec<Fix>> {
	let mut full = vec!["fixes".to_owned()];
	full.extend_from_slice(args);

	runner
		.run(&full)?
		.iter()
		.map(|record| {
			check_error(record)?;
			Fix::from_record(record)
		})
		.collect()
}
