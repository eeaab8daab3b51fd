//! Field access helpers over decoded `p4 -G` records.

use time::OffsetDateTime;

use crate::marshal::{Dict, Value};
use crate::p4::{P4Error, Result};

const ERROR_CODE: &str = "error";
const NO_CLIENT_SUFFIX: &str = " - must refer to client";

/// Return a `Server` error if `record` is an error record.
pub fn check_error(record: &Dict) -> Result<()> {
	if text(record, "code")? == Some(ERROR_CODE) {
		return Err(parse_error(record));
	}
	Ok(())
}

/// Convert an error record into a `Server` error.
///
/// Paths outside the client view are reported as a missing area rather than
/// echoing the server's client-mapping message.
pub fn parse_error(record: &Dict) -> P4Error {
	let data = record.get_str("data").and_then(Value::to_text_lossy).unwrap_or_default();
	let data = data.trim();

	let message = match data.split_once(NO_CLIENT_SUFFIX) {
		Some((path, _)) => format!("No such area '{path}', please check your path"),
		None => data.to_owned(),
	};
	P4Error::Server { message }
}

/// Text field, if present.
pub(crate) fn text<'a>(record: &'a Dict, field: &str) -> Result<Option<&'a str>> {
	match record.get_str(field) {
		None => Ok(None),
		Some(value) => value.as_str().map(Some).ok_or_else(|| P4Error::NotText { field: field.to_owned() }),
	}
}

/// Text field as an owned string, empty when absent.
pub(crate) fn string(record: &Dict, field: &str) -> Result<String> {
	Ok(text(record, field)?.unwrap_or_default().to_owned())
}

/// Integer field, from either an `int` value or decimal text.
pub(crate) fn number(record: &Dict, field: &str) -> Result<Option<i64>> {
	match record.get_str(field) {
		None => Ok(None),
		Some(Value::Int(value)) => Ok(Some(i64::from(*value))),
		Some(_) => {
			let Some(raw) = text(record, field)? else {
				return Ok(None);
			};
			raw.trim().parse::<i64>().map(Some).map_err(|_| P4Error::InvalidNumber {
				field: field.to_owned(),
				value: raw.to_owned(),
			})
		}
	}
}

/// Unix-seconds timestamp field.
pub(crate) fn timestamp(record: &Dict, field: &str) -> Result<Option<OffsetDateTime>> {
	let invalid = |value: String| P4Error::InvalidTimestamp {
		field: field.to_owned(),
		value,
	};

	let Some(seconds) = number(record, field).map_err(|err| match err {
		P4Error::InvalidNumber { value, .. } => invalid(value),
		other => other,
	})?
	else {
		return Ok(None);
	};

	OffsetDateTime::from_unix_timestamp(seconds)
		.map(Some)
		.map_err(|_| invalid(seconds.to_string()))
}
