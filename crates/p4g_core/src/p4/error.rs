use std::io;

use thiserror::Error;

use crate::marshal::MarshalError;

/// Crate-local result type for Perforce operations.
pub type Result<T> = std::result::Result<T, P4Error>;

/// Errors produced while running `p4` and mapping its records.
#[derive(Debug, Error)]
pub enum P4Error {
	/// Filesystem or pipe IO failure.
	#[error("io: {0}")]
	Io(#[from] io::Error),
	/// The `p4` executable could not be started.
	#[error("failed to start {program}: {source}")]
	Spawn {
		/// Program that was invoked.
		program: String,
		/// Underlying spawn failure.
		source: io::Error,
	},
	/// Output stream was not valid marshal data.
	#[error("malformed p4 -G output: {0}")]
	Marshal(#[from] MarshalError),
	/// `p4` exited unsuccessfully without producing records.
	#[error("p4 {args} failed ({status}): {stderr}")]
	CommandFailed {
		/// Space-joined command arguments.
		args: String,
		/// Rendered exit status.
		status: String,
		/// Captured standard error, lossily decoded.
		stderr: String,
	},
	/// A top-level value in the output stream was not a dict.
	#[error("record {index} is a {kind}, expected dict")]
	UnexpectedRecord {
		/// Zero-based record position.
		index: usize,
		/// Kind label of the value found.
		kind: &'static str,
	},
	/// Server reported an error record.
	#[error("P4Error -> {message}")]
	Server {
		/// Message taken from the record's `data` field.
		message: String,
	},
	/// Spec fetch produced no form.
	#[error("p4 {spec_type} -o returned no records")]
	EmptySpec {
		/// Spec type requested.
		spec_type: String,
	},
	/// Field was present but not UTF-8 text.
	#[error("field {field} is not text")]
	NotText {
		/// Field name.
		field: String,
	},
	/// Field did not parse as an integer.
	#[error("failed to parse {field} {value:?} as a number")]
	InvalidNumber {
		/// Field name.
		field: String,
		/// Raw field text.
		value: String,
	},
	/// Field did not hold a valid unix timestamp.
	#[error("failed to parse {field} {value:?} as a unix timestamp")]
	InvalidTimestamp {
		/// Field name.
		field: String,
		/// Raw field text.
		value: String,
	},
}
