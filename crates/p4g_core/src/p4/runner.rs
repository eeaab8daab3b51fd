use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use tracing::{debug, warn};

use crate::marshal::{DecodeOptions, Dict, decode_stream};
use crate::p4::{P4Error, Result, Spec, check_error, format_spec};

/// Anything that can run a `p4 -G` command and return its records.
pub trait Runner {
	/// Run `p4 -G <args>` and return every decoded record.
	fn run(&self, args: &[String]) -> Result<Vec<Dict>>;
}

/// Connection settings for invoking the `p4` executable.
///
/// Unset fields fall back to whatever `p4` resolves from its own environment
/// (`P4PORT`, `P4CONFIG`, and so on).
#[derive(Debug, Clone)]
pub struct P4 {
	port: Option<String>,
	user: Option<String>,
	client: Option<String>,
	program: PathBuf,
	decode: DecodeOptions,
}

impl Default for P4 {
	fn default() -> Self {
		Self {
			port: None,
			user: None,
			client: None,
			program: PathBuf::from("p4"),
			decode: DecodeOptions::default(),
		}
	}
}

impl P4 {
	/// Create a runner using `p4` from `PATH` and its ambient settings.
	pub fn new() -> Self {
		Self::default()
	}

	/// Set `P4PORT` (`-p`).
	pub fn with_port(mut self, port: impl Into<String>) -> Self {
		self.port = Some(port.into());
		self
	}

	/// Set `P4USER` (`-u`).
	pub fn with_user(mut self, user: impl Into<String>) -> Self {
		self.user = Some(user.into());
		self
	}

	/// Set `P4CLIENT` (`-c`).
	pub fn with_client(mut self, client: impl Into<String>) -> Self {
		self.client = Some(client.into());
		self
	}

	/// Use a different executable in place of `p4`.
	pub fn with_program(mut self, program: impl Into<PathBuf>) -> Self {
		self.program = program.into();
		self
	}

	/// Override decoder limits for `-G` output.
	pub fn with_decode_options(mut self, decode: DecodeOptions) -> Self {
		self.decode = decode;
		self
	}

	/// Executable that will be invoked.
	pub fn program(&self) -> &Path {
		&self.program
	}

	/// Global flags derived from the connection settings.
	pub fn global_args(&self) -> Vec<String> {
		let mut out = Vec::new();
		for (flag, value) in [("-p", &self.port), ("-u", &self.user), ("-c", &self.client)] {
			if let Some(value) = value.as_deref().filter(|item| !item.is_empty()) {
				out.push(flag.to_owned());
				out.push(value.to_owned());
			}
		}
		out
	}

	fn command(&self, marshal: bool, args: &[String]) -> Command {
		let mut command = Command::new(&self.program);
		command.args(self.global_args());
		if marshal {
			command.arg("-G");
		}
		command.args(args);
		command
	}

	fn output(&self, mut command: Command, args: &[String]) -> Result<Output> {
		debug!(program = %self.program.display(), args = ?args, "running p4");
		command.output().map_err(|source| self.spawn_error(source))
	}

	fn spawn_error(&self, source: io::Error) -> P4Error {
		P4Error::Spawn {
			program: self.program.display().to_string(),
			source,
		}
	}

	/// Run `p4 <args>` without `-G` and return stdout followed by stderr.
	pub fn run_bytes(&self, args: &[String]) -> Result<Vec<u8>> {
		let output = self.output(self.command(false, args), args)?;
		if !output.status.success() {
			return Err(command_failed(args, &output));
		}

		let mut data = output.stdout;
		data.extend_from_slice(&output.stderr);
		Ok(data)
	}

	/// Fetch a spec form with `p4 <spec_type> -o <args>`.
	///
	/// The `code` field is dropped so the result can be passed back to
	/// [`P4::save`].
	pub fn fetch(&self, spec_type: &str, args: &[String]) -> Result<Spec> {
		let mut full = vec![spec_type.to_owned(), "-o".to_owned()];
		full.extend_from_slice(args);

		let record = self
			.run(&full)?
			.into_iter()
			.next()
			.ok_or_else(|| P4Error::EmptySpec { spec_type: spec_type.to_owned() })?;
		check_error(&record)?;

		Ok(record
			.iter()
			.filter_map(|(key, value)| {
				let key = key.to_text_lossy()?.into_owned();
				(key != "code").then(|| (key, value.to_string()))
			})
			.collect())
	}

	/// Save a spec form with `p4 -G <spec_type> -i <args>`.
	pub fn save(&self, spec_type: &str, spec: &Spec, args: &[String]) -> Result<Vec<Dict>> {
		let mut full = vec![spec_type.to_owned(), "-i".to_owned()];
		full.extend_from_slice(args);

		let mut command = self.command(true, &full);
		command.stdin(Stdio::piped()).stdout(Stdio::piped()).stderr(Stdio::piped());
		debug!(program = %self.program.display(), args = ?full, "running p4 with spec input");
		let mut child = command.spawn().map_err(|source| self.spawn_error(source))?;

		if let Some(mut stdin) = child.stdin.take() {
			if let Err(err) = stdin.write_all(format_spec(spec).as_bytes()) {
				if err.kind() != io::ErrorKind::BrokenPipe {
					drop(stdin);
					let _ = child.kill();
					let _ = child.wait();
					return Err(err.into());
				}
				// p4 stopped reading; its stdout may still hold an error record.
				warn!(error = %err, "p4 closed stdin before reading the whole spec");
			}
		}
		let output = child.wait_with_output()?;
		self.finish(&full, output)
	}

	fn finish(&self, args: &[String], output: Output) -> Result<Vec<Dict>> {
		let records = records_from_output(&output.stdout, self.decode)?;
		if !output.status.success() {
			if records.is_empty() {
				return Err(command_failed(args, &output));
			}
			warn!(status = %output.status, records = records.len(), "p4 exited unsuccessfully");
		}
		debug!(records = records.len(), "decoded p4 output");
		Ok(records)
	}
}

impl Runner for P4 {
	fn run(&self, args: &[String]) -> Result<Vec<Dict>> {
		let output = self.output(self.command(true, args), args)?;
		self.finish(args, output)
	}
}

/// Decode captured `p4 -G` stdout into records.
///
/// Every top-level value must be a dict.
pub fn records_from_output(stdout: &[u8], options: DecodeOptions) -> Result<Vec<Dict>> {
	decode_stream(stdout, options)
		.enumerate()
		.map(|(index, item)| {
			item?.into_dict().map_err(|other| P4Error::UnexpectedRecord { index, kind: other.kind() })
		})
		.collect()
}

fn command_failed(args: &[String], output: &Output) -> P4Error {
	P4Error::CommandFailed {
		args: args.join(" "),
		status: output.status.to_string(),
		stderr: String::from_utf8_lossy(&output.stderr).trim().to_owned(),
	}
}

#[cfg(test)]
mod tests;
