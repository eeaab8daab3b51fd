use p4g_testkit::{Wire, fixture_bytes};

use crate::marshal::{DecodeOptions, MarshalError, Value};
use crate::p4::{P4, P4Error, records_from_output};

#[test]
fn records_from_output_collects_dicts() {
	let records = records_from_output(&fixture_bytes("changes.bin"), DecodeOptions::default()).expect("fixture decodes");
	assert_eq!(records.len(), 3);
	assert_eq!(records[2].get_str("change").and_then(Value::as_str), Some("1"));
}

#[test]
fn records_from_output_rejects_non_dict_records() {
	let bytes = Wire::new().record(&[("code", "stat")]).str("loose").build();
	let err = records_from_output(&bytes, DecodeOptions::default()).expect_err("string record rejected");
	assert!(matches!(err, P4Error::UnexpectedRecord { index: 1, kind: "bytes" }));
}

#[test]
fn records_from_output_propagates_decode_errors() {
	let bytes = Wire::new().record(&[("code", "stat")]).byte(b'?').build();
	let err = records_from_output(&bytes, DecodeOptions::default()).expect_err("bad tag rejected");
	assert!(matches!(err, P4Error::Marshal(MarshalError::UnknownTag { tag: b'?', .. })));
}

#[test]
fn global_args_skip_unset_and_empty_values() {
	assert!(P4::new().global_args().is_empty());

	let p4 = P4::new().with_port("localhost:1999").with_user("").with_client("gg");
	assert_eq!(p4.global_args(), ["-p", "localhost:1999", "-c", "gg"]);
}

#[test]
fn missing_program_is_a_spawn_error() {
	let p4 = P4::new().with_program("/nonexistent/p4g-test/p4");
	let err = p4.run_bytes(&["info".to_owned()]).expect_err("program does not exist");
	assert!(matches!(err, P4Error::Spawn { .. }));
}

#[cfg(unix)]
mod process {
	use std::fs;
	use std::os::unix::fs::PermissionsExt;
	use std::path::{Path, PathBuf};

	use p4g_testkit::fixture_path;
	use tempfile::TempDir;

	use crate::marshal::Value;
	use crate::p4::{P4, P4Error, Runner, Spec, check_error};

	/// Write a stand-in `p4` that records its arguments and stdin, prints a
	/// fixture, and exits with `code`.
	fn fake_p4(dir: &Path, fixture: &Path, code: i32) -> PathBuf {
		let script = dir.join("p4");
		let body = format!(
			"#!/bin/sh\nprintf '%s\\n' \"$@\" > '{args}'\ncat > '{stdin}'\ncat '{fixture}'\necho 'stderr text' >&2\nexit {code}\n",
			args = dir.join("args.txt").display(),
			stdin = dir.join("stdin.txt").display(),
			fixture = fixture.display(),
		);
		fs::write(&script, body).expect("script written");
		fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).expect("script made executable");
		script
	}

	fn recorded_args(dir: &Path) -> Vec<String> {
		fs::read_to_string(dir.join("args.txt"))
			.expect("args recorded")
			.lines()
			.map(str::to_owned)
			.collect()
	}

	fn args(items: &[&str]) -> Vec<String> {
		items.iter().map(|item| (*item).to_owned()).collect()
	}

	#[test]
	fn run_passes_global_flags_and_decodes_stdout() {
		let dir = TempDir::new().expect("tempdir");
		let p4 = P4::new().with_program(fake_p4(dir.path(), &fixture_path("changes.bin"), 0)).with_user("rcowham");

		let records = p4.run(&args(&["changes", "-m3"])).expect("run succeeds");
		assert_eq!(records.len(), 3);
		assert_eq!(recorded_args(dir.path()), ["-u", "rcowham", "-G", "changes", "-m3"]);
	}

	#[test]
	fn failed_exit_with_records_still_returns_records() {
		let dir = TempDir::new().expect("tempdir");
		let p4 = P4::new().with_program(fake_p4(dir.path(), &fixture_path("error.bin"), 1));

		let records = p4.run(&args(&["files", "//fake/depot/..."])).expect("records survive exit status");
		assert_eq!(records.len(), 1);
		assert_eq!(records[0].get_str("code").and_then(Value::as_str), Some("error"));
	}

	#[test]
	fn failed_exit_without_records_is_command_failed() {
		let dir = TempDir::new().expect("tempdir");
		let empty = dir.path().join("empty.bin");
		fs::write(&empty, b"").expect("empty fixture written");
		let script = fake_p4(dir.path(), &empty, 1);

		let err = P4::new().with_program(script).run(&args(&["info"])).expect_err("exit 1 without records");
		match err {
			P4Error::CommandFailed { args, stderr, .. } => {
				assert_eq!(args, "info");
				assert_eq!(stderr, "stderr text");
			}
			other => panic!("expected CommandFailed, got {other:?}"),
		}
	}

	#[test]
	fn run_bytes_returns_stdout_then_stderr() {
		let dir = TempDir::new().expect("tempdir");
		let p4 = P4::new().with_program(fake_p4(dir.path(), &fixture_path("info.bin"), 0));

		let data = p4.run_bytes(&args(&["info"])).expect("run_bytes succeeds");
		assert!(data.ends_with(b"stderr text\n"));
		assert_eq!(recorded_args(dir.path()), ["info"]);
	}

	#[test]
	fn fetch_drops_code_field() {
		let dir = TempDir::new().expect("tempdir");
		let p4 = P4::new().with_program(fake_p4(dir.path(), &fixture_path("info.bin"), 0));

		let spec = p4.fetch("client", &[]).expect("fetch succeeds");
		assert!(!spec.contains_key("code"));
		assert_eq!(spec.get("serverAddress").map(String::as_str), Some("unknown"));
		assert_eq!(recorded_args(dir.path()), ["-G", "client", "-o"]);
	}

	#[test]
	fn fetch_surfaces_error_records() {
		let dir = TempDir::new().expect("tempdir");
		let p4 = P4::new().with_program(fake_p4(dir.path(), &fixture_path("error.bin"), 1));

		let err = p4.fetch("client", &args(&["missing"])).expect_err("error record");
		assert!(matches!(err, P4Error::Server { .. }));
	}

	#[test]
	fn save_writes_formatted_spec_to_stdin() {
		let dir = TempDir::new().expect("tempdir");
		let p4 = P4::new().with_program(fake_p4(dir.path(), &fixture_path("fixes.bin"), 0)).with_client("test_ws");

		let mut spec = Spec::new();
		spec.insert("Client".to_owned(), "test_ws".to_owned());
		spec.insert("View".to_owned(), "//depot/... //test_ws/...\n".to_owned());

		let records = p4.save("client", &spec, &args(&["-f"])).expect("save succeeds");
		assert_eq!(records.len(), 1);
		assert_eq!(recorded_args(dir.path()), ["-c", "test_ws", "-G", "client", "-i", "-f"]);

		let stdin = fs::read_to_string(dir.path().join("stdin.txt")).expect("stdin recorded");
		assert_eq!(stdin, "Client: test_ws\n\nView:\n //depot/... //test_ws/...\n\n");
	}

	#[test]
	fn save_keeps_error_record_when_p4_closes_stdin_early() {
		let dir = TempDir::new().expect("tempdir");
		let script = dir.path().join("p4");
		let body = format!("#!/bin/sh\nexec 0<&-\ncat '{}'\nexit 1\n", fixture_path("error.bin").display());
		fs::write(&script, body).expect("script written");
		fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).expect("script made executable");

		let mut spec = Spec::new();
		spec.insert("Change".to_owned(), "new".to_owned());
		spec.insert("Description".to_owned(), "x".repeat(1 << 20));

		let records = P4::new()
			.with_program(script)
			.save("change", &spec, &[])
			.expect("error record survives the closed pipe");
		assert_eq!(records.len(), 1);
		assert_eq!(records[0].get_str("code").and_then(Value::as_str), Some("error"));
		assert!(matches!(check_error(&records[0]), Err(P4Error::Server { .. })));
	}
}
