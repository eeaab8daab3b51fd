#[cfg(unix)]
use std::path::Path;
use std::path::PathBuf;
use std::process::{Command, Output};
use std::sync::OnceLock;

pub(crate) use p4g_testkit::fixture_path;
use p4g_testkit::target_dir as workspace_target_dir;

static P4G_BIN: OnceLock<PathBuf> = OnceLock::new();

pub(crate) fn run_p4g(args: &[&str]) -> Output {
	Command::new(p4g_bin()).args(args).output().expect("p4g command executes")
}

pub(crate) fn run_p4g_json(args: &[&str]) -> serde_json::Value {
	let output = run_p4g(args);
	assert!(
		output.status.success(),
		"p4g command failed with status={}: {}",
		output.status,
		String::from_utf8_lossy(&output.stderr)
	);
	serde_json::from_slice(&output.stdout).expect("stdout should be valid json")
}

/// Write a stand-in `p4` into `dir` that prints `fixture` and exits 0.
#[cfg(unix)]
pub(crate) fn fake_p4(dir: &Path, fixture: &Path) -> PathBuf {
	use std::fs;
	use std::os::unix::fs::PermissionsExt;

	let script = dir.join("p4");
	let body = format!(
		"#!/bin/sh\nprintf '%s\\n' \"$@\" > '{args}'\ncat '{fixture}'\n",
		args = dir.join("args.txt").display(),
		fixture = fixture.display(),
	);
	fs::write(&script, body).expect("script written");
	fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).expect("script made executable");
	script
}

#[cfg(unix)]
pub(crate) fn recorded_args(dir: &Path) -> Vec<String> {
	std::fs::read_to_string(dir.join("args.txt"))
		.expect("args recorded")
		.lines()
		.map(str::to_owned)
		.collect()
}

fn p4g_bin() -> &'static PathBuf {
	P4G_BIN.get_or_init(resolve_p4g_bin)
}

fn resolve_p4g_bin() -> PathBuf {
	if let Ok(path) = std::env::var("CARGO_BIN_EXE_p4g") {
		return PathBuf::from(path);
	}

	let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
	let mut bin = workspace_target_dir().join("debug");
	bin.push(if cfg!(windows) { "p4g.exe" } else { "p4g" });

	let status = Command::new("cargo")
		.current_dir(&manifest_dir)
		.args(["build", "--quiet", "--bin", "p4g"])
		.status()
		.expect("cargo build executes");
	assert!(status.success(), "failed to build p4g binary at {}", bin.display());

	bin
}
