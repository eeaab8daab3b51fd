use std::path::PathBuf;

use p4g::p4::P4;

/// Connection overrides; unset values defer to the p4 environment.
///
/// Long forms only, so short flags such as `fixes -c <change>` reach p4.
#[derive(clap::Args, Debug)]
pub struct Connection {
	/// Server address passed as `-p`.
	#[arg(long, global = true)]
	pub port: Option<String>,
	/// User passed as `-u`.
	#[arg(long, global = true)]
	pub user: Option<String>,
	/// Client workspace passed as `-c`.
	#[arg(long, global = true)]
	pub client: Option<String>,
	/// Executable to run in place of `p4`.
	#[arg(long = "p4-bin", global = true, value_name = "PATH")]
	pub program: Option<PathBuf>,
}

impl Connection {
	/// Build the runner these flags describe.
	pub fn p4(&self) -> P4 {
		let mut p4 = P4::new();
		if let Some(port) = &self.port {
			p4 = p4.with_port(port.as_str());
		}
		if let Some(user) = &self.user {
			p4 = p4.with_user(user.as_str());
		}
		if let Some(client) = &self.client {
			p4 = p4.with_client(client.as_str());
		}
		if let Some(program) = &self.program {
			p4 = p4.with_program(program.as_path());
		}
		p4
	}
}
