use std::path::PathBuf;

use clap::Parser;

/// `broker-server <comm_port> [--config-file <path>] [--debug]`
///
/// The publish port is always `comm_port + 1`.
#[derive(Parser, Debug)]
#[command(name = "broker-server", version, about = "Admission-control broker for shared resource quotas")]
pub struct Cli {
	/// Port to listen on for request/reply traffic. The next port
	/// (comm_port + 1) is used for grant-notification publishing.
	pub comm_port: u16,

	/// Path to a JSON config file with exactly the four ceiling keys. When
	/// absent, built-in defaults are used.
	#[arg(long, env = "BROKER_CONFIG_FILE")]
	pub config_file: Option<PathBuf>,

	/// Enable per-message schema validation and verbose logging.
	#[arg(long, env = "BROKER_DEBUG")]
	pub debug: bool,
}
