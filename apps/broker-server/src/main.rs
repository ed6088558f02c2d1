use clap::Parser;
use tokio_util::sync::CancellationToken;

use broker_core::AdmissionEngine;
use broker_server::{cli::Cli, config, shutdown, tracing_init};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
	dotenv::dotenv().ok();

	let cli = Cli::parse();
	tracing_init::init(cli.debug);

	let config = config::load(cli.config_file.as_deref())?;
	tracing::info!(?config, comm_port = cli.comm_port, debug = cli.debug, "starting broker");

	let engine_handle = AdmissionEngine::spawn(config);

	let cancel = CancellationToken::new();
	shutdown::spawn_signal_watcher(cancel.clone());

	broker_transport::serve(cli.comm_port, engine_handle, cli.debug, cancel).await?;

	tracing::info!("broker exited cleanly");
	Ok(())
}
