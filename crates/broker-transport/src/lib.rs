pub mod error;
pub mod publish;
pub mod req_rep;

pub use error::{Result, TransportError};

use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

use broker_core::EngineHandle;

/// Bind both endpoints and run their accept loops until `cancel` fires.
/// The publish port is always `comm_port + 1` (§6).
pub async fn serve(comm_port: u16, handle: EngineHandle, debug: bool, cancel: CancellationToken) -> std::io::Result<()> {
	let req_rep_listener = TcpListener::bind(("0.0.0.0", comm_port)).await?;
	let pub_listener = TcpListener::bind(("0.0.0.0", comm_port + 1)).await?;

	tracing::info!(comm_port, pub_port = comm_port + 1, "broker transport listening");

	tokio::join!(
		req_rep::serve_req_rep(req_rep_listener, handle.clone(), debug, cancel.clone()),
		publish::serve_pub(pub_listener, handle, cancel),
	);

	Ok(())
}
