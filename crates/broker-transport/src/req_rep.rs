use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio_util::sync::CancellationToken;

use broker_core::EngineHandle;
use broker_types::{Inbound, Outbound};

use crate::error::TransportError;

/// Accept loop for `REQ_EP`. Every accepted connection gets its own task
/// running a strict receive-one/reply-one cycle; the engine actor is the
/// only thing that ever mutates broker state.
pub async fn serve_req_rep(listener: TcpListener, handle: EngineHandle, debug: bool, cancel: CancellationToken) {
	loop {
		tokio::select! {
			() = cancel.cancelled() => {
				tracing::info!("req/rep listener shutting down");
				break;
			}
			accepted = listener.accept() => {
				match accepted {
					Ok((stream, peer)) => {
						let handle = handle.clone();
						let token = cancel.child_token();
						tracing::debug!(%peer, "req/rep connection accepted");
						tokio::spawn(async move {
							if let Err(error) = handle_connection(stream, handle, debug, token).await {
								tracing::warn!(%peer, %error, "req/rep connection ended");
							}
						});
					}
					Err(error) => {
						tracing::warn!(%error, "failed to accept req/rep connection");
					}
				}
			}
		}
	}
}

async fn handle_connection(stream: TcpStream, handle: EngineHandle, debug: bool, cancel: CancellationToken) -> Result<(), TransportError> {
	let (reader, mut writer) = stream.into_split();
	let mut lines = BufReader::new(reader).lines();

	loop {
		let line = tokio::select! {
			() = cancel.cancelled() => return Ok(()),
			line = lines.next_line() => line?,
		};

		let Some(line) = line else {
			return Ok(());
		};
		if line.trim().is_empty() {
			continue;
		}

		let reply = match serde_json::from_str::<Inbound>(&line) {
			Ok(message) => dispatch(&handle, message).await?,
			Err(error) => {
				tracing::warn!(%error, "malformed inbound message");
				if debug {
					return Err(error.into());
				}
				Outbound::Empty
			}
		};

		let mut encoded = serde_json::to_string(&reply)?;
		encoded.push('\n');
		writer.write_all(encoded.as_bytes()).await?;
		writer.flush().await?;
	}
}

async fn dispatch(handle: &EngineHandle, message: Inbound) -> Result<Outbound, TransportError> {
	use broker_core::RequestOutcome;

	let outbound = match message {
		Inbound::Request { resource, read, numopts, datasize } => match handle.request(resource, read, numopts, datasize).await? {
			RequestOutcome::Admitted(id) => Outbound::Admitted { id },
			RequestOutcome::Queued(id) => Outbound::Queued { id },
			RequestOutcome::Invalid(id) => Outbound::Invalid { id },
		},
		Inbound::Hold { id } => {
			if let Err(error) = handle.hold(id).await {
				tracing::warn!(id, %error, "hold protocol violation");
			}
			Outbound::Empty
		}
		Inbound::Release { id } => {
			if let Err(error) = handle.release(id).await {
				tracing::warn!(id, %error, "release protocol violation");
			}
			Outbound::Empty
		}
		Inbound::Config { config } => {
			let echoed = handle.set_config(config).await?;
			Outbound::Config(echoed)
		}
		Inbound::ReadConfig => Outbound::ReadConfig(handle.read_config().await?),
	};

	Ok(outbound)
}
