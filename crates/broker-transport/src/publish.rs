use tokio::io::AsyncWriteExt;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;

use broker_core::EngineHandle;

/// Accept loop for `PUB_EP`. Every connected subscriber gets every grant
/// notification broadcast by the engine; this is a plain fan-out, not a
/// topic-filtered subscription — subscribers filter by stringified id on
/// their own end, matching the original ZeroMQ PUB/SUB topic model.
pub async fn serve_pub(listener: TcpListener, handle: EngineHandle, cancel: CancellationToken) {
	loop {
		tokio::select! {
			() = cancel.cancelled() => {
				tracing::info!("pub listener shutting down");
				break;
			}
			accepted = listener.accept() => {
				match accepted {
					Ok((stream, peer)) => {
						let receiver = handle.subscribe_publishes();
						let token = cancel.child_token();
						tracing::debug!(%peer, "pub subscriber connected");
						tokio::spawn(async move {
							fan_out(stream, receiver, token).await;
						});
					}
					Err(error) => {
						tracing::warn!(%error, "failed to accept pub connection");
					}
				}
			}
		}
	}
}

async fn fan_out(mut stream: tokio::net::TcpStream, mut receiver: broadcast::Receiver<String>, cancel: CancellationToken) {
	loop {
		let line = tokio::select! {
			() = cancel.cancelled() => return,
			line = receiver.recv() => line,
		};

		match line {
			Ok(line) => {
				if stream.write_all(line.as_bytes()).await.is_err() || stream.write_all(b"\n").await.is_err() || stream.flush().await.is_err() {
					return;
				}
			}
			Err(broadcast::error::RecvError::Lagged(skipped)) => {
				// Republishing is idempotent (§4.3); a lagging subscriber
				// just misses some intermediate re-publish lines.
				tracing::debug!(skipped, "pub subscriber lagged, continuing");
			}
			Err(broadcast::error::RecvError::Closed) => return,
		}
	}
}
