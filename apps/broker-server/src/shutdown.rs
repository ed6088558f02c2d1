use tokio_util::sync::CancellationToken;

/// Wait for Ctrl-C or SIGTERM, whichever comes first. On return, the caller
/// exits 0 (§6).
pub async fn wait_for_signal() {
	let ctrl_c = async {
		tokio::signal::ctrl_c().await.expect("failed to install ctrl-c handler");
	};

	#[cfg(unix)]
	let terminate = async {
		tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
			.expect("failed to install SIGTERM handler")
			.recv()
			.await;
	};

	#[cfg(not(unix))]
	let terminate = std::future::pending::<()>();

	tokio::select! {
		() = ctrl_c => tracing::info!("received SIGINT, shutting down"),
		() = terminate => tracing::info!("received SIGTERM, shutting down"),
	}
}

/// Spawn a task that cancels `token` once a shutdown signal arrives.
pub fn spawn_signal_watcher(token: CancellationToken) {
	tokio::spawn(async move {
		wait_for_signal().await;
		token.cancel();
	});
}
