use tracing_subscriber::EnvFilter;

/// Pretty, verbose output under `--debug`; structured JSON otherwise. Level
/// is still overridable via `RUST_LOG`.
pub fn init(debug: bool) {
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(if debug { "debug" } else { "info" }));

	let subscriber = tracing_subscriber::fmt().with_env_filter(filter);

	if debug {
		subscriber.pretty().init();
	} else {
		subscriber.json().init();
	}
}
