use tokio::sync::oneshot;

use broker_types::{Config, RequestId};

use super::error::EngineError;

/// The outcome of a `request` message, ready to be translated into the wire
/// reply by the caller (the transport layer owns the wire shape).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestOutcome {
	Admitted(RequestId),
	Queued(RequestId),
	Invalid(RequestId),
}

/// Messages the admission-engine actor accepts. One variant per inbound
/// wire message type (§6), each carrying a reply channel for its response.
#[derive(Debug)]
pub enum EngineCommand {
	Request {
		resource: String,
		read: bool,
		numopts: u64,
		datasize: u64,
		reply: oneshot::Sender<RequestOutcome>,
	},
	Hold {
		id: RequestId,
		reply: oneshot::Sender<Result<(), EngineError>>,
	},
	Release {
		id: RequestId,
		reply: oneshot::Sender<Result<(), EngineError>>,
	},
	Config {
		config: Config,
		reply: oneshot::Sender<Config>,
	},
	ReadConfig {
		reply: oneshot::Sender<Config>,
	},
}
