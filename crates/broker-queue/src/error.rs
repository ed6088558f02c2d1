use broker_types::RequestId;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, QueueError>;

/// Errors raised by the admission-state machine itself. These all correspond
/// to protocol violations — the caller (the admission engine) logs and
/// replies `{}` rather than propagating them to the client.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QueueError {
	#[error("hold for unknown or already-held id {id}")]
	UnknownPendingGrant { id: RequestId },

	#[error("release for unknown or already-released id {id}")]
	UnknownGranted { id: RequestId },
}
