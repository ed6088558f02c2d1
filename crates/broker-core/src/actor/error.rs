use broker_queue::QueueError;
use thiserror::Error;

/// Errors surfaced back to a transport connection by the engine handle. A
/// `QueueError` means the client sent a protocol violation (`hold`/`release`
/// for an id the engine doesn't know); `ActorUnavailable` means the engine
/// task has already shut down.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
	#[error(transparent)]
	Protocol(#[from] QueueError),

	#[error("admission engine is no longer running")]
	ActorUnavailable,
}
