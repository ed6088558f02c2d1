use broker_core::EngineError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, TransportError>;

#[derive(Debug, Error)]
pub enum TransportError {
	#[error("io error: {0}")]
	Io(#[from] std::io::Error),

	#[error("malformed json: {0}")]
	Json(#[from] serde_json::Error),

	#[error(transparent)]
	Engine(#[from] EngineError),
}
