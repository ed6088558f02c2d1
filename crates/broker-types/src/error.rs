use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
	#[error("malformed or unknown message: {0}")]
	ProtocolViolation(String),

	#[error("config object must have exactly the keys {expected:?}")]
	InvalidConfigKeys { expected: &'static [&'static str] },
}
