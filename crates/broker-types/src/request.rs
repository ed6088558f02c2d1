use serde::{Deserialize, Serialize};

/// Broker-assigned request identifier. Strictly increasing and unique over
/// the process lifetime.
pub type RequestId = u64;

/// A single admitted or queued client request, as recorded by the broker
/// under its assigned id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
	pub id: RequestId,
	pub resource: String,
	pub read: bool,
	pub numopts: u64,
	pub datasize: u64,

	/// Reserved for future per-request scheduling. Always 0 today; every
	/// request is treated identically regardless of this field.
	#[serde(default)]
	pub priority: u8,
}

impl Request {
	#[must_use]
	pub fn numopts_datasize(&self) -> (u64, u64) {
		(self.numopts, self.datasize)
	}
}
