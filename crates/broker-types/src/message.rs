use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::request::RequestId;

/// A message a client sends to the broker on `REQ_EP`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Inbound {
	Request {
		resource: String,
		read: bool,
		numopts: u64,
		datasize: u64,
	},
	Hold {
		id: RequestId,
	},
	Release {
		id: RequestId,
	},
	Config {
		config: Config,
	},
	ReadConfig,
}

/// A reply the broker sends back on `REQ_EP`. Shapes differ per inbound type
/// (some are bare `{}`, `config` echoes the config object with no wrapper),
/// so this is serialized by hand rather than derived.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outbound {
	Admitted { id: RequestId },
	Queued { id: RequestId },
	Invalid { id: RequestId },
	Empty,
	Config(Config),
	ReadConfig(Config),
}

impl Serialize for Outbound {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: serde::Serializer,
	{
		use serde::ser::SerializeMap;

		match self {
			Outbound::Admitted { id } => {
				let mut map = serializer.serialize_map(Some(2))?;
				map.serialize_entry("id", id)?;
				map.serialize_entry("available", &true)?;
				map.end()
			}
			Outbound::Queued { id } => {
				let mut map = serializer.serialize_map(Some(2))?;
				map.serialize_entry("id", id)?;
				map.serialize_entry("available", &false)?;
				map.end()
			}
			Outbound::Invalid { id } => {
				let mut map = serializer.serialize_map(Some(2))?;
				map.serialize_entry("id", id)?;
				map.serialize_entry("invalid", &true)?;
				map.end()
			}
			Outbound::Empty => {
				let map = serializer.serialize_map(Some(0))?;
				map.end()
			}
			Outbound::Config(config) => config.serialize(serializer),
			Outbound::ReadConfig(config) => {
				let mut map = serializer.serialize_map(Some(2))?;
				map.serialize_entry("type", "read-config")?;
				map.serialize_entry("config", config)?;
				map.end()
			}
		}
	}
}

/// The grant notification published on `PUB_EP`: `"<id> 1"`.
#[must_use]
pub fn publish_line(id: RequestId) -> String {
	format!("{id} 1")
}
