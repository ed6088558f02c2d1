use serde::{Deserialize, Serialize};

/// Per-resource ceilings. The same four numbers apply independently to every
/// resource name the broker ever sees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
	pub read_reqs: u64,
	pub read_data: u64,
	pub write_reqs: u64,
	pub write_data: u64,
}

impl Config {
	pub const FIELD_NAMES: [&'static str; 4] = ["read_reqs", "read_data", "write_reqs", "write_data"];

	/// Ceilings observed in the original deployment this broker replaces.
	#[must_use]
	pub const fn default_ceilings() -> Self {
		Self {
			read_reqs: 96,
			read_data: 200_000_000,
			write_reqs: 96,
			write_data: 150_000_000,
		}
	}

	/// Ceiling pair for the direction a request moves in.
	#[must_use]
	pub const fn ceiling_for(&self, read: bool) -> (u64, u64) {
		if read {
			(self.read_reqs, self.read_data)
		} else {
			(self.write_reqs, self.write_data)
		}
	}
}

impl Default for Config {
	fn default() -> Self {
		Self::default_ceilings()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn default_matches_original_deployment_ceilings() {
		let config = Config::default();
		assert_eq!(config.read_reqs, 96);
		assert_eq!(config.read_data, 200_000_000);
		assert_eq!(config.write_reqs, 96);
		assert_eq!(config.write_data, 150_000_000);
	}

	#[test]
	fn ceiling_for_selects_read_or_write_pair() {
		let config = Config {
			read_reqs: 1,
			read_data: 2,
			write_reqs: 3,
			write_data: 4,
		};
		assert_eq!(config.ceiling_for(true), (1, 2));
		assert_eq!(config.ceiling_for(false), (3, 4));
	}

	#[test]
	fn round_trips_through_json() {
		let config = Config::default();
		let encoded = serde_json::to_string(&config).unwrap();
		let decoded: Config = serde_json::from_str(&encoded).unwrap();
		assert_eq!(config, decoded);
	}
}
