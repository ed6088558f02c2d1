use std::path::Path;

use anyhow::{Context, Result};

use broker_types::Config;

/// Load the broker config from `path`, or fall back to
/// [`Config::default_ceilings`] when no path is given. A config file whose
/// key set doesn't match exactly is a fatal startup error (§6).
pub fn load(path: Option<&Path>) -> Result<Config> {
	let Some(path) = path else {
		return Ok(Config::default_ceilings());
	};

	let contents = std::fs::read_to_string(path).with_context(|| format!("reading config file {}", path.display()))?;

	serde_json::from_str(&contents).with_context(|| format!("config file {} does not have exactly the expected keys {:?}", path.display(), Config::FIELD_NAMES))
}
