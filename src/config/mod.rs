use std::path::PathBuf;

use log::Level;
use serde::Deserialize;
use thiserror::Error;

use crate::decode::DEFAULT_OFFICER_MARKER;

/// Runtime configuration for the harmonizer.
///
/// Values are loaded from (in order): the `/etc/sbor/harmonizer.json` file,
/// the same file under the user config folders (all optional), and
/// environment variables prefixed with `SBOR_` (e.g. `SBOR_OUTPUT_DIR`).
#[derive(Debug, Deserialize, PartialEq, Eq, Clone)]
#[serde(default)]
pub struct Settings {
	/// Directory receiving merged, decoded and report workbooks
	pub output_dir: PathBuf,
	pub log_level: Level,
	/// Emit JSON log lines instead of human-readable text
	pub log_json: bool,
	/// Program-field marker identifying officer rows during decoding
	pub officer_marker: String,
	// Input bounds enforced by the CLI before the engine runs
	pub max_files: usize,
	pub max_file_bytes: u64,
}

impl Default for Settings {
	fn default() -> Self {
		Self {
			output_dir: PathBuf::from("exports"),
			log_level: Level::Info,
			log_json: true,
			officer_marker: DEFAULT_OFFICER_MARKER.to_string(),
			max_files: 50,
			max_file_bytes: 20 * 1024 * 1024,
		}
	}
}

#[derive(Debug, Error)]
pub enum SettingsError {
	#[error("configuration error: {0}")]
	Config(#[from] config::ConfigError),
}

pub fn load() -> Result<Settings, SettingsError> {
	let mut builder = config::Config::builder()
		.add_source(config::File::with_name("/etc/sbor/harmonizer.json").required(false));

	if let Some(folder) = dirs::config_dir() {
		let user_config_path = folder.join("sbor").join("harmonizer.json");
		builder = builder.add_source(config::File::from(user_config_path).required(false));
	}
	if let Some(folder) = dirs::config_local_dir() {
		let local_config_path = folder.join("sbor").join("harmonizer.json");
		builder = builder.add_source(config::File::from(local_config_path).required(false));
	}

	builder = builder.add_source(config::Environment::with_prefix("SBOR").separator("__"));

	let cfg = builder.build()?;

	let mut s: Settings = cfg.try_deserialize()?;

	// Direct environment variables take precedence over whatever the
	// `config` crate mapped from them.
	if let Ok(dir) = std::env::var("SBOR_OUTPUT_DIR") {
		if !dir.is_empty() {
			s.output_dir = PathBuf::from(dir);
		}
	}
	if let Ok(l) = std::env::var("SBOR_LOG_LEVEL") {
		if let Ok(parsed) = l.parse::<Level>() {
			s.log_level = parsed;
		}
	}
	if let Ok(j) = std::env::var("SBOR_LOG_JSON") {
		if let Ok(parsed) = j.parse::<bool>() {
			s.log_json = parsed;
		}
	}
	if let Ok(m) = std::env::var("SBOR_OFFICER_MARKER") {
		if !m.is_empty() {
			s.officer_marker = m;
		}
	}
	if let Ok(n) = std::env::var("SBOR_MAX_FILES") {
		if let Ok(parsed) = n.parse::<usize>() {
			s.max_files = parsed;
		}
	}
	if let Ok(b) = std::env::var("SBOR_MAX_FILE_BYTES") {
		if let Ok(parsed) = b.parse::<u64>() {
			s.max_file_bytes = parsed;
		}
	}

	Ok(s)
}
