use log::Level;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Build the level filter: `RUST_LOG` wins when set, otherwise the
/// configured level applies to every target.
pub fn env_filter(level: Level) -> EnvFilter {
	let fallback = level.as_str().to_lowercase();
	EnvFilter::try_from_default_env()
		.or_else(|_| EnvFilter::try_new(&fallback))
		.unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Initialize logging to stderr, as JSON lines or human-readable text.
/// Stdout is left to command results.
pub fn init_logging(level: Level, json: bool) -> anyhow::Result<()> {
	let registry = tracing_subscriber::registry().with(env_filter(level));

	let result = if json {
		let json_layer = tracing_subscriber::fmt::layer()
			.json()
			.with_writer(std::io::stderr)
			.with_current_span(true)
			.with_target(true)
			.with_level(true)
			.with_file(true)
			.with_line_number(true);
		registry.with(json_layer).try_init()
	} else {
		let text_layer = tracing_subscriber::fmt::layer()
			.with_writer(std::io::stderr)
			.with_target(false);
		registry.with(text_layer).try_init()
	};

	result.map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))
}

// Installs the process-global subscriber.
#[cfg(test)]
#[cfg(feature = "unit-tests")]
mod tests {
	use log::Level;

	#[test]
	fn logging_initialization() {
		// Note: We can only initialize logging once per process
		// This test validates the function signature and error handling
		let _ = super::init_logging(Level::Debug, true);
		let _ = super::init_logging(Level::Info, false);
	}

	#[test]
	fn filter_uses_configured_level() {
		let filter = super::env_filter(Level::Warn);
		assert!(!filter.to_string().is_empty());
	}
}
