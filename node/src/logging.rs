//! Stderr logging for the operator tool. Stdout is reserved for command
//! output (tx ids, identities, inspect summaries) so it stays pipeable.

use clap::ValueEnum;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Line format for log records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogFormat {
    /// One compact human-readable line per event.
    #[default]
    Compact,
    /// JSON lines.
    Json,
}

/// Picks the filter directives. `--log`/`QUILL_LOG` wins over `RUST_LOG`,
/// which wins over the subcommand's own level applied to both quill crates.
pub fn resolve_filter(explicit: Option<&str>, rust_log: Option<&str>, command_level: &str) -> String {
    [explicit, rust_log]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|directives| !directives.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| format!("quill_node={command_level},quill_protocol={command_level}"))
}

/// Installs the global subscriber. Must be called once, before any command runs.
pub fn init_logging(explicit: Option<&str>, command_level: &str, format: LogFormat) {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let directives = resolve_filter(explicit, rust_log.as_deref(), command_level);
    let filter = EnvFilter::try_new(&directives).unwrap_or_else(|e| {
        eprintln!("ignoring bad log filter {directives:?}: {e}");
        EnvFilter::new(format!("quill_node={command_level}"))
    });

    let layer = fmt::layer().with_writer(std::io::stderr).with_target(false);
    match format {
        LogFormat::Compact => tracing_subscriber::registry()
            .with(filter)
            .with(layer.compact())
            .init(),
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(layer.json())
            .init(),
    }

    tracing::debug!(filter = %directives, "logging ready");
}
