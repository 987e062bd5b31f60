//! Process subscriber: console logs plus the span export layer.

use tracing::{Level, Subscriber};
use tracing_subscriber::filter::{EnvFilter, Targets};
use tracing_subscriber::fmt;
use tracing_subscriber::layer::{Layer, SubscriberExt};
use tracing_subscriber::registry::Registry;

use crate::config::{Config, ConfigTrait};

const DEFAULT_LOG_LEVEL: &str = "debug";

/// Target prefix of every span and event this crate emits.
pub const EXPORT_TARGET: &str = env!("CARGO_CRATE_NAME");

/// Console filter: `RUST_LOG` if set, else `logs.level`.
pub fn log_filter(cfg: &Config) -> EnvFilter {
    let level = cfg
        .logs()
        .and_then(|logs| logs.level.as_deref())
        .unwrap_or(DEFAULT_LOG_LEVEL);

    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

/// Export filter: this crate's entry spans and their events, independent
/// of the console level. Transport crates stay out of the export.
pub fn export_filter() -> Targets {
    Targets::new().with_target(EXPORT_TARGET, Level::INFO)
}

/// Builds the subscriber. `logs.level` filters the console layer only,
/// so raising it never hides entry spans from `export`.
pub fn subscriber<L>(cfg: &Config, export: L) -> impl Subscriber + Send + Sync + 'static
where
    L: Layer<Registry> + Send + Sync + 'static,
{
    let console = if cfg.is_prod() {
        // Production: JSON format
        fmt::layer().json().boxed()
    } else {
        // Development: Pretty console format
        fmt::layer().pretty().boxed()
    };

    tracing_subscriber::registry()
        .with(export.with_filter(export_filter()))
        .with(console.with_filter(log_filter(cfg)))
}
