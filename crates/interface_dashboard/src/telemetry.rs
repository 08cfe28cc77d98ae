//! Tracing subscriber setup

use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs the global tracing subscriber
///
/// `RUST_LOG` takes precedence over `log_level`; an unparseable level falls
/// back to `info`. With `json` set, events are written as JSON lines.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_tracing(log_level: &str, json: bool) -> Result<(), TryInitError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let json_layer = json.then(|| tracing_subscriber::fmt::layer().json().with_target(true));
    let text_layer = (!json).then(|| tracing_subscriber::fmt::layer().with_target(true));

    tracing_subscriber::registry()
        .with(filter)
        .with(json_layer)
        .with(text_layer)
        .try_init()
}
