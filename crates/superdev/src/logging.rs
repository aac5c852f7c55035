//! Global tracing subscriber setup

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::error::{Result, SuperDevError};

/// Install a formatted subscriber filtered at `level`
///
/// `RUST_LOG` takes precedence when set. Fails if a global subscriber is
/// already installed.
pub fn init_logging(level: &str) -> Result<()> {
    let filter = format!("superdev={level},superdev_core={level}");
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .map_err(|e| SuperDevError::Logging(e.to_string()))
}
