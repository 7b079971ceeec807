//! Subscriber installation for binaries and test harnesses.
//!
//! `RUST_LOG` wins over the configured level when it is set.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub use tracing_subscriber::util::TryInitError;

/// Subscriber settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TracingConfig {
    /// Reported once the subscriber is installed
    pub service_name: String,
    /// Filter directive used when `RUST_LOG` is absent or invalid
    pub log_level: String,
    /// Emit newline-delimited JSON instead of human-readable lines
    pub json_output: bool,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            service_name: "webflow-provider".to_string(),
            log_level: "info".to_string(),
            json_output: false,
        }
    }
}

impl TracingConfig {
    /// Override the service name.
    #[must_use]
    pub fn with_service_name(mut self, name: impl Into<String>) -> Self {
        self.service_name = name.into();
        self
    }

    /// Override the fallback filter directive, e.g. `"webflow_client=debug"`.
    #[must_use]
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Switch to JSON lines.
    #[must_use]
    pub const fn with_json_output(mut self) -> Self {
        self.json_output = true;
        self
    }

    fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.log_level))
    }
}

/// Install the global subscriber.
///
/// # Panics
///
/// Panics when a global subscriber is already installed; see
/// [`try_init_tracing`] for the fallible form.
pub fn init_tracing(config: &TracingConfig) {
    if let Err(err) = try_init_tracing(config) {
        panic!("cannot install tracing subscriber for {}: {err}", config.service_name);
    }
}

/// Install the global subscriber unless one already exists.
///
/// # Errors
///
/// Returns [`TryInitError`] when a global subscriber is already installed.
pub fn try_init_tracing(config: &TracingConfig) -> Result<(), TryInitError> {
    let (json, plain) = if config.json_output {
        (Some(fmt::layer().json().with_current_span(true)), None)
    } else {
        (None, Some(fmt::layer().with_target(true)))
    };

    tracing_subscriber::registry()
        .with(config.env_filter())
        .with(json)
        .with(plain)
        .try_init()?;

    tracing::debug!(
        service = %config.service_name,
        json = config.json_output,
        "Tracing subscriber installed"
    );
    Ok(())
}
