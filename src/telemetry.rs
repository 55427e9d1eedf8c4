use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize structured JSON logging for hosts without a subscriber of
/// their own.
///
/// Embedding applications usually install a subscriber themselves; every log
/// site in this crate goes through `tracing` and works with whatever is
/// installed. Uses `try_init` so calling this twice, or after the host set up
/// its own subscriber, reports an error instead of panicking.
pub fn init_telemetry() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().json().with_current_span(true))
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .try_init()?;

    tracing::info!("timed-state telemetry initialized with structured logging");
    Ok(())
}
