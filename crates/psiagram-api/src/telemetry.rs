use tracing_subscriber::{
    fmt::format::Format, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

/// Initialize tracing. Production emits one JSON object per event, other
/// environments a compact console format. `RUST_LOG` overrides the default filter.
pub fn init_telemetry(
    environment: &str,
    json_output: bool,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let json_fmt = json_output.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .with_current_span(true)
            .with_target(false)
    });
    let console_fmt = (!json_output).then(|| {
        tracing_subscriber::fmt::layer().event_format(
            Format::default()
                .compact()
                .with_target(false)
                .without_time(),
        )
    });

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "psiagram=debug,tower_http=debug".into()),
        )
        .with(json_fmt)
        .with(console_fmt)
        .try_init()?;

    tracing::info!(environment = %environment, json_output, "Tracing initialized");
    Ok(())
}
