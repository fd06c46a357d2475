use tracing_subscriber::EnvFilter;

/// Structured logging to stderr, filtered by `RUST_LOG`.
pub fn init_logging() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,pmvhaven_downloader=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .try_init()?;

    tracing::info!("logging initialized");
    Ok(())
}
