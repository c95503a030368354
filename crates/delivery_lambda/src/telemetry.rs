use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "info";

/// Installs the JSON log subscriber used by every lambda binary.
///
/// Filtering follows `RUST_LOG` and falls back to `info`. Timestamps are left
/// out because CloudWatch records ingestion time for each line.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .json()
        .flatten_event(true)
        .init();
}
