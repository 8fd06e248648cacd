pub mod config;
pub mod load;
pub mod report;
pub mod sink;

/// Логи в stderr, фильтр из RUST_LOG
pub fn init_tracing(default_filter: &str) {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .init();
}
