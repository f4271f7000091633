use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use tasklane::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Init logging
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap();
    fmt().with_env_filter(filter).init();

    // Startup banner at info level so something always prints at default verbosity
    let rust_log = std::env::var("RUST_LOG").unwrap_or_else(|_| "<unset>".to_string());
    let config = Config::from_env();
    info!(
        target: "tasklane",
        "tasklane starting: RUST_LOG='{}', http_port={}, db_root='{}', token_ttl_secs={}",
        rust_log, config.http_port, config.data_root, config.token_ttl_secs
    );

    tasklane::server::run_with_config(config).await
}
