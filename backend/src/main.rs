//! Backend entry-point: logging, configuration, and the HTTP server.

use clap::Parser;
use tracing::warn;
use tracing_subscriber::{fmt, EnvFilter};

use backend::server::{run, ServerConfig};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let config = ServerConfig::parse();

    let subscriber = fmt().with_env_filter(EnvFilter::from_default_env());
    let init_result = if config.log_json {
        subscriber.json().try_init()
    } else {
        subscriber.try_init()
    };
    if let Err(e) = init_result {
        warn!(error = %e, "tracing init failed");
    }

    run(config).await
}
