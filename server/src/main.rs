use std::sync::Arc;

use todo_core::TodoService;
use todo_server::ServerConfig;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    init_tracing("info");

    let config = ServerConfig::from_env()?;
    let service = Arc::new(TodoService::open(config.data_file.clone())?);
    let router = todo_server::router(service, config.static_dir.as_deref());

    let addr = config.addr();
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!(
        addr = %addr,
        data_file = %config.data_file.display(),
        "todo server listening"
    );
    todo_server::run(listener, router).await?;
    Ok(())
}

/// Initialize the tracing subscriber with the given default log level.
fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
