use std::process::ExitCode;

use tokio::net::TcpListener;
use todo_server::{db, telemetry, ServerConfig, StartupError};

#[tokio::main]
async fn main() -> ExitCode {
    if let Err(e) = telemetry::init_tracing() {
        eprintln!("failed to initialize tracing: {e}");
    }

    match start().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn start() -> Result<(), StartupError> {
    let config = ServerConfig::from_env()?;

    let pool = db::connect(&config.database_url)?;
    db::check_connection(&pool).await?;
    db::ensure_schema(&pool)
        .await
        .map_err(StartupError::Schema)?;
    tracing::info!("database connection ok");

    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("listening on {}", config.bind_addr);
    todo_server::run(listener, pool.clone()).await?;

    pool.close().await;
    tracing::info!("server shutdown complete");
    Ok(())
}
