use gym_server::{Config, Server, ServerState, init_logger_with_file};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // .env is optional
    let _ = dotenvy::dotenv();

    let config = Config::from_env()?;
    init_logger_with_file(
        config.log_level.as_deref(),
        config.log_json,
        config.log_dir.as_deref(),
    );

    tracing::info!(env = %config.environment, "Gym server starting...");

    let state = ServerState::initialize(&config).await?;
    let server = Server::with_state(config, state);

    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
