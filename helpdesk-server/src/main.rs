use helpdesk_server::{Config, Server, ServerState, setup_environment};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Environment (dotenv, logging)
    setup_environment();

    tracing::info!("Helpdesk server starting...");

    // 2. Configuration
    let config = Config::from_env();

    // 3. Services (database, rule store, JWT)
    let state = ServerState::initialize(&config).await?;

    // 4. HTTP server (spawns the SLA refresh task)
    let server = Server::with_state(config, state);
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e);
    }

    Ok(())
}
