//! plategate server - HTTP endpoint for LPR camera event submissions

use server::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::load()?;

    server::start_server(config).await?;

    Ok(())
}
