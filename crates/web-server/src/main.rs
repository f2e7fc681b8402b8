use database::{DbRepository, Ledger};
use std::net::SocketAddr;
use std::sync::Arc;

// Entry point for `cargo run -p web-server`: the same server as `foodspend serve`.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = configuration::load_config(None)?;
    let _guard = configuration::init_tracing(&config.logging)?;

    let pool = database::connect(&config.database).await?;
    database::run_migrations(&pool).await?;
    let ledger = Ledger::new(Arc::new(DbRepository::new(pool)));

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    web_server::run_server(addr, ledger).await
}
