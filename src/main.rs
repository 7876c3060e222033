use anyhow::{anyhow, Result};
use rag_query_node::{api, RagConfig, RagEngine};
use std::{env, sync::Arc};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    tracing_subscriber::fmt::init();

    let config = RagConfig::from_env();
    config.validate().map_err(|e| anyhow!(e))?;

    // Load index, metadata, and embedding model eagerly so a missing
    // artifact aborts startup instead of failing the first request
    let engine = Arc::new(RagEngine::load(&config)?);

    api::start_server(engine, config.api_port).await
}
