use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;

use branchd::auth::StaticCredentials;
use branchd::http::{self, AppState};
use branchd::store::{self, BranchStore};

#[derive(Debug, Parser)]
#[command(name = "branchd", about = "REST service for managing business branch records")]
struct Args {
    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1:5000", env = "BRANCHD_ADDR")]
    addr: String,

    /// SQLite database URL
    #[arg(long, default_value = "sqlite://branchd.db", env = "DATABASE_URL")]
    database_url: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let args = Args::parse();

    let pool = store::connect(&args.database_url)
        .await
        .with_context(|| format!("Failed to open database: {}", args.database_url))?;
    log::info!("database ready at {}", args.database_url);

    let state = AppState {
        store: BranchStore::new(pool),
        verifier: Arc::new(StaticCredentials::from_env()),
    };

    let listener = tokio::net::TcpListener::bind(&args.addr)
        .await
        .with_context(|| format!("Failed to bind {}", args.addr))?;
    log::info!("listening on {}", args.addr);

    axum::serve(listener, http::router(state))
        .await
        .context("Server terminated unexpectedly")?;

    Ok(())
}
