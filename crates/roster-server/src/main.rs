//! roster-server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`) plus `ROSTER_*`
//! environment variables, opens the SQLite store, and serves the JSON API.
//!
//! ```
//! cargo run -p roster-server -- --seed
//! ```

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::Parser;
use roster_server::ServerConfig;
use roster_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Roster course registry API server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// Load the demo subjects, course, and students before serving.
  #[arg(long)]
  seed: bool,

  /// Ensure only the reference subjects (Mathematics, Science, History)
  /// exist before serving.
  #[arg(long, conflicts_with = "seed")]
  seed_subjects: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let server_cfg = ServerConfig::load(&cli.config)
    .with_context(|| format!("failed to load configuration from {:?}", cli.config))?;

  let db_path = server_cfg.resolved_database_path();
  let store = SqliteStore::open(&db_path)
    .await
    .with_context(|| format!("failed to open store at {db_path:?}"))?;

  if cli.seed {
    store.seed_demo().await.context("failed to seed demo data")?;
  } else if cli.seed_subjects {
    store
      .seed_default_subjects()
      .await
      .context("failed to seed default subjects")?;
  }

  let app = roster_server::app(Arc::new(store));
  let address = server_cfg.address();

  tracing::info!("API listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}
