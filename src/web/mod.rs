//! HTTP surface: a JSON REST API over the profile and post engines,
//! persisted in SQLite.

pub mod auth;
pub mod config;
pub mod handlers;
pub mod router;
pub mod state;
pub mod utils;

use clap::Parser;

use crate::storage::{db_path, Storage};

use config::{Cli, Config};

/// Entry point: parse CLI, open the database, start server.
pub async fn run() {
    let cli = Cli::parse();
    let config = Config::from_cli_and_env(cli);

    crate::logging::init();

    crate::dclog!("devconnector starting");
    crate::dclog!("  data directory: {}", config.data_dir.display());

    let path = db_path(&config.data_dir);
    let storage = Storage::open(&path).expect("failed to open database");
    crate::dclog!("  database: {}", path.display());

    let app = router::build_router(state::shared(storage));

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .expect("failed to bind");
    crate::dclog!("devconnector listening on http://{}", config.bind_addr);

    axum::serve(listener, app).await.expect("server error");
}
