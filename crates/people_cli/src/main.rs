//! People registry HTTP server.
//!
//! Usage:
//!   people-server --bind 127.0.0.1:8080 --db people.sqlite3
//!   people-server --in-memory --log-level debug

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use log::info;
use people_api::build_router;
use people_core::db::{open_db, open_db_in_memory};
use people_core::{default_log_level, init_logging, PeopleService, SqlitePersonRepository};

#[derive(Parser, Debug)]
#[command(name = "people-server")]
#[command(about = "CRUD REST API over a SQLite people store", version)]
struct Args {
    /// Address the HTTP server listens on
    #[arg(short, long, default_value = "127.0.0.1:8080")]
    bind: SocketAddr,

    /// Path to the SQLite database file
    #[arg(long, default_value = "people.sqlite3", conflicts_with = "in_memory")]
    db: PathBuf,

    /// Use a throwaway in-memory database
    #[arg(long)]
    in_memory: bool,

    /// Log level: trace|debug|info|warn|error
    #[arg(long)]
    log_level: Option<String>,

    /// Absolute directory for rotating log files; logs go to stderr when unset
    #[arg(long)]
    log_dir: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let level = args.log_level.as_deref().unwrap_or(default_log_level());
    init_logging(level, args.log_dir.as_deref()).map_err(|err| anyhow!(err))?;

    let conn = if args.in_memory {
        open_db_in_memory().context("failed to open in-memory database")?
    } else {
        open_db(&args.db)
            .with_context(|| format!("failed to open database `{}`", args.db.display()))?
    };
    let service = Arc::new(PeopleService::new(SqlitePersonRepository::new(conn)));
    let app = build_router(service);

    let listener = tokio::net::TcpListener::bind(args.bind)
        .await
        .with_context(|| format!("failed to bind {}", args.bind))?;
    info!(
        "event=server_start module=cli status=ok bind={} in_memory={}",
        args.bind, args.in_memory
    );

    axum::serve(listener, app).await.context("HTTP server failed")?;
    Ok(())
}
