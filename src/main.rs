//! todo-api - multi-user todo list backend
//! Startup: env → tracing → config → schema → admin bootstrap → serve

use anyhow::{Context, Result};
use clap::Parser;
use dotenv::dotenv;
use std::path::Path;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use todo_backend::{
    auth::{
        bootstrap::{ensure_default_admin, BootstrapOutcome},
        Authenticator, CredentialHasher, TokenService,
    },
    build_router, db, AppState, Config,
};

#[tokio::main]
async fn main() -> Result<()> {
    load_env();
    init_tracing();

    let config = Config::parse();
    info!("🚀 todo-api starting");

    let signing_key = config
        .signing_key()
        .context("Refusing to start with an unsafe JWT secret")?;

    db::migrate(&config.db_path).context("Failed to prepare database")?;

    let hasher = CredentialHasher::new(config.bcrypt_cost);
    let authenticator = Arc::new(Authenticator::new(TokenService::new(&signing_key)));
    let state = AppState::new(&config.db_path, authenticator, hasher);

    // A missing admin is survivable; the warning is the operator's cue.
    match ensure_default_admin(state.users.as_ref(), &hasher) {
        Ok(BootstrapOutcome::Created { user_id }) => {
            info!("🔐 Bootstrap created admin user {}", user_id)
        }
        Ok(BootstrapOutcome::AlreadyPresent) => {}
        Err(e) => warn!("Failed to create default admin: {}", e),
    }

    let app = build_router(state);

    let addr = config.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("🎯 API server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

/// Initialize tracing
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "todo_backend=debug,todo_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn load_env() {
    // Standard dotenv search (cwd + parents), then the crate directory
    let _ = dotenv();

    let manifest_env = Path::new(env!("CARGO_MANIFEST_DIR")).join(".env");
    if manifest_env.exists() {
        let _ = dotenv::from_path(&manifest_env);
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
