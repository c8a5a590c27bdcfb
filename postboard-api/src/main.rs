//! # Postboard API Server
//!
//! Serves registration, login, and owner-scoped posts and questions over
//! HTTP/JSON.
//!
//! ## Usage
//!
//! ```bash
//! JWT_SECRET=... DATABASE_URL=postgres://... cargo run -p postboard-api
//! ```

use postboard_api::{
    app::{build_router, AppState},
    config::Config,
};
use postboard_shared::{
    db::{
        migrations::run_migrations,
        pool::{create_lazy_pool, DatabaseConfig},
    },
    store::Stores,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "postboard_api=debug,postboard_shared=debug,tower_http=debug".into());

    let json = std::env::var("LOG_FORMAT").map(|f| f == "json").unwrap_or(false);
    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

/// Builds the store bundle for the configured backend
///
/// Connection problems are logged and do not stop startup; requests against
/// an unreachable database fail individually.
async fn init_stores(config: &Config) -> anyhow::Result<Stores> {
    let Some(database) = &config.database else {
        tracing::warn!("No DATABASE_URL configured; using the in-memory store");
        return Ok(Stores::in_memory());
    };

    let pool = create_lazy_pool(&DatabaseConfig {
        url: database.url.clone(),
        max_connections: database.max_connections,
        acquire_timeout_seconds: database.acquire_timeout_secs,
        ..Default::default()
    })?;

    match run_migrations(&pool).await {
        Ok(()) => tracing::info!("Database connected successfully"),
        Err(e) => tracing::error!("Database connection error: {}", e),
    }

    Ok(Stores::postgres(pool))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    tracing::info!(
        "Postboard API Server v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let config = Config::from_env()?;
    let stores = init_stores(&config).await?;
    let bind_address = config.bind_address();

    let app = build_router(AppState::new(stores, config));

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    tracing::info!("Server is running on {}", bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            tracing::info!("Shutdown signal received, exiting...");
        })
        .await?;

    Ok(())
}
