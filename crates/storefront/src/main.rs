//! Lumen storefront server.
//!
//! Serves the public storefront on port 3000. Only the Shopify Storefront
//! API and the session database are reachable from this binary.

#![cfg_attr(not(test), forbid(unsafe_code))]

use lumen_storefront::config::StorefrontConfig;
use lumen_storefront::middleware::mutation_rate_limiter;
use lumen_storefront::routes::health;
use lumen_storefront::state::AppState;
use lumen_storefront::{app, db};
use sentry::integrations::tracing as sentry_tracing;
use sqlx::PgPool;
use tower_sessions_sqlx_store::PostgresStore;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize Sentry error tracking and return the guard that must be kept alive.
fn init_sentry(config: &StorefrontConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    tracing::info!(environment = ?config.sentry_environment, "Sentry enabled");
    Some(guard)
}

/// ERROR and WARN become Sentry events, INFO and DEBUG breadcrumbs.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

/// Console output filtered by `RUST_LOG`, with WARN and above mirrored to Sentry.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "lumen_storefront=info,tower_http=debug".into());

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();
}

/// Postgres-backed session store; creates the session table on first run.
async fn session_store(pool: PgPool) -> PostgresStore {
    let store = PostgresStore::new(pool);
    store
        .migrate()
        .await
        .expect("Failed to migrate session store");
    store
}

#[tokio::main]
async fn main() {
    let config = StorefrontConfig::from_env().expect("Failed to load configuration");

    // The Sentry guard must exist before the tracing layer is installed.
    let _sentry_guard = init_sentry(&config);
    init_tracing();

    let pool = db::create_pool(&config.database_url)
        .await
        .expect("Failed to connect to Postgres");
    let store = session_store(pool.clone()).await;

    let addr = config.socket_addr();
    let router = app(
        AppState::new(config),
        store,
        Some(mutation_rate_limiter()),
        health::ready_router(pool),
    );

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");
    tracing::info!(%addr, "Lumen storefront listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
}

/// Resolves on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    let signal = tokio::select! {
        () = ctrl_c => "ctrl-c",
        () = terminate => "SIGTERM",
    };

    tracing::info!(signal, "Draining connections before shutdown");
}
