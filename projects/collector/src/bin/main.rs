use std::sync::Arc;

use axum::{
    extract::Extension,
    routing::{get, post},
    serve, Router,
};
use diesel::r2d2::ConnectionManager;
use diesel::PgConnection;
use thiserror::Error;
use tracing::{error, info};

use projects_collector::collector::jobs::JobRegistry;
use projects_collector::config::{Config, ConfigError};
use projects_collector::db::{run_migrations, PgPool, RunMigrationsError};
use projects_collector::endpoints::collect::status::index::handler as collect_status_handler;
use projects_collector::endpoints::collect::trigger::index::handler as collect_trigger_handler;
use projects_collector::endpoints::submissions::create::index::handler as submissions_create_handler;
use projects_collector::metrics::{self, Metrics, MetricsInitError};

#[derive(Debug, Error)]
pub enum MainError {
    #[error("TracingInit: {source}")]
    TracingInit {
        #[source]
        source: utils_trace::TracingInitError,
    },
    #[error("LoadConfig: {source}")]
    LoadConfig {
        #[source]
        source: ConfigError,
    },
    #[error("BuildPool: {source}")]
    BuildPool {
        #[source]
        source: r2d2::Error,
    },
    #[error("GetConnectionFromPool: {source}")]
    GetConnectionFromPool {
        #[source]
        source: r2d2::Error,
    },
    #[error("RunMigrations: {source}")]
    RunMigrations {
        #[source]
        source: RunMigrationsError,
    },
    #[error("MetricsInit: {source}")]
    MetricsInit {
        #[source]
        source: MetricsInitError,
    },
    #[error("TcpListenerBind: {source}")]
    TcpListenerBind {
        #[source]
        source: std::io::Error,
    },
    #[error("Serve: {source}")]
    Serve {
        #[source]
        source: std::io::Error,
    },
}

#[tokio::main]
async fn main() -> Result<(), MainError> {
    // .env is a local convenience; deployed environments set vars directly.
    let _ = dotenvy::dotenv();

    utils_trace::init("info").map_err(|source| MainError::TracingInit { source })?;

    let config =
        Arc::new(Config::from_env().map_err(|source| MainError::LoadConfig { source })?);

    let manager = ConnectionManager::<PgConnection>::new(&config.database_url);
    let pool: PgPool = PgPool::builder()
        .build(manager)
        .map_err(|source| MainError::BuildPool { source })?;

    {
        let mut conn = pool
            .get()
            .map_err(|source| MainError::GetConnectionFromPool { source })?;
        run_migrations(&mut conn).map_err(|source| MainError::RunMigrations { source })?;
    }

    let metrics = Arc::new(Metrics::new().map_err(|source| MainError::MetricsInit { source })?);
    let jobs = Arc::new(JobRegistry::new());

    // Set up the router
    let app = Router::new()
        .route("/fetch-data", get(collect_trigger_handler))
        .route("/fetch-data/jobs/{id}", get(collect_status_handler))
        .route("/store-data", post(submissions_create_handler))
        .layer(Extension(pool))
        .layer(Extension(metrics.clone()))
        .layer(Extension(config.clone()))
        .layer(Extension(jobs));

    // Metrics get their own listener so scrapes never mix with service traffic.
    let metrics_app = metrics::router(metrics);
    let metrics_listener = tokio::net::TcpListener::bind(config.metrics_addr)
        .await
        .map_err(|source| MainError::TcpListenerBind { source })?;

    info!("Metrics server running on addr: {}", config.metrics_addr);

    tokio::spawn(async move {
        if let Err(err) = serve(metrics_listener, metrics_app).await {
            error!(error = %err, "metrics server exited");
        }
    });

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .map_err(|source| MainError::TcpListenerBind { source })?;

    info!("Server running on addr: {}", config.bind_addr);

    serve(listener, app)
        .await
        .map_err(|source| MainError::Serve { source })?;

    Ok(())
}
