use anyhow::Context;
use axum::Router;
use axum::extract::State;
use dotenv::dotenv;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

mod api;
mod app_env;
mod domain;
mod dto;
mod external_connections;
mod logging;
mod persistence;
mod routing_utils;

/// Application state shared by every handler
pub struct SharedData {
    pub ext_cxn: persistence::ExternalConnectivity,
    pub config: app_env::AppConfig,
}

/// The axum state extractor used across the app's routers
pub type AppState = State<Arc<SharedData>>;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    dotenv().ok();
    logging::setup_logging(logging::init_env_filter());

    let config = app_env::AppConfig::from_env()?;

    let db_pool = PgPoolOptions::new()
        .max_connections(20)
        .connect(&config.db_url)
        .await
        .context("connecting to the database")?;
    let ext_cxn = persistence::ExternalConnectivity::new(db_pool)?;

    let listen_addr = config.listen_addr.clone();
    let shared_data = Arc::new(SharedData { ext_cxn, config });

    let router = Router::new()
        .merge(api::swagger_main::build_documentation())
        .nest("/tasks", api::task::task_routes())
        .nest("/groups", api::group::group_routes())
        .nest("/admin/review", api::review::review_routes())
        .nest("/profile", api::profile::profile_routes())
        .with_state(shared_data);
    let router = logging::attach_tracing_http(router);

    let listener = TcpListener::bind(&listen_addr)
        .await
        .with_context(|| format!("binding {listen_addr}"))?;
    info!("ProveIt listening on {listen_addr}");
    axum::serve(listener, router)
        .await
        .context("serving the API")?;

    Ok(())
}
