pub mod api;
pub mod config;
pub mod model;
pub mod store;
pub mod upstream;

// Export API types
pub use api::handlers;
pub use api::routes;

// Export all model types
pub use model::*;

pub use store::SessionCache;
pub use upstream::{DataService, PrimaveraClient, UpstreamError, CONFIG_CODE};

use std::sync::Arc;

use crate::api::handlers::Portal;
use crate::config::AppConfig;

/// Router wired to the real Primavera client, plus its session cache so
/// the caller can schedule purging.
pub fn build_app(config: &AppConfig) -> anyhow::Result<(axum::Router, SessionCache)> {
    let client = PrimaveraClient::new(config.upstream_timeout())?;
    let sessions = SessionCache::new(config.session_ttl());
    let portal = Portal::new(client, sessions.clone(), config.upstream.query_name.clone());

    let app = routes::create_router_with_assets::<PrimaveraClient>(&config.server.static_dir)
        .with_state(Arc::new(portal));

    Ok((app, sessions))
}

pub async fn run_server(config: AppConfig) -> anyhow::Result<()> {
    use axum::serve;
    use tokio::net::TcpListener;

    let (app, sessions) = build_app(&config)?;
    store::spawn_purge_task(sessions, config.purge_interval());

    let bind_address = config.server_address();
    let listener = TcpListener::bind(&bind_address).await?;
    log::info!("P6 Explorer running on http://{}", bind_address);

    serve(listener, app).await?;

    Ok(())
}
