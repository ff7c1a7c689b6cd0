//! Products API - REST server over MongoDB

use axum_helpers::server::{
    ShutdownCoordinator, create_production_app, create_router, health_router,
    install_fatal_panic_hook,
};
use core_config::tracing::{init_tracing, install_color_eyre};
use std::time::Duration;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    let (coordinator, _rx) = ShutdownCoordinator::new();
    install_fatal_panic_hook(coordinator.clone());

    let mongo_client = database::mongodb::connect_from_config(&config.mongodb).await?;
    let db = mongo_client.database(config.mongodb.database());

    info!(
        "Connected to MongoDB database: {}",
        config.mongodb.database()
    );

    let state = AppState {
        config: config.clone(),
        mongo_client,
        db,
    };

    api::init_indexes(&state).await?;

    // Build REST router
    let api_routes = api::routes(&state);
    let root_routes = api::welcome_router().merge(health_router(state.config.app.clone()));
    let app = create_router::<openapi::ApiDoc>(
        api_routes,
        root_routes,
        &state.config.server,
        config.environment,
    )?;

    info!(
        environment = ?config.environment,
        "Starting Products API on port {}", state.config.server.port
    );

    let mongo_client = state.mongo_client.clone();
    create_production_app(
        app,
        &state.config.server,
        coordinator,
        Duration::from_secs(30),
        async move {
            info!("Shutting down: closing MongoDB connections");
            mongo_client.shutdown().await;
            info!("MongoDB connection closed");
        },
    )
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Products API shutdown complete");
    Ok(())
}
