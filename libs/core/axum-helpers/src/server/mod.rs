//! Server infrastructure module.
//!
//! This module provides:
//! - Router setup with OpenAPI documentation and cross-cutting middleware
//! - Health endpoint
//! - Graceful shutdown coordination, including shutdown after a fatal fault
//!
//! # Example
//!
//! ```ignore
//! use axum_helpers::server::{create_production_app, create_router, health_router};
//! use core_config::{app_info, server::ServerConfig, Environment};
//!
//! let server = ServerConfig::default();
//! let root = health_router(app_info!());
//! let router = create_router::<ApiDoc>(api_routes, root, &server, Environment::from_env())?;
//!
//! let (coordinator, _rx) = ShutdownCoordinator::new();
//! create_production_app(router, &server, coordinator, Duration::from_secs(30), async {}).await?;
//! ```

pub mod app;
pub mod health;
pub mod shutdown;

pub use app::{build_router, create_production_app, create_router};
pub use health::{HealthCheckFuture, HealthResponse, health_router, run_health_checks};
pub use shutdown::{ShutdownCoordinator, install_fatal_panic_hook};
