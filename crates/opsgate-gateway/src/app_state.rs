//! Shared application state for the opsgate gateway.
//!
//! Built once from the validated config: each route handler receives its
//! prefix and settings at construction and is registered by prefix.

use std::sync::Arc;

use opsgate_core::error::Result;

use crate::config::GatewayConfig;
use crate::routes::{AuthRoute, OpsRoute, RouteRegistry};

#[derive(Clone)]
pub struct AppState {
    routes: Arc<RouteRegistry>,
}

impl AppState {
    /// Build application state.
    /// Returns Result so main can handle errors gracefully (no panic).
    pub fn new(cfg: &GatewayConfig) -> Result<Self> {
        cfg.validate()?;

        let routes = RouteRegistry::new();
        let max_body = cfg.server.max_body_bytes;

        routes.register(Arc::new(OpsRoute::new(cfg.ops.prefix.clone(), max_body)?))?;
        routes.register(Arc::new(AuthRoute::new(
            cfg.auth.prefix.clone(),
            cfg.auth.policy(),
            max_body,
        )))?;

        Ok(Self {
            routes: Arc::new(routes),
        })
    }

    pub fn routes(&self) -> Arc<RouteRegistry> {
        Arc::clone(&self.routes)
    }
}
