//! Route handlers and their registry.
//!
//! Every URL prefix is served by one [`RouteHandler`]. The registry is filled
//! once at startup and read by the router builder; handlers themselves are
//! immutable and shared across requests.

pub mod auth;
pub mod ops;
pub mod request;

use std::sync::Arc;

use async_trait::async_trait;
use axum::extract::Request;
use axum::response::Response;
use dashmap::DashMap;

use opsgate_core::error::{OpsGateError, Result};

pub use auth::AuthRoute;
pub use ops::OpsRoute;

/// A single-prefix request handler ("handle request, produce response").
#[async_trait]
pub trait RouteHandler: Send + Sync {
    /// URL prefix without slashes, e.g. `ops`.
    fn prefix(&self) -> &str;
    async fn handle(&self, req: Request) -> Response;
}

/// Registry of route handlers keyed by prefix.
#[derive(Default)]
pub struct RouteRegistry {
    routes: DashMap<String, Arc<dyn RouteHandler>>,
}

impl RouteRegistry {
    pub fn new() -> Self {
        Self {
            routes: DashMap::new(),
        }
    }

    /// Register a handler. Prefixes must be unique.
    pub fn register(&self, handler: Arc<dyn RouteHandler>) -> Result<()> {
        let prefix = handler.prefix().to_string();
        if self.routes.contains_key(&prefix) {
            return Err(OpsGateError::Config(format!(
                "prefix already registered: {prefix}"
            )));
        }
        tracing::debug!(%prefix, "route registered");
        self.routes.insert(prefix, handler);
        Ok(())
    }

    /// Registered prefixes, sorted for deterministic router construction.
    pub fn registered_prefixes(&self) -> Vec<String> {
        let mut prefixes: Vec<String> = self.routes.iter().map(|e| e.key().clone()).collect();
        prefixes.sort();
        prefixes
    }

    pub fn get(&self, prefix: &str) -> Option<Arc<dyn RouteHandler>> {
        self.routes.get(prefix).map(|e| Arc::clone(e.value()))
    }
}
