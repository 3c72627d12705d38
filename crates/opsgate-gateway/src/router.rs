//! Axum router wiring.
//!
//! Each registered prefix gets two routes: `/<prefix>/` and
//! `/<prefix>/*rest`, both forwarded to the prefix's handler for any method.
//! The bare `/<prefix>` answers with a 301 to the trailing-slash form.

use std::sync::Arc;

use axum::extract::Request;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::any;
use axum::Router;

use crate::app_state::AppState;
use crate::routes::RouteHandler;

pub fn build_router(state: AppState) -> Router {
    let routes = state.routes();
    let mut router = Router::new();

    for prefix in routes.registered_prefixes() {
        let Some(handler) = routes.get(&prefix) else {
            continue;
        };
        let service = move |req: Request| {
            let handler: Arc<dyn RouteHandler> = Arc::clone(&handler);
            async move { handler.handle(req).await }
        };
        let subtree = format!("/{prefix}/");
        let redirect = {
            let subtree = subtree.clone();
            move |req: Request| {
                let resp = subtree_redirect(&subtree, req.uri().query());
                async move { resp }
            }
        };
        router = router
            .route(&format!("/{prefix}"), any(redirect))
            .route(&subtree, any(service.clone()))
            .route(&format!("/{prefix}/*rest"), any(service));
    }

    router
}

fn subtree_redirect(subtree: &str, query: Option<&str>) -> Response {
    let location = match query {
        Some(q) => format!("{subtree}?{q}"),
        None => subtree.to_string(),
    };
    (StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, location)]).into_response()
}
