#![allow(dead_code)]

use axum::body::{to_bytes, Body};
use axum::http::{Request, Response, StatusCode};
use axum::Router;
use tower::ServiceExt;

use opsgate_gateway::config::GatewayConfig;
use opsgate_gateway::{build_router, AppState};

pub fn app() -> Router {
    app_with(GatewayConfig::default())
}

pub fn app_with(cfg: GatewayConfig) -> Router {
    build_router(AppState::new(&cfg).expect("state"))
}

pub async fn send(app: Router, req: Request<Body>) -> (StatusCode, Response<Body>) {
    let resp = app.oneshot(req).await.expect("infallible");
    (resp.status(), resp)
}

pub async fn body_string(resp: Response<Body>) -> String {
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.expect("body");
    String::from_utf8(bytes.to_vec()).expect("utf8")
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).expect("request")
}
