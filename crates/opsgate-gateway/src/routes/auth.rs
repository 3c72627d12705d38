//! `/<prefix>/...` authorization gate.

use async_trait::async_trait;
use axum::extract::Request;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};

use opsgate_core::auth::{AuthDecision, AuthPolicy};
use opsgate_core::error::Result;

use crate::error::HttpError;
use crate::routes::request::{collect_form, read_body};
use crate::routes::RouteHandler;

const SUCCESS_BODY: &str = "<html>Successful auth</html>";

pub struct AuthRoute {
    prefix: String,
    policy: AuthPolicy,
    max_body_bytes: usize,
}

impl AuthRoute {
    pub fn new(prefix: impl Into<String>, policy: AuthPolicy, max_body_bytes: usize) -> Self {
        Self {
            prefix: prefix.into(),
            policy,
            max_body_bytes,
        }
    }

    async fn check(&self, req: Request) -> Result<AuthDecision> {
        let (parts, body) = req.into_parts();

        // Unreadable bodies and malformed pairs only mean "no override".
        let body = read_body(body, self.max_body_bytes).await.unwrap_or_default();
        let (form, form_err) = collect_form(&parts, &body);
        if let Some(e) = form_err {
            tracing::debug!(error = %e, "auth form partially parsed");
        }

        let header_value = parts
            .headers
            .get(self.policy.header())
            .map(|v| v.to_str().ok());
        self.policy.decide(header_value, &form)
    }
}

#[async_trait]
impl RouteHandler for AuthRoute {
    fn prefix(&self) -> &str {
        &self.prefix
    }

    async fn handle(&self, req: Request) -> Response {
        match self.check(req).await {
            Ok(decision) => {
                tracing::debug!(?decision, "auth accepted");
                (
                    StatusCode::ACCEPTED,
                    [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
                    SUCCESS_BODY,
                )
                    .into_response()
            }
            Err(e) => HttpError(e).into_response(),
        }
    }
}
