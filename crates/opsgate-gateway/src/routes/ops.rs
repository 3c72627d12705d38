//! `/<prefix>/...` arithmetic route.
//!
//! Flow per request:
//! - parse form values unless the body is JSON
//! - match the decoded request target and resolve the operation name
//! - `error` fails before reading operands, `list` echoes `arg` values,
//!   unknown names get the directory literal
//! - arithmetic ops build operands from the method-specific source
//!
//! A JSON body is only buffered when a POST arithmetic op decodes it.

use async_trait::async_trait;
use axum::extract::Request;
use axum::http::{header, Method, StatusCode};
use axum::response::{IntoResponse, Response};

use opsgate_core::error::{OpsGateError, Result};
use opsgate_core::ops::{self, Op, OperandSource, Operation, OpsPath, DIRECTORY_JSON};
use opsgate_core::FormValues;

use crate::error::HttpError;
use crate::routes::request::{
    content_type, has_form_body, parse_form, read_body, request_target, PendingBody,
};
use crate::routes::RouteHandler;

pub struct OpsRoute {
    prefix: String,
    path: OpsPath,
    max_body_bytes: usize,
}

impl OpsRoute {
    pub fn new(prefix: impl Into<String>, max_body_bytes: usize) -> Result<Self> {
        let prefix = prefix.into();
        let path = OpsPath::new(&prefix)?;
        Ok(Self {
            prefix,
            path,
            max_body_bytes,
        })
    }

    async fn serve(&self, req: Request) -> Result<Response> {
        let (parts, body) = req.into_parts();

        // JSON bodies are left for operand decoding.
        let (form, body) = if ops::is_json_content(content_type(&parts)) {
            (FormValues::new(), PendingBody::Unread(body))
        } else if has_form_body(&parts) {
            let bytes = read_body(body, self.max_body_bytes).await?;
            (parse_form(&parts, &bytes)?, PendingBody::Read(bytes))
        } else {
            (parse_form(&parts, &[])?, PendingBody::Unread(body))
        };

        let target = request_target(&parts)?;
        let matched = self.path.match_target(&target)?;
        tracing::debug!(method = %parts.method, op = %matched.op_name, "ops request");

        match matched.op() {
            Some(Op::Error) => Err(OpsGateError::UserRequested),
            Some(Op::List) => {
                let items = ops::list_items(&matched.params, parts.uri.query())?;
                let data = serde_json::to_vec(&items)?;
                Ok(json_response(data))
            }
            Some(op) if op.is_arithmetic() => {
                let bytes;
                let source = match parts.method {
                    Method::GET => OperandSource::Form(&form),
                    Method::POST => {
                        bytes = body.into_bytes(self.max_body_bytes).await?;
                        OperandSource::Json(&bytes[..])
                    }
                    _ => OperandSource::Absent,
                };
                let operation = Operation::build(op, source)?.computed();
                tracing::debug!(
                    op = op.as_str(),
                    operand1 = operation.operand1,
                    operand2 = operation.operand2,
                    result = operation.result,
                    "operation computed"
                );
                Ok(json_response(operation.to_json()?))
            }
            Some(_) | None => Ok(json_response(DIRECTORY_JSON.as_bytes().to_vec())),
        }
    }
}

fn json_response(data: Vec<u8>) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        data,
    )
        .into_response()
}

#[async_trait]
impl RouteHandler for OpsRoute {
    fn prefix(&self) -> &str {
        &self.prefix
    }

    async fn handle(&self, req: Request) -> Response {
        match self.serve(req).await {
            Ok(resp) => resp,
            Err(e) => HttpError(e).into_response(),
        }
    }
}
