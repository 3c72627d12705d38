//! Request plumbing shared by route handlers.

use axum::body::{Body, Bytes};
use axum::http::{header, request::Parts, Method};

use opsgate_core::error::{OpsGateError, Result};
use opsgate_core::ops::decode_path;
use opsgate_core::FormValues;

const FORM_MEDIA_TYPE: &str = "application/x-www-form-urlencoded";

/// Raw `Content-Type` header, if present and textual.
pub fn content_type(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
}

/// Decoded path plus the raw `?query` when a query is present.
pub fn request_target(parts: &Parts) -> Result<String> {
    let path = decode_path(parts.uri.path())?;
    Ok(match parts.uri.query() {
        Some(q) => format!("{path}?{q}"),
        None => path,
    })
}

pub async fn read_body(body: Body, limit: usize) -> Result<Bytes> {
    axum::body::to_bytes(body, limit)
        .await
        .map_err(|e| OpsGateError::BodyDecodeFailure(format!("read body: {e}")))
}

/// A request body that is only buffered once a branch asks for it.
pub enum PendingBody {
    Unread(Body),
    Read(Bytes),
}

impl PendingBody {
    pub async fn into_bytes(self, limit: usize) -> Result<Bytes> {
        match self {
            PendingBody::Unread(body) => read_body(body, limit).await,
            PendingBody::Read(bytes) => Ok(bytes),
        }
    }
}

fn is_form_content(parts: &Parts) -> bool {
    content_type(parts)
        .and_then(|ct| ct.split(';').next())
        .map(|mt| mt.trim().eq_ignore_ascii_case(FORM_MEDIA_TYPE))
        .unwrap_or(false)
}

/// Whether the form includes body pairs (form-encoded POST/PUT/PATCH).
pub fn has_form_body(parts: &Parts) -> bool {
    matches!(parts.method, Method::POST | Method::PUT | Method::PATCH) && is_form_content(parts)
}

/// Form values of a request: form-encoded body pairs (see [`has_form_body`])
/// followed by query pairs.
pub fn parse_form(parts: &Parts, body: &[u8]) -> Result<FormValues> {
    match collect_form(parts, body) {
        (form, None) => Ok(form),
        (_, Some(err)) => Err(err),
    }
}

/// Like [`parse_form`], but keeps every pair that decoded and reports the
/// first rejection separately.
pub fn collect_form(parts: &Parts, body: &[u8]) -> (FormValues, Option<OpsGateError>) {
    let mut form = FormValues::new();
    let mut first_err = None;
    let mut sources: Vec<&[u8]> = Vec::with_capacity(2);
    if has_form_body(parts) {
        sources.push(body);
    }
    if let Some(q) = parts.uri.query() {
        sources.push(q.as_bytes());
    }
    for raw in sources {
        let (values, err) = FormValues::parse_partial(raw);
        form.extend(values);
        if let Some(e) = err {
            first_err.get_or_insert(e);
        }
    }
    (form, first_err)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts(method: Method, uri: &str, ct: Option<&str>) -> Parts {
        let mut b = Request::builder().method(method).uri(uri);
        if let Some(ct) = ct {
            b = b.header(header::CONTENT_TYPE, ct);
        }
        b.body(()).unwrap().into_parts().0
    }

    #[test]
    fn target_keeps_query() {
        let p = parts(Method::GET, "/ops/list?arg=1&arg=2", None);
        assert_eq!(request_target(&p).unwrap(), "/ops/list?arg=1&arg=2");
        let p = parts(Method::GET, "/ops/", None);
        assert_eq!(request_target(&p).unwrap(), "/ops/");
    }

    #[test]
    fn target_decodes_path_but_not_query() {
        let p = parts(Method::GET, "/ops/%61dd?arg=%41", None);
        assert_eq!(request_target(&p).unwrap(), "/ops/add?arg=%41");
    }

    #[test]
    fn form_body_only_for_form_posts() {
        let p = parts(Method::POST, "/auth/?k=q", Some("application/x-www-form-urlencoded"));
        let f = parse_form(&p, b"k=b").unwrap();
        assert_eq!(f.get_all("k").collect::<Vec<_>>(), vec!["b", "q"]);

        let p = parts(Method::GET, "/auth/?k=q", Some("application/x-www-form-urlencoded"));
        let f = parse_form(&p, b"k=b").unwrap();
        assert_eq!(f.get_all("k").collect::<Vec<_>>(), vec!["q"]);

        let p = parts(Method::POST, "/auth/", Some("text/plain"));
        assert!(parse_form(&p, b"k=b").unwrap().is_empty());
    }

    #[test]
    fn bad_query_fails_strict_parse_only() {
        let p = parts(Method::GET, "/auth/?Authorization=x&bad=%zz", None);
        assert!(parse_form(&p, b"").is_err());
        let (f, err) = collect_form(&p, b"");
        assert!(err.is_some());
        assert_eq!(f.first("Authorization"), Some("x"));
    }
}
