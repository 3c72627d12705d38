//! URL-encoded form values.
//!
//! Keeps every `key=value` pair in arrival order so repeated keys (`arg=2&arg=5`)
//! and multi-valued operands can be told apart from single values.

use crate::error::{OpsGateError, Result};

/// Ordered multi-map of decoded form pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues {
    pairs: Vec<(String, String)>,
}

impl FormValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a raw query string (without the leading `?`).
    ///
    /// Fails on the first `;` separator or malformed `%` escape.
    pub fn parse(query: &str) -> Result<Self> {
        Self::parse_bytes(query.as_bytes())
    }

    /// Parse a form-encoded request body.
    pub fn parse_bytes(body: &[u8]) -> Result<Self> {
        match Self::parse_partial(body) {
            (values, None) => Ok(values),
            (_, Some(err)) => Err(err),
        }
    }

    /// Parse every well-formed pair and skip the rest.
    ///
    /// Returns the first rejection alongside the pairs that did decode.
    pub fn parse_partial(raw: &[u8]) -> (Self, Option<OpsGateError>) {
        let mut values = Self::new();
        let mut first_err = None;
        for segment in raw.split(|b| *b == b'&').filter(|s| !s.is_empty()) {
            let decoded = check_segment(segment).and_then(|()| {
                serde_urlencoded::from_bytes::<Vec<(String, String)>>(segment)
                    .map_err(|e| OpsGateError::FormParse(e.to_string()))
            });
            match decoded {
                Ok(pairs) => values.pairs.extend(pairs),
                Err(e) => {
                    first_err.get_or_insert(e);
                }
            }
        }
        (values, first_err)
    }

    /// Append all pairs of `other` after the current ones.
    pub fn extend(&mut self, other: FormValues) {
        self.pairs.extend(other.pairs);
    }

    /// All values for `key`, in order.
    pub fn get_all<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.pairs
            .iter()
            .filter(move |(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// First value for `key`, if any.
    pub fn first(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }
}

fn check_segment(segment: &[u8]) -> Result<()> {
    if segment.contains(&b';') {
        return Err(OpsGateError::FormParse(
            "invalid semicolon separator in query".into(),
        ));
    }
    check_escapes(segment).map_err(OpsGateError::FormParse)
}

/// Every `%` must introduce two hex digits.
pub(crate) fn check_escapes(raw: &[u8]) -> std::result::Result<(), String> {
    let mut i = 0;
    while i < raw.len() {
        if raw[i] != b'%' {
            i += 1;
            continue;
        }
        let escape = raw.get(i..i + 3).unwrap_or(&raw[i..]);
        if escape.len() < 3 || !escape[1..].iter().all(u8::is_ascii_hexdigit) {
            return Err(format!(
                "invalid URL escape {:?}",
                String::from_utf8_lossy(escape)
            ));
        }
        i += 3;
    }
    Ok(())
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormValues {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            pairs: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}
