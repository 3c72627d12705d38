//! Operations: path matching, operand extraction, and arithmetic.
//!
//! Everything here is transport-agnostic. The gateway decides which
//! [`OperandSource`] a request maps to and hands over raw strings/bytes.

use percent_encoding::percent_decode_str;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{OpsGateError, Result};
use crate::form::{check_escapes, FormValues};

/// Form key of the first operand.
pub const OPERAND1: &str = "operand1";
/// Form key of the second operand.
pub const OPERAND2: &str = "operand2";
/// Repeated query key read by the `list` operation.
pub const LIST_ARG: &str = "arg";

/// Operation names advertised by the directory response (`list` is unlisted).
pub const KNOWN_OPS: [&str; 4] = ["add", "subtract", "echo", "error"];

/// Directory/help body returned for an empty or unknown operation name.
pub const DIRECTORY_JSON: &str = r#"["add","subtract","echo","error"]"#;

/// Supported operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Op {
    Add,
    Subtract,
    Echo,
    Error,
    List,
}

impl Op {
    /// Resolve a path segment. Names are case-sensitive.
    pub fn from_name(name: &str) -> Option<Op> {
        match name {
            "add" => Some(Op::Add),
            "subtract" => Some(Op::Subtract),
            "echo" => Some(Op::Echo),
            "error" => Some(Op::Error),
            "list" => Some(Op::List),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Op::Add => "add",
            Op::Subtract => "subtract",
            Op::Echo => "echo",
            Op::Error => "error",
            Op::List => "list",
        }
    }

    /// Whether this operation reads two operands and produces an [`Operation`].
    pub fn is_arithmetic(self) -> bool {
        matches!(self, Op::Add | Op::Subtract | Op::Echo)
    }
}

/// Result of matching a request target against the ops prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathMatch {
    /// Alphanumeric operation segment, possibly empty.
    pub op_name: String,
    /// Everything after an optional `?`, possibly empty.
    pub params: String,
}

impl PathMatch {
    pub fn op(&self) -> Option<Op> {
        Op::from_name(&self.op_name)
    }
}

/// Compiled matcher for `^/<prefix>/([[:alnum:]]*)\??(.*)$`.
#[derive(Debug, Clone)]
pub struct OpsPath {
    re: Regex,
}

impl OpsPath {
    pub fn new(prefix: &str) -> Result<Self> {
        let pattern = format!(r"^/{}/([[:alnum:]]*)\??(.*)$", regex::escape(prefix));
        let re = Regex::new(&pattern)
            .map_err(|e| OpsGateError::Config(format!("ops path pattern: {e}")))?;
        Ok(Self { re })
    }

    /// Match a request target (path, optionally followed by `?query`).
    pub fn match_target(&self, target: &str) -> Result<PathMatch> {
        let caps = self
            .re
            .captures(target)
            .ok_or_else(|| OpsGateError::PathMismatch(target.to_string()))?;
        let group = |i| caps.get(i).map_or("", |m| m.as_str()).to_string();
        Ok(PathMatch {
            op_name: group(1),
            params: group(2),
        })
    }
}

/// Percent-decode a raw request path. Malformed escapes fail the match.
pub fn decode_path(raw: &str) -> Result<String> {
    check_escapes(raw.as_bytes()).map_err(|_| OpsGateError::PathMismatch(raw.to_string()))?;
    Ok(percent_decode_str(raw).decode_utf8_lossy().into_owned())
}

/// Where the operands of an arithmetic request come from.
#[derive(Debug, Clone, Copy)]
pub enum OperandSource<'a> {
    /// GET: mandatory single-valued form fields.
    Form(&'a FormValues),
    /// POST: JSON object body.
    Json(&'a [u8]),
    /// Any other method: both operands default to zero.
    Absent,
}

/// One arithmetic request and its result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operation {
    pub operand1: i64,
    pub operand2: i64,
    pub operation: Op,
    #[serde(default)]
    pub result: i64,
}

#[derive(Debug, Default, Deserialize)]
struct OperandsBody {
    #[serde(default)]
    operand1: i64,
    #[serde(default)]
    operand2: i64,
}

impl Operation {
    pub fn new(op: Op) -> Self {
        Self {
            operand1: 0,
            operand2: 0,
            operation: op,
            result: 0,
        }
    }

    /// Fill operands from `source`. Any invalid operand fails the whole build.
    pub fn build(op: Op, source: OperandSource<'_>) -> Result<Self> {
        let mut oper = Operation::new(op);
        match source {
            OperandSource::Form(form) => {
                oper.operand1 = operand_from_form(form, OPERAND1)?;
                oper.operand2 = operand_from_form(form, OPERAND2)?;
            }
            OperandSource::Json(body) => {
                let vals = decode_operands(body)?;
                oper.operand1 = vals.operand1;
                oper.operand2 = vals.operand2;
            }
            OperandSource::Absent => {}
        }
        Ok(oper)
    }

    /// Compute `result` in place. `echo` always yields zero.
    pub fn compute(&mut self) {
        self.result = match self.operation {
            Op::Add => self.operand1.wrapping_add(self.operand2),
            Op::Subtract => self.operand1.wrapping_sub(self.operand2),
            Op::Echo | Op::Error | Op::List => 0,
        };
    }

    pub fn computed(mut self) -> Self {
        self.compute();
        self
    }

    pub fn to_json(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }
}

/// Read a mandatory single-valued integer field.
pub fn operand_from_form(form: &FormValues, key: &str) -> Result<i64> {
    let mut vals = form.get_all(key);
    let first = vals
        .next()
        .ok_or_else(|| OpsGateError::MissingOperand(key.to_string()))?;
    if vals.next().is_some() {
        return Err(OpsGateError::InvalidOperandValue {
            key: key.to_string(),
            reason: "multiple values".into(),
        });
    }
    first
        .parse::<i64>()
        .map_err(|e| OpsGateError::InvalidOperandValue {
            key: key.to_string(),
            reason: e.to_string(),
        })
}

// Decodes the first JSON value in the body; trailing bytes are not inspected.
// A `null` document leaves both operands at zero.
fn decode_operands(body: &[u8]) -> Result<OperandsBody> {
    serde_json::Deserializer::from_slice(body)
        .into_iter::<Option<OperandsBody>>()
        .next()
        .ok_or_else(|| OpsGateError::BodyDecodeFailure("EOF".into()))?
        .map(Option::unwrap_or_default)
        .map_err(|e| OpsGateError::BodyDecodeFailure(e.to_string()))
}

/// `{data}` wrapper returned by the `list` operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListItem {
    pub data: String,
}

/// Collect `arg` values from the trailing path params, or from the URL query
/// when the path carried none.
pub fn list_items(params: &str, query: Option<&str>) -> Result<Vec<ListItem>> {
    let source = if params.is_empty() {
        query.unwrap_or_default()
    } else {
        params
    };
    let parsed = FormValues::parse(source)?;
    let items: Vec<ListItem> = parsed
        .get_all(LIST_ARG)
        .map(|a| ListItem { data: a.to_string() })
        .collect();
    if items.is_empty() {
        return Err(OpsGateError::MissingArguments(LIST_ARG.into()));
    }
    Ok(items)
}

/// True when the media type of a `Content-Type` value is `application/json`.
pub fn is_json_content(content_type: Option<&str>) -> bool {
    content_type
        .and_then(|ct| ct.split(';').next())
        .map(|mt| mt.trim().eq_ignore_ascii_case("application/json"))
        .unwrap_or(false)
}
