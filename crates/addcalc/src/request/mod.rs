//! Request shaping: turns a finished equation into one of three wire shapes.
//!
//! ```text
//! "2+(-3.5)"  --operands-->  ["2", "-3.5"]
//!   PathParams   GET  {base}/2/-3.5
//!   QueryParams  GET  {base}?kq=2&xe=-3.5
//!   FormPost     POST {base}/   (multipart: kq=2, xe=-3.5)
//! ```

pub mod ids;

pub use ids::{unique_ids, IdSource, RandomIds, KEY_SPACE};

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::{CalcError, CalcResult, CalcState};

/// How the operands travel to the service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Method {
    /// `GET {base}/{a}/{b}`
    PathParams,
    /// `GET {base}?k1=v1&k2=v2...`
    QueryParams,
    /// `POST {base}/` with a multipart form
    FormPost,
}

impl Method {
    /// All methods in menu order
    pub const ALL: [Self; 3] = [Self::PathParams, Self::QueryParams, Self::FormPost];

    /// Menu text describing the endpoint shape
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::PathParams => "get: /math/add/a/b",
            Self::QueryParams => "get: /math/add?a=a&b=b",
            Self::FormPost => "post: /math/add/",
        }
    }

    /// Short name used on the command line
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::PathParams => "path",
            Self::QueryParams => "query",
            Self::FormPost => "form",
        }
    }

    /// Whether the method menu offers this method for `state`.
    ///
    /// Path parameters only fit two operands, so they are withdrawn once
    /// more than one `+` has been committed.
    #[must_use]
    pub fn is_available(self, state: &CalcState) -> bool {
        match self {
            Self::PathParams => state.committed_operators() <= 1,
            Self::QueryParams | Self::FormPost => true,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A fully shaped request, ready for the transport
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum AddRequest {
    /// Two positional path segments
    Path {
        /// First operand
        first: String,
        /// Second operand
        second: String,
    },
    /// Keyed query parameters, in operand order
    Query(Vec<(String, String)>),
    /// Keyed multipart form fields, in operand order
    Form(Vec<(String, String)>),
}

impl AddRequest {
    /// The method this request was shaped for
    #[must_use]
    pub const fn method(&self) -> Method {
        match self {
            Self::Path { .. } => Method::PathParams,
            Self::Query(_) => Method::QueryParams,
            Self::Form(_) => Method::FormPost,
        }
    }

    /// Keyed parameters; empty for path requests
    #[must_use]
    pub fn params(&self) -> &[(String, String)] {
        match self {
            Self::Path { .. } => &[],
            Self::Query(params) | Self::Form(params) => params,
        }
    }

    /// Renders `k1=v1&k2=v2` with no trailing separator
    #[must_use]
    pub fn query_string(&self) -> String {
        self.params()
            .iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Target URL relative to the service `base`
    #[must_use]
    pub fn url(&self, base: &str) -> String {
        let base = base.trim_end_matches('/');
        match self {
            Self::Path { first, second } => format!("{base}/{first}/{second}"),
            Self::Query(_) => format!("{base}?{}", self.query_string()),
            Self::Form(_) => format!("{base}/"),
        }
    }
}

/// Splits an equation on `+` and unwraps parenthesized negatives.
#[must_use]
pub fn operands(equation: &str) -> Vec<String> {
    equation
        .split('+')
        .map(|token| {
            token
                .strip_prefix('(')
                .map_or(token, |inner| inner.strip_suffix(')').unwrap_or(inner))
                .to_string()
        })
        .collect()
}

/// Shapes `equation` for `method`, drawing parameter keys from `ids`.
pub fn shape<S>(equation: &str, method: Method, ids: &mut S) -> CalcResult<AddRequest>
where
    S: IdSource + ?Sized,
{
    let values = operands(equation);
    let request = match method {
        Method::PathParams => match <[String; 2]>::try_from(values) {
            Ok([first, second]) => AddRequest::Path { first, second },
            Err(values) => {
                return Err(CalcError::PathParamsArity {
                    found: values.len(),
                })
            }
        },
        Method::QueryParams => AddRequest::Query(keyed(values, ids)?),
        Method::FormPost => AddRequest::Form(keyed(values, ids)?),
    };
    tracing::debug!(%equation, ?method, ?request, "shaped request");
    Ok(request)
}

fn keyed<S>(values: Vec<String>, ids: &mut S) -> CalcResult<Vec<(String, String)>>
where
    S: IdSource + ?Sized,
{
    let keys = unique_ids(values.len(), ids)?;
    Ok(keys.into_iter().zip(values).collect())
}
