//! The remote arithmetic service.
//!
//! Every endpoint answers with `{"result": <number>}`. Anything else, be it
//! a transport error, a non-2xx status or a body without `result`, is
//! reported as [`CalcError::RemoteComputationFailed`]; the details only go
//! to the log.

use async_trait::async_trait;

use crate::config::CalcConfig;
use crate::core::{CalcError, CalcResult};
use crate::presenter::{AddResponse, ResultValue};
use crate::request::AddRequest;

/// Something that can sum the operands of a shaped request
#[async_trait]
pub trait ArithmeticService: Send + Sync {
    /// Sends `request` and waits for the sum
    async fn add(&self, request: &AddRequest) -> CalcResult<ResultValue>;
}

#[derive(Debug, thiserror::Error)]
enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("service answered {status}: {body}")]
    Status { status: u16, body: String },
}

/// HTTP client for the `/math/add` service.
///
/// No timeout is configured; a request runs until the transport gives up.
#[derive(Debug, Clone)]
pub struct HttpArithmetic {
    base_url: String,
    client: reqwest::Client,
}

impl HttpArithmetic {
    /// Creates a client for the service rooted at `base_url`
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, reqwest::Client::new())
    }

    /// Creates a client from a configuration
    pub fn from_config(config: &CalcConfig) -> Self {
        Self::new(config.endpoint.clone())
    }

    /// Creates a client reusing an existing reqwest client
    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Returns the service root
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn send(&self, request: &AddRequest) -> Result<ResultValue, TransportError> {
        let url = request.url(&self.base_url);
        let builder = match request {
            AddRequest::Path { .. } | AddRequest::Query(_) => self.client.get(&url),
            AddRequest::Form(fields) => {
                let form = fields
                    .iter()
                    .fold(reqwest::multipart::Form::new(), |form, (key, value)| {
                        form.text(key.clone(), value.clone())
                    });
                self.client.post(&url).multipart(form)
            }
        };
        tracing::debug!(%url, method = %request.method(), "sending add request");

        let resp = builder.send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }
        let body: AddResponse = resp.json().await?;
        Ok(body.result)
    }
}

#[async_trait]
impl ArithmeticService for HttpArithmetic {
    async fn add(&self, request: &AddRequest) -> CalcResult<ResultValue> {
        self.send(request).await.map_err(|err| {
            tracing::warn!(error = %err, base = %self.base_url, "add request failed");
            CalcError::RemoteComputationFailed
        })
    }
}
