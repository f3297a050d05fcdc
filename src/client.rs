use std::time::Duration;
use reqwest::{Client, Url};
use tracing::{debug, warn};
use crate::error::CompletionError;
use crate::models::{CompletionRequest, CompletionResponse};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Blocking-from-the-caller's-view client for one chat-completion endpoint.
pub struct CompletionClient {
    http_client: Client,
    endpoint: Url,
    api_key: String,
    timeout: Duration
}

impl CompletionClient {

    /// Validates the endpoint and key up front so that a bad configuration
    /// never reaches the network.
    pub fn new(endpoint: &str, api_key: &str, timeout: Duration) -> Result<Self, CompletionError> {

        let endpoint = endpoint.trim();
        if endpoint.is_empty() {
            return Err(CompletionError::Config("endpoint must be set".to_string()));
        }

        let api_key = api_key.trim();
        if api_key.is_empty() {
            return Err(CompletionError::Config("API key must be set".to_string()));
        }

        if timeout.is_zero() {
            return Err(CompletionError::Config("timeout must be greater than zero".to_string()));
        }

        let endpoint = Url::parse(endpoint)
            .map_err(|e| CompletionError::Config(format!("invalid endpoint {}: {}", endpoint, e)))?;

        Ok(CompletionClient {
            http_client: Client::new(),
            endpoint,
            api_key: api_key.to_string(),
            timeout
        })

    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Sends `request` once and decodes the reply.
    ///
    /// Non-2xx answers are not decoded; their body comes back in
    /// [`CompletionError::Rejected`]. A 2xx body that does not decode comes
    /// back in [`CompletionError::Decode`].
    pub async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, CompletionError> {

        debug!(endpoint = %self.endpoint, model = %request.model, messages = request.messages.len(), "sending completion request");

        let response = self.http_client
            .post(self.endpoint.clone())
            .timeout(self.timeout)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(request)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();

        // read everything first so the body is available for diagnostics
        let body = response
            .bytes()
            .await
            .map_err(|e| self.transport_error(e))?;

        debug!(%status, bytes = body.len(), "received completion response");

        if !status.is_success() {
            let body = String::from_utf8_lossy(&body).into_owned();
            warn!(%status, "endpoint rejected completion request");
            return Err(CompletionError::Rejected { status, body });
        }

        decode_response(&body)

    }

    fn transport_error(&self, err: reqwest::Error) -> CompletionError {

        if err.is_timeout() {
            CompletionError::Timeout(self.timeout)
        } else {
            CompletionError::Transport(err)
        }

    }

}

/// Decodes a completion body, keeping the raw text if it does not fit.
pub fn decode_response(body: &[u8]) -> Result<CompletionResponse, CompletionError> {

    serde_json::from_slice(body).map_err(|source| CompletionError::Decode {
        source,
        body: String::from_utf8_lossy(body).into_owned()
    })

}
