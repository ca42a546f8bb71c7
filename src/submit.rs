//! HTTP client for the sequencer's submission endpoint.

use crate::config::Config;
use crate::error::SubmitError;
use crate::transaction::RawTransaction;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use url::Url;

/// Fallback reason when a failure response has no `error` field
pub const GENERIC_FAILURE: &str = "Transaction failed";

#[derive(Serialize)]
struct SubmitRequest<'a> {
    raw_tx: &'a RawTransaction,
}

/// Either shape the sequencer answers with
#[derive(Debug, Deserialize)]
struct SubmitResponse {
    status: Option<String>,
    error: Option<String>,
}

#[derive(Debug, Clone)]
pub struct SubmissionClient {
    http: Client,
    endpoint: Url,
    bearer_token: Option<String>,
}

impl SubmissionClient {
    pub fn new(config: &Config) -> Result<Self, SubmitError> {
        let http = Client::builder().timeout(config.request_timeout).build()?;
        Ok(Self {
            http,
            endpoint: config.submit_url(),
            bearer_token: config.bearer_token.clone(),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// POST one transaction and return the accepted status string.
    ///
    /// Exactly one request is made; there are no retries.
    pub async fn submit(&self, tx: &RawTransaction) -> Result<String, SubmitError> {
        let mut request = self
            .http
            .post(self.endpoint.clone())
            .json(&SubmitRequest { raw_tx: tx });
        if let Some(token) = &self.bearer_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| {
            tracing::warn!("Failed to send transaction {}: {}", tx.nonce, e);
            SubmitError::Transport(e)
        })?;

        let status = response.status();
        let body = response.text().await?;
        tracing::debug!("Submission response {}: {}", status, body);

        interpret_response(status, &body)
    }
}

/// Map a status code and raw body to the accepted status or a failure.
pub fn interpret_response(status: StatusCode, body: &str) -> Result<String, SubmitError> {
    let parsed: SubmitResponse = match serde_json::from_str(body) {
        Ok(parsed) => parsed,
        Err(_) => return Err(SubmitError::UnexpectedResponse(body.to_string())),
    };

    if !status.is_success() {
        let reason = parsed.error.unwrap_or_else(|| GENERIC_FAILURE.to_string());
        return Err(SubmitError::Rejected(reason));
    }

    parsed
        .status
        .ok_or_else(|| SubmitError::UnexpectedResponse(body.to_string()))
}
