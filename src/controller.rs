//! Preview/submit state for the send button.
//!
//! Submission is split into [`SubmissionController::begin_submit`] and
//! [`SubmissionController::finish_submit`] so the request itself can run off the
//! UI thread. Only one request may be outstanding; while it is, the trigger is
//! disabled and `begin_submit` returns `None`.

use crate::error::SubmitError;
use crate::submit::SubmissionClient;
use crate::transaction::{generate_preview, RawTransaction};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Result of a finished submission, for logging and notifications
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Accepted { nonce: u64, status: String },
    Failed { nonce: u64, error: String },
}

pub struct SubmissionController {
    nonce: u64,
    preview: Option<RawTransaction>,
    status: String,
    error: String,
    in_flight: bool,
    rng: StdRng,
}

impl Default for SubmissionController {
    fn default() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }
}

impl SubmissionController {
    /// Controller with no preview yet; call [`mount`](Self::mount) to generate one
    pub fn new() -> Self {
        Self::default()
    }

    /// Deterministic randomness, for tests
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            nonce: 0,
            preview: None,
            status: String::new(),
            error: String::new(),
            in_flight: false,
            rng,
        }
    }

    /// Generate the initial preview
    pub fn mount(&mut self) {
        self.regenerate_preview();
    }

    fn regenerate_preview(&mut self) {
        self.preview = Some(generate_preview(self.nonce, &mut self.rng));
    }

    pub fn nonce(&self) -> u64 {
        self.nonce
    }

    pub fn preview(&self) -> Option<&RawTransaction> {
        self.preview.as_ref()
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn error(&self) -> &str {
        &self.error
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    /// Whether the send button should be enabled
    pub fn can_submit(&self) -> bool {
        self.preview.is_some() && !self.in_flight
    }

    /// Clear status/error and hand out the preview to send.
    ///
    /// Returns `None` (and changes nothing) when there is no preview or a
    /// request is already outstanding.
    pub fn begin_submit(&mut self) -> Option<RawTransaction> {
        if !self.can_submit() {
            return None;
        }
        let tx = self.preview.clone()?;
        self.status.clear();
        self.error.clear();
        self.in_flight = true;
        Some(tx)
    }

    /// Record the result of the outstanding request.
    pub fn finish_submit(&mut self, result: Result<String, SubmitError>) -> SubmitOutcome {
        self.in_flight = false;
        let nonce = self.nonce;
        match result {
            Ok(status) => {
                tracing::info!("Transaction with nonce {} accepted: {}", nonce, status);
                self.status = status.clone();
                self.error.clear();
                self.nonce += 1;
                self.regenerate_preview();
                SubmitOutcome::Accepted { nonce, status }
            }
            Err(e) => {
                let error = e.to_string();
                tracing::warn!("Transaction with nonce {} failed: {}", nonce, error);
                self.status.clear();
                self.error = error.clone();
                SubmitOutcome::Failed { nonce, error }
            }
        }
    }

    /// Run a whole submission inline (headless use).
    ///
    /// Returns `None` when there was nothing to send.
    pub async fn submit(&mut self, client: &SubmissionClient) -> Option<SubmitOutcome> {
        let tx = self.begin_submit()?;
        let result = client.submit(&tx).await;
        Some(self.finish_submit(result))
    }
}
