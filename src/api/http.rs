//! REST implementation of [`TicketApi`] on top of reqwest.
//!
//! Every request carries the configured timeout. Transient failures are
//! retried at most `max_retries` times (never more than once), following the
//! request's [`RetryPolicy`]: reads and status updates retry on timeouts,
//! connection failures and 5xx responses, while creates only retry when the
//! connection itself failed.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use crate::config::{Config, MAX_RETRIES_LIMIT};
use crate::error::{DeskError, Result};
use crate::types::{Classification, DraftTicket, StatsSnapshot, StatusPatch, Ticket, TicketStatus};

use super::error::{RetryPolicy, status_error};
use super::{CreateOutcome, TicketApi};

/// Pause before the single retry
const RETRY_DELAY: Duration = Duration::from_millis(250);

/// Connect timeout ceiling; the overall request timeout still applies
const MAX_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Ticket API over HTTP
#[derive(Debug, Clone)]
pub struct HttpTicketApi {
    client: Client,
    /// Base URL without trailing slash, e.g. `http://127.0.0.1:8000/api`
    base: String,
    max_retries: u32,
}

impl HttpTicketApi {
    /// Create a client from configuration, honouring `HELPDESK_API_BASE`
    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;
        Self::build(&config.api_base(), config)
    }

    /// Create a client for `base` with default timeouts
    pub fn new(base: &str) -> Result<Self> {
        Self::build(base, &Config::default())
    }

    fn build(base: &str, config: &Config) -> Result<Self> {
        crate::config::validate_api_base(base)?;

        let timeout = config.request_timeout();
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout.min(MAX_CONNECT_TIMEOUT))
            .build()?;

        Ok(Self {
            client,
            base: base.trim_end_matches('/').to_string(),
            max_retries: config.max_retries(),
        })
    }

    /// Override the retry budget (clamped to one retry)
    pub fn with_max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries.min(MAX_RETRIES_LIMIT);
        self
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    fn url(&self, path: &str) -> String {
        format!("{}/tickets/{}", self.base, path)
    }

    /// Send a request, retrying transient failures within the budget.
    ///
    /// Returns the final response whatever its status; callers decide what a
    /// non-success status means for their operation.
    async fn send<F>(&self, op: &'static str, policy: RetryPolicy, build: F) -> Result<Response>
    where
        F: Fn() -> RequestBuilder,
    {
        let mut attempt = 0;
        loop {
            tracing::debug!(op, attempt, "sending ticket API request");
            match build().send().await {
                Ok(response) => {
                    let status = response.status();
                    if !status.is_success()
                        && attempt < self.max_retries
                        && policy.allows_status(status)
                    {
                        tracing::warn!(op, %status, "transient status, retrying");
                        attempt += 1;
                        tokio::time::sleep(RETRY_DELAY).await;
                        continue;
                    }
                    return Ok(response);
                }
                Err(e) => {
                    if attempt < self.max_retries && policy.allows_error(&e) {
                        tracing::warn!(op, error = %e, "request failed, retrying");
                        attempt += 1;
                        tokio::time::sleep(RETRY_DELAY).await;
                        continue;
                    }
                    tracing::warn!(op, error = %e, "request failed");
                    return Err(DeskError::from(e));
                }
            }
        }
    }

    /// Require a 2xx status and decode the JSON body
    async fn json_body<T: DeserializeOwned>(op: &'static str, response: Response) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(op, %status, "ticket API returned an error status");
            return Err(status_error(status, &body));
        }
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| DeskError::Decode(format!("{op}: {e}")))
    }
}

impl TicketApi for HttpTicketApi {
    async fn list_tickets(&self, query: &str) -> Result<Vec<Ticket>> {
        let url = self.url(query);
        let response = self
            .send("list_tickets", RetryPolicy::Idempotent, || self.client.get(&url))
            .await?;
        Self::json_body("list_tickets", response).await
    }

    async fn get_ticket(&self, id: u64) -> Result<Ticket> {
        let url = self.url(&format!("{id}/"));
        let response = self
            .send("get_ticket", RetryPolicy::Idempotent, || self.client.get(&url))
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(DeskError::TicketNotFound(id));
        }
        Self::json_body("get_ticket", response).await
    }

    async fn create_ticket(&self, draft: &DraftTicket) -> Result<CreateOutcome> {
        let url = self.url("");
        let response = self
            .send("create_ticket", RetryPolicy::ConnectOnly, || {
                self.client.post(&url).json(draft)
            })
            .await?;

        let status = response.status();
        if status.is_server_error() {
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(status, &body));
        }

        // 2xx and 4xx bodies both describe the outcome
        let bytes = response.bytes().await?;
        let body: Value = if bytes.is_empty() {
            json!({})
        } else {
            match serde_json::from_slice(&bytes) {
                Ok(value) => value,
                Err(_) if status.is_client_error() => {
                    return Err(status_error(status, &String::from_utf8_lossy(&bytes)));
                }
                Err(e) => return Err(DeskError::Decode(format!("create_ticket: {e}"))),
            }
        };

        let outcome = CreateOutcome::from_body(body, draft)?;
        if !outcome.is_created() {
            tracing::warn!(%status, "ticket creation rejected");
        }
        Ok(outcome)
    }

    async fn classify_description(&self, description: &str) -> Result<Classification> {
        let url = self.url("classify/");
        let body = json!({ "description": description });
        let response = self
            .send("classify_description", RetryPolicy::Idempotent, || {
                self.client.post(&url).json(&body)
            })
            .await?;
        Self::json_body("classify_description", response).await
    }

    async fn update_ticket(&self, id: u64, status: TicketStatus) -> Result<Ticket> {
        let url = self.url(&format!("{id}/"));
        let patch = StatusPatch { status };
        let response = self
            .send("update_ticket", RetryPolicy::Idempotent, || {
                self.client.patch(&url).json(&patch)
            })
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(DeskError::TicketNotFound(id));
        }
        Self::json_body("update_ticket", response).await
    }

    async fn delete_ticket(&self, id: u64) -> Result<()> {
        let url = self.url(&format!("{id}/"));
        let response = self
            .send("delete_ticket", RetryPolicy::Idempotent, || self.client.delete(&url))
            .await?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(DeskError::TicketNotFound(id));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(status, &body));
        }
        Ok(())
    }

    async fn get_stats(&self) -> Result<StatsSnapshot> {
        let url = self.url("stats/");
        let response = self
            .send("get_stats", RetryPolicy::Idempotent, || self.client.get(&url))
            .await?;
        Self::json_body("get_stats", response).await
    }
}
