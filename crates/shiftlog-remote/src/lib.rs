// SPDX-FileCopyrightText: 2026 Shiftlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP implementation of [`RemoteStore`].
//!
//! Every delivery carries the operation id in an `Idempotency-Key` header
//! (and in the entry body) so the store can drop redeliveries of an
//! operation whose earlier response was lost.

pub mod wire;

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use reqwest::{Method, RequestBuilder, StatusCode};
use shiftlog_config::model::RemoteConfig;
use shiftlog_core::{
    AdapterType, HealthStatus, Mutation, PluginAdapter, QueuedOperation, RemoteStore, Shift,
    ShiftId, ShiftlogError,
};
use tracing::{debug, info, warn};

use crate::wire::{EndShiftBody, EntryMutationBody, ErrorBody};

/// Header carrying the operation id on every delivery.
pub const IDEMPOTENCY_HEADER: &str = "Idempotency-Key";

/// Remote shift store reached over HTTP.
#[derive(Debug, Clone)]
pub struct HttpRemote {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl HttpRemote {
    /// Creates a client from the `[remote]` config section.
    pub fn new(config: &RemoteConfig) -> Result<Self, ShiftlogError> {
        let mut headers = HeaderMap::new();
        if let Some(token) = config.api_token.as_deref().filter(|t| !t.trim().is_empty()) {
            headers.insert(
                AUTHORIZATION,
                HeaderValue::from_str(&format!("Bearer {token}")).map_err(|e| {
                    ShiftlogError::Config(format!("invalid API token header value: {e}"))
                })?,
            );
        }

        let timeout = Duration::from_secs(config.timeout_secs);
        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| ShiftlogError::Remote {
                message: format!("failed to build HTTP client: {e}"),
                status: None,
                source: Some(Box::new(e)),
            })?;

        info!(base_url = %config.base_url, "remote store client initialized");
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout,
        })
    }

    fn shift_url(&self, shift_id: &ShiftId) -> String {
        format!("{}/shifts/{}", self.base_url, shift_id)
    }

    fn request_for(&self, operation: &QueuedOperation) -> RequestBuilder {
        let shift_url = self.shift_url(&operation.shift_id);
        let builder = match &operation.mutation {
            Mutation::Append { entry } => self
                .client
                .post(format!("{shift_url}/entries"))
                .json(&EntryMutationBody {
                    entry,
                    is_update: false,
                    entry_index: None,
                    operation_id: operation.id,
                }),
            Mutation::Update { index, entry } => self
                .client
                .post(format!("{shift_url}/entries"))
                .json(&EntryMutationBody {
                    entry,
                    is_update: true,
                    entry_index: Some(*index),
                    operation_id: operation.id,
                }),
            Mutation::Delete { index, entry_id } => self
                .client
                .request(
                    Method::DELETE,
                    format!("{shift_url}/entries/{index}?entryId={entry_id}"),
                ),
            Mutation::Complete { summary } => self
                .client
                .post(format!("{shift_url}/end"))
                .json(&EndShiftBody { summary }),
        };
        builder.header(IDEMPOTENCY_HEADER, operation.id.to_string())
    }

    async fn send_for_shift(&self, builder: RequestBuilder) -> Result<Shift, ShiftlogError> {
        let response = builder.send().await.map_err(|e| self.transport_error(e))?;
        let status = response.status();
        let body = response.text().await.map_err(|e| self.transport_error(e))?;

        if !status.is_success() {
            return Err(status_error(status, &body));
        }
        serde_json::from_str(&body).map_err(|e| ShiftlogError::Remote {
            message: format!("failed to parse shift document: {e}"),
            status: Some(status.as_u16()),
            source: Some(Box::new(e)),
        })
    }

    fn transport_error(&self, err: reqwest::Error) -> ShiftlogError {
        if err.is_timeout() {
            ShiftlogError::Timeout {
                duration: self.timeout,
            }
        } else {
            ShiftlogError::Remote {
                message: format!("HTTP request failed: {err}"),
                status: None,
                source: Some(Box::new(err)),
            }
        }
    }
}

fn status_error(status: StatusCode, body: &str) -> ShiftlogError {
    let detail = serde_json::from_str::<ErrorBody>(body)
        .map(|b| b.error)
        .unwrap_or_else(|_| body.trim().to_string());
    let message = if detail.is_empty() {
        format!("remote store returned {status}")
    } else {
        format!("remote store returned {status}: {detail}")
    };
    ShiftlogError::Remote {
        message,
        status: Some(status.as_u16()),
        source: None,
    }
}

#[async_trait]
impl PluginAdapter for HttpRemote {
    fn name(&self) -> &str {
        "http-remote"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Remote
    }

    async fn health_check(&self) -> Result<HealthStatus, ShiftlogError> {
        match self.client.get(format!("{}/health", self.base_url)).send().await {
            Ok(resp) if resp.status().is_success() => Ok(HealthStatus::Healthy),
            Ok(resp) => Ok(HealthStatus::Degraded(format!(
                "health endpoint returned {}",
                resp.status()
            ))),
            Err(e) => Ok(HealthStatus::Unhealthy(e.to_string())),
        }
    }
}

#[async_trait]
impl RemoteStore for HttpRemote {
    async fn deliver(&self, operation: &QueuedOperation) -> Result<Shift, ShiftlogError> {
        debug!(
            operation_id = %operation.id,
            shift_id = %operation.shift_id,
            kind = operation.mutation.kind(),
            "delivering operation"
        );
        let result = self.send_for_shift(self.request_for(operation)).await;
        if let Err(e) = &result {
            warn!(operation_id = %operation.id, error = %e, "delivery failed");
        }
        result
    }

    async fn fetch_shift(&self, shift_id: &ShiftId) -> Result<Shift, ShiftlogError> {
        debug!(shift_id = %shift_id, "fetching shift");
        self.send_for_shift(self.client.get(self.shift_url(shift_id)))
            .await
    }
}
