// SPDX-FileCopyrightText: 2026 Shiftlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Scripted text-polish collaborator.

use std::collections::VecDeque;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use shiftlog_core::{
    AdapterType, HealthStatus, PluginAdapter, PolishAdapter, PolishRequest, ShiftlogError,
};

/// A polisher that answers from a FIFO script.
///
/// An exhausted script behaves like an unavailable service.
pub struct MockPolisher {
    script: Mutex<VecDeque<Result<String, String>>>,
    requests: Mutex<Vec<PolishRequest>>,
    delay: Option<Duration>,
}

impl MockPolisher {
    pub fn new() -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
            delay: None,
        }
    }

    /// Makes every call sleep before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub async fn push_reply(&self, text: &str) {
        self.script.lock().await.push_back(Ok(text.to_string()));
    }

    pub async fn push_failure(&self, message: &str) {
        self.script.lock().await.push_back(Err(message.to_string()));
    }

    /// Every request received so far, in order.
    pub async fn requests(&self) -> Vec<PolishRequest> {
        self.requests.lock().await.clone()
    }
}

impl Default for MockPolisher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PluginAdapter for MockPolisher {
    fn name(&self) -> &str {
        "mock-polisher"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Polish
    }

    async fn health_check(&self) -> Result<HealthStatus, ShiftlogError> {
        Ok(HealthStatus::Healthy)
    }
}

#[async_trait]
impl PolishAdapter for MockPolisher {
    async fn polish(&self, request: PolishRequest) -> Result<String, ShiftlogError> {
        self.requests.lock().await.push(request);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        match self.script.lock().await.pop_front() {
            Some(Ok(text)) => Ok(text),
            Some(Err(message)) => Err(ShiftlogError::Polish {
                message,
                source: None,
            }),
            None => Err(ShiftlogError::Polish {
                message: "no scripted reply".into(),
                source: None,
            }),
        }
    }
}
