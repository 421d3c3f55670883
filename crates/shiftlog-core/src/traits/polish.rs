// SPDX-FileCopyrightText: 2026 Shiftlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Text polish trait for language-model backed rewriting.

use async_trait::async_trait;

use crate::error::ShiftlogError;
use crate::traits::adapter::PluginAdapter;
use crate::types::PolishRequest;

/// Adapter for an external text-rewriting service.
///
/// Callers treat any error as "unavailable" and fall back to local
/// formatting, so implementations should fail fast rather than retry long.
#[async_trait]
pub trait PolishAdapter: PluginAdapter {
    /// Rewrites `request.text` according to `request.directive`.
    async fn polish(&self, request: PolishRequest) -> Result<String, ShiftlogError>;
}
