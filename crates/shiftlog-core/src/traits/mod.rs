// SPDX-FileCopyrightText: 2026 Shiftlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter trait definitions for Shiftlog's external collaborators.
//!
//! All adapters extend the [`PluginAdapter`] base trait and use
//! `#[async_trait]` for dynamic dispatch compatibility.

pub mod adapter;
pub mod local;
pub mod polish;
pub mod remote;

pub use adapter::PluginAdapter;
pub use local::LocalStore;
pub use polish::PolishAdapter;
pub use remote::RemoteStore;
