// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! LLM module for Constella
//!
//! Provides abstraction over different text generation providers.

pub mod catalog;
pub mod factory;
pub mod mock_provider;
pub mod provider;
pub mod providers;

pub use catalog::{catalog, ProviderInfo};
pub use factory::ProviderFactory;
pub use provider::*;
