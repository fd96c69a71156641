// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Configuration module for Constella
//!
//! Handles the persisted settings file and the live provider settings.

pub mod settings;
pub mod store;

pub use settings::*;
pub use store::ConfigStore;
