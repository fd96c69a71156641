// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! CLI module for Constella
//!
//! Handles command-line argument parsing and input file loading.

pub mod args;
pub mod input;

pub use args::*;
