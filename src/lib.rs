// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Gear-Rules: automatic gear assignment for Strava activities
//!
//! This crate provides the rule engine that decides which equipment a
//! synced activity should carry, plus a small stateless API that previews
//! and plans rule-driven gear changes.

pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;

/// Shared application state.
pub struct AppState {
    pub config: Config,
}
