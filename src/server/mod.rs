//! Server application core modules.
//!
//! This module contains all server-side functionality for the Gridiron API, including
//! HTTP routing, the on-demand sync orchestrator, database repositories, the ESPN
//! upstream client, and the Valkey cache wrapper. The central idea is that a read
//! finding zero rows triggers a deduplicated fetch-and-persist from upstream rather
//! than returning a permanent gap.

pub mod cache;
pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod espn;
pub mod model;
pub mod router;
pub mod service;
pub mod startup;
pub mod util;
