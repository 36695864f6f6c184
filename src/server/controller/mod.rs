//! HTTP controller endpoints for the Gridiron web API.
//!
//! Handlers follow the read-then-sync contract: query the database first, and
//! only when the primary read returns zero rows ask the sync orchestrator to
//! fetch from upstream, then re-read. A failed sync is logged and the empty
//! result is served with a 200; upstream unavailability is never a 5xx.

pub mod game;
pub mod player;
pub mod team;
pub mod util;
