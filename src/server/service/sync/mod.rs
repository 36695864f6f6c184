//! On-demand synchronization core.
//!
//! When a read finds no rows for a resource, the handler asks
//! [`orchestrator::SyncOrchestrator`] to fetch it from upstream. The
//! orchestrator checks temporal eligibility ([`season`]), deduplicates
//! concurrent fetches for the same [`key::ResourceKey`] through the
//! [`inflight::InFlightRegistry`], resolves the fixed dependency graph
//! (Teams before Games, Games before Stats, Teams before Players), persists
//! via the repositories, and invalidates exactly the affected cache keys.

pub mod inflight;
pub mod key;
pub mod orchestrator;
pub mod season;

#[cfg(test)]
mod tests;
