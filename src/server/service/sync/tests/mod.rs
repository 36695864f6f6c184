//! Tests for the on-demand sync core.
//!
//! Season calendar and resource key tests are pure; in-flight registry tests
//! drive the leader/follower protocol directly; orchestrator tests run the
//! full pipeline against in-memory SQLite and a mockito ESPN server.

mod key;
mod orchestrator;
mod season;
