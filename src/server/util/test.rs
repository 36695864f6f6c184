//! Shared test infrastructure: in-memory database setup, mock data
//! factories, and mockito endpoint helpers for the ESPN client.

pub mod mock;
