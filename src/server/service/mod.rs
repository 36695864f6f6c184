//! Service layer for business logic and orchestration.

pub mod sync;
