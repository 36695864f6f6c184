//! Data access layer repositories.
//!
//! One repository per entity, each generic over [`sea_orm::ConnectionTrait`] so
//! the same code runs against Postgres in production and in-memory SQLite in
//! tests. Writes are idempotent upserts keyed on the upstream external id, so
//! re-fetching the same resource never creates duplicate rows.

pub mod game;
pub mod game_stat;
pub mod player;
pub mod team;

#[cfg(test)]
mod tests;
