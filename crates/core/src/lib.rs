//! Daily quest state model.
//!
//! Everything here is written against the [`store::KeyValueStore`]
//! capability so the same logic runs over PostgreSQL in production and over
//! [`memory::MemoryStore`] in tests.

pub mod daily;
pub mod error;
pub mod keys;
pub mod leaderboard;
pub mod memory;
pub mod progress;
pub mod quest;
pub mod service;
pub mod store;
pub mod streak;
#[cfg(test)]
mod testing;
pub mod types;
