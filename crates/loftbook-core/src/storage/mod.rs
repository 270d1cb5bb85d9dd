//! Persistence layer
//!
//! SQLite-backed storage for the single shared skills document.

mod database;
mod skills;

pub use database::Database;
pub use skills::SkillsStore;
