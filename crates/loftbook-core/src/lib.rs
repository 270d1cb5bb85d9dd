//! Loftbook Core
//!
//! Shared library for the Loftbook skills tracker:
//! - Column configuration and cell value rules
//! - Skill row model and seed data
//! - Headless table state (edits, filters, save indicator)
//! - SQLite persistence for the shared skills document
//! - On-device row cache for offline-first startup

pub mod cache;
pub mod columns;
pub mod constants;
pub mod paths;
pub mod rows;
pub mod storage;
pub mod table;
