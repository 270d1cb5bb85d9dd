//! Skills document storage
//!
//! The whole table persists as one record keyed by a fixed id:
//! insert-or-replace on every write, never per-row patches.

use anyhow::Result;
use chrono::Utc;
use rusqlite::{params, OptionalExtension};

use super::Database;
use crate::constants::storage::SKILLS_DOC_ID;
use crate::rows::SkillRow;

/// Store for the single shared skills document.
#[derive(Clone)]
pub struct SkillsStore {
    db: Database,
}

impl SkillsStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Load the shared document's rows.
    ///
    /// A missing record or a payload that is not a row array yields an
    /// empty sequence; only the datastore itself can fail a read.
    pub fn load(&self) -> Result<Vec<SkillRow>> {
        let raw: Option<String> = self
            .db
            .conn()
            .query_row(
                "SELECT data FROM skills_state WHERE id = ?1",
                [SKILLS_DOC_ID],
                |row| row.get(0),
            )
            .optional()?;

        let Some(raw) = raw else {
            return Ok(Vec::new());
        };

        match serde_json::from_str::<Vec<SkillRow>>(&raw) {
            Ok(rows) => Ok(rows),
            Err(err) => {
                tracing::warn!("Stored skills payload is not a row array, treating as empty: {err}");
                Ok(Vec::new())
            }
        }
    }

    /// Replace the shared document with `rows`, stamping a fresh update
    /// time. Inserts the record if it does not exist yet.
    pub fn save(&self, rows: &[SkillRow]) -> Result<()> {
        let data = serde_json::to_string(rows)?;
        let updated_at = Utc::now().to_rfc3339();
        self.db.conn().execute(
            "INSERT INTO skills_state (id, data, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(id) DO UPDATE SET data = excluded.data, updated_at = excluded.updated_at",
            params![SKILLS_DOC_ID, data, updated_at],
        )?;
        Ok(())
    }
}
