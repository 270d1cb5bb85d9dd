//! Headless table state
//!
//! Single source of truth for the rows being displayed and edited. Holds
//! the row sequence, the per-column display filters, and the save
//! indicator state machine; rendering and persistence live elsewhere.
//!
//! All row operations are positional. Filtering only narrows which
//! indices are visible and never reorders or mutates the sequence.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::columns::{clamp_int, ColumnConfig, ColumnKind};
use crate::rows::SkillRow;

/// Remote save indicator state machine.
///
/// idle -> saving (timer armed or request in flight) -> saved (reverts
/// to idle after a short linger) or error (sticky until the next save
/// attempt).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SaveStatus {
    #[default]
    Idle,
    Saving,
    Saved,
    Error,
}

/// The in-memory table: rows, display filters, save indicator.
pub struct TableState {
    columns: &'static [ColumnConfig],
    rows: Vec<SkillRow>,
    filters: BTreeMap<String, String>,
    save_status: SaveStatus,
}

impl TableState {
    pub fn new(columns: &'static [ColumnConfig], rows: Vec<SkillRow>) -> Self {
        Self {
            columns,
            rows,
            filters: BTreeMap::new(),
            save_status: SaveStatus::Idle,
        }
    }

    pub fn columns(&self) -> &'static [ColumnConfig] {
        self.columns
    }

    pub fn rows(&self) -> &[SkillRow] {
        &self.rows
    }

    /// Wholesale replacement, used when the remote document wins over
    /// locally seeded rows.
    pub fn replace_rows(&mut self, rows: Vec<SkillRow>) {
        self.rows = rows;
    }

    /// Append a blank row; returns its index.
    pub fn add_row(&mut self) -> usize {
        self.rows.push(SkillRow::blank(self.columns));
        self.rows.len() - 1
    }

    /// Remove the row at `index`, leaving the order of all other rows
    /// untouched. Out-of-range indices are ignored.
    pub fn delete_row(&mut self, index: usize) -> Option<SkillRow> {
        if index < self.rows.len() {
            Some(self.rows.remove(index))
        } else {
            None
        }
    }

    /// Replace one cell with a raw input, coerced per the column kind:
    /// bounded-number columns go through [`clamp_int`], everything else
    /// stores the text as-is.
    pub fn edit_cell(&mut self, index: usize, column: &ColumnConfig, raw: &str) {
        let value = match column.kind {
            ColumnKind::Number { min, max } => clamp_int(raw, min, max),
            _ => Value::String(raw.to_string()),
        };
        self.set_cell(index, column.key, value);
    }

    /// Replace one cell with an already-typed value.
    pub fn set_cell(&mut self, index: usize, key: &str, value: Value) {
        if let Some(skill) = self.rows.get_mut(index) {
            skill.set(key, value);
        }
    }

    /// Set one column's substring filter; empty clears it.
    pub fn set_filter(&mut self, key: &str, value: String) {
        if value.is_empty() {
            self.filters.remove(key);
        } else {
            self.filters.insert(key.to_string(), value);
        }
    }

    pub fn filter(&self, key: &str) -> &str {
        self.filters.get(key).map(String::as_str).unwrap_or("")
    }

    pub fn clear_filters(&mut self) {
        self.filters.clear();
    }

    /// The navigation tabs drive the apparatus column filter directly.
    pub fn set_apparatus_filter(&mut self, value: &str) {
        self.set_filter("apparatus", value.to_string());
    }

    /// Indices of rows passing every active filter, in display order.
    pub fn visible_rows(&self) -> Vec<usize> {
        self.rows
            .iter()
            .enumerate()
            .filter(|(_, skill)| {
                self.filters
                    .iter()
                    .all(|(key, needle)| contains_ci(&skill.text(key), needle))
            })
            .map(|(index, _)| index)
            .collect()
    }

    pub fn save_status(&self) -> SaveStatus {
        self.save_status
    }

    pub fn set_save_status(&mut self, status: SaveStatus) {
        self.save_status = status;
    }
}

/// Case-insensitive substring match; an empty needle matches everything.
fn contains_ci(haystack: &str, needle: &str) -> bool {
    needle.is_empty() || haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::columns::{column, DEFAULT_COLUMNS};
    use crate::rows::seed_rows;
    use serde_json::json;

    fn table() -> TableState {
        TableState::new(DEFAULT_COLUMNS, seed_rows())
    }

    #[test]
    fn add_then_delete_at_the_same_position_restores_the_sequence() {
        let mut state = table();
        let before = state.rows().to_vec();

        let index = state.add_row();
        assert_eq!(state.rows().len(), before.len() + 1);

        state.delete_row(index);
        assert_eq!(state.rows(), before.as_slice());
    }

    #[test]
    fn editing_one_cell_leaves_all_other_rows_untouched() {
        let mut state = table();
        let before = state.rows().to_vec();

        state.edit_cell(1, column("skill").unwrap(), "Gazelle");

        assert_eq!(state.rows()[1].text("skill"), "Gazelle");
        for (index, skill) in state.rows().iter().enumerate() {
            if index != 1 {
                assert_eq!(skill, &before[index]);
            }
        }
    }

    #[test]
    fn number_edits_are_clamped_and_empty_input_stays_empty() {
        let mut state = table();
        let confidence = column("confidence").unwrap();

        state.edit_cell(0, confidence, "9");
        assert_eq!(state.rows()[0].get("confidence"), Some(&json!(5)));

        state.edit_cell(0, confidence, "");
        assert_eq!(state.rows()[0].get("confidence"), Some(&json!("")));
    }

    #[test]
    fn apparatus_filter_is_a_case_insensitive_substring_match() {
        let mut state = table();
        let total = state.rows().len();

        state.set_apparatus_filter("hoop");
        let visible = state.visible_rows();
        assert!(!visible.is_empty());
        assert!(visible
            .iter()
            .all(|&i| state.rows()[i].text("apparatus").contains("Hoop")));

        // Clearing the filter restores all rows, in order.
        state.set_apparatus_filter("");
        assert_eq!(state.visible_rows(), (0..total).collect::<Vec<_>>());
    }

    #[test]
    fn filters_stack_across_columns_and_never_mutate_rows() {
        let mut state = table();
        let before = state.rows().to_vec();

        state.set_apparatus_filter("Trapeze");
        state.set_filter("status", "learning".to_string());

        let visible = state.visible_rows();
        assert_eq!(visible.len(), 1);
        assert_eq!(state.rows()[visible[0]].text("skill"), "Mermaid");
        assert_eq!(state.rows(), before.as_slice());
    }

    #[test]
    fn filters_match_numeric_cells_by_display_text() {
        let mut state = table();
        state.set_filter("confidence", "5".to_string());

        let visible = state.visible_rows();
        assert_eq!(visible.len(), 1);
        assert_eq!(state.rows()[visible[0]].text("skill"), "Fireman Spin");
    }

    #[test]
    fn deleting_out_of_range_is_a_no_op() {
        let mut state = table();
        let before = state.rows().to_vec();
        assert!(state.delete_row(999).is_none());
        assert_eq!(state.rows(), before.as_slice());
    }
}
