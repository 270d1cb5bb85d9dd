//! Skill row model and seed data

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::columns::ColumnConfig;

/// One row of the skills table: a mapping from column key to cell value.
///
/// Rows carry no identity of their own; position in the containing
/// sequence is display order and nothing more. Unknown keys round-trip
/// untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkillRow(pub Map<String, Value>);

impl SkillRow {
    /// Blank row with every configured column set to the empty value.
    pub fn blank(columns: &[ColumnConfig]) -> Self {
        let mut cells = Map::new();
        for col in columns {
            cells.insert(col.key.to_string(), Value::String(String::new()));
        }
        Self(cells)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn set(&mut self, key: &str, value: Value) {
        self.0.insert(key.to_string(), value);
    }

    /// Cell value rendered as display text. Missing and null cells are empty.
    pub fn text(&self, key: &str) -> String {
        match self.0.get(key) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        }
    }
}

fn row(cells: &[(&str, Value)]) -> SkillRow {
    let mut out = Map::new();
    for (key, value) in cells {
        out.insert((*key).to_string(), value.clone());
    }
    SkillRow(out)
}

/// Starter dataset used when neither the on-device cache nor the server
/// has any rows.
pub fn seed_rows() -> Vec<SkillRow> {
    vec![
        row(&[
            ("apparatus", "Hoop".into()),
            ("skill", "Delilah".into()),
            ("level", "Beginner".into()),
            ("focus", "Balance/Hips".into()),
            ("confidence", 3.into()),
            ("difficulty", 2.into()),
            ("status", "Can Perform".into()),
            ("notes", "".into()),
        ]),
        row(&[
            ("apparatus", "Hoop".into()),
            ("skill", "Man in the Moon".into()),
            ("level", "Beginner".into()),
            ("focus", "Balance".into()),
            ("confidence", 4.into()),
            ("difficulty", 2.into()),
            ("status", "Mastered".into()),
            ("notes", "Point toes on the exit".into()),
        ]),
        row(&[
            ("apparatus", "Trapeze".into()),
            ("skill", "Mermaid".into()),
            ("level", "Beginner".into()),
            ("focus", "Flexibility/Lines".into()),
            ("confidence", 2.into()),
            ("difficulty", 3.into()),
            ("status", "Learning".into()),
            ("notes", "".into()),
        ]),
        row(&[
            ("apparatus", "Trapeze".into()),
            ("skill", "Catcher's Hang".into()),
            ("level", "Intermediate".into()),
            ("focus", "Legs/Strength".into()),
            ("confidence", 1.into()),
            ("difficulty", 4.into()),
            ("status", "Not Started".into()),
            ("notes", "Spot needed".into()),
        ]),
        row(&[
            ("apparatus", "Silks".into()),
            ("skill", "Basic Climb".into()),
            ("level", "Beginner".into()),
            ("focus", "Technique".into()),
            ("confidence", 4.into()),
            ("difficulty", 2.into()),
            ("status", "Can Perform".into()),
            ("notes", "".into()),
        ]),
        row(&[
            ("apparatus", "Silks".into()),
            ("skill", "Straddle Inversion".into()),
            ("level", "Intermediate".into()),
            ("focus", "Core".into()),
            ("confidence", 2.into()),
            ("difficulty", 4.into()),
            ("status", "Learning".into()),
            ("notes", "Keep arms straight longer".into()),
        ]),
        row(&[
            ("apparatus", "Pole".into()),
            ("skill", "Fireman Spin".into()),
            ("level", "Beginner".into()),
            ("focus", "Technique".into()),
            ("confidence", 5.into()),
            ("difficulty", 1.into()),
            ("status", "Mastered".into()),
            ("notes", "".into()),
        ]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::columns::DEFAULT_COLUMNS;
    use serde_json::json;

    #[test]
    fn blank_rows_cover_every_column_with_the_empty_value() {
        let blank = SkillRow::blank(DEFAULT_COLUMNS);
        assert_eq!(blank.0.len(), DEFAULT_COLUMNS.len());
        for col in DEFAULT_COLUMNS {
            assert_eq!(blank.get(col.key), Some(&json!("")));
        }
    }

    #[test]
    fn rows_serialize_as_plain_objects() {
        let mut skill = SkillRow::default();
        skill.set("apparatus", json!("Hoop"));
        skill.set("confidence", json!(3));

        let wire = serde_json::to_value(&skill).unwrap();
        assert_eq!(wire, json!({"apparatus": "Hoop", "confidence": 3}));

        let back: SkillRow = serde_json::from_value(wire).unwrap();
        assert_eq!(back, skill);
    }

    #[test]
    fn text_renders_numbers_and_treats_missing_cells_as_empty() {
        let mut skill = SkillRow::default();
        skill.set("confidence", json!(3));
        skill.set("notes", json!(null));

        assert_eq!(skill.text("confidence"), "3");
        assert_eq!(skill.text("notes"), "");
        assert_eq!(skill.text("skill"), "");
    }

    #[test]
    fn seed_rows_only_use_known_apparatus() {
        for skill in seed_rows() {
            let apparatus = skill.text("apparatus");
            assert!(
                crate::columns::APPARATUS_OPTIONS.contains(&apparatus.as_str()),
                "unexpected apparatus {apparatus}"
            );
        }
    }
}
