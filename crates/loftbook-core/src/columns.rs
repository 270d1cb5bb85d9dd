//! Column configuration for the skills table
//!
//! The column set is static: it never changes at runtime and is not
//! persisted. Cells hold free text, one of an enumerated option list, or
//! a bounded integer.

use serde_json::Value;

/// Input type of a column's cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// Free text.
    Text,
    /// Single select from an enumerated option list.
    Select(&'static [&'static str]),
    /// Bounded integer, inclusive range.
    Number { min: i64, max: i64 },
}

/// One column: key, display header, and cell input type.
#[derive(Debug, Clone, Copy)]
pub struct ColumnConfig {
    pub key: &'static str,
    pub header: &'static str,
    pub kind: ColumnKind,
}

/// Apparatus options; also drives the navigation tabs.
pub const APPARATUS_OPTIONS: &[&str] = &["Hoop", "Trapeze", "Silks", "Pole"];

const LEVEL_OPTIONS: &[&str] = &["Beginner", "Intermediate", "Advanced"];

const FOCUS_OPTIONS: &[&str] = &[
    "Technique",
    "Core",
    "Core/Balance",
    "Balance",
    "Strength",
    "Flexibility/Lines",
    "Legs/Strength",
    "Roll",
    "Balance/Hips",
    "Drop",
];

const STATUS_OPTIONS: &[&str] = &["Not Started", "Learning", "Can Perform", "Mastered"];

/// Default column set, used when no custom configuration is supplied.
pub const DEFAULT_COLUMNS: &[ColumnConfig] = &[
    ColumnConfig {
        key: "apparatus",
        header: "Apparatus",
        kind: ColumnKind::Select(APPARATUS_OPTIONS),
    },
    ColumnConfig {
        key: "skill",
        header: "Skill",
        kind: ColumnKind::Text,
    },
    ColumnConfig {
        key: "level",
        header: "Level",
        kind: ColumnKind::Select(LEVEL_OPTIONS),
    },
    ColumnConfig {
        key: "focus",
        header: "Focus",
        kind: ColumnKind::Select(FOCUS_OPTIONS),
    },
    ColumnConfig {
        key: "confidence",
        header: "Confidence (1-5)",
        kind: ColumnKind::Number { min: 1, max: 5 },
    },
    ColumnConfig {
        key: "difficulty",
        header: "Difficulty (1-5)",
        kind: ColumnKind::Number { min: 1, max: 5 },
    },
    ColumnConfig {
        key: "status",
        header: "Status",
        kind: ColumnKind::Select(STATUS_OPTIONS),
    },
    ColumnConfig {
        key: "notes",
        header: "Notes / Progress",
        kind: ColumnKind::Text,
    },
];

/// Look up a column by key in the default set.
pub fn column(key: &str) -> Option<&'static ColumnConfig> {
    DEFAULT_COLUMNS.iter().find(|c| c.key == key)
}

/// Clamp raw input into a bounded-integer cell value.
///
/// An empty or non-numeric input maps to the empty cell value rather
/// than a number; anything else rounds to the nearest integer and clamps
/// into the inclusive [min, max] range.
pub fn clamp_int(input: &str, min: i64, max: i64) -> Value {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Value::String(String::new());
    }
    match trimmed.parse::<f64>() {
        Ok(n) if n.is_finite() => Value::from((n.round() as i64).clamp(min, max)),
        _ => Value::String(String::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn clamp_keeps_empty_input_empty() {
        assert_eq!(clamp_int("", 1, 5), json!(""));
        assert_eq!(clamp_int("   ", 1, 5), json!(""));
    }

    #[test]
    fn clamp_treats_non_numeric_input_as_empty() {
        assert_eq!(clamp_int("abc", 1, 5), json!(""));
        assert_eq!(clamp_int("1x", 1, 5), json!(""));
    }

    #[test]
    fn clamp_rounds_and_bounds_numeric_input() {
        assert_eq!(clamp_int("3", 1, 5), json!(3));
        assert_eq!(clamp_int("2.6", 1, 5), json!(3));
        assert_eq!(clamp_int("0", 1, 5), json!(1));
        assert_eq!(clamp_int("-4", 1, 5), json!(1));
        assert_eq!(clamp_int("99", 1, 5), json!(5));
    }

    #[test]
    fn default_columns_cover_the_full_row_shape() {
        let keys: Vec<&str> = DEFAULT_COLUMNS.iter().map(|c| c.key).collect();
        assert_eq!(
            keys,
            [
                "apparatus",
                "skill",
                "level",
                "focus",
                "confidence",
                "difficulty",
                "status",
                "notes"
            ]
        );
        assert!(matches!(
            column("confidence").unwrap().kind,
            ColumnKind::Number { min: 1, max: 5 }
        ));
        assert!(column("nope").is_none());
    }
}
