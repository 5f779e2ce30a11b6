//! Duplicate unit id detection rule.
//!
//! Ids are the join key for edits and alignment; a second unit with the same id
//! can never be reached.

use std::collections::HashMap;

use crate::issues::{DuplicateIdIssue, UnitContext};
use crate::model::TranslationUnit;

pub fn check_duplicate_ids(file_path: &str, units: &[TranslationUnit]) -> Vec<DuplicateIdIssue> {
    let mut first_seen: HashMap<&str, usize> = HashMap::new();
    let mut issues = Vec::new();

    for (index, unit) in units.iter().enumerate() {
        let position = index + 1;
        match first_seen.get(unit.id.as_str()) {
            Some(&first_position) => issues.push(DuplicateIdIssue {
                context: UnitContext::new(file_path, &unit.id, position),
                first_position,
            }),
            None => {
                first_seen.insert(&unit.id, position);
            }
        }
    }

    issues
}
