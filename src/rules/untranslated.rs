//! Untranslated unit detection rule.
//!
//! A unit is untranslated while any of its fragments is still in the initial
//! state, which is where seeded targets and alignment resets leave them.

use crate::issues::{UnitContext, UntranslatedIssue};
use crate::model::{State, TranslationUnit};

pub fn check_untranslated(file_path: &str, units: &[TranslationUnit]) -> Vec<UntranslatedIssue> {
    let mut issues = Vec::new();

    for (index, unit) in units.iter().enumerate() {
        // Unsupported units get their own warning.
        if unit.unsupported {
            continue;
        }
        let pending = unit
            .fragments
            .iter()
            .filter(|fragment| fragment.state.as_ref() == Some(&State::Initial))
            .count();
        if pending == 0 {
            continue;
        }
        issues.push(UntranslatedIssue {
            context: UnitContext::new(file_path, &unit.id, index + 1),
            source: unit.source.clone(),
            pending,
            total: unit.fragments.len(),
        });
    }

    issues
}
