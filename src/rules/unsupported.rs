use crate::issues::{UnitContext, UnsupportedIssue};
use crate::model::TranslationUnit;

pub fn check_unsupported(file_path: &str, units: &[TranslationUnit]) -> Vec<UnsupportedIssue> {
    units
        .iter()
        .enumerate()
        .filter(|(_, unit)| unit.unsupported)
        .map(|(index, unit)| UnsupportedIssue {
            context: UnitContext::new(file_path, &unit.id, index + 1),
            source: unit.source.clone(),
        })
        .collect()
}
