//! Rule implementations for xliffer.
//!
//! Pure functions over a parsed [`XliffDocument`]: each takes only the inputs
//! it needs and returns its specific issue type.
//!
//! ## Module Structure
//!
//! - `duplicate_id`: unit ids used more than once
//! - `target_language`: documents without a target language
//! - `unsupported`: units with inline markup that cannot be edited
//! - `untranslated`: units with fragments still in the initial state

pub mod duplicate_id;
pub mod target_language;
pub mod unsupported;
pub mod untranslated;

use crate::document::XliffDocument;
use crate::issues::Issue;

/// Run every rule against one parsed document.
pub fn check_document(file_path: &str, document: &XliffDocument) -> Vec<Issue> {
    let units = document.translation_units();
    let mut issues: Vec<Issue> = Vec::new();

    issues.extend(
        target_language::check_target_language(file_path, document)
            .map(Issue::MissingTargetLanguage),
    );
    issues.extend(
        duplicate_id::check_duplicate_ids(file_path, &units)
            .into_iter()
            .map(Issue::DuplicateId),
    );
    issues.extend(
        unsupported::check_unsupported(file_path, &units)
            .into_iter()
            .map(Issue::Unsupported),
    );
    issues.extend(
        untranslated::check_untranslated(file_path, &units)
            .into_iter()
            .map(Issue::Untranslated),
    );

    issues
}
