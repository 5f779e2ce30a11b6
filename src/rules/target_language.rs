use crate::document::XliffDocument;
use crate::issues::MissingTargetLanguageIssue;

pub fn check_target_language(
    file_path: &str,
    document: &XliffDocument,
) -> Option<MissingTargetLanguageIssue> {
    if !document.is_valid() || !document.target_language().trim().is_empty() {
        return None;
    }
    Some(MissingTargetLanguageIssue {
        file_path: file_path.to_string(),
        source_language: document.source_language(),
    })
}
