use std::{fs, path::Path};

use anyhow::{Context, Result};

use crate::{document::XliffDocument, model::TranslationUnit};

/// Read and parse an XLIFF file.
///
/// Unlike [`XliffDocument::parse`], a file that is not valid XLIFF is an error.
/// The document's `filename` is set to the file name.
pub fn read_document(path: &Path) -> Result<XliffDocument> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    let mut document = XliffDocument::try_from_xliff(&content)
        .with_context(|| format!("Failed to parse XLIFF file: {}", path.display()))?;
    document.filename = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned());
    Ok(document)
}

/// Serialize `document` to `path` and accept its unsaved changes.
pub fn write_document(document: &mut XliffDocument, path: &Path) -> Result<()> {
    if !document.is_valid() {
        anyhow::bail!("Refusing to write an invalid document to {}", path.display());
    }
    fs::write(path, document.serialize())
        .with_context(|| format!("Failed to write file: {}", path.display()))?;
    document.accept_unsaved_changes();
    Ok(())
}

/// The unit `id`, unless it is missing or carries markup that cannot be edited.
///
/// The engine itself accepts edits to any unit; callers that write user input
/// into targets check here first.
pub fn editable_unit(document: &XliffDocument, id: &str) -> Result<TranslationUnit> {
    match document.translation_unit(id) {
        None => anyhow::bail!("no translation unit with id '{}'", id),
        Some(unit) if unit.unsupported => {
            anyhow::bail!("unit '{}' contains inline markup that cannot be edited", id)
        }
        Some(unit) => Ok(unit),
    }
}
