//! The XLIFF document facade.
//!
//! An [`XliffDocument`] owns the parsed [`XmlTree`] and the version strategy
//! chosen for it. Reads project the tree into [`TranslationUnit`]s; writes patch
//! the tree in place so that serialization keeps everything the engine does not
//! understand.

use log::debug;
use thiserror::Error;

use crate::model::{State, TranslationUnit};
use crate::version::{VersionStrategy, XliffVersion};
use crate::xml::{XmlError, XmlTree};

/// Media type of [`XliffDocument::serialize`] output.
pub const MEDIA_TYPE: &str = "application/x-xliff+xml";

/// Why a text could not be loaded as an XLIFF document.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error(transparent)]
    Xml(#[from] XmlError),

    #[error("not an XLIFF 1.2 or 2.0 document")]
    UnsupportedVersion,
}

#[derive(Debug, Clone, Default)]
pub struct XliffDocument {
    tree: Option<XmlTree>,
    version: Option<XliffVersion>,
    unsaved_changes: bool,
    /// Name the document was uploaded under, or should be saved as.
    pub filename: Option<String>,
}

impl XliffDocument {
    /// An empty, invalid document.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_xliff(text: &str) -> Self {
        let mut document = Self::new();
        document.parse(text);
        document
    }

    /// Like [`XliffDocument::from_xliff`], but reports why `text` was rejected.
    pub fn try_from_xliff(text: &str) -> Result<Self, DocumentError> {
        let mut tree = XmlTree::parse(text)?;
        let version = XliffVersion::detect(&tree).ok_or(DocumentError::UnsupportedVersion)?;

        debug!("parsed {} document", version);
        version.complete_targets(&mut tree);
        Ok(Self {
            tree: Some(tree),
            version: Some(version),
            unsaved_changes: false,
            filename: None,
        })
    }

    /// Replace the content with `text`.
    ///
    /// Malformed XML or an unsupported XLIFF version leaves the document
    /// invalid. Missing targets are filled in from their sources. The unsaved
    /// changes flag is cleared either way; `filename` is kept.
    pub fn parse(&mut self, text: &str) {
        let (tree, version) = match Self::try_from_xliff(text) {
            Ok(parsed) => (parsed.tree, parsed.version),
            Err(err) => {
                debug!("rejected document: {}", err);
                (None, None)
            }
        };
        self.tree = tree;
        self.version = version;
        self.unsaved_changes = false;
    }

    pub fn is_valid(&self) -> bool {
        self.tree.is_some() && self.version.is_some()
    }

    pub fn version(&self) -> Option<XliffVersion> {
        self.version
    }

    fn parts(&self) -> Option<(&XmlTree, XliffVersion)> {
        Some((self.tree.as_ref()?, self.version?))
    }

    fn parts_mut(&mut self) -> Option<(&mut XmlTree, XliffVersion)> {
        let version = self.version?;
        Some((self.tree.as_mut()?, version))
    }

    /// Source language, or `""` when absent or invalid.
    pub fn source_language(&self) -> String {
        self.parts()
            .map(|(tree, version)| version.source_language(tree))
            .unwrap_or_default()
    }

    /// Target language, or `""` when absent or invalid.
    pub fn target_language(&self) -> String {
        self.parts()
            .map(|(tree, version)| version.target_language(tree))
            .unwrap_or_default()
    }

    /// Marks the document as changed even when it is invalid.
    pub fn set_target_language(&mut self, language: &str) {
        if let Some((tree, version)) = self.parts_mut() {
            version.set_target_language(tree, language);
        }
        self.unsaved_changes = true;
    }

    /// All units in document order; empty when invalid.
    pub fn translation_units(&self) -> Vec<TranslationUnit> {
        self.parts()
            .map(|(tree, version)| version.translation_units(tree))
            .unwrap_or_default()
    }

    pub fn translation_unit(&self, id: &str) -> Option<TranslationUnit> {
        self.translation_units().into_iter().find(|unit| unit.id == id)
    }

    /// Translate fragment `fragment_index` of unit `id` and mark it translated.
    ///
    /// An unknown id does nothing but still marks the document as changed.
    pub fn set_translation(&mut self, id: &str, fragment_index: usize, translation: &str) {
        if let Some((tree, version)) = self.parts_mut() {
            match version.find_unit(tree, id) {
                Some(unit) => version.set_translation(tree, unit, fragment_index, translation),
                None => debug!("set_translation: no unit with id '{}'", id),
            }
        }
        self.unsaved_changes = true;
    }

    /// Set the state of every fragment of unit `id`.
    pub fn set_state(&mut self, id: &str, state: &State) {
        if let Some((tree, version)) = self.parts_mut() {
            match version.find_unit(tree, id) {
                Some(unit) => version.set_state(tree, unit, state),
                None => debug!("set_state: no unit with id '{}'", id),
            }
        }
        self.unsaved_changes = true;
    }

    /// The current tree as UTF-8 bytes; empty when invalid.
    pub fn serialize(&self) -> Vec<u8> {
        self.parts()
            .map(|(tree, _)| tree.to_string().into_bytes())
            .unwrap_or_default()
    }

    pub fn unsaved_changes(&self) -> bool {
        self.unsaved_changes
    }

    pub fn accept_unsaved_changes(&mut self) {
        self.unsaved_changes = false;
    }
}
