use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::align::{AlignmentReport, StatePolicy};
use crate::model::{TranslationUnit, TranslationUnitFragment};

// ============================================================
// Parameters
// ============================================================

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetConfigParams {
    /// Directory to search upwards from for .xlifferrc.json
    pub project_root_path: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListUnitsParams {
    /// Path to the XLIFF file
    pub file_path: String,
    /// Only list units with fragments still in the initial state
    pub untranslated_only: Option<bool>,
    /// Number of units to skip (default: 0)
    pub offset: Option<u32>,
    /// Maximum number of units to return (default: 50, max: 200)
    pub limit: Option<u32>,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SetTranslationParams {
    /// Path to the XLIFF file
    pub file_path: String,
    pub unit_id: String,
    /// Fragment to translate (default: 0)
    pub fragment_index: Option<u32>,
    pub text: String,
    /// Write here instead of overwriting filePath
    pub output_path: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SetStateParams {
    /// Path to the XLIFF file
    pub file_path: String,
    pub unit_id: String,
    /// One of "initial", "translated", "reviewed", "final"
    pub state: String,
    /// Write here instead of overwriting filePath
    pub output_path: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SetTargetLanguageParams {
    /// Path to the XLIFF file
    pub file_path: String,
    /// Language tag, e.g. "de" or "de-CH"
    pub language: String,
    /// Write here instead of overwriting filePath
    pub output_path: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AlignDocumentsParams {
    /// Freshly extracted file; defines which units exist
    pub latest_path: String,
    /// Previously translated file to take translations from
    pub align_path: String,
    /// Where to write the merged document (default: alignPath)
    pub output_path: Option<String>,
    /// State for units whose source is unchanged (default: from config)
    pub policy: Option<StatePolicy>,
    /// Write the merged document (default: false, report only)
    pub apply: Option<bool>,
}

// ============================================================
// Config Types (get_config)
// ============================================================

/// Configuration DTO for MCP
#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConfigDto {
    /// True if config was loaded from a file, false if using defaults
    pub from_file: bool,
    pub config: ConfigValues,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConfigValues {
    pub ignores: Vec<String>,
    pub align_state_policy: StatePolicy,
    pub aligned_filename: String,
    pub extensions: Vec<String>,
}

impl From<crate::config::Config> for ConfigValues {
    fn from(c: crate::config::Config) -> Self {
        Self {
            ignores: c.ignores,
            align_state_policy: c.align_state_policy,
            aligned_filename: c.aligned_filename,
            extensions: c.extensions,
        }
    }
}

// ============================================================
// Unit Types (list_units, set_translation, set_state)
// ============================================================

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FragmentItem {
    pub source: String,
    pub target: Option<String>,
    pub state: Option<String>,
}

impl From<TranslationUnitFragment> for FragmentItem {
    fn from(fragment: TranslationUnitFragment) -> Self {
        Self {
            source: fragment.source,
            target: fragment.target,
            state: fragment.state.map(|state| state.to_string()),
        }
    }
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UnitItem {
    pub id: String,
    pub source: String,
    pub target: String,
    /// Least advanced state of all fragments
    pub state: Option<String>,
    pub fragments: Vec<FragmentItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meaning: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Target must not be edited
    pub unsupported: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub occurrences: Option<usize>,
}

impl From<TranslationUnit> for UnitItem {
    fn from(unit: TranslationUnit) -> Self {
        Self {
            state: unit.state().map(|state| state.to_string()),
            id: unit.id,
            source: unit.source,
            target: unit.target,
            fragments: unit.fragments.into_iter().map(FragmentItem::from).collect(),
            meaning: unit.meaning,
            description: unit.description,
            unsupported: unit.unsupported,
            occurrences: unit.occurrences,
        }
    }
}

/// Result of list_units operation
#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListUnitsResult {
    pub file_path: String,
    pub version: String,
    pub source_language: String,
    pub target_language: String,
    pub total_count: usize,
    pub units: Vec<UnitItem>,
    pub pagination: Pagination,
}

/// Result of set_translation and set_state
#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct EditResult {
    /// File the document was written to
    pub written_to: String,
    /// The unit after the edit
    pub unit: UnitItem,
}

/// Result of set_target_language
#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SetTargetLanguageResult {
    pub written_to: String,
    pub target_language: String,
    /// False if the tag looks like neither "xx" nor "xx-YY"
    pub usual_format: bool,
}

/// Result of align_documents
#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AlignDocumentsResult {
    pub applied: bool,
    pub output_path: String,
    pub policy: StatePolicy,
    pub target_language: String,
    pub report: AlignmentReport,
}

// ============================================================
// Common Types
// ============================================================

/// Pagination information
#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub offset: usize,
    pub limit: usize,
    pub has_more: bool,
}
