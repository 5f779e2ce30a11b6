use std::path::Path;

use anyhow::Result;
use log::debug;
use rmcp::{
    ErrorData as McpError, ServerHandler, ServiceExt,
    handler::server::tool::ToolRouter,
    handler::server::wrapper::Parameters,
    model::{CallToolResult, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
};

use crate::{
    align::align_documents, config::load_config, document::XliffDocument,
    locale::is_usual_locale_format, model::State,
};

use super::helpers::{
    json_result, load_document, page_bounds, parse_state, require_editable, save_document,
};
use super::types::{
    AlignDocumentsParams, AlignDocumentsResult, ConfigDto, ConfigValues, EditResult,
    GetConfigParams, ListUnitsParams, ListUnitsResult, Pagination, SetStateParams,
    SetTargetLanguageParams, SetTargetLanguageResult, SetTranslationParams, UnitItem,
};

#[derive(Clone)]
pub struct XlifferMcpServer {
    tool_router: ToolRouter<Self>,
}

impl Default for XlifferMcpServer {
    fn default() -> Self {
        Self::new()
    }
}

#[tool_router]
impl XlifferMcpServer {
    pub fn new() -> Self {
        Self {
            tool_router: Self::tool_router(),
        }
    }

    /// Get the current xliffer configuration
    #[tool(description = "Get the current xliffer configuration.")]
    pub async fn get_config(
        &self,
        params: Parameters<GetConfigParams>,
    ) -> Result<CallToolResult, McpError> {
        let path = Path::new(&params.0.project_root_path);

        let result = load_config(path)
            .map_err(|e| McpError::internal_error(format!("Failed to load config: {}", e), None))?;

        json_result(&ConfigDto {
            from_file: result.from_file,
            config: ConfigValues::from(result.config),
        })
    }

    /// List the translation units of an XLIFF file
    #[tool(
        description = "List the translation units of an XLIFF 1.2 or 2.0 file with their fragments and states. Returns paginated list of units."
    )]
    pub async fn list_units(
        &self,
        params: Parameters<ListUnitsParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        let (offset, limit) = page_bounds(params.offset, params.limit);
        let document = load_document(&params.file_path)?;

        let untranslated_only = params.untranslated_only.unwrap_or(false);
        let all_units: Vec<UnitItem> = document
            .translation_units()
            .into_iter()
            .filter(|unit| {
                !untranslated_only
                    || unit
                        .fragments
                        .iter()
                        .any(|fragment| fragment.state.as_ref() == Some(&State::Initial))
            })
            .map(UnitItem::from)
            .collect();

        let total_count = all_units.len();

        // Apply pagination
        let units: Vec<UnitItem> = all_units.into_iter().skip(offset).take(limit).collect();
        let has_more = offset + units.len() < total_count;

        json_result(&ListUnitsResult {
            file_path: params.file_path,
            version: document
                .version()
                .map(|version| version.to_string())
                .unwrap_or_default(),
            source_language: document.source_language(),
            target_language: document.target_language(),
            total_count,
            units,
            pagination: Pagination {
                offset,
                limit,
                has_more,
            },
        })
    }

    /// Translate one fragment of a unit and mark it translated
    #[tool(
        description = "Write the translation of one fragment of a translation unit and mark the unit translated. Placeholder fragments should be passed through unchanged. Units flagged unsupported are refused."
    )]
    pub async fn set_translation(
        &self,
        params: Parameters<SetTranslationParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        let fragment_index = params.fragment_index.unwrap_or(0) as usize;
        let mut document = load_document(&params.file_path)?;

        let unit = require_editable(&document, &params.unit_id)?;
        if fragment_index >= unit.fragments.len() {
            return Err(McpError::invalid_params(
                format!(
                    "unit '{}' has {} fragment(s), no fragment #{}",
                    params.unit_id,
                    unit.fragments.len(),
                    fragment_index
                ),
                None,
            ));
        }

        document.set_translation(&params.unit_id, fragment_index, &params.text);
        let written_to =
            save_document(&mut document, &params.file_path, params.output_path.as_deref())?;
        debug!("translated '{}' in {}", params.unit_id, written_to.display());

        edit_result(&document, &params.unit_id, &written_to)
    }

    /// Set the workflow state of a unit
    #[tool(
        description = "Set the workflow state (initial, translated, reviewed, final) of every fragment of a translation unit."
    )]
    pub async fn set_state(
        &self,
        params: Parameters<SetStateParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        let state = parse_state(&params.state).map_err(|e| McpError::invalid_params(e, None))?;
        let mut document = load_document(&params.file_path)?;

        require_editable(&document, &params.unit_id)?;
        document.set_state(&params.unit_id, &state);
        let written_to =
            save_document(&mut document, &params.file_path, params.output_path.as_deref())?;

        edit_result(&document, &params.unit_id, &written_to)
    }

    /// Set the target language of a document
    #[tool(description = "Set the target language of an XLIFF file.")]
    pub async fn set_target_language(
        &self,
        params: Parameters<SetTargetLanguageParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        let language = params.language.trim();
        if language.is_empty() {
            return Err(McpError::invalid_params("language cannot be empty", None));
        }

        let mut document = load_document(&params.file_path)?;
        document.set_target_language(language);
        let written_to =
            save_document(&mut document, &params.file_path, params.output_path.as_deref())?;

        json_result(&SetTargetLanguageResult {
            written_to: written_to.to_string_lossy().to_string(),
            target_language: document.target_language(),
            usual_format: is_usual_locale_format(language),
        })
    }

    /// Carry translations from a previous file into a fresh extraction
    #[tool(
        description = "Align a freshly extracted XLIFF file with a previously translated one: units with unchanged sources keep their translation, changed units are reset, new units are added and vanished units dropped. Report only unless apply is true."
    )]
    pub async fn align_documents(
        &self,
        params: Parameters<AlignDocumentsParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        let latest_path = Path::new(&params.latest_path);
        let config_dir = latest_path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .unwrap_or(Path::new("."));
        let config = load_config(config_dir)
            .map_err(|e| McpError::internal_error(format!("Failed to load config: {}", e), None))?;

        let mut options = config.config.align_options();
        if let Some(policy) = params.policy {
            options.policy = policy;
        }

        let mut latest = load_document(&params.latest_path)?;
        let previous = load_document(&params.align_path)?;
        let report = align_documents(&mut latest, &previous, &options);

        let output_path = params
            .output_path
            .clone()
            .unwrap_or_else(|| params.align_path.clone());
        let applied = params.apply.unwrap_or(false);
        if applied {
            save_document(&mut latest, &output_path, None)?;
        }

        json_result(&AlignDocumentsResult {
            applied,
            output_path,
            policy: options.policy,
            target_language: latest.target_language(),
            report,
        })
    }
}

fn edit_result(
    document: &XliffDocument,
    unit_id: &str,
    written_to: &Path,
) -> Result<CallToolResult, McpError> {
    let unit = document.translation_unit(unit_id).ok_or_else(|| {
        McpError::internal_error(format!("unit '{}' vanished after edit", unit_id), None)
    })?;
    json_result(&EditResult {
        written_to: written_to.to_string_lossy().to_string(),
        unit: UnitItem::from(unit),
    })
}

#[tool_handler]
impl ServerHandler for XlifferMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "xliffer MCP helps AI agents translate XLIFF 1.2 and 2.0 files.\n\n\
                 Available tools:\n\
                 1. get_config - Get project configuration\n\
                 2. list_units - List translation units with fragments and states (paginated)\n\
                 3. set_translation - Translate one fragment of a unit\n\
                 4. set_state - Set the workflow state of a unit\n\
                 5. set_target_language - Set the target language of a file\n\
                 6. align_documents - Carry translations from an old file into a fresh extraction\n\n\
                 Recommended Workflow:\n\
                 1. After re-extracting, run align_documents (apply=false) to review the changes, then apply\n\
                 2. Use list_units with untranslatedOnly=true to find pending work\n\
                 3. Translate each text fragment with set_translation; pass placeholder fragments through unchanged\n\
                 4. Mark reviewed units with set_state\n\n\
                 IMPORTANT: Units flagged unsupported contain inline markup and cannot be edited."
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

/// Entry point for MCP server
pub fn run_server() -> Result<()> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?
        .block_on(async {
            let service = XlifferMcpServer::new();
            let server = service.serve(rmcp::transport::stdio()).await?;
            server.waiting().await?;
            Ok(())
        })
}
