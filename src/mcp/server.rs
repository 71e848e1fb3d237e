use std::str::FromStr;

use anyhow::Result;
use rmcp::{
    ErrorData as McpError, ServerHandler, ServiceExt,
    handler::server::tool::ToolRouter,
    handler::server::wrapper::Parameters,
    model::{CallToolResult, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
};

use super::helpers::{json_result, localization_error, open_project, paginate};
use super::types::{
    GetStringsParams, ListLocalesParams, LocaleInfo, LocalesResult, ProjectParams, PublishParams,
    PublishResult, ScanParams, ScanResult, ScanSourceResult, SetTranslationParams,
    SetTranslationResult, SourceInfo, SourceStatusItem, SourcesResult, StatusResult, StringItem,
    StringsResult,
};
use crate::core::{Namespace, WriteOutcome};

#[derive(Clone)]
pub struct LocsyncMcpServer {
    tool_router: ToolRouter<Self>,
}

impl Default for LocsyncMcpServer {
    fn default() -> Self {
        Self::new()
    }
}

#[tool_router]
impl LocsyncMcpServer {
    pub fn new() -> Self {
        Self {
            tool_router: Self::tool_router(),
        }
    }

    /// List the locales of a namespace
    #[tool(
        description = "List the locales of the application (default) or content namespace, sorted by label, with the selected one."
    )]
    pub async fn list_locales(
        &self,
        params: Parameters<ListLocalesParams>,
    ) -> Result<CallToolResult, McpError> {
        let namespace = match &params.0.namespace {
            Some(name) => Namespace::from_str(name)
                .map_err(|e| McpError::invalid_params(e.to_string(), None))?,
            None => Namespace::Application,
        };
        let l10n = open_project(&params.0.project_root_path)?;

        let result = LocalesResult {
            namespace: namespace.to_string(),
            selected: l10n
                .selected_locale(namespace)
                .ok()
                .map(|l| l.name().to_string()),
            locales: l10n
                .locales(namespace)
                .iter()
                .map(|locale| LocaleInfo {
                    name: locale.name().to_string(),
                    label: locale.label().to_string(),
                    language: locale.language().to_string(),
                    currency: locale.currency().iso.to_string(),
                    native: locale.is_native(),
                })
                .collect(),
        };

        json_result(&result)
    }

    /// List the configured sources
    #[tool(description = "List the configured sources sorted by label, with id, alias, folders and whether they were scanned.")]
    pub async fn list_sources(
        &self,
        params: Parameters<ProjectParams>,
    ) -> Result<CallToolResult, McpError> {
        let l10n = open_project(&params.0.project_root_path)?;

        let result = SourcesResult {
            sources: l10n
                .sources()
                .iter()
                .map(|source| SourceInfo {
                    id: source.id().to_string(),
                    alias: source.alias().to_string(),
                    label: source.label().to_string(),
                    group: source.group().to_string(),
                    roots: source
                        .roots()
                        .iter()
                        .map(|r| r.to_string_lossy().to_string())
                        .collect(),
                    storage_folder: source.storage_folder().to_string_lossy().to_string(),
                    scanned: source.is_scanned(),
                })
                .collect(),
        };

        json_result(&result)
    }

    /// Untranslated counts per source and locale
    #[tool(
        description = "Get the number of strings and untranslated strings per source and application locale. Use this first to see what needs translating."
    )]
    pub async fn get_status(
        &self,
        params: Parameters<ProjectParams>,
    ) -> Result<CallToolResult, McpError> {
        let mut l10n = open_project(&params.0.project_root_path)?;

        let sources: Vec<SourceStatusItem> = l10n
            .status()
            .map_err(|e| localization_error("Failed to read status", e))?
            .into_iter()
            .map(SourceStatusItem::from)
            .collect();

        let result = StatusResult {
            locales: l10n
                .translated_locales()
                .iter()
                .map(|l| l.name().to_string())
                .collect(),
            total_untranslated: sources
                .iter()
                .flat_map(|s| &s.untranslated)
                .map(|c| c.count)
                .sum(),
            sources,
        };

        json_result(&result)
    }

    /// Strings of a source with their translations
    #[tool(
        description = "Get the strings of a source with their translation in a locale (paginated). Pass untranslatedOnly to get the work list."
    )]
    pub async fn get_strings(
        &self,
        params: Parameters<GetStringsParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        let mut l10n = open_project(&params.project_root_path)?;

        let entries = l10n
            .entries(&params.source, &params.locale)
            .map_err(|e| localization_error("Failed to list strings", e))?;
        let total_count = entries.len();
        let untranslated_count = entries.iter().filter(|e| !e.is_translated()).count();

        let items: Vec<StringItem> = entries
            .into_iter()
            .filter(|e| !params.untranslated_only.unwrap_or(false) || !e.is_translated())
            .map(StringItem::from)
            .collect();
        let (items, pagination) = paginate(items, params.offset, params.limit);

        let result = StringsResult {
            source: params.source,
            locale: params.locale,
            total_count,
            untranslated_count,
            items,
            pagination,
        };

        json_result(&result)
    }

    /// Set translations and save them
    #[tool(
        description = "Set translations of strings of a source in one locale, identified by hash, and save them. An empty text removes a translation. Unknown hashes are reported and skipped."
    )]
    pub async fn set_translation(
        &self,
        params: Parameters<SetTranslationParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        let mut l10n = open_project(&params.project_root_path)?;

        let mut applied_count = 0;
        let mut removed_count = 0;
        let mut unknown_hashes = Vec::new();
        for input in &params.translations {
            let applied = l10n
                .set_translation(&params.source, &params.locale, &input.hash, &input.text)
                .map_err(|e| localization_error("Failed to set translation", e))?;
            if !applied {
                unknown_hashes.push(input.hash.clone());
            } else if input.text.trim().is_empty() {
                removed_count += 1;
            } else {
                applied_count += 1;
            }
        }

        if applied_count + removed_count > 0 {
            l10n.save_translations(&params.source, &params.locale)
                .map_err(|e| localization_error("Failed to save translations", e))?;
        }

        let untranslated_count = l10n
            .count_untranslated(&params.source, &params.locale)
            .map_err(|e| localization_error("Failed to count untranslated strings", e))?;

        let result = SetTranslationResult {
            success: unknown_hashes.is_empty(),
            applied_count,
            removed_count,
            unknown_hashes,
            untranslated_count,
        };

        json_result(&result)
    }

    /// Scan sources for strings
    #[tool(
        description = "Scan one source (or all) for translatable strings, store the string registry and refresh the client files."
    )]
    pub async fn scan(&self, params: Parameters<ScanParams>) -> Result<CallToolResult, McpError> {
        let mut l10n = open_project(&params.0.project_root_path)?;

        let summaries = match &params.0.source {
            Some(name) => vec![
                l10n.scan(name)
                    .map_err(|e| localization_error("Scan failed", e))?,
            ],
            None => l10n
                .scan_all()
                .map_err(|e| localization_error("Scan failed", e))?,
        };

        let result = ScanResult {
            sources: summaries.into_iter().map(ScanSourceResult::from).collect(),
        };

        json_result(&result)
    }

    /// Write the client files
    #[tool(
        description = "Write the client translation files into the configured client folder. Skipped when the cache key is unchanged unless force is set."
    )]
    pub async fn publish(
        &self,
        params: Parameters<PublishParams>,
    ) -> Result<CallToolResult, McpError> {
        let mut l10n = open_project(&params.0.project_root_path)?;
        l10n.require_configuration()
            .map_err(|e| localization_error("Publish failed", e))?;

        let outcome = l10n
            .write_client_files(params.0.force.unwrap_or(false))
            .map_err(|e| localization_error("Publish failed", e))?;

        let (status, files) = match outcome {
            WriteOutcome::Disabled => ("disabled", Vec::new()),
            WriteOutcome::UpToDate => ("upToDate", l10n.artifact_list()),
            WriteOutcome::Written(files) => ("written", files),
        };

        let result = PublishResult {
            status: status.to_string(),
            client_folder: l10n
                .client_folder()
                .map(|f| f.to_string_lossy().to_string()),
            files: files
                .iter()
                .map(|f| f.to_string_lossy().to_string())
                .collect(),
        };

        json_result(&result)
    }
}

#[tool_handler]
impl ServerHandler for LocsyncMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "locsync MCP helps AI agents translate the strings of PHP and JavaScript projects.\n\n\
                 Available tools:\n\
                 1. list_locales - Locales of the application or content namespace\n\
                 2. list_sources - Configured sources\n\
                 3. get_status - Untranslated counts per source and locale\n\
                 4. get_strings - Strings of a source with their translations (paginated)\n\
                 5. set_translation - Set translations by hash and save them\n\
                 6. scan - Extract strings from the source folders\n\
                 7. publish - Write the client translation files\n\n\
                 Recommended Workflow:\n\
                 1. Use scan so the registries match the code\n\
                 2. Use get_status to find sources and locales with untranslated strings\n\
                 3. Use get_strings with untranslatedOnly, then set_translation\n\
                 4. Keep placeholders such as %s, %d and %1$s intact in translations"
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
            let service = LocsyncMcpServer::new();
            let server = service.serve(rmcp::transport::stdio()).await?;
            server.waiting().await?;
            Ok(())
        })
}
