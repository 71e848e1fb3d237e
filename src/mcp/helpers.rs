use std::path::Path;

use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use serde::Serialize;
use serde_json::json;

use super::types::Pagination;
use crate::config::load_config;
use crate::core::{Localization, LocalizationError};

/// Loads the project config and builds its context.
pub fn open_project(project_root_path: &str) -> Result<Localization, McpError> {
    let start_dir = Path::new(project_root_path);
    if !start_dir.is_dir() {
        return Err(McpError::invalid_params(
            format!("Project root is not a directory: {}", project_root_path),
            None,
        ));
    }

    let loaded = load_config(start_dir)
        .map_err(|e| McpError::internal_error(format!("Failed to load config: {:#}", e), None))?;
    loaded
        .config
        .localization(&loaded.root)
        .map_err(|e| McpError::internal_error(format!("Failed to initialize: {:#}", e), None))
}

/// Configuration problems are the caller's to fix, everything else is ours.
pub fn localization_error(action: &str, err: LocalizationError) -> McpError {
    let message = format!("{}: {}", action, err);
    let data = Some(json!({ "code": err.code() }));
    if err.is_configuration() {
        McpError::invalid_params(message, data)
    } else {
        McpError::internal_error(message, data)
    }
}

pub fn json_result<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json_str = serde_json::to_string_pretty(value).map_err(|e| {
        McpError::internal_error(format!("JSON serialization failed: {}", e), None)
    })?;

    Ok(CallToolResult::success(vec![Content::text(json_str)]))
}

/// Applies offset and limit. Limit defaults to 50 and is capped at 100.
pub fn paginate<T>(items: Vec<T>, offset: Option<u32>, limit: Option<u32>) -> (Vec<T>, Pagination) {
    let limit = limit.map(|v| v as usize).unwrap_or(50).min(100);
    let offset = offset.map(|v| v as usize).unwrap_or(0);
    let total = items.len();

    let page: Vec<T> = items.into_iter().skip(offset).take(limit).collect();
    let has_more = offset + page.len() < total;

    (
        page,
        Pagination {
            offset,
            limit,
            has_more,
        },
    )
}
