use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;
use tracing::{debug, info};

use crate::providers::types::tool::ToolDefinition;

/// Load every `*.json` file in `dir` as a tool definition.
///
/// Files are returned in directory enumeration order, which is platform
/// dependent. The documents are not checked against any tool schema; a file
/// that cannot be read or is not valid JSON aborts the whole load.
pub fn functions_for_client(dir: impl AsRef<Path>) -> Result<Vec<ToolDefinition>> {
    let dir = dir.as_ref();
    let mut all_tools = Vec::new();

    let entries = fs::read_dir(dir)
        .with_context(|| format!("Failed to list tool directory {}", dir.display()))?;

    for entry in entries {
        let entry = entry.with_context(|| format!("Failed to list tool directory {}", dir.display()))?;
        let file_name = entry.file_name();
        let file_name = file_name.to_string_lossy();
        if !file_name.ends_with(".json") {
            continue;
        }

        info!("Reading file: {} for function config", file_name);
        let path = entry.path();
        let raw = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read tool file {}", path.display()))?;
        let data: Value = serde_json::from_str(&raw)
            .with_context(|| format!("Tool file {} is not valid JSON", path.display()))?;
        debug!(
            "When reading file {}, found the following data:\n\n{}\n\n",
            file_name, data
        );

        let tool = ToolDefinition::new(data);
        info!(
            "Loaded tool {} from {}",
            tool.function_name().unwrap_or("<unnamed>"),
            file_name
        );
        all_tools.push(tool);
    }

    info!("Found {} tools", all_tools.len());
    Ok(all_tools)
}
