//! Tool registry and execution engine.
//!
//! Six fixed tools are exposed to the model: Read, Write, Edit, Bash,
//! Glob, Grep. Dispatch goes through the closed [`ToolKind`] enum rather
//! than a name-keyed function table, and no failure ever crosses the
//! executor boundary as an `Err` — the model sees a JSON error payload
//! instead.

pub mod file;
pub mod search;
pub mod shell;

use crate::types::ToolDefinition;
use anyhow::Result;
use serde_json::{json, Value};
use tracing::debug;

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// The closed set of tools. The registry's names are fixed at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolKind {
    Read,
    Write,
    Edit,
    Bash,
    Glob,
    Grep,
}

impl ToolKind {
    /// Look a tool up by its wire name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Read" => Some(Self::Read),
            "Write" => Some(Self::Write),
            "Edit" => Some(Self::Edit),
            "Bash" => Some(Self::Bash),
            "Glob" => Some(Self::Glob),
            "Grep" => Some(Self::Grep),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Read => "Read",
            Self::Write => "Write",
            Self::Edit => "Edit",
            Self::Bash => "Bash",
            Self::Glob => "Glob",
            Self::Grep => "Grep",
        }
    }
}

/// Build the list of tool definitions sent with every model request.
/// Order is stable; the model sees these verbatim each call.
pub fn tool_definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition {
            name: "Read".into(),
            description: "Read a file from the filesystem, returning numbered lines.".into(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "path": {
                        "type": "string",
                        "description": "Path to the file"
                    },
                    "offset": {
                        "type": "integer",
                        "description": "Line offset to start from (default 0)"
                    },
                    "limit": {
                        "type": "integer",
                        "description": "Maximum lines to return (default 2000)"
                    }
                },
                "required": ["path"]
            }),
        },
        ToolDefinition {
            name: "Write".into(),
            description: "Write content to a file, creating parent directories as needed.".into(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "path": {
                        "type": "string",
                        "description": "Path to the file"
                    },
                    "content": {
                        "type": "string",
                        "description": "Content to write"
                    }
                },
                "required": ["path", "content"]
            }),
        },
        ToolDefinition {
            name: "Edit".into(),
            description: "Replace a string in a file. Fails if the string is absent.".into(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "path": {
                        "type": "string",
                        "description": "Path to the file"
                    },
                    "old": {
                        "type": "string",
                        "description": "Exact text to replace"
                    },
                    "new": {
                        "type": "string",
                        "description": "Replacement text"
                    },
                    "replace_all": {
                        "type": "boolean",
                        "description": "Replace every occurrence (default: first only)"
                    }
                },
                "required": ["path", "old", "new"]
            }),
        },
        ToolDefinition {
            name: "Bash".into(),
            description: "Execute a shell command and return its output and exit code.".into(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "command": {
                        "type": "string",
                        "description": "The command to execute"
                    },
                    "timeout": {
                        "type": "integer",
                        "description": "Timeout in seconds (default 120)"
                    }
                },
                "required": ["command"]
            }),
        },
        ToolDefinition {
            name: "Glob".into(),
            description: "Find files matching a glob pattern, newest first.".into(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "pattern": {
                        "type": "string",
                        "description": "Glob pattern, e.g. **/*.rs"
                    },
                    "path": {
                        "type": "string",
                        "description": "Directory to search (default current directory)"
                    }
                },
                "required": ["pattern"]
            }),
        },
        ToolDefinition {
            name: "Grep".into(),
            description: "Search file contents with a regex.".into(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "pattern": {
                        "type": "string",
                        "description": "Regex pattern"
                    },
                    "path": {
                        "type": "string",
                        "description": "Directory or file to search (default current directory)"
                    },
                    "mode": {
                        "type": "string",
                        "enum": ["files-with-matches", "content", "count"],
                        "description": "Output mode (default files-with-matches)"
                    }
                },
                "required": ["pattern"]
            }),
        },
    ]
}

// ---------------------------------------------------------------------------
// Execution engine
// ---------------------------------------------------------------------------

/// Settings tool handlers need at execution time.
#[derive(Debug, Clone)]
pub struct ToolContext {
    pub bash_timeout_secs: u64,
}

/// What one tool invocation produced. `content` is always a compact JSON
/// string — the model only ever sees text.
#[derive(Debug, Clone)]
pub struct ToolOutcome {
    pub content: String,
    pub is_error: bool,
}

impl ToolOutcome {
    /// A short single-line preview for display and logging.
    pub fn preview(&self) -> String {
        let flat = self.content.replace('\n', " ");
        let mut preview: String = flat.chars().take(80).collect();
        if preview.chars().count() < flat.chars().count() {
            preview.push('…');
        }
        preview
    }
}

/// Execute a tool call by name. Unknown names and handler failures both
/// come back as error outcomes, never as `Err`.
pub async fn execute_tool(ctx: &ToolContext, name: &str, input: &Value) -> ToolOutcome {
    let result = match ToolKind::from_name(name) {
        Some(ToolKind::Read) => file::read(input),
        Some(ToolKind::Write) => file::write(input),
        Some(ToolKind::Edit) => file::edit(input),
        Some(ToolKind::Bash) => shell::bash(ctx, input).await,
        Some(ToolKind::Glob) => search::glob(input),
        Some(ToolKind::Grep) => search::grep(input),
        None => Err(anyhow::anyhow!("Unknown tool: {}", name)),
    };

    let outcome = match result {
        Ok(payload) => ToolOutcome {
            content: payload.to_string(),
            is_error: false,
        },
        Err(e) => ToolOutcome {
            content: json!({ "error": format!("{:#}", e) }).to_string(),
            is_error: true,
        },
    };

    debug!(
        "Tool {} -> {} ({} chars)",
        name,
        if outcome.is_error { "error" } else { "ok" },
        outcome.content.len(),
    );

    outcome
}

/// One-line description of an invocation for the activity display.
pub fn summarize_input(name: &str, input: &Value) -> String {
    let key = match ToolKind::from_name(name) {
        Some(ToolKind::Bash) => "command",
        Some(ToolKind::Glob) | Some(ToolKind::Grep) => "pattern",
        _ => "path",
    };
    input[key].as_str().unwrap_or("").chars().take(60).collect()
}

/// Expand a leading `~` and return the path. Handlers share this so the
/// model can use home-relative paths everywhere.
pub(crate) fn expand_path(path: &str) -> std::path::PathBuf {
    std::path::PathBuf::from(shellexpand::tilde(path).into_owned())
}

/// Extract a required string argument.
pub(crate) fn require_str<'a>(input: &'a Value, key: &str) -> Result<&'a str> {
    input[key]
        .as_str()
        .ok_or_else(|| anyhow::anyhow!("Missing '{}' argument", key))
}
