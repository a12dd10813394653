//! Filesystem tools: Read, Write, Edit.

use super::{expand_path, require_str};
use anyhow::{bail, Context, Result};
use serde_json::{json, Value};

/// Default line window for Read.
const DEFAULT_READ_LIMIT: u64 = 2000;
/// Individual lines longer than this are clipped.
const MAX_LINE_CHARS: usize = 2000;

/// Read a line window of a file, 1-indexed and tab-separated.
pub fn read(input: &Value) -> Result<Value> {
    let path = expand_path(require_str(input, "path")?);
    let offset = input["offset"].as_u64().unwrap_or(0) as usize;
    let limit = input["limit"].as_u64().unwrap_or(DEFAULT_READ_LIMIT) as usize;

    if path.is_dir() {
        bail!("Path is a directory: {}", path.display());
    }
    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let lines: Vec<&str> = contents.lines().collect();
    let total_lines = lines.len();
    let start = offset.min(total_lines);
    let end = (start + limit).min(total_lines);

    let mut rendered = String::new();
    for (number, line) in lines[start..end].iter().enumerate() {
        let line = if line.chars().count() > MAX_LINE_CHARS {
            let clipped: String = line.chars().take(MAX_LINE_CHARS).collect();
            format!("{}...", clipped)
        } else {
            (*line).to_string()
        };
        rendered.push_str(&format!("{:>6}\t{}\n", start + number + 1, line));
    }

    Ok(json!({
        "content": rendered,
        "total_lines": total_lines,
        "shown_lines": end - start,
        "path": path.display().to_string(),
    }))
}

/// Write content to a file, creating parent directories as needed.
pub fn write(input: &Value) -> Result<Value> {
    let path = expand_path(require_str(input, "path")?);
    let content = require_str(input, "content")?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
    }
    std::fs::write(&path, content)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    Ok(json!({
        "path": path.display().to_string(),
        "bytes": content.len(),
    }))
}

/// Replace `old` with `new` in a file. By default only the first
/// occurrence changes; a miss leaves the file untouched and errors.
pub fn edit(input: &Value) -> Result<Value> {
    let path = expand_path(require_str(input, "path")?);
    let old = require_str(input, "old")?;
    let new = require_str(input, "new")?;
    let replace_all = input["replace_all"].as_bool().unwrap_or(false);

    if old.is_empty() {
        bail!("'old' must not be empty");
    }

    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let occurrences = contents.matches(old).count();
    if occurrences == 0 {
        bail!("String not found in {}", path.display());
    }

    let (updated, replacements) = if replace_all {
        (contents.replace(old, new), occurrences)
    } else {
        (contents.replacen(old, new, 1), 1)
    };

    std::fs::write(&path, updated)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    Ok(json!({
        "path": path.display().to_string(),
        "replacements": replacements,
    }))
}
