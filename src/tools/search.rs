//! Search tools: Glob and Grep.
//!
//! Both walk the tree in-process (gitignore-aware) — patterns never pass
//! through a shell. Empty results are success payloads, not errors.

use super::{expand_path, require_str};
use anyhow::{bail, Context, Result};
use globset::Glob;
use ignore::WalkBuilder;
use regex::Regex;
use serde_json::{json, Value};
use std::path::PathBuf;
use std::time::SystemTime;

/// Result cap shared by both tools.
const MAX_RESULTS: usize = 100;
/// Grep content-mode lines are clipped to this many characters.
const MAX_MATCH_CHARS: usize = 200;

/// Find files matching a glob pattern, newest first.
pub fn glob(input: &Value) -> Result<Value> {
    let pattern = require_str(input, "pattern")?;
    let base = expand_path(input["path"].as_str().unwrap_or("."));

    let matcher = Glob::new(pattern)
        .with_context(|| format!("Invalid glob pattern: {}", pattern))?
        .compile_matcher();

    let mut matches: Vec<(PathBuf, SystemTime)> = Vec::new();
    for entry in WalkBuilder::new(&base).build().flatten() {
        if !entry.file_type().is_some_and(|t| t.is_file()) {
            continue;
        }
        let relative = entry.path().strip_prefix(&base).unwrap_or(entry.path());
        if !matcher.is_match(relative) {
            continue;
        }
        let mtime = entry
            .metadata()
            .ok()
            .and_then(|m| m.modified().ok())
            .unwrap_or(SystemTime::UNIX_EPOCH);
        matches.push((entry.into_path(), mtime));
    }

    // Newest first, path as tie-breaker for deterministic output.
    matches.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    matches.truncate(MAX_RESULTS);

    let files: Vec<String> = matches
        .into_iter()
        .map(|(path, _)| path.display().to_string())
        .collect();

    Ok(json!({
        "files": files,
        "count": files.len(),
    }))
}

/// Search file contents with a regex. `mode` selects the output shape:
/// matching file paths (default), `file:line:text` entries, or per-file
/// match counts.
pub fn grep(input: &Value) -> Result<Value> {
    let pattern = require_str(input, "pattern")?;
    let base = expand_path(input["path"].as_str().unwrap_or("."));
    let mode = input["mode"].as_str().unwrap_or("files-with-matches");
    if !matches!(mode, "files-with-matches" | "content" | "count") {
        bail!("Unknown mode: {} (expected files-with-matches, content, or count)", mode);
    }

    let regex = Regex::new(pattern).with_context(|| format!("Invalid regex: {}", pattern))?;

    let mut files: Vec<PathBuf> = Vec::new();
    if base.is_file() {
        files.push(base.clone());
    } else {
        for entry in WalkBuilder::new(&base).build().flatten() {
            if entry.file_type().is_some_and(|t| t.is_file()) {
                files.push(entry.into_path());
            }
        }
        files.sort();
    }

    let mut results: Vec<String> = Vec::new();
    'files: for path in &files {
        // Binary and unreadable files are skipped, not errors.
        let Ok(bytes) = std::fs::read(path) else { continue };
        let text = String::from_utf8_lossy(&bytes);

        let mut file_count = 0usize;
        for (index, line) in text.lines().enumerate() {
            if !regex.is_match(line) {
                continue;
            }
            file_count += 1;
            match mode {
                "files-with-matches" => {
                    results.push(path.display().to_string());
                    break;
                }
                "content" => {
                    let clipped: String = line.trim_end().chars().take(MAX_MATCH_CHARS).collect();
                    results.push(format!("{}:{}:{}", path.display(), index + 1, clipped));
                    if results.len() >= MAX_RESULTS {
                        break 'files;
                    }
                }
                _ => {}
            }
        }
        if mode == "count" && file_count > 0 {
            results.push(format!("{}:{}", path.display(), file_count));
        }
        if results.len() >= MAX_RESULTS {
            break;
        }
    }
    results.truncate(MAX_RESULTS);

    Ok(json!({
        "mode": mode,
        "results": results,
        "count": results.len(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn tree() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();
        std::fs::write(dir.path().join("alpha.rs"), "fn alpha() {}\n").unwrap();
        std::fs::write(dir.path().join("beta.txt"), "alpha beta\nbeta\n").unwrap();
        std::fs::write(dir.path().join("sub/gamma.rs"), "fn gamma() { alpha(); }\n").unwrap();
        dir
    }

    fn args(base: &Path, pattern: &str, extra: Value) -> Value {
        let mut v = json!({
            "pattern": pattern,
            "path": base.to_str().unwrap(),
        });
        if let Some(map) = extra.as_object() {
            for (k, val) in map {
                v[k.as_str()] = val.clone();
            }
        }
        v
    }

    #[test]
    fn glob_matches_recursively() {
        let dir = tree();
        let payload = glob(&args(dir.path(), "**/*.rs", json!({}))).unwrap();
        assert_eq!(payload["count"], 2);
        let files = payload["files"].as_array().unwrap();
        assert!(files.iter().all(|f| f.as_str().unwrap().ends_with(".rs")));
    }

    #[test]
    fn glob_no_matches_is_empty_not_error() {
        let dir = tree();
        let payload = glob(&args(dir.path(), "**/*.zig", json!({}))).unwrap();
        assert_eq!(payload["count"], 0);
        assert_eq!(payload["files"].as_array().unwrap().len(), 0);
    }

    #[test]
    fn glob_rejects_bad_pattern() {
        let dir = tree();
        let err = glob(&args(dir.path(), "a{", json!({}))).unwrap_err();
        assert!(format!("{:#}", err).contains("Invalid glob pattern"));
    }

    #[test]
    fn grep_files_with_matches_lists_each_file_once() {
        let dir = tree();
        let payload = grep(&args(dir.path(), "alpha", json!({}))).unwrap();
        assert_eq!(payload["mode"], "files-with-matches");
        assert_eq!(payload["count"], 3);
    }

    #[test]
    fn grep_content_mode_reports_file_line_text() {
        let dir = tree();
        let payload = grep(&args(dir.path(), "beta", json!({"mode": "content"}))).unwrap();
        let results = payload["results"].as_array().unwrap();
        assert_eq!(results.len(), 2);
        assert!(results[0].as_str().unwrap().contains("beta.txt:1:alpha beta"));
        assert!(results[1].as_str().unwrap().contains("beta.txt:2:beta"));
    }

    #[test]
    fn grep_count_mode_reports_per_file_totals() {
        let dir = tree();
        let payload = grep(&args(dir.path(), "beta", json!({"mode": "count"}))).unwrap();
        let results = payload["results"].as_array().unwrap();
        assert_eq!(results.len(), 1);
        assert!(results[0].as_str().unwrap().ends_with(":2"));
    }

    #[test]
    fn grep_no_matches_is_empty_not_error() {
        let dir = tree();
        let payload = grep(&args(dir.path(), "zeppelin", json!({}))).unwrap();
        assert_eq!(payload["count"], 0);
    }

    #[test]
    fn grep_rejects_bad_regex_and_mode() {
        let dir = tree();
        let err = grep(&args(dir.path(), "(unclosed", json!({}))).unwrap_err();
        assert!(format!("{:#}", err).contains("Invalid regex"));

        let err = grep(&args(dir.path(), "x", json!({"mode": "sideways"}))).unwrap_err();
        assert!(err.to_string().contains("Unknown mode"));
    }
}
