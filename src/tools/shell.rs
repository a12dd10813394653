//! Shell tool: Bash.
//!
//! The command string is handed to the launcher as a single argv element
//! (`bash -c <command>`) — it is never spliced into another shell line.
//! A nonzero exit is a normal success payload carrying that code; only a
//! spawn failure or timeout is an error.

use super::{require_str, ToolContext};
use anyhow::{bail, Context, Result};
use serde_json::{json, Value};
use std::process::Stdio;
use tokio::process::Command;

/// Captured output beyond this many characters is clipped.
const MAX_OUTPUT_CHARS: usize = 30_000;

/// Execute a shell command with a timeout, capturing merged output.
pub async fn bash(ctx: &ToolContext, input: &Value) -> Result<Value> {
    let command = require_str(input, "command")?;
    let timeout_secs = input["timeout"].as_u64().unwrap_or(ctx.bash_timeout_secs);

    let child = Command::new("bash")
        .arg("-c")
        .arg(command)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .context("Failed to spawn bash")?;

    let duration = std::time::Duration::from_secs(timeout_secs);
    let output = match tokio::time::timeout(duration, child.wait_with_output()).await {
        Ok(result) => result.context("Failed to collect command output")?,
        // Dropping the in-flight future reaps the child (kill_on_drop).
        Err(_) => bail!("Command timed out after {}s", timeout_secs),
    };

    let mut merged = String::from_utf8_lossy(&output.stdout).into_owned();
    let stderr = String::from_utf8_lossy(&output.stderr);
    if !stderr.is_empty() {
        if !merged.is_empty() && !merged.ends_with('\n') {
            merged.push('\n');
        }
        merged.push_str(&stderr);
    }
    if merged.chars().count() > MAX_OUTPUT_CHARS {
        merged = merged.chars().take(MAX_OUTPUT_CHARS).collect();
        merged.push_str("\n... (truncated)");
    }

    Ok(json!({
        "output": merged,
        "exit_code": output.status.code().unwrap_or(-1),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> ToolContext {
        ToolContext { bash_timeout_secs: 10 }
    }

    #[tokio::test]
    async fn captures_stdout_and_exit_code() {
        let payload = bash(&ctx(), &json!({"command": "echo hello"})).await.unwrap();
        assert_eq!(payload["output"], "hello\n");
        assert_eq!(payload["exit_code"], 0);
    }

    #[tokio::test]
    async fn nonzero_exit_is_a_success_payload() {
        let payload = bash(&ctx(), &json!({"command": "exit 2"})).await.unwrap();
        assert_eq!(payload["exit_code"], 2);
    }

    #[tokio::test]
    async fn stderr_is_merged_after_stdout() {
        let payload = bash(&ctx(), &json!({"command": "echo out; echo err >&2"}))
            .await
            .unwrap();
        assert_eq!(payload["output"], "out\nerr\n");
    }

    #[tokio::test]
    async fn metacharacters_are_not_double_interpreted() {
        // The argument vector hands the whole string to one bash -c; a
        // literal argument containing quotes survives intact.
        let payload = bash(&ctx(), &json!({"command": r#"printf '%s' "a'b""#}))
            .await
            .unwrap();
        assert_eq!(payload["output"], "a'b");
    }

    #[tokio::test]
    async fn timeout_is_an_error() {
        let err = bash(&ctx(), &json!({"command": "sleep 5", "timeout": 1}))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("timed out after 1s"));
    }
}
