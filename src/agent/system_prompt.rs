//! System prompt builder.
//!
//! Layers (in order):
//! 1. Identity and tone
//! 2. Environment (cwd, OS)
//! 3. Tool-usage guidance

use crate::config::QuillConfig;

/// Core identity description.
const IDENTITY: &str = r#"You are Quill, a terminal pair-programming assistant.
You work inside the user's project directory and help them read, write,
edit, run, and search code. Be concise: answers print straight into a
terminal session."#;

const TOOL_GUIDANCE: &str = r#"Tool usage:
- Prefer Read/Glob/Grep to inspect before you change anything.
- Edit for targeted changes, Write only for new or fully-replaced files.
- Bash runs in the working directory shown above; each invocation is a
  fresh shell, so directory changes do not persist between calls.
- Wait for each tool result before deciding the next step."#;

/// Build the complete system prompt for one request.
pub fn build_system_prompt(config: &QuillConfig) -> String {
    let cwd = std::env::current_dir()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|_| "(unknown)".into());

    let mut prompt = String::with_capacity(1024);
    prompt.push_str(IDENTITY);
    prompt.push_str("\n\n");
    prompt.push_str(&format!(
        "Environment:\n- Working directory: {}\n- OS: {} ({})\n- Model: {}\n",
        cwd,
        std::env::consts::OS,
        std::env::consts::ARCH,
        config.model,
    ));
    prompt.push('\n');
    prompt.push_str(TOOL_GUIDANCE);
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_contains_cwd_and_model() {
        let config = QuillConfig::default();
        let prompt = build_system_prompt(&config);
        let cwd = std::env::current_dir().unwrap().display().to_string();
        assert!(prompt.contains(&cwd));
        assert!(prompt.contains(&config.model));
        assert!(prompt.starts_with("You are Quill"));
    }
}
