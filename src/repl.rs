//! Interactive prompt loop.
//!
//! Reads one line at a time; `quit`/`exit` (with or without a leading
//! slash) ends the process, `/clear` resets the conversation, `/help`
//! prints command help, and any other non-empty line runs one request.
//! No error ends the loop — the prompt always comes back.

use crate::agent::{Session, SessionEvent};
use crate::api::ModelClient;
use crate::config::QuillConfig;
use colored::Colorize;
use std::io::{self, BufRead, Write};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Print the startup header: version, endpoint, model, working directory.
pub fn print_header(config: &QuillConfig) {
    let endpoint = if config.uses_proxy() {
        format!("proxy {}", config.proxy_url)
    } else {
        config.api_url.clone()
    };
    let cwd = std::env::current_dir()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|_| "(unknown)".into());

    println!();
    println!("{} v{}", "quill".bold().cyan(), VERSION);
    println!("  Model:     {}", config.model.cyan());
    println!("  Endpoint:  {}", endpoint.cyan());
    println!("  Directory: {}", cwd.cyan());

    if !config.has_credentials() {
        println!(
            "{} No API key or proxy configured — set {} or {} before sending a request.",
            "Warning:".yellow().bold(),
            "ANTHROPIC_API_KEY".bold(),
            "QUILL_PROXY".bold(),
        );
    }

    println!();
    println!(
        "Type a request and press Enter. {} to exit, {} for commands.",
        "quit".bold(),
        "/help".bold()
    );
    println!();
}

fn print_help() {
    println!();
    println!("{}", "Commands:".bold());
    println!("  quit, exit  Leave quill");
    println!("  /clear      Reset the conversation history");
    println!("  /help       Show this help");
    println!();
    println!("{}", "Tips:".bold());
    println!("  - The assistant can read, write, and edit files");
    println!("  - It can run shell commands and search with glob/grep");
    println!("  - Tool activity shows as dimmed lines while it works");
    println!();
}

/// Render one session event to the terminal.
pub fn render_event(event: SessionEvent) {
    match event {
        SessionEvent::Text(text) => println!("{}", text),
        SessionEvent::ToolCall { name, summary } => {
            println!("{}", format!("  → {}({})", name, summary).dimmed());
        }
        SessionEvent::ToolDone { name, ok, preview } => {
            if ok {
                println!("{}", format!("  ← {}: {}", name, preview).dimmed());
            } else {
                println!("{}", format!("  ← {} failed: {}", name, preview).dimmed().red());
            }
        }
    }
}

/// Run the prompt loop until quit or EOF.
pub async fn run<C: ModelClient>(session: &mut Session<C>) -> io::Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("{} ", ">".green().bold());
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            // EOF (Ctrl+D)
            println!("\n{}", "Goodbye!".cyan());
            return Ok(());
        };
        let line = line?;
        let input = line.trim();

        if input.is_empty() {
            continue;
        }

        match input.to_lowercase().as_str() {
            "quit" | "exit" | "/quit" | "/exit" => {
                println!("{}", "Goodbye!".cyan());
                return Ok(());
            }
            "/clear" => {
                session.clear();
                println!("{}", "Conversation cleared.".yellow());
                continue;
            }
            "/help" => {
                print_help();
                continue;
            }
            _ => {}
        }

        println!();
        match session.submit(input, &mut render_event).await {
            Ok(()) => {
                let usage = session.usage();
                println!(
                    "{}",
                    format!(
                        "  [{} in / {} out tokens this session]",
                        usage.input_tokens, usage.output_tokens
                    )
                    .dimmed()
                );
            }
            Err(e) => println!("{} {}", "Error:".red().bold(), e),
        }
        println!();
    }
}
