//! Interactive REPL (Read-Eval-Print Loop) mode.
//!
//! Every line that is not a REPL command is asked as a question: analyst,
//! reviewer, then verification against the graph.

use crate::commands;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use jurisgraph_llm::OllamaProvider;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::path::PathBuf;

/// Run the interactive REPL.
pub async fn run_repl(config: &Config, formatter: &Formatter) -> Result<()> {
    println!("{}", formatter.info("JurisGraph REPL - Type a question, 'help' for commands, 'exit' to quit"));
    println!();

    let editor_config = rustyline::Config::builder()
        .max_history_size(config.settings.history_size)
        .map_err(editor_error)?
        .build();
    let mut editor = DefaultEditor::with_config(editor_config).map_err(editor_error)?;

    let history_path = get_history_path()?;
    let _ = editor.load_history(&history_path);

    let verifier = commands::build_verifier(config).await?;
    let provider = OllamaProvider::from_config(&config.llm)?;

    loop {
        match editor.readline("jurisgraph> ") {
            Ok(line) => {
                let line = line.trim();

                if line.is_empty() {
                    continue;
                }

                editor.add_history_entry(line).ok();

                let outcome = match parse_repl_command(line) {
                    ReplCommand::Exit => {
                        println!("{}", formatter.info("Goodbye!"));
                        break;
                    }
                    ReplCommand::Help => {
                        print_help(formatter);
                        Ok(())
                    }
                    ReplCommand::Report => commands::execute_report(config, formatter),
                    ReplCommand::Status => commands::execute_status(config, formatter).await,
                    ReplCommand::Ask(query) => {
                        commands::ask::ask_with(&verifier, &provider, &query, false, formatter)
                            .await
                            .map(|_| ())
                    }
                };

                if let Err(e) = outcome {
                    eprintln!("{}", formatter.error(&e.to_string()));
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", formatter.info("Use 'exit' to quit"));
            }
            Err(ReadlineError::Eof) => {
                break;
            }
            Err(err) => {
                eprintln!("{}", formatter.error(&format!("Error: {}", err)));
                break;
            }
        }
    }

    editor.save_history(&history_path).ok();

    Ok(())
}

/// REPL command type.
#[derive(Debug, PartialEq)]
enum ReplCommand {
    Exit,
    Help,
    Report,
    Status,
    Ask(String),
}

/// Parse a REPL line; anything unrecognized is a question.
fn parse_repl_command(line: &str) -> ReplCommand {
    match line.to_lowercase().as_str() {
        "exit" | "quit" | "q" => ReplCommand::Exit,
        "help" | "?" => ReplCommand::Help,
        "report" => ReplCommand::Report,
        "status" => ReplCommand::Status,
        _ => ReplCommand::Ask(line.to_string()),
    }
}

fn editor_error(e: ReadlineError) -> CliError {
    CliError::Io(std::io::Error::other(format!("Failed to initialize editor: {}", e)))
}

fn get_history_path() -> Result<PathBuf> {
    let dir = Config::dir()?;
    std::fs::create_dir_all(&dir)?;
    Ok(dir.join("history.txt"))
}

fn print_help(formatter: &Formatter) {
    println!("{}", formatter.info("Available commands:"));
    println!();
    println!("  <question>       - Ask, review and verify a question");
    println!("  report           - Aggregate quality report");
    println!("  status           - Graph connectivity and log location");
    println!("  help, ?          - Show this help");
    println!("  exit, quit, q    - Exit REPL");
    println!();
}
