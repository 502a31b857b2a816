//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// JurisGraph CLI - Verify legal answers against the decision graph.
#[derive(Debug, Parser)]
#[command(name = "jurisgraph")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "JURISGRAPH_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (score only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Verify an answer against the graph using a reviewer output
    Verify(VerifyArgs),

    /// Show the aggregate quality report
    Report,

    /// Answer a question with the analyst, review it and verify it
    Ask(AskArgs),

    /// Load decision records into the graph
    Ingest(IngestArgs),

    /// Show graph connectivity and log location
    Status,

    /// Enter interactive REPL mode
    Repl,
}

/// Arguments for the verify command.
#[derive(Debug, Parser)]
pub struct VerifyArgs {
    /// The user query the answer responds to
    #[arg(short, long)]
    pub query: String,

    /// File holding the analyst answer
    #[arg(short, long)]
    pub answer: PathBuf,

    /// File holding the reviewer output
    #[arg(short, long)]
    pub review: PathBuf,
}

/// Arguments for the ask command.
#[derive(Debug, Parser)]
pub struct AskArgs {
    /// Question about the decisions
    pub query: String,

    /// Print the analyst answer and reviewer output too
    #[arg(long)]
    pub show_texts: bool,
}

/// Arguments for the ingest command.
#[derive(Debug, Parser)]
pub struct IngestArgs {
    /// Decision JSON files (one record or an array per file)
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Skip creating constraints and indexes
    #[arg(long)]
    pub skip_schema: bool,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_enters_repl() {
        let cli = Cli::parse_from(["jurisgraph"]);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_verify_command() {
        let cli = Cli::parse_from([
            "jurisgraph",
            "verify",
            "--query",
            "Quem relatou o HC 161.450?",
            "--answer",
            "answer.txt",
            "--review",
            "review.txt",
        ]);
        match cli.command {
            Some(Command::Verify(args)) => {
                assert_eq!(args.query, "Quem relatou o HC 161.450?");
                assert_eq!(args.review, PathBuf::from("review.txt"));
            }
            _ => panic!("Expected Verify command"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["jurisgraph", "report", "--format", "json", "--no-color"]);
        assert!(matches!(cli.command, Some(Command::Report)));
        assert!(matches!(cli.format, Some(CliFormat::Json)));
        assert!(cli.no_color);
    }

    #[test]
    fn test_ingest_requires_files() {
        assert!(Cli::try_parse_from(["jurisgraph", "ingest"]).is_err());
        let cli = Cli::parse_from(["jurisgraph", "ingest", "a.json", "b.json"]);
        match cli.command {
            Some(Command::Ingest(args)) => assert_eq!(args.files.len(), 2),
            _ => panic!("Expected Ingest command"),
        }
    }
}
