//! JurisGraph CLI - verify legal answers against the decision graph.

use clap::Parser;
use jurisgraph_cli::commands;
use jurisgraph_cli::repl;
use jurisgraph_cli::{Cli, Command, Config, Formatter};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Log to stderr so stdout stays machine-readable
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    match run().await {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

async fn run() -> jurisgraph_cli::Result<i32> {
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref())?;

    let format = cli.format.map(Into::into).unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    let code = match cli.command {
        None | Some(Command::Repl) => {
            repl::run_repl(&config, &formatter).await?;
            0
        }
        Some(Command::Verify(args)) => commands::execute_verify(args, &config, &formatter).await?,
        Some(Command::Ask(args)) => commands::execute_ask(args, &config, &formatter).await?,
        Some(Command::Report) => {
            commands::execute_report(&config, &formatter)?;
            0
        }
        Some(Command::Ingest(args)) => {
            commands::execute_ingest(args, &config, &formatter).await?;
            0
        }
        Some(Command::Status) => {
            commands::execute_status(&config, &formatter).await?;
            0
        }
    };

    Ok(code)
}
