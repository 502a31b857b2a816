//! Ask command implementation.

use crate::cli::AskArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use jurisgraph_llm::OllamaProvider;
use jurisgraph_verifier::Verifier;

/// Execute the ask command, returning the process exit code.
pub async fn execute_ask(args: AskArgs, config: &Config, formatter: &Formatter) -> Result<i32> {
    let verifier = super::build_verifier(config).await?;
    let provider = OllamaProvider::from_config(&config.llm)?;
    ask_with(&verifier, &provider, &args.query, args.show_texts, formatter).await
}

/// Ask one question with an existing verifier and provider.
pub async fn ask_with(
    verifier: &Verifier,
    provider: &OllamaProvider,
    query: &str,
    show_texts: bool,
    formatter: &Formatter,
) -> Result<i32> {
    if query.trim().is_empty() {
        return Err(CliError::InvalidInput("Query must not be empty".to_string()));
    }

    let asked = verifier.ask(provider, query).await?;

    if show_texts {
        println!("{}", formatter.info("Analyst answer:"));
        println!("{}\n", asked.answer);
        println!("{}", formatter.info("Reviewer output:"));
        println!("{}\n", asked.review);
    } else {
        println!("{}\n", asked.answer);
    }
    println!("{}", formatter.format_outcome(&asked.verification)?);
    Ok(asked.verification.exit_code())
}
