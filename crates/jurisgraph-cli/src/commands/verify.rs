//! Verify command implementation.

use crate::cli::VerifyArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use std::fs;
use std::path::Path;

/// Execute the verify command, returning the process exit code.
pub async fn execute_verify(args: VerifyArgs, config: &Config, formatter: &Formatter) -> Result<i32> {
    let answer = read_text(&args.answer)?;
    let review = read_text(&args.review)?;
    if args.query.trim().is_empty() {
        return Err(CliError::InvalidInput("Query must not be empty".to_string()));
    }

    let verifier = super::build_verifier(config).await?;
    let outcome = verifier.verify(&args.query, &answer, &review).await;

    println!("{}", formatter.format_outcome(&outcome)?);
    Ok(outcome.exit_code())
}

fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path)
        .map_err(|e| CliError::InvalidInput(format!("Cannot read {}: {}", path.display(), e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_text_reports_path() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("answer.txt");
        let err = read_text(&missing).unwrap_err();
        assert!(err.to_string().contains("answer.txt"));

        fs::write(&missing, "O HC 161.450 foi relatado por Gilmar Mendes.").unwrap();
        assert!(read_text(&missing).unwrap().contains("Gilmar"));
    }
}
