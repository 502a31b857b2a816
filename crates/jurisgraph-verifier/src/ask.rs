//! Analyst → reviewer → verify
//!
//! The two language-model calls are collaborators; this module only wires
//! prompts, bounds each call (and the digest read) with a timeout and hands the texts to the
//! verifier.

use crate::error::VerifyError;
use crate::verifier::{VerificationOutcome, Verifier};
use jurisgraph_domain::traits::TextGenerator;
use jurisgraph_extractor::{AnalystPromptBuilder, ReviewerPromptBuilder};
use jurisgraph_graph::{decision_digest, render_digest};
use tracing::{info, warn};

/// Texts produced for one question, plus their verification
#[derive(Debug, Clone)]
pub struct AskOutcome {
    /// Analyst answer
    pub answer: String,
    /// Reviewer output
    pub review: String,
    /// Verification of the answer
    pub verification: VerificationOutcome,
}

impl Verifier {
    /// Answer a question with `generator`, review the answer and verify it
    pub async fn ask<T: TextGenerator + ?Sized>(&self, generator: &T, query: &str) -> Result<AskOutcome, VerifyError> {
        let limit = self.config().checker.check_timeout();
        let context = match tokio::time::timeout(limit, decision_digest(self.store().as_ref())).await {
            Ok(Ok(summaries)) => render_digest(&summaries),
            Ok(Err(e)) => {
                warn!(error = %e, "decision digest unavailable, prompting without context");
                String::new()
            }
            Err(_) => {
                warn!(timeout_ms = limit.as_millis() as u64, "decision digest timed out, prompting without context");
                String::new()
            }
        };

        let analyst_prompt = AnalystPromptBuilder::new(query).with_context(context.clone()).build();
        let answer = self.generate(generator, &analyst_prompt, "analyst").await?;

        let reviewer_prompt = ReviewerPromptBuilder::new(query, answer.clone())
            .with_context(context)
            .with_metrics(self.config().generation.reviewer_metrics)
            .build();
        let review = self.generate(generator, &reviewer_prompt, "reviewer").await?;

        let verification = self.verify(query, &answer, &review).await;
        Ok(AskOutcome {
            answer,
            review,
            verification,
        })
    }

    async fn generate<T: TextGenerator + ?Sized>(&self, generator: &T, prompt: &str, role: &str) -> Result<String, VerifyError> {
        let timeout = self.config().generation.timeout();
        match tokio::time::timeout(timeout, generator.generate(prompt)).await {
            Ok(Ok(text)) => {
                info!(role, chars = text.chars().count(), "generation finished");
                Ok(text)
            }
            Ok(Err(e)) => Err(VerifyError::Generation(format!("{} call failed: {}", role, e))),
            Err(_) => Err(VerifyError::Generation(format!(
                "{} call timed out after {} s",
                role,
                timeout.as_secs()
            ))),
        }
    }
}
