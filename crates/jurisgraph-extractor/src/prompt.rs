//! Prompt contracts for the analyst and the reviewer
//!
//! The reviewer prompt documents the claim grammar that
//! [`crate::parser::parse_review`] reads back.

/// Builds the analyst prompt: answer a question from graph facts only
pub struct AnalystPromptBuilder {
    query: String,
    context: String,
}

impl AnalystPromptBuilder {
    /// Create a builder for a user query
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            context: String::new(),
        }
    }

    /// Add the decision digest the analyst may rely on
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = context.into();
        self
    }

    /// Build the complete analyst prompt
    pub fn build(&self) -> String {
        let mut prompt = String::new();
        prompt.push_str(ANALYST_INSTRUCTIONS);
        prompt.push_str("\n\nKnowledge graph:\n---\n");
        prompt.push_str(&self.context);
        prompt.push_str("---\n\nQuestion: ");
        prompt.push_str(&self.query);
        prompt.push('\n');
        prompt
    }
}

/// Builds the reviewer prompt: enumerate and judge the analyst's claims
pub struct ReviewerPromptBuilder {
    query: String,
    answer: String,
    context: String,
    with_metrics: bool,
}

impl ReviewerPromptBuilder {
    /// Create a builder for an analyst answer
    pub fn new(query: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            answer: answer.into(),
            context: String::new(),
            with_metrics: true,
        }
    }

    /// Add the decision digest the reviewer checks against
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = context.into();
        self
    }

    /// Ask (or not) for the trailing `quality_metrics` block
    pub fn with_metrics(mut self, with_metrics: bool) -> Self {
        self.with_metrics = with_metrics;
        self
    }

    /// Build the complete reviewer prompt
    pub fn build(&self) -> String {
        let mut prompt = String::new();

        prompt.push_str(REVIEWER_INSTRUCTIONS);
        prompt.push_str("\n\n");

        prompt.push_str("Knowledge graph:\n---\n");
        prompt.push_str(&self.context);
        prompt.push_str("---\n\n");

        prompt.push_str(&format!("Question: {}\n\n", self.query));
        prompt.push_str("Answer to review:\n---\n");
        prompt.push_str(&self.answer);
        prompt.push_str("\n---\n\n");

        prompt.push_str(CLAIM_GRAMMAR);
        if self.with_metrics {
            prompt.push_str("\n\n");
            prompt.push_str(METRICS_BLOCK);
        }

        prompt
    }
}

const ANALYST_INSTRUCTIONS: &str = r#"You are a legal analyst answering questions about Brazilian Supreme Court (STF) decisions.
Use ONLY the facts in the knowledge graph below. Cite docket numbers (e.g. HC 161.450) for every fact.
If the graph has no information on the question, say so explicitly."#;

const REVIEWER_INSTRUCTIONS: &str = r#"You are a strict legal reviewer. Check every factual assertion in the answer against the knowledge graph.
For each assertion decide whether the graph supports it (SUPPORTED), contradicts or lacks it (UNSUPPORTED),
or cannot be judged (UNKNOWN). Check docket numbers, rapporteurs, cited articles, topics and relations between decisions."#;

const CLAIM_GRAMMAR: &str = r#"Output format (mandatory). Start a line with the number of assertions, then one line per assertion:

CLAIMS: <n>
[1] <SUPPORTED|UNSUPPORTED|UNKNOWN> | <ATTRIBUTION|TOPIC|CITATION|RELATION|OTHER> | <docket numbers separated by ; or , (- for none)> | <asserted value or -> | <assertion text>

Kinds: ATTRIBUTION = who reported a decision (value: justice name); TOPIC = topic a decision deals with (value: topic);
CITATION = constitutional article a decision cites (value: article); RELATION = two decisions are connected (two dockets);
OTHER = anything else. Write CLAIMS: 0 if the answer makes no factual assertion."#;

const METRICS_BLOCK: &str = r#"Finish with a metrics block:

```quality_metrics
{"validated": true, "fidelity_score": 87.5, "total_claims": 8, "supported": 7, "unsupported": 1, "entities_checked": ["HC 161.450"], "problems": []}
```"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_review;

    #[test]
    fn test_reviewer_prompt_sections() {
        let prompt = ReviewerPromptBuilder::new("Who reported HC 161.450?", "Gilmar Mendes.")
            .with_context("- HC 161.450 (HC)\n")
            .build();
        assert!(prompt.contains("Question: Who reported HC 161.450?"));
        assert!(prompt.contains("Gilmar Mendes."));
        assert!(prompt.contains("- HC 161.450 (HC)"));
        assert!(prompt.contains("CLAIMS: <n>"));
        assert!(prompt.contains("```quality_metrics"));
    }

    #[test]
    fn test_reviewer_prompt_without_metrics() {
        let prompt = ReviewerPromptBuilder::new("q", "a").with_metrics(false).build();
        assert!(!prompt.contains("quality_metrics"));
    }

    #[test]
    fn test_analyst_prompt() {
        let prompt = AnalystPromptBuilder::new("Quais decisões tratam de drogas?")
            .with_context("- RE 635.659 (RE)\n")
            .build();
        assert!(prompt.contains("Question: Quais decisões tratam de drogas?"));
        assert!(prompt.contains("RE 635.659"));
    }

    #[test]
    fn test_grammar_example_is_not_a_valid_review() {
        // Placeholders must never parse as a real review
        assert!(parse_review(CLAIM_GRAMMAR, false).is_err());
    }
}
