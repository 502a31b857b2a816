//! JurisGraph Claim Extractor
//!
//! Reads the reviewer's structured verdict output into claims.
//!
//! # Architecture
//!
//! ```text
//! reviewer text → parse_review → Claims (reviewer verdicts)
//!                      │
//!                      └── malformed / empty → one UNKNOWN fallback claim
//! ```
//!
//! # Key Features
//!
//! - **Strict grammar**: a `CLAIMS: n` header and `n` numbered claim lines
//! - **Documented fallback**: the pipeline always receives at least one claim
//! - **Self-reported metrics**: optional `quality_metrics` block, advisory only
//! - **Docket scanning**: normalized docket numbers from free text
//! - **Prompt contracts**: analyst and reviewer prompt builders
//!
//! # Example Usage
//!
//! ```
//! use jurisgraph_extractor::{ClaimExtractor, ExtractionStatus, ExtractorConfig};
//!
//! let extractor = ClaimExtractor::new(ExtractorConfig::default());
//! let review = "CLAIMS: 1\n[1] SUPPORTED | ATTRIBUTION | HC 161.450 | Gilmar Mendes | Rapporteur is Gilmar Mendes";
//!
//! let extraction = extractor.extract("HC 161.450 was reported by Gilmar Mendes.", review);
//! assert_eq!(extraction.status, ExtractionStatus::Parsed);
//! assert_eq!(extraction.claims.len(), 1);
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod extractor;
pub mod mentions;
pub mod metrics;
pub mod parser;
pub mod prompt;


pub use config::ExtractorConfig;
pub use error::ExtractorError;
pub use extractor::{ClaimExtractor, Extraction, ExtractionStatus};
pub use mentions::scan_dockets;
pub use metrics::{parse_reviewer_metrics, ReviewerMetrics};
pub use parser::{parse_review, ClaimLine, ParsedReview};
pub use prompt::{AnalystPromptBuilder, ReviewerPromptBuilder};
