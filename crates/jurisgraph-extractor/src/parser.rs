//! Parse reviewer output into claim lines
//!
//! Grammar (prose around the block is ignored):
//!
//! ```text
//! CLAIMS: <n>
//! [<i>] <VERDICT> | <KIND> | <entity keys or -> | <value or -> | <text>
//! ```
//!
//! Entity keys are separated by `;` or `,`. The text is the last field and may
//! itself contain `|`.

use crate::error::ExtractorError;
use jurisgraph_domain::{ClaimKind, Verdict};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::warn;

static HEADER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^[#*>\s]*CLAIMS\s*:\s*(\d+)[*\s]*$").expect("header pattern is valid")
});

static CLAIM_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(?:[-*]\s*)?\[(\d+)\]\s*(.*)$").expect("claim pattern is valid"));

/// Number of `|`-separated fields on a claim line
pub const FIELDS: usize = 5;

/// One parsed claim line
#[derive(Debug, Clone, PartialEq)]
pub struct ClaimLine {
    /// Index written in brackets
    pub index: usize,
    /// Reviewer verdict
    pub verdict: Verdict,
    /// Claim kind
    pub kind: ClaimKind,
    /// Entity keys as written
    pub entities: Vec<String>,
    /// Asserted value
    pub value: Option<String>,
    /// Claim text
    pub text: String,
}

/// A review that follows the grammar
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedReview {
    /// Count from the header
    pub declared: usize,
    /// Claim lines in order
    pub lines: Vec<ClaimLine>,
}

/// Parse the claim block of a review
///
/// # Errors
///
/// `ExtractorError::MalformedReview` when the header is missing or repeated,
/// a line has the wrong shape, indices are out of sequence, or (unless
/// `tolerate_count_mismatch`) the header count differs from the lines found.
pub fn parse_review(review: &str, tolerate_count_mismatch: bool) -> Result<ParsedReview, ExtractorError> {
    let mut declared: Option<usize> = None;
    let mut lines = Vec::new();

    for raw in review.lines() {
        if raw.trim_start().starts_with("```") {
            continue;
        }

        if let Some(caps) = HEADER.captures(raw) {
            if declared.is_some() {
                return Err(malformed("more than one CLAIMS header"));
            }
            let count = caps[1]
                .parse::<usize>()
                .map_err(|_| malformed("claim count is not a number"))?;
            declared = Some(count);
            continue;
        }

        if declared.is_none() {
            continue;
        }

        if let Some(caps) = CLAIM_LINE.captures(raw) {
            let index = caps[1]
                .parse::<usize>()
                .map_err(|_| malformed("claim index is not a number"))?;
            lines.push(parse_fields(index, &caps[2])?);
        }
    }

    let declared = declared.ok_or_else(|| malformed("missing CLAIMS header"))?;

    for (position, line) in lines.iter().enumerate() {
        if line.index != position + 1 {
            return Err(malformed(&format!(
                "claim index {} out of sequence (expected {})",
                line.index,
                position + 1
            )));
        }
    }

    if declared != lines.len() {
        if tolerate_count_mismatch {
            warn!(declared, found = lines.len(), "claim count mismatch tolerated");
        } else {
            return Err(malformed(&format!(
                "header declares {} claims but {} claim lines found",
                declared,
                lines.len()
            )));
        }
    }

    Ok(ParsedReview { declared, lines })
}

fn malformed(reason: &str) -> ExtractorError {
    ExtractorError::MalformedReview(reason.to_string())
}

fn parse_fields(index: usize, rest: &str) -> Result<ClaimLine, ExtractorError> {
    let fields: Vec<&str> = rest.splitn(FIELDS, '|').map(str::trim).collect();
    if fields.len() < FIELDS {
        return Err(malformed(&format!(
            "claim {}: expected {} fields, found {}",
            index,
            FIELDS,
            fields.len()
        )));
    }

    let verdict = Verdict::parse(fields[0])
        .ok_or_else(|| malformed(&format!("claim {}: unknown verdict '{}'", index, fields[0])))?;
    let kind = ClaimKind::parse(fields[1])
        .ok_or_else(|| malformed(&format!("claim {}: unknown kind '{}'", index, fields[1])))?;

    let entities = if is_blank(fields[2]) {
        Vec::new()
    } else {
        fields[2]
            .split([';', ','])
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .map(str::to_string)
            .collect()
    };

    let value = (!is_blank(fields[3])).then(|| fields[3].to_string());

    let text = fields[4].to_string();
    if text.is_empty() {
        return Err(malformed(&format!("claim {}: empty text", index)));
    }

    Ok(ClaimLine {
        index,
        verdict,
        kind,
        entities,
        value,
        text,
    })
}

fn is_blank(field: &str) -> bool {
    field.is_empty() || field == "-"
}
