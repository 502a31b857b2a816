//! Verdict module - the opinions a verifier can render on a claim

use std::fmt;

/// Verdict rendered by the reviewer, and the final verdict after reconciliation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    /// The claim is backed by the graph
    Supported,

    /// The claim has no backing in the graph
    Unsupported,

    /// No opinion could be formed
    Unknown,
}

impl Verdict {
    /// Get the verdict name as it appears in reviewer output and reports
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Supported => "SUPPORTED",
            Verdict::Unsupported => "UNSUPPORTED",
            Verdict::Unknown => "UNKNOWN",
        }
    }

    /// Parse a verdict, case-insensitively
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "SUPPORTED" => Some(Verdict::Supported),
            "UNSUPPORTED" => Some(Verdict::Unsupported),
            "UNKNOWN" => Some(Verdict::Unknown),
            _ => None,
        }
    }
}

impl std::str::FromStr for Verdict {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid verdict: {}", s))
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Verdict rendered by the deterministic checker
///
/// An abstaining checker produces no verdict at all, so claims hold an
/// `Option<CheckerVerdict>`. `Unavailable` means the graph could not be asked
/// (communication failure or timeout) and is never the same as `Unsupported`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CheckerVerdict {
    /// At least one matching row
    Supported,

    /// Zero matching rows
    Unsupported,

    /// The graph store could not answer (CHECK_UNAVAILABLE)
    Unavailable,
}

impl CheckerVerdict {
    /// Get the checker verdict name
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckerVerdict::Supported => "SUPPORTED",
            CheckerVerdict::Unsupported => "UNSUPPORTED",
            CheckerVerdict::Unavailable => "CHECK_UNAVAILABLE",
        }
    }

    /// The opinion carried by this verdict, if it is one
    pub fn opinion(&self) -> Option<Verdict> {
        match self {
            CheckerVerdict::Supported => Some(Verdict::Supported),
            CheckerVerdict::Unsupported => Some(Verdict::Unsupported),
            CheckerVerdict::Unavailable => None,
        }
    }
}

impl fmt::Display for CheckerVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
