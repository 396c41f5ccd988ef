//! Corpus verification
//!
//! Parses every snippet and checks it against its declared expectations.

use serde::{Deserialize, Serialize};

use super::expect::Mismatch;
use super::types::{Corpus, Snippet};
use crate::parsers::{Language, ParseError, ParserManager};
use crate::tally::Counter;

/// What happened to one snippet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutcomeStatus {
    /// Parsed cleanly and every declared count matched
    Passed,
    /// Parse errors or count mismatches
    Failed,
    /// No `EXPECT:` header to check against
    Skipped,
}

/// Verification outcome for one snippet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnippetOutcome {
    pub path: String,
    pub language: Language,
    pub status: OutcomeStatus,
    pub mismatches: Vec<Mismatch>,
    pub parse_errors: Vec<ParseError>,
}

/// Verification outcome for a whole corpus
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyReport {
    pub outcomes: Vec<SnippetOutcome>,
    pub passed: u64,
    pub failed: u64,
    pub skipped: u64,
}

impl VerifyReport {
    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }

    /// JSON for embedding tools
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Parses snippets and checks declared expectations
pub struct Verifier {
    manager: ParserManager,
}

impl Verifier {
    pub fn new() -> Self {
        Self {
            manager: ParserManager::new(),
        }
    }

    /// Verify a single snippet.
    pub fn verify_snippet(&mut self, snippet: &Snippet) -> SnippetOutcome {
        let result = self.manager.parse(snippet.language, &snippet.source);

        let mismatches = snippet
            .expect
            .as_ref()
            .map(|e| e.check(&result))
            .unwrap_or_default();

        let status = if !result.errors.is_empty() || !mismatches.is_empty() {
            OutcomeStatus::Failed
        } else if snippet.expect.is_none() {
            OutcomeStatus::Skipped
        } else {
            OutcomeStatus::Passed
        };

        SnippetOutcome {
            path: snippet.path.clone(),
            language: snippet.language,
            status,
            mismatches,
            parse_errors: result.errors,
        }
    }

    /// Verify every snippet in a corpus.
    pub fn verify(&mut self, corpus: &Corpus) -> VerifyReport {
        let mut passed = Counter::zero();
        let mut failed = Counter::zero();
        let mut skipped = Counter::zero();

        let outcomes: Vec<SnippetOutcome> = corpus
            .iter()
            .map(|snippet| {
                let outcome = self.verify_snippet(snippet);
                match outcome.status {
                    OutcomeStatus::Passed => passed.increment(),
                    OutcomeStatus::Failed => failed.increment(),
                    OutcomeStatus::Skipped => skipped.increment(),
                };
                outcome
            })
            .collect();

        VerifyReport {
            outcomes,
            passed: passed.value(),
            failed: failed.value(),
            skipped: skipped.value(),
        }
    }
}

impl Default for Verifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_passing_snippet() {
        let mut verifier = Verifier::new();
        let snippet = Snippet::from_source(
            "ok.cpp",
            Language::Cpp,
            "// EXPECT: function_count=1 class_count=0\nint main() { return 0; }\n",
        );

        let outcome = verifier.verify_snippet(&snippet);
        assert_eq!(outcome.status, OutcomeStatus::Passed);
        assert!(outcome.mismatches.is_empty());
    }

    #[test]
    fn test_failing_snippet() {
        let mut verifier = Verifier::new();
        let snippet = Snippet::from_source(
            "bad.cpp",
            Language::Cpp,
            "// EXPECT: function_count=3\nint main() { return 0; }\n",
        );

        let outcome = verifier.verify_snippet(&snippet);
        assert_eq!(outcome.status, OutcomeStatus::Failed);
        assert_eq!(outcome.mismatches.len(), 1);
        assert_eq!(outcome.mismatches[0].actual, 1);
    }

    #[test]
    fn test_headerless_snippet_skipped() {
        let mut verifier = Verifier::new();
        let snippet = Snippet::from_source("plain.rs", Language::Rust, "fn main() {}\n");

        let outcome = verifier.verify_snippet(&snippet);
        assert_eq!(outcome.status, OutcomeStatus::Skipped);
    }

    #[test]
    fn test_report_tallies() {
        let mut verifier = Verifier::new();
        let corpus = Corpus::new(vec![
            Snippet::from_source(
                "a.cpp",
                Language::Cpp,
                "// EXPECT: function_count=1\nint a() { return 1; }\n",
            ),
            Snippet::from_source(
                "b.cpp",
                Language::Cpp,
                "// EXPECT: function_count=9\nint b() { return 2; }\n",
            ),
            Snippet::from_source("c.rs", Language::Rust, "fn c() {}\n"),
        ]);

        let report = verifier.verify(&corpus);
        assert_eq!(report.passed, 1);
        assert_eq!(report.failed, 1);
        assert_eq!(report.skipped, 1);
        assert!(!report.all_passed());
    }
}
