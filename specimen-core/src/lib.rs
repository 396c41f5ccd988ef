//! specimen-core: parser fixture corpus engine
//!
//! This crate provides the components for curating and checking the snippet
//! fixtures that exercise Specimen's language parsers:
//! - Scanner: Parallel fixture-directory walking with language detection
//! - Parsers: Native tree-sitter parsing for C++ and Rust fixtures
//! - Corpus: Snippet model, `EXPECT:` headers, expectation verification
//! - Pairing: Exact and near-duplicate recognition across a corpus
//! - Tally: Generic addition and running counters backing the reports

pub mod corpus;
pub mod error;
pub mod pairing;
pub mod parsers;
pub mod scanner;
pub mod tally;

// Re-exports for convenience
pub use corpus::{
    Corpus, Expectation, Mismatch, OutcomeStatus, Snippet, SnippetOutcome, Verifier,
    VerifyReport,
};
pub use error::SpecimenError;
pub use pairing::{pair_corpus, Fingerprint, PairVerdict, PairingConfig, SnippetPair};
pub use parsers::{
    ClassInfo, FunctionInfo, ImportInfo, Language, ParseError, ParseResult, ParserManager,
    Position, Range,
};
pub use scanner::{FileInfo, ScanConfig, ScanResult, ScanStats, Scanner};
pub use tally::{add, total, Counter};
