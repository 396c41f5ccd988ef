//! Fixture corpus
//!
//! The snippet model, the canonical embedded fixtures, `EXPECT:` header
//! parsing, and corpus verification.

pub mod expect;
pub mod samples;
pub mod types;
pub mod verify;

pub use expect::{Expectation, Mismatch};
pub use types::{Corpus, Snippet};
pub use verify::{OutcomeStatus, SnippetOutcome, Verifier, VerifyReport};
