//! Canonical fixture snippets
//!
//! The embedded corpus: a near-duplicate C++ pair exercising template and
//! class extraction, plus a Rust reference mirroring the same shapes. The
//! files live under `test-fixtures/` so they can also be scanned from disk.

use super::types::{Corpus, Snippet};
use crate::parsers::Language;

pub const GENERIC_ADD_CPP: &str =
    include_str!("../../../test-fixtures/cpp/generic_add.cpp");

pub const GENERIC_ADD_V2_CPP: &str =
    include_str!("../../../test-fixtures/cpp/generic_add_v2.cpp");

pub const REFERENCE_RS: &str = include_str!("../../../test-fixtures/rust/reference.rs");

/// The embedded canonical corpus, in path order.
pub fn canonical() -> Corpus {
    Corpus::new(vec![
        Snippet::from_source("cpp/generic_add.cpp", Language::Cpp, GENERIC_ADD_CPP),
        Snippet::from_source("cpp/generic_add_v2.cpp", Language::Cpp, GENERIC_ADD_V2_CPP),
        Snippet::from_source("rust/reference.rs", Language::Rust, REFERENCE_RS),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_corpus_shape() {
        let corpus = canonical();

        assert_eq!(corpus.len(), 3);
        assert_eq!(corpus.snippets[0].language, Language::Cpp);
        assert_eq!(corpus.snippets[2].language, Language::Rust);
        // Every canonical snippet declares expectations
        assert!(corpus.iter().all(|s| s.expect.is_some()));
    }
}
