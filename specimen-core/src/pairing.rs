//! Near-duplicate recognition
//!
//! Fixture corpora accumulate snippets that differ only by renames or
//! comments. Pairing compares every two snippets by token fingerprint and
//! flags exact and near duplicates.

use once_cell::sync::Lazy;
use regex::Regex;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use xxhash_rust::xxh3::xxh3_64;

use crate::corpus::Corpus;

static BLOCK_COMMENTS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)/\*.*?\*/").expect("valid block comment regex"));
static LINE_COMMENTS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"//[^\n]*").expect("valid line comment regex"));
static TOKENS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Za-z0-9_]+").expect("valid token regex"));

/// Pairing thresholds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PairingConfig {
    /// Token similarity at or above which a pair counts as near-duplicate
    pub near_threshold: f32,
}

impl Default for PairingConfig {
    fn default() -> Self {
        Self {
            near_threshold: 0.8,
        }
    }
}

/// Token-level identity of one snippet
#[derive(Debug, Clone)]
pub struct Fingerprint {
    tokens: FxHashSet<u64>,
    content_hash: u64,
}

impl Fingerprint {
    /// Fingerprint a snippet: hash of the raw content plus the set of
    /// identifier/number tokens with comments stripped.
    pub fn of(source: &str) -> Self {
        let stripped = BLOCK_COMMENTS.replace_all(source, " ");
        let stripped = LINE_COMMENTS.replace_all(&stripped, " ");

        let tokens = TOKENS
            .find_iter(&stripped)
            .map(|m| xxh3_64(m.as_str().as_bytes()))
            .collect();

        Self {
            tokens,
            content_hash: xxh3_64(source.as_bytes()),
        }
    }

    /// Byte-identical content
    pub fn is_identical(&self, other: &Fingerprint) -> bool {
        self.content_hash == other.content_hash
    }

    /// Jaccard overlap of token sets, in [0, 1].
    pub fn similarity(&self, other: &Fingerprint) -> f32 {
        let intersection = self.tokens.intersection(&other.tokens).count();
        let union = self.tokens.len() + other.tokens.len() - intersection;
        if union == 0 {
            // Two token-free snippets (empty or all comments)
            return 1.0;
        }
        intersection as f32 / union as f32
    }
}

/// How alike two snippets are
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PairVerdict {
    Exact,
    Near,
    Distinct,
}

/// One compared snippet pair
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnippetPair {
    pub left: String,
    pub right: String,
    pub similarity: f32,
    pub verdict: PairVerdict,
}

/// Compare every unordered snippet pair in a corpus.
///
/// Pairs come back sorted by similarity, most alike first.
pub fn pair_corpus(corpus: &Corpus, config: &PairingConfig) -> Vec<SnippetPair> {
    let fingerprints: Vec<Fingerprint> = corpus
        .iter()
        .map(|snippet| Fingerprint::of(&snippet.source))
        .collect();

    let mut pairs = Vec::new();
    for i in 0..corpus.snippets.len() {
        for j in (i + 1)..corpus.snippets.len() {
            let similarity = fingerprints[i].similarity(&fingerprints[j]);
            let verdict = if fingerprints[i].is_identical(&fingerprints[j]) {
                PairVerdict::Exact
            } else if similarity >= config.near_threshold {
                PairVerdict::Near
            } else {
                PairVerdict::Distinct
            };
            pairs.push(SnippetPair {
                left: corpus.snippets[i].path.clone(),
                right: corpus.snippets[j].path.clone(),
                similarity,
                verdict,
            });
        }
    }

    pairs.sort_by(|a, b| b.similarity.total_cmp(&a.similarity));
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::Snippet;
    use crate::parsers::Language;

    fn corpus_of(sources: &[(&str, &str)]) -> Corpus {
        Corpus::new(
            sources
                .iter()
                .map(|(path, source)| Snippet::from_source(*path, Language::Cpp, *source))
                .collect(),
        )
    }

    #[test]
    fn test_identical_snippets_are_exact() {
        let corpus = corpus_of(&[
            ("a.cpp", "int add(int a, int b) { return a + b; }"),
            ("b.cpp", "int add(int a, int b) { return a + b; }"),
        ]);

        let pairs = pair_corpus(&corpus, &PairingConfig::default());
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].verdict, PairVerdict::Exact);
        assert_eq!(pairs[0].similarity, 1.0);
    }

    #[test]
    fn test_comment_only_change_is_near() {
        let corpus = corpus_of(&[
            ("a.cpp", "// sums\nint add(int a, int b) { return a + b; }"),
            ("b.cpp", "// adds them\nint add(int a, int b) { return a + b; }"),
        ]);

        let pairs = pair_corpus(&corpus, &PairingConfig::default());
        assert_eq!(pairs[0].verdict, PairVerdict::Near);
        assert_eq!(pairs[0].similarity, 1.0);
    }

    #[test]
    fn test_unrelated_snippets_are_distinct() {
        let corpus = corpus_of(&[
            ("a.cpp", "int add(int a, int b) { return a + b; }"),
            ("b.cpp", "void log_line(const char* msg) { puts(msg); }"),
        ]);

        let pairs = pair_corpus(&corpus, &PairingConfig::default());
        assert_eq!(pairs[0].verdict, PairVerdict::Distinct);
        assert!(pairs[0].similarity < 0.5);
    }

    #[test]
    fn test_token_free_snippets_count_as_alike() {
        let a = Fingerprint::of("// only a comment\n");
        let b = Fingerprint::of("");
        assert_eq!(a.similarity(&b), 1.0);
    }

    #[test]
    fn test_pairs_sorted_by_similarity() {
        let corpus = corpus_of(&[
            ("a.cpp", "int add(int a, int b) { return a + b; }"),
            ("b.cpp", "int add(int x, int y) { return x + y; }"),
            ("c.cpp", "void unrelated(char* buffer, long len) { }"),
        ]);

        let pairs = pair_corpus(&corpus, &PairingConfig::default());
        assert_eq!(pairs.len(), 3);
        assert!(pairs[0].similarity >= pairs[1].similarity);
        assert!(pairs[1].similarity >= pairs[2].similarity);
        assert_eq!(pairs[0].left, "a.cpp");
        assert_eq!(pairs[0].right, "b.cpp");
    }
}
