//! End-to-end tests over the canonical fixture corpus.
//!
//! Covers: embedded samples, expectation verification, near-duplicate
//! pairing, and loading the same corpus from disk.

use std::path::Path;

use specimen_core::{
    corpus::samples, pair_corpus, Corpus, OutcomeStatus, PairVerdict, PairingConfig, Verifier,
};

#[test]
fn canonical_corpus_passes_expectations() {
    let corpus = samples::canonical();
    let mut verifier = Verifier::new();

    let report = verifier.verify(&corpus);

    assert!(
        report.all_passed(),
        "canonical corpus must verify cleanly: {}",
        report.to_json().unwrap_or_default()
    );
    assert_eq!(report.passed, 3);
    assert_eq!(report.failed, 0);
    assert_eq!(report.skipped, 0);
    assert!(report
        .outcomes
        .iter()
        .all(|o| o.status == OutcomeStatus::Passed));
}

#[test]
fn canonical_cpp_pair_is_near_duplicate() {
    let corpus = samples::canonical();
    let pairs = pair_corpus(&corpus, &PairingConfig::default());

    // Three snippets, three unordered pairs
    assert_eq!(pairs.len(), 3);

    let cpp_pair = pairs
        .iter()
        .find(|p| p.left.ends_with(".cpp") && p.right.ends_with(".cpp"))
        .expect("the two C++ snippets form a pair");
    assert_eq!(cpp_pair.verdict, PairVerdict::Near);
    assert!(
        cpp_pair.similarity >= 0.8,
        "C++ pair should be near-duplicate, got {}",
        cpp_pair.similarity
    );

    for pair in pairs.iter().filter(|p| p.right.ends_with(".rs")) {
        assert_eq!(
            pair.verdict,
            PairVerdict::Distinct,
            "{} vs {} should be distinct",
            pair.left,
            pair.right
        );
    }
}

#[test]
fn duplicated_snippet_is_exact() {
    let mut corpus = samples::canonical();
    let mut copy = corpus.snippets[0].clone();
    copy.path = "cpp/copy.cpp".to_string();
    corpus.snippets.push(copy);

    let pairs = pair_corpus(&corpus, &PairingConfig::default());
    let exact = pairs
        .iter()
        .find(|p| p.verdict == PairVerdict::Exact)
        .expect("duplicated snippet must be flagged exact");
    assert_eq!(exact.similarity, 1.0);
}

#[test]
fn corpus_loads_from_disk() {
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("../test-fixtures");
    let corpus = Corpus::load(&root).expect("test-fixtures should load");

    assert_eq!(corpus.len(), 3);
    assert_eq!(corpus.snippets[0].path, "cpp/generic_add.cpp");

    let mut verifier = Verifier::new();
    let report = verifier.verify(&corpus);
    assert!(report.all_passed());
}

#[test]
fn snippet_reads_from_disk() {
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("../test-fixtures");

    let snippet = specimen_core::Snippet::from_file(&root.join("rust/reference.rs"))
        .expect("reference fixture exists");
    assert!(snippet.expect.is_some());
    assert!(snippet.source.contains("Counter"));

    let err = specimen_core::Snippet::from_file(Path::new("no-such-file.cpp"));
    assert!(matches!(err, Err(specimen_core::SpecimenError::Io { .. })));

    let err = specimen_core::Snippet::from_file(Path::new("notes.txt"));
    assert!(matches!(
        err,
        Err(specimen_core::SpecimenError::UnsupportedLanguage(_))
    ));
}

#[test]
fn report_serializes_to_json() {
    let corpus = samples::canonical();
    let mut verifier = Verifier::new();

    let json = verifier.verify(&corpus).to_json().expect("report is JSON");
    assert!(json.contains("\"passed\""));
    assert!(json.contains("cpp/generic_add.cpp"));
}
