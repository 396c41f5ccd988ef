//! Crate-level error type

use thiserror::Error;

/// Errors surfaced when loading fixture corpora from disk.
#[derive(Debug, Error)]
pub enum SpecimenError {
    #[error("{path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported fixture language: {0}")]
    UnsupportedLanguage(String),
}
