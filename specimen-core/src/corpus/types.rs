//! Corpus types - snippets and snippet collections

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::expect::Expectation;
use crate::error::SpecimenError;
use crate::parsers::Language;
use crate::scanner::{ScanConfig, Scanner};

/// One fixture snippet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snippet {
    /// Corpus-relative path
    pub path: String,
    pub language: Language,
    pub source: String,
    /// Declared expectations, if the snippet carries an `EXPECT:` header
    pub expect: Option<Expectation>,
}

impl Snippet {
    /// Build a snippet from in-memory source, parsing any `EXPECT:` header.
    pub fn from_source(
        path: impl Into<String>,
        language: Language,
        source: impl Into<String>,
    ) -> Self {
        let source = source.into();
        let expect = Expectation::parse(&source);
        Self {
            path: path.into(),
            language,
            source,
            expect,
        }
    }

    /// Read a snippet from disk, detecting its language from the extension.
    pub fn from_file(path: &Path) -> Result<Self, SpecimenError> {
        let language = Language::from_path(path)
            .ok_or_else(|| SpecimenError::UnsupportedLanguage(path.display().to_string()))?;
        let source = fs::read_to_string(path).map_err(|e| SpecimenError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        Ok(Self::from_source(
            path.display().to_string(),
            language,
            source,
        ))
    }
}

/// An ordered collection of fixture snippets
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Corpus {
    pub snippets: Vec<Snippet>,
}

impl Corpus {
    pub fn new(snippets: Vec<Snippet>) -> Self {
        Self { snippets }
    }

    /// Load every parseable snippet under `root`, in path order.
    ///
    /// Files in unsupported languages are ignored; unreadable files are an
    /// error.
    pub fn load(root: &Path) -> Result<Self, SpecimenError> {
        let scanner = Scanner::new(ScanConfig {
            root: root.to_path_buf(),
            compute_hashes: false,
            ..ScanConfig::default()
        });
        let scan = scanner.scan();

        let mut snippets = Vec::new();
        for file in &scan.files {
            let language = match file.language {
                Some(language) => language,
                None => continue,
            };
            let full = root.join(&file.path);
            let source = fs::read_to_string(&full).map_err(|e| SpecimenError::Io {
                path: file.path.clone(),
                source: e,
            })?;
            snippets.push(Snippet::from_source(file.path.clone(), language, source));
        }
        snippets.sort_by(|a, b| a.path.cmp(&b.path));

        Ok(Self::new(snippets))
    }

    pub fn len(&self) -> usize {
        self.snippets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snippets.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Snippet> {
        self.snippets.iter()
    }
}
