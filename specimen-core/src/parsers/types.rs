//! Parser types - Core data structures for fixture parsing

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Languages the fixture parsers understand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Cpp,
    Rust,
}

impl Language {
    /// Detect a language from a file extension
    pub fn from_extension(ext: &str) -> Option<Language> {
        match ext.to_lowercase().as_str() {
            "cpp" | "cc" | "cxx" | "hpp" | "hh" | "hxx" => Some(Language::Cpp),
            "rs" => Some(Language::Rust),
            _ => None,
        }
    }

    /// Detect a language from a file path
    pub fn from_path(path: &Path) -> Option<Language> {
        let ext = path.extension()?.to_str()?;
        Language::from_extension(ext)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Cpp => "cpp",
            Language::Rust => "rust",
        }
    }
}

/// A position in source text (0-based)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

/// A source range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

impl Range {
    pub fn new(start_line: u32, start_column: u32, end_line: u32, end_column: u32) -> Self {
        Self {
            start: Position {
                line: start_line,
                column: start_column,
            },
            end: Position {
                line: end_line,
                column: end_column,
            },
        }
    }
}

/// A function or method extracted from a snippet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionInfo {
    pub name: String,
    /// Defined inside a class body or impl block
    pub is_method: bool,
    pub is_exported: bool,
    pub range: Range,
}

/// A class, struct, enum, or trait extracted from a snippet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassInfo {
    pub name: String,
    pub bases: Vec<String>,
    pub range: Range,
}

/// An include or use declaration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportInfo {
    pub path: String,
    pub range: Range,
}

/// A non-fatal parse error
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParseError {
    pub message: String,
    pub range: Range,
}

/// Everything extracted from one snippet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParseResult {
    pub language: Language,
    pub functions: Vec<FunctionInfo>,
    pub classes: Vec<ClassInfo>,
    pub imports: Vec<ImportInfo>,
    /// Template declarations (C++) or generic items (Rust)
    pub template_count: usize,
    pub errors: Vec<ParseError>,
    pub parse_time_us: u64,
}

impl ParseResult {
    pub fn new(language: Language) -> Self {
        Self {
            language,
            functions: Vec::new(),
            classes: Vec::new(),
            imports: Vec::new(),
            template_count: 0,
            errors: Vec::new(),
            parse_time_us: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_from_extension() {
        assert_eq!(Language::from_extension("cpp"), Some(Language::Cpp));
        assert_eq!(Language::from_extension("HPP"), Some(Language::Cpp));
        assert_eq!(Language::from_extension("rs"), Some(Language::Rust));
        assert_eq!(Language::from_extension("py"), None);
    }

    #[test]
    fn test_language_from_path() {
        assert_eq!(Language::from_path(Path::new("a/b/x.cc")), Some(Language::Cpp));
        assert_eq!(Language::from_path(Path::new("reference.rs")), Some(Language::Rust));
        assert_eq!(Language::from_path(Path::new("notes.txt")), None);
        assert_eq!(Language::from_path(Path::new("Makefile")), None);
    }
}
