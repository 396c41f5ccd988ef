//! Fixture parsers
//!
//! Native tree-sitter parsers for the languages the corpus covers, behind a
//! manager that dispatches on file extension and builds parsers on first use.

pub mod cpp;
pub mod rust_lang;
pub mod types;

pub use cpp::CppParser;
pub use rust_lang::RustParser;
pub use types::*;

use std::path::Path;

/// Lazily-built per-language parsers with extension dispatch
pub struct ParserManager {
    cpp: Option<CppParser>,
    rust: Option<RustParser>,
}

impl ParserManager {
    pub fn new() -> Self {
        Self {
            cpp: None,
            rust: None,
        }
    }

    /// Parse a snippet, detecting the language from its path.
    ///
    /// Returns `None` for unsupported extensions.
    pub fn parse_file(&mut self, path: &str, source: &str) -> Option<ParseResult> {
        let language = Language::from_path(Path::new(path))?;
        Some(self.parse(language, source))
    }

    /// Parse a snippet of a known language.
    pub fn parse(&mut self, language: Language, source: &str) -> ParseResult {
        match language {
            Language::Cpp => match self.cpp_parser() {
                Ok(parser) => parser.parse(source),
                Err(e) => init_failure(language, e),
            },
            Language::Rust => match self.rust_parser() {
                Ok(parser) => parser.parse(source),
                Err(e) => init_failure(language, e),
            },
        }
    }

    fn cpp_parser(&mut self) -> Result<&mut CppParser, String> {
        match self.cpp {
            Some(ref mut parser) => Ok(parser),
            None => Ok(self.cpp.insert(CppParser::new()?)),
        }
    }

    fn rust_parser(&mut self) -> Result<&mut RustParser, String> {
        match self.rust {
            Some(ref mut parser) => Ok(parser),
            None => Ok(self.rust.insert(RustParser::new()?)),
        }
    }
}

impl Default for ParserManager {
    fn default() -> Self {
        Self::new()
    }
}

fn init_failure(language: Language, message: String) -> ParseResult {
    let mut result = ParseResult::new(language);
    result.errors.push(ParseError {
        message,
        range: Range::new(0, 0, 0, 0),
    });
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_file_dispatch() {
        let mut manager = ParserManager::new();

        let cpp = manager.parse_file("fixtures/a.cpp", "int main() { return 0; }");
        assert_eq!(cpp.map(|r| r.language), Some(Language::Cpp));

        let rust = manager.parse_file("fixtures/b.rs", "fn main() {}");
        assert_eq!(rust.map(|r| r.language), Some(Language::Rust));

        assert!(manager.parse_file("notes.txt", "hello").is_none());
    }

    #[test]
    fn test_parsers_are_reused() {
        let mut manager = ParserManager::new();
        let first = manager.parse(Language::Cpp, "int a() { return 1; }");
        let second = manager.parse(Language::Cpp, "int b() { return 2; }");

        assert_eq!(first.functions.len(), 1);
        assert_eq!(second.functions.len(), 1);
    }
}
