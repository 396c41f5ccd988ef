//! Rust parser using native tree-sitter
//!
//! Extracts functions, structs, and use declarations from Rust fixture
//! snippets, and counts generic items.

use std::time::Instant;

use streaming_iterator::StreamingIterator;
use tree_sitter::{Node, Parser, Query, QueryCursor};

use super::types::*;

/// Rust parser
pub struct RustParser {
    parser: Parser,
    function_query: Query,
    type_query: Query,
    use_query: Query,
    generic_query: Query,
}

impl RustParser {
    pub fn new() -> Result<Self, String> {
        let mut parser = Parser::new();
        let language = tree_sitter_rust::LANGUAGE;
        parser
            .set_language(&language.into())
            .map_err(|e| format!("Failed to set language: {}", e))?;

        let function_query = Query::new(
            &language.into(),
            r#"
            (function_item
                (visibility_modifier)? @visibility
                name: (identifier) @name
                parameters: (parameters) @params
            ) @function
            "#,
        )
        .map_err(|e| format!("Failed to create function query: {}", e))?;

        let type_query = Query::new(
            &language.into(),
            r#"
            (struct_item
                (visibility_modifier)? @visibility
                name: (type_identifier) @name
            ) @struct

            (enum_item
                (visibility_modifier)? @visibility
                name: (type_identifier) @name
            ) @enum

            (trait_item
                (visibility_modifier)? @visibility
                name: (type_identifier) @name
            ) @trait
            "#,
        )
        .map_err(|e| format!("Failed to create type query: {}", e))?;

        let use_query = Query::new(
            &language.into(),
            r#"
            (use_declaration
                argument: (_) @use_path
            ) @use
            "#,
        )
        .map_err(|e| format!("Failed to create use query: {}", e))?;

        let generic_query = Query::new(
            &language.into(),
            r#"
            (function_item type_parameters: (type_parameters)) @generic
            (struct_item type_parameters: (type_parameters)) @generic
            (enum_item type_parameters: (type_parameters)) @generic
            (trait_item type_parameters: (type_parameters)) @generic
            (impl_item type_parameters: (type_parameters)) @generic
            "#,
        )
        .map_err(|e| format!("Failed to create generic query: {}", e))?;

        Ok(Self {
            parser,
            function_query,
            type_query,
            use_query,
            generic_query,
        })
    }

    pub fn parse(&mut self, source: &str) -> ParseResult {
        let start = Instant::now();

        let tree = match self.parser.parse(source, None) {
            Some(t) => t,
            None => {
                let mut result = ParseResult::new(Language::Rust);
                result.errors.push(ParseError {
                    message: "Failed to parse source".to_string(),
                    range: Range::new(0, 0, 0, 0),
                });
                return result;
            }
        };

        let root = tree.root_node();
        let source_bytes = source.as_bytes();

        let mut result = ParseResult::new(Language::Rust);

        if root.has_error() {
            result.errors.push(ParseError {
                message: "Source contains syntax errors".to_string(),
                range: node_range(&root),
            });
        }

        self.extract_functions(&root, source_bytes, &mut result);
        self.extract_types(&root, source_bytes, &mut result);
        self.extract_uses(&root, source_bytes, &mut result);
        result.template_count = self.count_generics(&root, source_bytes);

        result.parse_time_us = start.elapsed().as_micros() as u64;
        result
    }

    fn extract_functions(&self, root: &Node, source: &[u8], result: &mut ParseResult) {
        let mut cursor = QueryCursor::new();
        let mut matches = cursor.matches(&self.function_query, *root, source);

        while let Some(m) = matches.next() {
            let mut name = String::new();
            let mut is_pub = false;
            let mut is_method = false;
            let mut range = Range::new(0, 0, 0, 0);

            for capture in m.captures {
                let node = capture.node;
                let capture_name = self.function_query.capture_names()[capture.index as usize];

                match capture_name {
                    "name" => {
                        name = node.utf8_text(source).unwrap_or("").to_string();
                    }
                    "visibility" => {
                        let vis = node.utf8_text(source).unwrap_or("");
                        is_pub = vis.starts_with("pub");
                    }
                    "function" => {
                        range = node_range(&node);
                        is_method = in_impl_block(&node);
                    }
                    _ => {}
                }
            }

            if !name.is_empty() {
                result.functions.push(FunctionInfo {
                    name,
                    is_method,
                    is_exported: is_pub,
                    range,
                });
            }
        }
    }

    fn extract_types(&self, root: &Node, source: &[u8], result: &mut ParseResult) {
        let mut cursor = QueryCursor::new();
        let mut matches = cursor.matches(&self.type_query, *root, source);

        while let Some(m) = matches.next() {
            let mut name = String::new();
            let mut range = Range::new(0, 0, 0, 0);

            for capture in m.captures {
                let node = capture.node;
                let capture_name = self.type_query.capture_names()[capture.index as usize];

                match capture_name {
                    "name" => {
                        name = node.utf8_text(source).unwrap_or("").to_string();
                    }
                    "struct" | "enum" | "trait" => {
                        range = node_range(&node);
                    }
                    _ => {}
                }
            }

            if !name.is_empty() {
                result.classes.push(ClassInfo {
                    name,
                    bases: Vec::new(),
                    range,
                });
            }
        }
    }

    fn extract_uses(&self, root: &Node, source: &[u8], result: &mut ParseResult) {
        let mut cursor = QueryCursor::new();
        let mut matches = cursor.matches(&self.use_query, *root, source);

        while let Some(m) = matches.next() {
            let mut use_path = String::new();
            let mut range = Range::new(0, 0, 0, 0);

            for capture in m.captures {
                let node = capture.node;
                let capture_name = self.use_query.capture_names()[capture.index as usize];

                match capture_name {
                    "use_path" => {
                        use_path = node.utf8_text(source).unwrap_or("").to_string();
                    }
                    "use" => {
                        range = node_range(&node);
                    }
                    _ => {}
                }
            }

            if !use_path.is_empty() {
                result.imports.push(ImportInfo {
                    path: use_path,
                    range,
                });
            }
        }
    }

    fn count_generics(&self, root: &Node, source: &[u8]) -> usize {
        let mut cursor = QueryCursor::new();
        let mut matches = cursor.matches(&self.generic_query, *root, source);

        let mut count = 0;
        while matches.next().is_some() {
            count += 1;
        }
        count
    }
}

impl Default for RustParser {
    fn default() -> Self {
        Self::new().expect("Failed to create Rust parser")
    }
}

/// A function_item nested in `impl { ... }` is a method.
fn in_impl_block(node: &Node) -> bool {
    match node.parent() {
        Some(parent) if parent.kind() == "declaration_list" => parent
            .parent()
            .map(|grand| grand.kind() == "impl_item")
            .unwrap_or(false),
        _ => false,
    }
}

fn node_range(node: &Node) -> Range {
    Range {
        start: Position {
            line: node.start_position().row as u32,
            column: node.start_position().column as u32,
        },
        end: Position {
            line: node.end_position().row as u32,
            column: node.end_position().column as u32,
        },
    }
}
