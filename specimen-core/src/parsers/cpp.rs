//! C++ parser using native tree-sitter
//!
//! Extracts functions, inline methods, classes, and includes from C++
//! fixture snippets, and counts template declarations.

use std::time::Instant;

use streaming_iterator::StreamingIterator;
use tree_sitter::{Node, Parser, Query, QueryCursor};

use super::types::*;

/// C++ parser
pub struct CppParser {
    parser: Parser,
    function_query: Query,
    class_query: Query,
    include_query: Query,
    template_query: Query,
}

impl CppParser {
    pub fn new() -> Result<Self, String> {
        let mut parser = Parser::new();
        let language = tree_sitter_cpp::LANGUAGE;
        parser
            .set_language(&language.into())
            .map_err(|e| format!("Failed to set language: {}", e))?;

        let function_query = Query::new(
            &language.into(),
            r#"
            (function_definition
                declarator: (function_declarator
                    declarator: (identifier) @name
                    parameters: (parameter_list) @params
                )
            ) @function

            (function_definition
                declarator: (function_declarator
                    declarator: (field_identifier) @name
                    parameters: (parameter_list) @params
                )
            ) @method

            (function_definition
                declarator: (function_declarator
                    declarator: (qualified_identifier
                        name: (identifier) @name
                    )
                    parameters: (parameter_list) @params
                )
            ) @method
            "#,
        )
        .map_err(|e| format!("Failed to create function query: {}", e))?;

        let class_query = Query::new(
            &language.into(),
            r#"
            (class_specifier
                name: (type_identifier) @name
                (base_class_clause (type_identifier) @base)*
            ) @class

            (struct_specifier
                name: (type_identifier) @name
            ) @struct
            "#,
        )
        .map_err(|e| format!("Failed to create class query: {}", e))?;

        let include_query = Query::new(
            &language.into(),
            r#"
            (preproc_include
                path: [
                    (string_literal) @path
                    (system_lib_string) @system_path
                ]
            ) @include
            "#,
        )
        .map_err(|e| format!("Failed to create include query: {}", e))?;

        let template_query = Query::new(
            &language.into(),
            r#"
            (template_declaration) @template
            "#,
        )
        .map_err(|e| format!("Failed to create template query: {}", e))?;

        Ok(Self {
            parser,
            function_query,
            class_query,
            include_query,
            template_query,
        })
    }

    pub fn parse(&mut self, source: &str) -> ParseResult {
        let start = Instant::now();

        let tree = match self.parser.parse(source, None) {
            Some(t) => t,
            None => {
                let mut result = ParseResult::new(Language::Cpp);
                result.errors.push(ParseError {
                    message: "Failed to parse source".to_string(),
                    range: Range::new(0, 0, 0, 0),
                });
                return result;
            }
        };

        let root = tree.root_node();
        let source_bytes = source.as_bytes();

        let mut result = ParseResult::new(Language::Cpp);

        if root.has_error() {
            result.errors.push(ParseError {
                message: "Source contains syntax errors".to_string(),
                range: node_range(&root),
            });
        }

        self.extract_functions(&root, source_bytes, &mut result);
        self.extract_classes(&root, source_bytes, &mut result);
        self.extract_includes(&root, source_bytes, &mut result);
        result.template_count = self.count_templates(&root, source_bytes);

        result.parse_time_us = start.elapsed().as_micros() as u64;
        result
    }

    fn extract_functions(&self, root: &Node, source: &[u8], result: &mut ParseResult) {
        let mut cursor = QueryCursor::new();
        let mut matches = cursor.matches(&self.function_query, *root, source);

        while let Some(m) = matches.next() {
            let mut name = String::new();
            let mut is_method = false;
            let mut range = Range::new(0, 0, 0, 0);

            for capture in m.captures {
                let node = capture.node;
                let capture_name = self.function_query.capture_names()[capture.index as usize];

                match capture_name {
                    "name" => {
                        name = node.utf8_text(source).unwrap_or("").to_string();
                    }
                    "function" => {
                        range = node_range(&node);
                    }
                    "method" => {
                        is_method = true;
                        range = node_range(&node);
                    }
                    _ => {}
                }
            }

            if !name.is_empty() {
                result.functions.push(FunctionInfo {
                    name,
                    is_method,
                    is_exported: true, // C++ has no export in the module sense
                    range,
                });
            }
        }
    }

    fn extract_classes(&self, root: &Node, source: &[u8], result: &mut ParseResult) {
        let mut cursor = QueryCursor::new();
        let mut matches = cursor.matches(&self.class_query, *root, source);

        while let Some(m) = matches.next() {
            let mut name = String::new();
            let mut bases = Vec::new();
            let mut range = Range::new(0, 0, 0, 0);

            for capture in m.captures {
                let node = capture.node;
                let capture_name = self.class_query.capture_names()[capture.index as usize];

                match capture_name {
                    "name" => {
                        name = node.utf8_text(source).unwrap_or("").to_string();
                    }
                    "base" => {
                        bases.push(node.utf8_text(source).unwrap_or("").to_string());
                    }
                    "class" | "struct" => {
                        range = node_range(&node);
                    }
                    _ => {}
                }
            }

            if !name.is_empty() {
                result.classes.push(ClassInfo { name, bases, range });
            }
        }
    }

    fn extract_includes(&self, root: &Node, source: &[u8], result: &mut ParseResult) {
        let mut cursor = QueryCursor::new();
        let mut matches = cursor.matches(&self.include_query, *root, source);

        while let Some(m) = matches.next() {
            let mut path = String::new();
            let mut range = Range::new(0, 0, 0, 0);

            for capture in m.captures {
                let node = capture.node;
                let capture_name = self.include_query.capture_names()[capture.index as usize];

                match capture_name {
                    "path" | "system_path" => {
                        // Remove quotes or angle brackets
                        let text = node.utf8_text(source).unwrap_or("");
                        path = text
                            .trim_matches(|c| c == '"' || c == '<' || c == '>')
                            .to_string();
                    }
                    "include" => {
                        range = node_range(&node);
                    }
                    _ => {}
                }
            }

            if !path.is_empty() {
                result.imports.push(ImportInfo { path, range });
            }
        }
    }

    fn count_templates(&self, root: &Node, source: &[u8]) -> usize {
        let mut cursor = QueryCursor::new();
        let mut matches = cursor.matches(&self.template_query, *root, source);

        let mut count = 0;
        while matches.next().is_some() {
            count += 1;
        }
        count
    }
}

impl Default for CppParser {
    fn default() -> Self {
        Self::new().expect("Failed to create C++ parser")
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
