//! `EXPECT:` fixture headers
//!
//! A snippet may declare what its parse should yield in a leading comment:
//! `// EXPECT: function_count=4 class_count=1 import_count=1`. Keys are
//! optional and unknown keys are tolerated, so fixtures only pin down what
//! they actually exercise.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::parsers::ParseResult;

static FIELD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([a-z_]+)=(\d+)").expect("valid field regex"));

/// Header lines to look at before giving up
const HEADER_WINDOW: usize = 5;

/// Declared parse expectations for one snippet
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expectation {
    pub function_count: Option<usize>,
    pub class_count: Option<usize>,
    pub import_count: Option<usize>,
    pub template_count: Option<usize>,
}

/// One failed count check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mismatch {
    pub field: String,
    pub expected: usize,
    pub actual: usize,
}

impl Expectation {
    /// Parse an `EXPECT:` header from the first few lines of a snippet.
    pub fn parse(source: &str) -> Option<Expectation> {
        let line = source
            .lines()
            .take(HEADER_WINDOW)
            .find(|l| l.contains("EXPECT:"))?;
        let (_, fields) = line.split_once("EXPECT:")?;

        let mut expect = Expectation::default();
        let mut any = false;
        for caps in FIELD_RE.captures_iter(fields) {
            let value: usize = match caps[2].parse() {
                Ok(v) => v,
                Err(_) => continue,
            };
            match &caps[1] {
                "function_count" => expect.function_count = Some(value),
                "class_count" => expect.class_count = Some(value),
                "import_count" => expect.import_count = Some(value),
                "template_count" => expect.template_count = Some(value),
                _ => continue,
            }
            any = true;
        }

        if any {
            Some(expect)
        } else {
            None
        }
    }

    /// Compare against a parse, yielding one mismatch per failed count.
    pub fn check(&self, result: &ParseResult) -> Vec<Mismatch> {
        let checks = [
            ("function_count", self.function_count, result.functions.len()),
            ("class_count", self.class_count, result.classes.len()),
            ("import_count", self.import_count, result.imports.len()),
            ("template_count", self.template_count, result.template_count),
        ];

        let mut mismatches = Vec::new();
        for (field, expected, actual) in checks {
            if let Some(expected) = expected {
                if expected != actual {
                    mismatches.push(Mismatch {
                        field: field.to_string(),
                        expected,
                        actual,
                    });
                }
            }
        }
        mismatches
    }
}
