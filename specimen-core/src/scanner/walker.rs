//! Parallel fixture-directory walker
//!
//! Walks a fixture tree, skipping VCS and build directories, and processes
//! files in parallel: language detection, sizes, content hashes.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Instant;

use globset::{Glob, GlobSet, GlobSetBuilder};
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use xxhash_rust::xxh3::xxh3_64;

use super::types::{FileInfo, ScanConfig, ScanResult, ScanStats};
use crate::parsers::Language;
use crate::tally;

/// Directories never worth descending into for fixture corpora.
const SKIP_DIRS: &[&str] = &["target", "node_modules", "build", "dist", "vendor"];

/// Fixture-directory scanner
pub struct Scanner {
    config: ScanConfig,
    include_globs: GlobSet,
}

impl Scanner {
    /// Create a new scanner with the given configuration
    pub fn new(config: ScanConfig) -> Self {
        let mut builder = GlobSetBuilder::new();
        for pattern in &config.patterns {
            if let Ok(glob) = Glob::new(pattern) {
                builder.add(glob);
            }
        }
        let include_globs = builder
            .build()
            .unwrap_or_else(|_| GlobSet::empty());

        Self {
            config,
            include_globs,
        }
    }

    /// Scan the fixture tree and return results
    pub fn scan(&self) -> ScanResult {
        let start = Instant::now();

        let mut dirs_skipped = 0usize;
        let mut files_to_process = Vec::new();
        self.walk_dir(&self.config.root, &mut files_to_process, &mut dirs_skipped);

        let files_skipped = AtomicUsize::new(0);
        let errors: Mutex<Vec<String>> = Mutex::new(Vec::new());

        let mut files: Vec<FileInfo> = files_to_process
            .par_iter()
            .filter_map(|path| match self.process_file(path) {
                Ok(Some(info)) => Some(info),
                Ok(None) => {
                    files_skipped.fetch_add(1, Ordering::Relaxed);
                    None
                }
                Err(e) => {
                    if let Ok(mut errs) = errors.lock() {
                        errs.push(format!("{}: {}", path.display(), e));
                    }
                    None
                }
            })
            .collect();

        // Parallel collection order is nondeterministic
        files.sort_by(|a, b| a.path.cmp(&b.path));

        let mut by_language: FxHashMap<String, usize> = FxHashMap::default();
        for file in &files {
            if let Some(language) = file.language {
                *by_language.entry(language.as_str().to_string()).or_insert(0) += 1;
            }
        }
        let total_bytes = tally::total(0u64, files.iter().map(|f| f.size));

        let stats = ScanStats {
            total_files: files.len(),
            by_language,
            total_bytes,
            dirs_skipped,
            files_skipped: files_skipped.load(Ordering::Relaxed),
            duration: start.elapsed(),
        };

        ScanResult {
            root: self.config.root.display().to_string(),
            files,
            stats,
            errors: errors.into_inner().unwrap_or_default(),
        }
    }

    /// Recursively walk a directory
    fn walk_dir(&self, dir: &Path, files: &mut Vec<PathBuf>, dirs_skipped: &mut usize) {
        let entries = match fs::read_dir(dir) {
            Ok(e) => e,
            Err(_) => return,
        };

        for entry in entries.flatten() {
            let path = entry.path();
            let relative = path.strip_prefix(&self.config.root).unwrap_or(&path);

            if path.is_dir() {
                if is_skipped_dir(&path) {
                    *dirs_skipped += 1;
                } else {
                    self.walk_dir(&path, files, dirs_skipped);
                }
            } else if path.is_file()
                && (self.include_globs.is_empty() || self.include_globs.is_match(relative))
            {
                files.push(path);
            }
        }
    }

    /// Process a single file
    fn process_file(&self, path: &Path) -> Result<Option<FileInfo>, std::io::Error> {
        let metadata = fs::metadata(path)?;
        let size = metadata.len();

        if size > self.config.max_file_size {
            return Ok(None);
        }

        let relative = path
            .strip_prefix(&self.config.root)
            .unwrap_or(path)
            .to_string_lossy()
            .to_string();

        let language = Language::from_path(path);

        let hash = if self.config.compute_hashes {
            Some(compute_file_hash(path)?)
        } else {
            None
        };

        Ok(Some(FileInfo {
            path: relative,
            size,
            hash,
            language,
        }))
    }
}

/// Compute xxHash of a file
fn compute_file_hash(path: &Path) -> Result<String, std::io::Error> {
    let buffer = fs::read(path)?;
    let hash = xxh3_64(&buffer);
    Ok(format!("{:016x}", hash))
}

/// Hidden directories and build output are never fixture corpora.
fn is_skipped_dir(path: &Path) -> bool {
    let name = match path.file_name().and_then(|n| n.to_str()) {
        Some(n) => n,
        None => return false,
    };
    name.starts_with('.') || SKIP_DIRS.contains(&name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_skipped_dir() {
        assert!(is_skipped_dir(Path::new("repo/.git")));
        assert!(is_skipped_dir(Path::new("repo/target")));
        assert!(is_skipped_dir(Path::new("repo/node_modules")));
        assert!(!is_skipped_dir(Path::new("repo/cpp")));
        assert!(!is_skipped_dir(Path::new("test-fixtures")));
    }
}
