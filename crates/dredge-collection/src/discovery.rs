//! Segment discovery: which files under a collection root are read.
//!
//! Filtering is a pure function of file and directory names. No candidate is
//! opened during discovery, which keeps descriptor usage flat on corpora with
//! hundreds of thousands of files.
//!
//! Rules for a file name, applied in order:
//!
//! 1. a skipped suffix rejects it;
//! 2. a non-empty allowed-suffix set rejects it unless one suffix matches;
//! 3. a skipped prefix rejects it;
//! 4. a non-empty allowed-prefix set rejects it unless one prefix matches.
//!
//! A directory whose name is in the skipped set is pruned with its whole
//! subtree. The collection root itself is never pruned.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use walkdir::{DirEntry, WalkDir};

/// Name-based filter selecting segment files under a root.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SegmentFilter {
    skipped_prefixes: BTreeSet<String>,
    allowed_prefixes: BTreeSet<String>,
    skipped_suffixes: BTreeSet<String>,
    allowed_suffixes: BTreeSet<String>,
    skipped_dirs: BTreeSet<String>,
}

impl SegmentFilter {
    /// A filter that accepts every file.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject files whose name starts with `prefix`.
    pub fn skip_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.skipped_prefixes.insert(prefix.into());
        self
    }

    /// Accept only files whose name starts with one of the allowed prefixes.
    pub fn allow_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.allowed_prefixes.insert(prefix.into());
        self
    }

    /// Reject files whose name ends with `suffix`.
    pub fn skip_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.skipped_suffixes.insert(suffix.into());
        self
    }

    /// Accept only files whose name ends with one of the allowed suffixes.
    pub fn allow_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.allowed_suffixes.insert(suffix.into());
        self
    }

    /// Prune directories with this exact name.
    pub fn skip_dir(mut self, name: impl Into<String>) -> Self {
        self.skipped_dirs.insert(name.into());
        self
    }

    /// Whether a file with this name is a segment.
    pub fn accepts_file_name(&self, name: &str) -> bool {
        if self.skipped_suffixes.iter().any(|s| name.ends_with(s.as_str())) {
            return false;
        }
        if !self.allowed_suffixes.is_empty()
            && !self.allowed_suffixes.iter().any(|s| name.ends_with(s.as_str()))
        {
            return false;
        }
        if self
            .skipped_prefixes
            .iter()
            .any(|p| name.starts_with(p.as_str()))
        {
            return false;
        }
        self.allowed_prefixes.is_empty()
            || self
                .allowed_prefixes
                .iter()
                .any(|p| name.starts_with(p.as_str()))
    }

    /// Whether a directory with this name is pruned.
    pub fn skips_dir_name(&self, name: &str) -> bool {
        self.skipped_dirs.contains(name)
    }

    /// Walk `root` and return every accepted file.
    ///
    /// Symlinked directories are followed. Entries that cannot be read are
    /// logged and left out. Order is unspecified.
    pub fn discover(&self, root: &Path) -> Vec<PathBuf> {
        let mut paths = Vec::new();

        let walker = WalkDir::new(root)
            .follow_links(true)
            .into_iter()
            .filter_entry(|entry| self.keep_entry(entry));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    warn!("visiting failed under {}: {err}", root.display());
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            if self.accepts_file_name(&entry.file_name().to_string_lossy()) {
                paths.push(entry.into_path());
            }
        }

        paths
    }

    fn keep_entry(&self, entry: &DirEntry) -> bool {
        if entry.depth() == 0 || !entry.file_type().is_dir() {
            return true;
        }
        if self.skips_dir_name(&entry.file_name().to_string_lossy()) {
            info!("Skipping: {}", entry.path().display());
            return false;
        }
        true
    }
}
