//! Relevance decisions shared by the walker and the renderer.

use crate::error::RepoConcatError;
use crate::options::PatternSyntax;
use crate::pattern::{IgnorePredicate, slash_path};
use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::gitignore::{Gitignore, GitignoreBuilder};
use std::collections::HashSet;
use std::path::Path;

/// Version-control metadata directory, never descended into.
pub const VCS_DIR: &str = ".git";

pub const BINARY_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "bmp", "ico", "webp", "tiff", "psd", "pdf", "zip", "tar", "gz",
    "tgz", "bz2", "xz", "7z", "rar", "jar", "war", "exe", "dll", "so", "dylib", "bin", "o", "a",
    "lib", "class", "pyc", "pyo", "wasm", "mp3", "mp4", "wav", "ogg", "flac", "avi", "mov",
    "mkv", "webm", "ttf", "otf", "woff", "woff2", "eot", "db", "sqlite", "sqlite3", "iso", "dmg",
];

pub const IGNORED_FILENAMES: &[&str] = &[
    ".DS_Store",
    "Thumbs.db",
    "desktop.ini",
    "package-lock.json",
    "yarn.lock",
    "pnpm-lock.yaml",
    "Cargo.lock",
    "poetry.lock",
    "composer.lock",
];

/// Structured formats that are shortened once they pass the line budget.
pub const TRUNCATE_EXTENSIONS: &[&str] = &[
    "json", "jsonl", "ndjson", "geojson", "csv", "tsv", "xml", "yaml", "yml", "svg", "lock",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

/// Patterns loaded from the root's ignore file.
#[derive(Debug, Clone)]
pub enum IgnoreRules {
    Patterns(IgnorePredicate),
    Gitignore(Gitignore),
}

impl IgnoreRules {
    /// Loads `root/<file_name>` in the requested dialect.
    ///
    /// Absent or unreadable files yield `None`; the scan then runs unfiltered.
    pub fn load(root: &Path, file_name: &str, syntax: PatternSyntax) -> Option<Self> {
        let path = root.join(file_name);
        match syntax {
            PatternSyntax::Simple => IgnorePredicate::from_file(&path).map(IgnoreRules::Patterns),
            PatternSyntax::Gitignore => {
                if !path.is_file() {
                    return None;
                }
                let mut builder = GitignoreBuilder::new(root);
                if let Some(e) = builder.add(&path) {
                    tracing::warn!("Failed to parse ignore file {}: {}", path.display(), e);
                    return None;
                }
                match builder.build() {
                    Ok(gitignore) => Some(IgnoreRules::Gitignore(gitignore)),
                    Err(e) => {
                        tracing::warn!("Failed to build ignore rules: {}", e);
                        None
                    }
                }
            }
        }
    }

    pub fn is_ignored(&self, relative: &Path, is_dir: bool) -> bool {
        match self {
            IgnoreRules::Patterns(predicate) => predicate.is_match(relative),
            IgnoreRules::Gitignore(gitignore) => gitignore.matched(relative, is_dir).is_ignore(),
        }
    }
}

/// Compiles extra exclusion globs, matched against root-relative paths.
pub fn build_glob_set(patterns: &[String]) -> Result<Option<GlobSet>, RepoConcatError> {
    if patterns.is_empty() {
        return Ok(None);
    }
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).map_err(|e| RepoConcatError::InvalidPattern {
            pattern: pattern.clone(),
            reason: e.to_string(),
        })?;
        builder.add(glob);
    }
    builder
        .build()
        .map(Some)
        .map_err(|e| RepoConcatError::InvalidPattern {
            pattern: patterns.join(", "),
            reason: e.to_string(),
        })
}

#[derive(Debug, Clone)]
pub struct ExclusionPolicy {
    rules: Option<IgnoreRules>,
    extra: Option<GlobSet>,
    excluded_names: HashSet<String>,
    ignored_names: HashSet<String>,
    binary_extensions: HashSet<String>,
    truncate_extensions: HashSet<String>,
    include_empty: bool,
}

impl ExclusionPolicy {
    pub fn new(rules: Option<IgnoreRules>) -> Self {
        Self {
            rules,
            extra: None,
            excluded_names: HashSet::new(),
            ignored_names: IGNORED_FILENAMES.iter().map(|s| s.to_string()).collect(),
            binary_extensions: BINARY_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
            truncate_extensions: TRUNCATE_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
            include_empty: false,
        }
    }
    /// Always excludes entries with this name (output artifact, tool, ignore file).
    pub fn exclude_name(mut self, name: impl Into<String>) -> Self {
        self.excluded_names.insert(name.into());
        self
    }
    pub fn extra_patterns(mut self, set: Option<GlobSet>) -> Self {
        self.extra = set;
        self
    }
    pub fn include_empty(mut self, yes: bool) -> Self {
        self.include_empty = yes;
        self
    }

    pub fn is_relevant(&self, relative: &Path, kind: EntryKind, size: u64) -> bool {
        let Some(name) = relative.file_name().map(|n| n.to_string_lossy()) else {
            return false;
        };
        if self.excluded_names.contains(&*name) || self.ignored_names.contains(&*name) {
            return false;
        }
        if kind == EntryKind::Directory && name == VCS_DIR {
            return false;
        }
        let is_dir = kind == EntryKind::Directory;
        if self
            .rules
            .as_ref()
            .is_some_and(|rules| rules.is_ignored(relative, is_dir))
        {
            return false;
        }
        if self
            .extra
            .as_ref()
            .is_some_and(|set| set.is_match(slash_path(relative)))
        {
            return false;
        }
        if is_dir {
            return true;
        }
        if size == 0 && !self.include_empty {
            return false;
        }
        !lower_extension(relative).is_some_and(|ext| self.binary_extensions.contains(&ext))
    }

    pub fn is_truncate_eligible(&self, path: &Path) -> bool {
        lower_extension(path).is_some_and(|ext| self.truncate_extensions.contains(&ext))
    }
}

fn lower_extension(path: &Path) -> Option<String> {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
}
